use super::analysis::{IssueCount, MobileMetrics};
use crate::constants::{
    ANDROID_SESSION_THRESHOLD, ISSUE_COUNT_THRESHOLD, LOW_MOBILE_SUCCESS_RATE, LOW_TOUCH_ACCURACY,
    LOW_USABILITY_SCORE,
};
use crate::enhancement::{Enhancement, Impact, Priority};
use crate::profile::Device;

/// Threshold battery over mobile metrics, in generation order.
#[must_use]
pub fn mobile_enhancements(metrics: &MobileMetrics) -> Vec<Enhancement> {
    let mut out = Vec::new();

    if metrics.success_rate < LOW_MOBILE_SUCCESS_RATE {
        out.push(Enhancement::new(
            Priority::Critical,
            "Mobile Usability",
            format!(
                "Low mobile success rate: {:.1}%",
                metrics.success_rate * 100.0
            ),
            "Major mobile UI overhaul needed",
            "Redesign interface specifically for touch devices",
            Impact::High,
        ));
    }

    if metrics.average_touch_accuracy < LOW_TOUCH_ACCURACY {
        out.push(Enhancement::new(
            Priority::High,
            "Touch Interface",
            format!(
                "Poor touch accuracy: {:.1}%",
                metrics.average_touch_accuracy * 100.0
            ),
            "Increase button sizes and improve touch targets",
            "Minimum 44px touch targets, better spacing",
            Impact::High,
        ));
    }

    if metrics.average_usability_score < LOW_USABILITY_SCORE {
        out.push(Enhancement::new(
            Priority::High,
            "Mobile UX",
            format!(
                "Low usability score: {:.1}/100",
                metrics.average_usability_score
            ),
            "Comprehensive mobile UX improvements",
            "Mobile-first design approach, user testing",
            Impact::High,
        ));
    }

    for &IssueCount { kind, count } in &metrics.common_mobile_issues {
        if count > ISSUE_COUNT_THRESHOLD {
            let (priority, recommendation, implementation) = kind.remedy();
            out.push(Enhancement::new(
                priority,
                "Mobile Issues",
                format!("{count} sessions affected by: {kind}"),
                recommendation,
                implementation,
                Impact::Medium,
            ));
        }
    }

    if metrics.sessions_on(Device::Android) > ANDROID_SESSION_THRESHOLD {
        out.push(Enhancement::new(
            Priority::Medium,
            "Device Compatibility",
            "Android-specific testing needed",
            "Enhanced Android compatibility testing",
            "Test on various Android devices and versions",
            Impact::Medium,
        ));
    }

    out
}
