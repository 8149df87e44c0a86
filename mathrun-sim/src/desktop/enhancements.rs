use super::analysis::{DesktopMetrics, pauses_per_session};
use crate::constants::{
    HIGH_PAUSE_USAGE_RATIO, HIGH_RAGEQUIT_RATE, LOW_COMPLETION_RATE, LOW_ENJOYMENT,
    USER_REQUEST_MIN_COUNT,
};
use crate::enhancement::{Enhancement, Impact, Priority};

/// Threshold battery over desktop metrics, in generation order.
#[must_use]
pub fn desktop_enhancements(metrics: &DesktopMetrics) -> Vec<Enhancement> {
    let mut out = Vec::new();

    if metrics.completion_rate < LOW_COMPLETION_RATE {
        out.push(Enhancement::new(
            Priority::High,
            "Difficulty",
            "Low completion rate",
            "Implement adaptive difficulty that reduces when player struggles",
            "Add dynamic difficulty scaling based on consecutive failures",
            Impact::High,
        ));
    }

    if metrics.ragequit_rate > HIGH_RAGEQUIT_RATE {
        out.push(Enhancement::new(
            Priority::High,
            "User Experience",
            "High frustration quit rate",
            "Add encouraging feedback and help hints",
            "Show hints after 3 wrong answers, add motivational messages",
            Impact::High,
        ));
    }

    if pauses_per_session(metrics) > HIGH_PAUSE_USAGE_RATIO {
        out.push(Enhancement::new(
            Priority::Medium,
            "UI/UX",
            "High pause usage indicates good feature adoption",
            "Enhance pause menu with more options",
            "Add sound settings, visual effects toggle, and help section",
            Impact::Medium,
        ));
    }

    if metrics.speed_changes > 0
        && let Some(top) = metrics.top_speed()
    {
        out.push(Enhancement::new(
            Priority::Low,
            "Performance",
            "Speed adjustment feature is being used",
            format!("Most popular speed is \"{top}\" - consider making this default"),
            format!("Set default speed to {top} for new players"),
            Impact::Medium,
        ));
    }

    if metrics.average_enjoyment < LOW_ENJOYMENT {
        out.push(Enhancement::new(
            Priority::High,
            "Game Design",
            "Low average enjoyment score",
            "Add more engaging visual feedback and rewards",
            "Implement combo system, achievement badges, and better particle effects",
            Impact::High,
        ));
    }

    for entry in &metrics.recommendation_counts {
        if entry.count >= USER_REQUEST_MIN_COUNT {
            out.push(Enhancement::new(
                Priority::Medium,
                "User Request",
                format!("{} users suggested: {}", entry.count, entry.text),
                entry.text.clone(),
                "User-driven feature request",
                Impact::Medium,
            ));
        }
    }

    out
}
