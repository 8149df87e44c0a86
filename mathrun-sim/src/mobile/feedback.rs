use rand::Rng;
use serde::{Deserialize, Serialize};

use super::issues::{IssueKind, MobileIssue};
use crate::action::ActionLog;
use crate::constants::{
    RATING_MAX, RATING_MIN, USABILITY_START, USABILITY_SUCCESS_BONUS, USABILITY_TOUCH_OFFSET,
    USABILITY_TOUCH_WEIGHT,
};
use crate::feedback::{Feedback, base_feedback, clamp_rating};
use crate::numbers::count_to_f64;
use crate::profile::{Device, MobileProfile};

/// Mobile-specific experience ratings, each on the 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobileRatings {
    pub overall: f64,
    pub touch_controls: f64,
    pub screen_layout: f64,
    pub performance: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct IssueCounts {
    touch: usize,
    layout: usize,
    performance: usize,
}

impl IssueCounts {
    fn of(issues: &[MobileIssue]) -> Self {
        issues.iter().fold(Self::default(), |mut counts, issue| {
            if issue.kind == IssueKind::TouchMiss {
                counts.touch += 1;
            }
            if issue.kind.affects_layout() {
                counts.layout += 1;
            }
            if issue.kind == IssueKind::PerformanceSlowdown {
                counts.performance += 1;
            }
            counts
        })
    }
}

/// Composite 0..=100 usability score for one session.
#[must_use]
pub fn usability_score(issues: &[MobileIssue], successful: bool, touch_accuracy: f64) -> f64 {
    let penalties: f64 = issues.iter().map(|i| i.kind.usability_penalty()).sum();
    let bonus = if successful {
        USABILITY_SUCCESS_BONUS
    } else {
        0.0
    };
    let score = USABILITY_START - penalties + bonus + touch_accuracy * USABILITY_TOUCH_WEIGHT
        - USABILITY_TOUCH_OFFSET;
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

fn deducted(per_issue: f64, count: usize) -> f64 {
    (RATING_MAX - per_issue * count_to_f64(count)).max(RATING_MIN)
}

#[must_use]
pub fn mobile_ratings(usability: f64, issues: &[MobileIssue]) -> MobileRatings {
    let counts = IssueCounts::of(issues);
    MobileRatings {
        overall: clamp_rating(usability / 10.0),
        touch_controls: deducted(2.0, counts.touch),
        screen_layout: deducted(3.0, counts.layout),
        performance: deducted(4.0, counts.performance),
    }
}

/// Feedback a mobile player leaves: shared enjoyment and difficulty, with
/// controls taken from the touch rating and device-aware suggestions.
pub(crate) fn mobile_feedback<R: Rng + ?Sized>(
    profile: &MobileProfile,
    actions: &ActionLog,
    issues: &[MobileIssue],
    successful: bool,
    usability: f64,
    rng: &mut R,
) -> (Feedback, MobileRatings) {
    let ratings = mobile_ratings(usability, issues);
    let counts = IssueCounts::of(issues);
    let mut feedback = base_feedback(actions, successful, rng);
    feedback.controls = ratings.touch_controls;

    if counts.touch > 0 {
        feedback.recommend("Increase button sizes for better touch targets");
    }
    if counts.layout > 0 {
        feedback.recommend("Improve responsive layout for mobile screens");
    }
    if counts.performance > 0 {
        feedback.recommend("Optimize particle effects for mobile performance");
    }
    if profile.screen_size.is_small() && !successful {
        feedback.recommend("Add mobile-specific UI scaling options");
    }
    match profile.device {
        Device::IPhone => feedback.recommend("Test safe area insets for notched devices"),
        Device::Android => feedback.recommend("Test across various Android screen densities"),
        Device::IPad | Device::AndroidTab => {}
    }

    (feedback, ratings)
}
