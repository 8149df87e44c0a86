use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::feedback::MobileRatings;
use super::issues::{IssueKind, IssueTally};
use super::session::MobileSession;
use crate::numbers::{mean, ratio};
use crate::profile::{Device, Orientation};

/// How often one issue kind was logged across the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCount {
    pub kind: IssueKind,
    pub count: u32,
}

/// Run-wide summary of a mobile batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileMetrics {
    pub total_sessions: usize,
    pub successful_sessions: usize,
    pub success_rate: f64,
    pub average_score: f64,
    pub average_usability_score: f64,
    pub total_touch_interactions: u32,
    pub average_touch_accuracy: f64,
    pub device_breakdown: BTreeMap<Device, u32>,
    /// Keyed by each session's final orientation.
    pub orientation_breakdown: BTreeMap<Orientation, u32>,
    /// Occurrences of each issue kind across all sessions, in first-seen order.
    pub common_mobile_issues: Vec<IssueCount>,
    pub mobile_feedback: Vec<MobileRatings>,
    pub average_ratings: MobileRatings,
    pub global_issues: IssueTally,
}

/// Fold a batch of mobile sessions into [`MobileMetrics`].
#[must_use]
pub fn analyze_mobile(sessions: &[MobileSession]) -> MobileMetrics {
    let total = sessions.len();
    let successful = sessions.iter().filter(|s| s.successful).count();

    let mut device_breakdown = BTreeMap::new();
    let mut orientation_breakdown = BTreeMap::new();
    let mut common_mobile_issues: Vec<IssueCount> = Vec::new();
    let mut global_issues = IssueTally::default();
    for session in sessions {
        *device_breakdown.entry(session.device).or_insert(0) += 1;
        *orientation_breakdown.entry(session.orientation).or_insert(0) += 1;
        for issue in &session.mobile_issues {
            match common_mobile_issues.iter_mut().find(|ic| ic.kind == issue.kind) {
                Some(entry) => entry.count += 1,
                None => common_mobile_issues.push(IssueCount {
                    kind: issue.kind,
                    count: 1,
                }),
            }
        }
        global_issues.absorb(&session.tally);
    }

    let ratings = || sessions.iter().map(|s| s.ratings);

    MobileMetrics {
        total_sessions: total,
        successful_sessions: successful,
        success_rate: ratio(successful, total),
        average_score: mean(sessions.iter().map(|s| f64::from(s.score))),
        average_usability_score: mean(sessions.iter().map(|s| s.usability_score)),
        total_touch_interactions: sessions.iter().map(|s| s.touch_interactions).sum(),
        average_touch_accuracy: mean(sessions.iter().map(|s| s.touch_accuracy)),
        device_breakdown,
        orientation_breakdown,
        common_mobile_issues,
        mobile_feedback: ratings().collect(),
        average_ratings: MobileRatings {
            overall: mean(ratings().map(|r| r.overall)),
            touch_controls: mean(ratings().map(|r| r.touch_controls)),
            screen_layout: mean(ratings().map(|r| r.screen_layout)),
            performance: mean(ratings().map(|r| r.performance)),
        },
        global_issues,
    }
}

impl MobileMetrics {
    /// Sessions played on `device`.
    #[must_use]
    pub fn sessions_on(&self, device: Device) -> u32 {
        self.device_breakdown.get(&device).copied().unwrap_or(0)
    }

    /// Occurrences of `kind` across the batch.
    #[must_use]
    pub fn issue_count(&self, kind: IssueKind) -> u32 {
        self.common_mobile_issues
            .iter()
            .find(|ic| ic.kind == kind)
            .map_or(0, |ic| ic.count)
    }
}
