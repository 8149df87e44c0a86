use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::session::DesktopSession;
use crate::action::ActionKind;
use crate::feedback::Feedback;
use crate::numbers::{count_to_f64, mean, ratio};
use crate::profile::SpeedPref;

/// How many sessions left a given free-text suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCount {
    pub text: String,
    pub count: u32,
}

/// Run-wide summary of a desktop batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopMetrics {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub completion_rate: f64,
    pub average_score: f64,
    pub average_play_time_secs: f64,
    pub pause_usage: u32,
    pub speed_changes: u32,
    pub ragequits: usize,
    pub ragequit_rate: f64,
    /// Histogram over the targets of every logged speed change.
    pub speed_preferences: BTreeMap<SpeedPref, u32>,
    /// Final scores of incomplete sessions, ascending.
    pub common_failure_scores: Vec<u32>,
    pub user_feedback: Vec<Feedback>,
    pub average_enjoyment: f64,
    pub average_difficulty: f64,
    pub average_controls: f64,
    /// Suggestion tallies in first-seen order.
    pub recommendation_counts: Vec<RecommendationCount>,
}

impl DesktopMetrics {
    /// Most frequent speed-change target; ties go to the faster speed.
    #[must_use]
    pub fn top_speed(&self) -> Option<SpeedPref> {
        self.speed_preferences
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(speed, _)| *speed)
    }
}

/// Fold a batch of desktop sessions into [`DesktopMetrics`].
#[must_use]
pub fn analyze_desktop(sessions: &[DesktopSession]) -> DesktopMetrics {
    let total = sessions.len();
    let completed = sessions.iter().filter(|s| s.completed).count();
    let ragequits = sessions.iter().filter(|s| s.rage_quit()).count();

    let mut speed_preferences = BTreeMap::new();
    for session in sessions {
        for action in &session.actions {
            if let ActionKind::SpeedChange { new_speed, .. } = action.kind {
                *speed_preferences.entry(new_speed).or_insert(0) += 1;
            }
        }
    }

    let mut common_failure_scores: Vec<u32> = sessions
        .iter()
        .filter(|s| !s.completed)
        .map(|s| s.score)
        .collect();
    common_failure_scores.sort_unstable();

    let mut recommendation_counts: Vec<RecommendationCount> = Vec::new();
    for text in sessions.iter().flat_map(|s| s.feedback.recommendations.iter()) {
        match recommendation_counts.iter_mut().find(|rc| &rc.text == text) {
            Some(entry) => entry.count += 1,
            None => recommendation_counts.push(RecommendationCount {
                text: text.clone(),
                count: 1,
            }),
        }
    }

    DesktopMetrics {
        total_sessions: total,
        completed_sessions: completed,
        completion_rate: ratio(completed, total),
        average_score: mean(sessions.iter().map(|s| f64::from(s.score))),
        average_play_time_secs: mean(sessions.iter().map(|s| s.time_active_ms / 1000.0)),
        pause_usage: sessions.iter().map(|s| s.pauses_used).sum(),
        speed_changes: sessions.iter().map(|s| s.speed_changes).sum(),
        ragequits,
        ragequit_rate: ratio(ragequits, total),
        speed_preferences,
        common_failure_scores,
        user_feedback: sessions.iter().map(|s| s.feedback.clone()).collect(),
        average_enjoyment: mean(sessions.iter().map(|s| s.feedback.enjoyment)),
        average_difficulty: mean(sessions.iter().map(|s| s.feedback.difficulty)),
        average_controls: mean(sessions.iter().map(|s| s.feedback.controls)),
        recommendation_counts,
    }
}

/// Pause usage relative to the session count, for threshold checks.
#[must_use]
pub fn pauses_per_session(metrics: &DesktopMetrics) -> f64 {
    f64::from(metrics.pause_usage) / count_to_f64(metrics.total_sessions.max(1))
}
