//! Mobile-specific problems observed during a session.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enhancement::Priority;
use crate::rng::chance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TouchMiss,
    KeyboardObstruction,
    CanvasSizingIssue,
    PauseMenuDifficulty,
    RotationLayoutIssue,
    PerformanceSlowdown,
    Notification,
    PhoneCall,
    AppBackground,
    LowBatteryWarning,
    NetworkIssue,
}

impl IssueKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TouchMiss => "touch_miss",
            Self::KeyboardObstruction => "keyboard_obstruction",
            Self::CanvasSizingIssue => "canvas_sizing_issue",
            Self::PauseMenuDifficulty => "pause_menu_difficulty",
            Self::RotationLayoutIssue => "rotation_layout_issue",
            Self::PerformanceSlowdown => "performance_slowdown",
            Self::Notification => "notification",
            Self::PhoneCall => "phone_call",
            Self::AppBackground => "app_background",
            Self::LowBatteryWarning => "low_battery_warning",
            Self::NetworkIssue => "network_issue",
        }
    }

    /// Usability points deducted per occurrence.
    #[must_use]
    pub const fn usability_penalty(self) -> f64 {
        match self {
            Self::TouchMiss => 2.0,
            Self::KeyboardObstruction | Self::PerformanceSlowdown => 5.0,
            Self::PauseMenuDifficulty => 8.0,
            Self::CanvasSizingIssue => 10.0,
            Self::RotationLayoutIssue => 7.0,
            _ => 3.0,
        }
    }

    /// Issues that degrade the screen layout rating.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        matches!(
            self,
            Self::CanvasSizingIssue | Self::KeyboardObstruction | Self::RotationLayoutIssue
        )
    }

    /// Priority, recommendation and implementation used when this issue
    /// recurs across a run.
    #[must_use]
    pub const fn remedy(self) -> (Priority, &'static str, &'static str) {
        match self {
            Self::TouchMiss => (
                Priority::High,
                "Increase button sizes and touch target areas",
                "Minimum 44px touch targets with proper spacing",
            ),
            Self::KeyboardObstruction => (
                Priority::High,
                "Adjust layout when virtual keyboard appears",
                "Detect keyboard open/close, adjust viewport",
            ),
            Self::CanvasSizingIssue => (
                Priority::Critical,
                "Implement proper responsive canvas sizing",
                "CSS viewport units, dynamic canvas scaling",
            ),
            Self::PauseMenuDifficulty => (
                Priority::Medium,
                "Redesign pause menu for mobile",
                "Larger buttons, simplified layout",
            ),
            Self::RotationLayoutIssue => (
                Priority::Medium,
                "Fix orientation change handling",
                "Test and fix layout on orientation changes",
            ),
            Self::PerformanceSlowdown => (
                Priority::High,
                "Optimize for mobile performance",
                "Reduce particle effects, optimize animations",
            ),
            _ => (
                Priority::Low,
                "Address mobile-specific issue",
                "Further investigation needed",
            ),
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueDetail {
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "delay")]
    pub delay_ms: Option<f64>,
}

/// An observed issue. Setup problems found before play starts carry no
/// detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    #[serde(flatten)]
    pub detail: Option<IssueDetail>,
}

impl MobileIssue {
    #[must_use]
    pub const fn bare(kind: IssueKind) -> Self {
        Self { kind, detail: None }
    }

    #[must_use]
    pub fn described(kind: IssueKind, timestamp_ms: f64, description: &str) -> Self {
        Self {
            kind,
            detail: Some(IssueDetail {
                timestamp_ms,
                description: description.to_string(),
                target: None,
                delay_ms: None,
            }),
        }
    }

    /// Extra time this issue cost the player, if it records one.
    #[must_use]
    pub fn delay_ms(&self) -> f64 {
        self.detail
            .as_ref()
            .and_then(|d| d.delay_ms)
            .unwrap_or(0.0)
    }
}

/// Per-session issue counters, summed by the analyzer into a run tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTally {
    pub touch_misses: u32,
    pub keyboard_issues: u32,
    pub pause_menu_failures: u32,
    pub orientation_changes: u32,
    pub performance_issues: u32,
}

impl IssueTally {
    pub fn absorb(&mut self, other: &Self) {
        self.touch_misses += other.touch_misses;
        self.keyboard_issues += other.keyboard_issues;
        self.pause_menu_failures += other.pause_menu_failures;
        self.orientation_changes += other.orientation_changes;
        self.performance_issues += other.performance_issues;
    }
}

struct Interruption {
    kind: IssueKind,
    probability: f64,
    delay_ms: f64,
    description: &'static str,
}

const INTERRUPTIONS: [Interruption; 5] = [
    Interruption {
        kind: IssueKind::Notification,
        probability: 0.3,
        delay_ms: 1_500.0,
        description: "Push notification caused brief distraction",
    },
    Interruption {
        kind: IssueKind::PhoneCall,
        probability: 0.1,
        delay_ms: 5_000.0,
        description: "Incoming call interrupted game session",
    },
    Interruption {
        kind: IssueKind::AppBackground,
        probability: 0.2,
        delay_ms: 8_000.0,
        description: "User switched to another app",
    },
    Interruption {
        kind: IssueKind::LowBatteryWarning,
        probability: 0.15,
        delay_ms: 1_000.0,
        description: "Low battery popup appeared",
    },
    Interruption {
        kind: IssueKind::NetworkIssue,
        probability: 0.25,
        delay_ms: 3_000.0,
        description: "Brief connectivity problem",
    },
];

/// Walk the interruption table; the first kind whose own draw succeeds wins.
pub(crate) fn draw_interruption<R: Rng + ?Sized>(
    timestamp_ms: f64,
    rng: &mut R,
) -> Option<MobileIssue> {
    INTERRUPTIONS
        .iter()
        .find(|entry| chance(rng, entry.probability))
        .map(|entry| MobileIssue {
            kind: entry.kind,
            detail: Some(IssueDetail {
                timestamp_ms,
                description: entry.description.to_string(),
                target: None,
                delay_ms: Some(entry.delay_ms),
            }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn lucky_draw_picks_the_first_interruption() {
        let mut rng = StepRng::new(0, 0);
        let issue = draw_interruption(4_200.0, &mut rng).unwrap();
        assert_eq!(issue.kind, IssueKind::Notification);
        assert!((issue.delay_ms() - 1_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unlucky_draw_yields_nothing() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(draw_interruption(0.0, &mut rng).is_none());
    }

    #[test]
    fn bare_issues_serialize_without_detail() {
        let json = serde_json::to_value(MobileIssue::bare(IssueKind::CanvasSizingIssue)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "canvas_sizing_issue" }));
    }

    #[test]
    fn described_issues_flatten_their_detail() {
        let issue = MobileIssue::described(
            IssueKind::KeyboardObstruction,
            1_000.0,
            "Virtual keyboard blocks game view",
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "keyboard_obstruction");
        assert_eq!(json["timestamp"], 1_000.0);
        assert_eq!(json["description"], "Virtual keyboard blocks game view");
        assert!(json.get("delay").is_none());
    }

    #[test]
    fn unknown_kinds_fall_back_to_low_priority() {
        assert_eq!(IssueKind::PhoneCall.remedy().0, Priority::Low);
        assert_eq!(IssueKind::CanvasSizingIssue.remedy().0, Priority::Critical);
        assert!((IssueKind::NetworkIssue.usability_penalty() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tallies_add_up() {
        let mut total = IssueTally::default();
        let session = IssueTally {
            touch_misses: 2,
            keyboard_issues: 1,
            pause_menu_failures: 0,
            orientation_changes: 3,
            performance_issues: 1,
        };
        total.absorb(&session);
        total.absorb(&session);
        assert_eq!(total.touch_misses, 4);
        assert_eq!(total.orientation_changes, 6);
    }
}
