//! Timestamped session events.

use serde::{Deserialize, Serialize};

use crate::profile::{Device, Orientation, ScreenSize, SpeedPref};

/// Why a speed change happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedChangeReason {
    Frustration,
}

/// Event vocabulary shared by the desktop and mobile simulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    GameStart {
        speed: SpeedPref,
    },
    CorrectAnswer {
        score: u32,
        difficulty: f64,
        problem_level: u32,
    },
    WrongAnswer {
        consecutive_failures: u32,
    },
    FrustrationPause {
        consecutive_failures: u32,
    },
    SpeedChange {
        new_speed: SpeedPref,
        reason: SpeedChangeReason,
    },
    PauseExplore {
        current_score: u32,
    },
    MobileGameStart {
        device: Device,
        orientation: Orientation,
        screen_size: ScreenSize,
    },
    MobileCorrectAnswer {
        score: u32,
        touch_hit: bool,
    },
    MobileWrongAnswer {
        frustration_level: f64,
    },
    OrientationChange {
        new_orientation: Orientation,
    },
}

impl ActionKind {
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(
            self,
            Self::CorrectAnswer { .. } | Self::MobileCorrectAnswer { .. }
        )
    }

    #[must_use]
    pub const fn is_wrong(&self) -> bool {
        matches!(self, Self::WrongAnswer { .. } | Self::MobileWrongAnswer { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    #[serde(flatten)]
    pub kind: ActionKind,
}

/// Append-only action log whose timestamps never decrease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog(Vec<Action>);

impl ActionLog {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an event. A timestamp earlier than the last entry is raised to
    /// match it, keeping the log chronological.
    pub fn push(&mut self, timestamp_ms: f64, kind: ActionKind) {
        let floor = self.0.last().map_or(0.0, |a| a.timestamp_ms);
        let timestamp_ms = if timestamp_ms < floor {
            floor
        } else {
            timestamp_ms
        };
        self.0.push(Action { timestamp_ms, kind });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.0.last()
    }

    /// Number of correct and wrong answers recorded.
    #[must_use]
    pub fn answer_counts(&self) -> (usize, usize) {
        self.0.iter().fold((0, 0), |(correct, wrong), a| {
            if a.kind.is_correct() {
                (correct + 1, wrong)
            } else if a.kind.is_wrong() {
                (correct, wrong + 1)
            } else {
                (correct, wrong)
            }
        })
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
