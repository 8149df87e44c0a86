use rand::Rng;
use serde::{Deserialize, Serialize};

use super::feedback::desktop_feedback;
use super::frustration::{FrustrationResponse, handle_frustration, suggest_speed_change};
use crate::action::{ActionKind, ActionLog, SpeedChangeReason};
use crate::constants::{
    CURIOUS_PAUSE_BASE_CHANCE, CURIOUS_PAUSE_MS, DESKTOP_BASE_POINTS, DESKTOP_COMPLETION_SCORE,
    DESKTOP_COMPLETION_TIME_MS, DESKTOP_DIFFICULTY_PENALTY, DESKTOP_DIFFICULTY_STEP,
    DESKTOP_MAX_DIFFICULTY, DESKTOP_MAX_SCORE, DESKTOP_MAX_TIME_MS,
    DESKTOP_MILESTONE_DIFFICULTY_STEP, DESKTOP_MILESTONE_SCORE, DESKTOP_PROBLEM_LEVEL_STEP,
    DESKTOP_REACTION_BASE_MS, DESKTOP_REACTION_DIFFICULTY_MS, DESKTOP_REACTION_JITTER_MS,
    DESKTOP_REACTION_SKILL_MS, DESKTOP_START_DIFFICULTY, FRUSTRATION_FAILURE_THRESHOLD,
    FRUSTRATION_PAUSE_MS,
};
use crate::feedback::Feedback;
use crate::numbers::floor_f64_to_u32;
use crate::profile::{DesktopArchetype, DesktopProfile, SpeedPref};
use crate::rng::{chance, roll};

const MAX_PROBLEM_LEVEL: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    FrustrationQuit,
}

/// One simulated desktop play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopSession {
    pub id: u32,
    pub user_type: DesktopArchetype,
    pub actions: ActionLog,
    pub score: u32,
    pub time_active_ms: f64,
    pub pauses_used: u32,
    pub speed_changes: u32,
    pub final_speed: SpeedPref,
    pub completed: bool,
    pub failure_reason: Option<FailureReason>,
    pub feedback: Feedback,
}

impl DesktopSession {
    #[must_use]
    pub const fn rage_quit(&self) -> bool {
        matches!(self.failure_reason, Some(FailureReason::FrustrationQuit))
    }
}

/// Problem tier shown to the player, stepping up every 50 points.
#[must_use]
pub fn problem_level(score: u32) -> u32 {
    (1 + score / DESKTOP_PROBLEM_LEVEL_STEP).min(MAX_PROBLEM_LEVEL)
}

fn reaction_time_ms<R: Rng + ?Sized>(profile: &DesktopProfile, difficulty: f64, rng: &mut R) -> f64 {
    DESKTOP_REACTION_BASE_MS
        + (1.0 - profile.skill) * DESKTOP_REACTION_SKILL_MS
        + difficulty * DESKTOP_REACTION_DIFFICULTY_MS
        + roll(rng) * DESKTOP_REACTION_JITTER_MS
}

struct Gameplay {
    score: u32,
    time_ms: f64,
    speed: SpeedPref,
    difficulty: f64,
    failures: u32,
    pauses_used: u32,
    speed_changes: u32,
    failure_reason: Option<FailureReason>,
    actions: ActionLog,
}

impl Gameplay {
    fn new(speed: SpeedPref) -> Self {
        let mut actions = ActionLog::new();
        actions.push(0.0, ActionKind::GameStart { speed });
        Self {
            score: 0,
            time_ms: 0.0,
            speed,
            difficulty: DESKTOP_START_DIFFICULTY,
            failures: 0,
            pauses_used: 0,
            speed_changes: 0,
            failure_reason: None,
            actions,
        }
    }

    fn running(&self) -> bool {
        self.time_ms < DESKTOP_MAX_TIME_MS && self.score < DESKTOP_MAX_SCORE
    }

    fn answer_correctly(&mut self) {
        let points = floor_f64_to_u32(DESKTOP_BASE_POINTS * self.difficulty * self.speed.multiplier());
        self.score = self.score.saturating_add(points);
        self.failures = 0;
        self.actions.push(
            self.time_ms,
            ActionKind::CorrectAnswer {
                score: self.score,
                difficulty: self.difficulty,
                problem_level: problem_level(self.score),
            },
        );
        self.difficulty = (self.difficulty + DESKTOP_DIFFICULTY_STEP).min(DESKTOP_MAX_DIFFICULTY);
    }

    /// Returns `false` when the player rage-quits.
    fn answer_wrongly<R: Rng + ?Sized>(&mut self, profile: &DesktopProfile, rng: &mut R) -> bool {
        self.failures += 1;
        self.actions.push(
            self.time_ms,
            ActionKind::WrongAnswer {
                consecutive_failures: self.failures,
            },
        );
        if self.failures < FRUSTRATION_FAILURE_THRESHOLD {
            return true;
        }

        match handle_frustration(profile, self.failures, self.score, rng) {
            FrustrationResponse::Continue => true,
            FrustrationResponse::Pause => {
                self.pauses_used += 1;
                self.actions.push(
                    self.time_ms,
                    ActionKind::FrustrationPause {
                        consecutive_failures: self.failures,
                    },
                );
                let next = suggest_speed_change(profile, self.speed, self.failures, rng);
                if next != self.speed {
                    self.speed = next;
                    self.speed_changes += 1;
                    self.actions.push(
                        self.time_ms,
                        ActionKind::SpeedChange {
                            new_speed: next,
                            reason: SpeedChangeReason::Frustration,
                        },
                    );
                }
                self.time_ms += FRUSTRATION_PAUSE_MS;
                true
            }
            FrustrationResponse::Quit => {
                self.failure_reason = Some(FailureReason::FrustrationQuit);
                false
            }
        }
    }

    fn maybe_explore_pause<R: Rng + ?Sized>(&mut self, profile: &DesktopProfile, rng: &mut R) {
        let p = CURIOUS_PAUSE_BASE_CHANCE * f64::from(profile.patience) / 10.0;
        if chance(rng, p) {
            self.pauses_used += 1;
            self.actions.push(
                self.time_ms,
                ActionKind::PauseExplore {
                    current_score: self.score,
                },
            );
            self.time_ms += CURIOUS_PAUSE_MS;
        }
    }

    fn milestone_bump(&mut self) {
        if self.score > 0 && self.score % DESKTOP_MILESTONE_SCORE == 0 {
            self.difficulty =
                (self.difficulty + DESKTOP_MILESTONE_DIFFICULTY_STEP).min(DESKTOP_MAX_DIFFICULTY);
        }
    }
}

/// Play one desktop session to completion.
///
/// Every iteration advances the clock by at least two seconds, so the loop is
/// bounded by the time ceiling even when the player never scores.
pub fn simulate_desktop<R: Rng + ?Sized>(
    profile: &DesktopProfile,
    session_id: u32,
    rng: &mut R,
) -> DesktopSession {
    let mut play = Gameplay::new(profile.speed_pref);

    while play.running() {
        let success = chance(rng, profile.skill - play.difficulty * DESKTOP_DIFFICULTY_PENALTY);
        play.time_ms += reaction_time_ms(profile, play.difficulty, rng);

        if success {
            play.answer_correctly();
        } else if !play.answer_wrongly(profile, rng) {
            break;
        }

        play.maybe_explore_pause(profile, rng);
        play.milestone_bump();
    }

    let completed =
        play.score >= DESKTOP_COMPLETION_SCORE || play.time_ms >= DESKTOP_COMPLETION_TIME_MS;
    let feedback = desktop_feedback(
        profile,
        &play.actions,
        completed,
        play.time_ms,
        play.pauses_used,
        play.speed_changes,
        rng,
    );

    log::debug!(
        "desktop session {session_id} ({}) ended: score {} in {:.1}s, completed {completed}",
        profile.kind.label(),
        play.score,
        play.time_ms / 1000.0
    );

    DesktopSession {
        id: session_id,
        user_type: profile.kind,
        actions: play.actions,
        score: play.score,
        time_active_ms: play.time_ms,
        pauses_used: play.pauses_used,
        speed_changes: play.speed_changes,
        final_speed: play.speed,
        completed,
        failure_reason: play.failure_reason,
        feedback,
    }
}
