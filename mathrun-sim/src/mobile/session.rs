use rand::Rng;
use serde::{Deserialize, Serialize};

use super::feedback::{MobileRatings, mobile_feedback, usability_score};
use super::issues::{IssueDetail, IssueKind, IssueTally, MobileIssue, draw_interruption};
use crate::action::{ActionKind, ActionLog};
use crate::constants::{
    APP_BACKGROUND_ABANDON_CHANCE, CANVAS_SIZING_CHANCE, CANVAS_SIZING_MS,
    CORRECT_FRUSTRATION_RELIEF, INTERRUPTION_CHANCE, KEYBOARD_ADJUST_MS,
    KEYBOARD_OBSTRUCTION_CHANCE, LARGER_SCREEN_UI_FACTOR, MOBILE_BASE_POINTS,
    MOBILE_FRUSTRATION_LIMIT, MOBILE_MAX_PROBLEM_LEVEL, MOBILE_MAX_SCORE, MOBILE_MAX_TIME_MS,
    MOBILE_PROBLEM_LEVEL_STEP, MOBILE_REACTION_BASE_MS, MOBILE_REACTION_JITTER_MS,
    MOBILE_REACTION_LARGER_MS, MOBILE_REACTION_SMALL_MS, MOBILE_REACTION_TOUCH_MS,
    MOBILE_SUCCESS_FRUSTRATION, MOBILE_SUCCESS_SCORE, ORIENTATION_FLIP_CHANCE,
    ORIENTATION_FLIP_MS, PAUSE_PROBE_CHANCE, PAUSE_PROBE_MIN_SCORE, PAUSE_PROBE_MS,
    ROTATION_LAYOUT_CHANCE, SLOWDOWN_AFTER_MS, SLOWDOWN_CHANCE, SLOWDOWN_MS,
    SMALL_SCREEN_BUTTON_FACTOR, SMALL_SCREEN_UI_FACTOR, TOUCH_MISS_ACCURACY_FACTOR,
    TOUCH_MISS_FRUSTRATION, TOUCH_RETRY_MS,
};
use crate::feedback::Feedback;
use crate::numbers::ratio;
use crate::profile::{Device, MobileArchetype, MobileProfile, Orientation, ScreenSize};
use crate::rng::{chance, roll};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitReason {
    AppInterrupted,
}

/// One simulated touch-device play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileSession {
    pub id: u32,
    pub device: Device,
    pub user_type: MobileArchetype,
    /// Orientation at the end of the session.
    pub orientation: Orientation,
    pub screen_size: ScreenSize,
    pub actions: ActionLog,
    pub score: u32,
    pub time_active_ms: f64,
    pub mobile_issues: Vec<MobileIssue>,
    pub touch_interactions: u32,
    /// Share of touch interactions that landed on target.
    pub touch_accuracy: f64,
    pub frustration_level: f64,
    pub successful: bool,
    pub quit_reason: Option<QuitReason>,
    pub usability_score: f64,
    pub feedback: Feedback,
    pub ratings: MobileRatings,
    pub tally: IssueTally,
}

/// Problem tier, stepping up every 100 points.
#[must_use]
pub fn mobile_problem_level(score: u32) -> u32 {
    (1 + score / MOBILE_PROBLEM_LEVEL_STEP).min(MOBILE_MAX_PROBLEM_LEVEL)
}

fn reaction_time_ms<R: Rng + ?Sized>(profile: &MobileProfile, rng: &mut R) -> f64 {
    let device = if profile.screen_size.is_small() {
        MOBILE_REACTION_SMALL_MS
    } else {
        MOBILE_REACTION_LARGER_MS
    };
    MOBILE_REACTION_BASE_MS
        + device
        + (1.0 - profile.touch_accuracy) * MOBILE_REACTION_TOUCH_MS
        + roll(rng) * MOBILE_REACTION_JITTER_MS
}

struct TouchPlay<'a> {
    profile: &'a MobileProfile,
    score: u32,
    time_ms: f64,
    frustration: f64,
    orientation: Orientation,
    touches: u32,
    misses: u32,
    quit_reason: Option<QuitReason>,
    actions: ActionLog,
    issues: Vec<MobileIssue>,
    tally: IssueTally,
}

impl<'a> TouchPlay<'a> {
    fn new(profile: &'a MobileProfile) -> Self {
        let orientation = profile.kind.starting_orientation();
        let mut actions = ActionLog::new();
        actions.push(
            0.0,
            ActionKind::MobileGameStart {
                device: profile.device,
                orientation,
                screen_size: profile.screen_size,
            },
        );
        Self {
            profile,
            score: 0,
            time_ms: 0.0,
            frustration: 0.0,
            orientation,
            touches: 0,
            misses: 0,
            quit_reason: None,
            actions,
            issues: Vec::new(),
            tally: IssueTally::default(),
        }
    }

    fn running(&self) -> bool {
        self.time_ms < MOBILE_MAX_TIME_MS
            && self.score < MOBILE_MAX_SCORE
            && self.frustration < MOBILE_FRUSTRATION_LIMIT
    }

    fn small_screen(&self) -> bool {
        self.profile.screen_size.is_small()
    }

    fn report(&mut self, kind: IssueKind, description: &str) {
        self.issues
            .push(MobileIssue::described(kind, self.time_ms, description));
    }

    fn setup<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if chance(rng, CANVAS_SIZING_CHANCE) {
            self.issues.push(MobileIssue::bare(IssueKind::CanvasSizingIssue));
            self.time_ms += CANVAS_SIZING_MS;
        }
    }

    /// Returns whether the tap landed.
    fn touch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.touches += 1;
        let hit = chance(rng, self.profile.touch_accuracy);
        if !hit {
            self.misses += 1;
            self.tally.touch_misses += 1;
            self.issues.push(MobileIssue {
                kind: IssueKind::TouchMiss,
                detail: Some(IssueDetail {
                    timestamp_ms: self.time_ms,
                    description: "Tap missed the answer input".to_string(),
                    target: Some("answer_input".to_string()),
                    delay_ms: None,
                }),
            });
            self.frustration += TOUCH_MISS_FRUSTRATION;
            self.time_ms += TOUCH_RETRY_MS;
        }
        hit
    }

    fn keyboard<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if chance(rng, KEYBOARD_OBSTRUCTION_CHANCE) && self.small_screen() {
            self.report(
                IssueKind::KeyboardObstruction,
                "Virtual keyboard blocks game view",
            );
            self.tally.keyboard_issues += 1;
            self.time_ms += KEYBOARD_ADJUST_MS;
            self.frustration += 1.0;
        }
    }

    fn answer<R: Rng + ?Sized>(&mut self, hit: bool, rng: &mut R) {
        let level = mobile_problem_level(self.score);
        let ui = if self.small_screen() {
            SMALL_SCREEN_UI_FACTOR
        } else {
            LARGER_SCREEN_UI_FACTOR
        };
        let touch = if hit { 1.0 } else { TOUCH_MISS_ACCURACY_FACTOR };
        let correct = chance(rng, self.profile.skill * ui * touch);

        self.time_ms += reaction_time_ms(self.profile, rng);

        if correct {
            self.score = self.score.saturating_add(MOBILE_BASE_POINTS * level);
            self.frustration = (self.frustration - CORRECT_FRUSTRATION_RELIEF).max(0.0);
            self.actions.push(
                self.time_ms,
                ActionKind::MobileCorrectAnswer {
                    score: self.score,
                    touch_hit: hit,
                },
            );
        } else {
            self.frustration += 1.0;
            self.actions.push(
                self.time_ms,
                ActionKind::MobileWrongAnswer {
                    frustration_level: self.frustration,
                },
            );
        }
    }

    /// Returns `false` when the player backgrounds the app and never returns.
    fn interruption<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !chance(rng, INTERRUPTION_CHANCE) {
            return true;
        }
        let Some(issue) = draw_interruption(self.time_ms, rng) else {
            return true;
        };
        let kind = issue.kind;
        self.time_ms += issue.delay_ms();
        self.issues.push(issue);

        if kind == IssueKind::AppBackground && chance(rng, APP_BACKGROUND_ABANDON_CHANCE) {
            self.quit_reason = Some(QuitReason::AppInterrupted);
            return false;
        }
        true
    }

    fn pause_probe<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !(chance(rng, PAUSE_PROBE_CHANCE) && self.score > PAUSE_PROBE_MIN_SCORE) {
            return;
        }
        let button = if self.small_screen() {
            SMALL_SCREEN_BUTTON_FACTOR
        } else {
            1.0
        };
        if !chance(rng, self.profile.touch_accuracy * button) {
            self.tally.pause_menu_failures += 1;
            self.report(IssueKind::PauseMenuDifficulty, "Small buttons, hard to tap");
            self.frustration += 1.0;
        }
        self.time_ms += PAUSE_PROBE_MS;
    }

    fn rotation<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !chance(rng, ORIENTATION_FLIP_CHANCE) {
            return;
        }
        self.tally.orientation_changes += 1;
        self.orientation = self.orientation.flipped();
        self.actions.push(
            self.time_ms,
            ActionKind::OrientationChange {
                new_orientation: self.orientation,
            },
        );
        self.time_ms += ORIENTATION_FLIP_MS;

        if chance(rng, ROTATION_LAYOUT_CHANCE) {
            self.report(
                IssueKind::RotationLayoutIssue,
                "Game elements overlapped after rotation",
            );
            self.frustration += 1.0;
        }
    }

    fn slowdown<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.time_ms > SLOWDOWN_AFTER_MS && chance(rng, SLOWDOWN_CHANCE) {
            self.report(
                IssueKind::PerformanceSlowdown,
                "Frame rate drops, particles causing lag",
            );
            self.tally.performance_issues += 1;
            self.time_ms += SLOWDOWN_MS;
        }
    }
}

/// Play one mobile session to completion.
///
/// The loop stops on the time, score or frustration ceiling, or when the
/// player abandons the app after backgrounding it.
pub fn simulate_mobile<R: Rng + ?Sized>(
    profile: &MobileProfile,
    session_id: u32,
    rng: &mut R,
) -> MobileSession {
    let mut play = TouchPlay::new(profile);
    play.setup(rng);

    while play.running() {
        let hit = play.touch(rng);
        play.keyboard(rng);
        play.answer(hit, rng);
        if !play.interruption(rng) {
            break;
        }
        play.pause_probe(rng);
        play.rotation(rng);
        play.slowdown(rng);
    }

    let successful =
        play.score >= MOBILE_SUCCESS_SCORE && play.frustration < MOBILE_SUCCESS_FRUSTRATION;
    let hits = play.touches.saturating_sub(play.misses);
    let touch_accuracy = ratio(
        usize::try_from(hits).unwrap_or(0),
        usize::try_from(play.touches).unwrap_or(0),
    );
    let usability = usability_score(&play.issues, successful, touch_accuracy);
    let (feedback, ratings) = mobile_feedback(
        profile,
        &play.actions,
        &play.issues,
        successful,
        usability,
        rng,
    );

    log::debug!(
        "mobile session {session_id} ({} on {}) ended: score {}, usability {usability:.0}, {} issues",
        profile.kind.label(),
        profile.device.label(),
        play.score,
        play.issues.len()
    );

    MobileSession {
        id: session_id,
        device: profile.device,
        user_type: profile.kind,
        orientation: play.orientation,
        screen_size: profile.screen_size,
        actions: play.actions,
        score: play.score,
        time_active_ms: play.time_ms,
        mobile_issues: play.issues,
        touch_interactions: play.touches,
        touch_accuracy,
        frustration_level: play.frustration,
        successful,
        quit_reason: play.quit_reason,
        usability_score: usability,
        feedback,
        ratings,
        tally: play.tally,
    }
}
