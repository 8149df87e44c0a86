use rand::Rng;

use crate::action::ActionLog;
use crate::constants::{CONTROLS_BASE, CONTROLS_FEATURE_NUDGE, CONTROLS_SPREAD, EXPERT_FAST_FINISH_MS};
use crate::feedback::{Feedback, base_feedback, clamp_rating};
use crate::profile::{DesktopArchetype, DesktopProfile};
use crate::rng::roll;

pub const REC_PAUSE_MENU: &str = "Pause menu is helpful";
pub const REC_SPEED_ADJUSTMENT: &str = "Speed adjustment is useful";

/// Ratings and suggestions a desktop player leaves after a session.
pub(crate) fn desktop_feedback<R: Rng + ?Sized>(
    profile: &DesktopProfile,
    actions: &ActionLog,
    completed: bool,
    time_ms: f64,
    pauses_used: u32,
    speed_changes: u32,
    rng: &mut R,
) -> Feedback {
    let mut feedback = base_feedback(actions, completed, rng);

    let nudge = if pauses_used + speed_changes > 0 {
        CONTROLS_FEATURE_NUDGE
    } else {
        0.0
    };
    feedback.controls = clamp_rating(CONTROLS_BASE + roll(rng) * CONTROLS_SPREAD + nudge);

    if pauses_used > 0 {
        feedback.recommend(REC_PAUSE_MENU);
    }
    if speed_changes > 0 {
        feedback.recommend(REC_SPEED_ADJUSTMENT);
    }

    match profile.kind {
        DesktopArchetype::Beginner if !completed => {
            feedback.recommend("Need tutorial mode");
            feedback.recommend("More encouraging feedback");
        }
        DesktopArchetype::Expert if completed && time_ms < EXPERT_FAST_FINISH_MS => {
            feedback.recommend("Need harder challenges");
            feedback.recommend("Add time-based scoring");
        }
        DesktopArchetype::Gamer => {
            feedback.recommend("Add achievements");
            feedback.recommend("Show progress bars");
        }
        _ => {}
    }

    feedback
}
