//! How a desktop player reacts to a streak of wrong answers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FRUSTRATION_PAUSE_CHANCE, QUIT_PATIENCE_RELIEF, QUIT_PER_FAILURE, QUIT_PROBABILITY_CAP,
    QUIT_SCORE_CEILING, SPEED_DOWN_FAILURES, SPEED_UP_CHANCE, SPEED_UP_MAX_FAILURES,
    SPEED_UP_MIN_PATIENCE,
};
use crate::profile::{DesktopProfile, SpeedPref};
use crate::rng::chance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrustrationResponse {
    Continue,
    Pause,
    Quit,
}

/// Probability that a player rage-quits after `consecutive_failures`.
///
/// Bounded to `[0, 0.8]`; patient players push it below zero, which clamps to
/// never quitting.
#[must_use]
pub fn quit_probability(profile: &DesktopProfile, consecutive_failures: u32) -> f64 {
    let raw = f64::from(consecutive_failures) * QUIT_PER_FAILURE
        - f64::from(profile.patience) * QUIT_PATIENCE_RELIEF;
    raw.clamp(0.0, QUIT_PROBABILITY_CAP)
}

/// Decide whether the player keeps going, pauses, or quits.
///
/// Quitting is only considered while the score is still low; established
/// runs never rage-quit.
pub fn handle_frustration<R: Rng + ?Sized>(
    profile: &DesktopProfile,
    consecutive_failures: u32,
    current_score: u32,
    rng: &mut R,
) -> FrustrationResponse {
    if current_score < QUIT_SCORE_CEILING
        && chance(rng, quit_probability(profile, consecutive_failures))
    {
        FrustrationResponse::Quit
    } else if chance(rng, FRUSTRATION_PAUSE_CHANCE) {
        FrustrationResponse::Pause
    } else {
        FrustrationResponse::Continue
    }
}

/// Speed the player picks from the pause menu.
pub fn suggest_speed_change<R: Rng + ?Sized>(
    profile: &DesktopProfile,
    current: SpeedPref,
    consecutive_failures: u32,
    rng: &mut R,
) -> SpeedPref {
    if consecutive_failures >= SPEED_DOWN_FAILURES
        && let Some(slower) = current.slower()
    {
        return slower;
    }

    if consecutive_failures < SPEED_UP_MAX_FAILURES
        && profile.patience > SPEED_UP_MIN_PATIENCE
        && let Some(faster) = current.faster()
    {
        return if chance(rng, SPEED_UP_CHANCE) {
            faster
        } else {
            current
        };
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{DesktopArchetype, desktop_profiles};
    use rand::rngs::mock::StepRng;

    fn profile(kind: DesktopArchetype) -> DesktopProfile {
        desktop_profiles()
            .into_iter()
            .find(|p| p.kind == kind)
            .unwrap()
    }

    #[test]
    fn quit_probability_is_capped_and_floored() {
        let beginner = profile(DesktopArchetype::Beginner);
        assert!((quit_probability(&beginner, 3) - 0.5).abs() < 1e-9);
        assert!((quit_probability(&beginner, 20) - 0.8).abs() < 1e-9);
        let expert = profile(DesktopArchetype::Expert);
        assert!((quit_probability(&expert, 1) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn low_scores_can_quit() {
        let mut rng = StepRng::new(0, 0);
        let beginner = profile(DesktopArchetype::Beginner);
        assert_eq!(
            handle_frustration(&beginner, 3, 10, &mut rng),
            FrustrationResponse::Quit
        );
    }

    #[test]
    fn established_scores_never_quit() {
        let mut rng = StepRng::new(0, 0);
        let beginner = profile(DesktopArchetype::Beginner);
        assert_eq!(
            handle_frustration(&beginner, 10, 50, &mut rng),
            FrustrationResponse::Pause
        );
    }

    #[test]
    fn unlucky_draws_continue() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let beginner = profile(DesktopArchetype::Beginner);
        assert_eq!(
            handle_frustration(&beginner, 3, 0, &mut rng),
            FrustrationResponse::Continue
        );
    }

    #[test]
    fn struggling_players_step_down_the_ladder() {
        let mut rng = StepRng::new(0, 0);
        let gamer = profile(DesktopArchetype::Gamer);
        assert_eq!(
            suggest_speed_change(&gamer, SpeedPref::Fast, 4, &mut rng),
            SpeedPref::Normal
        );
        assert_eq!(
            suggest_speed_change(&gamer, SpeedPref::Slow, 6, &mut rng),
            SpeedPref::Slow
        );
        assert_eq!(
            suggest_speed_change(&gamer, SpeedPref::Fast, 3, &mut rng),
            SpeedPref::Fast
        );
    }

    #[test]
    fn patient_players_may_speed_up() {
        let gamer = profile(DesktopArchetype::Gamer);
        let mut lucky = StepRng::new(0, 0);
        assert_eq!(
            suggest_speed_change(&gamer, SpeedPref::Normal, 1, &mut lucky),
            SpeedPref::Fast
        );
        let mut unlucky = StepRng::new(u64::MAX, 0);
        assert_eq!(
            suggest_speed_change(&gamer, SpeedPref::Normal, 1, &mut unlucky),
            SpeedPref::Normal
        );
        let beginner = profile(DesktopArchetype::Beginner);
        assert_eq!(
            suggest_speed_change(&beginner, SpeedPref::Normal, 1, &mut lucky),
            SpeedPref::Normal
        );
    }
}
