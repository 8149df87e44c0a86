use mathrun_sim::{
    ActionKind, ActionLog, DesktopSimulator, MobileSimulator, Simulator, desktop_profiles,
    mobile_profiles,
    desktop::{REC_PAUSE_MENU, REC_SPEED_ADJUSTMENT},
};
use rand::SeedableRng;
use rand::rngs::mock::StepRng;
use rand_chacha::ChaCha20Rng;

const SEEDS: std::ops::Range<u64> = 0..40;

fn assert_chronological(actions: &ActionLog) {
    let stamps: Vec<f64> = actions.iter().map(|a| a.timestamp_ms).collect();
    assert!(
        stamps.windows(2).all(|w| w[0] <= w[1]),
        "timestamps went backwards: {stamps:?}"
    );
}

fn assert_rating(value: f64, label: &str) {
    assert!((1.0..=10.0).contains(&value), "{label} out of range: {value}");
}

#[test]
fn desktop_sessions_hold_their_invariants() {
    let sim = DesktopSimulator;
    for seed in SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for profile in &desktop_profiles() {
            let session = sim.simulate(profile, 1, &mut rng);
            assert_chronological(&session.actions);
            assert!(session.time_active_ms > 0.0);
            assert_rating(session.feedback.enjoyment, "enjoyment");
            assert_rating(session.feedback.difficulty, "difficulty");
            assert_rating(session.feedback.controls, "controls");
            assert!(session.pauses_used >= session.speed_changes);
            if session.rage_quit() {
                assert!(session.score < 50, "quit above the score ceiling");
            }

            let logged_score = session.actions.iter().rev().find_map(|a| match a.kind {
                ActionKind::CorrectAnswer { score, .. } => Some(score),
                _ => None,
            });
            assert_eq!(logged_score.unwrap_or(0), session.score);
        }
    }
}

#[test]
fn control_suggestions_only_follow_used_controls() {
    let sim = DesktopSimulator;
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
    let mut untouched = 0;
    for profile in &desktop_profiles() {
        for id in 1..=20 {
            let session = sim.simulate(profile, id, &mut rng);
            let recs = &session.feedback.recommendations;
            assert_eq!(
                recs.iter().any(|r| r == REC_PAUSE_MENU),
                session.pauses_used > 0,
                "pause suggestion mismatch in session {id} ({profile:?})"
            );
            assert_eq!(
                recs.iter().any(|r| r == REC_SPEED_ADJUSTMENT),
                session.speed_changes > 0,
                "speed suggestion mismatch in session {id} ({profile:?})"
            );
            if session.speed_changes == 0 {
                untouched += 1;
            }
        }
    }
    assert!(untouched > 0, "some sessions should keep their starting speed");
}

#[test]
fn mobile_sessions_hold_their_invariants() {
    let sim = MobileSimulator;
    for seed in SEEDS {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for profile in &mobile_profiles() {
            let session = sim.simulate(profile, 1, &mut rng);
            assert_chronological(&session.actions);
            assert!((0.0..=100.0).contains(&session.usability_score));
            assert!((0.0..=1.0).contains(&session.touch_accuracy));
            assert!(session.frustration_level >= 0.0);
            assert_rating(session.feedback.enjoyment, "enjoyment");
            assert_rating(session.feedback.difficulty, "difficulty");
            assert_rating(session.ratings.overall, "overall");
            assert_rating(session.ratings.touch_controls, "touch");
            assert_rating(session.ratings.screen_layout, "layout");
            assert_rating(session.ratings.performance, "performance");
            if session.successful {
                assert!(session.score >= 200);
                assert!(session.frustration_level < 8.0);
            }
            assert!(session.tally.touch_misses <= session.touch_interactions);
        }
    }
}

#[test]
fn always_successful_source_terminates_both_variants() {
    let mut rng = StepRng::new(0, 0);
    for profile in &desktop_profiles() {
        let session = DesktopSimulator.simulate(profile, 1, &mut rng);
        assert!(session.score >= 500 || session.time_active_ms >= 180_000.0);
    }
    for profile in &mobile_profiles() {
        let session = MobileSimulator.simulate(profile, 1, &mut rng);
        assert!(
            session.score >= 400
                || session.time_active_ms >= 120_000.0
                || session.frustration_level >= 10.0
        );
    }
}

#[test]
fn sessions_serialize_with_flat_actions() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let session = DesktopSimulator.simulate(&desktop_profiles()[1], 4, &mut rng);
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["id"], 4);
    assert_eq!(json["user_type"], "casual");
    assert_eq!(json["actions"][0]["type"], "game_start");
    assert_eq!(json["actions"][0]["speed"], "normal");
    assert_eq!(json["actions"][0]["timestamp"], 0.0);
}
