//! Subjective rating bundle attached to every finished session.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::action::ActionLog;
use crate::constants::{
    EASY_SUCCESS_RATE, ENJOYMENT_BASE, ENJOYMENT_COMPLETION_BONUS, ENJOYMENT_SUCCESS_WEIGHT,
    HARD_SUCCESS_RATE, RATING_MAX, RATING_MIN,
};
use crate::numbers::ratio;
use crate::rng::roll;

/// Free-text suggestions in generation order; duplicates are kept.
pub type Recommendations = SmallVec<[String; 4]>;

pub(crate) const REC_MORE_CHALLENGE: &str = "Add more challenging problems";
pub(crate) const REC_BETTER_PROGRESSION: &str = "Need better difficulty progression";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub enjoyment: f64,
    pub difficulty: f64,
    pub controls: f64,
    pub recommendations: Recommendations,
}

impl Feedback {
    pub(crate) fn recommend(&mut self, text: &str) {
        self.recommendations.push(text.to_string());
    }
}

/// Clamp a rating into the 1..=10 scale.
#[must_use]
pub fn clamp_rating(value: f64) -> f64 {
    if value.is_nan() {
        RATING_MIN
    } else {
        value.clamp(RATING_MIN, RATING_MAX)
    }
}

/// Share of answered problems that were correct.
#[must_use]
pub fn success_rate(actions: &ActionLog) -> f64 {
    let (correct, wrong) = actions.answer_counts();
    ratio(correct, correct + wrong)
}

/// Enjoyment and perceived difficulty, shared by both simulators.
///
/// `finished` is the variant's own success flag (desktop `completed`, mobile
/// `successful`).
pub(crate) fn base_feedback<R: Rng + ?Sized>(
    actions: &ActionLog,
    finished: bool,
    rng: &mut R,
) -> Feedback {
    let rate = success_rate(actions);
    let bonus = if finished {
        ENJOYMENT_COMPLETION_BONUS
    } else {
        -ENJOYMENT_COMPLETION_BONUS
    };
    let noise = roll(rng) * 2.0 - 1.0;
    let enjoyment = clamp_rating(ENJOYMENT_BASE + rate * ENJOYMENT_SUCCESS_WEIGHT + bonus + noise);

    let mut feedback = Feedback {
        enjoyment,
        difficulty: 0.0,
        controls: 0.0,
        recommendations: Recommendations::new(),
    };

    feedback.difficulty = if rate > EASY_SUCCESS_RATE {
        feedback.recommend(REC_MORE_CHALLENGE);
        2.0 + roll(rng) * 2.0
    } else if rate < HARD_SUCCESS_RATE {
        feedback.recommend(REC_BETTER_PROGRESSION);
        8.0 + roll(rng) * 2.0
    } else {
        4.0 + roll(rng) * 3.0
    };
    feedback
}
