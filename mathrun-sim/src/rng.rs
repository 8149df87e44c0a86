//! Draw helpers shared by the simulators.
//!
//! Every probability is clamped to `[0, 1]` before sampling, so expressions
//! that drift outside the unit interval for extreme profiles behave as
//! "never" or "always" instead of depending on sampler internals.

use rand::Rng;

/// Uniform draw in `[0, 1)`.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.r#gen::<f64>()
}

/// Bernoulli draw against a clamped probability.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    roll(rng) < p
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn zero_source_always_hits_positive_probability() {
        let mut rng = StepRng::new(0, 0);
        assert!(chance(&mut rng, 0.01));
        assert!(!chance(&mut rng, 0.0));
        assert!(!chance(&mut rng, -0.5));
    }

    #[test]
    fn saturated_source_only_hits_certainty() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(!chance(&mut rng, 0.99));
        assert!(chance(&mut rng, 1.0));
        assert!(chance(&mut rng, 1.7));
        assert!(!chance(&mut rng, f64::NAN));
    }
}
