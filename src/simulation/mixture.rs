use crate::config::{
    DEFAULT_SPEED, DEFAULT_THRESHOLD, DEFAULT_WEIGHT_1S, DEFAULT_WEIGHT_2PZ, THRESHOLD_SCALE,
};

/// Operator-adjustable inputs to the evolution step.
///
/// Passed by value into every step, so one step always sees a single consistent
/// snapshot. The weights are expected to sum to ~1 but nothing here enforces it,
/// and out-of-range weights are evaluated as given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixtureParameters {
    /// Proportion of the 1s basis state
    pub weight_1s: f32,
    /// Proportion of the 2pz basis state
    pub weight_2pz: f32,
    /// Visibility cutoff in UI units (compared against p * THRESHOLD_SCALE)
    pub threshold: f32,
    /// Multiplier on the phase advance
    pub speed: f32,
}

impl Default for MixtureParameters {
    fn default() -> Self {
        Self {
            weight_1s: DEFAULT_WEIGHT_1S,
            weight_2pz: DEFAULT_WEIGHT_2PZ,
            threshold: DEFAULT_THRESHOLD,
            speed: DEFAULT_SPEED,
        }
    }
}

impl MixtureParameters {
    /// Probability cutoff in the same units as the mixed-state probability
    #[inline]
    pub fn probability_cutoff(&self) -> f32 {
        self.threshold / THRESHOLD_SCALE
    }

    /// Mixed-state probability proxy for one point.
    ///
    /// `w1·a² + w2·b² + w1·w2·a·b·cos(phase)`, with `cos(phase)` hoisted out of
    /// the per-point loop by the caller. The cross term deliberately carries
    /// `w1·w2` rather than `2·sqrt(w1·w2)`.
    #[inline]
    pub fn mixed_probability(&self, a: f32, b: f32, cos_phase: f32) -> f32 {
        self.weight_1s * a * a
            + self.weight_2pz * b * b
            + self.weight_1s * self.weight_2pz * a * b * cos_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = MixtureParameters::default();
        assert_eq!(params.weight_1s + params.weight_2pz, 1.0);
        assert_eq!(params.threshold, 0.5);
        assert_eq!(params.speed, 1.0);
        assert_relative_eq!(params.probability_cutoff(), 0.05);
    }

    #[test]
    fn test_pure_1s_probability() {
        let params = MixtureParameters {
            weight_1s: 1.0,
            weight_2pz: 0.0,
            ..Default::default()
        };
        for cos_phase in [-1.0, 0.0, 0.3, 1.0] {
            assert_eq!(params.mixed_probability(1.0, 0.0, cos_phase), 1.0);
        }
    }

    #[test]
    fn test_interference_term_oscillates() {
        let params = MixtureParameters::default();
        let in_phase = params.mixed_probability(0.5, 0.4, 1.0);
        let out_of_phase = params.mixed_probability(0.5, 0.4, -1.0);
        let quadrature = params.mixed_probability(0.5, 0.4, 0.0);

        // Cross term magnitude is w1*w2*a*b = 0.25 * 0.2
        assert_relative_eq!(in_phase - quadrature, 0.05, epsilon = 1e-6);
        assert_relative_eq!(quadrature - out_of_phase, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_range_weights_not_clamped() {
        let params = MixtureParameters {
            weight_1s: 2.0,
            weight_2pz: -1.0,
            ..Default::default()
        };
        // 2*1 + (-1)*1 + (2)(-1)(1)(1)(1) = -1
        assert_eq!(params.mixed_probability(1.0, 1.0, 1.0), -1.0);
    }
}
