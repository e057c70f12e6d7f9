use rand::Rng;

use crate::config::{NUM_POINTS, ORBITAL_2PZ_SCALE, SAMPLE_EXTENT};
use crate::error::{CloudError, Result};

/// Visibility flag value for a drawn point
pub const VISIBLE: f32 = 1.0;
/// Visibility flag value for a discarded point
pub const HIDDEN: f32 = 0.0;

/// Parameters for building a sample field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSettings {
    /// Number of sample points (must be > 0)
    pub count: usize,
    /// Edge length of the sampling cube centred on the origin (must be > 0)
    pub extent: f32,
    /// Normalization constant `c` of the 2pz amplitude
    pub orbital_2pz_scale: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            count: NUM_POINTS,
            extent: SAMPLE_EXTENT,
            orbital_2pz_scale: ORBITAL_2PZ_SCALE,
        }
    }
}

impl FieldSettings {
    /// Settings with the given size and the default 2pz normalization
    pub fn new(count: usize, extent: f32) -> Self {
        Self {
            count,
            extent,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(CloudError::InvalidConfiguration(
                "point count must be greater than zero".into(),
            ));
        }
        if self.extent <= 0.0 || !self.extent.is_finite() {
            return Err(CloudError::InvalidConfiguration(format!(
                "extent must be a positive finite number, got {}",
                self.extent
            )));
        }
        if !self.orbital_2pz_scale.is_finite() {
            return Err(CloudError::InvalidConfiguration(format!(
                "2pz scale must be finite, got {}",
                self.orbital_2pz_scale
            )));
        }
        Ok(())
    }
}

/// Euclidean distance from the origin.
/// Finite for every finite position, without squaring overflow.
pub fn radial_distance(position: [f32; 3]) -> f32 {
    let [x, y, z] = position;
    x.hypot(y).hypot(z)
}

/// Angle between the position and the +Y axis.
/// At the origin this is atan2(0, 0) = 0.
pub fn polar_angle(position: [f32; 3]) -> f32 {
    let [x, y, z] = position;
    x.hypot(z).atan2(y)
}

/// 1s basis amplitude: e^(-r)
pub fn amplitude_1s(r: f32) -> f32 {
    (-r).exp()
}

/// 2pz basis amplitude: c * r * e^(-r/2) * cos(theta)
/// The limit at infinite r is 0.
pub fn amplitude_2pz(r: f32, theta: f32, scale: f32) -> f32 {
    if r.is_infinite() {
        return 0.0;
    }
    scale * r * (-r / 2.0).exp() * theta.cos()
}

/// Fixed population of sample points, stored as parallel arrays.
///
/// Index `i` in every array refers to the same point. Everything except the
/// visibility flags is written once at construction; the visibility flags are
/// owned by the evolution engine and rewritten every step.
#[derive(Clone, Debug)]
pub struct SampleField {
    positions: Vec<[f32; 3]>,
    radial_distances: Vec<f32>,
    polar_angles: Vec<f32>,
    amplitudes_1s: Vec<f32>,
    amplitudes_2pz: Vec<f32>,
    /// 1.0 = visible, 0.0 = hidden (float so it uploads straight to the GPU)
    visibility: Vec<f32>,
}

impl SampleField {
    /// Draw a new population uniformly from the cube [-extent/2, extent/2)^3
    pub fn generate<R: Rng + ?Sized>(settings: &FieldSettings, rng: &mut R) -> Result<Self> {
        settings.validate()?;

        let half = settings.extent / 2.0;
        let mut field = Self::with_capacity(settings.count);

        for _ in 0..settings.count {
            let position = [
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ];

            // Overwritten by the first evolution step
            let visible = if rng.gen_bool(0.5) { VISIBLE } else { HIDDEN };

            field.push(position, settings.orbital_2pz_scale, visible);
        }

        Ok(field)
    }

    /// Build a field from explicit positions, all initially hidden
    pub fn from_positions(positions: &[[f32; 3]], orbital_2pz_scale: f32) -> Result<Self> {
        if positions.is_empty() {
            return Err(CloudError::InvalidConfiguration(
                "a sample field needs at least one position".into(),
            ));
        }
        if !orbital_2pz_scale.is_finite() {
            return Err(CloudError::InvalidConfiguration(format!(
                "2pz scale must be finite, got {orbital_2pz_scale}"
            )));
        }
        if let Some(position) = positions.iter().find(|p| p.iter().any(|c| !c.is_finite())) {
            return Err(CloudError::InvalidConfiguration(format!(
                "positions must be finite, got {position:?}"
            )));
        }

        let mut field = Self::with_capacity(positions.len());
        for &position in positions {
            field.push(position, orbital_2pz_scale, HIDDEN);
        }
        Ok(field)
    }

    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            radial_distances: Vec::with_capacity(count),
            polar_angles: Vec::with_capacity(count),
            amplitudes_1s: Vec::with_capacity(count),
            amplitudes_2pz: Vec::with_capacity(count),
            visibility: Vec::with_capacity(count),
        }
    }

    fn push(&mut self, position: [f32; 3], orbital_2pz_scale: f32, visible: f32) {
        let r = radial_distance(position);
        let theta = polar_angle(position);

        self.positions.push(position);
        self.radial_distances.push(r);
        self.polar_angles.push(theta);
        self.amplitudes_1s.push(amplitude_1s(r));
        self.amplitudes_2pz.push(amplitude_2pz(r, theta, orbital_2pz_scale));
        self.visibility.push(visible);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn radial_distances(&self) -> &[f32] {
        &self.radial_distances
    }

    pub fn polar_angles(&self) -> &[f32] {
        &self.polar_angles
    }

    pub fn amplitudes_1s(&self) -> &[f32] {
        &self.amplitudes_1s
    }

    pub fn amplitudes_2pz(&self) -> &[f32] {
        &self.amplitudes_2pz
    }

    /// Per-point visibility flags, one f32 per point
    pub fn visibility(&self) -> &[f32] {
        &self.visibility
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visibility[index] > 0.5
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|&&v| v > 0.5).count()
    }

    /// Split borrow for the evolution loop: (1s amplitudes, 2pz amplitudes, visibility)
    pub(crate) fn evolution_view(&mut self) -> (&[f32], &[f32], &mut [f32]) {
        (&self.amplitudes_1s, &self.amplitudes_2pz, &mut self.visibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_field_creation() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = SampleField::generate(&FieldSettings::new(1000, 20.0), &mut rng).unwrap();
        assert_eq!(field.len(), 1000);
        assert_eq!(field.radial_distances().len(), 1000);
        assert_eq!(field.polar_angles().len(), 1000);
        assert_eq!(field.amplitudes_1s().len(), 1000);
        assert_eq!(field.amplitudes_2pz().len(), 1000);
        assert_eq!(field.visibility().len(), 1000);
    }

    #[test]
    fn test_positions_within_extent() {
        let mut rng = StdRng::seed_from_u64(11);
        let field = SampleField::generate(&FieldSettings::new(5000, 4.0), &mut rng).unwrap();
        for p in field.positions() {
            for &c in p {
                assert!((-2.0..2.0).contains(&c), "coordinate {c} outside [-2, 2)");
            }
        }
    }

    #[test]
    fn test_initial_visibility_is_a_flag() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = SampleField::generate(&FieldSettings::new(2000, 20.0), &mut rng).unwrap();
        assert!(field.visibility().iter().all(|&v| v == VISIBLE || v == HIDDEN));
        // Roughly half start visible
        let visible = field.visible_count();
        assert!(visible > 800 && visible < 1200, "got {visible} visible of 2000");
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = SampleField::generate(&FieldSettings::new(0, 20.0), &mut rng).unwrap_err();
        assert!(matches!(err, CloudError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bad_extent_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for extent in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = SampleField::generate(&FieldSettings::new(10, extent), &mut rng).unwrap_err();
            assert!(
                matches!(err, CloudError::InvalidConfiguration(_)),
                "extent {extent} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_positions_rejected() {
        let err = SampleField::from_positions(&[], ORBITAL_2PZ_SCALE).unwrap_err();
        assert!(matches!(err, CloudError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_origin_is_well_defined() {
        let field = SampleField::from_positions(&[[0.0, 0.0, 0.0]], ORBITAL_2PZ_SCALE).unwrap();
        assert_eq!(field.radial_distances()[0], 0.0);
        assert_eq!(field.polar_angles()[0], 0.0);
        assert_eq!(field.amplitudes_1s()[0], 1.0);
        assert_eq!(field.amplitudes_2pz()[0], 0.0);
        assert!(!field.amplitudes_2pz()[0].is_nan());
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let positions = [
            [1.0e20, 0.0, 0.0],
            [0.0, 3.0e19, -3.0e19],
            [f32::MAX, f32::MAX, 0.0],
        ];
        let field = SampleField::from_positions(&positions, ORBITAL_2PZ_SCALE).unwrap();

        assert_relative_eq!(field.radial_distances()[0], 1.0e20);
        assert_relative_eq!(field.polar_angles()[0], std::f32::consts::FRAC_PI_2);
        assert_eq!(field.amplitudes_1s()[0], 0.0);
        assert_eq!(field.amplitudes_2pz()[0], 0.0);

        assert!(field.radial_distances()[1].is_finite());
        assert_eq!(field.amplitudes_2pz()[1], 0.0);

        // The norm itself overflows here; the amplitudes still settle at 0
        assert_eq!(field.radial_distances()[2], f32::INFINITY);
        assert_eq!(field.amplitudes_1s()[2], 0.0);
        assert_eq!(field.amplitudes_2pz()[2], 0.0);
    }

    #[test]
    fn test_huge_extent_has_no_nan() {
        for (seed, extent) in [(5, 1.0e20), (6, f32::MAX)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = SampleField::generate(&FieldSettings::new(1000, extent), &mut rng).unwrap();
            for i in 0..field.len() {
                let r = field.radial_distances()[i];
                assert!(r >= 0.0, "extent {extent}: r = {r} at {i}");
                assert!(!field.polar_angles()[i].is_nan(), "extent {extent}: theta NaN at {i}");
                assert!(!field.amplitudes_1s()[i].is_nan(), "extent {extent}: 1s NaN at {i}");
                assert!(!field.amplitudes_2pz()[i].is_nan(), "extent {extent}: 2pz NaN at {i}");
            }
        }
    }

    #[test]
    fn test_non_finite_positions_rejected() {
        for bad in [[f32::NAN, 0.0, 0.0], [0.0, f32::INFINITY, 0.0]] {
            let err = SampleField::from_positions(&[[1.0, 1.0, 1.0], bad], 0.6).unwrap_err();
            assert!(matches!(err, CloudError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_derived_attributes_are_deterministic() {
        let positions = [[1.5, -2.0, 0.25], [-3.0, 4.0, 7.5], [0.0, -1.0, 0.0]];
        let a = SampleField::from_positions(&positions, ORBITAL_2PZ_SCALE).unwrap();
        let b = SampleField::from_positions(&positions, ORBITAL_2PZ_SCALE).unwrap();
        assert_eq!(a.radial_distances(), b.radial_distances());
        assert_eq!(a.polar_angles(), b.polar_angles());
        assert_eq!(a.amplitudes_1s(), b.amplitudes_1s());
        assert_eq!(a.amplitudes_2pz(), b.amplitudes_2pz());
    }

    #[test]
    fn test_amplitudes_on_axes() {
        // On +Y the 2pz lobe is at full strength, on the XZ plane it vanishes
        let field =
            SampleField::from_positions(&[[0.0, 2.0, 0.0], [2.0, 0.0, 0.0], [0.0, -2.0, 0.0]], 0.6)
                .unwrap();

        assert_relative_eq!(field.polar_angles()[0], 0.0);
        assert_relative_eq!(field.amplitudes_1s()[0], (-2.0f32).exp());
        assert_relative_eq!(field.amplitudes_2pz()[0], 0.6 * 2.0 * (-1.0f32).exp());

        assert_relative_eq!(field.polar_angles()[1], std::f32::consts::FRAC_PI_2);
        assert!(field.amplitudes_2pz()[1].abs() < 1e-6);

        // Opposite lobe flips sign
        assert_relative_eq!(field.amplitudes_2pz()[2], -field.amplitudes_2pz()[0]);
    }

    #[test]
    fn test_2pz_scale_override() {
        let p = [[1.0, 1.0, 1.0]];
        let base = SampleField::from_positions(&p, 0.6).unwrap();
        let doubled = SampleField::from_positions(&p, 1.2).unwrap();
        assert_relative_eq!(doubled.amplitudes_2pz()[0], 2.0 * base.amplitudes_2pz()[0]);
        assert_eq!(doubled.amplitudes_1s()[0], base.amplitudes_1s()[0]);
    }
}
