use crate::config::{RESET_SPEED, SPEED_MAX, SPEED_MIN, THRESHOLD_MAX, THRESHOLD_MIN};
use crate::simulation::{MixtureParameters, PhaseMode};

/// Operator-facing state: the live mixture parameters plus display toggles.
///
/// Setters mirror slider behaviour: values are clamped to their control range
/// and the two weights are cross-linked so they always sum to one.
#[derive(Clone, Debug)]
pub struct ControlPanel {
    params: MixtureParameters,
    pub show_axes: bool,
    pub show_grid: bool,
    pub phase_mode: PhaseMode,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            params: MixtureParameters::default(),
            show_axes: true,
            show_grid: true,
            phase_mode: PhaseMode::default(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current parameters for one evolution step
    pub fn snapshot(&self) -> MixtureParameters {
        self.params
    }

    pub fn adjust_threshold(&mut self, delta: f32) -> f32 {
        self.params.threshold = (self.params.threshold + delta).clamp(THRESHOLD_MIN, THRESHOLD_MAX);
        self.params.threshold
    }

    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.params.speed = (self.params.speed + delta).clamp(SPEED_MIN, SPEED_MAX);
        self.params.speed
    }

    /// Set the 1s proportion; the 2pz proportion becomes `1 - value`
    pub fn set_weight_1s(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        self.params.weight_1s = value;
        self.params.weight_2pz = 1.0 - value;
    }

    /// Set the 2pz proportion; the 1s proportion becomes `1 - value`
    pub fn set_weight_2pz(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        self.params.weight_2pz = value;
        self.params.weight_1s = 1.0 - value;
    }

    pub fn toggle_axes(&mut self) -> bool {
        self.show_axes = !self.show_axes;
        self.show_axes
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    pub fn toggle_phase_mode(&mut self) -> PhaseMode {
        self.phase_mode = self.phase_mode.toggled();
        self.phase_mode
    }

    /// Reset action: fast animation, axes hidden, grid shown.
    /// Threshold and weights are left alone.
    pub fn reset(&mut self) {
        self.params.speed = RESET_SPEED;
        self.show_axes = false;
        self.show_grid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONTROL_STEP;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let panel = ControlPanel::new();
        assert_eq!(panel.snapshot(), MixtureParameters::default());
        assert!(panel.show_axes);
        assert!(panel.show_grid);
        assert_eq!(panel.phase_mode, PhaseMode::AbsoluteElapsed);
    }

    #[test]
    fn test_weights_cross_linked() {
        let mut panel = ControlPanel::new();
        panel.set_weight_1s(0.8);
        let params = panel.snapshot();
        assert_relative_eq!(params.weight_1s, 0.8);
        assert_relative_eq!(params.weight_2pz, 0.2, epsilon = 1e-6);

        panel.set_weight_2pz(0.9);
        let params = panel.snapshot();
        assert_relative_eq!(params.weight_2pz, 0.9);
        assert_relative_eq!(params.weight_1s, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_weights_clamped() {
        let mut panel = ControlPanel::new();
        panel.set_weight_1s(1.5);
        assert_eq!(panel.snapshot().weight_1s, 1.0);
        assert_eq!(panel.snapshot().weight_2pz, 0.0);

        panel.set_weight_2pz(-0.5);
        assert_eq!(panel.snapshot().weight_2pz, 0.0);
        assert_eq!(panel.snapshot().weight_1s, 1.0);
    }

    #[test]
    fn test_threshold_range() {
        let mut panel = ControlPanel::new();
        for _ in 0..100 {
            panel.adjust_threshold(CONTROL_STEP);
        }
        assert_eq!(panel.snapshot().threshold, THRESHOLD_MAX);
        for _ in 0..100 {
            panel.adjust_threshold(-CONTROL_STEP);
        }
        assert_eq!(panel.snapshot().threshold, THRESHOLD_MIN);
    }

    #[test]
    fn test_speed_range() {
        let mut panel = ControlPanel::new();
        assert_eq!(panel.adjust_speed(1.0), SPEED_MAX);
        assert_eq!(panel.adjust_speed(-5.0), SPEED_MIN);
    }

    #[test]
    fn test_reset() {
        let mut panel = ControlPanel::new();
        panel.set_weight_1s(0.7);
        panel.toggle_grid();
        panel.reset();

        let params = panel.snapshot();
        assert_eq!(params.speed, RESET_SPEED);
        assert_relative_eq!(params.weight_1s, 0.7);
        assert!(!panel.show_axes);
        assert!(panel.show_grid);
    }

    #[test]
    fn test_toggles() {
        let mut panel = ControlPanel::new();
        assert!(!panel.toggle_axes());
        assert!(!panel.toggle_grid());
        assert_eq!(panel.toggle_phase_mode(), PhaseMode::DeltaTime);
        assert_eq!(panel.toggle_phase_mode(), PhaseMode::AbsoluteElapsed);
    }
}
