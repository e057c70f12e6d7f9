use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::config::{ANIMATION_SPEED_SCALE, DELTA_PHASE_RATE};

/// How the phase accumulator advances each frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhaseMode {
    /// Add the absolute clock reading (scaled) every frame, so the increment
    /// grows over the run even at constant speed
    #[default]
    AbsoluteElapsed,
    /// Add the time since the previous frame (scaled), a constant rate at constant speed
    DeltaTime,
}

impl PhaseMode {
    pub fn toggled(self) -> Self {
        match self {
            PhaseMode::AbsoluteElapsed => PhaseMode::DeltaTime,
            PhaseMode::DeltaTime => PhaseMode::AbsoluteElapsed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseMode::AbsoluteElapsed => "absolute",
            PhaseMode::DeltaTime => "delta",
        }
    }
}

/// Monotonic phase accumulator driving the interference term
#[derive(Clone, Debug, Default)]
pub struct PhaseClock {
    mode: PhaseMode,
    phase: f64,
    previous_secs: Option<f64>,
}

impl PhaseClock {
    pub fn new(mode: PhaseMode) -> Self {
        Self {
            mode,
            phase: 0.0,
            previous_secs: None,
        }
    }

    pub fn mode(&self) -> PhaseMode {
        self.mode
    }

    /// Switch accumulation mode; the accumulated phase carries over
    pub fn set_mode(&mut self, mode: PhaseMode) {
        self.mode = mode;
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Feed one clock sample (seconds) and return the new phase.
    ///
    /// Negative speeds and backwards clock steps contribute nothing, so the
    /// phase never decreases.
    pub fn advance(&mut self, now_secs: f64, speed: f32) -> f64 {
        let speed = f64::from(speed.max(0.0));

        let increment = match self.mode {
            PhaseMode::AbsoluteElapsed => now_secs.max(0.0) * ANIMATION_SPEED_SCALE * speed,
            PhaseMode::DeltaTime => {
                let delta = self
                    .previous_secs
                    .map_or(0.0, |previous| (now_secs - previous).max(0.0));
                delta * DELTA_PHASE_RATE * speed
            }
        };

        self.previous_secs = Some(now_secs);
        self.phase += increment;
        self.phase
    }
}

/// Monotonic clock reporting seconds since the UNIX epoch.
///
/// The epoch offset is read once at start-up and then advanced by `Instant`,
/// so the reading has the magnitude of wall-clock time but never steps back.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    epoch_offset_secs: f64,
    started: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        let epoch_offset_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Self {
            epoch_offset_secs,
            started: Instant::now(),
        }
    }

    pub fn now_secs(&self) -> f64 {
        self.epoch_offset_secs + self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_non_decreasing(mode: PhaseMode, samples: &[f64], speed: f32) {
        let mut clock = PhaseClock::new(mode);
        let mut last = clock.phase();
        for &t in samples {
            let phase = clock.advance(t, speed);
            assert!(phase >= last, "{mode:?}: phase went from {last} to {phase} at t={t}");
            last = phase;
        }
    }

    #[test]
    fn test_phase_monotonic_in_both_modes() {
        let samples: Vec<f64> = (0..500).map(|i| 1.7e9 + i as f64 / 60.0).collect();
        assert_non_decreasing(PhaseMode::AbsoluteElapsed, &samples, 1.0);
        assert_non_decreasing(PhaseMode::DeltaTime, &samples, 1.0);

        // Repeated samples are still non-decreasing
        let flat = [5.0, 5.0, 5.0, 6.0, 6.0];
        assert_non_decreasing(PhaseMode::AbsoluteElapsed, &flat, 0.3);
        assert_non_decreasing(PhaseMode::DeltaTime, &flat, 0.3);
    }

    #[test]
    fn test_absolute_mode_accumulates_clock_reading() {
        let mut clock = PhaseClock::new(PhaseMode::AbsoluteElapsed);
        clock.advance(100.0, 1.0);
        clock.advance(200.0, 0.5);
        let expected = 100.0 * ANIMATION_SPEED_SCALE + 200.0 * ANIMATION_SPEED_SCALE * 0.5;
        assert_relative_eq!(clock.phase(), expected);
    }

    #[test]
    fn test_absolute_mode_increment_grows_at_constant_speed() {
        let mut clock = PhaseClock::new(PhaseMode::AbsoluteElapsed);
        let p1 = clock.advance(10.0, 1.0);
        let p2 = clock.advance(20.0, 1.0);
        let p3 = clock.advance(30.0, 1.0);
        assert!(p3 - p2 > p2 - p1);
    }

    #[test]
    fn test_delta_mode_constant_rate() {
        let mut clock = PhaseClock::new(PhaseMode::DeltaTime);
        // First sample only establishes the reference point
        assert_eq!(clock.advance(1000.0, 1.0), 0.0);
        clock.advance(1000.5, 1.0);
        clock.advance(1001.0, 1.0);
        assert_relative_eq!(clock.phase(), DELTA_PHASE_RATE);
    }

    #[test]
    fn test_backwards_clock_and_negative_speed_ignored() {
        let mut clock = PhaseClock::new(PhaseMode::DeltaTime);
        clock.advance(10.0, 1.0);
        let before = clock.advance(11.0, 1.0);
        assert_eq!(clock.advance(9.0, 1.0), before);
        assert_eq!(clock.advance(20.0, -3.0), before);

        let mut absolute = PhaseClock::new(PhaseMode::AbsoluteElapsed);
        assert_eq!(absolute.advance(50.0, -1.0), 0.0);
    }

    #[test]
    fn test_zero_speed_freezes_phase() {
        let mut clock = PhaseClock::new(PhaseMode::AbsoluteElapsed);
        clock.advance(1.0e9, 1.0);
        let frozen = clock.phase();
        clock.advance(1.0e9 + 1.0, 0.0);
        assert_eq!(clock.phase(), frozen);
    }

    #[test]
    fn test_mode_switch_keeps_phase() {
        let mut clock = PhaseClock::new(PhaseMode::AbsoluteElapsed);
        clock.advance(1.0e9, 1.0);
        let before = clock.phase();
        clock.set_mode(clock.mode().toggled());
        assert_eq!(clock.mode(), PhaseMode::DeltaTime);
        assert_eq!(clock.advance(1.0e9, 1.0), before);
    }

    #[test]
    fn test_wall_clock_is_monotonic_and_epoch_scaled() {
        let clock = WallClock::start();
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!(b >= a);
        // Sanity: after 2001-09-09
        assert!(a > 1.0e9);
    }
}
