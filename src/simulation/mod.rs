mod engine;
mod field;
mod mixture;
mod phase;

pub use engine::{EngineState, EvolutionEngine, StepReport};
pub use field::{
    amplitude_1s, amplitude_2pz, polar_angle, radial_distance, FieldSettings, SampleField, HIDDEN,
    VISIBLE,
};
pub use mixture::MixtureParameters;
pub use phase::{PhaseClock, PhaseMode, WallClock};

use crate::error::Result;

/// Generate a population of `count` points in a cube of edge `extent`,
/// using the default 2pz normalization and the thread-local RNG
pub fn generate(count: usize, extent: f32) -> Result<SampleField> {
    SampleField::generate(&FieldSettings::new(count, extent), &mut rand::thread_rng())
}
