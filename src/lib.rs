//! Hybrid-orbital probability cloud.
//!
//! A fixed population of sample points carries precomputed 1s and 2pz
//! amplitudes; every frame the evolution engine decides which points are
//! visible from the time-varying probability of a mixed 1s/2pz state.
//!
//! The core does no rendering. It produces point positions and per-point
//! visibility flags laid out for direct upload to a GPU vertex buffer.

pub mod config;
pub mod controls;
pub mod error;
pub mod simulation;

pub use controls::ControlPanel;
pub use error::{CloudError, Result};
pub use simulation::{
    generate, EngineState, EvolutionEngine, FieldSettings, MixtureParameters, PhaseClock,
    PhaseMode, SampleField, StepReport, WallClock,
};
