use crate::error::{CloudError, Result};
use crate::simulation::field::{SampleField, HIDDEN, VISIBLE};
use crate::simulation::mixture::MixtureParameters;

/// Lifecycle of the evolution engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No population bound yet; stepping is an error
    Uninitialized,
    /// Bound to a population of the given size
    Running { population: usize },
}

/// Outcome of one evolution step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub population: usize,
    pub visible: usize,
}

/// Recomputes every point's visibility from the mixed-state probability.
pub struct EvolutionEngine {
    state: EngineState,
    steps: u64,
}

impl Default for EvolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EvolutionEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Uninitialized,
            steps: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of successful steps since the last bind
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Bind to a population, moving the engine to Running
    pub fn bind(&mut self, field: &SampleField) -> Result<()> {
        if field.is_empty() {
            return Err(CloudError::InvalidState(
                "cannot bind to an empty population".into(),
            ));
        }
        self.state = EngineState::Running {
            population: field.len(),
        };
        self.steps = 0;
        log::debug!("Evolution engine bound to {} points", field.len());
        Ok(())
    }

    /// Recompute the visibility of every point for the given parameters and phase.
    ///
    /// Every flag is overwritten, so nothing from a previous step survives.
    pub fn step(
        &mut self,
        field: &mut SampleField,
        params: &MixtureParameters,
        phase: f64,
    ) -> Result<StepReport> {
        let population = match self.state {
            EngineState::Uninitialized => {
                return Err(CloudError::InvalidState(
                    "step called before a population was bound".into(),
                ));
            }
            EngineState::Running { population } => population,
        };
        if field.len() != population {
            return Err(CloudError::InvalidState(format!(
                "population size {} does not match bound size {}",
                field.len(),
                population
            )));
        }

        // One snapshot for the whole pass
        let params = *params;
        let cutoff = params.probability_cutoff();
        let cos_phase = phase.cos() as f32;

        let (amplitudes_1s, amplitudes_2pz, visibility) = field.evolution_view();
        let mut visible = 0;

        for ((flag, &a), &b) in visibility
            .iter_mut()
            .zip(amplitudes_1s)
            .zip(amplitudes_2pz)
        {
            if params.mixed_probability(a, b, cos_phase) > cutoff {
                *flag = VISIBLE;
                visible += 1;
            } else {
                *flag = HIDDEN;
            }
        }

        self.steps += 1;
        if self.steps % 600 == 0 {
            log::debug!(
                "step {}: {}/{} visible (phase {:.4})",
                self.steps,
                visible,
                population,
                phase
            );
        }

        Ok(StepReport {
            population,
            visible,
        })
    }
}
