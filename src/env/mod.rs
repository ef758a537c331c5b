//! The contract an external RL-environment adapter drives
//!
//! Each game variant implements [`Simulation`] as its own type; the
//! adapter steps the trait without any game-specific knowledge. The
//! grid snake is the variant this crate ships.

use crate::game::{Action, GridSimulation, StepResult};

/// Capability interface of a turn-based simulation
///
/// The contract is synchronous and infallible: `step` always returns a
/// result and signals episode ends through the `terminated`/`truncated`
/// flags, never through errors.
pub trait Simulation {
    /// Reset per-episode state and begin a fresh episode
    fn init(&mut self);

    /// Advance one tick
    fn step(&mut self, action: Action) -> StepResult;

    /// Observation of the current state, without stepping
    fn observe(&self) -> Vec<f32>;

    /// Length of the vector `observe` returns
    fn observation_len(&self) -> usize;

    /// Size of the discrete action space
    fn action_count(&self) -> usize;

    /// Food items eaten this episode
    fn score(&self) -> u32;

    /// Whether the current episode has reached a terminal state
    fn is_terminated(&self) -> bool;
}

impl Simulation for GridSimulation {
    fn init(&mut self) {
        GridSimulation::init(self);
    }

    fn step(&mut self, action: Action) -> StepResult {
        GridSimulation::step(self, action)
    }

    fn observe(&self) -> Vec<f32> {
        GridSimulation::observe(self)
    }

    fn observation_len(&self) -> usize {
        GridSimulation::observation_len(self)
    }

    fn action_count(&self) -> usize {
        Action::COUNT
    }

    fn score(&self) -> u32 {
        GridSimulation::score(self)
    }

    fn is_terminated(&self) -> bool {
        !self.is_alive()
    }
}
