//! The grid-snake simulation
//!
//! Everything here is pure in-process state with no I/O or rendering
//! dependencies; external adapters drive it through `init`/`step`/
//! `observe` and renderers read the drawable blocks.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Axis, Direction};
pub use config::SimConfig;
pub use engine::{GridSimulation, StepInfo, StepResult};
pub use state::{Block, BlockColor, CollisionType, Position, Snake, Tile};
