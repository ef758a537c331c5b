//! snake-gym - a deterministic grid-snake simulation for RL training
//!
//! This library provides:
//! - The simulation engine: collision detection, food placement, a
//!   multi-term shaped reward and fixed-size observations (game module)
//! - The capability interface external RL adapters consume (env module)
//! - Cross-episode diagnostics (metrics module)
//!
//! Training loops, policies, rendering surfaces and CLI entry points are
//! external collaborators and live outside this crate.

pub mod env;
pub mod game;
pub mod metrics;
