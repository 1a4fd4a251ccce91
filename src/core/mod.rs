//! Core engine - pure, deterministic, and testable
//!
//! This module contains the whole simulation: board storage, match
//! detection, generation, special-tile rules and the cascade resolver.
//! It has zero dependencies on UI, timing, or I/O; the same seed always
//! produces the same session.

pub mod board;
pub mod engine;
pub mod generator;
pub mod matches;
pub mod policy;
pub mod rng;
pub mod snapshot;
pub mod specials;

// Re-export commonly used types
pub use board::{Board, CellMove};
pub use engine::{
    ActivateError, CascadeStep, Engine, EngineConfig, EngineEvent, Phase, SwapOutcome,
    SwapRejection,
};
pub use generator::{generate, GenerateStats};
pub use matches::{find_matches, MatchGroup};
pub use policy::SpawnPolicy;
pub use rng::SimpleRng;
pub use snapshot::{BoardSnapshot, EngineSnapshot};
pub use specials::{activation_targets, special_for_group};
