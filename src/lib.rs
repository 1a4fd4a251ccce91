//! Kitchen Crush - a deterministic match-3 puzzle engine.
//!
//! A rectangular board of ingredient tokens is rearranged by swapping
//! adjacent cells; runs of three or more are cleared, tokens fall, new
//! tokens spawn, and cascades resolve until the board settles. Rendering,
//! input and scoring live with the integration layer; this crate computes
//! intent (what cleared, what moved, what spawned) and emits it as data.
//!
//! # Example
//!
//! ```
//! use kitchen_crush::core::{Engine, EngineConfig, EngineEvent};
//! use kitchen_crush::types::Coordinate;
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! assert!(!engine.is_resolving());
//!
//! // A swap is either bounced or fully resolved before this returns.
//! let _outcome = engine.request_swap(Coordinate::new(2, 3), Coordinate::new(2, 4));
//! for event in engine.drain_events() {
//!     if let EngineEvent::BoardSettled { cascades } = event {
//!         println!("move resolved after {} cascades", cascades);
//!     }
//! }
//! ```

pub mod core;
pub mod types;
