//! Serializable snapshots of the board and engine for observers
//!
//! Cells are exported as `u8` codes (0 = empty, kinds start at 1) so a
//! snapshot is compact and stable across versions of the kind enum.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::engine::{Engine, Phase};
use crate::types::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cell codes, length = width * height
    pub cells: Vec<u8>,
}

impl BoardSnapshot {
    pub fn of(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            cells: board
                .cells()
                .iter()
                .map(|cell| cell.map_or(0, TokenKind::code))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSnapshot {
    Idle,
    Swapping,
    Resolving,
    Clearing,
    Dropping,
    Refilling,
}

impl From<Phase> for PhaseSnapshot {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => PhaseSnapshot::Idle,
            Phase::Swapping => PhaseSnapshot::Swapping,
            Phase::Resolving => PhaseSnapshot::Resolving,
            Phase::Clearing => PhaseSnapshot::Clearing,
            Phase::Dropping => PhaseSnapshot::Dropping,
            Phase::Refilling => PhaseSnapshot::Refilling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub board: BoardSnapshot,
    pub phase: PhaseSnapshot,
    pub moves_resolved: u32,
    pub rng_state: u32,
}

impl EngineSnapshot {
    pub fn of(engine: &Engine) -> Self {
        Self {
            board: BoardSnapshot::of(engine.board()),
            phase: engine.phase().into(),
            moves_resolved: engine.moves_resolved(),
            rng_state: engine.rng_state(),
        }
    }
}
