//! Board generation - populate a board with no pre-existing matches
//!
//! Fill every cell from the spawn policy, then repair: any cell still
//! sitting inside a run is re-rolled to a kind that is locally matchless,
//! preferring kinds from the active requirement set. Bounded retry: after
//! the global pass cap the board is accepted as-is, so generation always
//! terminates and always returns a fully populated board. Deterministic
//! for a fixed seed.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::matches::{find_matches, is_cell_matched};
use crate::core::policy::SpawnPolicy;
use crate::core::rng::SimpleRng;
use crate::types::{
    Coordinate, TokenKind, GENERATOR_MAX_PASSES, ORDINARY_KINDS, REQUIRED_KIND_WEIGHT,
};

/// Outcome report for one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateStats {
    /// Repair passes executed (0 when the initial fill was already clean)
    pub passes: u32,
    /// Cells still flagged after the final pass; 0 for a clean board
    pub residual_cells: usize,
}

impl GenerateStats {
    /// True when the retry cap was reached with matches still present
    pub fn exhausted(&self) -> bool {
        self.residual_cells > 0
    }
}

/// Generate a `width` x `height` board with best-effort zero initial matches.
///
/// Not guaranteed clean on pathologically constrained policies (a single
/// legal kind cannot avoid runs); callers read [`GenerateStats`] to learn
/// whether repair was exhausted.
pub fn generate(
    width: u8,
    height: u8,
    policy: &SpawnPolicy,
    rng: &mut SimpleRng,
) -> (Board, GenerateStats) {
    let mut board = Board::new(width, height);
    for y in 0..height as i8 {
        for x in 0..width as i8 {
            board.set(x, y, Some(policy.spawn_kind(rng)));
        }
    }

    let mut passes = 0u32;
    while passes < GENERATOR_MAX_PASSES {
        let flagged = flagged_cells(&board);
        if flagged.is_empty() {
            break;
        }
        passes += 1;
        for coord in flagged {
            repair_cell(&mut board, coord, policy, rng);
        }
    }

    let residual_cells = flagged_cells(&board).len();
    (board, GenerateStats {
        passes,
        residual_cells,
    })
}

/// Distinct coordinates currently participating in any run
fn flagged_cells(board: &Board) -> Vec<Coordinate> {
    let mut flagged: Vec<Coordinate> = Vec::new();
    for group in find_matches(board) {
        for coord in group.cells {
            if !flagged.contains(&coord) {
                flagged.push(coord);
            }
        }
    }
    flagged
}

/// Re-roll one flagged cell to a locally matchless kind when one exists.
///
/// Candidates are enumerated over all ordinary kinds by provisional
/// assignment; among the matchless ones, requirement-set kinds win a
/// weighted coin flip when both classes are available.
fn repair_cell(board: &mut Board, coord: Coordinate, policy: &SpawnPolicy, rng: &mut SimpleRng) {
    let original = match board.get(coord.x, coord.y) {
        Some(Some(kind)) => kind,
        _ => return,
    };

    let mut preferred: ArrayVec<TokenKind, { ORDINARY_KINDS.len() }> = ArrayVec::new();
    let mut fallback: ArrayVec<TokenKind, { ORDINARY_KINDS.len() }> = ArrayVec::new();

    for kind in ORDINARY_KINDS {
        board.set(coord.x, coord.y, Some(kind));
        if !is_cell_matched(board, coord.x, coord.y) {
            if policy.is_restricted() && policy.allowed_kinds().contains(&kind) {
                preferred.push(kind);
            } else {
                fallback.push(kind);
            }
        }
    }

    let choice = match (preferred.is_empty(), fallback.is_empty()) {
        (false, false) => {
            if rng.percent(REQUIRED_KIND_WEIGHT) {
                *rng.pick(&preferred)
            } else {
                *rng.pick(&fallback)
            }
        }
        (false, true) => *rng.pick(&preferred),
        (true, false) => *rng.pick(&fallback),
        // No matchless candidate at this cell; keep what was there
        (true, true) => original,
    };
    board.set(coord.x, coord.y, Some(choice));
}
