//! Special tile rules - what larger matches produce and what activating
//! a special token does to the board
//!
//! Classification works on the *merged* cleared group (overlapping
//! horizontal/vertical runs unioned by the resolver): distinct cell count
//! plus orientation decide the tier. Activation is a pure computation of
//! affected coordinates; the resolver clears them and reuses the normal
//! drop/refill cycle.

use crate::core::board::Board;
use crate::types::{Coordinate, Orientation, TokenKind};

/// Special token produced by a cleared group, if any.
///
/// | distinct cells | orientation | result    |
/// |----------------|-------------|-----------|
/// | 3              | any         | none      |
/// | 4              | horizontal  | Lightning |
/// | 4              | vertical    | Bomb      |
/// | 5              | any         | Rainbow   |
/// | >= 6           | any         | Star      |
///
/// A both-axis union always has at least 5 distinct cells, so the size-4
/// row is total over the orientations that can actually occur.
pub fn special_for_group(size: usize, orientation: Orientation) -> Option<TokenKind> {
    match size {
        0..=3 => None,
        4 => match orientation {
            Orientation::Horizontal => Some(TokenKind::Lightning),
            Orientation::Vertical => Some(TokenKind::Bomb),
            Orientation::Both => Some(TokenKind::Bomb),
        },
        5 => Some(TokenKind::Rainbow),
        _ => Some(TokenKind::Star),
    }
}

/// Coordinates cleared by activating the special token at `at`.
///
/// The activated cell itself is always included. `rainbow_target` is the
/// kind a Rainbow erases, chosen at activation time by the caller; it is
/// ignored for the other specials.
pub fn activation_targets(
    board: &Board,
    at: Coordinate,
    kind: TokenKind,
    rainbow_target: Option<TokenKind>,
) -> Vec<Coordinate> {
    let mut targets = Vec::new();
    match kind {
        // 3x3 neighborhood centered on the activation, clipped to the board
        TokenKind::Bomb => {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let x = at.x + dx;
                    let y = at.y + dy;
                    if board.in_bounds(x, y) {
                        targets.push(Coordinate::new(x, y));
                    }
                }
            }
        }
        // Full row of the activated token
        TokenKind::Lightning => {
            for x in 0..board.width() as i8 {
                targets.push(Coordinate::new(x, at.y));
            }
        }
        // Full column
        TokenKind::Star => {
            for y in 0..board.height() as i8 {
                targets.push(Coordinate::new(at.x, y));
            }
        }
        // Every cell of one other kind, plus the rainbow itself
        TokenKind::Rainbow => {
            targets.push(at);
            if let Some(target_kind) = rainbow_target {
                for coord in board.cells_of_kind(target_kind) {
                    if coord != at {
                        targets.push(coord);
                    }
                }
            }
        }
        _ => {
            debug_assert!(false, "activation requested for ordinary kind {:?}", kind);
        }
    }
    targets
}
