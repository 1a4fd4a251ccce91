//! Match detection - finds horizontal and vertical runs of length >= 3
//!
//! A run is anchored by an ordinary kind; Rainbow extends any run as a
//! wildcard but never anchors one (an all-Rainbow line is not a match).
//! Bomb, Lightning and Star never participate. Horizontal and vertical
//! groups are reported separately so the resolver can classify L/T/plus
//! shapes; a cell may appear in one group per axis.

use crate::core::board::Board;
use crate::types::{Axis, Coordinate, TokenKind, MIN_RUN_LEN};

/// A maximal run of one effective kind along a single axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    /// The anchor kind shared by the run (never Rainbow, never special)
    pub kind: TokenKind,
    pub axis: Axis,
    /// Coordinates of the run, in line order
    pub cells: Vec<Coordinate>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }
}

/// True if `cell` extends a run of `kind` (same kind, or the Rainbow wildcard)
#[inline]
fn extends(cell: Option<Option<TokenKind>>, kind: TokenKind) -> bool {
    matches!(cell, Some(Some(k)) if k == kind || k == TokenKind::Rainbow)
}

/// Scan the whole board and return every maximal run of length >= 3.
///
/// Deterministic: groups are emitted horizontal-first in row-major scan
/// order. Calling this twice on an unmodified board returns equal results.
pub fn find_matches(board: &Board) -> Vec<MatchGroup> {
    let mut groups: Vec<MatchGroup> = Vec::new();
    let width = board.width() as i8;
    let height = board.height() as i8;

    // Horizontal runs
    for y in 0..height {
        for x in 0..width {
            let Some(Some(kind)) = board.get(x, y) else {
                continue;
            };
            if !kind.is_ordinary() {
                continue;
            }
            let (lo, hi) = extend_run(board, Coordinate::new(x, y), kind, Axis::Horizontal);
            if (hi - lo + 1) as usize >= MIN_RUN_LEN {
                push_unique(&mut groups, MatchGroup {
                    kind,
                    axis: Axis::Horizontal,
                    cells: (lo..=hi).map(|cx| Coordinate::new(cx, y)).collect(),
                });
            }
        }
    }

    // Vertical runs
    for x in 0..width {
        for y in 0..height {
            let Some(Some(kind)) = board.get(x, y) else {
                continue;
            };
            if !kind.is_ordinary() {
                continue;
            }
            let (lo, hi) = extend_run(board, Coordinate::new(x, y), kind, Axis::Vertical);
            if (hi - lo + 1) as usize >= MIN_RUN_LEN {
                push_unique(&mut groups, MatchGroup {
                    kind,
                    axis: Axis::Vertical,
                    cells: (lo..=hi).map(|cy| Coordinate::new(x, cy)).collect(),
                });
            }
        }
    }

    groups
}

/// Maximal extension of `kind` through the anchor, along one axis.
/// Returns the inclusive (lo, hi) range on that axis; counting stops at the
/// board edge (no wraparound).
fn extend_run(board: &Board, anchor: Coordinate, kind: TokenKind, axis: Axis) -> (i8, i8) {
    let at = |pos: i8| match axis {
        Axis::Horizontal => board.get(pos, anchor.y),
        Axis::Vertical => board.get(anchor.x, pos),
    };
    let start = match axis {
        Axis::Horizontal => anchor.x,
        Axis::Vertical => anchor.y,
    };

    let mut lo = start;
    while extends(at(lo - 1), kind) {
        lo -= 1;
    }
    let mut hi = start;
    while extends(at(hi + 1), kind) {
        hi += 1;
    }
    (lo, hi)
}

/// Anchors inside one maximal run all produce the same interval; keep one.
fn push_unique(groups: &mut Vec<MatchGroup>, group: MatchGroup) {
    if !groups.contains(&group) {
        groups.push(group);
    }
}

/// Local check: would the token at (x, y) sit inside a run of length >= 3?
/// Used by the generator to test replacement candidates without a full scan.
pub fn is_cell_matched(board: &Board, x: i8, y: i8) -> bool {
    let Some(Some(kind)) = board.get(x, y) else {
        return false;
    };
    if !kind.is_ordinary() {
        return false;
    }
    let anchor = Coordinate::new(x, y);
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let (lo, hi) = extend_run(board, anchor, kind, axis);
        if (hi - lo + 1) as usize >= MIN_RUN_LEN {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn t() -> Cell {
        Some(TokenKind::Tomato)
    }
    fn c() -> Cell {
        Some(TokenKind::Cheese)
    }
    fn o() -> Cell {
        Some(TokenKind::Onion)
    }
    fn r() -> Cell {
        Some(TokenKind::Rainbow)
    }

    #[test]
    fn test_no_match_on_mixed_board() {
        let board = Board::from_rows(vec![
            vec![t(), c(), t()],
            vec![c(), t(), c()],
            vec![t(), c(), t()],
        ]);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_horizontal_run_of_three() {
        let board = Board::from_rows(vec![
            vec![t(), t(), t()],
            vec![c(), o(), c()],
            vec![o(), c(), o()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, TokenKind::Tomato);
        assert_eq!(groups[0].axis, Axis::Horizontal);
        assert_eq!(
            groups[0].cells,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_vertical_run_of_four() {
        let board = Board::from_rows(vec![
            vec![c(), t(), o()],
            vec![o(), t(), c()],
            vec![c(), t(), o()],
            vec![o(), t(), c()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, Axis::Vertical);
        assert_eq!(groups[0].len(), 4);
    }

    #[test]
    fn test_one_group_per_maximal_run() {
        // Five in a row must be one group of five, not overlapping triples
        let board = Board::from_rows(vec![
            vec![t(), t(), t(), t(), t()],
            vec![c(), o(), c(), o(), c()],
            vec![o(), c(), o(), c(), o()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
    }

    #[test]
    fn test_cross_shape_reports_both_axes() {
        let board = Board::from_rows(vec![
            vec![c(), t(), o()],
            vec![t(), t(), t()],
            vec![o(), t(), c()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 2);
        let axes: Vec<Axis> = groups.iter().map(|g| g.axis).collect();
        assert!(axes.contains(&Axis::Horizontal));
        assert!(axes.contains(&Axis::Vertical));
        // Center cell belongs to both groups
        let center = Coordinate::new(1, 1);
        assert!(groups.iter().all(|g| g.contains(center)));
    }

    #[test]
    fn test_rainbow_extends_run() {
        let board = Board::from_rows(vec![
            vec![t(), r(), t()],
            vec![c(), o(), c()],
            vec![o(), c(), o()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, TokenKind::Tomato);
        assert_eq!(groups[0].len(), 3);
        assert!(groups[0].contains(Coordinate::new(1, 0)));
    }

    #[test]
    fn test_rainbow_never_anchors() {
        // All-rainbow row is not a match
        let board = Board::from_rows(vec![
            vec![r(), r(), r()],
            vec![c(), o(), c()],
            vec![o(), c(), o()],
        ]);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_shared_rainbow_produces_group_per_kind() {
        // T T R C C : the rainbow completes a tomato run and a cheese run
        let board = Board::from_rows(vec![
            vec![t(), t(), r(), c(), c()],
            vec![c(), o(), t(), o(), t()],
            vec![o(), c(), o(), t(), o()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 2);
        let kinds: Vec<TokenKind> = groups.iter().map(|g| g.kind).collect();
        assert!(kinds.contains(&TokenKind::Tomato));
        assert!(kinds.contains(&TokenKind::Cheese));
        // Both groups claim the rainbow cell
        let shared = Coordinate::new(2, 0);
        assert!(groups.iter().all(|g| g.contains(shared)));
    }

    #[test]
    fn test_specials_block_runs() {
        let board = Board::from_rows(vec![
            vec![t(), Some(TokenKind::Bomb), t()],
            vec![t(), Some(TokenKind::Star), t()],
            vec![t(), Some(TokenKind::Lightning), t()],
        ]);
        // Columns 0 and 2 are vertical tomato triples; column 1 never matches
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.axis == Axis::Vertical));
        assert!(groups
            .iter()
            .all(|g| g.cells.iter().all(|coord| coord.x != 1)));
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let board = Board::from_rows(vec![
            vec![t(), None, t()],
            vec![t(), c(), t()],
            vec![None, o(), None],
        ]);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let board = Board::from_rows(vec![
            vec![t(), t(), t(), c()],
            vec![c(), o(), c(), o()],
            vec![o(), c(), o(), c()],
        ]);
        assert_eq!(find_matches(&board), find_matches(&board));
    }

    #[test]
    fn test_is_cell_matched_local_check() {
        let board = Board::from_rows(vec![
            vec![t(), t(), t()],
            vec![c(), o(), c()],
            vec![o(), c(), o()],
        ]);
        assert!(is_cell_matched(&board, 0, 0));
        assert!(is_cell_matched(&board, 1, 0));
        assert!(is_cell_matched(&board, 2, 0));
        assert!(!is_cell_matched(&board, 0, 1));
        // Out of bounds and empty cells are never matched
        assert!(!is_cell_matched(&board, -1, 0));
        assert!(!is_cell_matched(&board, 0, 3));
    }

    #[test]
    fn test_edge_runs_stop_at_boundary() {
        // Run touching the right edge; no wraparound to column 0
        let board = Board::from_rows(vec![
            vec![c(), t(), t(), t()],
            vec![o(), c(), o(), c()],
            vec![c(), o(), c(), o()],
        ]);
        let groups = find_matches(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        assert!(!groups[0].contains(Coordinate::new(0, 0)));
    }
}
