//! Board module - manages the puzzle grid
//!
//! The board is a width x height grid where each cell holds a token kind or
//! is empty. Uses a flat row-major array for cache locality; dimensions are
//! fixed for the lifetime of a session.
//! Coordinates: (x, y) where x ranges left to right, y top to bottom.

use crate::types::{Cell, Coordinate, TokenKind, ORDINARY_KINDS};

/// The puzzle board - flat array storage, row-major order (y * width + x)
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

/// One token's movement during a gravity compaction, for the animation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMove {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        !(x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8)
    }

    /// Check if position is within bounds and holds a token
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_cell(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Number of occupied cells (equals width * height once settled)
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Swap the contents of two in-bounds cells.
    /// Returns false (board untouched) if either coordinate is out of bounds.
    pub fn swap(&mut self, a: Coordinate, b: Coordinate) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a.x, a.y), self.index(b.x, b.y)) else {
            return false;
        };
        self.cells.swap(ia, ib);
        true
    }

    /// Compact one column downward: occupied cells keep their relative order,
    /// empties end up at the top. Returns the moves performed (top to bottom).
    pub fn compact_column(&mut self, x: i8) -> Vec<CellMove> {
        let mut moves = Vec::new();
        if x < 0 || x >= self.width as i8 {
            return moves;
        }

        // Two-pointer scan from the bottom, writing occupied cells downward
        let mut write_y = self.height as i8 - 1;
        for read_y in (0..self.height as i8).rev() {
            if let Some(Some(kind)) = self.get(x, read_y) {
                if write_y != read_y {
                    self.set(x, write_y, Some(kind));
                    self.set(x, read_y, None);
                    moves.push(CellMove {
                        from: Coordinate::new(x, read_y),
                        to: Coordinate::new(x, write_y),
                    });
                }
                write_y -= 1;
            }
        }
        moves
    }

    /// Count occurrences of each ordinary kind, indexed as in `ORDINARY_KINDS`
    pub fn ordinary_histogram(&self) -> [usize; ORDINARY_KINDS.len()] {
        let mut counts = [0usize; ORDINARY_KINDS.len()];
        for cell in &self.cells {
            if let Some(kind) = cell {
                if let Some(slot) = ORDINARY_KINDS.iter().position(|k| k == kind) {
                    counts[slot] += 1;
                }
            }
        }
        counts
    }

    /// Most frequent ordinary kind on the board, ties broken by enum order.
    /// None only when the board holds no ordinary tokens at all.
    pub fn most_frequent_ordinary(&self) -> Option<TokenKind> {
        let counts = self.ordinary_histogram();
        let (best, &count) = counts
            .iter()
            .enumerate()
            .max_by_key(|&(i, &c)| (c, std::cmp::Reverse(i)))?;
        if count == 0 {
            return None;
        }
        Some(ORDINARY_KINDS[best])
    }

    /// All coordinates holding the given kind
    pub fn cells_of_kind(&self, kind: TokenKind) -> Vec<Coordinate> {
        let mut out = Vec::new();
        for y in 0..self.height as i8 {
            for x in 0..self.width as i8 {
                if self.get(x, y) == Some(Some(kind)) {
                    out.push(Coordinate::new(x, y));
                }
            }
        }
        out
    }

    /// Get a reference to the internal cells slice (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from rows of cells (top row first).
    /// Panics if the rows are ragged or empty; intended for level layouts
    /// and scenario construction.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        assert!(height > 0, "board must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "board must have at least one column");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "all rows must have the same width"
        );

        let mut cells = Vec::with_capacity(width * height);
        for row in &rows {
            cells.extend_from_slice(row);
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    /// Convert to rows of cells for inspection (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let width = self.width as usize;
        (0..self.height as usize)
            .map(|y| {
                let start = y * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_calculation() {
        let board = Board::new(8, 8);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(7, 0), Some(7));
        assert_eq!(board.index(0, 1), Some(8));
        assert_eq!(board.index(7, 7), Some(63));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(8, 0), None);
        assert_eq!(board.index(0, 8), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(8, 8);

        assert!(board.set(5, 2, Some(TokenKind::Tomato)));
        assert_eq!(board.get(5, 2), Some(Some(TokenKind::Tomato)));

        assert!(board.set(5, 2, None));
        assert_eq!(board.get(5, 2), Some(None));

        assert!(!board.set(-1, 0, Some(TokenKind::Cheese)));
        assert_eq!(board.get(8, 0), None);
    }

    #[test]
    fn test_swap_in_bounds() {
        let mut board = Board::new(4, 4);
        board.set(0, 0, Some(TokenKind::Tomato));
        board.set(1, 0, Some(TokenKind::Cheese));

        assert!(board.swap(Coordinate::new(0, 0), Coordinate::new(1, 0)));
        assert_eq!(board.get(0, 0), Some(Some(TokenKind::Cheese)));
        assert_eq!(board.get(1, 0), Some(Some(TokenKind::Tomato)));
    }

    #[test]
    fn test_swap_out_of_bounds_is_noop() {
        let mut board = Board::new(4, 4);
        board.set(0, 0, Some(TokenKind::Tomato));
        let before = board.clone();

        assert!(!board.swap(Coordinate::new(0, 0), Coordinate::new(4, 0)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_compact_column_preserves_order() {
        let mut board = Board::new(3, 4);
        // Column 1 top to bottom: Tomato, empty, Cheese, empty
        board.set(1, 0, Some(TokenKind::Tomato));
        board.set(1, 2, Some(TokenKind::Cheese));

        let moves = board.compact_column(1);

        assert_eq!(board.get(1, 3), Some(Some(TokenKind::Cheese)));
        assert_eq!(board.get(1, 2), Some(Some(TokenKind::Tomato)));
        assert_eq!(board.get(1, 1), Some(None));
        assert_eq!(board.get(1, 0), Some(None));
        assert_eq!(
            moves,
            vec![
                CellMove {
                    from: Coordinate::new(1, 2),
                    to: Coordinate::new(1, 3),
                },
                CellMove {
                    from: Coordinate::new(1, 0),
                    to: Coordinate::new(1, 2),
                },
            ]
        );
    }

    #[test]
    fn test_compact_full_column_no_moves() {
        let mut board = Board::new(2, 3);
        for y in 0..3 {
            board.set(0, y, Some(TokenKind::Bread));
        }
        assert!(board.compact_column(0).is_empty());
    }

    #[test]
    fn test_histogram_and_most_frequent() {
        let mut board = Board::new(4, 4);
        for x in 0..3 {
            board.set(x, 0, Some(TokenKind::Cheese));
        }
        board.set(0, 1, Some(TokenKind::Tomato));
        board.set(1, 1, Some(TokenKind::Rainbow));

        let counts = board.ordinary_histogram();
        assert_eq!(counts[0], 1); // Tomato
        assert_eq!(counts[1], 3); // Cheese
        assert_eq!(board.most_frequent_ordinary(), Some(TokenKind::Cheese));
    }

    #[test]
    fn test_most_frequent_empty_board() {
        let board = Board::new(4, 4);
        assert_eq!(board.most_frequent_ordinary(), None);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = vec![
            vec![Some(TokenKind::Tomato), Some(TokenKind::Cheese)],
            vec![None, Some(TokenKind::Onion)],
        ];
        let board = Board::from_rows(rows.clone());
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.count_occupied(), 3);
    }

    #[test]
    fn test_cells_of_kind() {
        let mut board = Board::new(3, 3);
        board.set(0, 0, Some(TokenKind::Bacon));
        board.set(2, 2, Some(TokenKind::Bacon));
        board.set(1, 1, Some(TokenKind::Onion));

        assert_eq!(
            board.cells_of_kind(TokenKind::Bacon),
            vec![Coordinate::new(0, 0), Coordinate::new(2, 2)]
        );
    }
}
