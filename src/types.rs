//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Default board dimensions used by the demo binary and benches
pub const DEFAULT_BOARD_WIDTH: u8 = 8;
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Minimum run length that counts as a match
pub const MIN_RUN_LEN: usize = 3;

/// Global repair-pass cap for the board generator
pub const GENERATOR_MAX_PASSES: u32 = 100;

/// Weight (percent) given to required-set candidates during generator repair
pub const REQUIRED_KIND_WEIGHT: u32 = 70;

/// Safety cap on resolve-loop iterations per accepted swap.
/// Each iteration strictly consumes at least one match, so a finite board
/// can never legitimately reach this.
pub const MAX_CASCADE_ITERATIONS: u32 = 10_000;

/// Token kinds that can occupy a board cell.
///
/// Ordinary kinds are the matchable ingredients; special kinds are produced
/// only by gameplay (never by the generator or refill) and have their own
/// activation effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Tomato,
    Cheese,
    Lettuce,
    Bread,
    Bacon,
    Onion,
    Bomb,
    Rainbow,
    Lightning,
    Star,
}

/// All ordinary (matchable) kinds, in enum order
pub const ORDINARY_KINDS: [TokenKind; 6] = [
    TokenKind::Tomato,
    TokenKind::Cheese,
    TokenKind::Lettuce,
    TokenKind::Bread,
    TokenKind::Bacon,
    TokenKind::Onion,
];

impl TokenKind {
    /// True for Bomb, Rainbow, Lightning and Star
    pub fn is_special(self) -> bool {
        matches!(
            self,
            TokenKind::Bomb | TokenKind::Rainbow | TokenKind::Lightning | TokenKind::Star
        )
    }

    /// True for the matchable ingredient kinds
    pub fn is_ordinary(self) -> bool {
        !self.is_special()
    }

    /// Stable numeric code (0 = empty cell in snapshots, so kinds start at 1)
    pub fn code(self) -> u8 {
        match self {
            TokenKind::Tomato => 1,
            TokenKind::Cheese => 2,
            TokenKind::Lettuce => 3,
            TokenKind::Bread => 4,
            TokenKind::Bacon => 5,
            TokenKind::Onion => 6,
            TokenKind::Bomb => 7,
            TokenKind::Rainbow => 8,
            TokenKind::Lightning => 9,
            TokenKind::Star => 10,
        }
    }

    /// Inverse of [`TokenKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TokenKind::Tomato),
            2 => Some(TokenKind::Cheese),
            3 => Some(TokenKind::Lettuce),
            4 => Some(TokenKind::Bread),
            5 => Some(TokenKind::Bacon),
            6 => Some(TokenKind::Onion),
            7 => Some(TokenKind::Bomb),
            8 => Some(TokenKind::Rainbow),
            9 => Some(TokenKind::Lightning),
            10 => Some(TokenKind::Star),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Tomato => "tomato",
            TokenKind::Cheese => "cheese",
            TokenKind::Lettuce => "lettuce",
            TokenKind::Bread => "bread",
            TokenKind::Bacon => "bacon",
            TokenKind::Onion => "onion",
            TokenKind::Bomb => "bomb",
            TokenKind::Rainbow => "rainbow",
            TokenKind::Lightning => "lightning",
            TokenKind::Star => "star",
        }
    }

    /// Parse kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tomato" => Some(TokenKind::Tomato),
            "cheese" => Some(TokenKind::Cheese),
            "lettuce" => Some(TokenKind::Lettuce),
            "bread" => Some(TokenKind::Bread),
            "bacon" => Some(TokenKind::Bacon),
            "onion" => Some(TokenKind::Onion),
            "bomb" => Some(TokenKind::Bomb),
            "rainbow" => Some(TokenKind::Rainbow),
            "lightning" => Some(TokenKind::Lightning),
            "star" => Some(TokenKind::Star),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, only during an in-flight cascade step)
pub type Cell = Option<TokenKind>;

/// Board coordinate: (x, y), 0-indexed, x left-to-right, y top-to-bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
}

impl Coordinate {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Orthogonal adjacency: Manhattan distance exactly 1
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx + dy == 1
    }
}

/// Axis of a detected run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Orientation of a (possibly merged) cleared group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Both,
}
