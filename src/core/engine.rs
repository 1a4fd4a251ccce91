//! Cascade resolver - the engine's phase-gated state machine
//!
//! Owns the board, the spawn policy and the RNG. A swap request is either
//! bounced (not adjacent, no resulting match) or accepted; once accepted
//! the resolve loop runs to completion synchronously:
//!
//! Idle -> Swapping -> Resolving -> Clearing -> Dropping -> Refilling
//!                          ^                                    |
//!                          +------------------------------------+
//!
//! Each loop iteration records a [`CascadeStep`] so the animation layer can
//! replay what happened; collaborators consume the event queue after every
//! call. The engine never blocks on presentation - only the input layer
//! must wait for `BoardSettled` before issuing the next swap.

use crate::core::board::{Board, CellMove};
use crate::core::generator::{generate, GenerateStats};
use crate::core::matches::{find_matches, MatchGroup};
use crate::core::policy::SpawnPolicy;
use crate::core::rng::SimpleRng;
use crate::core::specials::{activation_targets, special_for_group};
use crate::types::{
    Coordinate, Orientation, TokenKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
    MAX_CASCADE_ITERATIONS,
};

/// Resolver phase. `Idle` is the only state that accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Swapping,
    Resolving,
    Clearing,
    Dropping,
    Refilling,
}

/// Why a swap request bounced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    OutOfBounds,
    NotAdjacent,
    NoResultingMatch,
    EngineBusy,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "out_of_bounds",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::NoResultingMatch => "no_resulting_match",
            SwapRejection::EngineBusy => "engine_busy",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "coordinate outside board dimensions",
            SwapRejection::NotAdjacent => "cells are not orthogonally adjacent",
            SwapRejection::NoResultingMatch => "swap would not create a match",
            SwapRejection::EngineBusy => "a resolve cycle is already active",
        }
    }
}

/// Result of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Accepted {
        /// Clear/drop/refill iterations the swap triggered
        cascades: u32,
        /// Distinct cells cleared across the whole cycle
        tiles_cleared: u32,
    },
    Rejected(SwapRejection),
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted { .. })
    }
}

/// Why a special-token activation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateError {
    OutOfBounds,
    NotSpecial,
    EngineBusy,
}

/// Signals pushed to collaborators, in firing order.
/// The integration layer drains these after each engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SwapAccepted {
        a: Coordinate,
        b: Coordinate,
    },
    SwapRejected {
        a: Coordinate,
        b: Coordinate,
        reason: SwapRejection,
    },
    /// Fired once per Clearing phase with the distinct cleared-cell count
    TilesCleared {
        count: u32,
    },
    SpecialSpawned {
        at: Coordinate,
        kind: TokenKind,
    },
    SpecialActivated {
        at: Coordinate,
        kind: TokenKind,
        affected: u32,
    },
    /// One externally visible player move fully resolved
    BoardSettled {
        cascades: u32,
    },
    BoardReset,
    /// Generator hit its retry cap; the board is best-effort
    GenerationExhausted {
        residual: u32,
    },
}

/// What one resolve-loop iteration did, for the animation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Cells emptied this iteration (pivot cells that received a special
    /// token are included; they were claimed by the match)
    pub cleared: Vec<Coordinate>,
    /// Special tokens placed at pivots this iteration
    pub specials_spawned: Vec<(Coordinate, TokenKind)>,
    /// Gravity moves, per column left to right, top to bottom
    pub moves: Vec<CellMove>,
    /// Newly spawned tokens with their landing cells
    pub spawned: Vec<(Coordinate, TokenKind)>,
}

/// Engine construction parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub seed: u32,
    /// The order collaborator's required kinds; empty means no restriction
    pub required_kinds: Vec<TokenKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            required_kinds: Vec::new(),
        }
    }
}

/// The match-3 engine: board + policy + resolver state machine
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    policy: SpawnPolicy,
    rng: SimpleRng,
    phase: Phase,
    events: Vec<EngineEvent>,
    steps: Vec<CascadeStep>,
    moves_resolved: u32,
    /// (source, destination) of the swap driving the current cycle;
    /// consumed by pivot selection in the first Clearing phase only
    swap_hint: Option<(Coordinate, Coordinate)>,
}

impl Engine {
    /// Create an engine with a freshly generated board
    pub fn new(config: EngineConfig) -> Self {
        let policy = SpawnPolicy::from_required(&config.required_kinds);
        let mut rng = SimpleRng::new(config.seed);
        let (board, stats) = generate(config.width, config.height, &policy, &mut rng);

        let mut engine = Self {
            board,
            policy,
            rng,
            phase: Phase::Idle,
            events: Vec::new(),
            steps: Vec::new(),
            moves_resolved: 0,
            swap_hint: None,
        };
        engine.emit_generation_events(stats);
        engine
    }

    /// Create an engine over a pre-made layout (saved levels, scenarios).
    /// The layout is taken as-is; no initial resolution runs.
    pub fn from_board(board: Board, seed: u32, required_kinds: &[TokenKind]) -> Self {
        Self {
            board,
            policy: SpawnPolicy::from_required(required_kinds),
            rng: SimpleRng::new(seed),
            phase: Phase::Idle,
            events: Vec::new(),
            steps: Vec::new(),
            moves_resolved: 0,
            swap_hint: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The input-lock contract: callers must not issue swaps while true
    pub fn is_resolving(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Fully resolved player moves since construction or reset
    pub fn moves_resolved(&self) -> u32 {
        self.moves_resolved
    }

    /// Current RNG state (for restarting a session with the same sequence)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Cascade steps recorded by the most recent resolve cycle
    pub fn last_steps(&self) -> &[CascadeStep] {
        &self.steps
    }

    /// Take all pending events, preserving firing order
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Regenerate the board for a new order, refreshing the spawn policy
    /// from the collaborator's requirement set. Ignored (returns false)
    /// while a resolve cycle is active.
    pub fn reset_board(&mut self, required_kinds: &[TokenKind]) -> bool {
        if self.is_resolving() {
            return false;
        }
        self.policy = SpawnPolicy::from_required(required_kinds);
        let (board, stats) = generate(
            self.board.width(),
            self.board.height(),
            &self.policy,
            &mut self.rng,
        );
        self.board = board;
        self.steps.clear();
        self.moves_resolved = 0;
        self.emit_generation_events(stats);
        true
    }

    fn emit_generation_events(&mut self, stats: GenerateStats) {
        self.events.push(EngineEvent::BoardReset);
        if stats.exhausted() {
            self.events.push(EngineEvent::GenerationExhausted {
                residual: stats.residual_cells as u32,
            });
        }
    }

    /// Attempt to swap two adjacent cells. On acceptance the full cascade
    /// resolves before this returns; on rejection the board is unchanged.
    pub fn request_swap(&mut self, a: Coordinate, b: Coordinate) -> SwapOutcome {
        if let Some(reason) = self.validate_swap(a, b) {
            self.events.push(EngineEvent::SwapRejected { a, b, reason });
            return SwapOutcome::Rejected(reason);
        }

        self.phase = Phase::Swapping;
        self.board.swap(a, b);

        if find_matches(&self.board).is_empty() {
            // Bounce back: revert the tentative swap
            self.board.swap(a, b);
            self.phase = Phase::Idle;
            let reason = SwapRejection::NoResultingMatch;
            self.events.push(EngineEvent::SwapRejected { a, b, reason });
            return SwapOutcome::Rejected(reason);
        }

        self.events.push(EngineEvent::SwapAccepted { a, b });
        self.swap_hint = Some((a, b));
        self.steps.clear();

        let (cascades, tiles_cleared) = self.run_cascades();
        self.settle(cascades);

        SwapOutcome::Accepted {
            cascades,
            tiles_cleared,
        }
    }

    fn validate_swap(&self, a: Coordinate, b: Coordinate) -> Option<SwapRejection> {
        if self.is_resolving() {
            return Some(SwapRejection::EngineBusy);
        }
        if !self.board.in_bounds(a.x, a.y) || !self.board.in_bounds(b.x, b.y) {
            return Some(SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Some(SwapRejection::NotAdjacent);
        }
        None
    }

    /// Activate the special token at `at` (a tap, distinct from matching).
    /// Returns the affected coordinates; the board is cleared at those
    /// cells and the usual drop/refill/resolve cycle runs.
    pub fn activate_special(&mut self, at: Coordinate) -> Result<Vec<Coordinate>, ActivateError> {
        if self.is_resolving() {
            return Err(ActivateError::EngineBusy);
        }
        let kind = match self.board.get(at.x, at.y) {
            None => return Err(ActivateError::OutOfBounds),
            Some(None) => return Err(ActivateError::NotSpecial),
            Some(Some(kind)) if !kind.is_special() => return Err(ActivateError::NotSpecial),
            Some(Some(kind)) => kind,
        };

        // Rainbow picks its victim kind at activation time
        let rainbow_target = if kind == TokenKind::Rainbow {
            self.board.most_frequent_ordinary()
        } else {
            None
        };

        self.phase = Phase::Clearing;
        let targets = activation_targets(&self.board, at, kind, rainbow_target);
        for &coord in &targets {
            self.board.set(coord.x, coord.y, None);
        }
        self.events.push(EngineEvent::SpecialActivated {
            at,
            kind,
            affected: targets.len() as u32,
        });
        self.events.push(EngineEvent::TilesCleared {
            count: targets.len() as u32,
        });

        self.steps.clear();
        let (moves, spawned) = self.drop_and_refill();
        self.steps.push(CascadeStep {
            cleared: targets.clone(),
            specials_spawned: Vec::new(),
            moves,
            spawned,
        });

        let (cascades, _) = self.run_cascades();
        self.settle(cascades + 1);

        Ok(targets)
    }

    /// The Resolving -> Clearing -> Dropping -> Refilling loop.
    /// Returns (iterations run, distinct cells cleared in total).
    fn run_cascades(&mut self) -> (u32, u32) {
        let mut cascades = 0u32;
        let mut total_cleared = 0u32;

        loop {
            self.phase = Phase::Resolving;
            let groups = find_matches(&self.board);
            if groups.is_empty() {
                break;
            }

            cascades += 1;
            debug_assert!(
                cascades < MAX_CASCADE_ITERATIONS,
                "cascade loop failed to converge"
            );
            if cascades >= MAX_CASCADE_ITERATIONS {
                break;
            }

            self.phase = Phase::Clearing;
            let (cleared, specials) = self.clear_groups(groups);
            total_cleared += cleared.len() as u32;

            let (moves, spawned) = self.drop_and_refill();

            self.steps.push(CascadeStep {
                cleared,
                specials_spawned: specials,
                moves,
                spawned,
            });

            // The swap pivot applies to the first iteration only
            self.swap_hint = None;
        }

        (cascades, total_cleared)
    }

    /// Clear all matched cells, spawning special tokens at pivots.
    /// Overlapping groups are unioned before classification; every distinct
    /// cell is cleared exactly once.
    fn clear_groups(
        &mut self,
        groups: Vec<MatchGroup>,
    ) -> (Vec<Coordinate>, Vec<(Coordinate, TokenKind)>) {
        let clusters = merge_groups(groups);

        let mut cleared: Vec<Coordinate> = Vec::new();
        let mut specials: Vec<(Coordinate, TokenKind)> = Vec::new();

        for cluster in &clusters {
            let pivot_and_kind = special_for_group(cluster.cells.len(), cluster.orientation())
                .map(|kind| (self.pick_pivot(cluster), kind));

            for &coord in &cluster.cells {
                match pivot_and_kind {
                    Some((pivot, kind)) if coord == pivot => {
                        self.board.set(coord.x, coord.y, Some(kind));
                    }
                    _ => {
                        self.board.set(coord.x, coord.y, None);
                    }
                }
                cleared.push(coord);
            }
            if let Some((pivot, kind)) = pivot_and_kind {
                specials.push((pivot, kind));
            }
        }

        self.events.push(EngineEvent::TilesCleared {
            count: cleared.len() as u32,
        });
        for &(at, kind) in &specials {
            self.events.push(EngineEvent::SpecialSpawned { at, kind });
        }

        (cleared, specials)
    }

    /// Pivot: the swap destination when it lies within the cluster, then
    /// the swap source, then the cluster's first coordinate.
    fn pick_pivot(&self, cluster: &Cluster) -> Coordinate {
        if let Some((src, dst)) = self.swap_hint {
            if cluster.cells.contains(&dst) {
                return dst;
            }
            if cluster.cells.contains(&src) {
                return src;
            }
        }
        cluster.cells[0]
    }

    /// Dropping then Refilling, per column left to right
    fn drop_and_refill(&mut self) -> (Vec<CellMove>, Vec<(Coordinate, TokenKind)>) {
        self.phase = Phase::Dropping;
        let mut moves = Vec::new();
        for x in 0..self.board.width() as i8 {
            moves.extend(self.board.compact_column(x));
        }

        self.phase = Phase::Refilling;
        let mut spawned = Vec::new();
        for x in 0..self.board.width() as i8 {
            for y in (0..self.board.height() as i8).rev() {
                if self.board.is_empty_cell(x, y) {
                    let kind = self.policy.spawn_kind(&mut self.rng);
                    self.board.set(x, y, Some(kind));
                    spawned.push((Coordinate::new(x, y), kind));
                }
            }
        }
        (moves, spawned)
    }

    /// Return to Idle and signal that one player move fully resolved
    fn settle(&mut self, cascades: u32) {
        self.phase = Phase::Idle;
        self.swap_hint = None;
        self.moves_resolved = self.moves_resolved.wrapping_add(1);
        self.events.push(EngineEvent::BoardSettled { cascades });

        // Conservation: a settled board is fully populated
        debug_assert_eq!(
            self.board.count_occupied(),
            self.board.width() as usize * self.board.height() as usize,
            "settled board has empty cells"
        );
    }
}

/// A union of overlapping match groups, kept as distinct cells in insertion
/// order, with the axes that contributed to it
#[derive(Debug)]
struct Cluster {
    cells: Vec<Coordinate>,
    horizontal: bool,
    vertical: bool,
}

impl Cluster {
    fn orientation(&self) -> Orientation {
        match (self.horizontal, self.vertical) {
            (true, true) => Orientation::Both,
            (false, true) => Orientation::Vertical,
            // A cluster always has at least one axis
            _ => Orientation::Horizontal,
        }
    }

    fn absorb_group(&mut self, group: &MatchGroup) {
        match group.axis {
            crate::types::Axis::Horizontal => self.horizontal = true,
            crate::types::Axis::Vertical => self.vertical = true,
        }
        for &coord in &group.cells {
            if !self.cells.contains(&coord) {
                self.cells.push(coord);
            }
        }
    }
}

/// Merge groups that share any cell into clusters (disjoint cell sets)
fn merge_groups(groups: Vec<MatchGroup>) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for group in &groups {
        let hits: Vec<usize> = clusters
            .iter()
            .enumerate()
            .filter(|(_, cluster)| group.cells.iter().any(|c| cluster.cells.contains(c)))
            .map(|(i, _)| i)
            .collect();

        match hits.split_first() {
            None => {
                let mut cluster = Cluster {
                    cells: Vec::new(),
                    horizontal: false,
                    vertical: false,
                };
                cluster.absorb_group(group);
                clusters.push(cluster);
            }
            Some((&first, rest)) => {
                // Fold later hits into the first, back to front so the
                // indices stay valid
                for &i in rest.iter().rev() {
                    let absorbed = clusters.remove(i);
                    let target = &mut clusters[first];
                    target.horizontal |= absorbed.horizontal;
                    target.vertical |= absorbed.vertical;
                    for coord in absorbed.cells {
                        if !target.cells.contains(&coord) {
                            target.cells.push(coord);
                        }
                    }
                }
                clusters[first].absorb_group(group);
            }
        }
    }

    clusters
}
