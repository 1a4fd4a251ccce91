//! Spawn policy - decides which token kinds are legal to spawn
//!
//! The order collaborator reports which ingredient kinds the current order
//! requires; while a requirement set is active, spawns come only from that
//! set, which is what scales difficulty (fewer legal kinds means easier
//! matches). The same policy instance is consulted by the board generator
//! and by every refill, so the restriction is consistent across a session.
//! The set is refreshed once per board reset, never per move.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{TokenKind, ORDINARY_KINDS};

/// Maximum size of the allowed-kind set (all ordinary kinds)
pub const MAX_ALLOWED_KINDS: usize = ORDINARY_KINDS.len();

/// Decides which token kinds may spawn; never yields a special kind.
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    allowed: ArrayVec<TokenKind, MAX_ALLOWED_KINDS>,
    restricted: bool,
}

impl SpawnPolicy {
    /// Policy with no active requirement set: all ordinary kinds are legal
    pub fn unrestricted() -> Self {
        Self {
            allowed: ORDINARY_KINDS.iter().copied().collect(),
            restricted: false,
        }
    }

    /// Policy from the order collaborator's required kinds.
    /// Special kinds in the input are ignored; an effectively empty set
    /// falls back to "all ordinary kinds".
    pub fn from_required(required: &[TokenKind]) -> Self {
        let mut allowed: ArrayVec<TokenKind, MAX_ALLOWED_KINDS> = ArrayVec::new();
        for &kind in required {
            if kind.is_ordinary() && !allowed.contains(&kind) {
                allowed.push(kind);
            }
        }
        if allowed.is_empty() {
            return Self::unrestricted();
        }
        Self {
            allowed,
            restricted: true,
        }
    }

    /// Kinds currently legal to spawn
    pub fn allowed_kinds(&self) -> &[TokenKind] {
        &self.allowed
    }

    /// True when an order requirement set is narrowing spawns
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Choose a kind for a newly spawned token, uniformly over the allowed set
    pub fn spawn_kind(&self, rng: &mut SimpleRng) -> TokenKind {
        let kind = *rng.pick(&self.allowed);
        debug_assert!(kind.is_ordinary(), "policy produced a special kind");
        kind
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::unrestricted()
    }
}
