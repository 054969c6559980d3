//! Local credit balance tracking.
//!
//! The backend ledger is the source of truth; the client keeps a cached
//! copy that is advisory only. The cache is written exclusively from
//! authoritative backend values (balance endpoint, user stats, or the
//! `remaining_credits` field of a generate-chapter response) and is used
//! for UI gating, never for enforcement.

/// Cached view of the user's credit balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditLedger {
    cached: Option<u64>,
}

impl CreditLedger {
    /// Creates an empty ledger with no cached balance.
    #[must_use]
    pub const fn new() -> Self {
        Self { cached: None }
    }

    /// Returns the cached balance, if any. Advisory: may be stale.
    #[must_use]
    pub const fn cached(&self) -> Option<u64> {
        self.cached
    }

    /// Overwrites the cache with a fresh authoritative value.
    pub const fn apply_authoritative(&mut self, remaining: u64) {
        self.cached = Some(remaining);
    }

    /// Whether the cached balance covers `n` chapter generations.
    ///
    /// Returns `None` when no cached value exists; gating must then let
    /// the request through to the backend's authoritative check instead of
    /// assuming freshness.
    #[must_use]
    pub fn covers(&self, n: u32) -> Option<bool> {
        self.cached.map(|balance| balance >= u64::from(n))
    }
}
