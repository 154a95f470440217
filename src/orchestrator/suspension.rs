//! Suspension state machine for the primary provider.
//!
//! The primary provider carries a cooldown state: each failure (or soft
//! block) suspends it for an exponentially growing window, and each
//! success while active forgives the past entirely. Reactivation is
//! lazy — re-evaluated at the start of every call, no background timer.
//!
//! ```text
//! ┌────────┐  failure / soft block   ┌─────────────────────┐
//! │ Active ├────────────────────────►│ Suspended(until, n) │
//! └───▲────┘                         └──────────┬──────────┘
//!     │  now >= until (checked per call)        │
//!     └────────────────────────────────────────┘
//! ```
//!
//! Backoff keeps a blocking upstream from being hammered; the cap
//! bounds the blackout window so the primary is retried periodically
//! rather than abandoned permanently.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Cap on the backoff multiplier: `min(2^(count-1), 6)`.
const MAX_BACKOFF_MULTIPLIER: u32 = 6;

/// Compute the suspension duration for the given failure count.
///
/// `duration = base * min(2^(count-1), 6)` — with the default 20-minute
/// base the ladder runs 20, 40, 80, 120, 120, 120, … minutes.
pub fn suspension_duration(base: Duration, count: u32) -> Duration {
    let multiplier = 2u32
        .saturating_pow(count.saturating_sub(1))
        .min(MAX_BACKOFF_MULTIPLIER);
    base * multiplier
}

#[derive(Debug, Default)]
struct SuspensionState {
    /// The primary is unusable while the current time is before this.
    suspended_until: Option<Instant>,
    /// Suspension events since the last successful primary call.
    count: u32,
}

/// Mutex-guarded suspension state shared by every concurrent call.
///
/// All transitions are serialized read-modify-write operations so two
/// concurrent calls cannot double-increment the count.
#[derive(Debug)]
pub struct Suspension {
    base: Duration,
    state: Mutex<SuspensionState>,
}

impl Suspension {
    /// Create an active (unsuspended) state with the given backoff base.
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            state: Mutex::new(SuspensionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SuspensionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Whether the primary may be attempted right now.
    ///
    /// A suspension whose window has elapsed counts as active — the
    /// implicit `Suspended → Active` transition is re-evaluated here on
    /// every call.
    pub fn primary_available(&self) -> bool {
        let state = self.state();
        match state.suspended_until {
            Some(until) => Instant::now() >= until,
            None => true,
        }
    }

    /// Record a successful primary call: a working primary forgives
    /// past failures. Resets the count and clears any elapsed window.
    pub fn record_success(&self) {
        let mut state = self.state();
        if state.count > 0 {
            tracing::debug!(
                prior_failures = state.count,
                "primary recovered, resetting suspension count"
            );
        }
        state.count = 0;
        state.suspended_until = None;
    }

    /// Record a primary failure: increments the count and opens a new
    /// suspension window derived from it.
    ///
    /// Returns the new count and window duration for diagnostics.
    pub fn record_failure(&self) -> (u32, Duration) {
        let mut state = self.state();
        state.count += 1;
        let duration = suspension_duration(self.base, state.count);
        state.suspended_until = Some(Instant::now() + duration);
        (state.count, duration)
    }

    /// Current failure count (diagnostics and tests).
    pub fn failure_count(&self) -> u32 {
        self.state().count
    }
}
