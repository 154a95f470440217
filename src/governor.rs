//! Shared request-pacing governor.
//!
//! Paces and disguises every outbound search request, process-wide:
//!
//! - a sliding-window cap (at most 10 requests in any trailing 60 s)
//! - a minimum spacing of 2000 ms between consecutive requests
//! - uniform random jitter so the inter-request interval has no fixed
//!   fingerprint
//! - deterministic User-Agent rotation and probabilistic extra headers
//!
//! The governor never fails — it only delays. Callers needing a hard
//! timeout must enforce one around the call.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Maximum requests admitted within the trailing window.
const MAX_REQUESTS_PER_WINDOW: usize = 10;

/// Length of the sliding window.
const WINDOW: Duration = Duration::from_secs(60);

/// Safety margin added when waiting for the oldest entry to leave the window.
const WINDOW_MARGIN: Duration = Duration::from_secs(1);

/// Minimum spacing between consecutive admitted requests.
const MIN_SPACING: Duration = Duration::from_millis(2000);

/// Upper bound (exclusive) on random jitter, in milliseconds.
const MAX_JITTER_MS: u64 = 3000;

/// Realistic browser User-Agent strings, rotated deterministically.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Process-wide record of recently dispatched requests.
#[derive(Debug, Default)]
struct RequestLedger {
    /// When the most recent request was admitted (across all providers).
    last_request: Option<Instant>,
    /// Admission timestamps within the trailing window, oldest first.
    /// Entries older than the window are evicted lazily before each check.
    recent: VecDeque<Instant>,
    /// Total requests seen; drives User-Agent rotation.
    counter: u64,
}

impl RequestLedger {
    /// Evict entries that have aged out of the sliding window.
    fn trim(&mut self, now: Instant) {
        while let Some(oldest) = self.recent.front() {
            if now.duration_since(*oldest) >= WINDOW {
                self.recent.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Shared pacing state for all outbound search requests.
///
/// One instance per [`crate::SearchService`]; both providers route
/// every request through the same governor so the pacing budget is
/// global, not per-provider.
#[derive(Debug, Default)]
pub struct RequestGovernor {
    ledger: Mutex<RequestLedger>,
}

impl RequestGovernor {
    /// Create a governor with an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the ledger, recovering from a poisoned mutex.
    ///
    /// The ledger holds only timestamps and a counter; a panic in
    /// another caller cannot leave it logically inconsistent.
    fn ledger(&self) -> MutexGuard<'_, RequestLedger> {
        match self.ledger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Block until it is safe to dispatch one outbound request, then
    /// record the admission.
    ///
    /// Two policies are evaluated in order on every pass and their
    /// delays summed:
    ///
    /// 1. Sliding-window cap: with [`MAX_REQUESTS_PER_WINDOW`] or more
    ///    admissions in the trailing window, wait until the oldest falls
    ///    outside it (plus a 1 s margin).
    /// 2. Minimum spacing: wait out the remainder of [`MIN_SPACING`]
    ///    since the last admission.
    ///
    /// The wait is recomputed after each sleep rather than assumed,
    /// since concurrent callers may have been admitted in the interim.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut ledger = self.ledger();
                let now = Instant::now();
                ledger.trim(now);

                let mut wait = Duration::ZERO;

                if ledger.recent.len() >= MAX_REQUESTS_PER_WINDOW {
                    if let Some(oldest) = ledger.recent.front() {
                        let window_end = *oldest + WINDOW + WINDOW_MARGIN;
                        wait += window_end.saturating_duration_since(now);
                    }
                }

                if let Some(last) = ledger.last_request {
                    let since_last = now.duration_since(last);
                    if since_last < MIN_SPACING {
                        wait += MIN_SPACING - since_last;
                    }
                }

                if wait.is_zero() {
                    ledger.recent.push_back(now);
                    ledger.last_request = Some(now);
                    return;
                }
                wait
            };

            tracing::trace!(wait_ms = wait.as_millis() as u64, "request admission delayed");
            tokio::time::sleep(wait).await;
        }
    }

    /// Sleep a uniform random duration in `[0, 3000)` ms.
    ///
    /// Independent of [`Self::admit`]; called once per outbound request
    /// to break up any fixed inter-request fingerprint.
    pub async fn jitter(&self) {
        let ms = {
            use rand::Rng;
            rand::thread_rng().gen_range(0..MAX_JITTER_MS)
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Return the next User-Agent string in the rotation.
    ///
    /// Rotation is by request counter modulo the list length, so usage
    /// is spread evenly rather than randomly repeated.
    pub fn identity(&self) -> &'static str {
        let mut ledger = self.ledger();
        let index = (ledger.counter % USER_AGENTS.len() as u64) as usize;
        ledger.counter += 1;
        USER_AGENTS[index]
    }

    /// Optional headers included independently with fixed probabilities,
    /// varying the request fingerprint across calls.
    pub fn extra_headers(&self) -> Vec<(&'static str, &'static str)> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let mut headers = Vec::with_capacity(2);
        if rng.gen_bool(0.5) {
            headers.push(("DNT", "1"));
        }
        if rng.gen_bool(0.3) {
            headers.push(("Upgrade-Insecure-Requests", "1"));
        }
        headers
    }
}
