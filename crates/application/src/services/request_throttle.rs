//! Per-stream request throttling
//!
//! Leading-edge rate limiter with trailing coalescing. The first request in a
//! quiet window fires immediately; requests arriving inside the window are
//! parked as the single pending slot, each newcomer replacing the previous
//! occupant. The caller is told to drain the slot once the window expires, so
//! a burst collapses to the first and the latest request.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Spacing enforced between fired requests on one stream
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Tuning for a [`RequestThrottle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub min_interval: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

/// Verdict for one submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Execute now; the window restarts from this instant
    Fire,
    /// Parked as the pending request; drain with
    /// [`RequestThrottle::take_pending`] after `delay`
    Deferred { delay: Duration },
    /// Replaced an already-parked request; its drain is still scheduled
    Coalesced,
}

#[derive(Debug)]
struct ThrottleState<P> {
    last_fired: Option<Instant>,
    pending: Option<P>,
}

/// Leading-edge throttle with a one-slot, latest-wins pending queue
#[derive(Debug)]
pub struct RequestThrottle<P> {
    config: ThrottleConfig,
    state: Mutex<ThrottleState<P>>,
}

impl<P> RequestThrottle<P> {
    #[must_use]
    pub const fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ThrottleState {
                last_fired: None,
                pending: None,
            }),
        }
    }

    /// Submit a request, returning what to do with it
    ///
    /// A request fired after the window has lapsed also discards any request
    /// still parked from that window: the newcomer is strictly fresher.
    pub fn try_fire(&self, params: P) -> ThrottleDecision {
        let now = Instant::now();
        let mut state = self.state.lock();

        if let Some(last) = state.last_fired {
            let elapsed = now.duration_since(last);
            if elapsed < self.config.min_interval {
                let delay = self.config.min_interval - elapsed;
                return if state.pending.replace(params).is_some() {
                    ThrottleDecision::Coalesced
                } else {
                    ThrottleDecision::Deferred { delay }
                };
            }
        }

        state.last_fired = Some(now);
        state.pending = None;
        ThrottleDecision::Fire
    }

    /// Drain the pending slot, restarting the window if it was occupied
    pub fn take_pending(&self) -> Option<P> {
        let mut state = self.state.lock();
        let params = state.pending.take();
        if params.is_some() {
            state.last_fired = Some(Instant::now());
        }
        params
    }

    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.config.min_interval
    }
}
