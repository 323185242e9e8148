//! The three independent state containers and the request bookkeeping they share.

pub mod forecast;
pub mod search;
pub mod unit;

pub use forecast::ForecastState;
pub use search::SearchState;
pub use unit::{TemperatureUnit, UnitState};

/// Lifecycle of the most recent fetch for one state slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

/// Identifies one issued fetch within a [`RequestTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Hands out increasing tokens so that only the latest fetch may settle a slot.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Make every outstanding token stale.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// Snapshot of everything the views render from.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search: SearchState,
    pub forecast: ForecastState,
    pub unit: UnitState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn invalidate_retires_outstanding_token() {
        let mut tracker = RequestTracker::default();
        let token = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(token));
    }
}
