//! Request generations for overlapping analysis calls.
//!
//! Every analysis gets a [`RequestId`] from a monotonically increasing
//! counter. A result is applied only if its id is still the newest one
//! issued; anything older finished after a newer request started and is
//! dropped, so panels never mix fields from two symbols.

use std::fmt;

/// Identifier of one analysis request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request ids and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new id, superseding every earlier one.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// Whether `id` is the newest request issued.
    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let mut tracker = RequestTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        assert!(b > a);
        assert!(tracker.is_current(b));
    }

    #[test]
    fn only_latest_is_current() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }
}
