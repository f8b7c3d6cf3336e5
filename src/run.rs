//! Run identifiers used to cancel superseded typing sequences.
//!
//! Every sequence of typed output is scoped to a [`RunToken`]. Issuing a new
//! token makes all earlier tokens stale; suspendable operations check their
//! token after each suspension point and stop without touching the surface
//! once it has gone stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing run identifiers.
#[derive(Debug, Clone, Default)]
pub struct RunCounter {
    current: Arc<AtomicU64>,
}

impl RunCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new run, invalidating every token issued before it.
    pub fn issue(&self) -> RunToken {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Issued run {}", id);
        RunToken {
            id,
            current: Arc::clone(&self.current),
        }
    }

    /// Identifier of the latest issued run (0 before the first run)
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Cancellation token for one run.
#[derive(Debug, Clone)]
pub struct RunToken {
    id: u64,
    current: Arc<AtomicU64>,
}

impl RunToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True while no newer run has been issued.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}

impl PartialEq for RunToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.current, &other.current)
    }
}

impl Eq for RunToken {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_supersedes_previous() {
        let counter = RunCounter::new();
        assert_eq!(counter.current(), 0);

        let first = counter.issue();
        assert!(first.is_current());

        let second = counter.issue();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
        assert_eq!(counter.current(), second.id());
    }

    #[test]
    fn test_clones_share_state() {
        let counter = RunCounter::new();
        let token = counter.issue();
        let copy = token.clone();
        assert_eq!(token, copy);

        counter.clone().issue();
        assert!(!token.is_current());
        assert!(!copy.is_current());
    }

    #[test]
    fn test_tokens_from_different_counters_differ() {
        let a = RunCounter::new().issue();
        let b = RunCounter::new().issue();
        assert_eq!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
