//! Stamps for in-flight fetches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tickets; only the most recently issued ticket is current.
///
/// A fetch takes a ticket before awaiting the data source and checks it afterwards.
/// Anything but the latest ticket means a newer request was issued in the meantime.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
