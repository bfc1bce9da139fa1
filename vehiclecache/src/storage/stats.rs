//! Fetch statistics.

/// Counters for monitoring how often refreshes are coalesced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Total `fetch` calls.
    pub total_requests: u64,
    /// Calls that waited for an in-flight refresh instead of starting one.
    pub coalesced_requests: u64,
    /// Calls made to the remote source.
    pub remote_calls: u64,
    /// Remote calls that failed.
    pub failures: u64,
}

impl FetchStats {
    /// Returns the coalescing ratio (0.0 to 1.0)
    pub fn coalescing_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.coalesced_requests as f64 / self.total_requests as f64
        }
    }
}
