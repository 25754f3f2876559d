use thiserror::Error;

/// Error type shared by the discovery crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog query could not be executed or its row stream failed.
    #[error("metadata fetch failed: {0}")]
    Fetch(String),
    /// A catalog row could not be mapped onto the relationship model.
    #[error("metadata decode failed: {0}")]
    Decode(String),
    /// The caller cancelled the discovery call.
    #[error("discovery cancelled")]
    Cancelled,
    /// The discovery context deadline elapsed before the read completed.
    #[error("discovery deadline exceeded")]
    DeadlineExceeded,
    /// Table and index metadata do not describe the same schema.
    #[error("inconsistent metadata: {0}")]
    Inconsistent(String),
}

impl Error {
    /// Whether repeating the whole discovery call may succeed.
    ///
    /// Discovery never retries on its own; this only informs the caller's policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::DeadlineExceeded)
    }
}

/// Convenience alias for results returned by the discovery crates.
pub type Result<T> = std::result::Result<T, Error>;
