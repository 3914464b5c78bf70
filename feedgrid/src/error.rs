use alloc::string::String;

/// Fatal construction error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("column count must be positive")]
    ZeroColumns,
    #[error("estimated item height must be positive")]
    ZeroItemHeight,
    #[error("initial page limit must be positive")]
    ZeroInitialLimit,
    #[error("load-more page limit must be positive")]
    ZeroLoadMoreLimit,
}

/// A failed page fetch.
///
/// Recoverable: it is surfaced through `ListState::error` and the same page can be requested
/// again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed page response: {0}")]
    Decode(String),
    /// A well-formed payload carrying a non-zero status code.
    #[error("page request rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("page request timed out")]
    Timeout,
}

impl FetchError {
    /// `true` when the response arrived but could not be used.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Rejected { .. })
    }
}
