//! Upstream client error types.

/// Errors contacting the STCP arrivals page.
///
/// The dispatcher does not tell these apart: any of them means the upstream
/// is treated as offline.
#[derive(Debug, thiserror::Error)]
pub enum StcpError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {status}")]
    Api { status: u16 },
}
