use thiserror::Error;

/// A request attempt that never produced a response envelope.
///
/// Distinct from an application-level error reported inside an envelope:
/// these are surfaced when no envelope could be obtained at all. The display
/// text is exactly what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("Received unknown error while performing request")]
    Unknown,
    #[error("Received timeout while performing request")]
    Timeout,
    #[error("Received error while performing request: {0}")]
    Network(String),
    #[error("Request was aborted")]
    Aborted,
    #[error("Failed to parse request")]
    Unparsable,
}
