use thiserror::Error;

/// Application-level error type for the client core.
///
/// Errors are surfaced to the embedding shell as values; none of them aborts
/// the flow that produced them, and none is retried automatically.
#[derive(Debug, Error)]
pub enum AtsError {
    /// Caught before any network call (wrong file type, empty job description,
    /// an operation attempted in the wrong flow step).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a usable response (connect failure, timeout,
    /// transport error).
    #[error("Unable to connect to the analysis service")]
    Network(#[from] reqwest::Error),

    /// The backend answered but reported failure. The message is the
    /// server-provided one and is surfaced verbatim.
    #[error("{0}")]
    Server(String),

    /// The backend answered 2xx but the payload does not match the endpoint
    /// contract. Fails fast at the boundary instead of propagating missing
    /// fields into the flow.
    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(String),

    /// Layout or document-conversion failure during export. The operation is
    /// aborted and no partial file is produced.
    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AtsError {
    /// The message shown to the user for this error.
    ///
    /// Server messages pass through verbatim; transport and contract failures
    /// collapse to generic connectivity wording.
    pub fn user_message(&self) -> String {
        match self {
            AtsError::Validation(msg) | AtsError::Server(msg) => msg.clone(),
            AtsError::Network(e) => {
                tracing::warn!("network error: {e}");
                "Unable to connect to server".to_string()
            }
            AtsError::MalformedResponse(msg) => {
                tracing::error!("malformed response: {msg}");
                "The analysis service returned an unexpected response".to_string()
            }
            AtsError::Export(msg) => format!("Export failed: {msg}"),
            AtsError::Io(e) => format!("I/O error: {e}"),
        }
    }
}
