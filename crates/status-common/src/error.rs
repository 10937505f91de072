use thiserror::Error;

/// Every failure the status client can report.
///
/// None of these are fatal: callers log them and keep processing the next
/// event. A domain that matches no element on the page is not an error.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Inbound frame was not a `{ "domain": .., "ok": .. }` object.
    #[error("could not decode status record: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configured endpoint is not a `ws://` or `wss://` URL.
    #[error("invalid feed endpoint: {0}")]
    InvalidEndpoint(String),

    /// The socket refused a send or close.
    #[error("transport error: {0}")]
    Transport(String),

    /// The page refused a lookup or attribute write.
    #[error("document error: {0}")]
    Document(String),
}
