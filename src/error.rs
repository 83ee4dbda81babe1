use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Errors surfaced by the client.
///
/// Every failure is terminal for the call that produced it; the client
/// never retries on its own.
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint rejected the call or answered with a payload that
    /// violates the protocol.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// The HTTP exchange itself failed; passed through from the transport
    /// unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Non-success HTTP status. The body is the provider's raw error
    /// payload, kept verbatim as diagnostic detail.
    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The request-token response did not acknowledge the callback.
    #[error("oauth_callback_confirmed missing or false in: {0}")]
    CallbackUnconfirmed(String),
    #[error("response is missing {0} in: {1}")]
    MissingField(&'static str, String),
    #[error("response field {0} has invalid value: {1}")]
    InvalidField(&'static str, String),
    /// Declared-json response that does not parse as json.
    #[error("malformed json payload: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("malformed form payload: {0}")]
    MalformedForm(String),
}
