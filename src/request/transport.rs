use thiserror::Error;

/// Raw HTTP response of a SOAP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
/// Failure to exchange a message with the remote endpoint.
pub enum TransportError {
    #[error("connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sends a SOAP envelope and returns the response.
///
/// The HTTP client is left to the caller; implementations must be usable from blocking
/// worker threads.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: &str,
        soap_action: &str,
        envelope: &str,
    ) -> Result<TransportResponse, TransportError>;
}
