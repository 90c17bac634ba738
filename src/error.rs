use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvokerError {
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Transport fault: {0}")]
    TransportFault(String),

    #[error("Remote rejected request with status {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for InvokerError {
    fn from(e: reqwest::Error) -> Self {
        InvokerError::TransportFault(e.to_string())
    }
}

impl From<std::io::Error> for InvokerError {
    fn from(e: std::io::Error) -> Self {
        InvokerError::TransportFault(e.to_string())
    }
}

impl From<serde_json::Error> for InvokerError {
    fn from(e: serde_json::Error) -> Self {
        InvokerError::MalformedResponse(e.to_string())
    }
}
