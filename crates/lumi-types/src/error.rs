use thiserror::Error;

/// Errors from history and account persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}

/// Errors from the generative gateway HTTP client.
///
/// These never cross the responder boundary: the trait implementations map
/// every failure to a fixed in-character fallback before returning.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request error: {0}")]
    Request(String),

    #[error("gateway returned status {0}")]
    Status(u16),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from checkout URL construction.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("invalid checkout base URL: {0}")]
    InvalidBaseUrl(String),
}
