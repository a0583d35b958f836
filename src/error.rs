use thiserror::Error;

/// Failures that terminate a gateway call.
///
/// Business outcomes (declines, remote exceptions) are not errors; they come
/// back as an unsuccessful [`GatewayResponse`](crate::domain::response::GatewayResponse).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
