use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("geometry must be a mapping or string, not {actual}")]
    GeometryType { actual: &'static str },
    #[error("missing coordinate key `{0}`")]
    MissingCoordinate(&'static str),
    #[error("coordinate key `{0}` is not a number")]
    InvalidCoordinate(&'static str),
    #[error("data blob must be a valid JSON object string")]
    InvalidDataBlob,
}

impl Error {
    /// HTTP status the enclosing request should terminate with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::GeometryType { .. } | Self::InvalidCoordinate(_) | Self::InvalidDataBlob => 400,
            // An object exposing only one of lat/lng was never anticipated
            // by callers; let it surface as a server-side failure.
            Self::MissingCoordinate(_) => 500,
        }
    }
}

/// Serializable error body returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonErrorResponse {
    pub http_status: u16,
    pub message: String,
}

impl From<&Error> for JsonErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            http_status: err.http_status(),
            message: err.to_string(),
        }
    }
}
