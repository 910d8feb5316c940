use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod model;

pub use client::{OsrmClient, OsrmConfig, OSRM_API_URL};

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    DecodeError(utility::polyline::DecodeError),
    /// The service answered with a geometry that is not a path.
    InvalidGeometry {
        point_count: usize,
    },
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::DecodeError(e) => {
                write!(f, "polyline decode error: {}", e)
            }
            ApiError::InvalidGeometry { point_count } => {
                write!(f, "route geometry with {} point(s) is not a path", point_count)
            }
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<utility::polyline::DecodeError> for ApiError {
    fn from(e: utility::polyline::DecodeError) -> Self {
        ApiError::DecodeError(e)
    }
}
