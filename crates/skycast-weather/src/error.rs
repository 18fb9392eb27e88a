//! Weather lookup error types.

use skycast_core::NetworkError;
use thiserror::Error;

use crate::assemble::AssembleError;

/// Failure talking to, or making sense of, an upstream service
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("forecast response has no time-series")]
    EmptyTimeseries,

    #[error("could not assemble forecast: {0}")]
    Assemble(#[from] AssembleError),
}

/// Error classes a caller can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The city matched nothing. User-correctable.
    NotFound,
    /// An upstream service failed. Retry later.
    UpstreamFailure,
    /// The query was rejected before any request was made.
    ValidationFailure,
}

/// Error returned from a city forecast query.
///
/// The display text is the user-facing message. Upstream detail stays in
/// `source()` and never reaches the message.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    Validation,

    #[error("City \"{city}\" not found.")]
    NotFound { city: String },

    #[error("Failed to fetch weather data for {city}. Please try again later.")]
    Upstream {
        city: String,
        #[source]
        cause: UpstreamError,
    },
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation => ErrorKind::ValidationFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::UpstreamFailure,
        }
    }

    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
