//! Weather lookup for SkyCast
//!
//! Resolves a city with Nominatim, fetches the MET Norway forecast and
//! shapes it into current, hourly and daily views.

pub mod assemble;
pub mod daily;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod service;
pub mod symbols;
pub mod types;

pub use assemble::{assemble, assemble_with, AssembleError, AssembleOptions};
pub use error::{ErrorKind, UpstreamError, WeatherError};
pub use geocode::{LocationResolver, NominatimClient};
pub use provider::{ForecastSource, MetNoClient};
pub use service::{QueryState, WeatherService};
pub use symbols::SymbolInfo;
pub use types::*;
