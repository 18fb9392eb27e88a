//! MET Norway symbol codes mapped to descriptions and icon ids.
//!
//! Icon ids follow the `NNd` / `NNn` day/night scheme, so a presentation
//! layer can pick artwork without knowing the provider's codes.

use serde::Serialize;
use std::borrow::Cow;

/// Icon used for missing and unrecognised codes
pub const FALLBACK_ICON: &str = "04d";

/// Description used when no code is available
pub const MISSING_DESCRIPTION: &str = "N/A";

/// Resolved description and icon for a symbol code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub description: Cow<'static, str>,
    pub icon: &'static str,
}

/// Description and icon for a known code, `None` for anything else
fn lookup(code: &str) -> Option<(&'static str, &'static str)> {
    let entry = match code {
        "clearsky_day" => ("Clear sky", "01d"),
        "clearsky_night" => ("Clear sky", "01n"),
        "fair_day" => ("Fair", "02d"),
        "fair_night" => ("Fair", "02n"),
        "partlycloudy_day" => ("Partly cloudy", "03d"),
        "partlycloudy_night" => ("Partly cloudy", "03n"),
        "cloudy" => ("Cloudy", "04d"),
        "lightrainshowers_day" => ("Light rain showers", "09d"),
        "lightrainshowers_night" => ("Light rain showers", "09n"),
        "rainshowers_day" => ("Rain showers", "09d"),
        "rainshowers_night" => ("Rain showers", "09n"),
        "heavyrainshowers_day" => ("Heavy rain showers", "09d"),
        "heavyrainshowers_night" => ("Heavy rain showers", "09n"),
        "lightrain" => ("Light rain", "10d"),
        "rain" => ("Rain", "10d"),
        "heavyrain" => ("Heavy rain", "10d"),
        "lightrainandthunder" => ("Light rain with thunder", "11d"),
        "rainandthunder" => ("Rain with thunder", "11d"),
        "heavyrainandthunder" => ("Heavy rain with thunder", "11d"),
        "lightsnowshowers_day" => ("Light snow showers", "13d"),
        "lightsnowshowers_night" => ("Light snow showers", "13n"),
        "snowshowers_day" => ("Snow showers", "13d"),
        "snowshowers_night" => ("Snow showers", "13n"),
        "heavysnowshowers_day" => ("Heavy snow showers", "13d"),
        "heavysnowshowers_night" => ("Heavy snow showers", "13n"),
        "lightsnow" => ("Light snow", "13d"),
        "snow" => ("Snow", "13d"),
        "heavysnow" => ("Heavy snow", "13d"),
        "fog" => ("Fog", "50d"),
        _ => return None,
    };
    Some(entry)
}

/// Resolve a symbol code. Never fails.
///
/// Unknown codes are described by the code itself with underscores turned
/// into spaces.
pub fn resolve(code: Option<&str>) -> SymbolInfo {
    let code = match code {
        Some(c) if !c.is_empty() => c,
        _ => {
            return SymbolInfo {
                description: Cow::Borrowed(MISSING_DESCRIPTION),
                icon: FALLBACK_ICON,
            }
        }
    };

    match lookup(code) {
        Some((description, icon)) => SymbolInfo {
            description: Cow::Borrowed(description),
            icon,
        },
        None => SymbolInfo {
            description: Cow::Owned(code.replace('_', " ")),
            icon: FALLBACK_ICON,
        },
    }
}
