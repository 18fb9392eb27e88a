use std::process::ExitCode;

use skycast_core::{AppError, Config};
use skycast_weather::{ErrorKind, WeatherService};

const USAGE: &str = "usage: skycast <city>";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{}", failure_report(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, AppError> {
    let (config, validation) = Config::load_validated()?;
    skycast_core::init(&config.logging.filter)?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let city = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if city.trim().is_empty() {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    }

    let service = WeatherService::from_config(&config.weather)
        .map_err(|e| AppError::Other(anyhow::Error::new(e)))?;

    match service.forecast_for_city(&city).await {
        Ok(forecast) => {
            let json = serde_json::to_string_pretty(&forecast)
                .map_err(|e| AppError::Other(anyhow::Error::new(e)))?;
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(match e.kind() {
                ErrorKind::ValidationFailure => ExitCode::from(2),
                ErrorKind::NotFound => ExitCode::from(3),
                ErrorKind::UpstreamFailure => ExitCode::from(4),
            })
        }
    }
}

/// The logger may not be installed yet when config loading fails, so the
/// detail goes to stderr alongside the short message
fn failure_report(e: &AppError) -> String {
    format!("{}\n{}", e.user_message(), e)
}
