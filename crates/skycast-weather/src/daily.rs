//! Per-day aggregation of the hourly time-series.
//!
//! Days are UTC calendar days and "day" means 06:00-18:00 UTC, whatever the
//! location's own timezone is.

use chrono::{NaiveDate, NaiveTime, Timelike};
use std::collections::BTreeMap;

use crate::symbols;
use crate::types::{DailyAggregate, DailyTemperature, Observation};

/// First UTC hour counted as daytime
const DAY_START_HOUR: u32 = 6;
/// First UTC hour counted as night again
const DAY_END_HOUR: u32 = 18;

/// Representative code for a day without any next-hour symbols
const DEFAULT_SYMBOL: &str = "clearsky_day";

#[derive(Debug, Default)]
struct DayBucket {
    temps: Vec<f64>,
    day_temps: Vec<f64>,
    night_temps: Vec<f64>,
    precipitation: f64,
    symbol_codes: Vec<String>,
}

impl DayBucket {
    fn push(&mut self, obs: &Observation) {
        let temp = obs.air_temperature;
        self.temps.push(temp);
        self.precipitation += obs.precipitation_amount.unwrap_or(0.0);

        if let Some(code) = obs.symbol_code.as_deref().filter(|c| !c.is_empty()) {
            self.symbol_codes.push(code.to_string());
        }

        let hour = obs.time.hour();
        if (DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
            self.day_temps.push(temp);
        } else {
            self.night_temps.push(temp);
        }
    }

    fn finish(self, date: NaiveDate) -> Option<DailyAggregate> {
        let min = self.temps.iter().copied().reduce(f64::min)?;
        let max = self.temps.iter().copied().reduce(f64::max)?;

        let symbol_code = most_frequent(&self.symbol_codes)
            .unwrap_or(DEFAULT_SYMBOL)
            .to_string();
        let info = symbols::resolve(Some(&symbol_code));

        Some(DailyAggregate {
            dt: date.and_time(NaiveTime::MIN).and_utc().timestamp(),
            date,
            temp: DailyTemperature {
                min,
                max,
                day: mean(&self.day_temps),
                night: mean(&self.night_temps),
            },
            description: info.description.into_owned(),
            icon: info.icon.to_string(),
            symbol_code,
            precipitation_amount: self.precipitation,
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Mode of `codes`. Ties go to the code that appeared first.
fn most_frequent(codes: &[String]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for code in codes {
        match counts.iter_mut().find(|(c, _)| *c == code.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((code.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (code, n) in counts {
        match best {
            Some((_, best_n)) if best_n >= n => {}
            _ => best = Some((code, n)),
        }
    }
    best.map(|(code, _)| code)
}

/// Group observations by UTC date and summarise each day.
///
/// Output is ascending by date with one entry per date present in the input.
pub fn aggregate(observations: &[Observation]) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for obs in observations {
        days.entry(obs.time.date_naive()).or_default().push(obs);
    }

    days.into_iter()
        .filter_map(|(date, bucket)| bucket.finish(date))
        .collect()
}
