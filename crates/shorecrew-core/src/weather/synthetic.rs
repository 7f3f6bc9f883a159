// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deterministic stand-in data used whenever live conditions are unavailable.

use chrono::{Days, NaiveDate};

use super::{
    forecast::day_label, ConditionsView, CurrentConditions, ForecastDay, WaterConditions,
    WaveHeight, FORECAST_DAYS,
};

/// Water temperature reported by the synthetic dataset.
pub const SYNTHETIC_WATER_TEMP_C: f64 = 20.0;

const SYNTHETIC_SUMMARIES: [&str; 4] = ["Partly Cloudy", "Sunny", "Light Showers", "Cloudy"];
const SYNTHETIC_HIGH_C: f64 = 31.0;
const SYNTHETIC_LOW_C: f64 = 25.0;
const SYNTHETIC_WIND: &str = "NE 10-20 km/h";

/// Build the synthetic dataset for the four days starting at `today`.
#[must_use]
pub fn synthetic_conditions(today: NaiveDate) -> ConditionsView {
    let forecast = (0..FORECAST_DAYS)
        .map(|offset| {
            let date = today
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(today);
            ForecastDay {
                label: day_label(&date.format("%Y-%m-%d").to_string()),
                summary: SYNTHETIC_SUMMARIES[offset % SYNTHETIC_SUMMARIES.len()].to_string(),
                high_c: SYNTHETIC_HIGH_C,
                low_c: SYNTHETIC_LOW_C,
            }
        })
        .collect();

    ConditionsView {
        current: CurrentConditions {
            temperature_c: (SYNTHETIC_HIGH_C + SYNTHETIC_LOW_C) / 2.0,
            summary: SYNTHETIC_SUMMARIES[0].to_string(),
            wind: SYNTHETIC_WIND.to_string(),
            humidity: None,
        },
        forecast,
        water: WaterConditions {
            temperature_c: SYNTHETIC_WATER_TEMP_C,
            wave_height: WaveHeight::Lower,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn test_synthetic_days_are_consecutive() {
        let view = synthetic_conditions(date("2025-12-30"));
        let labels: Vec<&str> = view.forecast.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Tue 30 Dec", "Wed 31 Dec", "Thu 01 Jan", "Fri 02 Jan"]);
    }

    #[test]
    fn test_synthetic_summaries_cycle() {
        let view = synthetic_conditions(date("2025-06-02"));
        let summaries: Vec<&str> = view.forecast.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, SYNTHETIC_SUMMARIES.to_vec());
    }

    #[test]
    fn test_synthetic_water_is_fixed() {
        for day in ["2025-01-01", "2025-07-15", "2026-02-28"] {
            let view = synthetic_conditions(date(day));
            assert!((view.water.temperature_c - 20.0).abs() < f64::EPSILON);
            assert_eq!(view.water.wave_height, WaveHeight::Lower);
        }
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        assert_eq!(
            synthetic_conditions(date("2025-06-02")),
            synthetic_conditions(date("2025-06-02"))
        );
    }
}
