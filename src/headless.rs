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

//! Text-only run used by `--print`.

use std::io::{self, Write};

use log::info;
use shorecrew_core::view::{render_conditions, ConditionsPanel};
use shorecrew_core::{CleanupSession, DomainStore, MapAdapter, MarkerLayer, WeatherProvider};

use crate::config::AppConfig;

/// Seed a session, fetch conditions once and print every section
pub fn print_summary(config: &AppConfig) -> io::Result<()> {
    let mut layer = MarkerLayer::new();
    layer
        .init(config.default_center(), config.default_zoom)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let session = CleanupSession::new(DomainStore::seeded(), layer);

    let runtime = tokio::runtime::Runtime::new()?;
    let provider = WeatherProvider::new(config.conditions_config());
    let result = runtime.block_on(provider.fetch_conditions());
    info!("Conditions source: {}", if result.is_synthetic() { "synthetic" } else { "live" });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &session, &render_conditions(&result))
}

fn write_summary<W: Write>(
    out: &mut W,
    session: &CleanupSession<MarkerLayer>,
    conditions: &ConditionsPanel,
) -> io::Result<()> {
    writeln!(out, "{}", session.crew_view())?;
    writeln!(out, "{}", session.events_view())?;
    writeln!(out, "{conditions}")?;
    writeln!(out, "Map markers: {}", session.map().markers().len())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shorecrew_core::weather::{synthetic_conditions, WeatherError};
    use shorecrew_core::ConditionsResult;

    #[test]
    fn test_summary_lists_every_section() {
        let session = CleanupSession::new(DomainStore::seeded(), MarkerLayer::new());
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let result = ConditionsResult::Synthetic {
            view: synthetic_conditions(today),
            reason: WeatherError::Offline,
        };

        let mut buf = Vec::new();
        write_summary(&mut buf, &session, &render_conditions(&result)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Aisha Rahman"));
        assert!(text.contains("Events (3)"));
        assert!(text.contains("Conditions [Demo data]"));
        assert!(text.contains("Map markers: 3"));
    }
}
