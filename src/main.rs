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

mod app;
mod config;
mod headless;
mod map;
mod tasks;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use eframe::egui;
use log::{error, info};
use mimalloc::MiMalloc;
use shorecrew_core::locate::{DisabledLocator, FixedLocator, IpLocator};
use shorecrew_core::Locator;

use app::ShoreCrewApp;
use config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "shorecrew", version, about = "Find, join and organize beach cleanups")]
struct Cli {
    /// Skip all network requests and use demo conditions
    #[arg(long)]
    offline: bool,

    /// Print crew, events and conditions to stdout instead of opening a window
    #[arg(long)]
    print: bool,

    /// Override the 4-day forecast endpoint
    #[arg(long, value_name = "URL")]
    forecast_url: Option<String>,

    /// Print the configuration file location and exit
    #[arg(long)]
    config_path: bool,

    /// Write the effective configuration to disk and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if self.offline {
            config.offline = true;
        }
        if let Some(url) = &self.forecast_url {
            config.forecast_url.clone_from(url);
        }
    }
}

fn locator_for(config: &AppConfig) -> Arc<dyn Locator> {
    if let Some(position) = config.override_location() {
        info!("Using configured location {position}");
        Arc::new(FixedLocator(position))
    } else if config.offline {
        Arc::new(DisabledLocator::new("location lookup is disabled in offline mode"))
    } else {
        Arc::new(IpLocator::default())
    }
}

fn main() -> ExitCode {
    let launched_at = Instant::now();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.config_path {
        return match AppConfig::get_config_path() {
            Ok(path) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Could not resolve configuration path: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut config = AppConfig::load_or_default();
    cli.apply(&mut config);

    if cli.init_config {
        return match config.save() {
            Ok(()) => {
                info!("Configuration written");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to write configuration: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if cli.print {
        return match headless::print_summary(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Headless run failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    info!("Starting ShoreCrew...");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("ShoreCrew"),
        ..Default::default()
    };

    let locator = locator_for(&config);
    let result = eframe::run_native(
        "ShoreCrew",
        options,
        Box::new(move |cc| Ok(Box::new(ShoreCrewApp::new(cc, config, locator, launched_at)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Window closed with error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["shorecrew", "--offline", "--forecast-url", "http://localhost/f"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(config.offline);
        assert_eq!(config.forecast_url, "http://localhost/f");
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        let cli = Cli::parse_from(["shorecrew"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_override_location_wins_over_offline() {
        let config = AppConfig {
            offline: true,
            override_latitude: Some(1.30),
            override_longitude: Some(103.90),
            ..AppConfig::default()
        };
        let position = locator_for(&config).locate().unwrap();
        assert!((position.lat - 1.30).abs() < 1e-9);
    }

    #[test]
    fn test_offline_locator_is_disabled() {
        let config = AppConfig { offline: true, ..AppConfig::default() };
        assert!(locator_for(&config).locate().is_err());
    }
}
