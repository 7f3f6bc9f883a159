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

use std::time::Duration;

use eframe::egui;
use shorecrew_core::{Notice, NoticeLevel, Notices};

/// Notices listed in the hover history
const HISTORY_LEN: usize = 10;

/// Bottom bar with the latest notice, data source and startup timing
#[derive(Debug, Default)]
pub struct StatusBar {
    startup_time: Option<Duration>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_startup_time(&mut self, elapsed: Duration) {
        self.startup_time = Some(elapsed);
    }

    pub fn show(&self, ui: &mut egui::Ui, notices: &Notices, conditions_source: &str) {
        let (announcement, status) = visible_notices(notices);

        ui.horizontal(|ui| {
            if let Some(notice) = announcement {
                let response = notice_label(ui, notice);
                // Screen readers pick up changes to this node without focus
                ui.ctx().accesskit_node_builder(response.id, |node| {
                    node.set_live(egui::accesskit::Live::Polite);
                });
                ui.separator();
            }

            match status {
                Some(notice) => {
                    notice_label(ui, notice).on_hover_ui(|ui| notice_history(ui, notices));
                }
                None if announcement.is_none() => {
                    ui.label(egui::RichText::new("Ready").size(11.0));
                }
                None => {}
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(elapsed) = self.startup_time {
                    ui.label(
                        egui::RichText::new(format!("Loaded in {} ms", elapsed.as_millis()))
                            .color(egui::Color32::from_rgb(120, 120, 120))
                            .size(10.0)
                            .monospace(),
                    );
                    ui.separator();
                }
                ui.label(
                    egui::RichText::new(conditions_source)
                        .color(egui::Color32::from_rgb(120, 120, 120))
                        .size(10.0)
                        .monospace(),
                );
            });
        });
    }
}

/// Latest announcement, and the latest other notice if it came after it.
/// Announcements keep their own slot.
fn visible_notices(notices: &Notices) -> (Option<&Notice>, Option<&Notice>) {
    let announcement = notices.latest_announcement();
    let status = notices
        .latest()
        .filter(|n| n.level != NoticeLevel::Announcement);
    (announcement, status)
}

fn notice_style(level: NoticeLevel) -> (egui::Color32, &'static str) {
    match level {
        NoticeLevel::Warning => (egui::Color32::from_rgb(255, 200, 50), "⚠"),
        NoticeLevel::Announcement => (egui::Color32::from_rgb(100, 255, 100), "●"),
        NoticeLevel::Info => (egui::Color32::from_rgb(150, 200, 220), "ℹ"),
    }
}

fn notice_label(ui: &mut egui::Ui, notice: &Notice) -> egui::Response {
    let (color, symbol) = notice_style(notice.level);
    ui.label(
        egui::RichText::new(format!("{symbol} {}", notice.message))
            .color(color)
            .size(11.0),
    )
}

fn notice_history(ui: &mut egui::Ui, notices: &Notices) {
    for notice in notices.iter().rev().take(HISTORY_LEN) {
        let (color, symbol) = notice_style(notice.level);
        ui.label(
            egui::RichText::new(format!(
                "{} {symbol} {}",
                notice.timestamp.format("%H:%M:%S"),
                notice.message
            ))
            .color(color)
            .size(10.0)
            .monospace(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_does_not_hide_announcement() {
        let mut notices = Notices::default();
        notices.push(NoticeLevel::Announcement, "Joined Pasir Ris Mangrove Cleanup. 19 participants.");
        notices.push(NoticeLevel::Warning, "Showing demo conditions: offline");

        let (announcement, status) = visible_notices(&notices);

        assert_eq!(
            announcement.map(|n| n.message.as_str()),
            Some("Joined Pasir Ris Mangrove Cleanup. 19 participants.")
        );
        assert_eq!(status.map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn test_announcement_not_shown_twice() {
        let mut notices = Notices::default();
        notices.push(NoticeLevel::Info, "Map loaded.");
        notices.push(NoticeLevel::Announcement, "Created Dawn Patrol on 2025-08-09.");

        let (announcement, status) = visible_notices(&notices);

        assert!(announcement.is_some());
        assert!(status.is_none());
    }

    #[test]
    fn test_empty_notices() {
        let notices = Notices::default();
        let (announcement, status) = visible_notices(&notices);
        assert!(announcement.is_none());
        assert!(status.is_none());
    }
}
