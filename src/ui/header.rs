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

use eframe::egui;

use super::{Section, UiAction};

/// Title bar with call-to-action buttons and section navigation
pub fn show(ui: &mut egui::Ui, locating: bool, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("🌊 ShoreCrew")
                .color(egui::Color32::from_rgb(100, 180, 220))
                .size(18.0)
                .strong(),
        );
        ui.label(
            egui::RichText::new("Beach cleanups near you")
                .color(egui::Color32::from_rgb(150, 150, 150))
                .size(11.0),
        );

        ui.separator();

        for section in Section::ALL {
            if ui.selectable_label(false, section.title()).clicked() {
                actions.push(UiAction::ScrollTo(section));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Learn more").clicked() {
                actions.push(UiAction::LearnMore);
            }
            if ui.button(egui::RichText::new("Get started").strong()).clicked() {
                actions.push(UiAction::GetStarted);
            }

            let locate = ui
                .add_enabled(!locating, egui::Button::new("📍 Locate me"))
                .on_disabled_hover_text("Locating...");
            if locate.clicked() {
                actions.push(UiAction::Locate);
            }
            if locating {
                ui.spinner();
            }
        });
    });
}
