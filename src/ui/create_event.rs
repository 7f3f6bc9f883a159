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

use super::UiAction;

/// Prompt collecting a name and date for a new event
#[derive(Debug, Default)]
pub struct CreateEventDialog {
    name: String,
    date: String,
    focus_requested: bool,
}

impl CreateEventDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dialog. Returns the submission or cancellation once the user
    /// decides; the caller drops the dialog afterwards.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<UiAction> {
        let mut open = true;
        let mut result = None;

        egui::Window::new("Create cleanup event")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("The event is placed at the current map center.");
                ui.add_space(6.0);

                egui::Grid::new("create_event_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Name");
                    let name = ui.add(
                        egui::TextEdit::singleline(&mut self.name).hint_text("e.g. Sunrise Sweep"),
                    );
                    if !self.focus_requested {
                        name.request_focus();
                        self.focus_requested = true;
                    }
                    ui.end_row();

                    ui.label("Date");
                    ui.add(egui::TextEdit::singleline(&mut self.date).hint_text("YYYY-MM-DD"));
                    ui.end_row();
                });

                ui.add_space(6.0);
                let submit_key = ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() || submit_key {
                        result = Some(UiAction::CreateEvent {
                            name: Some(self.name.clone()),
                            date: Some(self.date.clone()),
                        });
                    }
                    if ui.button("Cancel").clicked() {
                        result = Some(UiAction::CreateEvent { name: None, date: None });
                    }
                });
            });

        if !open {
            result = Some(UiAction::CreateEvent { name: None, date: None });
        }
        result
    }
}
