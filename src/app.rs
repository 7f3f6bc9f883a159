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

//! Main application state and frame loop.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use eframe::egui;
use log::{info, warn};
use shorecrew_core::markers::fallback_center;
use shorecrew_core::view::{render_conditions, ConditionsPanel};
use shorecrew_core::{
    CleanupSession, ConditionsResult, DomainStore, GeoPoint, LocateError, Locator, MapAdapter,
    NoticeLevel,
};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::map::{MapAction, MapWidget};
use crate::tasks;
use crate::ui::{self, CreateEventDialog, Section, StatusBar, UiAction};

pub struct ShoreCrewApp {
    egui_ctx: egui::Context,
    config: AppConfig,
    session: CleanupSession<MapWidget>,
    locator: Arc<dyn Locator>,

    conditions: Option<ConditionsPanel>,
    conditions_rx: Option<mpsc::Receiver<ConditionsResult>>,
    conditions_cancel: CancellationToken,
    locate_rx: Option<mpsc::Receiver<Result<GeoPoint, LocateError>>>,

    create_dialog: Option<CreateEventDialog>,
    scroll_target: Option<Section>,
    status_bar: StatusBar,
    launched_at: Instant,
    first_frame_done: bool,
}

impl std::fmt::Debug for ShoreCrewApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoreCrewApp")
            .field("session", &self.session)
            .field("conditions", &self.conditions)
            .finish_non_exhaustive()
    }
}

impl ShoreCrewApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        locator: Arc<dyn Locator>,
        launched_at: Instant,
    ) -> Self {
        info!("Initializing ShoreCrew app...");
        let ctx = cc.egui_ctx.clone();

        let mut map = MapWidget::new(ctx.clone(), config.tile_url_template.clone());
        if let Err(e) = map.init(config.default_center(), config.default_zoom) {
            warn!("Continuing without embedded map: {e}");
        }

        let mut session = CleanupSession::new(DomainStore::seeded(), map);
        if let Some(e) = session.map().init_error().cloned() {
            session.notify(NoticeLevel::Warning, format!("Map unavailable: {e}"));
        }

        let conditions_cancel = CancellationToken::new();
        let conditions_rx = tasks::spawn_conditions_fetch(
            config.conditions_config(),
            conditions_cancel.clone(),
            ctx.clone(),
        );

        Self {
            egui_ctx: ctx,
            config,
            session,
            locator,
            conditions: None,
            conditions_rx: Some(conditions_rx),
            conditions_cancel,
            locate_rx: None,
            create_dialog: None,
            scroll_target: None,
            status_bar: StatusBar::new(),
            launched_at,
            first_frame_done: false,
        }
    }

    /// Pick up results from background tasks
    fn poll_tasks(&mut self) {
        if let Some(rx) = &self.conditions_rx {
            match rx.try_recv() {
                Ok(result) => {
                    if let Some(reason) = result.fallback_reason() {
                        self.session.notify(
                            NoticeLevel::Warning,
                            format!("Showing demo conditions: {reason}"),
                        );
                    }
                    self.conditions = Some(render_conditions(&result));
                    self.conditions_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => self.conditions_rx = None,
            }
        }

        if let Some(rx) = &self.locate_rx {
            match rx.try_recv() {
                Ok(result) => {
                    self.session.apply_location(result);
                    self.locate_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.session.apply_location(Err(LocateError::Lookup(
                        "location lookup stopped unexpectedly".to_string(),
                    )));
                    self.locate_rx = None;
                }
            }
        }
    }

    fn conditions_source(&self) -> &'static str {
        match (&self.conditions, &self.conditions_rx) {
            (Some(panel), _) if panel.indicator().is_some() => "conditions: demo data",
            (Some(_), _) => "conditions: live",
            (None, Some(_)) => "conditions: loading",
            (None, None) => "conditions: unavailable",
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Join(id) => {
                self.session.join(&id);
            }
            UiAction::ShowOnMap(id) => self.session.map_mut().focus_event(&id),
            UiAction::OpenCreateDialog => {
                self.create_dialog = Some(CreateEventDialog::new());
            }
            UiAction::CreateEvent { name, date } => {
                self.create_dialog = None;
                if self.session.create_event(name.as_deref(), date.as_deref()).is_none() {
                    info!("Event creation cancelled or incomplete");
                }
            }
            UiAction::Locate => {
                if self.locate_rx.is_none() {
                    self.locate_rx = Some(tasks::spawn_locate(
                        Arc::clone(&self.locator),
                        self.egui_ctx.clone(),
                    ));
                }
            }
            UiAction::RetryMap => self.retry_map(),
            UiAction::LearnMore => {
                if let Err(e) = webbrowser::open(&self.config.learn_more_url) {
                    self.session.notify(
                        NoticeLevel::Warning,
                        format!("Could not open browser: {e}"),
                    );
                }
            }
            UiAction::GetStarted => {
                self.scroll_target = Some(Section::Events);
                self.egui_ctx.request_repaint();
                self.create_dialog = Some(CreateEventDialog::new());
            }
            UiAction::ScrollTo(Section::Map) => {
                let center = self
                    .session
                    .store()
                    .user_location()
                    .unwrap_or_else(|| self.config.default_center());
                self.session
                    .map_mut()
                    .recenter(center.lat, center.lng, self.config.default_zoom);
            }
            UiAction::ScrollTo(section) => {
                self.scroll_target = Some(section);
                self.egui_ctx.request_repaint();
            }
        }
    }

    fn retry_map(&mut self) {
        // Pick up a corrected tile template without restarting
        self.config.apply_map_settings(&AppConfig::load_or_default());
        self.session
            .map_mut()
            .set_tile_template(self.config.tile_url_template.clone());

        let center = self
            .session
            .store()
            .user_location()
            .unwrap_or_else(|| self.config.default_center());
        match self.session.map_mut().init(center, self.config.default_zoom) {
            Ok(()) => {
                self.session.rerender();
                self.session.notify(NoticeLevel::Info, "Map loaded.");
            }
            Err(e) => self
                .session
                .notify(NoticeLevel::Warning, format!("Map still unavailable: {e}")),
        }
    }

    fn show_side_panel(
        &self,
        ui: &mut egui::Ui,
        target: Option<Section>,
        actions: &mut Vec<UiAction>,
    ) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let response = ui
                .scope(|ui| ui::conditions_panel::show(ui, self.conditions.as_ref()))
                .response;
            if target == Some(Section::Conditions) {
                response.scroll_to_me(Some(egui::Align::TOP));
            }
            ui.separator();

            let response = ui
                .scope(|ui| ui::crew_panel::show(ui, self.session.crew_view()))
                .response;
            if target == Some(Section::Crew) {
                response.scroll_to_me(Some(egui::Align::TOP));
            }
            ui.separator();

            let response = ui
                .scope(|ui| ui::events_panel::show(ui, self.session.events_view(), actions))
                .response;
            if target == Some(Section::Events) {
                response.scroll_to_me(Some(egui::Align::TOP));
            }
        });
    }

    fn show_map(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let (map, store, events) = self.session.map_with_views();
        let center = match store.user_location() {
            Some(location) if store.events().is_empty() => location,
            _ => fallback_center(store.events()),
        };
        match map.show(ui, events, center) {
            Some(MapAction::Join(id)) => actions.push(UiAction::Join(id)),
            Some(MapAction::Retry) => actions.push(UiAction::RetryMap),
            None => {}
        }
    }
}

impl eframe::App for ShoreCrewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks();

        let mut actions = Vec::new();
        let scroll_target = self.scroll_target.take();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui::header::show(ui, self.locate_rx.is_some(), &mut actions);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar.show(ui, self.session.notices(), self.conditions_source());
        });

        egui::SidePanel::right("side_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.show_side_panel(ui, scroll_target, &mut actions));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.show_map(ui, &mut actions));

        if let Some(dialog) = self.create_dialog.as_mut() {
            if let Some(action) = dialog.show(ctx) {
                actions.push(action);
            }
        }

        for action in actions {
            self.apply(action);
        }

        if !self.first_frame_done {
            self.first_frame_done = true;
            let elapsed = self.launched_at.elapsed();
            info!("First frame ready in {elapsed:?}");
            self.status_bar.set_startup_time(elapsed);
        }
    }
}

impl Drop for ShoreCrewApp {
    fn drop(&mut self) {
        self.conditions_cancel.cancel();
    }
}
