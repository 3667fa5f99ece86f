use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{legend, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct Co2LensApp {
    pub state: AppState,
}

impl Co2LensApp {
    pub fn new(config: &Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for Co2LensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        let mut actions = Vec::new();

        // ---- Left side panel: filters ----
        if let Some(session) = self.state.session.as_mut() {
            egui::SidePanel::left("filter_panel")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    actions.extend(panels::side_panel(ui, session));
                });
        }

        // ---- Central panel: legend and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.state.session else {
                ui.centered_and_justified(|ui: &mut Ui| match &self.state.status_message {
                    Some(msg) => {
                        ui.heading(RichText::new(msg).color(egui::Color32::RED));
                    }
                    None => {
                        ui.heading("Open a dataset to begin  (File → Open…)");
                    }
                });
                return;
            };
            let palette = &self.state.palette;

            actions.extend(legend::legend(
                ui,
                &session.dataset().classes,
                &session.filters().classes,
                palette,
            ));
            ui.separator();

            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                let components = session.dispatcher().components();
                ui.columns(2, |cols| {
                    for (i, component) in components.iter().enumerate() {
                        component.show(&mut cols[i % 2], palette);
                    }
                });
            });
        });

        // Controls only emit actions; apply them after the frame's widgets.
        self.state.dispatch_all(actions);
    }
}
