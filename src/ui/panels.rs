use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::range_slider::labelled_range_slider;
use crate::data::action::FilterAction;
use crate::data::filter::Choice;
use crate::data::model::fuel_label;
use crate::state::{AppState, Session};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter controls. Returns the actions triggered this frame.
pub fn side_panel(ui: &mut Ui, session: &mut Session) -> Vec<FilterAction> {
    let mut actions = Vec::new();

    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Dropdowns ----
            let fuels = session.dataset().fuels.clone();
            let current_fuel = session.filters().fuel.clone();
            ui.strong("Fuel Type");
            let fuel_text = match &current_fuel {
                Choice::All => "All".to_string(),
                Choice::Only(code) => fuel_label(code).to_string(),
            };
            egui::ComboBox::from_id_salt("fuel_type")
                .selected_text(fuel_text)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(current_fuel == Choice::All, "All")
                        .clicked()
                    {
                        actions.push(FilterAction::SetFuelType(Choice::All));
                    }
                    for code in &fuels {
                        let choice = Choice::Only(code.clone());
                        if ui
                            .selectable_label(current_fuel == choice, fuel_label(code))
                            .clicked()
                        {
                            actions.push(FilterAction::SetFuelType(choice));
                        }
                    }
                });
            ui.add_space(8.0);

            let makes = session.dataset().makes.clone();
            let current_brand = session.filters().brand.clone();
            ui.strong("Brand");
            egui::ComboBox::from_id_salt("brand")
                .selected_text(current_brand.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(current_brand == Choice::All, "All")
                        .clicked()
                    {
                        actions.push(FilterAction::SetBrand(Choice::All));
                    }
                    for make in &makes {
                        let choice = Choice::Only(make.clone());
                        if ui.selectable_label(current_brand == choice, make).clicked() {
                            actions.push(FilterAction::SetBrand(choice));
                        }
                    }
                });
            ui.separator();

            // ---- Range sliders ----
            let sliders = &mut session.sliders;
            if labelled_range_slider(ui, "Year Range", &mut sliders.years, 0) {
                let span = sliders.years.whole_span();
                actions.push(FilterAction::SetYearRange(span.min, span.max));
            }
            ui.add_space(8.0);
            if labelled_range_slider(ui, "Engine Size Range", &mut sliders.engine_sizes, 1) {
                let span = sliders.engine_sizes.span();
                actions.push(FilterAction::SetEngineSizeRange(span.min, span.max));
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                actions.push(FilterAction::Reset);
            }
        });

    actions
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} records loaded, {} visible",
                session.dataset().len(),
                session.view().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open emissions data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset(&path);
    }
}
