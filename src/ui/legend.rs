use std::collections::BTreeSet;

use eframe::egui::{Color32, Label, RichText, Sense, Ui, Vec2};

use crate::color::ClassPalette;
use crate::data::action::FilterAction;

const SWATCH: f32 = 18.0;
const OUTLINE: f32 = 2.0;

/// Clickable vehicle-class legend. Clicking a class toggles it in the
/// class filter; selected classes are drawn outlined and bold.
pub fn legend(
    ui: &mut Ui,
    classes: &[String],
    selected: &BTreeSet<String>,
    palette: &ClassPalette,
) -> Option<FilterAction> {
    let mut action = None;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for class in classes {
            let is_selected = selected.contains(class);

            let (rect, swatch) = ui.allocate_exact_size(Vec2::splat(SWATCH), Sense::click());
            let mut text = RichText::new(class);
            if is_selected {
                text = text.strong();
            }
            let label = ui.add(Label::new(text).sense(Sense::click()));

            let hovered = swatch.hovered() || label.hovered();
            if is_selected || hovered {
                ui.painter().rect_filled(rect.expand(OUTLINE), 2.0, Color32::BLACK);
            }
            ui.painter().rect_filled(rect, 2.0, palette.color_for(class));

            if swatch.clicked() || label.clicked() {
                log::debug!("legend toggled {class}");
                action = Some(FilterAction::ToggleClass(class.clone()));
            }
            ui.add_space(12.0);
        }
    });

    action
}
