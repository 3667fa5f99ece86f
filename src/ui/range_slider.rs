use eframe::egui::{self, Color32, Pos2, Rangef, Sense, Stroke, Ui, Vec2};

use crate::data::handles::DualHandle;

const HANDLE_RADIUS: f32 = 9.0;
const HEIGHT: f32 = 32.0;
const MAX_WIDTH: f32 = 400.0;

/// Map a pointer x coordinate on `track` to a value within `limits`.
pub fn value_at(x: f32, track: Rangef, min: f64, max: f64) -> f64 {
    if track.span() <= 0.0 || max <= min {
        return min;
    }
    let t = ((x - track.min) / track.span()).clamp(0.0, 1.0) as f64;
    min + t * (max - min)
}

fn x_of(value: f64, track: Rangef, min: f64, max: f64) -> f32 {
    if max <= min {
        return track.min;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0) as f32;
    track.min + t * track.span()
}

/// Two-handle slider. Returns true when a handle moved this frame.
pub fn range_slider(ui: &mut Ui, handles: &mut DualHandle) -> bool {
    let width = ui.available_width().min(MAX_WIDTH);
    let (rect, response) =
        ui.allocate_exact_size(Vec2::new(width, HEIGHT), Sense::click_and_drag());

    let track = Rangef::new(rect.left() + HANDLE_RADIUS, rect.right() - HANDLE_RADIUS);
    let limits = handles.limits();

    let before = handles.handles();
    if response.dragged() || response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            handles.drag_to(value_at(pos.x, track, limits.min, limits.max));
        }
    }
    let changed = handles.handles() != before;

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let y = rect.center().y;
        let visuals = ui.visuals();

        painter.line_segment(
            [Pos2::new(track.min, y), Pos2::new(track.max, y)],
            Stroke::new(6.0, visuals.widgets.inactive.bg_fill),
        );

        let span = handles.span();
        let lo = x_of(span.min, track, limits.min, limits.max);
        let hi = x_of(span.max, track, limits.min, limits.max);
        painter.line_segment(
            [Pos2::new(lo, y), Pos2::new(hi, y)],
            Stroke::new(6.0, visuals.selection.bg_fill),
        );

        for value in handles.handles() {
            let x = x_of(value, track, limits.min, limits.max);
            painter.circle(
                Pos2::new(x, y),
                HANDLE_RADIUS,
                Color32::WHITE,
                Stroke::new(1.5, visuals.widgets.active.fg_stroke.color),
            );
        }
    }

    if changed {
        ui.ctx().request_repaint();
    }
    changed
}

/// Slider with a title and the current low/high values.
pub fn labelled_range_slider(
    ui: &mut Ui,
    title: &str,
    handles: &mut DualHandle,
    decimals: usize,
) -> bool {
    ui.strong(title);
    let changed = range_slider(ui, handles);
    let span = handles.span();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{:.*}", decimals, span.min));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(format!("{:.*}", decimals, span.max));
        });
    });
    changed
}
