//! Chart components and the redraw dispatcher.
//!
//! Every chart derives its own series from the records it is handed and
//! paints from that cache each frame. Charts never filter: the session
//! computes one [`FilteredView`] per interaction and the [`Dispatcher`]
//! passes that same view to every chart in order.

pub mod bar;
pub mod line;
pub mod violin;

use eframe::egui::{RichText, Ui};

use crate::color::ClassPalette;
use crate::data::filter::FilteredView;
use crate::data::model::{Dataset, Record};

/// A visual component driven by the filtered view.
pub trait ViewComponent {
    /// Short title, also used as the egui id salt.
    fn title(&self) -> &'static str;

    /// Build from the whole dataset at load time.
    fn render_initial(&mut self, dataset: &Dataset) {
        let all: Vec<&Record> = dataset.records().iter().collect();
        self.render_update(&all);
    }

    /// Rebuild derived series from a filtered set of records.
    fn render_update(&mut self, records: &[&Record]);

    /// Paint the cached series.
    fn show(&self, ui: &mut Ui, palette: &ClassPalette);
}

// ---------------------------------------------------------------------------
// Redraw dispatcher
// ---------------------------------------------------------------------------

/// Holds the charts in their fixed update order.
pub struct Dispatcher {
    components: Vec<Box<dyn ViewComponent>>,
    redraws: usize,
}

impl Default for Dispatcher {
    /// Bar, line, violin.
    fn default() -> Self {
        Self::new(vec![
            Box::new(bar::BarChart::default()),
            Box::new(line::LineChart::default()),
            Box::new(violin::ViolinChart::default()),
        ])
    }
}

impl Dispatcher {
    pub fn new(components: Vec<Box<dyn ViewComponent>>) -> Self {
        Self {
            components,
            redraws: 0,
        }
    }

    pub fn render_initial(&mut self, dataset: &Dataset) {
        for c in &mut self.components {
            c.render_initial(dataset);
        }
    }

    /// Hand one view to every component, in order.
    pub fn render_update(&mut self, dataset: &Dataset, view: &FilteredView) {
        let records = view.records(dataset);
        for c in &mut self.components {
            c.render_update(&records);
        }
        self.redraws += 1;
        log::debug!("redraw #{} with {} records", self.redraws, records.len());
    }

    /// Number of filtered redraws since load.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn components(&self) -> &[Box<dyn ViewComponent>] {
        &self.components
    }
}

/// Chart frame with a title and a placeholder when there is nothing to draw.
pub(crate) fn chart_frame(ui: &mut Ui, title: &str, empty: bool, body: impl FnOnce(&mut Ui)) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(title).strong().size(16.0));
        if empty {
            ui.add_space(24.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new("No data for the current filters").weak());
            });
            ui.add_space(24.0);
        } else {
            body(ui);
        }
    });
}

pub(crate) const PLOT_HEIGHT: f32 = 360.0;
