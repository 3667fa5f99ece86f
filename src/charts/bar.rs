use std::collections::HashMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart as PlotBars, Plot};

use super::{PLOT_HEIGHT, ViewComponent, chart_frame};
use crate::color::ClassPalette;
use crate::data::model::Record;

/// How many models the chart ranks.
pub const TOP_N: usize = 10;

/// Mean emissions of one model in the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBar {
    pub model: String,
    pub brand: String,
    pub vehicle_class: String,
    pub emissions: f64,
}

/// Group by model, average emissions, keep the `n` highest.
///
/// Brand and class come from the first record of each model. Ties keep
/// first-seen order.
pub fn top_models(records: &[&Record], n: usize) -> Vec<ModelBar> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (&Record, f64, usize)> = HashMap::new();

    for r in records {
        groups
            .entry(r.model.as_str())
            .and_modify(|(_, sum, count)| {
                *sum += r.emissions;
                *count += 1;
            })
            .or_insert_with(|| {
                order.push(r.model.as_str());
                (*r, r.emissions, 1)
            });
    }

    let mut bars: Vec<ModelBar> = order
        .into_iter()
        .filter_map(|model| groups.get(model))
        .map(|(first, sum, count)| ModelBar {
            model: first.model.clone(),
            brand: first.make.clone(),
            vehicle_class: first.vehicle_class.clone(),
            emissions: sum / *count as f64,
        })
        .collect();

    // Stable sort keeps first-seen order among equal means.
    bars.sort_by(|a, b| b.emissions.total_cmp(&a.emissions));
    bars.truncate(n);
    bars
}

// ---------------------------------------------------------------------------
// Top models by CO2 emissions
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BarChart {
    bars: Vec<ModelBar>,
}

impl BarChart {
    pub const TITLE: &'static str = "Top Models by CO2 Emissions";

    pub fn bars(&self) -> &[ModelBar] {
        &self.bars
    }
}

impl ViewComponent for BarChart {
    fn title(&self) -> &'static str {
        Self::TITLE
    }

    fn render_update(&mut self, records: &[&Record]) {
        self.bars = top_models(records, TOP_N);
    }

    fn show(&self, ui: &mut Ui, palette: &ClassPalette) {
        chart_frame(ui, Self::TITLE, self.bars.is_empty(), |ui: &mut Ui| {
            let n = self.bars.len();
            // Highest bar on top.
            let slot = |i: usize| (n - 1 - i) as f64;

            let bars: Vec<Bar> = self
                .bars
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    Bar::new(slot(i), b.emissions)
                        .name(format!(
                            "Model: {}\nBrand: {}\nVehicle Class: {}",
                            b.model, b.brand, b.vehicle_class
                        ))
                        .fill(palette.color_for(&b.vehicle_class))
                        .stroke(Stroke::new(1.0, Color32::BLACK))
                        .width(0.7)
                })
                .collect();

            let chart = PlotBars::new(bars)
                .horizontal()
                .element_formatter(Box::new(|bar: &Bar, _chart: &PlotBars| {
                    format!("{}\nEmissions: {:.1} g/km", bar.name, bar.value)
                }));

            let labels: Vec<String> = self.bars.iter().rev().map(|b| b.model.clone()).collect();

            Plot::new("bar_chart")
                .height(PLOT_HEIGHT)
                .x_axis_label("CO2 Emissions (g/km)")
                .y_axis_label("Model")
                .include_x(0.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .y_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                        return String::new();
                    }
                    labels.get(idx as usize).cloned().unwrap_or_default()
                })
                .show(ui, |plot_ui| plot_ui.bar_chart(chart));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn test_top_models_averages_and_sorts() {
        let records = vec![
            record("Ford", "F-150", "Pickup", 2015, 5.0, "X", 300.0),
            record("Kia", "Rio", "Compact", 2015, 1.6, "X", 140.0),
            record("Ford", "F-150", "Pickup", 2016, 3.5, "X", 260.0),
            record("Audi", "Q7", "SUV", 2016, 3.0, "D", 250.0),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let bars = top_models(&refs, TOP_N);

        let names: Vec<&str> = bars.iter().map(|b| b.model.as_str()).collect();
        assert_eq!(names, vec!["F-150", "Q7", "Rio"]);
        assert_eq!(bars[0].emissions, 280.0);
        assert_eq!(bars[0].brand, "Ford");
        assert_eq!(bars[0].vehicle_class, "Pickup");
    }

    #[test]
    fn test_top_models_truncates_and_keeps_tie_order() {
        let records: Vec<Record> = (0..15)
            .map(|i| record("Kia", &format!("M{i}"), "Compact", 2015, 1.6, "X", 200.0))
            .collect();
        let refs: Vec<&Record> = records.iter().collect();
        let bars = top_models(&refs, TOP_N);
        assert_eq!(bars.len(), TOP_N);
        assert_eq!(bars[0].model, "M0");
        assert_eq!(bars[9].model, "M9");
    }

    #[test]
    fn test_empty_view_clears_bars() {
        let records = vec![record("Kia", "Rio", "Compact", 2015, 1.6, "X", 140.0)];
        let refs: Vec<&Record> = records.iter().collect();
        let mut chart = BarChart::default();
        chart.render_update(&refs);
        assert_eq!(chart.bars().len(), 1);
        chart.render_update(&[]);
        assert!(chart.bars().is_empty());
    }
}
