use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{AxisHints, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use super::{PLOT_HEIGHT, ViewComponent, chart_frame};
use crate::color::ClassPalette;
use crate::data::model::{REGULAR_GASOLINE, Record};

const EMISSIONS_COLOR: Color32 = Color32::from_rgb(70, 130, 180);
const COST_COLOR: Color32 = Color32::from_rgb(0, 128, 0);

/// Yearly averages of the regular-gasoline subset.
#[derive(Debug, Clone, PartialEq)]
pub struct YearPoint {
    pub year: i32,
    pub avg_emissions: f64,
    /// Mean cost of driving 100 km.
    pub avg_cost: f64,
}

/// Restrict to regular gasoline, group by year ascending and average.
pub fn yearly_averages(records: &[&Record]) -> Vec<YearPoint> {
    let mut by_year: BTreeMap<i32, (f64, f64, usize)> = BTreeMap::new();
    for r in records.iter().filter(|r| r.fuel == REGULAR_GASOLINE) {
        let entry = by_year.entry(r.year).or_insert((0.0, 0.0, 0));
        entry.0 += r.emissions;
        entry.1 += r.trip_cost();
        entry.2 += 1;
    }
    by_year
        .into_iter()
        .map(|(year, (emissions, cost, n))| YearPoint {
            year,
            avg_emissions: emissions / n as f64,
            avg_cost: cost / n as f64,
        })
        .collect()
}

/// Factor mapping cost values onto the emissions axis so both series share
/// one plot. The right-hand axis divides it back out.
fn cost_scale(points: &[YearPoint]) -> f64 {
    let max_emissions = points.iter().map(|p| p.avg_emissions).fold(0.0, f64::max);
    let max_cost = points.iter().map(|p| p.avg_cost).fold(0.0, f64::max);
    if max_cost > 0.0 && max_emissions > 0.0 {
        max_emissions / max_cost
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Emissions and cost per year (dual axis)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LineChart {
    points: Vec<YearPoint>,
}

impl LineChart {
    pub const TITLE: &'static str = "CO2 Emissions and Cost for Gasoline Vehicles";

    pub fn points(&self) -> &[YearPoint] {
        &self.points
    }
}

impl ViewComponent for LineChart {
    fn title(&self) -> &'static str {
        Self::TITLE
    }

    fn render_update(&mut self, records: &[&Record]) {
        self.points = yearly_averages(records);
    }

    fn show(&self, ui: &mut Ui, _palette: &ClassPalette) {
        chart_frame(ui, Self::TITLE, self.points.is_empty(), |ui: &mut Ui| {
            let scale = cost_scale(&self.points);

            let emissions: PlotPoints = self
                .points
                .iter()
                .map(|p| [p.year as f64, p.avg_emissions])
                .collect();
            let emission_marks: PlotPoints = self
                .points
                .iter()
                .map(|p| [p.year as f64, p.avg_emissions])
                .collect();
            let cost: PlotPoints = self
                .points
                .iter()
                .map(|p| [p.year as f64, p.avg_cost * scale])
                .collect();
            let cost_marks: PlotPoints = self
                .points
                .iter()
                .map(|p| [p.year as f64, p.avg_cost * scale])
                .collect();

            let axes = vec![
                AxisHints::new_y().label("CO2 Emissions (g/km)"),
                AxisHints::new_y()
                    .label("Cost (Dollars per 100km)")
                    .placement(HPlacement::Right)
                    .formatter(move |mark, _range| format!("{:.2}", mark.value / scale)),
            ];

            Plot::new("line_chart")
                .height(PLOT_HEIGHT)
                .legend(Legend::default())
                .x_axis_label("Year")
                .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
                .custom_y_axes(axes)
                .include_y(0.0)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .label_formatter(move |name, value| {
                    let year = value.x.round();
                    match name {
                        "Avg Emissions" => format!("Year: {year}\nAvg Emissions: {:.2} g/km", value.y),
                        "Cost" => format!("Year: {year}\nCost: {:.2}$", value.y / scale),
                        _ => String::new(),
                    }
                })
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(emissions)
                            .name("Avg Emissions")
                            .color(EMISSIONS_COLOR)
                            .width(1.5),
                    );
                    plot_ui.points(
                        Points::new(emission_marks)
                            .name("Avg Emissions")
                            .color(EMISSIONS_COLOR)
                            .radius(4.0),
                    );
                    plot_ui.line(Line::new(cost).name("Cost").color(COST_COLOR).width(1.5));
                    plot_ui.points(
                        Points::new(cost_marks)
                            .name("Cost")
                            .color(COST_COLOR)
                            .radius(4.0),
                    );
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn with_cost(mut r: Record, consumption: f64, cost: f64) -> Record {
        r.fuel_consumption = consumption;
        r.fuel_cost = cost;
        r
    }

    #[test]
    fn test_yearly_averages_only_regular_gasoline() {
        let records = vec![
            with_cost(record("Kia", "Rio", "Compact", 2016, 1.6, "X", 150.0), 7.0, 1.0),
            with_cost(record("Ford", "Focus", "Compact", 2015, 2.0, "X", 170.0), 8.0, 1.0),
            with_cost(record("Kia", "Soul", "Compact", 2016, 2.0, "X", 190.0), 9.0, 1.0),
            record("Audi", "Q7", "SUV", 2016, 3.0, "D", 400.0),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let points = yearly_averages(&refs);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].year, 2015);
        assert_eq!(points[1].year, 2016);
        assert_eq!(points[1].avg_emissions, 170.0);
        assert!((points[1].avg_cost - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_no_gasoline_means_empty_series() {
        let records = vec![record("Audi", "Q7", "SUV", 2016, 3.0, "D", 400.0)];
        let refs: Vec<&Record> = records.iter().collect();
        let mut chart = LineChart::default();
        chart.render_update(&refs);
        assert!(chart.points().is_empty());
    }

    #[test]
    fn test_cost_scale_maps_onto_emissions_range() {
        let points = vec![
            YearPoint { year: 2000, avg_emissions: 200.0, avg_cost: 0.5 },
            YearPoint { year: 2001, avg_emissions: 250.0, avg_cost: 1.0 },
        ];
        assert_eq!(cost_scale(&points), 250.0);
        assert_eq!(cost_scale(&[]), 1.0);
    }
}
