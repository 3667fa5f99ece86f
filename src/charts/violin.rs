use eframe::egui::{Color32, Grid, Stroke, Ui};
use egui_plot::{Plot, PlotPoints, Polygon};

use super::{PLOT_HEIGHT, ViewComponent, chart_frame};
use crate::color::ClassPalette;
use crate::data::model::Record;

/// How many classes are drawn side by side.
pub const MAX_CLASSES: usize = 3;
const BANDWIDTH: f64 = 10.0;
const DENSITY_GAIN: f64 = 30.0;
/// Fraction of a category slot a violin may fill.
const SLOT_FILL: f64 = 0.9;

/// Epanechnikov kernel with the given bandwidth, scaled by [`DENSITY_GAIN`].
pub fn epanechnikov(bandwidth: f64, x: f64) -> f64 {
    let u = x / bandwidth;
    if u.abs() <= 1.0 {
        0.75 * (1.0 - u * u) / bandwidth * DENSITY_GAIN
    } else {
        0.0
    }
}

/// Kernel density of `samples` at each grid value.
pub fn kde(samples: &[f64], grid: &[f64]) -> Vec<[f64; 2]> {
    grid.iter()
        .map(|&x| {
            let density = if samples.is_empty() {
                0.0
            } else {
                samples.iter().map(|&s| epanechnikov(BANDWIDTH, x - s)).sum::<f64>()
                    / samples.len() as f64
            };
            [x, density]
        })
        .collect()
}

/// Min / max / median / mean of one class's emissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
}

impl EmissionStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        Some(EmissionStats {
            min: sorted[0],
            max: sorted[n - 1],
            median,
            mean: sorted.iter().sum::<f64>() / n as f64,
        })
    }
}

/// One violin: a class, its density curve and summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    pub vehicle_class: String,
    pub density: Vec<[f64; 2]>,
    pub stats: EmissionStats,
}

/// Densities for the first [`MAX_CLASSES`] classes of the view, in
/// first-seen order, evaluated on `0, 1, …` below the view's maximum.
pub fn distributions(records: &[&Record]) -> Vec<ClassDistribution> {
    let mut classes: Vec<&str> = Vec::new();
    for r in records {
        if classes.len() == MAX_CLASSES {
            break;
        }
        if !classes.contains(&r.vehicle_class.as_str()) {
            classes.push(&r.vehicle_class);
        }
    }

    let max = records.iter().map(|r| r.emissions).fold(0.0, f64::max);
    let grid: Vec<f64> = (0..max.ceil() as usize)
        .map(|i| i as f64)
        .filter(|&x| x < max)
        .collect();

    classes
        .into_iter()
        .filter_map(|class| {
            let values: Vec<f64> = records
                .iter()
                .filter(|r| r.vehicle_class == class)
                .map(|r| r.emissions)
                .collect();
            let stats = EmissionStats::from_values(&values)?;
            Some(ClassDistribution {
                vehicle_class: class.to_string(),
                density: kde(&values, &grid),
                stats,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution of CO2 emissions per vehicle class
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViolinChart {
    violins: Vec<ClassDistribution>,
}

impl ViolinChart {
    pub const TITLE: &'static str = "Distribution of CO2 Emissions per Vehicle Class";

    pub fn violins(&self) -> &[ClassDistribution] {
        &self.violins
    }

    /// Outline of a violin centred on `slot`, widest point filling
    /// [`SLOT_FILL`] of the slot.
    fn outline(&self, slot: usize, density: &[[f64; 2]], peak: f64) -> Vec<[f64; 2]> {
        let centre = slot as f64;
        let half = |d: f64| d / peak * SLOT_FILL / 2.0;
        let right = density.iter().map(|&[y, d]| [centre + half(d), y]);
        let left = density.iter().rev().map(|&[y, d]| [centre - half(d), y]);
        right.chain(left).collect()
    }
}

impl ViewComponent for ViolinChart {
    fn title(&self) -> &'static str {
        Self::TITLE
    }

    fn render_update(&mut self, records: &[&Record]) {
        self.violins = distributions(records);
    }

    fn show(&self, ui: &mut Ui, palette: &ClassPalette) {
        chart_frame(ui, Self::TITLE, self.violins.is_empty(), |ui: &mut Ui| {
            let peak = self
                .violins
                .iter()
                .flat_map(|v| v.density.iter().map(|p| p[1]))
                .fold(0.0, f64::max);
            let labels: Vec<String> = self.violins.iter().map(|v| v.vehicle_class.clone()).collect();

            Plot::new("violin_chart")
                .height(PLOT_HEIGHT)
                .x_axis_label("Vehicle Class")
                .y_axis_label("CO2 Emissions (g/km)")
                .include_y(0.0)
                .include_x(-0.5)
                .include_x(self.violins.len() as f64 - 0.5)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                        return String::new();
                    }
                    labels.get(idx as usize).cloned().unwrap_or_default()
                })
                .show(ui, |plot_ui| {
                    if peak <= 0.0 {
                        return;
                    }
                    for (slot, v) in self.violins.iter().enumerate() {
                        let outline: PlotPoints = self.outline(slot, &v.density, peak).into();
                        plot_ui.polygon(
                            Polygon::new(outline)
                                .name(&v.vehicle_class)
                                .fill_color(palette.color_for(&v.vehicle_class))
                                .stroke(Stroke::new(1.0, Color32::BLACK)),
                        );
                    }
                });

            Grid::new("violin_stats").striped(true).show(ui, |ui: &mut Ui| {
                for header in ["Vehicle Class", "Max", "Min", "Median", "Mean"] {
                    ui.strong(header);
                }
                ui.end_row();
                for v in &self.violins {
                    ui.label(&v.vehicle_class);
                    ui.label(format!("{} g/km", v.stats.max));
                    ui.label(format!("{} g/km", v.stats.min));
                    ui.label(format!("{} g/km", v.stats.median));
                    ui.label(format!("{:.2} g/km", v.stats.mean));
                    ui.end_row();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    #[test]
    fn test_kernel_support_and_peak() {
        assert_eq!(epanechnikov(10.0, 0.0), 0.75 / 10.0 * 30.0);
        assert_eq!(epanechnikov(10.0, 10.0), 0.0);
        assert_eq!(epanechnikov(10.0, -12.0), 0.0);
        assert!(epanechnikov(10.0, 5.0) > 0.0);
    }

    #[test]
    fn test_kde_averages_kernels() {
        let d = kde(&[100.0, 100.0], &[95.0, 100.0, 120.0]);
        assert_eq!(d[0][0], 95.0);
        assert!((d[1][1] - 2.25).abs() < 1e-12);
        assert_eq!(d[2][1], 0.0);
        assert!(kde(&[], &[1.0])[0][1] == 0.0);
    }

    #[test]
    fn test_stats() {
        let s = EmissionStats::from_values(&[300.0, 100.0, 200.0, 400.0]).unwrap();
        assert_eq!(s.min, 100.0);
        assert_eq!(s.max, 400.0);
        assert_eq!(s.median, 250.0);
        assert_eq!(s.mean, 250.0);
        assert!(EmissionStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_distributions_take_first_three_classes() {
        let records = vec![
            record("A", "a", "SUV", 2015, 2.0, "X", 250.0),
            record("A", "b", "Compact", 2015, 2.0, "X", 150.0),
            record("A", "c", "SUV", 2015, 2.0, "X", 270.0),
            record("A", "d", "Pickup", 2015, 2.0, "X", 320.0),
            record("A", "e", "Minivan", 2015, 2.0, "X", 230.0),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let dists = distributions(&refs);

        let classes: Vec<&str> = dists.iter().map(|d| d.vehicle_class.as_str()).collect();
        assert_eq!(classes, vec!["SUV", "Compact", "Pickup"]);
        assert_eq!(dists[0].stats.mean, 260.0);
        // Grid spans 0..max emissions of the whole view.
        assert_eq!(dists[0].density.len(), 320);
        assert_eq!(dists[0].density.last().unwrap()[0], 319.0);
    }

    #[test]
    fn test_outline_is_mirrored() {
        let chart = ViolinChart::default();
        let density = vec![[0.0, 0.0], [1.0, 2.0], [2.0, 1.0]];
        let outline = chart.outline(1, &density, 2.0);
        assert_eq!(outline.len(), 6);
        assert!((outline[1][0] - 1.45).abs() < 1e-12);
        assert!((outline[4][0] - 0.55).abs() < 1e-12);
        assert_eq!(outline[1][1], outline[4][1]);
    }

    #[test]
    fn test_empty_view_has_no_violins() {
        let mut chart = ViolinChart::default();
        chart.render_update(&[]);
        assert!(chart.violins().is_empty());
    }
}
