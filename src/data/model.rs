use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors raised while building a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset contains no records")]
    Empty,
    #[error("record {row}: {field} is not a finite number")]
    NonFinite { row: usize, field: &'static str },
    #[error("invalid colour {value:?} for class {class:?}")]
    InvalidColor { class: String, value: String },
}

// ---------------------------------------------------------------------------
// Record – one row of the emissions table
// ---------------------------------------------------------------------------

/// One vehicle model-year entry.
///
/// Field names follow the column headers of the published fuel consumption
/// ratings table. Unknown columns are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "MAKE")]
    pub make: String,
    #[serde(rename = "MODEL")]
    pub model: String,
    #[serde(rename = "VEHICLE CLASS")]
    pub vehicle_class: String,
    #[serde(rename = "YEAR")]
    pub year: i32,
    #[serde(rename = "ENGINE SIZE")]
    pub engine_size: f64,
    /// Single-character fuel code, see [`fuel_label`].
    #[serde(rename = "FUEL")]
    pub fuel: String,
    /// CO2 emissions in g/km.
    #[serde(rename = "EMISSIONS")]
    pub emissions: f64,
    /// Litres per 100 km.
    #[serde(rename = "FUEL CONSUMPTION")]
    pub fuel_consumption: f64,
    /// Price per litre.
    #[serde(rename = "FUEL COST")]
    pub fuel_cost: f64,
}

impl Record {
    /// Cost of driving 100 km.
    pub fn trip_cost(&self) -> f64 {
        self.fuel_consumption * self.fuel_cost / 100.0
    }
}

/// Human-readable name of a fuel code. Unknown codes are returned verbatim.
pub fn fuel_label(code: &str) -> &str {
    match code {
        "X" => "Regular Gasoline",
        "Z" => "Premium Gasoline",
        "D" => "Diesel",
        "E" => "Ethanol (E85)",
        "N" => "Natural Gas",
        other => other,
    }
}

/// Fuel code of regular gasoline, the series shown by the line chart.
pub const REGULAR_GASOLINE: &str = "X";

// ---------------------------------------------------------------------------
// Span – an inclusive, ordered [min, max] interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    /// Build a span from two ends in any order.
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Span { min: b, max: a }
        } else {
            Span { min: a, max: b }
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamp a single value into the span.
    pub fn clamp_value(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamp both ends into `outer`.
    pub fn clamped_to(&self, outer: &Span<T>) -> Self {
        Span {
            min: outer.clamp_value(self.min),
            max: outer.clamp_value(self.max),
        }
    }

    /// Whether `self` lies entirely inside `outer`.
    pub fn within(&self, outer: &Span<T>) -> bool {
        outer.contains(self.min) && outer.contains(self.max)
    }
}

impl<T: fmt::Display> fmt::Display for Span<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.min, self.max)
    }
}

/// Observed extents of the numeric filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub years: Span<i32>,
    pub engine_sizes: Span<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable loaded dataset with pre-computed domains.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    pub bounds: Bounds,
    /// Distinct fuel codes, sorted.
    pub fuels: Vec<String>,
    /// Distinct makes, sorted.
    pub makes: Vec<String>,
    /// Distinct vehicle classes in first-seen order.
    pub classes: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its domains. Fails on an empty table or a
    /// non-finite numeric field, since the ranges would be undefined.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        let first = records.first().ok_or(DataError::Empty)?;

        let mut years = Span::new(first.year, first.year);
        let mut engine_sizes = Span::new(first.engine_size, first.engine_size);
        let mut fuels = BTreeSet::new();
        let mut makes = BTreeSet::new();
        let mut classes: Vec<String> = Vec::new();

        for (row, r) in records.iter().enumerate() {
            for (field, value) in [
                ("ENGINE SIZE", r.engine_size),
                ("EMISSIONS", r.emissions),
                ("FUEL CONSUMPTION", r.fuel_consumption),
                ("FUEL COST", r.fuel_cost),
            ] {
                if !value.is_finite() {
                    return Err(DataError::NonFinite { row, field });
                }
            }

            years = Span::new(years.min.min(r.year), years.max.max(r.year));
            engine_sizes = Span::new(
                engine_sizes.min.min(r.engine_size),
                engine_sizes.max.max(r.engine_size),
            );
            fuels.insert(r.fuel.clone());
            makes.insert(r.make.clone());
            if !classes.contains(&r.vehicle_class) {
                classes.push(r.vehicle_class.clone());
            }
        }

        Ok(Dataset {
            records,
            bounds: Bounds {
                years,
                engine_sizes,
            },
            fuels: fuels.into_iter().collect(),
            makes: makes.into_iter().collect(),
            classes,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty. Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
