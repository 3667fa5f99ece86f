use std::collections::BTreeSet;
use std::fmt;

use super::model::{Bounds, Dataset, Record, Span};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// A dropdown selection: either no restriction or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    /// Whether `value` passes this selection.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

/// The current value of every filter dimension.
///
/// Ranges are inclusive and always lie within the dataset [`Bounds`]; the
/// reducer in [`super::action`] is the only place that changes them.
/// An empty `classes` set means "no class restriction".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub years: Span<i32>,
    pub engine_sizes: Span<f64>,
    pub fuel: Choice,
    pub brand: Choice,
    pub classes: BTreeSet<String>,
}

impl FilterState {
    /// Full-range defaults: every record passes.
    pub fn unrestricted(bounds: &Bounds) -> Self {
        FilterState {
            years: bounds.years,
            engine_sizes: bounds.engine_sizes,
            fuel: Choice::All,
            brand: Choice::All,
            classes: BTreeSet::new(),
        }
    }

    /// Conjunction of the five predicates.
    pub fn matches(&self, r: &Record) -> bool {
        self.years.contains(r.year)
            && self.engine_sizes.contains(r.engine_size)
            && self.fuel.admits(&r.fuel)
            && self.brand.admits(&r.make)
            && (self.classes.is_empty() || self.classes.contains(&r.vehicle_class))
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Positions of the records passing the current filters, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view over every record.
    pub fn all(dataset: &Dataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the view against the dataset it was computed from.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> Vec<&'a Record> {
        let all = dataset.records();
        self.indices.iter().filter_map(|&i| all.get(i)).collect()
    }
}

/// Compute the view of `dataset` under `filters`.
pub fn apply(dataset: &Dataset, filters: &FilterState) -> FilteredView {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{ford_and_toyota, record};
    use proptest::prelude::*;

    fn models<'a>(view: &'a FilteredView, ds: &'a Dataset) -> Vec<&'a str> {
        view.records(ds).iter().map(|r| r.model.as_str()).collect()
    }

    fn wide_open() -> FilterState {
        FilterState {
            years: Span::new(2000, 2022),
            engine_sizes: Span::new(0.0, 5.0),
            fuel: Choice::All,
            brand: Choice::All,
            classes: BTreeSet::new(),
        }
    }

    #[test]
    fn test_year_range_keeps_only_toyota() {
        let ds = ford_and_toyota();
        let filters = FilterState {
            years: Span::new(2018, 2022),
            ..wide_open()
        };
        assert_eq!(models(&apply(&ds, &filters), &ds), vec!["Corolla"]);
    }

    #[test]
    fn test_class_selection_keeps_only_ford() {
        let ds = ford_and_toyota();
        let filters = FilterState {
            classes: BTreeSet::from(["SUV".to_string()]),
            ..wide_open()
        };
        assert_eq!(models(&apply(&ds, &filters), &ds), vec!["Escape"]);
    }

    #[test]
    fn test_disjoint_year_range_yields_empty_view() {
        let ds = ford_and_toyota();
        let filters = FilterState {
            years: Span::new(2000, 2010),
            ..wide_open()
        };
        let view = apply(&ds, &filters);
        assert!(view.is_empty());
        assert!(view.records(&ds).is_empty());
    }

    #[test]
    fn test_fuel_and_brand_choices() {
        let ds = ford_and_toyota();
        let by_fuel = FilterState {
            fuel: Choice::Only("Z".into()),
            ..wide_open()
        };
        assert_eq!(models(&apply(&ds, &by_fuel), &ds), vec!["Corolla"]);

        let by_brand = FilterState {
            brand: Choice::Only("Ford".into()),
            ..wide_open()
        };
        assert_eq!(models(&apply(&ds, &by_brand), &ds), vec!["Escape"]);

        let contradictory = FilterState {
            brand: Choice::Only("Ford".into()),
            fuel: Choice::Only("Z".into()),
            ..wide_open()
        };
        assert!(apply(&ds, &contradictory).is_empty());
    }

    #[test]
    fn test_engine_size_bounds_are_inclusive() {
        let ds = ford_and_toyota();
        let filters = FilterState {
            engine_sizes: Span::new(1.6, 2.0),
            ..wide_open()
        };
        assert_eq!(apply(&ds, &filters).len(), 2);

        let filters = FilterState {
            engine_sizes: Span::new(1.7, 2.0),
            ..wide_open()
        };
        assert_eq!(models(&apply(&ds, &filters), &ds), vec!["Escape"]);
    }

    #[test]
    fn test_unrestricted_state_admits_everything() {
        let ds = ford_and_toyota();
        let filters = FilterState::unrestricted(&ds.bounds);
        assert_eq!(apply(&ds, &filters), FilteredView::all(&ds));
    }

    // -- property tests over generated datasets --

    const CLASSES: [&str; 4] = ["SUV", "Compact", "Pickup", "Minivan"];
    const MAKES: [&str; 3] = ["Ford", "Toyota", "Kia"];
    const FUELS: [&str; 3] = ["X", "Z", "D"];

    fn arb_record() -> impl Strategy<Value = Record> {
        (0..4usize, 0..3usize, 0..3usize, 2000..=2022i32, 10..=60u32, 90.0..400.0f64).prop_map(
            |(c, m, f, year, tenths, emissions)| {
                record(
                    MAKES[m],
                    &format!("{}-{year}", MAKES[m]),
                    CLASSES[c],
                    year,
                    tenths as f64 / 10.0,
                    FUELS[f],
                    emissions,
                )
            },
        )
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        prop::collection::vec(arb_record(), 1..60)
            .prop_map(|records| Dataset::from_records(records).unwrap())
    }

    fn arb_filters() -> impl Strategy<Value = FilterState> {
        (
            2000..=2022i32,
            2000..=2022i32,
            10..=60u32,
            10..=60u32,
            prop::option::of(0..3usize),
            prop::option::of(0..3usize),
            prop::collection::btree_set(0..4usize, 0..3),
        )
            .prop_map(|(y0, y1, e0, e1, fuel, brand, classes)| FilterState {
                years: Span::new(y0, y1),
                engine_sizes: Span::new(e0 as f64 / 10.0, e1 as f64 / 10.0),
                fuel: fuel.map_or(Choice::All, |i| Choice::Only(FUELS[i].into())),
                brand: brand.map_or(Choice::All, |i| Choice::Only(MAKES[i].into())),
                classes: classes.into_iter().map(|i| CLASSES[i].to_string()).collect(),
            })
    }

    proptest! {
        #[test]
        fn prop_view_is_ordered_subset(ds in arb_dataset(), filters in arb_filters()) {
            let view = apply(&ds, &filters);
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(view.indices().iter().all(|&i| i < ds.len()));
            for r in view.records(&ds) {
                prop_assert!(filters.matches(r));
            }
        }

        #[test]
        fn prop_apply_is_idempotent(ds in arb_dataset(), filters in arb_filters()) {
            prop_assert_eq!(apply(&ds, &filters), apply(&ds, &filters));
        }

        #[test]
        fn prop_narrowing_years_never_grows(ds in arb_dataset(), filters in arb_filters(), shrink in 0..5i32) {
            let lo = (filters.years.min + shrink).min(filters.years.max);
            let hi = (filters.years.max - shrink).max(lo);
            let narrower = FilterState {
                years: Span { min: lo, max: hi },
                ..filters.clone()
            };
            prop_assert!(apply(&ds, &narrower).len() <= apply(&ds, &filters).len());
        }

        #[test]
        fn prop_adding_a_brand_never_grows(ds in arb_dataset(), filters in arb_filters(), m in 0..3usize) {
            let narrower = FilterState {
                brand: Choice::Only(MAKES[m].into()),
                ..filters.clone()
            };
            if filters.brand == Choice::All {
                prop_assert!(apply(&ds, &narrower).len() <= apply(&ds, &filters).len());
            }
        }

        #[test]
        fn prop_empty_class_set_ignores_class(ds in arb_dataset(), filters in arb_filters()) {
            let open = FilterState { classes: BTreeSet::new(), ..filters.clone() };
            let every_class = FilterState {
                classes: CLASSES.iter().map(|c| c.to_string()).collect(),
                ..filters
            };
            prop_assert_eq!(apply(&ds, &open), apply(&ds, &every_class));
        }
    }
}
