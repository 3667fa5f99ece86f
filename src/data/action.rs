use super::filter::{Choice, FilterState};
use super::model::{Bounds, Span};

// ---------------------------------------------------------------------------
// Filter actions – one per control
// ---------------------------------------------------------------------------

/// A user interaction that changes exactly one filter dimension
/// (or all of them, for [`FilterAction::Reset`]).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetYearRange(i32, i32),
    SetEngineSizeRange(f64, f64),
    SetFuelType(Choice),
    SetBrand(Choice),
    ToggleClass(String),
    Reset,
}

/// Apply `action` to `state`.
///
/// Range ends may arrive in either order and outside the dataset bounds;
/// they are ordered and clamped here so the combinator only ever sees
/// valid ranges.
pub fn reduce(state: &FilterState, action: FilterAction, bounds: &Bounds) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::SetYearRange(a, b) => {
            next.years = Span::new(a, b).clamped_to(&bounds.years);
        }
        FilterAction::SetEngineSizeRange(a, b) => {
            // NaN would slip through the comparisons in `Span`.
            if a.is_nan() || b.is_nan() {
                log::warn!("ignoring engine size range with NaN end: {a}..{b}");
                return next;
            }
            next.engine_sizes = Span::new(a, b).clamped_to(&bounds.engine_sizes);
        }
        FilterAction::SetFuelType(choice) => next.fuel = choice,
        FilterAction::SetBrand(choice) => next.brand = choice,
        FilterAction::ToggleClass(class) => {
            if !next.classes.remove(&class) {
                next.classes.insert(class);
            }
        }
        FilterAction::Reset => next = FilterState::unrestricted(bounds),
    }
    next
}
