/// Data layer: records, loading, filtering and filter mutation.
///
/// Architecture:
/// ```text
///   data.json / data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, bounds, class/fuel/make domains
///   └──────────┘
///        │            ┌──────────┐   ┌──────────┐
///        │            │ handles  │──▶│  action   │  FilterAction → reduce
///        │            └──────────┘   └──────────┘
///        ▼                                │
///   ┌──────────┐                          │
///   │  filter   │◀── FilterState ─────────┘
///   └──────────┘    apply predicates → FilteredView
/// ```

pub mod action;
pub mod filter;
pub mod handles;
pub mod loader;
pub mod model;
