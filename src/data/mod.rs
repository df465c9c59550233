/// Data layer: raw datasets, loading, and per-year views.
///
/// Architecture:
/// ```text
///   State,2006,2007,...   (CSV)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → YearTable
///   └──────────┘
///        │           (fetched on a worker thread via `source`)
///        ▼
///   ┌───────────┐
///   │ YearTable  │  Vec<StateRow>, year index
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  selected year → Vec<StateValue>
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod source;
pub mod view;
