/// Data layer: sheet loading, header checks, field lookup, scoring, search.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → StudentTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required headers present? else reject whole table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search query → visible row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  profile  │  resolve aliases + normalize → view model
///   └──────────┘
/// ```

pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod profile;
pub mod resolve;
pub mod schema;
