/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  file path / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  read or fetch → UTF-8 text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse `;`-delimited text → Dataset (+ coercion report)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<PropertyRecord>, distinct periods / districts / types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality criteria → filtered subset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
