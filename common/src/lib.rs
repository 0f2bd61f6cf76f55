//! Part Lookup Common Library
//!
//! 旧品番 ↔ 新品番の照合ロジック（CLIから利用）

pub mod types;
pub mod error;
pub mod table;
pub mod mapping;
pub mod similarity;
pub mod matcher;
pub mod duplicate;
pub mod lookup;
pub mod batch;
pub mod export;

pub use types::{BatchRow, DuplicateSet, FuzzyMatch, MappingRow, MatchKind, MatchResult};
pub use error::{Error, Result};
pub use table::RawTable;
pub use mapping::MappingTable;
pub use matcher::FuzzyOptions;
pub use lookup::{lookup, Banner, LookupOptions, LookupOutcome};
