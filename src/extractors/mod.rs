// src/extractors/mod.rs
pub mod field;
pub mod tab;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use field::{FieldExtractor, FieldValue, MatchStrategy};
#[allow(unused_imports)]
pub use tab::{collect_tab_fields, FieldRecord, Report, TabResult, TabScraper};
