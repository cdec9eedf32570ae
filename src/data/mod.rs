// mod.rs - Data structures module

pub mod alignment;
pub mod bases;
pub mod loaders;
pub mod taxa;

// Re-export main types for convenience
pub use alignment::SequenceMatrix;
pub use loaders::{Dataset, NamedTriple};
pub use taxa::TaxonMap;
