// lib.rs - hyde library root

//! # hyde - Hybridization detection using phylogenetic invariants
//!
//! For every rooted quartet `(outgroup, P1, Hybrid, P2)` of taxa, the individuals'
//! aligned sites are tallied into a 16×16 count matrix, collapsed into fifteen
//! site-pattern sums, and tested with the GH statistic. Valid quartets yield a
//! z-score, a p-value and an estimate of the hybrid's admixture proportion
//! `gamma`.
//!
//! ## Features
//!
//! - **Parallel**: quartets are evaluated on a rayon thread pool
//! - **Ambiguity codes**: IUPAC codes are spread fractionally over compatible bases
//! - **Bootstrapping**: individuals resampled within taxa, optionally seeded
//! - **Individual tests**: each member of a hybrid taxon tested on its own
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use hyde::prelude::*;
//! use std::path::Path;
//!
//! let data = Dataset::from_files(Path::new("data.phy"), Path::new("map.txt"), "out")?;
//! let units = all_triples(&data.taxa);
//! let sink = MemorySink::new();
//! let summary = run_analysis(&data.sequences, &data.taxa, &units, &AnalysisOptions::default(), &sink)?;
//! println!("{} of {} quartets valid", summary.emitted, summary.tested);
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{all_triples, run_analysis, selected_triples, AnalysisOptions};
    pub use crate::core::{individual_tests, run_individuals, BootstrapDriver};
    pub use crate::core::{AmbiguityPolicy, HydeTest, PatternCounts, Quartet, RunSummary};
    pub use crate::data::{Dataset, SequenceMatrix, TaxonMap};
    pub use crate::output::{FilteringSink, HydeRecord, MemorySink, RecordSink, TsvSink};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{AmbiguityPolicy, HydeTest, PatternCounts};
pub use data::{Dataset, SequenceMatrix, TaxonMap};
pub use output::HydeRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "hyde v{} - Hybridization detection using phylogenetic invariants",
        VERSION
    )
}
