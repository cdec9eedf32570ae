// mod.rs - Core logic module

pub mod bootstrap;
pub mod counts;
pub mod individuals;
pub mod patterns;
pub mod scheduler;
pub mod statistic;

// Re-export main types for convenience
pub use bootstrap::BootstrapDriver;
pub use counts::{build_counts, AmbiguityPolicy, CountMatrix, QuartetMembers};
pub use individuals::{individual_tests, run_individuals, IndividualTest};
pub use patterns::{PatternCounts, PATTERN_NAMES};
pub use scheduler::{
    all_triples, evaluate_quartet, run_analysis, selected_triples, AnalysisOptions, Quartet,
    RunSummary, WorkUnit,
};
pub use statistic::{test_quartet, HydeTest};
