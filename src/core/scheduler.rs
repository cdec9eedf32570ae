// scheduler.rs - Triple enumeration and parallel quartet evaluation

use crate::core::counts::{build_counts, AmbiguityPolicy, QuartetMembers};
use crate::core::statistic::test_quartet;
use crate::data::{SequenceMatrix, TaxonMap};
use crate::output::sink::{HydeRecord, RecordSink};
use crate::output::progress_bar;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A rooted quartet of taxon indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quartet {
    pub outgroup: usize,
    pub p1: usize,
    pub hybrid: usize,
    pub p2: usize,
}

/// Quartets evaluated together by one worker
pub type WorkUnit = Vec<Quartet>;

/// Settings shared by every quartet of a run
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub policy: AmbiguityPolicy,
    pub show_progress: bool,
}

/// Counts from a finished pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tested: usize,
    pub emitted: usize,
}

/// The three hybrid hypotheses for taxa `i < j < k`
pub fn rooted_quartets(outgroup: usize, i: usize, j: usize, k: usize) -> [Quartet; 3] {
    let quartet = |p1, hybrid, p2| Quartet {
        outgroup,
        p1,
        hybrid,
        p2,
    };
    [quartet(i, j, k), quartet(j, i, k), quartet(i, k, j)]
}

/// One work unit per unordered ingroup triple
pub fn all_triples(taxa: &TaxonMap) -> Vec<WorkUnit> {
    let ingroup = taxa.ingroup();
    let n = ingroup.len();
    let mut units = Vec::with_capacity(n * n.saturating_sub(1) * n.saturating_sub(2) / 6);
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                units.push(rooted_quartets(taxa.outgroup, ingroup[a], ingroup[b], ingroup[c]).to_vec());
            }
        }
    }
    units
}

/// One work unit per user-selected `[p1, hybrid, p2]` triple
pub fn selected_triples(taxa: &TaxonMap, triples: &[[usize; 3]]) -> Vec<WorkUnit> {
    triples
        .iter()
        .map(|&[p1, hybrid, p2]| {
            vec![Quartet {
                outgroup: taxa.outgroup,
                p1,
                hybrid,
                p2,
            }]
        })
        .collect()
}

/// Number of quartets across work units
pub fn count_quartets(units: &[WorkUnit]) -> usize {
    units.iter().map(Vec::len).sum()
}

/// Count, reduce and test one quartet whose members are given directly.
///
/// Returns `None` for invalid quartets; a failed pattern consistency check is
/// reported on stderr.
pub fn evaluate_members(
    sequences: &SequenceMatrix,
    members: &QuartetMembers<'_>,
    names: [&str; 3],
    policy: AmbiguityPolicy,
) -> Option<HydeRecord> {
    let counts = build_counts(sequences, members, policy);
    let patterns = counts.patterns();

    if counts.observations > 0.0 && !patterns.is_consistent(counts.observations) {
        eprintln!(
            "⚠️  Warning: site pattern total does not match observations for {} {} {} (residual {:.3e}), skipping",
            names[0],
            names[1],
            names[2],
            patterns.residual(counts.observations)
        );
        return None;
    }

    let test = test_quartet(&patterns, counts.observations, members.combinations())?;
    Some(HydeRecord {
        p1: names[0].to_string(),
        hybrid: names[1].to_string(),
        p2: names[2].to_string(),
        test,
    })
}

/// Evaluate one quartet of taxa
pub fn evaluate_quartet(
    sequences: &SequenceMatrix,
    taxa: &TaxonMap,
    quartet: &Quartet,
    policy: AmbiguityPolicy,
) -> Option<HydeRecord> {
    let members = QuartetMembers {
        outgroup: taxa.individuals(quartet.outgroup),
        p1: taxa.individuals(quartet.p1),
        hybrid: taxa.individuals(quartet.hybrid),
        p2: taxa.individuals(quartet.p2),
    };
    let names = [
        taxa.name(quartet.p1),
        taxa.name(quartet.hybrid),
        taxa.name(quartet.p2),
    ];
    evaluate_members(sequences, &members, names, policy)
}

/// Evaluate all work units in parallel and emit valid records to `sink`.
///
/// Units are picked up by rayon workers in any order; only the sink is
/// shared between them.
pub fn run_analysis(
    sequences: &SequenceMatrix,
    taxa: &TaxonMap,
    units: &[WorkUnit],
    options: &AnalysisOptions,
    sink: &dyn RecordSink,
) -> Result<RunSummary, String> {
    let start = Instant::now();
    let tested = count_quartets(units);
    if options.show_progress {
        println!(
            "🔄 Testing {} quartets from {} triples...",
            tested,
            units.len()
        );
    }

    let pb = progress_bar(units.len() as u64, options.show_progress);
    let emitted = AtomicUsize::new(0);

    units.par_iter().try_for_each(|unit| -> Result<(), String> {
        for quartet in unit {
            if let Some(record) = evaluate_quartet(sequences, taxa, quartet, options.policy) {
                sink.emit(&record)?;
                emitted.fetch_add(1, Ordering::Relaxed);
            }
        }
        pb.inc(1);
        Ok(())
    })?;

    pb.finish_and_clear();
    let summary = RunSummary {
        tested,
        emitted: emitted.into_inner(),
    };
    if options.show_progress {
        println!(
            "✅ {} of {} quartets passed ({:.2}s)",
            summary.emitted,
            summary.tested,
            start.elapsed().as_secs_f64()
        );
    }
    Ok(summary)
}
