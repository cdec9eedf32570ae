// individuals.rs - Testing each individual of a putative hybrid taxon

use crate::core::counts::QuartetMembers;
use crate::core::scheduler::{evaluate_members, AnalysisOptions, RunSummary};
use crate::data::{SequenceMatrix, TaxonMap};
use crate::output::progress_bar;
use crate::output::sink::RecordSink;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One hybrid individual tested against full parental and outgroup taxa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndividualTest {
    pub p1: usize,
    pub hybrid_taxon: usize,
    pub individual: usize,
    pub p2: usize,
}

/// Expand `[p1, hybrid, p2]` triples into one test per hybrid individual
pub fn individual_tests(taxa: &TaxonMap, triples: &[[usize; 3]]) -> Vec<IndividualTest> {
    triples
        .iter()
        .flat_map(|&[p1, hybrid, p2]| {
            taxa.individuals(hybrid)
                .iter()
                .map(move |&individual| IndividualTest {
                    p1,
                    hybrid_taxon: hybrid,
                    individual,
                    p2,
                })
        })
        .collect()
}

/// Run all individual tests in parallel; the Hybrid column carries the
/// individual's name.
pub fn run_individuals(
    sequences: &SequenceMatrix,
    taxa: &TaxonMap,
    tests: &[IndividualTest],
    options: &AnalysisOptions,
    sink: &dyn RecordSink,
) -> Result<RunSummary, String> {
    if options.show_progress {
        println!("🔄 Testing {} hybrid individuals...", tests.len());
    }
    let pb = progress_bar(tests.len() as u64, options.show_progress);
    let emitted = AtomicUsize::new(0);

    tests.par_iter().try_for_each(|test| -> Result<(), String> {
        let hybrid = [test.individual];
        let members = QuartetMembers {
            outgroup: taxa.individuals(taxa.outgroup),
            p1: taxa.individuals(test.p1),
            hybrid: &hybrid,
            p2: taxa.individuals(test.p2),
        };
        let names = [
            taxa.name(test.p1),
            sequences.name(test.individual),
            taxa.name(test.p2),
        ];
        if let Some(record) = evaluate_members(sequences, &members, names, options.policy) {
            sink.emit(&record)?;
            emitted.fetch_add(1, Ordering::Relaxed);
        }
        pb.inc(1);
        Ok(())
    })?;

    pb.finish_and_clear();
    Ok(RunSummary {
        tested: tests.len(),
        emitted: emitted.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bases::encode;
    use crate::output::sink::MemorySink;

    #[test]
    fn test_each_hybrid_individual_reported_by_name() {
        let seqs = [
            ("o1", "AAAAAAAAAAAAAAAAAAAA"),
            ("a1", "AAAAAAAAAAGGGGGGAAAG"),
            ("h1", "AAAAAAAAAAGGGGGGGGGA"),
            ("h2", "AAAAAAAAAAGGGGGGGGAA"),
            ("b1", "AAAAAAAAAAAAAAAAGGGG"),
        ];
        let names = seqs.iter().map(|(n, _)| n.to_string()).collect();
        let rows = seqs
            .iter()
            .map(|(_, s)| s.bytes().map(|c| encode(c).unwrap()).collect())
            .collect();
        let matrix = SequenceMatrix::from_rows(names, rows).unwrap();
        let taxa = TaxonMap::new(
            vec!["out".into(), "p1".into(), "hyb".into(), "p2".into()],
            vec![vec![0], vec![1], vec![2, 3], vec![4]],
            0,
        )
        .unwrap();

        let tests = individual_tests(&taxa, &[[1, 2, 3]]);
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[1].individual, 3);

        let sink = MemorySink::new();
        let summary =
            run_individuals(&matrix, &taxa, &tests, &AnalysisOptions::default(), &sink).unwrap();
        assert_eq!(summary.tested, 2);
        let mut hybrids: Vec<String> = sink.records().into_iter().map(|r| r.hybrid).collect();
        hybrids.sort();
        assert_eq!(hybrids, vec!["h1", "h2"]);
    }
}
