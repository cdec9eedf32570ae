// mod.rs - Input file loaders

pub mod map;
pub mod phylip;
pub mod triples;

pub use map::{read_taxon_map, MapEntry};
pub use phylip::{read_phylip, EncodedSequence};
pub use triples::{read_triples, NamedTriple};

use crate::data::{SequenceMatrix, TaxonMap};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sequences plus the taxon map that indexes into them
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sequences: SequenceMatrix,
    pub taxa: TaxonMap,
}

impl Dataset {
    /// Load the sequence and taxon map files and join them
    pub fn from_files(infile: &Path, mapfile: &Path, outgroup: &str) -> Result<Self, String> {
        let map_file = File::open(mapfile)
            .map_err(|e| format!("Failed to open taxon map '{}': {}", mapfile.display(), e))?;
        let entries = read_taxon_map(BufReader::new(map_file))?;

        let seq_file = File::open(infile)
            .map_err(|e| format!("Failed to open sequence file '{}': {}", infile.display(), e))?;
        let sequences = read_phylip(BufReader::new(seq_file))?;

        Self::assemble(&entries, sequences, outgroup)
    }

    /// Join map entries with sequences.
    ///
    /// Rows are reordered to follow the map, so individual indices are dense
    /// and every index in the taxon map is valid for the sequence matrix.
    pub fn assemble(
        entries: &[MapEntry],
        sequences: Vec<EncodedSequence>,
        outgroup: &str,
    ) -> Result<Self, String> {
        let mut by_name: HashMap<String, Vec<u8>> = HashMap::with_capacity(sequences.len());
        for seq in sequences {
            if by_name.insert(seq.name.clone(), seq.codes).is_some() {
                return Err(format!("Sequence '{}' appears more than once", seq.name));
            }
        }

        let taxon_names = map::taxon_order(entries);
        let outgroup_idx = taxon_names
            .iter()
            .position(|t| t == outgroup)
            .ok_or_else(|| format!("Outgroup '{}' not found in taxon map", outgroup))?;
        if taxon_names.len() < 4 {
            return Err(format!(
                "Need an outgroup and at least 3 other taxa, found {} taxa",
                taxon_names.len()
            ));
        }

        let mut names = Vec::with_capacity(entries.len());
        let mut rows = Vec::with_capacity(entries.len());
        let mut members = vec![Vec::new(); taxon_names.len()];
        for entry in entries {
            let codes = by_name.remove(&entry.individual).ok_or_else(|| {
                format!(
                    "Individual '{}' from the taxon map has no sequence",
                    entry.individual
                )
            })?;
            let taxon = taxon_names
                .iter()
                .position(|t| *t == entry.taxon)
                .unwrap_or_default();
            members[taxon].push(names.len());
            names.push(entry.individual.clone());
            rows.push(codes);
        }

        if !by_name.is_empty() {
            let mut extra: Vec<&String> = by_name.keys().collect();
            extra.sort();
            eprintln!(
                "⚠️  Warning: {} sequence(s) not in the taxon map were ignored (e.g. '{}')",
                extra.len(),
                extra[0]
            );
        }

        let sequences = SequenceMatrix::from_rows(names, rows)?;
        let taxa = TaxonMap::new(taxon_names, members, outgroup_idx)?;
        Ok(Self { sequences, taxa })
    }

    /// Cross-check declared counts against the loaded data
    pub fn check_counts(
        &self,
        num_ind: Option<usize>,
        num_taxa: Option<usize>,
        num_sites: Option<usize>,
    ) -> Result<(), String> {
        let checks = [
            ("individuals", num_ind, self.sequences.num_individuals()),
            ("taxa", num_taxa, self.taxa.num_taxa()),
            ("sites", num_sites, self.sequences.num_sites),
        ];
        for (what, declared, found) in checks {
            if let Some(n) = declared {
                if n != found {
                    return Err(format!(
                        "Number of {} does not match: {} declared, {} in input",
                        what, n, found
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolve named triples to taxon indices
    pub fn resolve_triples(&self, triples: &[NamedTriple]) -> Result<Vec<[usize; 3]>, String> {
        let lookup = |name: &str| -> Result<usize, String> {
            match self.taxa.index_of(name) {
                Some(t) if t == self.taxa.outgroup => {
                    Err(format!("Triple uses the outgroup '{}'", name))
                }
                Some(t) => Ok(t),
                None => Err(format!("Unknown taxon '{}' in triples file", name)),
            }
        };
        triples
            .iter()
            .map(|t| {
                let resolved = [lookup(&t.p1)?, lookup(&t.hybrid)?, lookup(&t.p2)?];
                if resolved[0] == resolved[1] || resolved[0] == resolved[2] || resolved[1] == resolved[2] {
                    return Err(format!(
                        "Triple '{} {} {}' must name three different taxa",
                        t.p1, t.hybrid, t.p2
                    ));
                }
                Ok(resolved)
            })
            .collect()
    }
}
