// taxa.rs - Taxon to individuals mapping

use rand::Rng;

/// Assignment of individuals (rows of the sequence matrix) to taxa
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonMap {
    pub names: Vec<String>,
    pub members: Vec<Vec<usize>>,
    pub outgroup: usize,
}

impl TaxonMap {
    /// Create a map, checking that every taxon has at least one individual
    pub fn new(names: Vec<String>, members: Vec<Vec<usize>>, outgroup: usize) -> Result<Self, String> {
        if names.len() != members.len() {
            return Err(format!(
                "{} taxon names given for {} member lists",
                names.len(),
                members.len()
            ));
        }
        if outgroup >= names.len() {
            return Err(format!("Outgroup index {} out of range", outgroup));
        }
        if let Some(pos) = members.iter().position(|m| m.is_empty()) {
            return Err(format!("Taxon '{}' has no individuals", names[pos]));
        }
        Ok(Self {
            names,
            members,
            outgroup,
        })
    }

    pub fn num_taxa(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, taxon: usize) -> &str {
        &self.names[taxon]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn individuals(&self, taxon: usize) -> &[usize] {
        &self.members[taxon]
    }

    /// Taxon indices in map order, outgroup excluded
    pub fn ingroup(&self) -> Vec<usize> {
        (0..self.num_taxa()).filter(|&t| t != self.outgroup).collect()
    }

    /// Bootstrap copy: each taxon's list replaced by a same-length draw with
    /// replacement from this map's list for that taxon.
    pub fn resample<R: Rng>(&self, rng: &mut R) -> TaxonMap {
        let members = self
            .members
            .iter()
            .map(|list| {
                (0..list.len())
                    .map(|_| list[rng.gen_range(0..list.len())])
                    .collect::<Vec<usize>>()
            })
            .collect();
        TaxonMap {
            names: self.names.clone(),
            members,
            outgroup: self.outgroup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_map() -> TaxonMap {
        TaxonMap::new(
            vec!["out".into(), "sp1".into(), "sp2".into(), "sp3".into()],
            vec![vec![0, 1], vec![2, 3, 4], vec![5], vec![6, 7, 8, 9]],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_ingroup_excludes_outgroup() {
        let map = sample_map();
        assert_eq!(map.ingroup(), vec![1, 2, 3]);
        assert_eq!(map.index_of("sp2"), Some(2));
        assert_eq!(map.index_of("nope"), None);
    }

    #[test]
    fn test_empty_taxon_rejected() {
        let err = TaxonMap::new(vec!["a".into(), "b".into()], vec![vec![0], vec![]], 0).unwrap_err();
        assert!(err.contains("'b'"));
    }

    #[test]
    fn test_resample_keeps_lengths_and_membership() {
        let map = sample_map();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let boot = map.resample(&mut rng);
            assert_eq!(boot.names, map.names);
            assert_eq!(boot.outgroup, map.outgroup);
            for (orig, drawn) in map.members.iter().zip(&boot.members) {
                assert_eq!(orig.len(), drawn.len());
                assert!(drawn.iter().all(|i| orig.contains(i)));
            }
        }
    }

    #[test]
    fn test_resample_is_seed_deterministic() {
        let map = sample_map();
        let a = map.resample(&mut StdRng::seed_from_u64(42));
        let b = map.resample(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
