// alignment.rs - Individual × site matrix of base codes

/// Aligned sequences of all individuals, stored row-major as base codes
#[derive(Debug, Clone)]
pub struct SequenceMatrix {
    pub names: Vec<String>,
    pub num_sites: usize,
    codes: Vec<u8>,
}

impl SequenceMatrix {
    /// Build a matrix from per-individual code rows.
    ///
    /// Every row must have the same length.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<u8>>) -> Result<Self, String> {
        if names.len() != rows.len() {
            return Err(format!(
                "{} names given for {} sequences",
                names.len(),
                rows.len()
            ));
        }
        let num_sites = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut codes = Vec::with_capacity(num_sites * rows.len());
        for (name, row) in names.iter().zip(&rows) {
            if row.len() != num_sites {
                return Err(format!(
                    "Sequence '{}' has {} sites, expected {}",
                    name,
                    row.len(),
                    num_sites
                ));
            }
            codes.extend_from_slice(row);
        }
        Ok(Self {
            names,
            num_sites,
            codes,
        })
    }

    pub fn num_individuals(&self) -> usize {
        self.names.len()
    }

    /// Base codes of one individual
    #[inline]
    pub fn row(&self, individual: usize) -> &[u8] {
        let start = individual * self.num_sites;
        &self.codes[start..start + self.num_sites]
    }

    pub fn name(&self, individual: usize) -> &str {
        &self.names[individual]
    }
}
