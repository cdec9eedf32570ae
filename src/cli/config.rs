// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub infile: Option<String>,
    pub map: Option<String>,
    pub outgroup: Option<String>,
    pub triples: Option<String>,
    pub prefix: Option<String>,

    // Expected dimensions
    pub num_ind: Option<usize>,
    pub num_taxa: Option<usize>,
    pub num_sites: Option<usize>,

    // Analysis
    pub pvalue: Option<f64>,
    pub bootstrap: Option<usize>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,

    // Flags
    pub individuals: Option<bool>,
    pub ignore_amb_sites: Option<bool>,
    pub quiet: Option<bool>,
    pub log: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# hyde.toml - Configuration file for hyde
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Sequential PHYLIP file, one sequence per individual
infile = "data.phy"

# Two-column map: individual taxon
map = "map.txt"

# Outgroup taxon name
outgroup = "out"

# Restrict the analysis to listed P1 Hybrid P2 triples
# triples = "triples.txt"

# Prefix for <prefix>-out.txt, <prefix>-out-filtered.txt, <prefix>-boot.txt
prefix = "hyde"

# =============================================================================
# EXPECTED DIMENSIONS (optional cross-checks)
# =============================================================================

# num_ind = 16
# num_taxa = 4
# num_sites = 50000

# =============================================================================
# ANALYSIS
# =============================================================================

# Family-wise significance level for the filtered output
pvalue = 0.05

# Bootstrap replicates (0 = none)
bootstrap = 0

# Seed for reproducible bootstrap resampling
# seed = 42

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Test each individual of the hybrid taxon (requires triples)
individuals = false

# Skip sites with gaps or ambiguity codes
ignore_amb_sites = false

# Suppress progress output
quiet = false

# Write <prefix>-log.txt
log = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.outgroup.as_deref(), Some("out"));
        assert_eq!(config.pvalue, Some(0.05));
        assert_eq!(config.bootstrap, Some(0));
        assert_eq!(config.seed, None);
        assert_eq!(config.individuals, Some(false));
    }
}
