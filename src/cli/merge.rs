// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.infile.is_none() {
            self.infile = config.infile;
        }
        if self.map.is_none() {
            self.map = config.map;
        }
        if self.outgroup.is_none() {
            self.outgroup = config.outgroup;
        }
        if self.triples.is_none() {
            self.triples = config.triples;
        }
        if self.prefix == "hyde" {
            if let Some(prefix) = config.prefix {
                self.prefix = prefix;
            }
        }

        // Expected dimensions
        if self.num_ind.is_none() {
            self.num_ind = config.num_ind;
        }
        if self.num_taxa.is_none() {
            self.num_taxa = config.num_taxa;
        }
        if self.num_sites.is_none() {
            self.num_sites = config.num_sites;
        }

        // Analysis (only override defaults, not explicit CLI values)
        if self.pvalue == 0.05 {
            if let Some(pvalue) = config.pvalue {
                self.pvalue = pvalue;
            }
        }
        if self.bootstrap == 0 {
            if let Some(bootstrap) = config.bootstrap {
                self.bootstrap = bootstrap;
            }
        }
        if self.seed.is_none() {
            self.seed = config.seed;
        }
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.individuals && config.individuals.unwrap_or(false) {
            self.individuals = true;
        }
        if !self.ignore_amb_sites && config.ignore_amb_sites.unwrap_or(false) {
            self.ignore_amb_sites = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }
        if !self.log && config.log.unwrap_or(false) {
            self.log = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
