// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// hyde - Hybridization detection from site-pattern phylogenetic invariants
pub struct Args {
    /// sequential PHYLIP file with one sequence per individual
    #[argh(option, short = 'i')]
    pub infile: Option<String>,

    /// map file with two columns: individual, taxon
    #[argh(option, short = 'm')]
    pub map: Option<String>,

    /// name of the outgroup taxon
    #[argh(option, short = 'o')]
    pub outgroup: Option<String>,

    /// expected number of individuals (checked against the input)
    #[argh(option, short = 'n')]
    pub num_ind: Option<usize>,

    /// expected number of taxa (checked against the map)
    #[argh(option, short = 't')]
    pub num_taxa: Option<usize>,

    /// expected number of sites (checked against the input)
    #[argh(option, short = 's')]
    pub num_sites: Option<usize>,

    /// family-wise significance level for the filtered output (default: 0.05)
    #[argh(option, short = 'p', default = "0.05")]
    pub pvalue: f64,

    /// number of bootstrap replicates (default: 0 = no bootstrapping)
    #[argh(option, short = 'b', default = "0")]
    pub bootstrap: usize,

    /// number of threads (default: auto-detect)
    #[argh(option, short = 'j')]
    pub threads: Option<usize>,

    /// seed for bootstrap resampling (default: from OS entropy)
    #[argh(option)]
    pub seed: Option<u64>,

    /// file with P1, Hybrid and P2 taxon names, one triple per line
    #[argh(option)]
    pub triples: Option<String>,

    /// test each individual of the hybrid taxon separately (requires --triples)
    #[argh(switch)]
    pub individuals: bool,

    /// prefix for output files (default: hyde)
    #[argh(option, default = "String::from(\"hyde\")")]
    pub prefix: String,

    /// skip sites with gaps or ambiguity codes instead of distributing them
    #[argh(switch)]
    pub ignore_amb_sites: bool,

    /// suppress progress output
    #[argh(switch, short = 'q')]
    pub quiet: bool,

    /// write a run log to <prefix>-log.txt
    #[argh(switch)]
    pub log: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Space-separated argument list for the run log
    pub fn command_line() -> String {
        std::env::args().collect::<Vec<_>>().join(" ")
    }
}
