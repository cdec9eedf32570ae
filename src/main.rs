// main.rs - CLI entry point

use hyde::cli::Config;
use hyde::core::scheduler::count_quartets;
use hyde::data::loaders::read_triples;
use hyde::output::{create_tsv_sink, output_path, write_cf_table_file, write_log};
use hyde::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn load_triples(path: &Path, data: &Dataset) -> Result<Vec<[usize; 3]>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open triples file '{}': {}", path.display(), e))?;
    let named = read_triples(BufReader::new(file))?;
    data.resolve_triples(&named)
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = Args::command_line();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validated = validate_args(&args)?;
    let verbose = !args.quiet;
    let mut log_lines: Vec<String> = Vec::new();

    if verbose {
        println!("🚀 HyDe v{}", hyde::VERSION);
    }

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }
    let num_threads = rayon::current_num_threads();
    if verbose {
        println!("🧵 Threads: {}", num_threads);
    }
    log_lines.push(format!("threads\t{}", num_threads));

    let total_start = Instant::now();

    // Load data
    let data = Dataset::from_files(&validated.infile, &validated.map, &validated.outgroup)?;
    data.check_counts(args.num_ind, args.num_taxa, args.num_sites)?;
    if verbose {
        println!(
            "📊 Loaded {} individuals × {} sites in {} taxa (outgroup: {})",
            data.sequences.num_individuals(),
            data.sequences.num_sites,
            data.taxa.num_taxa(),
            validated.outgroup
        );
        if validated.policy == AmbiguityPolicy::Ignore {
            println!("🚫 Sites with gaps or ambiguity codes are skipped");
        }
    }
    log_lines.push(format!("infile\t{}", validated.infile.display()));
    log_lines.push(format!("map\t{}", validated.map.display()));
    log_lines.push(format!("outgroup\t{}", validated.outgroup));
    log_lines.push(format!("individuals\t{}", data.sequences.num_individuals()));
    log_lines.push(format!("sites\t{}", data.sequences.num_sites));
    log_lines.push(format!("taxa\t{}", data.taxa.num_taxa()));
    log_lines.push(format!("policy\t{:?}", validated.policy));

    let triples = match &validated.triples {
        Some(path) => {
            let resolved = load_triples(path, &data)?;
            if verbose {
                println!("📋 Loaded {} triples from '{}'", resolved.len(), path.display());
            }
            Some(resolved)
        }
        None => None,
    };

    let options = AnalysisOptions {
        policy: validated.policy,
        show_progress: verbose,
    };

    if args.individuals {
        // --individuals is only accepted together with --triples
        let selected = triples.as_deref().unwrap_or_default();
        let tests = individual_tests(&data.taxa, selected);
        let path = output_path(&args.prefix, "ind");
        let sink = create_tsv_sink(&path)?;
        sink.header()?;
        let summary = run_individuals(&data.sequences, &data.taxa, &tests, &options, &sink)?;
        sink.finish()?;
        if verbose {
            println!("📁 Individual results written to: {}", path.display());
        }
        log_lines.push(format!("individual_tests\t{}", summary.tested));
        log_lines.push(format!("individual_records\t{}", summary.emitted));
    } else {
        let units = match &triples {
            Some(selected) => selected_triples(&data.taxa, selected),
            None => all_triples(&data.taxa),
        };
        let num_quartets = count_quartets(&units);

        let out_path = output_path(&args.prefix, "out");
        let filtered_path = output_path(&args.prefix, "out-filtered");
        let all = create_tsv_sink(&out_path)?;
        let significant = create_tsv_sink(&filtered_path)?;
        let sink = FilteringSink::new(&all, &significant, args.pvalue, num_quartets);

        sink.header()?;
        let summary = run_analysis(&data.sequences, &data.taxa, &units, &options, &sink)?;
        sink.finish()?;
        if verbose {
            println!("📁 Results written to: {}", out_path.display());
            println!(
                "📁 Significant results (alpha {} / {} tests) written to: {}",
                args.pvalue,
                num_quartets,
                filtered_path.display()
            );
        }
        drop(sink);
        drop(all);
        drop(significant);

        let cf_path = output_path(&args.prefix, "cf-table");
        let cf_rows = write_cf_table_file(&out_path, &cf_path, &validated.outgroup)?;
        if verbose {
            println!("📁 Concordance factors for {} triples written to: {}", cf_rows, cf_path.display());
        }
        log_lines.push(format!("quartets_tested\t{}", summary.tested));
        log_lines.push(format!("quartets_valid\t{}", summary.emitted));
        log_lines.push(format!("alpha\t{}", args.pvalue));

        if args.bootstrap > 0 {
            let boot_path = output_path(&args.prefix, "boot");
            let boot_sink = create_tsv_sink(&boot_path)?;
            if verbose {
                println!("🔁 Running {} bootstrap replicates...", args.bootstrap);
            }
            let mut driver = BootstrapDriver::new(args.bootstrap, args.seed);
            let per_replicate = driver.run(&data.sequences, &data.taxa, &units, &options, &boot_sink)?;
            if verbose {
                println!("📁 Bootstrap results written to: {}", boot_path.display());
            }
            log_lines.push(format!("bootstrap_replicates\t{}", driver.replicates()));
            log_lines.push(format!(
                "bootstrap_records\t{}",
                per_replicate.iter().sum::<usize>()
            ));
            if let Some(seed) = args.seed {
                log_lines.push(format!("seed\t{}", seed));
            }
        }
    }

    let total_elapsed = total_start.elapsed();
    log_lines.push(format!("elapsed_seconds\t{:.3}", total_elapsed.as_secs_f64()));

    if args.log {
        write_log(&output_path(&args.prefix, "log"), &command_line, &log_lines)?;
    }

    if verbose {
        println!("\n🎉 === HYDE COMPLETED SUCCESSFULLY ===");
        println!("⏱️  Total execution time: {:.2}s", total_elapsed.as_secs_f64());
        println!("🔧 Command: {}", command_line);
    }

    Ok(())
}
