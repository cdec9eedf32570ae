// hyde_summary.rs - Summarize bootstrap replicates per triple

use clap::{Arg, ArgAction, Command};
use hyde::output::reader::read_blocks_file;
use hyde::output::summary::{summarize, write_summary_json, write_summary_tsv};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let matches = Command::new("hyde-summary")
        .version(hyde::VERSION)
        .about("Mean and standard deviation of HyDe bootstrap statistics per triple")
        .arg(Arg::new("bootfile")
            .long("bootfile")
            .short('i')
            .value_name("FILE")
            .help("Bootstrap results file (<prefix>-boot.txt)")
            .required(true))
        .arg(Arg::new("output")
            .long("output")
            .short('o')
            .value_name("FILE")
            .help("Output file (default: standard output)"))
        .arg(Arg::new("json")
            .long("json")
            .help("Write JSON instead of TSV")
            .action(ArgAction::SetTrue))
        .get_matches();

    let bootfile = matches
        .get_one::<String>("bootfile")
        .ok_or("--bootfile is required")?;
    let json = matches.get_flag("json");

    let blocks = read_blocks_file(Path::new(bootfile))?;
    let summaries = summarize(&blocks);
    eprintln!(
        "📊 {} replicate blocks, {} triples summarized from '{}'",
        blocks.len(),
        summaries.len(),
        bootfile
    );

    let mut writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .map_err(|e| format!("Failed to create output file '{}': {}", path, e))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    if json {
        write_summary_json(&mut writer, &summaries)?;
    } else {
        write_summary_tsv(&mut writer, &summaries)?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}
