// mod.rs - Output files, progress and run logs

pub mod concordance;
pub mod reader;
pub mod sink;
pub mod summary;

pub use sink::{FilteringSink, HydeRecord, MemorySink, RecordSink, TsvSink};

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{create_dir_all, rename, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<(), String> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                format!("Failed to create parent directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

/// `<prefix>-<suffix>.txt`
pub fn output_path(prefix: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}-{}.txt", prefix, suffix))
}

/// Move an existing file out of the way as `<stem>-old.txt`
fn move_existing(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let old = path.with_file_name(format!("{}-old.txt", stem));
    println!(
        "⚠️  File '{}' already exists, renaming to '{}'",
        path.display(),
        old.display()
    );
    rename(path, &old).map_err(|e| {
        format!("Failed to rename '{}' to '{}': {}", path.display(), old.display(), e)
    })
}

/// Create an output file, keeping any previous one as `-old`
pub fn create_output_file(path: &Path) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(path)?;
    move_existing(path)?;
    let file = File::create(path)
        .map_err(|e| format!("Failed to create output file '{}': {}", path.display(), e))?;
    Ok(BufWriter::new(file))
}

/// Open a fresh TSV results file
pub fn create_tsv_sink(path: &Path) -> Result<TsvSink<BufWriter<File>>, String> {
    Ok(TsvSink::new(create_output_file(path)?))
}

/// Derive `cf_path` from the records of the results file at `results_path`
pub fn write_cf_table_file(results_path: &Path, cf_path: &Path, outgroup: &str) -> Result<usize, String> {
    let records = reader::read_blocks_file(results_path)?.concat();
    let rows = concordance::concordance_rows(&records, outgroup);
    let mut writer = create_output_file(cf_path)?;
    concordance::write_cf_table(&mut writer, &rows)?;
    Ok(rows.len())
}

/// Progress bar in the usual style, hidden when `visible` is false
pub fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Write a plain-text run log
pub fn write_log(path: &Path, command_line: &str, lines: &[String]) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .map_err(|e| format!("Failed to create log file '{}': {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# HyDe v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;
    for line in lines {
        writeln!(writer, "{}", line).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("📝 Log written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("run/hyde", "out"), PathBuf::from("run/hyde-out.txt"));
        assert_eq!(output_path("x", "out-filtered"), PathBuf::from("x-out-filtered.txt"));
    }

    #[test]
    fn test_existing_output_is_renamed() {
        let dir = std::env::temp_dir().join(format!("hyde-output-test-{}", std::process::id()));
        let path = dir.join("hyde-out.txt");
        let sink = create_tsv_sink(&path).unwrap();
        sink.header().unwrap();
        sink.finish().unwrap();
        drop(sink);

        let sink = create_tsv_sink(&path).unwrap();
        sink.finish().unwrap();
        drop(sink);

        let old = std::fs::read_to_string(dir.join("hyde-out-old.txt")).unwrap();
        assert!(old.starts_with("P1\tHybrid\tP2"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cf_table_written_from_results_file() {
        use crate::core::patterns::PatternCounts;
        use crate::core::statistic::HydeTest;

        let dir = std::env::temp_dir().join(format!("hyde-cf-test-{}", std::process::id()));
        let out = dir.join("run-out.txt");
        let cf = dir.join("run-cf-table.txt");
        let sink = create_tsv_sink(&out).unwrap();
        sink.header().unwrap();
        for (p1, hybrid, gamma) in [("a", "b", 0.3), ("b", "a", 0.6)] {
            sink.emit(&HydeRecord {
                p1: p1.into(),
                hybrid: hybrid.into(),
                p2: "c".into(),
                test: HydeTest {
                    zscore: 3.0,
                    pvalue: 0.001,
                    gamma,
                    patterns: PatternCounts::default(),
                },
            })
            .unwrap();
        }
        sink.finish().unwrap();
        drop(sink);

        assert_eq!(write_cf_table_file(&out, &cf, "og").unwrap(), 1);
        let text = std::fs::read_to_string(&cf).unwrap();
        assert_eq!(text.lines().nth(1), Some("a,b,c,og,0.3,0,0.7"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
