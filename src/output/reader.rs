// reader.rs - Parse result and bootstrap files back into records

use crate::core::patterns::{PatternCounts, NUM_PATTERNS};
use crate::core::statistic::HydeTest;
use crate::output::sink::{HydeRecord, REPLICATE_DELIMITER};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const NUM_COLUMNS: usize = 6 + NUM_PATTERNS;

fn parse_field(value: &str, column: &str, line_num: usize) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|e| format!("Line {}: invalid {} value '{}': {}", line_num, column, value, e))
}

/// Parse one tab-delimited record line
pub fn parse_record(line: &str, line_num: usize) -> Result<HydeRecord, String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() != NUM_COLUMNS {
        return Err(format!(
            "Line {}: expected {} columns, found {}",
            line_num,
            NUM_COLUMNS,
            fields.len()
        ));
    }

    let mut patterns = PatternCounts::default();
    for (i, value) in fields[6..].iter().enumerate() {
        patterns.values[i] = parse_field(value, "pattern count", line_num)?;
    }

    Ok(HydeRecord {
        p1: fields[0].to_string(),
        hybrid: fields[1].to_string(),
        p2: fields[2].to_string(),
        test: HydeTest {
            zscore: parse_field(fields[3], "Zscore", line_num)?,
            pvalue: parse_field(fields[4], "Pvalue", line_num)?,
            gamma: parse_field(fields[5], "Gamma", line_num)?,
            patterns,
        },
    })
}

/// Read a results file as blocks of records.
///
/// A plain results file yields one block; bootstrap files yield one block per
/// replicate. Header lines are skipped wherever they occur.
pub fn read_blocks<R: BufRead>(reader: R) -> Result<Vec<Vec<HydeRecord>>, String> {
    let mut blocks = vec![Vec::new()];

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num, e))?;
        let trimmed = line.trim_end();

        if trimmed.is_empty() || trimmed.starts_with("P1\t") {
            continue;
        }
        if trimmed == REPLICATE_DELIMITER {
            blocks.push(Vec::new());
            continue;
        }

        let record = parse_record(trimmed, line_num)?;
        if let Some(block) = blocks.last_mut() {
            block.push(record);
        }
    }

    Ok(blocks)
}

/// Read a results or bootstrap file from disk
pub fn read_blocks_file(path: &Path) -> Result<Vec<Vec<HydeRecord>>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open results file '{}': {}", path.display(), e))?;
    read_blocks(BufReader::new(file)).map_err(|e| format!("{}: {}", path.display(), e))
}
