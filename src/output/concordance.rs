// concordance.rs - Concordance-factor table derived from gamma estimates

use crate::output::sink::HydeRecord;
use std::collections::HashSet;
use std::io::Write;

/// One quartet with the concordance factors of its three splits
#[derive(Debug, Clone, PartialEq)]
pub struct ConcordanceRow {
    pub taxa: [String; 4],
    pub cf12_34: f64,
    pub cf13_24: f64,
    pub cf14_23: f64,
}

/// One row per unordered ingroup triple, from its first record.
///
/// The hybrid's gamma is read as the share of the `(P1,Hybrid | P2,out)`
/// split and `1 - gamma` as the `(P1,out | Hybrid,P2)` split.
pub fn concordance_rows(records: &[HydeRecord], outgroup: &str) -> Vec<ConcordanceRow> {
    let mut seen: HashSet<[String; 3]> = HashSet::new();
    let mut rows = Vec::new();

    for record in records {
        let mut key = [record.p1.clone(), record.hybrid.clone(), record.p2.clone()];
        key.sort();
        if !seen.insert(key) {
            continue;
        }
        let gamma = record.test.gamma.abs();
        rows.push(ConcordanceRow {
            taxa: [
                record.p1.clone(),
                record.hybrid.clone(),
                record.p2.clone(),
                outgroup.to_string(),
            ],
            cf12_34: gamma,
            cf13_24: 0.0,
            cf14_23: 1.0 - gamma,
        });
    }
    rows
}

/// Write the comma-separated table
pub fn write_cf_table<W: Write>(writer: &mut W, rows: &[ConcordanceRow]) -> Result<(), String> {
    writeln!(writer, "t1,t2,t3,t4,CF12_34,CF13_24,CF14_23").map_err(|e| format!("Write error: {}", e))?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            row.taxa[0], row.taxa[1], row.taxa[2], row.taxa[3], row.cf12_34, row.cf13_24, row.cf14_23
        )
        .map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))
}
