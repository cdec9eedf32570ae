// summary.rs - Per-triple statistics across bootstrap replicates

use crate::output::sink::HydeRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// Mean and population standard deviation of a set of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub sd: f64,
}

impl Moments {
    /// Moments over the finite values; NaN when there are none
    pub fn from_values(values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self {
                mean: f64::NAN,
                sd: f64::NAN,
            };
        }
        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            sd: variance.sqrt(),
        }
    }
}

/// Bootstrap summary for one `(P1, Hybrid, P2)` triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripleSummary {
    pub p1: String,
    pub hybrid: String,
    pub p2: String,
    pub replicates: usize,
    pub zscore: Moments,
    pub pvalue: Moments,
    pub gamma: Moments,
    pub abba_baba: Moments,
}

/// Summarize every triple seen in `blocks`, in first-appearance order
pub fn summarize(blocks: &[Vec<HydeRecord>]) -> Vec<TripleSummary> {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String, String), Vec<&HydeRecord>> = HashMap::new();

    for record in blocks.iter().flatten() {
        let key = (record.p1.clone(), record.hybrid.clone(), record.p2.clone());
        grouped
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let records = grouped.remove(&key)?;
            let column = |f: fn(&HydeRecord) -> f64| -> Vec<f64> { records.iter().map(|r| f(r)).collect() };
            Some(TripleSummary {
                replicates: records.len(),
                zscore: Moments::from_values(&column(|r: &HydeRecord| r.test.zscore)),
                pvalue: Moments::from_values(&column(|r: &HydeRecord| r.test.pvalue)),
                gamma: Moments::from_values(&column(|r: &HydeRecord| r.test.gamma)),
                abba_baba: Moments::from_values(&column(|r: &HydeRecord| r.test.patterns.abba_baba())),
                p1: key.0,
                hybrid: key.1,
                p2: key.2,
            })
        })
        .collect()
}

/// Write summaries as a TSV table
pub fn write_summary_tsv<W: Write>(writer: &mut W, summaries: &[TripleSummary]) -> Result<(), String> {
    writeln!(
        writer,
        "P1\tHybrid\tP2\tReplicates\tZscoreMean\tZscoreSD\tPvalueMean\tPvalueSD\tGammaMean\tGammaSD\tDMean\tDSD"
    )
    .map_err(|e| format!("Write error: {}", e))?;

    for s in summaries {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            s.p1,
            s.hybrid,
            s.p2,
            s.replicates,
            s.zscore.mean,
            s.zscore.sd,
            s.pvalue.mean,
            s.pvalue.sd,
            s.gamma.mean,
            s.gamma.sd,
            s.abba_baba.mean,
            s.abba_baba.sd
        )
        .map_err(|e| format!("Write error: {}", e))?;
    }
    Ok(())
}

/// Write summaries as a pretty-printed JSON array
pub fn write_summary_json<W: Write>(writer: &mut W, summaries: &[TripleSummary]) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *writer, summaries)
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;
    writeln!(writer).map_err(|e| format!("Write error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::{PatternCounts, ABAB, ABBA};
    use crate::core::statistic::HydeTest;

    fn record(p1: &str, zscore: f64, gamma: f64, abba: f64, abab: f64) -> HydeRecord {
        let mut patterns = PatternCounts::default();
        patterns.values[ABBA] = abba;
        patterns.values[ABAB] = abab;
        HydeRecord {
            p1: p1.into(),
            hybrid: "h".into(),
            p2: "p2".into(),
            test: HydeTest {
                zscore,
                pvalue: 0.5,
                gamma,
                patterns,
            },
        }
    }

    #[test]
    fn test_population_moments() {
        let m = Moments::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(m.mean, 5.0);
        assert_eq!(m.sd, 2.0);

        let nan = Moments::from_values(&[f64::NAN]);
        assert!(nan.mean.is_nan() && nan.sd.is_nan());
    }

    #[test]
    fn test_summarize_groups_by_triple() {
        let blocks = vec![
            vec![record("a", 1.0, 0.2, 3.0, 1.0), record("b", 10.0, 0.5, 1.0, 1.0)],
            vec![record("a", 3.0, 0.4, 1.0, 1.0)],
        ];
        let summaries = summarize(&blocks);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].p1, "a");
        assert_eq!(summaries[0].replicates, 2);
        assert_eq!(summaries[0].zscore, Moments { mean: 2.0, sd: 1.0 });
        assert!((summaries[0].gamma.mean - 0.3).abs() < 1e-12);
        // D = 0.5 and 0.0
        assert!((summaries[0].abba_baba.mean - 0.25).abs() < 1e-12);
        assert_eq!(summaries[1].zscore.sd, 0.0);
    }

    #[test]
    fn test_writers() {
        let summaries = summarize(&[vec![record("a", 1.0, 0.2, 3.0, 1.0)]]);
        let mut tsv = Vec::new();
        write_summary_tsv(&mut tsv, &summaries).unwrap();
        let text = String::from_utf8(tsv).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("a\th\tp2\t1\t1.000000\t0.000000"));

        let mut json = Vec::new();
        write_summary_json(&mut json, &summaries).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value[0]["replicates"], 1);
        assert_eq!(value[0]["abba_baba"]["mean"], 0.5);
    }
}
