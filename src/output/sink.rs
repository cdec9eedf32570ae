// sink.rs - Thread-safe destinations for quartet records

use crate::core::patterns::PATTERN_NAMES;
use crate::core::statistic::HydeTest;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

/// Line separating bootstrap replicate blocks
pub const REPLICATE_DELIMITER: &str = "####";

/// One output row: the tested triple and its statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydeRecord {
    pub p1: String,
    pub hybrid: String,
    pub p2: String,
    pub test: HydeTest,
}

impl HydeRecord {
    /// Tab-delimited row without trailing newline
    pub fn to_tsv(&self) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.p1, self.hybrid, self.p2, self.test.zscore, self.test.pvalue, self.test.gamma
        );
        for value in self.test.patterns.values.iter() {
            line.push('\t');
            line.push_str(&value.to_string());
        }
        line
    }
}

/// Column header shared by all result files
pub fn header_line() -> String {
    let mut header = String::from("P1\tHybrid\tP2\tZscore\tPvalue\tGamma");
    for name in PATTERN_NAMES {
        header.push('\t');
        header.push_str(name);
    }
    header
}

/// Destination for records produced by parallel workers.
///
/// Implementations serialize concurrent calls; records arrive in no
/// particular order.
pub trait RecordSink: Sync {
    /// Start a block of records (writes the column header)
    fn header(&self) -> Result<(), String>;

    /// Write one complete record
    fn emit(&self, record: &HydeRecord) -> Result<(), String>;

    /// Separate two bootstrap replicate blocks
    fn delimiter(&self) -> Result<(), String>;

    /// Flush buffered output
    fn finish(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Writes TSV lines to any `Write`, one writer at a time
pub struct TsvSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> TsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn write_line(&self, line: &str) -> Result<(), String> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| "Output writer lock poisoned".to_string())?;
        writeln!(writer, "{}", line).map_err(|e| format!("Write error: {}", e))
    }

    pub fn into_inner(self) -> Result<W, String> {
        self.writer
            .into_inner()
            .map_err(|_| "Output writer lock poisoned".to_string())
    }
}

impl<W: Write + Send> RecordSink for TsvSink<W> {
    fn header(&self) -> Result<(), String> {
        self.write_line(&header_line())
    }

    fn emit(&self, record: &HydeRecord) -> Result<(), String> {
        self.write_line(&record.to_tsv())
    }

    fn delimiter(&self) -> Result<(), String> {
        self.write_line(REPLICATE_DELIMITER)
    }

    fn finish(&self) -> Result<(), String> {
        self.writer
            .lock()
            .map_err(|_| "Output writer lock poisoned".to_string())?
            .flush()
            .map_err(|e| format!("Flush error: {}", e))
    }
}

/// Everything a sink was asked to do, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Header,
    Record(HydeRecord),
    Delimiter,
}

/// Collects events in memory
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: SinkEvent) -> Result<(), String> {
        self.events
            .lock()
            .map_err(|_| "Memory sink lock poisoned".to_string())?
            .push(event);
        Ok(())
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn records(&self) -> Vec<HydeRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Record(r) => Some(r),
                _ => None,
            })
            .collect()
    }
}

impl RecordSink for MemorySink {
    fn header(&self) -> Result<(), String> {
        self.push(SinkEvent::Header)
    }

    fn emit(&self, record: &HydeRecord) -> Result<(), String> {
        self.push(SinkEvent::Record(record.clone()))
    }

    fn delimiter(&self) -> Result<(), String> {
        self.push(SinkEvent::Delimiter)
    }
}

/// Forwards everything to `all`, and significant records also to `significant`.
///
/// A record is significant when its p-value beats the Bonferroni-corrected
/// level and its gamma lies strictly inside (0, 1).
pub struct FilteringSink<'a> {
    all: &'a dyn RecordSink,
    significant: &'a dyn RecordSink,
    threshold: f64,
}

impl<'a> FilteringSink<'a> {
    pub fn new(
        all: &'a dyn RecordSink,
        significant: &'a dyn RecordSink,
        alpha: f64,
        num_tests: usize,
    ) -> Self {
        Self {
            all,
            significant,
            threshold: alpha / num_tests.max(1) as f64,
        }
    }

    pub fn is_significant(&self, record: &HydeRecord) -> bool {
        record.test.pvalue < self.threshold && record.test.gamma > 0.0 && record.test.gamma < 1.0
    }
}

impl RecordSink for FilteringSink<'_> {
    fn header(&self) -> Result<(), String> {
        self.all.header()?;
        self.significant.header()
    }

    fn emit(&self, record: &HydeRecord) -> Result<(), String> {
        self.all.emit(record)?;
        if self.is_significant(record) {
            self.significant.emit(record)?;
        }
        Ok(())
    }

    fn delimiter(&self) -> Result<(), String> {
        self.all.delimiter()?;
        self.significant.delimiter()
    }

    fn finish(&self) -> Result<(), String> {
        self.all.finish()?;
        self.significant.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::PatternCounts;

    fn record(pvalue: f64, gamma: f64) -> HydeRecord {
        let mut patterns = PatternCounts::default();
        patterns.values[0] = 12.5;
        HydeRecord {
            p1: "sp1".into(),
            hybrid: "sp2".into(),
            p2: "sp3".into(),
            test: HydeTest {
                zscore: 3.5,
                pvalue,
                gamma,
                patterns,
            },
        }
    }

    #[test]
    fn test_header_has_21_columns() {
        let header = header_line();
        let cols: Vec<&str> = header.split('\t').collect();
        assert_eq!(cols.len(), 21);
        assert_eq!(cols[3], "Zscore");
        assert_eq!(cols[6], "AAAA");
        assert_eq!(cols[20], "ABCD");
    }

    #[test]
    fn test_tsv_sink_output() {
        let sink = TsvSink::new(Vec::new());
        sink.header().unwrap();
        sink.emit(&record(0.001, 0.4)).unwrap();
        sink.delimiter().unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("sp1\tsp2\tsp3\t3.5\t0.001\t0.4\t12.5\t0"));
        assert_eq!(lines[1].split('\t').count(), 21);
        assert_eq!(lines[2], "####");
    }

    #[test]
    fn test_filtering_sink() {
        let all = MemorySink::new();
        let significant = MemorySink::new();
        let sink = FilteringSink::new(&all, &significant, 0.05, 10);
        sink.header().unwrap();
        sink.emit(&record(0.001, 0.4)).unwrap();
        sink.emit(&record(0.01, 0.4)).unwrap();
        sink.emit(&record(0.001, 1.2)).unwrap();
        sink.emit(&record(0.001, f64::NAN)).unwrap();
        assert_eq!(all.records().len(), 4);
        assert_eq!(significant.records(), vec![record(0.001, 0.4)]);
        assert_eq!(significant.events()[0], SinkEvent::Header);
    }
}
