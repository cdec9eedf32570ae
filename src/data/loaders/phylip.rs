// phylip.rs - Sequential PHYLIP loader

use crate::data::bases::encode;
use std::io::BufRead;

/// A named sequence already converted to base codes
#[derive(Debug, Clone)]
pub struct EncodedSequence {
    pub name: String,
    pub codes: Vec<u8>,
}

/// True for an `nind nsites` header line
fn is_header(line: &str) -> bool {
    let fields: Vec<&str> = line.split_whitespace().collect();
    fields.len() == 2 && fields.iter().all(|f| f.parse::<usize>().is_ok())
}

/// Read sequential PHYLIP (`name sequence` per line, optional header)
pub fn read_phylip<R: BufRead>(reader: R) -> Result<Vec<EncodedSequence>, String> {
    let mut sequences = Vec::new();
    let mut first_line = true;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read sequence line {}: {}", line_num + 1, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if std::mem::take(&mut first_line) && is_header(trimmed) {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let name = fields.next().unwrap_or_default();
        let sequence: String = fields.collect();
        if sequence.is_empty() {
            return Err(format!(
                "Sequence line {}: '{}' has no sequence data",
                line_num + 1,
                name
            ));
        }

        let codes = sequence
            .bytes()
            .enumerate()
            .map(|(col, ch)| {
                encode(ch).ok_or_else(|| {
                    format!(
                        "Sequence line {}: invalid base '{}' at site {} of '{}'",
                        line_num + 1,
                        ch as char,
                        col + 1,
                        name
                    )
                })
            })
            .collect::<Result<Vec<u8>, String>>()?;

        sequences.push(EncodedSequence {
            name: name.to_string(),
            codes,
        });
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bases::{GAP, MISSING};

    #[test]
    fn test_read_with_header() {
        let text = "2 4\nind1 ACGT\nind2 a-n?\n";
        let seqs = read_phylip(text.as_bytes()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].codes, vec![0, 2, 1, 3]);
        assert_eq!(seqs[1].codes, vec![0, GAP, MISSING, MISSING]);
    }

    #[test]
    fn test_read_without_header() {
        let seqs = read_phylip("ind1\tAAGG\nind2\tRYKM\n".as_bytes()).unwrap();
        assert_eq!(seqs[1].name, "ind2");
        assert_eq!(seqs[1].codes, vec![6, 9, 10, 5]);
    }

    #[test]
    fn test_header_after_blank_line() {
        let seqs = read_phylip("\n2 2\nind1 AC\nind2 GT\n".as_bytes()).unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].name, "ind1");
        assert_eq!(seqs[1].codes, vec![1, 3]);
    }

    #[test]
    fn test_invalid_base() {
        let err = read_phylip("ind1 ACXT\n".as_bytes()).unwrap_err();
        assert!(err.contains("site 3"));
    }
}
