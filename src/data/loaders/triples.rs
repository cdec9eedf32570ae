// triples.rs - Loader for user-selected (P1, Hybrid, P2) triples

use std::io::BufRead;

/// A triple of taxon names to test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTriple {
    pub p1: String,
    pub hybrid: String,
    pub p2: String,
}

/// Read a three-column table of triples.
///
/// A previous results file also works: its `P1 Hybrid P2 ...` header is
/// skipped and only the first three columns are used.
pub fn read_triples<R: BufRead>(reader: R) -> Result<Vec<NamedTriple>, String> {
    let mut triples = Vec::new();
    let mut first_line = true;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read triples line {}: {}", line_num + 1, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let is_header = first_line && fields.len() >= 3 && fields[..3] == ["P1", "Hybrid", "P2"];
        first_line = false;
        if is_header {
            continue;
        }
        if fields.len() < 3 {
            return Err(format!(
                "Triples line {}: expected 3 columns, found {}",
                line_num + 1,
                fields.len()
            ));
        }
        triples.push(NamedTriple {
            p1: fields[0].to_string(),
            hybrid: fields[1].to_string(),
            p2: fields[2].to_string(),
        });
    }

    if triples.is_empty() {
        return Err("Triples file lists no triples".to_string());
    }
    Ok(triples)
}
