// map.rs - Taxon map loader (individual → taxon)

use std::collections::HashSet;
use std::io::BufRead;

/// One line of a taxon map file
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub individual: String,
    pub taxon: String,
}

/// Read a two-column, whitespace-separated taxon map
pub fn read_taxon_map<R: BufRead>(reader: R) -> Result<Vec<MapEntry>, String> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read map line {}: {}", line_num + 1, e))?;
        let mut fields = line.split_whitespace();
        let individual = match fields.next() {
            Some(f) => f,
            None => continue,
        };
        let taxon = fields.next().ok_or_else(|| {
            format!(
                "Map line {}: individual '{}' has no taxon column",
                line_num + 1,
                individual
            )
        })?;

        if !seen.insert(individual.to_string()) {
            return Err(format!(
                "Map line {}: individual '{}' listed more than once",
                line_num + 1,
                individual
            ));
        }

        entries.push(MapEntry {
            individual: individual.to_string(),
            taxon: taxon.to_string(),
        });
    }

    if entries.is_empty() {
        return Err("Taxon map is empty".to_string());
    }
    Ok(entries)
}

/// Taxon names in order of first appearance
pub fn taxon_order(entries: &[MapEntry]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        if !names.contains(&entry.taxon) {
            names.push(entry.taxon.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_map() {
        let text = "out1\tout\nind1 sp1\n\nind2   sp1\nind3\tsp2\n";
        let entries = read_taxon_map(text.as_bytes()).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].individual, "ind2");
        assert_eq!(entries[2].taxon, "sp1");
        assert_eq!(taxon_order(&entries), vec!["out", "sp1", "sp2"]);
    }

    #[test]
    fn test_missing_taxon_column() {
        let err = read_taxon_map("ind1 sp1\nind2\n".as_bytes()).unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_duplicate_individual() {
        let err = read_taxon_map("ind1 sp1\nind1 sp2\n".as_bytes()).unwrap_err();
        assert!(err.contains("more than once"));
    }
}
