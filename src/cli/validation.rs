// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::AmbiguityPolicy;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ValidationResult {
    pub infile: PathBuf,
    pub map: PathBuf,
    pub outgroup: String,
    pub triples: Option<PathBuf>,
    pub policy: AmbiguityPolicy,
}

fn existing_file(value: &Option<String>, flag: &str) -> Result<PathBuf, String> {
    let path = value
        .as_ref()
        .ok_or_else(|| format!("{} is required", flag))?;
    let path = Path::new(path);
    if !path.is_file() {
        return Err(format!("{} file '{}' not found", flag, path.display()));
    }
    Ok(path.to_path_buf())
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let infile = existing_file(&args.infile, "--infile")?;
    let map = existing_file(&args.map, "--map")?;
    let outgroup = args
        .outgroup
        .clone()
        .ok_or_else(|| "--outgroup is required".to_string())?;

    let triples = match args.triples {
        Some(_) => Some(existing_file(&args.triples, "--triples")?),
        None => None,
    };

    if !(args.pvalue > 0.0 && args.pvalue < 1.0) {
        return Err(format!("--pvalue must be between 0 and 1 (got {})", args.pvalue));
    }
    if args.individuals && triples.is_none() {
        return Err("--individuals requires --triples to name the hybrid taxa".to_string());
    }
    if args.individuals && args.bootstrap > 0 {
        return Err("--bootstrap is not available with --individuals".to_string());
    }
    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }
    if args.prefix.trim().is_empty() {
        return Err("--prefix must not be empty".to_string());
    }

    let policy = if args.ignore_amb_sites {
        AmbiguityPolicy::Ignore
    } else {
        AmbiguityPolicy::Distribute
    };

    Ok(ValidationResult {
        infile,
        map,
        outgroup,
        triples,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn scratch_file(name: &str) -> String {
        let path = std::env::temp_dir().join(format!("hyde-validation-{}-{}", std::process::id(), name));
        std::fs::write(&path, "x\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn parse(extra: &[&str]) -> Args {
        let infile = scratch_file("in.phy");
        let map = scratch_file("map.txt");
        let mut argv = vec!["--infile", infile.as_str(), "--map", map.as_str(), "--outgroup", "out"];
        argv.extend_from_slice(extra);
        Args::from_args(&["hyde"], &argv).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let result = validate_args(&parse(&[])).unwrap();
        assert_eq!(result.outgroup, "out");
        assert_eq!(result.policy, AmbiguityPolicy::Distribute);
        assert!(result.triples.is_none());

        let result = validate_args(&parse(&["--ignore-amb-sites"])).unwrap();
        assert_eq!(result.policy, AmbiguityPolicy::Ignore);
    }

    #[test]
    fn test_rejected_arguments() {
        assert!(validate_args(&parse(&["--pvalue", "1.5"])).is_err());
        assert!(validate_args(&parse(&["--pvalue", "0"])).is_err());
        assert!(validate_args(&parse(&["--individuals"])).unwrap_err().contains("--triples"));
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());
        assert!(validate_args(&parse(&["--triples", "/nonexistent/triples.txt"])).is_err());
    }
}
