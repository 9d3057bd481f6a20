use anyhow::{Context, Result};
use cablemap::CableRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "data/cables.json";

/// A raw cable as exported by the HTML-to-text step.
#[derive(Debug, Clone, Deserialize)]
pub struct CableInput {
    pub identifier: String,
    pub origin: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
    pub created: Option<String>,
    pub released: Option<String>,
    #[serde(default)]
    pub partial: bool,
}

/// Resolves the input dump, looking next to and above the working directory
/// when the configured path does not exist.
pub fn input_path(configured: &str) -> PathBuf {
    let configured = PathBuf::from(configured);
    if configured.exists() || configured.is_absolute() {
        return configured;
    }
    [PathBuf::from("..").join(&configured), PathBuf::from("../..").join(&configured)]
        .into_iter()
        .find(|p| p.exists())
        .unwrap_or(configured)
}

/// Reads a JSON array of raw cables.
pub fn load_cables(path: &Path) -> Result<Vec<CableInput>> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let cables = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {:?}", path))?;
    Ok(cables)
}

/// Writes one JSON record per line to `path`, or to stdout.
pub fn write_records(path: Option<&Path>, records: &[CableRecord]) -> Result<()> {
    let sink: Box<dyn Write> = match path {
        Some(p) => Box::new(File::create(p).with_context(|| format!("Failed to create {:?}", p))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_from_fixture() {
        let json = std::fs::read_to_string("tests/fixtures/cable_10TOKYO397.json").unwrap();
        let input: CableInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.identifier, "10TOKYO397");
        assert!(!input.partial);
        assert!(input.header.unwrap().starts_with("VZCZC"));
    }

    #[test]
    fn optional_fields_default() {
        let input: CableInput = serde_json::from_str(r#"{"identifier": "09BERLIN1"}"#).unwrap();
        assert!(input.body.is_none());
        assert!(!input.partial);
    }

    #[test]
    fn load_array() {
        let cables = load_cables(Path::new("tests/fixtures/cables.json")).unwrap();
        assert_eq!(cables.len(), 3);
        assert!(cables.iter().any(|c| c.partial));
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_cables(Path::new("tests/fixtures/nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
