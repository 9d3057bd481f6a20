mod dump;
mod stats;

use anyhow::Result;
use cablemap::{
    correct_identifier, parse_identifier, Cable, CableError, CableRecord, CorrectionKind,
};
use config::Config;
use dump::CableInput;
use stats::FieldCoverage;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

struct Extracted {
    record: CableRecord,
    correction: CorrectionKind,
}

fn extract(input: CableInput) -> Result<Extracted, CableError> {
    let corrected = correct_identifier(&input.identifier);
    match corrected.kind {
        CorrectionKind::Unchanged => {}
        CorrectionKind::InvalidLowConfidence => warn!(
            raw = %input.identifier,
            corrected = corrected.identifier,
            "low-confidence identifier correction"
        ),
        kind => debug!(
            raw = %input.identifier,
            corrected = corrected.identifier,
            ?kind,
            "identifier corrected"
        ),
    }

    let origin = input
        .origin
        .or_else(|| parse_identifier(corrected.identifier).map(|id| id.station.to_string()));

    let mut cable = Cable::new(corrected.identifier)?.with_partial(input.partial);
    if let Some(origin) = origin {
        cable = cable.with_origin(origin);
    }
    if let Some(header) = input.header {
        cable = cable.with_header(header);
    }
    if let Some(body) = input.body {
        cable = cable.with_content(body);
    }
    if let Some(created) = input.created {
        cable = cable.with_created(created);
    }
    if let Some(released) = input.released {
        cable = cable.with_released(released);
    }

    Ok(Extracted {
        record: cable.to_record(),
        correction: corrected.kind,
    })
}

fn keep_extracted(result: Result<Extracted, CableError>) -> Option<Extracted> {
    result
        .map_err(|e| warn!(error = %e, "skipping cable"))
        .ok()
}

#[cfg(feature = "rayon")]
fn extract_all(inputs: Vec<CableInput>) -> Vec<Extracted> {
    inputs
        .into_par_iter()
        .map(extract)
        .filter_map(keep_extracted)
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn extract_all(inputs: Vec<CableInput>) -> Vec<Extracted> {
    inputs
        .into_iter()
        .map(extract)
        .filter_map(keep_extracted)
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Config::builder()
        .set_default("input", dump::DEFAULT_INPUT)?
        .add_source(config::Environment::with_prefix("CABLEMAP"))
        .build()
        .unwrap_or_default();

    info!(settings_loaded = ?settings, msg = "Starting cable extraction");

    let input = settings
        .get_string("input")
        .unwrap_or_else(|_| dump::DEFAULT_INPUT.to_string());
    let output = settings.get_string("output").ok().map(PathBuf::from);

    let path = dump::input_path(&input);
    let cables = dump::load_cables(&path)?;
    info!(path = ?path, count = cables.len(), "loaded cables");
    if cables.is_empty() {
        return Ok(());
    }

    let extracted = extract_all(cables);
    let corrections: Vec<CorrectionKind> = extracted.iter().map(|e| e.correction).collect();
    let records: Vec<CableRecord> = extracted.into_iter().map(|e| e.record).collect();

    dump::write_records(output.as_deref(), &records)?;
    FieldCoverage::new(&records, &corrections).print();
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixtures() -> Vec<Extracted> {
        extract_all(dump::load_cables(Path::new("tests/fixtures/cables.json")).unwrap())
    }

    #[test]
    fn extracts_every_cable_in_order() {
        let ids: Vec<String> = fixtures().into_iter().map(|e| e.record.identifier).collect();
        assert_eq!(ids, ["10TOKYO397", "08SAOPAULO335", "09STATE126780"]);
    }

    #[test]
    fn corrections_are_reported() {
        let kinds: Vec<CorrectionKind> = fixtures().iter().map(|e| e.correction).collect();
        assert_eq!(
            kinds,
            [
                CorrectionKind::Unchanged,
                CorrectionKind::Malformed,
                CorrectionKind::InvalidLowConfidence
            ]
        );
    }

    #[test]
    fn origin_falls_back_to_identifier() {
        let extracted = fixtures();
        assert_eq!(extracted[0].record.origin.as_deref(), Some("Embassy Tokyo"));
        assert_eq!(extracted[1].record.origin.as_deref(), Some("SAOPAULO"));
    }

    #[test]
    fn partial_cable_keeps_content_fields() {
        let extracted = fixtures();
        let sao_paulo = &extracted[1].record;
        assert!(sao_paulo.partial);
        assert!(sao_paulo.recipients.is_empty());
        assert_eq!(sao_paulo.subject, "SAO PAULO BANKERS ON CREDIT CONDITIONS");
        assert_eq!(
            sao_paulo.references,
            ["08SAOPAULO301", "08BRASILIA799", "08BRASILIA812"]
        );
    }

    #[test]
    fn empty_identifier_is_skipped() {
        let input: CableInput = serde_json::from_str(r#"{"identifier": ""}"#).unwrap();
        assert!(keep_extracted(extract(input)).is_none());
    }
}
