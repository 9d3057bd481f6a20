use cablemap::{CableRecord, CorrectionKind};

/// How many cables yielded each field, plus identifier corrections.
pub struct FieldCoverage {
    total: usize,
    fields: Vec<(&'static str, usize)>,
    corrected: usize,
    low_confidence: usize,
}

impl FieldCoverage {
    pub fn new(records: &[CableRecord], corrections: &[CorrectionKind]) -> Self {
        let count = |f: fn(&CableRecord) -> bool| records.iter().filter(|r| f(r)).count();
        let fields = vec![
            ("subject", count(|r| !r.subject.is_empty())),
            ("references", count(|r| !r.references.is_empty())),
            ("tags", count(|r| !r.tags.is_empty())),
            ("summary", count(|r| r.summary.is_some())),
            ("recipients", count(|r| !r.recipients.is_empty())),
            ("info", count(|r| !r.info.is_empty())),
            ("classification", count(|r| !r.classification.is_empty())),
            ("partial", count(|r| r.partial)),
        ];
        FieldCoverage {
            total: records.len(),
            fields,
            corrected: corrections
                .iter()
                .filter(|k| **k != CorrectionKind::Unchanged)
                .count(),
            low_confidence: corrections
                .iter()
                .filter(|k| **k == CorrectionKind::InvalidLowConfidence)
                .count(),
        }
    }

    #[cfg(test)]
    fn get(&self, field: &str) -> Option<usize> {
        self.fields.iter().find(|(name, _)| *name == field).map(|(_, n)| *n)
    }

    /// Report goes to stderr; stdout may carry the records.
    pub fn print(&self) {
        eprintln!("Coverage over {} cables", self.total);
        for (name, n) in &self.fields {
            eprintln!("  {:<15} {:>6} ({:.1}%)", name, n, percent(*n, self.total));
        }
        eprintln!(
            "  identifiers corrected: {} ({} low confidence)",
            self.corrected, self.low_confidence
        );
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, references: &[&str]) -> CableRecord {
        let mut r: CableRecord = serde_json::from_str(r#"{"identifier": "09BERLIN1"}"#).unwrap();
        r.subject = subject.to_string();
        r.references = references.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn counts_fields_and_corrections() {
        let records = [record("A", &["09STATE1"]), record("", &[])];
        let kinds = [CorrectionKind::Unchanged, CorrectionKind::InvalidLowConfidence];
        let cov = FieldCoverage::new(&records, &kinds);
        assert_eq!(cov.get("subject"), Some(1));
        assert_eq!(cov.get("references"), Some(1));
        assert_eq!(cov.get("tags"), Some(0));
        assert_eq!(cov.get("nope"), None);
        assert_eq!(cov.corrected, 1);
        assert_eq!(cov.low_confidence, 1);
    }

    #[test]
    fn percent_of_nothing() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
