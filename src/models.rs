use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

use crate::corrections::malformed_alias;
use crate::error::CableError;
use crate::reader::{self, Recipient};

/// WikiLeaks mirrors; cables live at `BASE<yyyy>/<mm>/<id>[.html]`.
pub const WL_CABLE_BASE_URIS: &[&str] = &[
    "http://wikileaks.ch/cable/",
    "http://cablegate.wikileaks.org/cable/",
    "http://213.251.145.96/cable/",
];

/// A cable and the metadata extracted from it.
///
/// Raw fields are set once through the `with_*` builders. Every derived
/// field is computed on first access and cached for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Cable {
    reference_id: String,
    origin: Option<String>,
    header: Option<String>,
    content: Option<String>,
    created: Option<String>,
    released: Option<String>,
    partial: bool,

    transmission_id: OnceLock<Option<String>>,
    recipients: OnceLock<Vec<Recipient>>,
    info_recipients: OnceLock<Vec<Recipient>>,
    subject: OnceLock<String>,
    tags: OnceLock<Vec<String>>,
    summary: OnceLock<Option<String>>,
    nondisclosure_deadline: OnceLock<Option<String>>,
    references: OnceLock<Vec<String>>,
    classification: OnceLock<Vec<String>>,
    classificationist: OnceLock<Option<String>>,
    content_split: OnceLock<(Option<String>, Option<String>)>,
}

/// Field-for-field serialization of a [`Cable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableRecord {
    pub identifier: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: Option<String>,
    pub released: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub origin: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub info: Vec<Recipient>,
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub classification: Vec<String>,
    pub summary: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
}

impl Cable {
    pub fn new(reference_id: impl Into<String>) -> Result<Self, CableError> {
        let reference_id = reference_id.into();
        if reference_id.is_empty() {
            return Err(CableError::MissingIdentifier);
        }
        Ok(Cable {
            reference_id,
            origin: None,
            header: None,
            content: None,
            created: None,
            released: None,
            partial: false,
            transmission_id: OnceLock::new(),
            recipients: OnceLock::new(),
            info_recipients: OnceLock::new(),
            subject: OnceLock::new(),
            tags: OnceLock::new(),
            summary: OnceLock::new(),
            nondisclosure_deadline: OnceLock::new(),
            references: OnceLock::new(),
            classification: OnceLock::new(),
            classificationist: OnceLock::new(),
            content_split: OnceLock::new(),
        })
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    pub fn with_released(mut self, released: impl Into<String>) -> Self {
        self.released = Some(released.into());
        self
    }

    /// Partial cables lack a complete header.
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    pub fn released(&self) -> Option<&str> {
        self.released.as_deref()
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    fn id(&self) -> Option<&str> {
        Some(&self.reference_id)
    }

    fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or_default()
    }

    fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Year of creation, or the century-less year of the identifier.
    fn year(&self) -> Option<u16> {
        self.created
            .as_deref()
            .and_then(|c| c.get(..4))
            .and_then(|y| y.parse().ok())
            .or_else(|| {
                let yy: u16 = self.reference_id.get(..2)?.parse().ok()?;
                Some(2000 + yy)
            })
    }

    // Header fields

    pub fn transmission_id(&self) -> Option<&str> {
        self.transmission_id
            .get_or_init(|| {
                if self.partial {
                    return None;
                }
                reader::parse_transmission_id(self.header_text(), self.id())
            })
            .as_deref()
    }

    pub fn recipients(&self) -> &[Recipient] {
        self.recipients.get_or_init(|| {
            if self.partial {
                return Vec::new();
            }
            reader::parse_recipients(self.header_text(), self.id())
        })
    }

    pub fn info_recipients(&self) -> &[Recipient] {
        self.info_recipients
            .get_or_init(|| reader::parse_info_recipients(self.header_text(), self.id()))
    }

    // Content fields

    pub fn subject(&self) -> &str {
        self.subject
            .get_or_init(|| reader::parse_subject(self.content_text(), true))
    }

    pub fn nondisclosure_deadline(&self) -> Option<&str> {
        self.nondisclosure_deadline
            .get_or_init(|| reader::parse_nondisclosure_deadline(self.content_text()))
            .as_deref()
    }

    pub fn references(&self) -> &[String] {
        self.references.get_or_init(|| {
            let Some(year) = self.year() else {
                warn!(reference_id = %self.reference_id, "no year known, references skipped");
                return Vec::new();
            };
            reader::parse_references(self.content_text(), year, self.id())
        })
    }

    pub fn tags(&self) -> &[String] {
        self.tags
            .get_or_init(|| reader::parse_tags(self.content_text(), self.id()))
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary
            .get_or_init(|| reader::parse_summary(self.content_text(), self.id()))
            .as_deref()
    }

    pub fn classification(&self) -> &[String] {
        self.classification
            .get_or_init(|| reader::parse_classification(self.content_text()))
    }

    pub fn classificationist(&self) -> Option<&str> {
        self.classificationist
            .get_or_init(|| reader::parse_classificationist(self.content_text(), true))
            .as_deref()
    }

    fn content_split(&self) -> &(Option<String>, Option<String>) {
        self.content_split
            .get_or_init(|| reader::header_body_from_content(self.content_text()))
    }

    pub fn content_header(&self) -> Option<&str> {
        self.content_split().0.as_deref()
    }

    pub fn content_body(&self) -> Option<&str> {
        self.content_split().1.as_deref()
    }

    /// Links to the cable on the WikiLeaks mirrors, plain and `.html`.
    ///
    /// Cables whose identifier was corrected are linked under the identifier
    /// they were originally published with.
    pub fn wl_uris(&self) -> Result<Vec<String>, CableError> {
        let created = self.created.as_deref().ok_or(CableError::MissingCreated)?;
        let invalid = || CableError::InvalidCreated {
            created: created.to_string(),
        };
        let day = created.split_whitespace().next().ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid())?;
        let reference_id =
            malformed_alias(&self.reference_id).unwrap_or(self.reference_id.as_str());
        let path = format!("{}/{}", date.format("%Y/%m"), reference_id);
        Ok(WL_CABLE_BASE_URIS
            .iter()
            .flat_map(|base| [format!("{base}{path}"), format!("{base}{path}.html")])
            .collect())
    }

    /// Snapshot of the cable; computes any field not derived yet.
    pub fn to_record(&self) -> CableRecord {
        CableRecord {
            identifier: self.reference_id.clone(),
            tags: self.tags().to_vec(),
            created: self.created.clone(),
            released: self.released.clone(),
            subject: self.subject().to_string(),
            origin: self.origin.clone(),
            references: self.references().to_vec(),
            recipients: self.recipients().to_vec(),
            info: self.info_recipients().to_vec(),
            partial: self.partial,
            classification: self.classification().to_vec(),
            summary: self.summary().map(str::to_string),
            header: self.header.clone(),
            body: self.content.clone(),
        }
    }

    /// Rebuilds a cable from a record. Stored values are taken as resolved and
    /// are never re-derived from the text; fields the record does not carry
    /// stay empty.
    pub fn from_record(record: CableRecord) -> Result<Self, CableError> {
        if record.identifier.is_empty() {
            return Err(CableError::MissingIdentifier);
        }
        Ok(Cable {
            reference_id: record.identifier,
            origin: record.origin,
            header: record.header,
            content: record.body,
            created: record.created,
            released: record.released,
            partial: record.partial,
            transmission_id: OnceLock::from(None),
            recipients: OnceLock::from(record.recipients),
            info_recipients: OnceLock::from(record.info),
            subject: OnceLock::from(record.subject),
            tags: OnceLock::from(record.tags),
            summary: OnceLock::from(record.summary),
            nondisclosure_deadline: OnceLock::from(None),
            references: OnceLock::from(record.references),
            classification: OnceLock::from(record.classification),
            classificationist: OnceLock::from(None),
            content_split: OnceLock::from((None, None)),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fixture {
        identifier: String,
        origin: String,
        header: String,
        body: String,
        created: String,
        released: String,
        partial: bool,
    }

    fn tokyo(partial: bool) -> Cable {
        let json = std::fs::read_to_string("tests/fixtures/cable_10TOKYO397.json").unwrap();
        let f: Fixture = serde_json::from_str(&json).unwrap();
        Cable::new(f.identifier)
            .unwrap()
            .with_origin(f.origin)
            .with_header(f.header)
            .with_content(f.body)
            .with_created(f.created)
            .with_released(f.released)
            .with_partial(f.partial || partial)
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert_eq!(Cable::new("").unwrap_err(), CableError::MissingIdentifier);
    }

    #[test]
    fn header_fields() {
        let cable = tokyo(false);
        assert_eq!(cable.transmission_id(), Some("VZCZCXRO2216"));
        let to: Vec<&str> = cable.recipients().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(to, ["SECSTATE WASHDC", "AMEMBASSY BEIJING"]);
        assert_eq!(cable.info_recipients().len(), 3);
    }

    #[test]
    fn partial_cable_skips_header() {
        let cable = tokyo(true);
        assert_eq!(cable.transmission_id(), None);
        assert!(cable.recipients().is_empty());
        assert_eq!(cable.info_recipients().len(), 3);
    }

    #[test]
    fn content_fields() {
        let cable = tokyo(false);
        assert_eq!(cable.subject(), "JAPAN-CHINA RELATIONS: MOVING PAST THE GAS FIELD");
        assert_eq!(cable.references(), ["10STATE15541"]);
        assert_eq!(cable.tags(), ["PREL", "PGOV", "JA", "CH"]);
        assert_eq!(cable.nondisclosure_deadline(), Some("2020-02-12"));
        assert_eq!(cable.classification(), ["C", "SBU"]);
        assert_eq!(cable.classificationist(), Some("Marc Wall"));
        assert!(cable.summary().unwrap().starts_with("Japanese officials describe"));
        assert!(cable.summary().unwrap().ends_with("gas field talks."));
        assert!(cable.content_header().unwrap().contains("TAGS: PREL"));
        assert!(cable.content_body().unwrap().starts_with("¶1. (C) SUMMARY"));
    }

    #[test]
    fn fields_are_cached() {
        let cable = tokyo(false);
        let first = cable.references().as_ptr();
        assert_eq!(cable.references().as_ptr(), first);
        let subject = cable.subject().as_ptr();
        assert_eq!(cable.subject().as_ptr(), subject);
    }

    #[test]
    fn year_falls_back_to_identifier() {
        let cable = Cable::new("08BERLIN1").unwrap().with_content("REF: STATE 12");
        assert_eq!(cable.references(), ["08STATE12"]);
    }

    #[test]
    fn unknown_year_skips_references() {
        let cable = Cable::new("something").unwrap().with_content("REF: STATE 12");
        assert!(cable.references().is_empty());
        let dated = Cable::new("something")
            .unwrap()
            .with_content("REF: STATE 12")
            .with_created("2011-07-12 12:12:00");
        assert_eq!(dated.references(), ["11STATE12"]);
    }

    #[test]
    fn wl_uris_need_created() {
        let cable = Cable::new("something").unwrap();
        assert_eq!(cable.wl_uris().unwrap_err(), CableError::MissingCreated);
        let cable = Cable::new("something").unwrap().with_created("yesterday");
        assert!(matches!(cable.wl_uris(), Err(CableError::InvalidCreated { .. })));
    }

    #[test]
    fn wl_uris() {
        let cable = Cable::new("something").unwrap().with_created("2011-07-12 12:12:00");
        assert_eq!(
            cable.wl_uris().unwrap(),
            [
                "http://wikileaks.ch/cable/2011/07/something",
                "http://wikileaks.ch/cable/2011/07/something.html",
                "http://cablegate.wikileaks.org/cable/2011/07/something",
                "http://cablegate.wikileaks.org/cable/2011/07/something.html",
                "http://213.251.145.96/cable/2011/07/something",
                "http://213.251.145.96/cable/2011/07/something.html",
            ]
        );
    }

    #[test]
    fn wl_uris_use_malformed_alias() {
        let cable = Cable::new("08SAOPAULO335").unwrap().with_created("2008-06-20 11:00:00");
        let uris = cable.wl_uris().unwrap();
        assert_eq!(uris[0], "http://wikileaks.ch/cable/2008/06/08SCTION02OF02SAOPAULO335");
    }

    #[test]
    fn record_round_trip_is_stable() {
        let cable = tokyo(false);
        let record = cable.to_record();
        assert_eq!(record.info.len(), 3);
        assert_eq!(record.body.as_deref(), cable.content());

        let json = serde_json::to_string(&record).unwrap();
        let back: CableRecord = serde_json::from_str(&json).unwrap();
        let rebuilt = Cable::from_record(back).unwrap();
        assert_eq!(rebuilt.to_record(), record);
    }

    #[test]
    fn record_values_are_not_rederived() {
        let mut record = tokyo(false).to_record();
        record.subject = "EDITED".into();
        record.references.clear();
        let cable = Cable::from_record(record).unwrap();
        assert_eq!(cable.subject(), "EDITED");
        assert!(cable.references().is_empty());
        assert_eq!(cable.classificationist(), None);
    }

    #[test]
    fn record_defaults() {
        let record: CableRecord = serde_json::from_str(r#"{"identifier": "09BERLIN1"}"#).unwrap();
        assert!(record.tags.is_empty());
        assert!(!record.partial);
        assert_eq!(record.subject, "");
        let cable = Cable::from_record(record).unwrap();
        assert_eq!(cable.summary(), None);

        let empty: CableRecord = serde_json::from_str(r#"{"identifier": ""}"#).unwrap();
        assert_eq!(Cable::from_record(empty).unwrap_err(), CableError::MissingIdentifier);
    }

    #[test]
    fn cable_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cable>();
    }
}
