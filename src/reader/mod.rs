//! Field extractors over raw cable text.
//!
//! Every function here is pure: a miss yields an empty or absent value, never an error.

pub mod classificationist;
pub mod content;
pub mod header;
pub mod references;
pub mod subject;

pub use classificationist::parse_classificationist;
pub use content::{
    header_body_from_content, parse_classification, parse_nondisclosure_deadline, parse_summary,
    parse_tags,
};
pub use header::{parse_info_recipients, parse_recipients, parse_transmission_id, Recipient};
pub use references::parse_references;
pub use subject::parse_subject;
