//! Metadata extraction for diplomatic cables: references to other cables,
//! subject, classifying official, recipients and the other header fields.

pub mod corrections;
pub mod error;
pub mod models;
pub mod reader;
pub mod stations;
pub mod utils;

pub use corrections::{correct_identifier, malformed_alias, Corrected, CorrectionKind};
pub use error::CableError;
pub use models::{Cable, CableRecord};
pub use stations::{parse_identifier, CableId};
