use thiserror::Error;

/// Usage errors on a [`Cable`](crate::models::Cable).
///
/// Noisy cable text never ends up here; extractors degrade to empty results instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CableError {
    /// `Cable::new` was called with an empty identifier
    #[error("the reference id must be provided")]
    MissingIdentifier,

    /// Not of the form `<yy><STATION><serial>`
    #[error("not a cable identifier: {0}")]
    InvalidIdentifier(String),

    /// A derived value needs the creation date
    #[error("the \"created\" property must be provided")]
    MissingCreated,

    /// The creation date does not start with `YYYY-MM-DD`
    #[error("invalid creation date: {created}")]
    InvalidCreated { created: String },
}
