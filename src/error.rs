//! Error types for geojsonify.

use thiserror::Error;

/// Configuration-shape errors. Every failure in this crate is a problem with
/// the caller-supplied settings, raised before any document is produced;
/// records missing their mapped fields are never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no geometry attributes specified")]
    NoGeometryFields,

    #[error("invalid geometry entry \"{0}\": expected a field name or a two-element [lat, lon] array")]
    InvalidGeometryEntry(String),

    #[error("invalid CRS: must contain \"type\" key")]
    CrsMissingType,

    #[error("invalid CRS: type must be \"name\" or \"link\", got {0}")]
    CrsUnsupportedType(String),

    #[error("invalid CRS: properties must contain \"name\" key")]
    CrsMissingName,

    #[error("invalid CRS: properties must contain \"href\" and \"type\" key")]
    CrsMissingLinkKeys,
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
