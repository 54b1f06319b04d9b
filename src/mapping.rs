use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::Settings;

/// Geometry types a mapping entry may be keyed by. `PassThrough` is the
/// `GeoJSON` pseudo-type: the mapped field already holds a complete geometry
/// object and is copied verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    PassThrough,
}

impl GeometryType {
    /// Parse a settings key. `None` for keys that are not geometry types.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Point" => Some(Self::Point),
            "MultiPoint" => Some(Self::MultiPoint),
            "LineString" => Some(Self::LineString),
            "MultiLineString" => Some(Self::MultiLineString),
            "Polygon" => Some(Self::Polygon),
            "MultiPolygon" => Some(Self::MultiPolygon),
            "GeoJSON" => Some(Self::PassThrough),
            _ => None,
        }
    }

    /// The `type` tag emitted into the geometry object.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::PassThrough => "GeoJSON",
        }
    }
}

/// Where one geometry entry reads its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometrySource {
    /// Two record fields in `[lat, lon]` order. Output coordinates are
    /// swapped to GeoJSON's `[lon, lat]`.
    LatLon { lat: String, lon: String },
    /// One record field holding a ready-made coordinate array, or a whole
    /// geometry object for the `GeoJSON` pseudo-type.
    Field(String),
}

/// Compiled geometry half of the settings: entries in configured order plus
/// the flattened set of record fields they consume. The field set is what
/// keeps geometry data out of feature properties.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryMapping {
    entries: Vec<(GeometryType, GeometrySource)>,
    fields: Vec<String>,
}

impl GeometryMapping {
    /// Compile the geometry-type keyed settings entries. Keys that are not
    /// geometry types are skipped; an entry whose value is neither a field
    /// name nor a `[lat, lon]` pair is rejected, as is a mapping that ends
    /// up consuming no record fields at all.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut entries = Vec::new();
        for (key, value) in &settings.geometry {
            let Some(geometry_type) = GeometryType::from_key(key) else {
                log::debug!("Ignoring unrecognized setting \"{}\"", key);
                continue;
            };
            let source = match value {
                Value::String(name) => GeometrySource::Field(name.clone()),
                Value::Array(pair) => match pair.as_slice() {
                    [Value::String(lat), Value::String(lon)] => GeometrySource::LatLon {
                        lat: lat.clone(),
                        lon: lon.clone(),
                    },
                    _ => return Err(ConfigError::InvalidGeometryEntry(key.clone())),
                },
                _ => return Err(ConfigError::InvalidGeometryEntry(key.clone())),
            };
            entries.push((geometry_type, source));
        }

        let mut fields = Vec::new();
        for (_, source) in &entries {
            match source {
                GeometrySource::LatLon { lat, lon } => {
                    fields.push(lat.clone());
                    fields.push(lon.clone());
                }
                GeometrySource::Field(name) => fields.push(name.clone()),
            }
        }
        if fields.is_empty() {
            return Err(ConfigError::NoGeometryFields);
        }

        Ok(Self { entries, fields })
    }

    /// Entries in the order the caller configured them.
    pub fn entries(&self) -> &[(GeometryType, GeometrySource)] {
        &self.entries
    }

    /// Record fields consumed by geometry entries.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_geometry_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }
}
