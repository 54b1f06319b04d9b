use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::crs::validate_crs;
use crate::error::Result;
use crate::feature::geometry::resolve_geometry;
use crate::feature::properties::{resolve_properties, PropertyPolicy};
use crate::mapping::GeometryMapping;
use crate::settings::Settings;

/// One converted record: the resolved geometry (or `{}` when no mapping
/// entry matched) and the filtered properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Value,
    pub properties: Map<String, Value>,
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "Feature")?;
        map.serialize_entry("geometry", &self.geometry)?;
        map.serialize_entry("properties", &self.properties)?;
        map.end()
    }
}

/// The assembled document: features in input order plus the optional
/// `crs`/`bbox`/global-`properties` envelope. Envelope keys that were not
/// configured are omitted from the serialized document entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub crs: Option<Value>,
    pub bbox: Option<Value>,
    pub properties: Option<Map<String, Value>>,
}

impl FeatureCollection {
    /// The collection as a plain JSON value tree.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("feature collection is valid JSON")
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = 2
            + usize::from(self.crs.is_some())
            + usize::from(self.bbox.is_some())
            + usize::from(self.properties.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", "FeatureCollection")?;
        map.serialize_entry("features", &self.features)?;
        if let Some(crs) = &self.crs {
            map.serialize_entry("crs", crs)?;
        }
        if let Some(bbox) = &self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        if let Some(properties) = &self.properties {
            map.serialize_entry("properties", properties)?;
        }
        map.end()
    }
}

/// Drives the conversion: merges the converter's defaults into the per-call
/// settings, compiles the geometry mapping and property policy once per
/// call, and maps records to features in input order.
///
/// A converter holds nothing but the immutable defaults, so one instance can
/// serve concurrent `convert` calls with different settings.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    defaults: Settings,
}

impl Converter {
    /// Converter with empty defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter whose defaults fill in settings keys the per-call settings
    /// leave unset.
    pub fn with_defaults(defaults: Settings) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: Settings) {
        self.defaults = defaults;
    }

    /// Convert records, in order, into a feature collection.
    ///
    /// Fails only on configuration-shape problems ([`crate::ConfigError`]),
    /// and then before any feature is built; a record missing its mapped
    /// geometry fields degrades to a feature with `{}` geometry instead.
    pub fn convert(
        &self,
        records: &[Map<String, Value>],
        params: &Settings,
    ) -> Result<FeatureCollection> {
        let settings = params.with_defaults(&self.defaults);
        let mapping = GeometryMapping::from_settings(&settings)?;
        let policy = PropertyPolicy::from_settings(&settings);
        let crs = match &settings.crs {
            Some(crs) => Some(validate_crs(crs)?.clone()),
            None => None,
        };

        let features = records
            .iter()
            .map(|record| Feature {
                geometry: resolve_geometry(record, &mapping),
                properties: resolve_properties(record, &mapping, &policy),
            })
            .collect();

        Ok(FeatureCollection {
            features,
            crs,
            bbox: settings.bbox.clone(),
            properties: settings.extra_global.clone(),
        })
    }
}

/// One-shot conversion with no defaults.
pub fn convert(records: &[Map<String, Value>], params: &Settings) -> Result<FeatureCollection> {
    Converter::new().convert(records, params)
}
