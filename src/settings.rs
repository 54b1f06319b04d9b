use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Conversion settings: the recognized feature-building options plus the
/// geometry mapping, which arrives as top-level keys named after GeoJSON
/// geometry types, e.g. `{"Point": ["lat", "lng"], "LineString": "line"}`.
///
/// Geometry entries are collected through the flattened map so that the
/// order the caller wrote them in survives; the first entry whose fields a
/// record carries decides that record's geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Allow-list of record fields copied to feature properties. Takes
    /// precedence over `exclude` when both are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Deny-list of record fields kept out of feature properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Static key/values merged into every feature's properties. Only
    /// applied when neither `include` nor `exclude` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,

    /// Static key/values attached once as the collection's own top-level
    /// `properties` object.
    #[serde(rename = "extraGlobal", skip_serializing_if = "Option::is_none")]
    pub extra_global: Option<Map<String, Value>>,

    /// CRS descriptor, shape-checked and attached to the collection verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<Value>,

    /// Bounding box, attached to the collection verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Value>,

    /// Geometry-type keyed entries in caller order. Keys that are not
    /// geometry type names end up here too and are ignored.
    #[serde(flatten)]
    pub geometry: Map<String, Value>,
}

impl Settings {
    /// Overlay these settings on `defaults`: a key set here wins, keys only
    /// set in the defaults are carried over. The merge is shallow, per
    /// top-level key; geometry entries merge key-wise the same way.
    pub fn with_defaults(&self, defaults: &Settings) -> Settings {
        let mut merged = self.clone();
        merged.include = merged.include.or_else(|| defaults.include.clone());
        merged.exclude = merged.exclude.or_else(|| defaults.exclude.clone());
        merged.extra = merged.extra.or_else(|| defaults.extra.clone());
        merged.extra_global = merged
            .extra_global
            .or_else(|| defaults.extra_global.clone());
        merged.crs = merged.crs.or_else(|| defaults.crs.clone());
        merged.bbox = merged.bbox.or_else(|| defaults.bbox.clone());
        for (key, value) in &defaults.geometry {
            if !merged.geometry.contains_key(key) {
                merged.geometry.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Settings;

    fn settings_from(value: serde_json::Value) -> Settings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_geometry_keys_are_flattened_in_order() {
        let settings = settings_from(json!({
            "LineString": "line",
            "include": ["name"],
            "Point": ["lat", "lng"]
        }));
        let keys: Vec<&String> = settings.geometry.keys().collect();
        assert_eq!(keys, ["LineString", "Point"]);
        assert_eq!(settings.include, Some(vec!["name".to_string()]));
    }

    #[test]
    fn test_extra_global_uses_wire_name() {
        let settings = settings_from(json!({
            "Point": ["lat", "lng"],
            "extraGlobal": {"source": "survey"}
        }));
        assert_eq!(
            settings.extra_global.unwrap().get("source"),
            Some(&json!("survey"))
        );
    }

    #[test]
    fn test_params_win_over_defaults() {
        let params = settings_from(json!({"exclude": ["street"], "Point": ["lat", "lng"]}));
        let defaults = settings_from(json!({
            "exclude": ["category"],
            "bbox": [-180.0, -90.0, 180.0, 90.0],
            "Point": ["y", "x"],
            "LineString": "line"
        }));
        let merged = params.with_defaults(&defaults);
        assert_eq!(merged.exclude, Some(vec!["street".to_string()]));
        assert_eq!(merged.bbox, Some(json!([-180.0, -90.0, 180.0, 90.0])));
        assert_eq!(merged.geometry.get("Point"), Some(&json!(["lat", "lng"])));
        assert_eq!(merged.geometry.get("LineString"), Some(&json!("line")));
    }

    #[test]
    fn test_settings_deserialize_from_yaml() {
        let settings: Settings =
            serde_yaml::from_str("Point: [lat, lng]\ninclude: [name, street]\n").unwrap();
        assert_eq!(settings.geometry.get("Point"), Some(&json!(["lat", "lng"])));
        assert_eq!(
            settings.include,
            Some(vec!["name".to_string(), "street".to_string()])
        );
    }
}
