use serde_json::{json, Map, Value};

use crate::mapping::{GeometryMapping, GeometrySource, GeometryType};

/// Resolve one record's geometry against the mapping.
///
/// Entries are tried in configured order and the first one whose field(s)
/// the record carries wins. Presence is what counts, not truthiness: a field
/// explicitly set to `null` still matches. Coordinate values are passed
/// through without shape validation. A record matching no entry gets the
/// empty `{}` geometry.
pub fn resolve_geometry(record: &Map<String, Value>, mapping: &GeometryMapping) -> Value {
    for (geometry_type, source) in mapping.entries() {
        match source {
            GeometrySource::LatLon { lat, lon } => {
                if let (Some(lat_value), Some(lon_value)) = (record.get(lat), record.get(lon)) {
                    return json!({
                        "type": geometry_type.as_str(),
                        "coordinates": [lon_value, lat_value]
                    });
                }
            }
            GeometrySource::Field(name) => {
                if let Some(value) = record.get(name) {
                    return match geometry_type {
                        GeometryType::PassThrough => value.clone(),
                        _ => json!({
                            "type": geometry_type.as_str(),
                            "coordinates": value
                        }),
                    };
                }
            }
        }
    }
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    use super::resolve_geometry;
    use crate::mapping::GeometryMapping;
    use crate::settings::Settings;

    fn mapping_from(params: Value) -> GeometryMapping {
        let settings: Settings = serde_json::from_value(params).unwrap();
        GeometryMapping::from_settings(&settings).unwrap()
    }

    fn record_from(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[rstest]
    #[case(
        json!({"name": "Location A", "category": "Store", "lat": 39.984, "lng": -75.343}),
        json!({"type": "Point", "coordinates": [-75.343, 39.984]})
    )]
    #[case(
        json!({"lat": 39.284, "lng": -75.833}),
        json!({"type": "Point", "coordinates": [-75.833, 39.284]})
    )]
    #[case(json!({"name": "no geometry at all"}), json!({}))]
    #[case(json!({"lat": 39.284}), json!({}))]
    fn test_lat_lon_pair_resolution(#[case] record: Value, #[case] expected: Value) {
        let mapping = mapping_from(json!({"Point": ["lat", "lng"]}));
        assert_eq!(resolve_geometry(&record_from(record), &mapping), expected);
    }

    #[test]
    fn test_coordinate_field_passes_through_unmodified() {
        let mapping = mapping_from(json!({"LineString": "line"}));
        let record = record_from(json!({
            "line": [[102.0, 0.0], [103.0, 1.0], [104.0, 0.0], [105.0, 1.0]],
            "prop0": "value0"
        }));
        assert_eq!(
            resolve_geometry(&record, &mapping),
            json!({
                "type": "LineString",
                "coordinates": [[102.0, 0.0], [103.0, 1.0], [104.0, 0.0], [105.0, 1.0]]
            })
        );
    }

    #[test]
    fn test_nested_coordinates_are_not_validated() {
        let mapping = mapping_from(json!({"MultiPolygon": "shape"}));
        let coordinates = json!([
            [[[102.0, 2.0], [103.0, 2.0], [103.0, 3.0], [102.0, 3.0], [102.0, 2.0]]],
            [
                [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]],
                [[100.2, 0.2], [100.8, 0.2], [100.8, 0.8], [100.2, 0.8], [100.2, 0.2]]
            ]
        ]);
        let record = record_from(json!({"shape": coordinates.clone()}));
        assert_eq!(
            resolve_geometry(&record, &mapping),
            json!({"type": "MultiPolygon", "coordinates": coordinates})
        );
    }

    #[test]
    fn test_geojson_entry_copies_field_verbatim() {
        let mapping = mapping_from(json!({"GeoJSON": "geom"}));
        let geometry = json!({"type": "Point", "coordinates": [1.0, 2.0]});
        let record = record_from(json!({"geom": geometry.clone(), "name": "pass-through"}));
        assert_eq!(resolve_geometry(&record, &mapping), geometry);
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let record = record_from(json!({
            "lat": 1.0,
            "lng": 2.0,
            "line": [[0.0, 0.0], [1.0, 1.0]]
        }));

        let mapping = mapping_from(json!({"Point": ["lat", "lng"], "LineString": "line"}));
        assert_eq!(resolve_geometry(&record, &mapping)["type"], json!("Point"));

        let flipped = mapping_from(json!({"LineString": "line", "Point": ["lat", "lng"]}));
        assert_eq!(
            resolve_geometry(&record, &flipped)["type"],
            json!("LineString")
        );
    }

    #[test]
    fn test_null_valued_field_still_matches() {
        let mapping = mapping_from(json!({"Point": ["lat", "lng"]}));
        let record = record_from(json!({"lat": null, "lng": -75.343}));
        assert_eq!(
            resolve_geometry(&record, &mapping),
            json!({"type": "Point", "coordinates": [-75.343, null]})
        );
    }
}
