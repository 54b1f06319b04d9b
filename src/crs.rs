use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Shape-check a CRS descriptor and hand it back untouched.
///
/// Accepted forms follow the GeoJSON 2008 `crs` member: a `name`-typed
/// descriptor carrying `properties.name`, or a `link`-typed descriptor
/// carrying `properties.href` and `properties.type`.
pub fn validate_crs(crs: &Value) -> Result<&Value> {
    let Some(crs_type) = crs.get("type") else {
        return Err(ConfigError::CrsMissingType);
    };
    match crs_type.as_str() {
        Some("name") => {
            if crs.pointer("/properties/name").is_none() {
                return Err(ConfigError::CrsMissingName);
            }
        }
        Some("link") => {
            if crs.pointer("/properties/href").is_none()
                || crs.pointer("/properties/type").is_none()
            {
                return Err(ConfigError::CrsMissingLinkKeys);
            }
        }
        Some(other) => return Err(ConfigError::CrsUnsupportedType(other.to_string())),
        None => return Err(ConfigError::CrsUnsupportedType(crs_type.to_string())),
    }
    Ok(crs)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::validate_crs;
    use crate::error::ConfigError;

    #[rstest]
    #[case(json!({"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}}))]
    #[case(json!({"type": "link", "properties": {"href": "http://example.com/crs/42", "type": "proj4"}}))]
    fn test_valid_crs_is_returned_unchanged(#[case] crs: Value) {
        assert_eq!(validate_crs(&crs).unwrap(), &crs);
    }

    #[rstest]
    #[case(json!("Hello"), ConfigError::CrsMissingType)]
    #[case(json!({"properties": {"name": "x"}}), ConfigError::CrsMissingType)]
    #[case(json!({"type": "unknown"}), ConfigError::CrsUnsupportedType("unknown".to_string()))]
    #[case(json!({"type": 42}), ConfigError::CrsUnsupportedType("42".to_string()))]
    #[case(json!({"type": "name", "properties": {}}), ConfigError::CrsMissingName)]
    #[case(json!({"type": "name"}), ConfigError::CrsMissingName)]
    #[case(
        json!({"type": "link", "properties": {"notahref": "u", "type": "t"}}),
        ConfigError::CrsMissingLinkKeys
    )]
    #[case(
        json!({"type": "link", "properties": {"href": "u", "notatype": "t"}}),
        ConfigError::CrsMissingLinkKeys
    )]
    fn test_malformed_crs_is_rejected(#[case] crs: Value, #[case] expected: ConfigError) {
        assert_eq!(validate_crs(&crs).unwrap_err(), expected);
    }
}
