use serde_json::{Map, Value};

use crate::mapping::GeometryMapping;
use crate::settings::Settings;

/// Which record fields become feature properties.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyPolicy {
    /// Every non-geometry field, with static extras merged on top.
    All { extra: Option<Map<String, Value>> },
    /// Only the listed fields, in list order. The list is taken literally: a
    /// geometry field named here is still copied, and extras do not apply.
    Include(Vec<String>),
    /// Every field neither listed nor consumed by geometry. Extras do not
    /// apply.
    Exclude(Vec<String>),
}

impl PropertyPolicy {
    /// Derive the policy from settings. `include` wins when both lists are
    /// given; neither list selects the all-fields mode.
    pub fn from_settings(settings: &Settings) -> Self {
        if let Some(include) = &settings.include {
            Self::Include(include.clone())
        } else if let Some(exclude) = &settings.exclude {
            Self::Exclude(exclude.clone())
        } else {
            Self::All {
                extra: settings.extra.clone(),
            }
        }
    }
}

/// Build one record's properties object under the given policy. Copied
/// fields keep the record's key order; fields named by an `include` list
/// but absent from the record are silently skipped.
pub fn resolve_properties(
    record: &Map<String, Value>,
    mapping: &GeometryMapping,
    policy: &PropertyPolicy,
) -> Map<String, Value> {
    match policy {
        PropertyPolicy::All { extra } => {
            let mut properties: Map<String, Value> = record
                .iter()
                .filter(|(key, _)| !mapping.is_geometry_field(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            if let Some(extra) = extra {
                for (key, value) in extra {
                    properties.insert(key.clone(), value.clone());
                }
            }
            properties
        }
        PropertyPolicy::Include(fields) => fields
            .iter()
            .filter_map(|field| {
                record
                    .get(field)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect(),
        PropertyPolicy::Exclude(fields) => record
            .iter()
            .filter(|(key, _)| !mapping.is_geometry_field(key) && !fields.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}
