//! Convert generic JSON records into GeoJSON `FeatureCollection`s.
//!
//! A declarative [`Settings`] value names which record fields carry geometry
//! (a `[lat, lon]` field pair or a single coordinate-array field per GeoJSON
//! geometry type, tried in configured order) and how the remaining fields
//! map to feature properties (everything, an allow-list, or a deny-list,
//! plus static extras). The conversion is a pure structural remapping of
//! parsed value trees; JSON text encoding and I/O stay with the caller.
//!
//! ```
//! use geojsonify::Settings;
//! use serde_json::json;
//!
//! let records: Vec<_> = [
//!     json!({"name": "Location A", "lat": 39.984, "lng": -75.343}),
//!     json!({"name": "Location B", "lat": 39.284, "lng": -75.833}),
//! ]
//! .into_iter()
//! .map(|record| record.as_object().unwrap().clone())
//! .collect();
//!
//! let settings: Settings =
//!     serde_json::from_value(json!({"Point": ["lat", "lng"]})).unwrap();
//! let collection = geojsonify::convert(&records, &settings).unwrap();
//!
//! assert_eq!(collection.features.len(), 2);
//! assert_eq!(
//!     collection.features[0].geometry,
//!     json!({"type": "Point", "coordinates": [-75.343, 39.984]})
//! );
//! ```

pub mod collection;
pub mod crs;
pub mod error;
pub mod feature;
pub mod mapping;
pub mod settings;

pub use collection::{convert, Converter, Feature, FeatureCollection};
pub use error::{ConfigError, Result};
pub use settings::Settings;
