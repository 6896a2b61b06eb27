use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AdapterError;

/// A location record as returned by the mapping provider.
///
/// Both upstreams (the n8n workflow and the Places text search) use the
/// Places result layout:
///
/// ```json
/// {
///   "name": "Cafe X",
///   "formatted_address": "123 St",
///   "place_id": "abc",
///   "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub formatted_address: String,
    pub place_id: String,
    pub lat: f64,
    pub lng: f64,
}

impl PlaceResult {
    /// Extract a place from a Places-style JSON object.
    ///
    /// Every field is required; a missing or mistyped key fails with
    /// `MalformedResponse` naming the key.
    pub fn from_json(place: &Value) -> Result<Self, AdapterError> {
        Ok(Self {
            name: string_at(place, "/name")?,
            formatted_address: string_at(place, "/formatted_address")?,
            place_id: string_at(place, "/place_id")?,
            lat: number_at(place, "/geometry/location/lat")?,
            lng: number_at(place, "/geometry/location/lng")?,
        })
    }
}

fn string_at(value: &Value, pointer: &str) -> Result<String, AdapterError> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| missing(pointer))
}

fn number_at(value: &Value, pointer: &str) -> Result<f64, AdapterError> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| missing(pointer))
}

fn missing(pointer: &str) -> AdapterError {
    let key = pointer.trim_start_matches('/').replace('/', ".");
    AdapterError::MalformedResponse(format!("missing or invalid key '{}'", key))
}

/// Render a coordinate the way JSON does, so `1.0` stays `1.0`.
pub fn format_coordinate(value: f64) -> String {
    serde_json::Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_full_record() {
        let place = PlaceResult::from_json(&json!({
            "name": "Cafe X",
            "formatted_address": "123 St",
            "place_id": "abc",
            "geometry": { "location": { "lat": 1.0, "lng": 2.0 } },
            "rating": 4.5
        }))
        .unwrap();

        assert_eq!(place.name, "Cafe X");
        assert_eq!(place.formatted_address, "123 St");
        assert_eq!(place.place_id, "abc");
        assert_eq!(place.lat, 1.0);
        assert_eq!(place.lng, 2.0);
    }

    #[test]
    fn test_from_json_missing_nested_key() {
        let err = PlaceResult::from_json(&json!({
            "name": "Cafe X",
            "formatted_address": "123 St",
            "place_id": "abc",
            "geometry": { "location": { "lat": 1.0 } }
        }))
        .unwrap_err();

        match err {
            AdapterError::MalformedResponse(msg) => {
                assert!(msg.contains("geometry.location.lng"), "{}", msg)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_format_coordinate_keeps_fraction() {
        assert_eq!(format_coordinate(1.0), "1.0");
        assert_eq!(format_coordinate(-6.2088), "-6.2088");
        assert_eq!(format_coordinate(124.8413), "124.8413");
    }
}
