//! Map links derived from a place: a navigation URL (opens Google Maps with
//! the place selected) and an embed URL (for the inline `<iframe>`).

use crate::config::MapsConfig;
use crate::models::place::{format_coordinate, PlaceResult};

/// The pair of links shown with every place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    pub navigation_url: String,
    pub embed_url: String,
}

impl MapLinks {
    pub fn for_place(maps: &MapsConfig, api_key: &str, place: &PlaceResult) -> Self {
        Self {
            navigation_url: navigation_url(maps, place),
            embed_url: embed_url(maps, api_key, &place.place_id),
        }
    }
}

/// `{base}/search/?api=1&query=<lat>,<lng>&query_place_id=<place_id>`
pub fn navigation_url(maps: &MapsConfig, place: &PlaceResult) -> String {
    format!(
        "{}/search/?api=1&query={},{}&query_place_id={}",
        maps.base_url.trim_end_matches('/'),
        format_coordinate(place.lat),
        format_coordinate(place.lng),
        urlencoding::encode(&place.place_id),
    )
}

/// `{base}/embed/v1/place?key=<api_key>&q=place_id:<place_id>`
pub fn embed_url(maps: &MapsConfig, api_key: &str, place_id: &str) -> String {
    format!(
        "{}/embed/v1/place?key={}&q=place_id:{}",
        maps.base_url.trim_end_matches('/'),
        urlencoding::encode(api_key),
        urlencoding::encode(place_id),
    )
}
