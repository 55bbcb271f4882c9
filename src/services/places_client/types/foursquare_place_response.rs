use serde::{Deserialize, Serialize};

use super::foursquare_autocomplete_response::FoursquareGeocodes;
use crate::types::place_detail::Photo;

#[derive(Serialize, Deserialize, Default)]
pub struct FoursquarePlaceLocation {
    pub address: Option<String>,
    pub formatted_address: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct FoursquarePlaceResponse {
    pub fsq_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: FoursquarePlaceLocation,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub rating: Option<f64>,
    pub geocodes: Option<FoursquareGeocodes>,
}
