use serde::{Deserialize, Serialize};

use super::lat_lng::LatLng;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Photo {
    pub prefix: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetail {
    pub fsq_id: String,
    pub name: String,
    pub address: Option<String>,
    pub photos: Vec<Photo>,
    pub rating: Option<f64>,
    pub location: Option<LatLng>,
}
