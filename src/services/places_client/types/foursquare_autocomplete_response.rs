use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::candidate::CandidateText;

#[derive(Serialize, Deserialize, Clone, Copy)]
pub struct FoursquareCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, Deserialize, Default)]
pub struct FoursquareGeocodes {
    pub main: Option<FoursquareCoordinates>,
}

/// The object found under a result's `type` key, e.g. `result["place"]`.
#[derive(Serialize, Deserialize, Default)]
pub struct FoursquareAutocompleteTypedDetail {
    pub fsq_id: Option<String>,
    pub geocodes: Option<FoursquareGeocodes>,
}

#[derive(Serialize, Deserialize)]
pub struct FoursquareAutocompleteResult {
    #[serde(rename = "type")]
    pub result_type: String,
    pub text: CandidateText,
    #[serde(flatten)]
    pub typed: HashMap<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize)]
pub struct FoursquareAutocompleteResponse {
    #[serde(default)]
    pub results: Vec<FoursquareAutocompleteResult>,
}

impl FoursquareAutocompleteResult {
    pub fn typed_detail(&self) -> Option<FoursquareAutocompleteTypedDetail> {
        self.typed
            .get(&self.result_type)
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
