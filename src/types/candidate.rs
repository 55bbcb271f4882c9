use serde::{Deserialize, Serialize};

use super::lat_lng::LatLng;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CandidateText {
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
    #[serde(default)]
    pub highlight: Vec<HighlightSpan>,
}

/// A single autocomplete suggestion, before its details are fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: Option<String>,
    pub text: CandidateText,
    pub result_type: String,
    pub location: Option<LatLng>,
}
