pub mod app_state;
pub mod candidate;
pub mod lat_lng;
pub mod place_detail;
