pub mod foursquare_autocomplete_response;
pub mod foursquare_place_response;
pub mod places_service_error;
