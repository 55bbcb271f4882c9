use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use urlencoding::encode;

use super::types::{
    foursquare_autocomplete_response::{FoursquareAutocompleteResponse, FoursquareGeocodes},
    foursquare_place_response::FoursquarePlaceResponse,
    places_service_error::PlacesServiceError,
};
use crate::{
    types::{candidate::Candidate, lat_lng::LatLng, place_detail::PlaceDetail},
    widget::session_token::SessionToken,
};

/// Search radius around the map center, in meters.
pub const AUTOCOMPLETE_RADIUS: u32 = 50_000;
pub const PLACE_DETAIL_FIELDS: &str = "fsq_id,name,geocodes,location,photos,rating";

#[derive(Clone)]
pub struct PlacesServiceConfig {
    pub api_key: String,
    pub host: String,
}

#[derive(Clone)]
pub struct PlacesService {
    config: PlacesServiceConfig,
    client: reqwest::Client,
}

pub struct AutocompleteSearchInput<'a> {
    pub query: &'a str,
    pub center: LatLng,
    pub session_token: &'a SessionToken,
}

fn main_location(geocodes: Option<FoursquareGeocodes>) -> Option<LatLng> {
    geocodes
        .and_then(|g| g.main)
        .map(|c| LatLng::new(c.latitude, c.longitude))
        .filter(LatLng::is_valid)
}

impl PlacesService {
    pub fn new(config: PlacesServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PlacesServiceError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.config.api_key)
            .send()
            .await
            .map_err(|e| PlacesServiceError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PlacesServiceError::Status(resp.status().as_u16()));
        }

        resp.json::<T>()
            .await
            .map_err(|e| PlacesServiceError::Decode(e.to_string()))
    }

    pub async fn get_autocomplete(
        &self,
        input: AutocompleteSearchInput<'_>,
    ) -> Result<Vec<Candidate>, PlacesServiceError> {
        let url = format!(
            "{}/autocomplete?query={}&types=place&ll={}%2C{}&radius={}&session_token={}",
            self.config.host,
            encode(input.query),
            input.center.lat,
            input.center.lng,
            AUTOCOMPLETE_RADIUS,
            input.session_token,
        );

        let body = self.get_json::<FoursquareAutocompleteResponse>(&url).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| {
                let typed = r.typed_detail().unwrap_or_default();
                Candidate {
                    id: typed.fsq_id,
                    location: main_location(typed.geocodes),
                    text: r.text,
                    result_type: r.result_type,
                }
            })
            .collect())
    }

    pub async fn get_place_detail(
        &self,
        fsq_id: &str,
        session_token: &SessionToken,
    ) -> Result<PlaceDetail, PlacesServiceError> {
        let url = format!(
            "{}/places/{}?fields={}&session_token={}",
            self.config.host,
            encode(fsq_id),
            encode(PLACE_DETAIL_FIELDS),
            session_token,
        );

        let body = self.get_json::<FoursquarePlaceResponse>(&url).await?;

        Ok(PlaceDetail {
            fsq_id: body.fsq_id,
            name: body.name,
            address: body.location.address.or(body.location.formatted_address),
            photos: body.photos,
            rating: body.rating,
            location: main_location(body.geocodes),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn service(server: &mockito::ServerGuard) -> PlacesService {
        PlacesService::new(PlacesServiceConfig {
            api_key: "fsq-key".to_string(),
            host: server.url(),
        })
    }

    #[tokio::test]
    async fn autocomplete_sends_scoped_query() {
        let mut server = mockito::Server::new_async().await;
        let token = SessionToken::generate();

        let mock = server
            .mock("GET", "/autocomplete")
            .match_header("authorization", "fsq-key")
            .match_header("accept", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "central park".into()),
                Matcher::UrlEncoded("types".into(), "place".into()),
                Matcher::UrlEncoded("ll".into(), "40.7128,-74.006".into()),
                Matcher::UrlEncoded("radius".into(), "50000".into()),
                Matcher::UrlEncoded("session_token".into(), token.to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "results": [{
                        "type": "place",
                        "text": {
                            "primary": "Central Park",
                            "secondary": "New York, NY",
                            "highlight": [{ "start": 0, "length": 7 }]
                        },
                        "place": {
                            "fsq_id": "abc123",
                            "geocodes": { "main": { "latitude": 40.78, "longitude": -73.96 } }
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let candidates = service(&server)
            .get_autocomplete(AutocompleteSearchInput {
                query: "central park",
                center: LatLng::FALLBACK,
                session_token: &token,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id.as_deref(), Some("abc123"));
        assert_eq!(candidates[0].result_type, "place");
        assert_eq!(candidates[0].location, Some(LatLng::new(40.78, -73.96)));
        assert_eq!(candidates[0].text.highlight[0].length, 7);
    }

    #[tokio::test]
    async fn autocomplete_without_geocodes_has_no_location() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/autocomplete")
            .match_query(Matcher::Any)
            .with_body(
                json!({
                    "results": [
                        {
                            "type": "place",
                            "text": { "primary": "Nowhere" },
                            "place": { "fsq_id": "x", "geocodes": {} }
                        },
                        {
                            "type": "search",
                            "text": { "primary": "pizza" },
                            "search": { "query": "pizza" }
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let candidates = service(&server)
            .get_autocomplete(AutocompleteSearchInput {
                query: "n",
                center: LatLng::FALLBACK,
                session_token: &SessionToken::generate(),
            })
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.location.is_none()));
        assert_eq!(candidates[1].id, None);
    }

    #[tokio::test]
    async fn autocomplete_missing_results_is_empty() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/autocomplete")
            .match_query(Matcher::Any)
            .with_body("{}")
            .create_async()
            .await;

        let candidates = service(&server)
            .get_autocomplete(AutocompleteSearchInput {
                query: "zzz",
                center: LatLng::FALLBACK,
                session_token: &SessionToken::generate(),
            })
            .await
            .unwrap();

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn autocomplete_error_status_is_propagated() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/autocomplete")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let result = service(&server)
            .get_autocomplete(AutocompleteSearchInput {
                query: "pizza",
                center: LatLng::FALLBACK,
                session_token: &SessionToken::generate(),
            })
            .await;

        assert!(matches!(result, Err(PlacesServiceError::Status(401))));
    }

    #[tokio::test]
    async fn autocomplete_bad_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/autocomplete")
            .match_query(Matcher::Any)
            .with_body("not json")
            .create_async()
            .await;

        let result = service(&server)
            .get_autocomplete(AutocompleteSearchInput {
                query: "pizza",
                center: LatLng::FALLBACK,
                session_token: &SessionToken::generate(),
            })
            .await;

        assert!(matches!(result, Err(PlacesServiceError::Decode(_))));
    }

    #[tokio::test]
    async fn place_detail_requests_fixed_fields() {
        let mut server = mockito::Server::new_async().await;
        let token = SessionToken::generate();

        let mock = server
            .mock("GET", "/places/abc123")
            .match_header("authorization", "fsq-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("fields".into(), PLACE_DETAIL_FIELDS.into()),
                Matcher::UrlEncoded("session_token".into(), token.to_string()),
            ]))
            .with_body(
                json!({
                    "fsq_id": "abc123",
                    "name": "Central Park",
                    "location": { "address": "59th St" },
                    "photos": [{ "prefix": "https://img/", "suffix": "/a.jpg" }],
                    "rating": 9.4,
                    "geocodes": { "main": { "latitude": 40.78, "longitude": -73.96 } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let detail = service(&server)
            .get_place_detail("abc123", &token)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(detail.name, "Central Park");
        assert_eq!(detail.address.as_deref(), Some("59th St"));
        assert_eq!(detail.photos.len(), 1);
        assert_eq!(detail.rating, Some(9.4));
        assert_eq!(detail.location, Some(LatLng::new(40.78, -73.96)));
    }

    #[tokio::test]
    async fn place_detail_tolerates_sparse_body() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/places/bare")
            .match_query(Matcher::Any)
            .with_body(json!({ "fsq_id": "bare", "name": "Kiosk" }).to_string())
            .create_async()
            .await;

        let detail = service(&server)
            .get_place_detail("bare", &SessionToken::generate())
            .await
            .unwrap();

        assert_eq!(detail.address, None);
        assert!(detail.photos.is_empty());
        assert_eq!(detail.rating, None);
        assert_eq!(detail.location, None);
    }
}
