#[derive(Debug)]
pub enum PlacesServiceError {
    Request(String),
    Status(u16),
    Decode(String),
}

impl std::fmt::Display for PlacesServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacesServiceError::Request(e) => write!(f, "Failed to send request: {}", e),
            PlacesServiceError::Status(code) => write!(f, "Places API responded with {}", code),
            PlacesServiceError::Decode(e) => write!(f, "Failed to decode response body: {}", e),
        }
    }
}

impl std::error::Error for PlacesServiceError {}
