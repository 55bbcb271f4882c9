use std::time::Duration;

use async_trait::async_trait;

use crate::types::lat_lng::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return. Zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            high_accuracy: true,
            timeout: Duration::from_secs(5),
            maximum_age: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable(String),
    Timeout,
    Unsupported,
}

impl GeolocationError {
    /// Numeric codes as reported by browser geolocation providers.
    pub fn code(&self) -> u8 {
        match self {
            GeolocationError::PermissionDenied => 1,
            GeolocationError::PositionUnavailable(_) => 2,
            GeolocationError::Timeout => 3,
            GeolocationError::Unsupported => 0,
        }
    }
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "User denied Geolocation"),
            GeolocationError::PositionUnavailable(e) => write!(f, "Position unavailable: {}", e),
            GeolocationError::Timeout => write!(f, "Timeout expired"),
            GeolocationError::Unsupported => write!(f, "Geolocation is not supported"),
        }
    }
}

impl std::error::Error for GeolocationError {}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self, options: PositionOptions)
        -> Result<LatLng, GeolocationError>;
}

/// What a host without a live position sensor answers when asked for a fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevicePosition {
    Fixed(LatLng),
    Denied,
    Unavailable,
    Unsupported,
}

impl DevicePosition {
    /// Parses `"lat,lng"`, `"denied"` or `"unavailable"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "denied" => Some(DevicePosition::Denied),
            "unavailable" => Some(DevicePosition::Unavailable),
            other => {
                let (lat, lng) = other.split_once(',')?;
                let location = LatLng::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?);
                location.is_valid().then_some(DevicePosition::Fixed(location))
            }
        }
    }
}

pub struct StaticGeolocator {
    position: DevicePosition,
}

impl StaticGeolocator {
    pub fn new(position: DevicePosition) -> Self {
        StaticGeolocator { position }
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<LatLng, GeolocationError> {
        match self.position {
            DevicePosition::Fixed(location) => Ok(location),
            DevicePosition::Denied => Err(GeolocationError::PermissionDenied),
            DevicePosition::Unavailable => Err(GeolocationError::PositionUnavailable(
                "no position source configured".to_string(),
            )),
            DevicePosition::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}

/// One-shot position request. The timeout is enforced here as well, so a
/// provider that ignores `options.timeout` still cannot stall startup.
pub async fn locate(
    geolocator: &dyn Geolocator,
    options: PositionOptions,
) -> Result<LatLng, GeolocationError> {
    match tokio::time::timeout(options.timeout, geolocator.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout),
    }
}
