use std::{env, net::SocketAddr, time::Duration};

use crate::widget::{debouncer::DEFAULT_DEBOUNCE, geolocation::DevicePosition};

pub const DEFAULT_PLACES_HOST: &str = "https://api.foursquare.com/v3";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub places_api_key: String,
    pub places_host: String,
    pub bind_addr: SocketAddr,
    pub auth_key: Option<String>,
    pub debounce: Duration,
    pub device_location: DevicePosition,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing environment variable {}", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key| lookup(key).filter(|v| !v.trim().is_empty());

        let places_api_key = get("FSQ_API_KEY").ok_or(ConfigError::Missing("FSQ_API_KEY"))?;
        let places_host = get("FSQ_API_HOST")
            .unwrap_or_else(|| DEFAULT_PLACES_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value,
            })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    key: "BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let debounce = match get("DEBOUNCE_MS") {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: "DEBOUNCE_MS",
                    value,
                })?,
            None => DEFAULT_DEBOUNCE,
        };

        let device_location = match get("DEVICE_LOCATION") {
            Some(value) => DevicePosition::parse(&value).ok_or(ConfigError::Invalid {
                key: "DEVICE_LOCATION",
                value,
            })?,
            None => DevicePosition::Unsupported,
        };

        Ok(WidgetConfig {
            places_api_key,
            places_host,
            bind_addr,
            auth_key: get("AUTH_KEY"),
            debounce,
            device_location,
        })
    }
}
