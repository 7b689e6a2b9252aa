//! Service endpoints and credentials.
//!
//! # Environment Variables
//!
//! - `ROUTEMAP_DIRECTIONS_KEY`: credential for the directions service
//! - `ROUTEMAP_STATIC_MAP_KEY`: credential for the static map service
//! - `ROUTEMAP_DIRECTIONS_URL`: override the directions endpoint
//! - `ROUTEMAP_STATIC_MAP_URL`: override the static map endpoint

use std::env;
use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::location::Location;
use crate::routing::{RoutingClient, TravelMode};
use crate::transport::Transport;

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

const DIRECTIONS_KEY_ENV: &str = "ROUTEMAP_DIRECTIONS_KEY";
const STATIC_MAP_KEY_ENV: &str = "ROUTEMAP_STATIC_MAP_KEY";
const DIRECTIONS_URL_ENV: &str = "ROUTEMAP_DIRECTIONS_URL";
const STATIC_MAP_URL_ENV: &str = "ROUTEMAP_STATIC_MAP_URL";

/// Fixed probe points used to validate credentials (Princeton, NJ).
const PROBE_ORIGIN: (f64, f64) = (-74.65219, 40.35025);
const PROBE_DESTINATION: (f64, f64) = (-74.65904, 40.34187);

/// Base URLs of the directions and static map services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub directions: String,
    pub static_map: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            directions: DEFAULT_DIRECTIONS_URL.to_string(),
            static_map: DEFAULT_STATIC_MAP_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Defaults, overridden by `ROUTEMAP_DIRECTIONS_URL` / `ROUTEMAP_STATIC_MAP_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            directions: non_empty_var(DIRECTIONS_URL_ENV).unwrap_or(defaults.directions),
            static_map: non_empty_var(STATIC_MAP_URL_ENV).unwrap_or(defaults.static_map),
        }
    }
}

/// Credentials for both services.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    static_map: String,
    directions: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("static_map", &"<redacted>")
            .field("directions", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Both keys must be non-empty.
    pub fn new(static_map: impl Into<String>, directions: impl Into<String>) -> Result<Self> {
        let static_map = static_map.into().trim().to_string();
        let directions = directions.into().trim().to_string();
        if static_map.is_empty() {
            return Err(Error::NotConfigured {
                what: "static map credential",
            });
        }
        if directions.is_empty() {
            return Err(Error::NotConfigured {
                what: "directions credential",
            });
        }
        Ok(Self {
            static_map,
            directions,
        })
    }

    /// Read `ROUTEMAP_STATIC_MAP_KEY` and `ROUTEMAP_DIRECTIONS_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Use the given keys, falling back to the environment for missing ones.
    pub fn resolve(static_map: Option<String>, directions: Option<String>) -> Result<Self> {
        Self::new(
            static_map
                .or_else(|| non_empty_var(STATIC_MAP_KEY_ENV))
                .unwrap_or_default(),
            directions
                .or_else(|| non_empty_var(DIRECTIONS_KEY_ENV))
                .unwrap_or_default(),
        )
    }

    pub fn static_map(&self) -> &str {
        &self.static_map
    }

    pub fn directions(&self) -> &str {
        &self.directions
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Check both credentials with one real request to each service.
///
/// A denied directions query or an HTTP 4xx from either service is reported
/// as [`Error::InvalidCredential`]; transport failures are returned as-is.
pub fn validate_credentials(
    transport: &Arc<dyn Transport>,
    endpoints: &Endpoints,
    credentials: &Credentials,
) -> Result<()> {
    let origin = Location::new(PROBE_ORIGIN.0, PROBE_ORIGIN.1)?;
    let destination = Location::new(PROBE_DESTINATION.0, PROBE_DESTINATION.1)?;

    debug!("validating directions credential");
    let probe = RoutingClient::new(Arc::clone(transport), &endpoints.directions)
        .with_credential(credentials.directions());
    probe
        .route(origin, destination, TravelMode::Walking)
        .map_err(|err| reject_client_errors(err, "directions"))?;

    debug!("validating static map credential");
    let url = Url::parse_with_params(
        &endpoints.static_map,
        &[
            ("center", origin.to_string()),
            ("zoom", "13".to_string()),
            ("size", "500x500".to_string()),
            ("key", credentials.static_map().to_string()),
        ],
    )
    .map_err(|_| Error::InvalidEndpoint {
        url: endpoints.static_map.clone(),
    })?;
    transport
        .get(url.as_str())
        .map_err(|err| reject_client_errors(err, "static map"))?;

    info!("credentials validated");
    Ok(())
}

fn reject_client_errors(err: Error, service: &'static str) -> Error {
    match err {
        Error::HttpStatus { status, .. } if (400..500).contains(&status) => {
            Error::InvalidCredential { service }
        }
        other => other,
    }
}
