// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod distance;
pub mod render;
pub mod validate;

use anyhow::{Context, Result};
use routemap_lib::{Credentials, RouteMap, TravelMode};

/// Service settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Directions key; falls back to `ROUTEMAP_DIRECTIONS_KEY`.
    pub directions_key: Option<String>,
    /// Static map key; falls back to `ROUTEMAP_STATIC_MAP_KEY`.
    pub static_map_key: Option<String>,
    pub mode: TravelMode,
    /// Skip the validation round trip when installing credentials.
    pub skip_validation: bool,
}

impl ServiceArgs {
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::resolve(self.static_map_key.clone(), self.directions_key.clone())
            .context("set --static-map-key/--directions-key or ROUTEMAP_STATIC_MAP_KEY/ROUTEMAP_DIRECTIONS_KEY")
    }
}

/// Build a map over the HTTP transport with credentials and travel mode installed.
pub fn open_map(service: &ServiceArgs) -> Result<RouteMap> {
    let credentials = service.credentials()?;
    let mut map = RouteMap::from_env().context("failed to initialise the HTTP client")?;
    if service.skip_validation {
        map.set_credentials_unchecked(credentials)?;
    } else {
        map.set_credentials(credentials)
            .context("failed to validate credentials")?;
    }
    if service.mode != map.travel_mode() {
        map.set_travel_mode(service.mode)?;
    }
    Ok(map)
}
