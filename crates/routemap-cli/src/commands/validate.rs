//! Validate command handler.

use anyhow::{Context, Result};
use routemap_lib::{validate_credentials, Endpoints, HttpTransport, Transport};
use std::sync::Arc;
use tracing::info;

use super::ServiceArgs;

/// Probe both services with the configured credentials.
pub fn handle_validate(service: &ServiceArgs) -> Result<()> {
    let credentials = service.credentials()?;
    let endpoints = Endpoints::from_env();
    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new().context("failed to initialise the HTTP client")?);

    info!(directions = %endpoints.directions, static_map = %endpoints.static_map, "probing services");
    validate_credentials(&transport, &endpoints, &credentials)
        .context("credential validation failed")?;
    println!("Credentials accepted by both services");
    Ok(())
}
