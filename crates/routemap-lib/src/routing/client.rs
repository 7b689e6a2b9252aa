use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use crate::location::Location;
use crate::transport::Transport;

use super::{ResolvedRoute, RouteStatus, TravelMode};

/// Synchronous client for the directions service.
///
/// Every call to [`RoutingClient::route`] issues exactly one blocking request
/// through the configured [`Transport`].
#[derive(Clone)]
pub struct RoutingClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
    credential: Option<String>,
}

impl fmt::Debug for RoutingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingClient")
            .field("endpoint", &self.endpoint)
            .field("configured", &self.credential.is_some())
            .finish()
    }
}

impl RoutingClient {
    /// Create a client without a credential; routing calls fail with
    /// [`Error::NotConfigured`] until one is installed.
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub(crate) fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = Some(credential.into());
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Resolve the route between `origin` and `destination`.
    ///
    /// Returns `Ok(None)` when the service reports that no route exists.
    pub fn route(
        &self,
        origin: Location,
        destination: Location,
        mode: TravelMode,
    ) -> Result<Option<ResolvedRoute>> {
        let credential = self
            .credential
            .as_deref()
            .ok_or(Error::NotConfigured {
                what: "directions credential",
            })?;

        let url = request_url(&self.endpoint, origin, destination, mode, credential)?;
        debug!(%origin, %destination, %mode, "requesting directions");
        let body = self.transport.get(url.as_str())?;
        parse_directions(&body, origin, destination)
    }
}

fn request_url(
    endpoint: &str,
    origin: Location,
    destination: Location,
    mode: TravelMode,
    credential: &str,
) -> Result<Url> {
    Url::parse_with_params(
        endpoint,
        &[
            ("mode", mode.as_str().to_string()),
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("key", credential.to_string()),
        ],
    )
    .map_err(|_| Error::InvalidEndpoint {
        url: endpoint.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: Option<Polyline>,
    bounds: Option<RouteBounds>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: Option<Measure>,
    duration: Option<Measure>,
}

#[derive(Debug, Deserialize)]
struct Measure {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct Polyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct RouteBounds {
    northeast: LatLng,
    southwest: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Interpret a directions response body.
///
/// "No route" statuses and unrecognized statuses resolve to `Ok(None)`;
/// geocoding, credential and quota failures are returned as errors.
pub fn parse_directions(
    body: &str,
    origin: Location,
    destination: Location,
) -> Result<Option<ResolvedRoute>> {
    let response: DirectionsResponse = serde_json::from_str(body)?;
    let status = RouteStatus::from(response.status.as_str());

    match &status {
        RouteStatus::Ok => {
            let route = response
                .routes
                .into_iter()
                .next()
                .ok_or_else(|| Error::MalformedResponse {
                    message: "status OK without any routes".to_string(),
                })?;
            resolved_from_body(route).map(Some)
        }
        status if status.is_no_route() => {
            debug!(%origin, %destination, %status, "no route between points");
            Ok(None)
        }
        RouteStatus::InvalidRequest | RouteStatus::NotFound => Err(Error::GeocodeFailure {
            origin,
            destination,
        }),
        RouteStatus::RequestDenied => Err(Error::InvalidCredential {
            service: "directions",
        }),
        RouteStatus::OverQueryLimit | RouteStatus::OverDailyLimit => Err(Error::QuotaExceeded {
            status: status.to_string(),
        }),
        status => {
            warn!(%origin, %destination, %status, "unrecognized directions status; treating as no route");
            Ok(None)
        }
    }
}

fn resolved_from_body(route: RouteBody) -> Result<ResolvedRoute> {
    let (distance_meters, duration_seconds) =
        route
            .legs
            .iter()
            .fold((0.0, 0.0), |(distance, duration), leg| {
                (
                    distance + leg.distance.as_ref().map_or(0.0, |m| m.value),
                    duration + leg.duration.as_ref().map_or(0.0, |m| m.value),
                )
            });

    let geometry = route
        .overview_polyline
        .map(|polyline| polyline.points)
        .ok_or_else(|| Error::MalformedResponse {
            message: "route is missing overview_polyline".to_string(),
        })?;

    let bounds = route.bounds.ok_or_else(|| Error::MalformedResponse {
        message: "route is missing bounds".to_string(),
    })?;
    let north_east = Location::new(bounds.northeast.lng, bounds.northeast.lat)?;
    let south_west = Location::new(bounds.southwest.lng, bounds.southwest.lat)?;

    Ok(ResolvedRoute {
        distance_meters,
        duration_seconds,
        bounds: BoundingBox::from_corners(south_west, north_east),
        geometry,
    })
}
