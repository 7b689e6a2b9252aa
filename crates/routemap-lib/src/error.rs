use thiserror::Error;

use crate::location::Location;

/// Convenient result alias for the routemap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a coordinate falls outside the supported world bounds.
    #[error("coordinates ({lng}, {lat}) exceed world bounds")]
    InvalidCoordinate { lng: f64, lat: f64 },

    /// Raised when a `lng,lat` string cannot be parsed.
    #[error("expected `lng,lat`, got `{input}`")]
    LocationSyntax { input: String },

    /// Raised when an operation needs a credential or point set that is not configured yet.
    #[error("{what} is not configured")]
    NotConfigured { what: &'static str },

    /// Raised when credentials are installed a second time.
    #[error("credentials can only be set once")]
    CredentialsAlreadySet,

    /// Raised when a remote service rejects the configured credential.
    #[error("{service} credential was rejected")]
    InvalidCredential { service: &'static str },

    /// Raised when the routing service reports that the quota is exhausted.
    #[error("routing quota exceeded ({status})")]
    QuotaExceeded { status: String },

    /// Raised when the routing service cannot geocode one of the endpoints.
    #[error("could not geocode path between {origin} and {destination}")]
    GeocodeFailure {
        origin: Location,
        destination: Location,
    },

    /// Raised when a travel mode outside the supported set is requested.
    #[error("travel mode {mode} is not supported; expected one of driving, walking, bicycling, transit")]
    UnsupportedMode { mode: String },

    /// Raised when an infeasible path is marked for rendering.
    #[error("path between {a} and {b} has no route and cannot be drawn")]
    InfeasiblePath { a: Location, b: Location },

    /// Raised when a visible path references a point that is not on the map.
    #[error("path between {a} and {b} has endpoints that are not on the map")]
    UnknownEndpoint { a: Location, b: Location },

    /// Raised when bounds are requested for a map without points.
    #[error("map has no points")]
    EmptyGraph,

    /// Raised when a color is not six hex digits with an optional `0x` or `#` prefix.
    #[error("color {value} must be a hex number of the form 0x123ABC")]
    InvalidColor { value: String },

    /// Raised when a fixed zoom level is outside the supported range.
    #[error("zoom level {level} is outside 0..={max}")]
    InvalidZoom { level: u8, max: u8 },

    /// Raised when the fixed parts of a render request alone exceed the budget.
    #[error("render request needs at least {required} characters but the budget is {budget}")]
    RenderBudgetExceeded { required: usize, budget: usize },

    /// Raised when a routing response does not match the expected schema.
    #[error("malformed routing response: {message}")]
    MalformedResponse { message: String },

    /// Raised when a configured endpoint is not a valid URL.
    #[error("invalid endpoint URL {url}")]
    InvalidEndpoint { url: String },

    /// Raised when a remote endpoint answers with a non-success HTTP status.
    #[error("request to {endpoint} failed with HTTP status {status}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
