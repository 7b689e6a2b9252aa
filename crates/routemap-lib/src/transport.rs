//! Blocking HTTP transport used for routing and static map requests.

use reqwest::blocking::Client;
use reqwest::Url;

use crate::error::{Error, Result};

/// Fetch a URL and return its body.
///
/// Implementations must map non-success HTTP statuses to
/// [`Error::HttpStatus`] so callers can tell a rejected credential apart from
/// a network failure.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                endpoint: redact_query(url).to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

fn user_agent() -> String {
    format!("routemap-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

/// Strip the query string so credentials never end up in error messages.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map(|(base, _)| base).unwrap_or(url)
}

/// Percent-encode `value` for use as a single query parameter value.
pub(crate) fn encode_query_value(value: &str) -> Result<String> {
    const BASE: &str = "http://localhost/";
    let url = Url::parse_with_params(BASE, [("v", value)]).map_err(|_| Error::InvalidEndpoint {
        url: BASE.to_string(),
    })?;
    let query = url.query().unwrap_or_default();
    Ok(query.strip_prefix("v=").unwrap_or(query).to_string())
}
