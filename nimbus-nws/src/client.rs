//! HTTP plumbing for api.weather.gov.
//!
//! The service requires a `User-Agent` identifying the caller and serves a
//! flattened JSON-LD document when asked for `application/ld+json`; endpoint
//! URLs embedded in responses occasionally come back as plain `http` and
//! must be upgraded before following them.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use nimbus_core::NimbusError;

pub(crate) const CONNECTOR: &str = "nws";
const ACCEPT_LD_JSON: &str = "application/ld+json";

pub(crate) struct NwsClient {
    http: reqwest::Client,
    base: Url,
    user_agent: String,
}

impl NwsClient {
    pub(crate) fn new(base: Url, user_agent: String) -> Result<Self, NimbusError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| NimbusError::connector(CONNECTOR, e.to_string()))?;
        Ok(Self {
            http,
            base,
            user_agent,
        })
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }

    /// GET `url` and decode the JSON-LD body.
    ///
    /// 404 maps to `NotFound` (the service answers 404 for any coordinate it
    /// has no grid for, including everything outside the US); any other
    /// failure is tagged with the connector name.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NimbusError> {
        // Discovered endpoints sometimes come back as plain http; follow them
        // on the base's scheme so a non-TLS test server stays reachable.
        let url = if self.base.scheme() == "https" {
            url.replacen("http://", "https://", 1)
        } else {
            url.to_owned()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "fetching");
        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, ACCEPT_LD_JSON)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| NimbusError::connector(CONNECTOR, e.to_string()))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(NimbusError::not_found(format!("no data at {url}")));
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| NimbusError::connector(CONNECTOR, e.to_string()))?;
        resp.json::<T>()
            .await
            .map_err(|e| NimbusError::connector(CONNECTOR, format!("decoding {url}: {e}")))
    }
}
