//! nimbus-nws
//!
//! Connector for the National Weather Service REST API (api.weather.gov).
//!
//! The service is endpoint-driven: a coordinate is first resolved through
//! `/points/{lat},{lon}` to gridpoint metadata, whose `forecastGridData`
//! endpoint then serves the raw gridded forecast. Gridpoint metadata is
//! effectively static per coordinate, so lookups are memoized in a cache
//! whose capacity and TTL the caller injects at construction time; there is
//! no process-wide cache state.
//!
//! ```rust,ignore
//! use nimbus_core::{ForecastProvider, Point};
//! use nimbus_nws::NwsConnector;
//!
//! let nws = NwsConnector::builder()
//!     .user_agent("my-app (contact@example.com)")
//!     .build()?;
//! let forecast = nws.grid_forecast(&Point::new(64.8284, -147.739)).await?;
//! ```
#![warn(missing_docs)]

mod client;
mod decode;

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use url::Url;

use nimbus_core::{ForecastProvider, GridForecast, NimbusError, Point};
use nimbus_types::PointsCacheConfig;

use client::{CONNECTOR, NwsClient};
pub use decode::PointsResponse;

/// Production base URL of the NWS REST API.
pub const API: &str = "https://api.weather.gov";

/// `ForecastProvider` backed by api.weather.gov.
pub struct NwsConnector {
    client: NwsClient,
    points_cache: Cache<String, Arc<PointsResponse>>,
}

impl NwsConnector {
    /// Start building a connector against the production API.
    #[must_use]
    pub fn builder() -> NwsConnectorBuilder {
        NwsConnectorBuilder::new()
    }

    /// Resolve a coordinate to gridpoint metadata, via the injected cache.
    ///
    /// # Errors
    /// Returns `NotFound` for coordinates the service has no grid for, or a
    /// connector-tagged error for transport and decode failures. Failed
    /// lookups are not cached.
    pub async fn points(&self, point: &Point) -> Result<Arc<PointsResponse>, NimbusError> {
        let key = point.to_string();
        let endpoint = format!("{}points/{key}", self.client.base());
        self.points_cache
            .try_get_with(key, async {
                self.client
                    .get_json::<PointsResponse>(&endpoint)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|e: Arc<NimbusError>| (*e).clone())
    }
}

#[async_trait]
impl ForecastProvider for NwsConnector {
    fn name(&self) -> &'static str {
        CONNECTOR
    }

    async fn grid_forecast(&self, point: &Point) -> Result<GridForecast, NimbusError> {
        let points = self.points(point).await?;
        let dto = self
            .client
            .get_json::<decode::GridResponseDto>(&points.forecast_grid_data)
            .await?;
        dto.into_forecast()
    }
}

/// Builder for [`NwsConnector`].
///
/// The NWS asks every client to identify itself through `User-Agent`;
/// supply something that lets them reach you. The base URL override exists
/// for tests against a local mock server.
pub struct NwsConnectorBuilder {
    base_url: String,
    user_agent: String,
    cache: PointsCacheConfig,
}

impl Default for NwsConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NwsConnectorBuilder {
    /// Create a builder with the production base URL and default cache policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: API.to_owned(),
            user_agent: concat!("nimbus/", env!("CARGO_PKG_VERSION")).to_owned(),
            cache: PointsCacheConfig::default(),
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Inject the capacity and lifetime policy for the point-lookup cache.
    #[must_use]
    pub const fn points_cache(mut self, cache: PointsCacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparseable base URL and a
    /// connector-tagged error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<NwsConnector, NimbusError> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| NimbusError::InvalidArg(format!("base url {}: {e}", self.base_url)))?;
        // A trailing slash keeps path concatenation uniform.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let client = NwsClient::new(base, self.user_agent)?;
        let points_cache = Cache::builder()
            .max_capacity(self.cache.capacity)
            .time_to_live(self.cache.ttl)
            .build();
        Ok(NwsConnector {
            client,
            points_cache,
        })
    }
}
