use std::sync::Arc;
use std::time::Duration;

use nimbus_core::{ForecastProvider, NimbusError};
use nimbus_types::NimbusConfig;

/// Orchestrator that routes gridpoint requests across registered providers.
pub struct Nimbus {
    pub(crate) connectors: Vec<Arc<dyn ForecastProvider>>,
    pub(crate) cfg: NimbusConfig,
}

impl Nimbus {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> NimbusBuilder {
        NimbusBuilder::new()
    }
}

/// Builder for constructing a [`Nimbus`] orchestrator with custom configuration.
pub struct NimbusBuilder {
    connectors: Vec<Arc<dyn ForecastProvider>>,
    cfg: NimbusConfig,
}

impl Default for NimbusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NimbusBuilder {
    /// Create a new builder with sensible defaults: no connectors registered,
    /// a 10s per-provider timeout, and no overall deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: NimbusConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the fallback order: earlier connectors are tried
    /// first for every gridpoint request.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ForecastProvider>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the timeout applied to each individual provider call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound multi-point aggregations by an overall deadline.
    #[must_use]
    pub const fn request_timeout(mut self, deadline: Duration) -> Self {
        self.cfg.request_timeout = Some(deadline);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was registered.
    pub fn build(self) -> Result<Nimbus, NimbusError> {
        if self.connectors.is_empty() {
            return Err(NimbusError::InvalidArg(
                "at least one connector must be registered".into(),
            ));
        }
        Ok(Nimbus {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Tag an untagged error with the connector it came from; errors that already
/// carry provenance pass through unchanged.
pub(crate) fn tag_err(connector: &str, e: NimbusError) -> NimbusError {
    match e {
        e @ (NimbusError::NotFound { .. }
        | NimbusError::ProviderTimeout { .. }
        | NimbusError::Connector { .. }
        | NimbusError::RequestTimeout { .. }
        | NimbusError::AllProvidersFailed(_)) => e,
        other => NimbusError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Await `fut` under the per-provider timeout, mapping expiry to
/// `ProviderTimeout` tagged with the connector and capability.
pub(crate) async fn provider_call_with_timeout<T>(
    connector: &str,
    capability: &'static str,
    timeout: Duration,
    fut: impl Future<Output = Result<T, NimbusError>>,
) -> Result<T, NimbusError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res,
        Err(_) => Err(NimbusError::provider_timeout(connector, capability)),
    }
}

/// Apply an optional overall deadline to a fan-out future.
pub(crate) async fn with_request_deadline<T>(
    capability: &'static str,
    deadline: Option<Duration>,
    fut: impl Future<Output = T>,
) -> Result<T, NimbusError> {
    if let Some(deadline) = deadline {
        (tokio::time::timeout(deadline, fut).await)
            .map_err(|_| NimbusError::request_timeout(capability))
    } else {
        Ok(fut.await)
    }
}
