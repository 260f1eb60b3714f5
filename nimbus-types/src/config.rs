//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Capacity and lifetime policy for a connector's point-lookup cache.
///
/// Gridpoint metadata is effectively static per coordinate, so the cache
/// exists to save HTTP round trips, not to track freshness. The policy is
/// injected into the connector at construction time; there is no hidden
/// process-wide cache state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointsCacheConfig {
    /// Maximum number of cached point lookups.
    pub capacity: u64,
    /// Time a cached lookup stays valid before it is refetched.
    pub ttl: Duration,
}

impl Default for PointsCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 512,
            ttl: Duration::from_secs(6 * 3600),
        }
    }
}

/// Global configuration for the `Nimbus` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NimbusConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out aggregations (multi-point averaging).
    /// If set, operations that aggregate multiple provider calls are bounded by it.
    pub request_timeout: Option<Duration>,
}

impl Default for NimbusConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
