//! Nimbus combines gridded weather forecasts from multiple sources into one.
//!
//! Overview
//! - Registers providers implementing the `nimbus_core` contracts and routes
//!   gridpoint requests to them with priority-with-fallback semantics.
//! - Fetches forecasts for a set of coordinates concurrently, bounded by
//!   per-provider timeouts and an optional overall deadline.
//! - Normalizes every fetched series onto a uniform hourly grid and reduces
//!   the sources by unweighted elementwise mean.
//!
//! Key behaviors and trade-offs
//! - Provider fallback: connectors are tried in registration order until one
//!   succeeds; a `NotFound` from one provider does not stop the search.
//! - Averaging window: the union of the sources' observed coverage, so no
//!   provider's real samples are dropped just because its advertised window
//!   was narrower. Hours a source does not cover are filled by carrying its
//!   nearest value (backward at the head, forward everywhere else).
//! - Failure model: averaging has no partial-failure mode. If any point's
//!   fetch fails, the whole operation fails with that error rather than
//!   silently averaging fewer sources.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use nimbus::Nimbus;
//! use nimbus_core::Point;
//!
//! let nws = Arc::new(
//!     nimbus_nws::NwsConnector::builder()
//!         .user_agent("my-app (contact@example.com)")
//!         .build()?,
//! );
//! let nimbus = Nimbus::builder().with_connector(nws).build()?;
//!
//! // One forecast, averaged over the gridpoints around a summit.
//! let fcst = nimbus
//!     .average_forecast(&[
//!         Point::new(46.8523, -121.7603),
//!         Point::new(46.8600, -121.7500),
//!     ])
//!     .await?;
//! ```
//!
//! See `nimbus/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Nimbus, NimbusBuilder};

// Re-export core types for convenience
pub use nimbus_core::{
    Elevation, ForecastProvider, GridForecast, NimbusConfig, NimbusError, Point,
    PointsCacheConfig, SeriesKind, TimePoint, Timeseries, TimeseriesValue, WindowEdge,
    average_forecasts, parse_duration, parse_valid_time, resample_hourly,
};
