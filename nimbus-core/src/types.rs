//! Re-export of foundational types from `nimbus-types` and the local model.
// Consolidated re-exports so downstream crates can depend on `nimbus-core` only

pub use nimbus_types::{NimbusConfig, NimbusError, PointsCacheConfig, WindowEdge};

pub use crate::model::{
    Elevation, GridForecast, Point, SeriesKind, TimePoint, Timeseries, TimeseriesValue,
};
pub use crate::timeseries::average::MEAN_SOURCE;
