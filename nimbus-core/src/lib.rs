//! nimbus-core
//!
//! Core types and utilities shared across the nimbus ecosystem.
//!
//! - `model`: the forecast data model (time points, series, grid snapshots).
//! - `timeparse`: the composite "instant + ISO-8601 duration" time encoding.
//! - `timeseries`: hourly resampling and multi-source averaging.
//! - `connector`: the `ForecastProvider` trait implemented by data sources.
//!
//! Everything in `timeparse` and `timeseries` is a pure function over
//! immutable inputs producing a new immutable output; there is no shared
//! mutable state, no I/O, and no retry logic anywhere in this crate. A
//! malformed input aborts the whole operation it participates in with a
//! [`NimbusError`] describing the offending source.
#![warn(missing_docs)]

/// Provider role traits implemented by forecast data sources.
pub mod connector;
/// The forecast data model.
pub mod model;
/// Parsing for the composite instant/duration time encoding.
pub mod timeparse;
/// Time-series utilities for hourly resampling and averaging.
pub mod timeseries;
pub mod types;

pub use connector::ForecastProvider;
pub use timeparse::{parse_duration, parse_valid_time};
pub use timeseries::average::average_forecasts;
pub use timeseries::resample::resample_hourly;
pub use types::*;
