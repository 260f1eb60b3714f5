//! Time-series utilities shared by the averager and orchestrator.
//!
//! Modules include:
//! - `resample`: expand an irregular, duration-tagged series into a dense
//!   hourly series covering an exact window
//! - `average`: align several grid forecasts onto a common window and reduce
//!   them by unweighted mean

/// Multi-source alignment and averaging.
pub mod average;
/// Hourly resampling of irregular series.
pub mod resample;
