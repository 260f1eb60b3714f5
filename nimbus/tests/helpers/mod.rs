#![allow(dead_code)]

pub mod mock_connector;

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use nimbus_core::{
    Elevation, GridForecast, SeriesKind, TimePoint, Timeseries, TimeseriesValue,
};

pub const BASE: i64 = 1_597_809_600; // 2020-08-19T04:00:00Z

pub fn hour(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE + offset * 3600, 0).unwrap()
}

pub fn sample(offset: i64, span: i64, value: f64) -> TimeseriesValue {
    TimeseriesValue {
        time: TimePoint::new(hour(offset), TimeDelta::hours(span)),
        value,
    }
}

/// A small single-series forecast whose temperature holds `value` over
/// `[hour(0), hour(hours))`.
pub fn flat_forecast(source: &str, value: f64, hours: i64) -> GridForecast {
    let ts = Timeseries::new(
        SeriesKind::Temperature,
        source,
        "wmoUnit:degC",
        vec![sample(0, hours, value)],
    )
    .unwrap();
    let mut series = BTreeMap::new();
    series.insert(SeriesKind::Temperature, ts);
    GridForecast {
        source: source.to_owned(),
        updated_at: hour(0),
        elevation: Elevation {
            value: 100.0,
            unit: "wmoUnit:m".to_owned(),
        },
        validity: TimePoint::new(hour(0), TimeDelta::hours(hours)),
        series,
    }
}
