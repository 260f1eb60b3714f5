use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use nimbus_core::{
    Elevation, GridForecast, MEAN_SOURCE, NimbusError, SeriesKind, TimePoint, Timeseries,
    TimeseriesValue, average_forecasts, resample_hourly,
};

const BASE: i64 = 1_597_809_600; // 2020-08-19T04:00:00Z

fn hour(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE + offset * 3600, 0).unwrap()
}

fn sample(offset: i64, span: i64, value: f64) -> TimeseriesValue {
    TimeseriesValue {
        time: TimePoint::new(hour(offset), TimeDelta::hours(span)),
        value,
    }
}

fn series(
    kind: SeriesKind,
    source: &str,
    units: &str,
    values: Vec<TimeseriesValue>,
) -> Timeseries {
    Timeseries::new(kind, source, units, values).unwrap()
}

fn forecast(source: &str, elevation: f64, series_list: Vec<Timeseries>) -> GridForecast {
    let mut map = BTreeMap::new();
    let mut lo = None;
    let mut hi = None;
    for ts in series_list {
        lo = Some(ts.tmin().min(lo.unwrap_or_else(|| ts.tmin())));
        hi = Some(ts.tmax().max(hi.unwrap_or_else(|| ts.tmax())));
        map.insert(ts.kind(), ts);
    }
    let start = lo.unwrap_or_else(|| hour(0));
    GridForecast {
        source: source.to_owned(),
        updated_at: hour(0),
        elevation: Elevation {
            value: elevation,
            unit: "wmoUnit:m".to_owned(),
        },
        validity: TimePoint::new(start, hi.unwrap_or_else(|| hour(0)) - start),
        series: map,
    }
}

fn temperatures(fcst: &GridForecast) -> Vec<f64> {
    fcst.series[&SeriesKind::Temperature]
        .values()
        .iter()
        .map(|v| v.value)
        .collect()
}

#[test]
fn averaging_a_forecast_with_itself_matches_its_own_resample() {
    let fcst = forecast(
        "grid-a",
        120.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 3, 10.0), sample(4, 2, 14.0)],
        )],
    );
    let avg = average_forecasts(&[fcst.clone(), fcst.clone()]).unwrap();

    let (start, end) = fcst.observed_bounds();
    let own = resample_hourly(&fcst.series[&SeriesKind::Temperature], start, end).unwrap();
    let avg_ts = &avg.series[&SeriesKind::Temperature];
    assert_eq!(avg_ts.values().len(), own.values().len());
    for (a, b) in avg_ts.values().iter().zip(own.values()) {
        assert_eq!(a.time, b.time);
        assert!((a.value - b.value).abs() < 1e-9);
    }
    assert!((avg.elevation.value - 120.0).abs() < 1e-9);
}

#[test]
fn averaging_is_order_independent() {
    let a = forecast(
        "grid-a",
        100.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 2, 10.0), sample(2, 2, 12.0)],
        )],
    );
    let b = forecast(
        "grid-b",
        200.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-b",
            "wmoUnit:degC",
            vec![sample(0, 4, 20.0)],
        )],
    );
    let ab = average_forecasts(&[a.clone(), b.clone()]).unwrap();
    let ba = average_forecasts(&[b, a]).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(temperatures(&ab), vec![15.0, 15.0, 16.0, 16.0, 16.0]);
}

#[test]
fn union_window_spans_all_observed_bounds() {
    // grid-a covers hours [0, 4); grid-b covers [2, 10). The averaged
    // forecast must span [0, 10] even though neither source does.
    let a = forecast(
        "grid-a",
        0.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 4, 8.0)],
        )],
    );
    let b = forecast(
        "grid-b",
        0.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-b",
            "wmoUnit:degC",
            vec![sample(2, 8, 16.0)],
        )],
    );
    let avg = average_forecasts(&[a, b]).unwrap();
    assert_eq!(avg.validity.instant, hour(0));
    assert_eq!(avg.validity.end(), hour(10));
    let ts = &avg.series[&SeriesKind::Temperature];
    assert_eq!(ts.values().len(), 11);
    // grid-b backfills its first value before hour 2; grid-a carries its
    // last value forward past hour 4.
    assert_eq!(ts.values()[0].value, 12.0);
    assert_eq!(ts.values()[10].value, 12.0);
}

#[test]
fn averaged_output_carries_mean_identity_and_first_updated_at() {
    let mut a = forecast(
        "grid-a",
        10.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 2, 1.0)],
        )],
    );
    a.updated_at = hour(-7);
    let b = forecast(
        "grid-b",
        30.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-b",
            "wmoUnit:degC",
            vec![sample(0, 2, 3.0)],
        )],
    );
    let avg = average_forecasts(&[a, b]).unwrap();
    assert_eq!(avg.source, MEAN_SOURCE);
    assert_eq!(avg.updated_at, hour(-7));
    assert!((avg.elevation.value - 20.0).abs() < 1e-9);
    assert_eq!(avg.series[&SeriesKind::Temperature].source(), MEAN_SOURCE);
}

#[test]
fn series_missing_from_one_source_averages_the_rest() {
    let a = forecast(
        "grid-a",
        0.0,
        vec![
            series(
                SeriesKind::Temperature,
                "grid-a",
                "wmoUnit:degC",
                vec![sample(0, 2, 10.0)],
            ),
            series(
                SeriesKind::WindSpeed,
                "grid-a",
                "wmoUnit:km_h-1",
                vec![sample(0, 2, 30.0)],
            ),
        ],
    );
    let b = forecast(
        "grid-b",
        0.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-b",
            "wmoUnit:degC",
            vec![sample(0, 2, 20.0)],
        )],
    );
    let avg = average_forecasts(&[a, b]).unwrap();
    assert_eq!(temperatures(&avg), vec![15.0, 15.0, 15.0]);
    let wind: Vec<f64> = avg.series[&SeriesKind::WindSpeed]
        .values()
        .iter()
        .map(|v| v.value)
        .collect();
    assert_eq!(wind, vec![30.0, 30.0, 30.0]);
    assert!(!avg.series.contains_key(&SeriesKind::SkyCover));
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(
        average_forecasts(&[]),
        Err(NimbusError::NoInputData)
    ));
}

#[test]
fn elevation_unit_disagreement_is_rejected() {
    let a = forecast(
        "grid-a",
        100.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 2, 1.0)],
        )],
    );
    let mut b = a.clone();
    b.source = "grid-b".to_owned();
    b.elevation.unit = "wmoUnit:ft".to_owned();
    let err = average_forecasts(&[a, b]).unwrap_err();
    match err {
        NimbusError::UnitMismatch { context, expected, found } => {
            assert_eq!(context, "elevation[i=1]");
            assert_eq!(expected, "wmoUnit:m");
            assert_eq!(found, "wmoUnit:ft");
        }
        other => panic!("expected UnitMismatch, got {other:?}"),
    }
}

#[test]
fn series_unit_disagreement_is_rejected() {
    let a = forecast(
        "grid-a",
        0.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-a",
            "wmoUnit:degC",
            vec![sample(0, 2, 1.0)],
        )],
    );
    let b = forecast(
        "grid-b",
        0.0,
        vec![series(
            SeriesKind::Temperature,
            "grid-b",
            "wmoUnit:degF",
            vec![sample(0, 2, 1.0)],
        )],
    );
    let err = average_forecasts(&[a, b]).unwrap_err();
    match err {
        NimbusError::UnitMismatch { context, .. } => assert_eq!(context, "temperature[i=1]"),
        other => panic!("expected UnitMismatch, got {other:?}"),
    }
}
