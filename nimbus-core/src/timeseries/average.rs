use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::NimbusError;
use crate::model::{Elevation, GridForecast, SeriesKind, TimePoint, Timeseries, TimeseriesValue};
use crate::timeseries::resample::resample_hourly;

/// Source identifier carried by an averaged forecast and its series.
pub const MEAN_SOURCE: &str = "mean";

/// Reduce several grid forecasts to one by unweighted elementwise mean.
///
/// The union window is computed from every forecast's OBSERVED series bounds
/// (a source's advertised validity can be narrower than its actual data, and
/// trusting it would make the resampler silently drop real samples). Every
/// series of every source is resampled onto that window, verified for unit
/// agreement, equal length, and slot-for-slot time alignment, and averaged
/// index by index. Elevation is averaged the same way. The result carries
/// the first input's `updated_at`; update metadata is not averaged.
///
/// Purely functional: inputs are only read.
///
/// # Errors
/// - `NimbusError::NoInputData` if `forecasts` is empty.
/// - `NimbusError::UnitMismatch` if elevation units differ (naming the
///   offending index) or a series' units differ across sources (naming the
///   series key).
/// - `NimbusError::LengthMismatch` / `NimbusError::TimeAlignmentMismatch` if
///   resampled series disagree on length or slot instants; both indicate a
///   resampler defect and must be treated as logic errors, not retried.
/// - Any error the resampler raises for an individual series.
pub fn average_forecasts(forecasts: &[GridForecast]) -> Result<GridForecast, NimbusError> {
    let Some(first) = forecasts.first() else {
        return Err(NimbusError::NoInputData);
    };

    let base_unit = &first.elevation.unit;
    for (i, fcst) in forecasts.iter().enumerate() {
        if fcst.elevation.unit != *base_unit {
            return Err(NimbusError::UnitMismatch {
                context: format!("elevation[i={i}]"),
                expected: base_unit.clone(),
                found: fcst.elevation.unit.clone(),
            });
        }
    }

    let (window_start, window_end) = union_window(first, forecasts);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        forecasts = forecasts.len(),
        window_start = %window_start,
        window_end = %window_end,
        "averaging onto union window"
    );

    let count = forecasts.len() as f64;
    let elevation = Elevation {
        value: forecasts.iter().map(|f| f.elevation.value).sum::<f64>() / count,
        unit: base_unit.clone(),
    };

    let mut series = BTreeMap::new();
    for kind in SeriesKind::ALL {
        let inputs: Vec<&Timeseries> = forecasts
            .iter()
            .filter_map(|f| f.series.get(&kind))
            .collect();
        if inputs.is_empty() {
            continue;
        }
        series.insert(kind, average_series(kind, &inputs, window_start, window_end)?);
    }

    Ok(GridForecast {
        source: MEAN_SOURCE.to_owned(),
        updated_at: first.updated_at,
        elevation,
        validity: TimePoint::new(window_start, window_end - window_start),
        series,
    })
}

/// Union of all observed coverage bounds across the input forecasts.
fn union_window(first: &GridForecast, forecasts: &[GridForecast]) -> (DateTime<Utc>, DateTime<Utc>) {
    let (mut lo, mut hi) = first.observed_bounds();
    for fcst in forecasts {
        let (f_lo, f_hi) = fcst.observed_bounds();
        lo = lo.min(f_lo);
        hi = hi.max(f_hi);
        #[cfg(feature = "tracing")]
        tracing::debug!(source = %fcst.source, tmin = %f_lo, tmax = %f_hi, "observed bounds");
    }
    (lo, hi)
}

fn average_series(
    kind: SeriesKind,
    inputs: &[&Timeseries],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Timeseries, NimbusError> {
    let hourly = inputs
        .iter()
        .map(|ts| resample_hourly(ts, window_start, window_end))
        .collect::<Result<Vec<_>, _>>()?;
    let base = &hourly[0];

    for (i, ts) in hourly.iter().enumerate().skip(1) {
        if ts.units() != base.units() {
            return Err(NimbusError::UnitMismatch {
                context: format!("{kind}[i={i}]"),
                expected: base.units().to_owned(),
                found: ts.units().to_owned(),
            });
        }
        if ts.values().len() != base.values().len() {
            return Err(NimbusError::LengthMismatch {
                series: kind.to_string(),
                base_source: base.source().to_owned(),
                other_source: ts.source().to_owned(),
                expected: base.values().len(),
                found: ts.values().len(),
            });
        }
        for (e, (a, b)) in base.values().iter().zip(ts.values()).enumerate() {
            // Literal TimePoint equality; resampling onto a shared window
            // guarantees it, so a mismatch is an upstream logic defect.
            if a.time != b.time {
                return Err(NimbusError::TimeAlignmentMismatch {
                    series: kind.to_string(),
                    index: e,
                    base_source: base.source().to_owned(),
                    other_source: ts.source().to_owned(),
                });
            }
        }
    }

    let count = hourly.len() as f64;
    let values = base
        .values()
        .iter()
        .enumerate()
        .map(|(e, slot)| TimeseriesValue {
            time: slot.time,
            value: hourly.iter().map(|ts| ts.values()[e].value).sum::<f64>() / count,
        })
        .collect();
    Timeseries::new(kind, MEAN_SOURCE, base.units(), values)
}
