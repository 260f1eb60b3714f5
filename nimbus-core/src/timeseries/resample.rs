use chrono::{DateTime, TimeDelta, Utc};

use crate::NimbusError;
use crate::model::{TimePoint, Timeseries, TimeseriesValue};
use nimbus_types::WindowEdge;

/// Expand an irregular series into a dense hourly series covering exactly
/// `[window_start, window_end]`.
///
/// The output has `hours(window_end - window_start) + 1` one-hour slots, one
/// per integer hour offset, with no gaps:
///
/// - hours before the series' own coverage are backward-filled with its
///   first value;
/// - a sample whose span covers `k` hours emits `k` consecutive slots
///   carrying its value;
/// - interior gaps between samples are closed by carrying the last emitted
///   value forward, one hour at a time;
/// - data past `window_end` is silently cut off (sources may advertise a
///   narrower window than their series actually cover);
/// - if the input runs out early, the last filled value repeats to the end.
///
/// Slot instants are anchored to the source's own instants, so a source
/// whose samples are inconsistent with the requested window fails the final
/// boundary check instead of being silently shifted onto it.
///
/// The result carries the input's kind, source, and units; the input is not
/// modified.
///
/// # Errors
/// - `NimbusError::InvalidArg` if `window_end` precedes `window_start`.
/// - `NimbusError::Data` if the series covers less than one full hour, so
///   no slot can be derived from it.
/// - `NimbusError::WindowMismatch` if the first or last output slot does not
///   land exactly on the window bounds; this means the source's advertised
///   window disagrees with its actual samples and is diagnostic, not
///   recoverable.
pub fn resample_hourly(
    series: &Timeseries,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<Timeseries, NimbusError> {
    if window_end < window_start {
        return Err(NimbusError::InvalidArg(format!(
            "window end {window_end} precedes window start {window_start}"
        )));
    }
    let hour = TimeDelta::hours(1);
    let n = usize::try_from((window_end - window_start).num_hours() + 1)
        .map_err(|_| NimbusError::InvalidArg("window too large to resample".into()))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        series = %series.kind(),
        source = %series.source(),
        original_len = series.values().len(),
        original_tmin = %series.tmin(),
        original_tmax = %series.tmax(),
        hourly_len = n,
        "resampling to hourly"
    );

    let mut out: Vec<TimeseriesValue> = Vec::with_capacity(n);

    // Backward-fill leading hours the series does not reach back to.
    let first = series.values()[0];
    let lead = (series.tmin() - window_start).num_hours();
    for i in 0..lead.max(0) {
        if out.len() >= n {
            break;
        }
        out.push(TimeseriesValue {
            time: TimePoint::new(window_start + TimeDelta::hours(i), hour),
            value: first.value,
        });
    }

    for v in series.values() {
        if !out.is_empty() && out.len() < n {
            // The source sometimes skips hours between samples; carry the
            // last emitted value forward until this sample's start.
            let last = out[out.len() - 1];
            let gap = (v.time.instant - last.time.instant).num_hours();
            for j in 1..gap {
                if out.len() >= n {
                    break;
                }
                out.push(TimeseriesValue {
                    time: TimePoint::new(last.time.instant + TimeDelta::hours(j), hour),
                    value: last.value,
                });
            }
        }
        let span = v.time.duration.num_hours();
        for i in 0..span {
            if out.len() >= n {
                // The source may carry data past the window's end; cut it off.
                break;
            }
            out.push(TimeseriesValue {
                time: TimePoint::new(v.time.instant + TimeDelta::hours(i), hour),
                value: v.value,
            });
        }
    }

    let Some(&last) = out.last() else {
        return Err(NimbusError::Data(format!(
            "{} series from {} covers no whole hour",
            series.kind(),
            series.source()
        )));
    };

    // Repeat the last filled value out to the window's end.
    let mut i = 1i64;
    while out.len() < n {
        out.push(TimeseriesValue {
            time: TimePoint::new(last.time.instant + TimeDelta::hours(i), hour),
            value: last.value,
        });
        i += 1;
    }

    let found_start = out[0].time.instant;
    if found_start != window_start {
        return Err(window_mismatch(
            series,
            WindowEdge::Start,
            window_start,
            found_start,
        ));
    }
    let found_end = out[n - 1].time.instant;
    if found_end != window_end {
        return Err(window_mismatch(
            series,
            WindowEdge::End,
            window_end,
            found_end,
        ));
    }

    Timeseries::new(series.kind(), series.source(), series.units(), out)
}

fn window_mismatch(
    series: &Timeseries,
    edge: WindowEdge,
    expected: DateTime<Utc>,
    found: DateTime<Utc>,
) -> NimbusError {
    NimbusError::WindowMismatch {
        series: series.kind().to_string(),
        source_id: series.source().to_owned(),
        edge,
        expected: expected.to_rfc3339(),
        found: found.to_rfc3339(),
    }
}
