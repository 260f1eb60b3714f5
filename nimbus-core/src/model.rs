use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::NimbusError;

/// An instant paired with a validity duration: "valid starting at this
/// instant, for this long."
///
/// Equality is by value on both fields; the averager relies on that literal
/// equality as its cross-source alignment check. `duration` is never
/// negative: both parsing and resampling only produce non-negative spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    /// Start of the validity span.
    pub instant: DateTime<Utc>,
    /// Length of the validity span.
    pub duration: TimeDelta,
}

impl TimePoint {
    /// Pair an instant with a validity duration.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self { instant, duration }
    }

    /// End-exclusive upper bound of the span (`instant + duration`).
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.instant + self.duration
    }
}

/// One forecast sample: a validity span and the value holding over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeseriesValue {
    /// Validity span of the sample.
    pub time: TimePoint,
    /// Forecast value over that span.
    pub value: f64,
}

/// The closed set of gridded series a forecast can carry.
///
/// The upstream payload keys these by name; modeling them as an enum removes
/// the "missing key" failure mode from every lookup site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKind {
    /// Air temperature.
    Temperature,
    /// Sky cover percentage.
    SkyCover,
    /// Sustained wind speed.
    WindSpeed,
    /// Probability of precipitation.
    PrecipitationProbability,
    /// Quantitative precipitation amount.
    PrecipitationQuantity,
    /// Snowfall amount.
    SnowfallAmount,
    /// Snow level altitude.
    SnowLevel,
}

impl SeriesKind {
    /// Every known series, in payload order.
    pub const ALL: [Self; 7] = [
        Self::Temperature,
        Self::SkyCover,
        Self::WindSpeed,
        Self::PrecipitationProbability,
        Self::PrecipitationQuantity,
        Self::SnowfallAmount,
        Self::SnowLevel,
    ];

    /// Stable label used in diagnostics and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::SkyCover => "skyCover",
            Self::WindSpeed => "windSpeed",
            Self::PrecipitationProbability => "precipitationProbability",
            Self::PrecipitationQuantity => "precipitationQuantity",
            Self::SnowfallAmount => "snowfallAmount",
            Self::SnowLevel => "snowLevel",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, irregular, ordered series of `(validity span, value)` pairs.
///
/// Construction validates the series invariants once; the value is immutable
/// afterwards, so every operation downstream may assume a non-empty series
/// whose spans ascend without overlapping. Resampling and averaging always
/// allocate a new `Timeseries` rather than mutating their input.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeseries {
    kind: SeriesKind,
    source: String,
    units: String,
    values: Vec<TimeseriesValue>,
}

impl Timeseries {
    /// Build a series, rejecting empty input and out-of-order or overlapping
    /// spans.
    ///
    /// # Errors
    /// Returns `NimbusError::Data` if `values` is empty, or if any span
    /// starts before the previous span has ended.
    pub fn new(
        kind: SeriesKind,
        source: impl Into<String>,
        units: impl Into<String>,
        values: Vec<TimeseriesValue>,
    ) -> Result<Self, NimbusError> {
        let source = source.into();
        if values.is_empty() {
            return Err(NimbusError::Data(format!(
                "empty {kind} series from {source}"
            )));
        }
        for w in values.windows(2) {
            if w[1].time.instant < w[0].time.end() {
                return Err(NimbusError::Data(format!(
                    "{kind} series from {source} has out-of-order or overlapping spans at {}",
                    w[1].time.instant
                )));
            }
        }
        Ok(Self {
            kind,
            source,
            units: units.into(),
            values,
        })
    }

    /// Which series this is.
    #[must_use]
    pub const fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Identifier of the source that produced the series.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Unit string as reported by the source.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// The samples, ascending by start instant.
    #[must_use]
    pub fn values(&self) -> &[TimeseriesValue] {
        &self.values
    }

    /// First instant covered by the series.
    #[must_use]
    pub fn tmin(&self) -> DateTime<Utc> {
        self.values[0].time.instant
    }

    /// End-exclusive upper bound of the series' coverage.
    #[must_use]
    pub fn tmax(&self) -> DateTime<Utc> {
        self.values[self.values.len() - 1].time.end()
    }
}

/// Surface elevation of a grid cell, with the unit the source reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Elevation {
    /// Elevation value.
    pub value: f64,
    /// Unit string, e.g. `wmoUnit:m`.
    pub unit: String,
}

/// A full gridded forecast snapshot from one source.
///
/// A standalone, fully-owned value: averaging reads any number of these and
/// produces a new one without touching its inputs. Individual series may
/// extend slightly past the advertised `validity` window; the resampler
/// truncates them rather than erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct GridForecast {
    /// Identifier of the producing source (typically the grid endpoint URL).
    pub source: String,
    /// When the source last updated this forecast.
    pub updated_at: DateTime<Utc>,
    /// Grid cell elevation.
    pub elevation: Elevation,
    /// The forecast's overall advertised window.
    pub validity: TimePoint,
    /// The per-kind series this snapshot carries. Sources may omit kinds.
    pub series: BTreeMap<SeriesKind, Timeseries>,
}

impl GridForecast {
    /// Observed coverage bounds: the union of every series' `[tmin, tmax)`.
    ///
    /// Falls back to the advertised `validity` window when the snapshot
    /// carries no series at all. The advertised window can be narrower than
    /// the actual data, so window computations prefer these bounds.
    #[must_use]
    pub fn observed_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for ts in self.series.values() {
            bounds = Some(match bounds {
                None => (ts.tmin(), ts.tmax()),
                Some((lo, hi)) => (lo.min(ts.tmin()), hi.max(ts.tmax())),
            });
        }
        bounds.unwrap_or_else(|| (self.validity.instant, self.validity.end()))
    }
}

/// A geographic coordinate used for gridpoint discovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Point {
    /// Build a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The upstream API rejects coordinates with more than four decimals.
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}
