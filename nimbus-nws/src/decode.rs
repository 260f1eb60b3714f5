//! Serde DTOs for api.weather.gov payloads and their conversion into the
//! core data model. Wire shapes stay private to this crate; callers only
//! ever see [`GridForecast`] and [`PointsResponse`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use nimbus_core::{
    Elevation, GridForecast, NimbusError, SeriesKind, Timeseries, TimeseriesValue,
    parse_valid_time,
};

use crate::client::CONNECTOR;

/// Gridpoint metadata for a coordinate, from `/points/{lat},{lon}`.
///
/// Besides the grid endpoint this connector follows, the lookup carries
/// office and grid identifiers that are useful to callers for display and
/// station selection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    /// Canonical URL of this points resource.
    #[serde(rename = "@id")]
    pub id: String,
    /// Issuing forecast office identifier.
    pub cwa: String,
    /// Grid column within the office's grid.
    pub grid_x: i64,
    /// Grid row within the office's grid.
    pub grid_y: i64,
    /// Endpoint serving the raw gridded forecast for this cell.
    pub forecast_grid_data: String,
    /// IANA time zone of the location.
    pub time_zone: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridResponseDto {
    #[serde(rename = "@id")]
    id: String,
    update_time: String,
    valid_times: String,
    elevation: ElevationDto,
    #[serde(default)]
    temperature: SeriesDto,
    #[serde(default)]
    sky_cover: SeriesDto,
    #[serde(default)]
    wind_speed: SeriesDto,
    #[serde(default)]
    probability_of_precipitation: SeriesDto,
    #[serde(default)]
    quantitative_precipitation: SeriesDto,
    #[serde(default)]
    snowfall_amount: SeriesDto,
    #[serde(default)]
    snow_level: SeriesDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElevationDto {
    unit_code: String,
    value: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SeriesDto {
    #[serde(default)]
    uom: String,
    #[serde(default)]
    values: Vec<SeriesValueDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesValueDto {
    valid_time: String,
    value: f64,
}

impl GridResponseDto {
    /// Convert the wire shape into a validated [`GridForecast`].
    ///
    /// Series the payload omits (or serves empty) are left out of the map; a
    /// payload with no usable series at all is rejected, since nothing could
    /// ever be resampled from it.
    pub(crate) fn into_forecast(self) -> Result<GridForecast, NimbusError> {
        let validity = parse_valid_time(&self.valid_times)?;
        let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.update_time)
            .map_err(|e| {
                NimbusError::connector(CONNECTOR, format!("bad updateTime in {}: {e}", self.id))
            })?
            .with_timezone(&Utc);

        let mut series = BTreeMap::new();
        for (kind, dto) in [
            (SeriesKind::Temperature, self.temperature),
            (SeriesKind::SkyCover, self.sky_cover),
            (SeriesKind::WindSpeed, self.wind_speed),
            (
                SeriesKind::PrecipitationProbability,
                self.probability_of_precipitation,
            ),
            (
                SeriesKind::PrecipitationQuantity,
                self.quantitative_precipitation,
            ),
            (SeriesKind::SnowfallAmount, self.snowfall_amount),
            (SeriesKind::SnowLevel, self.snow_level),
        ] {
            if let Some(ts) = dto.into_series(kind, &self.id)? {
                series.insert(kind, ts);
            }
        }
        if series.is_empty() {
            return Err(NimbusError::Data(format!(
                "grid payload {} carries no series",
                self.id
            )));
        }

        Ok(GridForecast {
            source: self.id,
            updated_at,
            elevation: Elevation {
                value: self.elevation.value,
                unit: self.elevation.unit_code,
            },
            validity,
            series,
        })
    }
}

impl SeriesDto {
    fn into_series(
        self,
        kind: SeriesKind,
        source: &str,
    ) -> Result<Option<Timeseries>, NimbusError> {
        if self.values.is_empty() {
            return Ok(None);
        }
        let values = self
            .values
            .into_iter()
            .map(|v| {
                Ok(TimeseriesValue {
                    time: parse_valid_time(&v.valid_time)?,
                    value: v.value,
                })
            })
            .collect::<Result<Vec<_>, NimbusError>>()?;
        Timeseries::new(kind, source, self.uom, values).map(Some)
    }
}
