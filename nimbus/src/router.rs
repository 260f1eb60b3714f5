use nimbus_core::{GridForecast, NimbusError, Point, average_forecasts};

use crate::Nimbus;
use crate::core::{provider_call_with_timeout, tag_err, with_request_deadline};

impl Nimbus {
    /// Fetch the gridded forecast for one coordinate.
    ///
    /// Providers are tried in registration order under the per-provider
    /// timeout; the first success wins. A provider answering `NotFound` does
    /// not stop the search — another source may still cover the point.
    ///
    /// # Errors
    /// Returns `NotFound` when every provider reported the point unknown,
    /// and `AllProvidersFailed` with the collected failures otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(point = %point))
    )]
    pub async fn grid_forecast(&self, point: &Point) -> Result<GridForecast, NimbusError> {
        let mut errors: Vec<NimbusError> = Vec::new();
        for c in &self.connectors {
            let fut = c.grid_forecast(point);
            match provider_call_with_timeout(
                c.name(),
                "grid-forecast",
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(fcst) => return Ok(fcst),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %e, "provider failed");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }
        if errors
            .iter()
            .all(|e| matches!(e, NimbusError::NotFound { .. }))
        {
            return Err(NimbusError::not_found(format!("gridpoint for {point}")));
        }
        Err(NimbusError::AllProvidersFailed(errors))
    }

    /// Fetch forecasts for every coordinate and reduce them to one by
    /// unweighted elementwise mean.
    ///
    /// Fetches fan out concurrently (one per point, each with provider
    /// fallback) and are bounded by the configured overall deadline, if any.
    /// There is no partial-failure mode: a single failed fetch aborts the
    /// whole averaging operation.
    ///
    /// # Errors
    /// - `NoInputData` if `points` is empty.
    /// - `RequestTimeout` if the overall deadline elapses.
    /// - The first fetch error, if any point could not be resolved.
    /// - Any error the averager raises (unit mismatches, window defects).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(points = points.len()))
    )]
    pub async fn average_forecast(&self, points: &[Point]) -> Result<GridForecast, NimbusError> {
        if points.is_empty() {
            return Err(NimbusError::NoInputData);
        }
        let tasks = points.iter().map(|p| self.grid_forecast(p));
        let joined = with_request_deadline(
            "average-forecast",
            self.cfg.request_timeout,
            futures::future::join_all(tasks),
        )
        .await?;

        let forecasts = joined
            .into_iter()
            .collect::<Result<Vec<GridForecast>, NimbusError>>()?;
        average_forecasts(&forecasts)
    }
}
