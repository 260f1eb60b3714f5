use async_trait::async_trait;

use crate::NimbusError;
use crate::model::{GridForecast, Point};

/// Focused role trait for providers that serve gridded forecast data.
///
/// Implementations own their transport, endpoint discovery, and payload
/// decoding; callers receive fully-populated [`GridForecast`] values and
/// never see provider wire formats.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Short, stable name used for error tagging and logs.
    fn name(&self) -> &'static str;

    /// Fetch the full gridded forecast covering the given coordinate.
    async fn grid_forecast(&self, point: &Point) -> Result<GridForecast, NimbusError>;
}
