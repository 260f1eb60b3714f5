#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nimbus_core::{ForecastProvider, GridForecast, NimbusError, Point};
use tokio::time::{Duration, sleep};

type ForecastFn = dyn Fn(&Point) -> Result<GridForecast, NimbusError> + Send + Sync;

/// Simple in-memory provider used by integration tests.
///
/// Behavior is tailored per test via the fields below; `forecast_fn` wins
/// over the fixed `forecast` response when both are set.
pub struct MockConnector {
    pub name: &'static str,
    pub forecast: Option<GridForecast>,
    pub error: Option<NimbusError>,
    pub delay_ms: u64,
    pub forecast_fn: Option<Arc<ForecastFn>>,
    calls: AtomicUsize,
}

impl MockConnector {
    pub fn returning(name: &'static str, forecast: GridForecast) -> Self {
        Self {
            name,
            forecast: Some(forecast),
            error: None,
            delay_ms: 0,
            forecast_fn: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str, error: NimbusError) -> Self {
        Self {
            name,
            forecast: None,
            error: Some(error),
            delay_ms: 0,
            forecast_fn: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_fn(name: &'static str, f: Arc<ForecastFn>) -> Self {
        Self {
            name,
            forecast: None,
            error: None,
            delay_ms: 0,
            forecast_fn: Some(f),
            calls: AtomicUsize::new(0),
        }
    }

    pub const fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastProvider for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn grid_forecast(&self, point: &Point) -> Result<GridForecast, NimbusError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.forecast_fn {
            return f(point);
        }
        if let Some(e) = &self.error {
            return Err(e.clone());
        }
        self.forecast
            .clone()
            .ok_or_else(|| NimbusError::not_found(format!("gridpoint for {point}")))
    }
}
