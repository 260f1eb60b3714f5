use std::sync::Arc;

use nimbus::{Nimbus, SeriesKind};
use nimbus_core::Point;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create the NWS connector. The service requires a User-Agent that
    //    identifies the caller; see weather.gov/documentation/services-web-api.
    let nws = Arc::new(
        nimbus_nws::NwsConnector::builder()
            .user_agent("nimbus-examples (github.com/nimbus-wx/nimbus)")
            .build()?,
    );

    // 2. Build the orchestrator and register the connector.
    let nimbus = Nimbus::builder().with_connector(nws).build()?;

    // 3. Fetch the gridded forecast for a point (Paradise, Mount Rainier).
    let point = Point::new(46.7860, -121.7352);
    println!("Fetching grid forecast for {point}...");
    let fcst = nimbus.grid_forecast(&point).await?;

    // 4. Print a summary.
    println!("source:    {}", fcst.source);
    println!("updated:   {}", fcst.updated_at);
    println!("window:    {} .. {}", fcst.validity.instant, fcst.validity.end());
    println!("elevation: {} {}", fcst.elevation.value, fcst.elevation.unit);
    for kind in SeriesKind::ALL {
        if let Some(ts) = fcst.series.get(&kind) {
            println!("{kind:>26}: {} samples [{}]", ts.values().len(), ts.units());
        }
    }

    Ok(())
}
