use std::sync::Arc;

use nimbus::{Nimbus, SeriesKind};
use nimbus_core::Point;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the resampling windows each source gets.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let nws = Arc::new(
        nimbus_nws::NwsConnector::builder()
            .user_agent("nimbus-examples (github.com/nimbus-wx/nimbus)")
            .build()?,
    );
    let nimbus = Nimbus::builder().with_connector(nws).build()?;

    // Adjacent gridpoints around the same summit; their forecasts disagree
    // slightly and the average smooths the seams between grid cells.
    let points = [
        Point::new(46.7860, -121.7352),
        Point::new(46.8000, -121.7300),
    ];
    let fcst = nimbus.average_forecast(&points).await?;

    println!(
        "averaged {} gridpoints onto {} .. {}",
        points.len(),
        fcst.validity.instant,
        fcst.validity.end()
    );
    if let Some(temp) = fcst.series.get(&SeriesKind::Temperature) {
        println!("hourly temperature [{}]:", temp.units());
        for v in temp.values().iter().take(12) {
            println!("  {}  {:5.1}", v.time.instant, v.value);
        }
    }

    Ok(())
}
