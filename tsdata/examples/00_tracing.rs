mod common;

use tracing_subscriber::fmt::format::FmtSpan;
use tsdata::TsData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,tsdata=trace,tsdata_yfinance=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let ts = TsData::builder()
        .with_provider(common::get_provider())
        .build()?;

    // One good symbol, one unknown: the unknown one is logged at warn.
    let data = ts
        .fetch()
        .tickers(["AAPL", "NOPE"])
        .period("2023-01-01", "2023-01-11")
        .run()
        .await?;
    println!("{} rows, {} warnings", data.len(), data.warnings().len());

    // Logged at error and returned.
    let _ = ts.fetch().tickers("").period("2023-01-01", "2023-01-11").run().await;

    Ok(())
}
