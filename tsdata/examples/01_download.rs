mod common;

use polars::prelude::ChunkAgg;
use tsdata::{Field, GroupBy, TsData};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ts = TsData::builder()
        .with_provider(common::get_provider())
        .group_by(GroupBy::Ticker)
        .build()?;

    let out = std::env::temp_dir().join("tsdata_prices.csv");
    let data = ts
        .fetch()
        .tickers(["AAPL", "MSFT", "GOOG"])
        .period("2023-01-01", "2023-01-11")
        .save_to(&out)
        .run()
        .await?;

    println!("{}", data.frame());
    if let Some(freq) = data.index().freq() {
        println!("inferred frequency: {freq}");
    }
    if let Some(close) = data.column("AAPL", Field::Close) {
        println!("AAPL close mean: {:?}", close.f64()?.mean());
    }
    for w in data.warnings() {
        eprintln!("- {w}");
    }
    println!("saved to {}", out.display());
    Ok(())
}
