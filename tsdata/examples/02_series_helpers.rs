use chrono::NaiveDate;
use polars::prelude::*;
use tsdata::{TimeIndex, add_freq, as_ndarray, is_datetime_dtypes};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).ok_or("bad date");

    // Month-end spacing is inferred; an explicit alias always wins.
    let idx = TimeIndex::from_dates([d(1, 31)?, d(2, 29)?, d(3, 31)?, d(4, 30)?]);
    println!("inferred: {:?}", add_freq(&idx, None)?.freq().map(|f| f.to_string()));
    println!("explicit: {:?}", add_freq(&idx, Some("2W-MON"))?.freq().map(|f| f.to_string()));

    let irregular = TimeIndex::from_dates([d(1, 1)?, d(1, 2)?, d(1, 9)?]);
    if let Err(e) = add_freq(&irregular, None) {
        println!("irregular: {e}");
    }

    let dates = idx.to_date_series("Date")?;
    println!("is datetime: {}", is_datetime_dtypes(&dates));

    let df = df!("open" => [1.0, 2.0, 3.0], "volume" => [10i64, 20, 30])?;
    let arr = as_ndarray(df)?;
    println!("array shape: {:?}\n{arr}", arr.shape());

    if let Err(e) = as_ndarray(Series::new("sym".into(), ["AAPL"])) {
        println!("rejected: {e}");
    }
    Ok(())
}
