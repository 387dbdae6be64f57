use std::path::Path;

use tsdata_core::TsDataError;

use crate::{PriceDataset, Tickers, TsData};

/// Download daily prices from Yahoo Finance for one or more symbols.
///
/// `symbols` is a single symbol, a list of symbols, or a JSON string/array.
/// `start` and `end` are `YYYY-MM-DD`; `end` is exclusive. With `save_file`,
/// the dataset is also written as CSV.
///
/// Blocks the calling thread; do not call from within an async runtime, use
/// [`TsData::fetch`] there instead.
///
/// # Errors
/// See [`crate::FetchBuilder::run`]. Every error is also logged at `error` level.
///
/// ```rust,no_run
/// use tsdata::download_yahoo_finance_ticker;
///
/// let data = download_yahoo_finance_ticker(["AAPL", "MSFT"], "2023-01-01", "2023-02-01", None)?;
/// println!("{}", data.frame());
/// # Ok::<(), tsdata::TsDataError>(())
/// ```
pub fn download_yahoo_finance_ticker<T>(
    symbols: T,
    start: &str,
    end: &str,
    save_file: Option<&Path>,
) -> Result<PriceDataset, TsDataError>
where
    T: TryInto<Tickers, Error = TsDataError>,
{
    let tsdata = TsData::yahoo().inspect_err(|e| {
        tracing::error!(target: "tsdata::fetch", error = %e, "an error occurred during download");
    })?;
    let mut fetch = tsdata.fetch().tickers(symbols).period(start, end);
    if let Some(path) = save_file {
        fetch = fetch.save_to(path);
    }
    fetch.run_blocking()
}
