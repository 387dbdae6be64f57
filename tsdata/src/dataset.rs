use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::ArrayD;
use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use rust_decimal::prelude::ToPrimitive;
use tsdata_core::{
    Action, Candle, GroupBy, Money, TimeIndex, TsDataError, as_ndarray, infer_freq, polars_err,
};

/// Name of the leading timestamp column of [`PriceDataset::frame`].
pub const DATE_COLUMN: &str = "Date";

/// One value field of a symbol's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price. Adjusted unless the dataset also has [`Field::AdjClose`].
    Close,
    /// Split/dividend adjusted close, present when `auto_adjust` is off.
    AdjClose,
    /// Traded volume.
    Volume,
    /// Cash dividends going ex on the row's date, `0.0` on other rows.
    Dividends,
    /// Split ratio taking effect on the row's date, `0.0` on other rows.
    StockSplits,
}

impl Field {
    /// Price and volume fields present in every dataset.
    pub const OHLCV: [Self; 5] = [Self::Open, Self::High, Self::Low, Self::Close, Self::Volume];

    /// Fields produced for the given settings, in column order.
    #[must_use]
    pub fn selection(auto_adjust: bool, include_actions: bool) -> Vec<Self> {
        let mut out = vec![Self::Open, Self::High, Self::Low, Self::Close];
        if !auto_adjust {
            out.push(Self::AdjClose);
        }
        out.push(Self::Volume);
        if include_actions {
            out.extend([Self::Dividends, Self::StockSplits]);
        }
        out
    }

    /// Header label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::AdjClose => "Adj Close",
            Self::Volume => "Volume",
            Self::Dividends => "Dividends",
            Self::StockSplits => "Stock Splits",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corporate action reduced to the value shown in its column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Event {
    Dividend(f64),
    Split(f64),
}

impl Event {
    /// Timestamp and value of an action. Capital gains have no column.
    pub(crate) fn from_action(a: &Action) -> Option<(DateTime<Utc>, Self)> {
        match a {
            Action::Dividend { ts, amount } => Some((*ts, Self::Dividend(price(amount)?))),
            Action::Split {
                ts,
                numerator,
                denominator,
            } if *denominator != 0 => Some((
                *ts,
                Self::Split(f64::from(*numerator) / f64::from(*denominator)),
            )),
            _ => None,
        }
    }
}

/// One symbol's bars and actions, already stamped with their row keys.
#[derive(Debug, Clone)]
pub(crate) struct SymbolHistory {
    pub(crate) symbol: String,
    pub(crate) candles: Vec<Candle>,
    pub(crate) events: Vec<(DateTime<Utc>, Event)>,
    /// The provider returned adjusted closes, raw ones in `close_unadj`.
    pub(crate) adjusted: bool,
}

/// Values of one symbol on one row.
struct Row<'a> {
    candle: &'a Candle,
    dividends: f64,
    split: f64,
}

impl SymbolHistory {
    fn rows(&self) -> BTreeMap<DateTime<Utc>, Row<'_>> {
        let mut rows: BTreeMap<DateTime<Utc>, Row<'_>> = self
            .candles
            .iter()
            .map(|c| {
                (
                    c.ts,
                    Row {
                        candle: c,
                        dividends: 0.0,
                        split: 0.0,
                    },
                )
            })
            .collect();
        for (ts, ev) in &self.events {
            if let Some(row) = rows.get_mut(ts) {
                match ev {
                    Event::Dividend(v) => row.dividends += v,
                    Event::Split(r) => row.split = *r,
                }
            }
        }
        rows
    }

    /// `raw_close` selects the unadjusted close for [`Field::Close`].
    #[allow(clippy::cast_precision_loss)]
    fn extract(&self, field: Field, row: &Row<'_>, raw_close: bool) -> Option<f64> {
        let c = row.candle;
        match field {
            Field::Open => price(&c.open),
            Field::High => price(&c.high),
            Field::Low => price(&c.low),
            Field::Close if raw_close && self.adjusted => {
                price(c.close_unadj.as_ref().unwrap_or(&c.close))
            }
            Field::Close => price(&c.close),
            Field::AdjClose => self.adjusted.then(|| price(&c.close)).flatten(),
            Field::Volume => c.volume.map(|v| v as f64),
            Field::Dividends => Some(row.dividends),
            Field::StockSplits => Some(row.split),
        }
    }
}

fn price(m: &Money) -> Option<f64> {
    m.amount().to_f64()
}

/// Identifies one value column: a symbol and one of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    /// Ticker symbol.
    pub symbol: String,
    /// Value field.
    pub field: Field,
}

impl ColumnKey {
    /// Column name inside the frame: `"{symbol}.{field}"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}.{}", self.symbol, self.field)
    }
}

/// Price table produced by one fetch.
///
/// The frame holds a leading [`DATE_COLUMN`] followed by one `f64` column per
/// [`ColumnKey`], in the order of [`PriceDataset::columns`]. Missing
/// observations are null.
#[derive(Debug, Clone)]
pub struct PriceDataset {
    index: TimeIndex,
    columns: Vec<ColumnKey>,
    group_by: GroupBy,
    frame: DataFrame,
    warnings: Vec<TsDataError>,
}

impl PriceDataset {
    /// Align per-symbol histories on the union of their row keys.
    ///
    /// `series` is in symbol order and `fields` in column order. Daily rows
    /// are expected at midnight of their trading day and become a `Date`
    /// column; with `intraday` set the timestamps go to a `Datetime` column.
    /// A symbol's cells are null on rows where it has no bar.
    pub(crate) fn assemble(
        series: &[SymbolHistory],
        fields: &[Field],
        group_by: GroupBy,
        intraday: bool,
        warnings: Vec<TsDataError>,
    ) -> Result<Self, TsDataError> {
        let stamps: BTreeSet<DateTime<Utc>> = series
            .iter()
            .flat_map(|h| h.candles.iter().map(|c| c.ts))
            .collect();
        let index = TimeIndex::new(stamps.into_iter().collect());
        let index = match infer_freq(&index) {
            Some(f) => index.with_freq(f),
            None => index,
        };

        let columns = column_order(series.iter().map(|h| h.symbol.as_str()), fields, group_by);
        let raw_close = fields.contains(&Field::AdjClose);
        let by_symbol: BTreeMap<&str, (&SymbolHistory, BTreeMap<DateTime<Utc>, Row<'_>>)> = series
            .iter()
            .map(|h| (h.symbol.as_str(), (h, h.rows())))
            .collect();

        let date = if intraday {
            index.to_datetime_series(DATE_COLUMN)?
        } else {
            index.to_date_series(DATE_COLUMN)?
        };
        let mut cols: Vec<Column> = Vec::with_capacity(columns.len() + 1);
        cols.push(date.into());
        for key in &columns {
            let entry = by_symbol.get(key.symbol.as_str());
            let values: Vec<Option<f64>> = index
                .values()
                .iter()
                .map(|ts| {
                    entry.and_then(|(h, rows)| {
                        rows.get(ts)
                            .and_then(|row| h.extract(key.field, row, raw_close))
                    })
                })
                .collect();
            cols.push(Series::new(key.name().into(), values).into());
        }
        let frame = DataFrame::new(cols).map_err(polars_err)?;

        Ok(Self {
            index,
            columns,
            group_by,
            frame,
            warnings,
        })
    }

    /// Timestamps of the rows, with an inferred frequency when one exists.
    #[must_use]
    pub const fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Value columns in frame order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    /// Column grouping used for this dataset.
    #[must_use]
    pub const fn group_by(&self) -> GroupBy {
        self.group_by
    }

    /// Symbols present in the dataset, in request order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for k in &self.columns {
            if !out.contains(&k.symbol.as_str()) {
                out.push(&k.symbol);
            }
        }
        out
    }

    /// Underlying polars frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the dataset and keep only the frame.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Per-symbol failures tolerated while building this dataset.
    #[must_use]
    pub fn warnings(&self) -> &[TsDataError] {
        &self.warnings
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Values of one column, if the symbol and field are present.
    #[must_use]
    pub fn column(&self, symbol: &str, field: Field) -> Option<&Series> {
        let name = format!("{symbol}.{field}");
        self.frame
            .column(&name)
            .ok()
            .map(Column::as_materialized_series)
    }

    /// Value columns as a `(rows, columns)` array, nulls as `NaN`.
    ///
    /// # Errors
    /// Returns `TsDataError::Data` if the frame cannot be reshaped.
    pub fn to_ndarray(&self) -> Result<ArrayD<f64>, TsDataError> {
        let values = self.frame.drop(DATE_COLUMN).map_err(polars_err)?;
        as_ndarray(values)
    }

    /// Write the dataset as CSV with a three-row header.
    ///
    /// ```text
    /// Ticker,AAPL,AAPL,...
    /// Price,Open,High,...
    /// Date,,,...
    /// 2023-01-03,130.28,130.9,...
    /// ```
    ///
    /// With [`GroupBy::Column`] the `Price` row comes first.
    ///
    /// # Errors
    /// Returns `TsDataError::Io` if the file cannot be created or written.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), TsDataError> {
        let path = path.as_ref();
        let io_err = |e: std::io::Error| TsDataError::io(path, &e);
        let file = std::fs::File::create(path).map_err(io_err)?;
        let mut w = BufWriter::new(file);

        let tickers = self.columns.iter().map(|k| k.symbol.as_str());
        let fields = self.columns.iter().map(|k| k.field.as_str());
        let ticker_row = header_row("Ticker", tickers);
        let price_row = header_row("Price", fields);
        let (first, second) = match self.group_by {
            GroupBy::Column => (price_row, ticker_row),
            _ => (ticker_row, price_row),
        };
        writeln!(w, "{first}").map_err(io_err)?;
        writeln!(w, "{second}").map_err(io_err)?;
        writeln!(w, "{DATE_COLUMN}{}", ",".repeat(self.columns.len())).map_err(io_err)?;

        let mut frame = self.frame.clone();
        CsvWriter::new(&mut w)
            .include_header(false)
            .finish(&mut frame)
            .map_err(|e| TsDataError::Io {
                path: path.display().to_string(),
                msg: e.to_string(),
            })?;
        w.flush().map_err(io_err)
    }
}

fn header_row<'a>(label: &str, cells: impl Iterator<Item = &'a str>) -> String {
    let mut row = label.to_string();
    for c in cells {
        row.push(',');
        row.push_str(c);
    }
    row
}

fn column_order<'a>(
    symbols: impl Iterator<Item = &'a str> + Clone,
    fields: &[Field],
    group_by: GroupBy,
) -> Vec<ColumnKey> {
    let key = |symbol: &str, field: Field| ColumnKey {
        symbol: symbol.to_string(),
        field,
    };
    match group_by {
        GroupBy::Column => fields
            .iter()
            .flat_map(|&f| symbols.clone().map(move |s| key(s, f)))
            .collect(),
        _ => symbols
            .flat_map(|s| fields.iter().map(move |&f| key(s, f)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tsdata_core::{Currency, IsoCurrency};

    fn usd(v: &str) -> Money {
        Money::from_canonical_str(v, Currency::Iso(IsoCurrency::USD)).unwrap()
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn candle(d: u32, px: &str, vol: u64) -> Candle {
        Candle {
            ts: day(d),
            open: usd(px),
            high: usd(px),
            low: usd(px),
            close: usd(px),
            close_unadj: None,
            volume: Some(vol),
        }
    }

    fn history(symbol: &str, candles: Vec<Candle>) -> SymbolHistory {
        SymbolHistory {
            symbol: symbol.to_string(),
            candles,
            events: vec![],
            adjusted: false,
        }
    }

    #[test]
    fn union_index_with_nulls_for_gaps() {
        let series = vec![
            history("AAA", vec![candle(4, "1", 10), candle(5, "2", 20)]),
            history("BBB", vec![candle(5, "3", 30), candle(6, "4", 40)]),
        ];
        let ds =
            PriceDataset::assemble(&series, &Field::OHLCV, GroupBy::Ticker, false, vec![]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.frame().width(), 11);

        let a_close = ds.column("AAA", Field::Close).unwrap();
        assert_eq!(a_close.null_count(), 1);
        let b_vol = ds.column("BBB", Field::Volume).unwrap();
        assert_eq!(b_vol.f64().unwrap().get(2), Some(40.0));
        assert_eq!(ds.symbols(), vec!["AAA", "BBB"]);
    }

    #[test]
    fn column_grouping_orders_fields_first() {
        let order = column_order(["A", "B"].into_iter(), &Field::OHLCV, GroupBy::Column);
        let names: Vec<String> = order.iter().take(3).map(ColumnKey::name).collect();
        assert_eq!(names, ["A.Open", "B.Open", "A.High"]);

        let order = column_order(["A", "B"].into_iter(), &Field::OHLCV, GroupBy::Ticker);
        let names: Vec<String> = order.iter().take(6).map(ColumnKey::name).collect();
        assert_eq!(
            names,
            ["A.Open", "A.High", "A.Low", "A.Close", "A.Volume", "B.Open"]
        );
    }

    #[test]
    fn field_selection_follows_settings() {
        assert_eq!(Field::selection(true, false), Field::OHLCV.to_vec());
        let labels: Vec<&str> = Field::selection(false, true)
            .into_iter()
            .map(Field::as_str)
            .collect();
        assert_eq!(
            labels,
            ["Open", "High", "Low", "Close", "Adj Close", "Volume", "Dividends", "Stock Splits"]
        );
    }

    #[test]
    fn raw_and_adjusted_closes_split_into_two_columns() {
        let mut c = candle(4, "9.5", 10);
        c.close_unadj = Some(usd("10"));
        let mut h = history("AAA", vec![c]);
        h.adjusted = true;
        let fields = Field::selection(false, false);
        let ds = PriceDataset::assemble(&[h.clone()], &fields, GroupBy::Ticker, false, vec![])
            .unwrap();
        let close = ds.column("AAA", Field::Close).unwrap();
        let adj = ds.column("AAA", Field::AdjClose).unwrap();
        assert_eq!(close.f64().unwrap().get(0), Some(10.0));
        assert_eq!(adj.f64().unwrap().get(0), Some(9.5));

        let ds = PriceDataset::assemble(&[h], &Field::OHLCV, GroupBy::Ticker, false, vec![])
            .unwrap();
        let close = ds.column("AAA", Field::Close).unwrap();
        assert_eq!(close.f64().unwrap().get(0), Some(9.5));
    }

    #[test]
    fn unadjusted_provider_leaves_adj_close_null() {
        let h = history("AAA", vec![candle(4, "3", 10)]);
        let fields = Field::selection(false, false);
        let ds = PriceDataset::assemble(&[h], &fields, GroupBy::Ticker, false, vec![]).unwrap();
        assert_eq!(ds.column("AAA", Field::AdjClose).unwrap().null_count(), 1);
        let close = ds.column("AAA", Field::Close).unwrap();
        assert_eq!(close.f64().unwrap().get(0), Some(3.0));
    }

    #[test]
    fn actions_land_on_their_rows() {
        let mut h = history("AAA", vec![candle(4, "1", 10), candle(5, "1", 10), candle(6, "1", 10)]);
        h.events = [
            Action::Dividend {
                ts: day(5),
                amount: usd("0.25"),
            },
            Action::Split {
                ts: day(6),
                numerator: 4,
                denominator: 1,
            },
            Action::Dividend {
                ts: day(20),
                amount: usd("9"),
            },
        ]
        .iter()
        .filter_map(Event::from_action)
        .collect();
        let fields = Field::selection(true, true);
        let ds = PriceDataset::assemble(&[h], &fields, GroupBy::Ticker, false, vec![]).unwrap();

        let div: Vec<Option<f64>> = ds
            .column("AAA", Field::Dividends)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(div, [Some(0.0), Some(0.25), Some(0.0)]);
        let split: Vec<Option<f64>> = ds
            .column("AAA", Field::StockSplits)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(split, [Some(0.0), Some(0.0), Some(4.0)]);
    }

    #[test]
    fn ndarray_drops_date_column() {
        let series = vec![history("AAA", vec![candle(4, "1.5", 10)])];
        let ds =
            PriceDataset::assemble(&series, &Field::OHLCV, GroupBy::Ticker, false, vec![]).unwrap();
        let a = ds.to_ndarray().unwrap();
        assert_eq!(a.shape(), &[1, 5]);
        assert_eq!(a[[0, 0]], 1.5);
        assert_eq!(a[[0, 4]], 10.0);
    }
}
