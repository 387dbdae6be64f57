use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::*;

use super::frequency::Frequency;
use super::infer::infer_freq;
use crate::{TsDataError, polars_err};

/// Ordered sequence of UTC timestamps with an optional sampling frequency.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeIndex {
    values: Vec<DateTime<Utc>>,
    freq: Option<Frequency>,
}

impl TimeIndex {
    /// Build an index without a frequency.
    #[must_use]
    pub const fn new(values: Vec<DateTime<Utc>>) -> Self {
        Self { values, freq: None }
    }

    /// Build an index of midnight timestamps from calendar dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::new(
            dates
                .into_iter()
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
                .collect(),
        )
    }

    /// Timestamps in index order.
    #[must_use]
    pub fn values(&self) -> &[DateTime<Utc>] {
        &self.values
    }

    /// Number of timestamps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the index holds no timestamps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First timestamp, if any.
    #[must_use]
    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.values.first().copied()
    }

    /// Last timestamp, if any.
    #[must_use]
    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.values.last().copied()
    }

    /// Explicit frequency, if one is set.
    #[must_use]
    pub const fn freq(&self) -> Option<Frequency> {
        self.freq
    }

    /// Return the index with `freq` set, replacing any previous frequency.
    #[must_use]
    pub fn with_freq(mut self, freq: Frequency) -> Self {
        self.freq = Some(freq);
        self
    }

    /// Render as a polars `Datetime(ms)` series named `name`.
    ///
    /// # Errors
    /// Returns `TsDataError::Data` if polars rejects the cast.
    pub fn to_datetime_series(&self, name: &str) -> Result<Series, TsDataError> {
        let millis: Vec<i64> = self.values.iter().map(DateTime::timestamp_millis).collect();
        Series::new(name.into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .map_err(polars_err)
    }

    /// Render as a polars `Date` series named `name`, dropping the time of day.
    ///
    /// # Errors
    /// Returns `TsDataError::Data` if a date falls outside the `i32` day range
    /// or polars rejects the cast.
    pub fn to_date_series(&self, name: &str) -> Result<Series, TsDataError> {
        let days = self
            .values
            .iter()
            .map(|t| {
                i32::try_from(t.timestamp().div_euclid(86_400))
                    .map_err(|_| TsDataError::Data(format!("date out of range: {t}")))
            })
            .collect::<Result<Vec<i32>, _>>()?;
        Series::new(name.into(), days)
            .cast(&DataType::Date)
            .map_err(polars_err)
    }
}

fn from_unit(v: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
    }
}

impl TryFrom<&Series> for TimeIndex {
    type Error = TsDataError;

    /// Read a `Date` or `Datetime` series. Nulls are rejected.
    fn try_from(s: &Series) -> Result<Self, Self::Error> {
        let null = || TsDataError::Data(format!("null or out-of-range timestamp in {}", s.name()));
        let values = match s.dtype() {
            DataType::Datetime(unit, _) => {
                let unit = *unit;
                let phys = s.cast(&DataType::Int64).map_err(polars_err)?;
                phys.i64()
                    .map_err(polars_err)?
                    .iter()
                    .map(|v| v.and_then(|v| from_unit(v, unit)).ok_or_else(null))
                    .collect::<Result<Vec<_>, _>>()?
            }
            DataType::Date => {
                let phys = s.cast(&DataType::Int32).map_err(polars_err)?;
                phys.i32()
                    .map_err(polars_err)?
                    .iter()
                    .map(|v| {
                        v.and_then(|d| DateTime::from_timestamp(i64::from(d) * 86_400, 0))
                            .ok_or_else(null)
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            other => {
                return Err(TsDataError::InvalidType {
                    expected: "Date or Datetime column".into(),
                    got: other.to_string(),
                });
            }
        };
        Ok(Self::new(values))
    }
}

/// Add a frequency to `idx`, directly or through inference. Returns a copy.
///
/// - `freq` is `None` and the index already has a frequency: the copy is
///   returned unchanged.
/// - `freq` is `None` otherwise: the frequency is inferred with [`infer_freq`].
/// - `freq` is `Some`: it is parsed and set on the copy, replacing any prior
///   frequency. It is not checked against the timestamps.
///
/// # Errors
/// - `TsDataError::InvalidFrequency` if `freq` cannot be parsed.
/// - `TsDataError::NoDiscernibleFrequency` if no frequency was given and none
///   could be inferred.
///
/// ```
/// use tsdata_core::{add_freq, Frequency, TimeIndex};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let idx = TimeIndex::from_dates([d(1), d(2), d(3), d(4)]);
/// assert_eq!(add_freq(&idx, None).unwrap().freq(), Some(Frequency::DAILY));
/// assert!(idx.freq().is_none());
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "tsdata::timeseries",
        level = "debug",
        skip(idx),
        fields(len = idx.len(), freq = ?freq),
    )
)]
pub fn add_freq(idx: &TimeIndex, freq: Option<&str>) -> Result<TimeIndex, TsDataError> {
    let copy = idx.clone();
    let resolved = match freq {
        Some(text) => Some(text.parse::<Frequency>()?),
        None if copy.freq.is_some() => return Ok(copy),
        None => infer_freq(&copy),
    };
    resolved
        .map(|f| copy.with_freq(f))
        .ok_or(TsDataError::NoDiscernibleFrequency)
}
