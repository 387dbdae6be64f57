use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::HistoryMeta;

/// Trading day a bar belongs to, in the market's local calendar.
///
/// Uses the exchange timezone from `meta` when present, then its fixed UTC
/// offset, and falls back to the UTC date. Daily bars are stamped at the
/// session open, which for Asia-Pacific venues lands on the previous UTC day.
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use tsdata_core::{session_day, HistoryMeta};
///
/// let open = Utc.with_ymd_and_hms(2023, 1, 2, 23, 0, 0).unwrap();
/// let meta = HistoryMeta { timezone: None, utc_offset_seconds: Some(11 * 3600) };
/// assert_eq!(session_day(open, Some(&meta)), NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
/// assert_eq!(session_day(open, None), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
/// ```
#[must_use]
pub fn session_day(ts: DateTime<Utc>, meta: Option<&HistoryMeta>) -> NaiveDate {
    if let Some(m) = meta {
        if let Some(tz) = m.timezone {
            return ts.with_timezone(&tz).date_naive();
        }
        if let Some(local) = m
            .utc_offset_seconds
            .and_then(TimeDelta::try_seconds)
            .and_then(|off| ts.checked_add_signed(off))
        {
            return local.date_naive();
        }
    }
    ts.date_naive()
}
