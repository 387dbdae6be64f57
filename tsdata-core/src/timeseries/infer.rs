use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc, Weekday};

use super::frequency::{FreqUnit, Frequency};
use super::index::TimeIndex;

const DAY: i64 = 86_400;

/// Positive adjacent deltas in seconds, or `None` if the timestamps are not
/// strictly increasing or carry sub-second offsets.
fn strict_deltas(ts: &[DateTime<Utc>]) -> Option<Vec<i64>> {
    let mut deltas = Vec::with_capacity(ts.len().saturating_sub(1));
    for w in ts.windows(2) {
        let dt: TimeDelta = w[1] - w[0];
        if dt <= TimeDelta::zero() || dt.subsec_nanos() != 0 {
            return None;
        }
        deltas.push(dt.num_seconds());
    }
    Some(deltas)
}

/// Infer the sampling frequency of an index from the spacing of its timestamps.
///
/// Rules, in order:
/// - fewer than 3 timestamps, or not strictly increasing: `None`;
/// - one constant step: whole weeks become `W-<weekday>`, whole days `D`,
///   otherwise hours, minutes or seconds;
/// - constant month distance with every timestamp at midnight on a month,
///   quarter or year boundary: `MS`/`ME`, `QS`/`QE`, `YS`/`YE`;
/// - weekdays only, stepping one day or Friday to Monday: `B`.
///
/// ```
/// use chrono::NaiveDate;
/// use tsdata_core::{infer_freq, Frequency, TimeIndex};
///
/// let idx = TimeIndex::new(
///     (1..=5)
///         .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc())
///         .collect(),
/// );
/// assert_eq!(infer_freq(&idx), Some(Frequency::DAILY));
/// ```
#[must_use]
pub fn infer_freq(idx: &TimeIndex) -> Option<Frequency> {
    let ts = idx.values();
    if ts.len() < 3 {
        return None;
    }
    let deltas = strict_deltas(ts)?;
    let first = deltas[0];

    if deltas.iter().all(|&d| d == first) {
        return Some(uniform_rule(first, ts[0].weekday()));
    }
    if deltas.iter().all(|&d| d % DAY == 0) {
        if let Some(f) = calendar_rule(ts) {
            return Some(f);
        }
        if is_business_daily(ts, &deltas) {
            return Some(Frequency::BUSINESS_DAILY);
        }
    }
    None
}

fn uniform_rule(step: i64, first_weekday: Weekday) -> Frequency {
    let (n, unit) = if step % (7 * DAY) == 0 {
        (step / (7 * DAY), FreqUnit::Week(first_weekday))
    } else if step % DAY == 0 {
        (step / DAY, FreqUnit::Day)
    } else if step % 3600 == 0 {
        (step / 3600, FreqUnit::Hour)
    } else if step % 60 == 0 {
        (step / 60, FreqUnit::Minute)
    } else {
        (step, FreqUnit::Second)
    };
    Frequency::of(u32::try_from(n).unwrap_or(u32::MAX), unit)
}

fn month_ordinal(t: &DateTime<Utc>) -> i64 {
    i64::from(t.year()) * 12 + i64::from(t.month0())
}

fn is_month_end(t: &DateTime<Utc>) -> bool {
    t.date_naive()
        .succ_opt()
        .is_some_and(|next| next.month() != t.month())
}

fn calendar_rule(ts: &[DateTime<Utc>]) -> Option<Frequency> {
    let step = month_ordinal(&ts[1]) - month_ordinal(&ts[0]);
    if step <= 0
        || ts
            .windows(2)
            .any(|w| month_ordinal(&w[1]) - month_ordinal(&w[0]) != step)
    {
        return None;
    }
    if ts.iter().any(|t| t.time() != NaiveTime::MIN) {
        return None;
    }
    let starts = ts.iter().all(|t| t.day() == 1);
    let ends = ts.iter().all(is_month_end);
    if !starts && !ends {
        return None;
    }
    let n = u32::try_from(step).ok()?;

    let months_in = |allowed: &[u32]| ts.iter().all(|t| allowed.contains(&t.month()));
    let (n, unit) = if step % 12 == 0 && starts && months_in(&[1]) {
        (n / 12, FreqUnit::YearStart)
    } else if step % 12 == 0 && ends && months_in(&[12]) {
        (n / 12, FreqUnit::YearEnd)
    } else if step % 3 == 0 && starts && months_in(&[1, 4, 7, 10]) {
        (n / 3, FreqUnit::QuarterStart)
    } else if step % 3 == 0 && ends && months_in(&[3, 6, 9, 12]) {
        (n / 3, FreqUnit::QuarterEnd)
    } else if starts {
        (n, FreqUnit::MonthStart)
    } else {
        (n, FreqUnit::MonthEnd)
    };
    Some(Frequency::of(n, unit))
}

fn is_business_daily(ts: &[DateTime<Utc>], deltas: &[i64]) -> bool {
    let weekend = |t: &DateTime<Utc>| matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
    if ts.iter().any(weekend) {
        return false;
    }
    ts.iter().zip(deltas).all(|(from, &d)| match d / DAY {
        1 => true,
        3 => from.weekday() == Weekday::Fri,
        _ => false,
    })
}
