use std::fmt;
use std::str::FromStr;

use chrono::{TimeDelta, Weekday};

use crate::TsDataError;

/// Base unit of a sampling frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FreqUnit {
    /// Seconds (`s`).
    Second,
    /// Minutes (`min`).
    Minute,
    /// Hours (`h`).
    Hour,
    /// Calendar days (`D`).
    Day,
    /// Weekdays, Monday through Friday (`B`).
    BusinessDay,
    /// Weeks anchored on a weekday (`W-SUN`, `W-MON`, ...).
    Week(Weekday),
    /// First calendar day of each month (`MS`).
    MonthStart,
    /// Last calendar day of each month (`ME`).
    MonthEnd,
    /// First day of January, April, July and October (`QS`).
    QuarterStart,
    /// Last day of March, June, September and December (`QE`).
    QuarterEnd,
    /// First day of January (`YS`).
    YearStart,
    /// Last day of December (`YE`).
    YearEnd,
}

impl FreqUnit {
    fn alias(self) -> String {
        match self {
            Self::Second => "s".into(),
            Self::Minute => "min".into(),
            Self::Hour => "h".into(),
            Self::Day => "D".into(),
            Self::BusinessDay => "B".into(),
            Self::Week(day) => format!("W-{}", weekday_code(day)),
            Self::MonthStart => "MS".into(),
            Self::MonthEnd => "ME".into(),
            Self::QuarterStart => "QS".into(),
            Self::QuarterEnd => "QE".into(),
            Self::YearStart => "YS".into(),
            Self::YearEnd => "YE".into(),
        }
    }

    fn parse_alias(s: &str) -> Option<Self> {
        let unit = match s {
            "s" | "S" => Self::Second,
            "min" | "T" => Self::Minute,
            "h" | "H" => Self::Hour,
            "D" | "d" => Self::Day,
            "B" | "b" => Self::BusinessDay,
            "W" => Self::Week(Weekday::Sun),
            "MS" => Self::MonthStart,
            "ME" | "M" => Self::MonthEnd,
            "QS" | "QS-JAN" => Self::QuarterStart,
            "QE" | "Q" | "QE-DEC" | "Q-DEC" => Self::QuarterEnd,
            "YS" | "AS" | "YS-JAN" | "AS-JAN" => Self::YearStart,
            "YE" | "Y" | "A" | "YE-DEC" | "Y-DEC" | "A-DEC" => Self::YearEnd,
            other => {
                if let Some(code) = other.strip_prefix("W-") {
                    return parse_weekday_code(code).map(Self::Week);
                }
                match other.to_ascii_lowercase().as_str() {
                    "sec" | "second" | "seconds" | "secondly" => Self::Second,
                    "minute" | "minutes" | "minutely" => Self::Minute,
                    "hour" | "hours" | "hourly" => Self::Hour,
                    "day" | "days" | "daily" | "calendar-day" => Self::Day,
                    "business-day" | "business-daily" | "businessday" | "bday" => {
                        Self::BusinessDay
                    }
                    "week" | "weekly" => Self::Week(Weekday::Sun),
                    "month-start" => Self::MonthStart,
                    "month" | "monthly" | "month-end" => Self::MonthEnd,
                    "quarter-start" => Self::QuarterStart,
                    "quarter" | "quarterly" | "quarter-end" => Self::QuarterEnd,
                    "year-start" => Self::YearStart,
                    "year" | "yearly" | "annual" | "year-end" => Self::YearEnd,
                    _ => return None,
                }
            }
        };
        Some(unit)
    }
}

const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

fn parse_weekday_code(code: &str) -> Option<Weekday> {
    let day = match code.to_ascii_uppercase().as_str() {
        "MON" => Weekday::Mon,
        "TUE" => Weekday::Tue,
        "WED" => Weekday::Wed,
        "THU" => Weekday::Thu,
        "FRI" => Weekday::Fri,
        "SAT" => Weekday::Sat,
        "SUN" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Sampling frequency of a time index: a positive multiple of a [`FreqUnit`].
///
/// Parses pandas-style offset aliases (`"D"`, `"B"`, `"5min"`, `"W-FRI"`,
/// `"MS"`, ...) and a handful of long names (`"daily"`, `"business-day"`).
/// Displays as the canonical alias, so `"T".parse()` prints back as `"min"`.
///
/// ```
/// use tsdata_core::{Frequency, FreqUnit};
///
/// let f: Frequency = "15min".parse().unwrap();
/// assert_eq!(f.n(), 15);
/// assert_eq!(f.unit(), FreqUnit::Minute);
/// assert_eq!(f.to_string(), "15min");
/// assert_eq!("business-day".parse::<Frequency>().unwrap(), Frequency::BUSINESS_DAILY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frequency {
    n: u32,
    unit: FreqUnit,
}

impl Frequency {
    /// One calendar day.
    pub const DAILY: Self = Self {
        n: 1,
        unit: FreqUnit::Day,
    };
    /// One business day.
    pub const BUSINESS_DAILY: Self = Self {
        n: 1,
        unit: FreqUnit::BusinessDay,
    };

    /// Build a frequency of `n` units.
    ///
    /// # Errors
    /// Returns `TsDataError::InvalidFrequency` when `n` is zero.
    pub fn new(n: u32, unit: FreqUnit) -> Result<Self, TsDataError> {
        if n == 0 {
            return Err(TsDataError::InvalidFrequency {
                freq: format!("0{}", unit.alias()),
            });
        }
        Ok(Self { n, unit })
    }

    pub(crate) const fn of(n: u32, unit: FreqUnit) -> Self {
        Self { n, unit }
    }

    /// Multiple of the base unit.
    #[must_use]
    pub const fn n(&self) -> u32 {
        self.n
    }

    /// Base unit.
    #[must_use]
    pub const fn unit(&self) -> FreqUnit {
        self.unit
    }

    /// Fixed step between consecutive timestamps, if the unit has one.
    ///
    /// Business-day and calendar-anchored units have no fixed step.
    #[must_use]
    pub fn fixed_step(&self) -> Option<TimeDelta> {
        let n = i64::from(self.n);
        match self.unit {
            FreqUnit::Second => Some(TimeDelta::seconds(n)),
            FreqUnit::Minute => Some(TimeDelta::minutes(n)),
            FreqUnit::Hour => Some(TimeDelta::hours(n)),
            FreqUnit::Day => Some(TimeDelta::days(n)),
            FreqUnit::Week(_) => Some(TimeDelta::weeks(n)),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.n == 1 {
            f.write_str(&self.unit.alias())
        } else {
            write!(f, "{}{}", self.n, self.unit.alias())
        }
    }
}

impl FromStr for Frequency {
    type Err = TsDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TsDataError::InvalidFrequency { freq: s.to_string() };
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, alias) = trimmed.split_at(split);
        let n = if digits.is_empty() {
            1
        } else {
            digits.parse::<u32>().map_err(|_| invalid())?
        };
        if n == 0 {
            return Err(invalid());
        }
        let unit = FreqUnit::parse_alias(alias).ok_or_else(invalid)?;
        Ok(Self { n, unit })
    }
}

impl TryFrom<&str> for Frequency {
    type Error = TsDataError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
