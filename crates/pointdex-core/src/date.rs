//! Module: date
//! Responsibility: date-expression parsing into epoch milliseconds.
//! Does not own: display formatting of stored dates (see `value`).
//! Boundary: date codecs call `DateMath::parse_millis` for bounds and values.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use thiserror::Error as ThisError;

///
/// DateParseError
///

#[derive(Debug, ThisError)]
pub enum DateParseError {
    #[error("invalid date '{text}': {reason}")]
    InvalidAnchor { text: String, reason: String },

    #[error("invalid date math '{text}': {reason}")]
    InvalidMath { text: String, reason: String },

    #[error("unknown date math unit '{unit}' in '{text}'")]
    UnknownUnit { text: String, unit: String },

    #[error("date math '{text}' overflows the supported range")]
    Overflow { text: String },
}

///
/// DateUnit
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Milli,
}

impl DateUnit {
    fn parse(label: &str) -> Option<Self> {
        let unit = match label {
            "YEAR" | "YEARS" => Self::Year,
            "MONTH" | "MONTHS" => Self::Month,
            "DAY" | "DAYS" | "DATE" => Self::Day,
            "HOUR" | "HOURS" => Self::Hour,
            "MINUTE" | "MINUTES" => Self::Minute,
            "SECOND" | "SECONDS" => Self::Second,
            "MILLI" | "MILLIS" | "MILLISECOND" | "MILLISECONDS" => Self::Milli,
            _ => return None,
        };

        Some(unit)
    }
}

///
/// DateMath
///
/// Parses `NOW` or an RFC 3339 timestamp ending in `Z`, followed by any
/// sequence of `+N<UNIT>`, `-N<UNIT>` and `/<UNIT>` operations applied left
/// to right. `NOW` is pinned when the parser is built with [`DateMath::at`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DateMath {
    now: Option<DateTime<Utc>>,
}

impl DateMath {
    /// Parser reading `NOW` from the wall clock on every call.
    #[must_use]
    pub const fn new() -> Self {
        Self { now: None }
    }

    /// Parser with `NOW` pinned to a fixed instant.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    /// Parse a date expression to epoch milliseconds.
    pub fn parse_millis(&self, text: &str) -> Result<i64, DateParseError> {
        self.parse(text).map(|date| date.timestamp_millis())
    }

    /// Parse a date expression to a UTC instant.
    pub fn parse(&self, text: &str) -> Result<DateTime<Utc>, DateParseError> {
        let (anchor, math) = self.split_anchor(text)?;

        apply_math(anchor, math, text)
    }

    fn split_anchor<'a>(
        &self,
        text: &'a str,
    ) -> Result<(DateTime<Utc>, &'a str), DateParseError> {
        if let Some(rest) = text.strip_prefix("NOW") {
            return Ok((self.now.unwrap_or_else(Utc::now), rest));
        }

        // The timestamp part ends at its zone designator; anything after is math.
        let (stamp, rest) = match text.find('Z') {
            Some(pos) => text.split_at(pos + 1),
            None => (text, ""),
        };

        let anchor = DateTime::parse_from_rfc3339(stamp).map_err(|err| {
            DateParseError::InvalidAnchor {
                text: text.to_string(),
                reason: err.to_string(),
            }
        })?;

        Ok((anchor.with_timezone(&Utc), rest))
    }
}

fn apply_math(
    mut date: DateTime<Utc>,
    math: &str,
    text: &str,
) -> Result<DateTime<Utc>, DateParseError> {
    let mut rest = math;

    while let Some(op) = rest.chars().next() {
        rest = &rest[op.len_utf8()..];

        match op {
            '+' | '-' => {
                let digits_end = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                let (digits, tail) = rest.split_at(digits_end);
                let amount: i64 = digits.parse().map_err(|_| DateParseError::InvalidMath {
                    text: text.to_string(),
                    reason: format!("expected a number after '{op}'"),
                })?;
                let (unit, tail) = take_unit(tail, text)?;
                let amount = if op == '-' { -amount } else { amount };

                date = shift(date, amount, unit).ok_or_else(|| DateParseError::Overflow {
                    text: text.to_string(),
                })?;
                rest = tail;
            }
            '/' => {
                let (unit, tail) = take_unit(rest, text)?;
                date = round_down(date, unit).ok_or_else(|| DateParseError::Overflow {
                    text: text.to_string(),
                })?;
                rest = tail;
            }
            other => {
                return Err(DateParseError::InvalidMath {
                    text: text.to_string(),
                    reason: format!("unexpected '{other}'"),
                });
            }
        }
    }

    Ok(date)
}

fn take_unit<'a>(input: &'a str, text: &str) -> Result<(DateUnit, &'a str), DateParseError> {
    let end = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (label, tail) = input.split_at(end);

    DateUnit::parse(label)
        .map(|unit| (unit, tail))
        .ok_or_else(|| DateParseError::UnknownUnit {
            text: text.to_string(),
            unit: label.to_string(),
        })
}

fn shift(date: DateTime<Utc>, amount: i64, unit: DateUnit) -> Option<DateTime<Utc>> {
    match unit {
        DateUnit::Year => shift_months(date, amount.checked_mul(12)?),
        DateUnit::Month => shift_months(date, amount),
        DateUnit::Day => date.checked_add_signed(TimeDelta::try_days(amount)?),
        DateUnit::Hour => date.checked_add_signed(TimeDelta::try_hours(amount)?),
        DateUnit::Minute => date.checked_add_signed(TimeDelta::try_minutes(amount)?),
        DateUnit::Second => date.checked_add_signed(TimeDelta::try_seconds(amount)?),
        DateUnit::Milli => date.checked_add_signed(TimeDelta::try_milliseconds(amount)?),
    }
}

fn shift_months(date: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);

    if months < 0 {
        date.checked_sub_months(magnitude)
    } else {
        date.checked_add_months(magnitude)
    }
}

fn round_down(date: DateTime<Utc>, unit: DateUnit) -> Option<DateTime<Utc>> {
    let naive = date.naive_utc();

    let rounded = match unit {
        DateUnit::Year => NaiveDate::from_ymd_opt(naive.year(), 1, 1)?.and_time(NaiveTime::MIN),
        DateUnit::Month => {
            NaiveDate::from_ymd_opt(naive.year(), naive.month(), 1)?.and_time(NaiveTime::MIN)
        }
        DateUnit::Day => naive.date().and_time(NaiveTime::MIN),
        DateUnit::Hour => naive.with_minute(0)?.with_second(0)?.with_nanosecond(0)?,
        DateUnit::Minute => naive.with_second(0)?.with_nanosecond(0)?,
        DateUnit::Second => naive.with_nanosecond(0)?,
        DateUnit::Milli => naive.with_nanosecond(naive.nanosecond() / 1_000_000 * 1_000_000)?,
    };

    Some(rounded.and_utc())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned() -> DateMath {
        let now = DateTime::parse_from_rfc3339("2024-05-17T13:45:30.250Z")
            .expect("fixed instant")
            .with_timezone(&Utc);
        DateMath::at(now)
    }

    #[test]
    fn parses_plain_rfc3339_to_millis() {
        let millis = DateMath::new()
            .parse_millis("1970-01-01T00:00:01.500Z")
            .expect("valid timestamp");
        assert_eq!(millis, 1_500);
    }

    #[test]
    fn parses_timestamps_before_epoch() {
        let millis = DateMath::new()
            .parse_millis("1969-12-31T23:59:59Z")
            .expect("valid timestamp");
        assert_eq!(millis, -1_000);
    }

    #[test]
    fn now_uses_pinned_instant() {
        let parser = pinned();
        let now = parser.parse("NOW").expect("now");
        assert_eq!(now.to_rfc3339(), "2024-05-17T13:45:30.250+00:00");
    }

    #[test]
    fn math_applies_left_to_right() {
        let parser = pinned();
        let date = parser.parse("NOW/DAY+1DAY-2HOURS").expect("math");
        assert_eq!(date.to_rfc3339(), "2024-05-17T22:00:00+00:00");
    }

    #[test]
    fn math_follows_explicit_anchor() {
        let date = DateMath::new()
            .parse("2020-01-31T10:00:00Z+1MONTH/MONTH")
            .expect("math");
        assert_eq!(date.to_rfc3339(), "2020-02-01T00:00:00+00:00");
    }

    #[test]
    fn rounds_to_year_and_milli() {
        let parser = pinned();
        assert_eq!(
            parser.parse("NOW/YEAR").expect("year").to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(
            parser.parse_millis("NOW/MILLI").expect("milli"),
            parser.parse_millis("NOW").expect("now"),
        );
    }

    #[test]
    fn rejects_unknown_units() {
        let err = pinned().parse("NOW+1FORTNIGHT").unwrap_err();
        assert!(matches!(err, DateParseError::UnknownUnit { ref unit, .. } if unit == "FORTNIGHT"));
    }

    #[test]
    fn rejects_malformed_anchor() {
        let err = DateMath::new().parse("yesterday").unwrap_err();
        assert!(matches!(err, DateParseError::InvalidAnchor { .. }));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn rejects_missing_amount() {
        let err = pinned().parse("NOW+DAY").unwrap_err();
        assert!(matches!(err, DateParseError::InvalidMath { .. }));
    }
}
