// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for DATE, DATE-TIME, TIME and UTC-OFFSET values as defined in
//! RFC 5545 Section 3.3.
//!
//! Decoding is strict first and lenient second: compact RFC forms are tried,
//! then hyphenated or slashed forms such as `2024-01-15 10:30`, then a small
//! set of free-form textual layouts such as `15 January 2024`.

use chumsky::Parser;
use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::ValueKind;
use crate::value::miscellaneous::{
    Extra, ValueExpected, i8_0_9, i16_0_9, run, u8_0_1, u8_0_3, u8_0_5, u8_0_9,
};

/// Date value in the iCalendar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Creates a date, returning `None` when it does not exist in the
    /// Gregorian calendar.
    #[must_use]
    pub fn new(year: i16, month: i8, day: i8) -> Option<Self> {
        jiff::civil::Date::new(year, month, day)
            .ok()
            .map(|_| Self { year, month, day })
    }

    /// Convert to `jiff::civil::Date`.
    ///
    /// # Errors
    /// Returns an error if the fields do not form a valid date.
    pub fn civil_date(self) -> Result<jiff::civil::Date, jiff::Error> {
        jiff::civil::Date::new(self.year, self.month, self.day)
    }
}

impl From<jiff::civil::Date> for ValueDate {
    fn from(value: jiff::civil::Date) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

/// Time value defined in the RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: u8,

    /// Minute component, 0-59.
    pub minute: u8,

    /// Second component, 0-60 (60 for leap second).
    pub second: u8,
}

impl ValueTime {
    /// Create a new `ValueTime` from components.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Midnight, `00:00:00`.
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    /// Convert to `jiff::civil::Time`.
    ///
    /// NOTE: a leap second 60 is contracted to 59.
    ///
    /// # Errors
    /// Returns an error if the fields are out of range.
    #[expect(clippy::cast_possible_wrap)]
    pub fn civil_time(self) -> Result<jiff::civil::Time, jiff::Error> {
        jiff::civil::Time::new(
            self.hour as i8,
            self.minute as i8,
            self.second.min(59) as i8,
            0,
        )
    }
}

impl From<jiff::civil::Time> for ValueTime {
    #[expect(clippy::cast_sign_loss)]
    fn from(value: jiff::civil::Time) -> Self {
        Self {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            second: value.second() as u8,
        }
    }
}

/// The frame a date-time is expressed in.
///
/// A date-time without a zone reference is floating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeZoneRef {
    /// UTC, written as a trailing `Z`.
    Utc,

    /// A fixed offset east of UTC in seconds, written as a `±HHMM[SS]` suffix.
    Offset(i32),

    /// A timezone identifier taken from the `TZID` parameter.
    Named(String),
}

/// Date-Time value defined in the RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,

    /// Zone reference, `None` for floating time.
    pub zone: Option<TimeZoneRef>,
}

impl ValueDateTime {
    /// Create a floating date-time.
    #[must_use]
    pub const fn floating(date: ValueDate, time: ValueTime) -> Self {
        Self {
            date,
            time,
            zone: None,
        }
    }

    /// Create a UTC date-time.
    #[must_use]
    pub const fn utc(date: ValueDate, time: ValueTime) -> Self {
        Self {
            date,
            time,
            zone: Some(TimeZoneRef::Utc),
        }
    }

    /// Whether the value carries a trailing `Z`.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.zone, Some(TimeZoneRef::Utc))
    }

    /// Convert the wall-clock fields to `jiff::civil::DateTime`, ignoring the
    /// zone.
    ///
    /// # Errors
    /// Returns an error if the fields are out of range.
    pub fn civil_date_time(&self) -> Result<jiff::civil::DateTime, jiff::Error> {
        Ok(self.date.civil_date()?.to_datetime(self.time.civil_time()?))
    }

    /// Re-express an `Offset` value in UTC. Other zones are returned as is.
    ///
    /// # Errors
    /// Returns an error if the shifted value is out of range.
    pub fn normalized(&self) -> Result<Self, jiff::Error> {
        let Some(TimeZoneRef::Offset(seconds)) = self.zone else {
            return Ok(self.clone());
        };
        let shifted = self
            .civil_date_time()?
            .checked_sub(jiff::SignedDuration::from_secs(i64::from(seconds)))?;
        let mut time = ValueTime::from(shifted.time());
        if self.time.second == 60 {
            time.second = 60;
        }
        Ok(Self::utc(shifted.date().into(), time))
    }
}

impl From<jiff::civil::DateTime> for ValueDateTime {
    fn from(value: jiff::civil::DateTime) -> Self {
        Self::floating(value.date().into(), value.time().into())
    }
}

/// Either a DATE or a DATE-TIME, as used by UNTIL, RDATE, EXDATE and the
/// start of a recurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateOrDateTime {
    /// A calendar date.
    Date(ValueDate),
    /// A date with time of day.
    DateTime(ValueDateTime),
}

impl DateOrDateTime {
    /// The calendar date part.
    #[must_use]
    pub fn date(&self) -> ValueDate {
        match self {
            DateOrDateTime::Date(date) => *date,
            DateOrDateTime::DateTime(dt) => dt.date,
        }
    }

    /// Whether this is a DATE value.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, DateOrDateTime::Date(_))
    }
}

/// UTC Offset Value defined in RFC 5545 Section 3.3.14
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueUtcOffset {
    /// Whether the offset is positive
    pub positive: bool,

    /// Hour, 0-23
    pub hour: u8,

    /// Minute, 0-59
    pub minute: u8,

    /// Second, 0-60, optional
    pub second: Option<u8>,
}

impl ValueUtcOffset {
    /// The offset in seconds east of UTC.
    #[must_use]
    pub fn as_seconds(self) -> i32 {
        let total = i32::from(self.hour) * 3600
            + i32::from(self.minute) * 60
            + i32::from(self.second.unwrap_or(0));
        if self.positive { total } else { -total }
    }

    /// Build an offset from seconds east of UTC. Seconds are only kept when
    /// non-zero.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_seconds(seconds: i32) -> Self {
        let abs = seconds.unsigned_abs();
        let second = (abs % 60) as u8;
        Self {
            positive: seconds >= 0,
            hour: (abs / 3600 % 24) as u8,
            minute: (abs / 60 % 60) as u8,
            second: (second != 0).then_some(second),
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> {
    let year = i16_0_9()
        .then(i16_0_9())
        .then(i16_0_9())
        .then(i16_0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let two = i8_0_9().then(i8_0_9()).map(|(a, b)| 10 * a + b);

    year.then(two)
        .then(i8_0_9().then(i8_0_9()).map(|(a, b)| 10 * a + b))
        .try_map(|((year, month), day), span| {
            ValueDate::new(year, month, day).ok_or_else(|| Rich::custom(span, ValueExpected::Date))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
///
/// The `time-utc` suffix is handled by the callers.
fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> {
    time_hour()
        .then(time_minute())
        .then(time_second())
        .map(|((hour, minute), second)| ValueTime::new(hour, minute, second))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// utc-offset = time-numzone
///
/// time-numzone = ("+" / "-") time-hour time-minute [time-second]
/// ```
fn value_utc_offset<'src>() -> impl Parser<'src, &'src str, ValueUtcOffset, Extra<'src>> {
    select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then(time_minute())
        .then(time_second().or_not())
        .map(|(((sign, hour), minute), second)| ValueUtcOffset {
            positive: !matches!(sign, '-'),
            hour,
            minute,
            second,
        })
}

/// A trailing `Z` or numeric offset after a time of day.
fn zone_suffix<'src>() -> impl Parser<'src, &'src str, Option<TimeZoneRef>, Extra<'src>> {
    choice((
        just('Z').to(TimeZoneRef::Utc),
        value_utc_offset().map(|offset| TimeZoneRef::Offset(offset.as_seconds())),
    ))
    .or_not()
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
///
/// A `±HHMM[SS]` suffix is accepted in place of `Z` for producers that write
/// numeric offsets.
fn value_date_time<'src>() -> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .then(zone_suffix())
        .map(|((date, time), zone)| ValueDateTime { date, time, zone })
}

fn time_hour<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> {
    choice((
        u8_0_1().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(u8_0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> {
    u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src>() -> impl Parser<'src, &'src str, u8, Extra<'src>> {
    choice((
        u8_0_5().then(u8_0_9()).map(|(a, b)| 10 * a + b),
        just('6').ignore_then(just('0').to(60)), // leap second
    ))
}

/// Loose date layout:
///
/// ```txt
/// loose-date = year sep month sep day
/// year       = 4DIGIT / 2DIGIT       ; two-digit years are promoted by 2000
/// sep        = "-" / "/" / "."
/// month      = 1*2DIGIT
/// day        = 1*2DIGIT
/// ```
fn loose_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> {
    fn number<'src>(min: usize, max: usize) -> impl Parser<'src, &'src str, i16, Extra<'src>> {
        i16_0_9()
            .repeated()
            .at_least(min)
            .at_most(max)
            .collect::<Vec<_>>()
            .map(|digits| digits.into_iter().fold(0, |acc, d| acc * 10 + d))
    }

    let year = i16_0_9()
        .repeated()
        .at_least(2)
        .at_most(4)
        .collect::<Vec<_>>()
        .try_map(|digits, span| {
            let value = digits.iter().fold(0, |acc, d| acc * 10 + d);
            match digits.len() {
                2 => Ok(value + 2000),
                4 => Ok(value),
                _ => Err(Rich::custom(span, "expected a 2- or 4-digit year")),
            }
        });
    let sep = one_of("-/.");

    year.then_ignore(sep)
        .then(number(1, 2))
        .then_ignore(one_of("-/."))
        .then(number(1, 2))
        .try_map(|((year, month), day), span| {
            let month = i8::try_from(month).map_err(|_| Rich::custom(span, ValueExpected::Date))?;
            let day = i8::try_from(day).map_err(|_| Rich::custom(span, ValueExpected::Date))?;
            ValueDate::new(year, month, day).ok_or_else(|| Rich::custom(span, ValueExpected::Date))
        })
}

/// Loose time layout: `HH:MM[:SS]` or compact `HHMM[SS]`, with an optional
/// `Z` or `±HH[:]MM` zone.
fn loose_time<'src>() -> impl Parser<'src, &'src str, (ValueTime, Option<TimeZoneRef>), Extra<'src>>
{
    let colon_time = time_hour()
        .then_ignore(just(':'))
        .then(time_minute())
        .then(just(':').ignore_then(time_second()).or_not());
    let compact_time = time_hour()
        .then(time_minute())
        .then(time_second().or_not());

    let offset = select! { c @ ('+' | '-') => c }
        .then(time_hour())
        .then_ignore(just(':').or_not())
        .then(time_minute())
        .map(|((sign, hour), minute)| {
            let seconds = i32::from(hour) * 3600 + i32::from(minute) * 60;
            TimeZoneRef::Offset(if sign == '-' { -seconds } else { seconds })
        });
    let zone = just(' ').or_not().ignore_then(choice((
        just('Z').to(TimeZoneRef::Utc),
        just("UTC").to(TimeZoneRef::Utc),
        offset,
    )));

    choice((colon_time, compact_time))
        .then(zone.or_not())
        .map(|(((hour, minute), second), zone)| {
            (ValueTime::new(hour, minute, second.unwrap_or(0)), zone)
        })
}

fn loose_date_or_date_time<'src>() -> impl Parser<'src, &'src str, DateOrDateTime, Extra<'src>> {
    loose_date()
        .then(one_of("T ").ignore_then(loose_time()).or_not())
        .map(|(date, time)| match time {
            Some((time, zone)) => DateOrDateTime::DateTime(ValueDateTime { date, time, zone }),
            None => DateOrDateTime::Date(date),
        })
}

/// Free-form layouts tried last, with and without a time of day.
const FREE_FORM_DATE_TIMES: &[&str] = &[
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d, %Y %H:%M",
];

const FREE_FORM_DATES: &[&str] = &[
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%A, %d %B %Y",
    "%a, %d %b %Y",
];

fn free_form(src: &str) -> Option<DateOrDateTime> {
    use jiff::fmt::strtime;

    let date_time = FREE_FORM_DATE_TIMES.iter().find_map(|fmt| {
        strtime::parse(fmt, src)
            .and_then(|tm| tm.to_datetime())
            .ok()
            .map(|dt| DateOrDateTime::DateTime(dt.into()))
    });
    date_time.or_else(|| {
        FREE_FORM_DATES.iter().find_map(|fmt| {
            strtime::parse(fmt, src)
                .and_then(|tm| tm.to_date())
                .ok()
                .map(|date| DateOrDateTime::Date(date.into()))
        })
    })
}

/// Decode a DATE value.
///
/// # Errors
/// Returns an error if no accepted layout matches, or a time of day is present.
pub fn decode_date(raw: &str) -> Result<ValueDate, ValueError> {
    let src = raw.trim();
    let strict = run(value_date(), src, ValueKind::Date);
    if strict.is_ok() {
        return strict;
    }

    match decode_loose(src) {
        Some(DateOrDateTime::Date(date)) => Ok(date),
        _ => strict,
    }
}

/// Decode a DATE-TIME value.
///
/// # Errors
/// Returns an error if no accepted layout matches, or the time of day is missing.
pub fn decode_date_time(raw: &str) -> Result<ValueDateTime, ValueError> {
    let src = raw.trim();
    let strict = run(value_date_time(), src, ValueKind::DateTime);
    if strict.is_ok() {
        return strict;
    }

    match decode_loose(src) {
        Some(DateOrDateTime::DateTime(dt)) => Ok(dt),
        _ => strict,
    }
}

/// Decode a value that may be either a DATE or a DATE-TIME, detecting the
/// form by its shape.
///
/// # Errors
/// Returns an error if no accepted layout matches.
pub fn decode_date_or_date_time(raw: &str) -> Result<DateOrDateTime, ValueError> {
    let src = raw.trim();
    if let Ok(dt) = run(value_date_time(), src, ValueKind::DateTime) {
        return Ok(DateOrDateTime::DateTime(dt));
    }
    let strict = run(value_date(), src, ValueKind::Date);
    if let Ok(date) = strict {
        return Ok(DateOrDateTime::Date(date));
    }
    decode_loose(src).ok_or_else(|| {
        ValueError::new(
            ValueKind::DateTime,
            strict.err().map(|e| e.reason).unwrap_or_default(),
        )
    })
}

fn decode_loose(src: &str) -> Option<DateOrDateTime> {
    run(loose_date_or_date_time(), src, ValueKind::DateTime)
        .ok()
        .or_else(|| free_form(src))
}

/// Decode a TIME value, returning whether it carries the `Z` suffix.
///
/// # Errors
/// Returns an error if the value is not `HHMMSS[Z]`.
pub fn decode_time(raw: &str) -> Result<(ValueTime, bool), ValueError> {
    let parser = value_time().then(just('Z').or_not().map(|z| z.is_some()));
    run(parser, raw.trim(), ValueKind::Time)
}

/// Decode a UTC-OFFSET value.
///
/// # Errors
/// Returns an error if the value is not `±HHMM[SS]`.
pub fn decode_utc_offset(raw: &str) -> Result<ValueUtcOffset, ValueError> {
    run(value_utc_offset(), raw.trim(), ValueKind::UtcOffset)
}
