// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value formatting for iCalendar values.
//!
//! Every value type renders through `Display` in its RFC 5545 Section 3.3
//! text form; [`encode_value`] adds text escaping and list joining.

use std::fmt::{self, Display, Write};

use strum::IntoEnumIterator;

use crate::keyword::{
    KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::{
    ByRuleKind, ByValue, DateOrDateTime, PropertyValue, RecurEnd, RecurSpec, TimeZoneRef,
    ValueDate, ValueDateTime, ValueDuration, ValueGeo, ValuePeriod, ValueRequestStatus, ValueTime,
    ValueUtcOffset, WeekdayNum, escape_text,
};

/// Encode a property value to its content-line text.
///
/// TEXT is escaped, list items are joined with commas, and values that were
/// kept raw are written back verbatim.
#[must_use]
pub fn encode_value(value: &PropertyValue) -> String {
    EncodedValue(value).to_string()
}

/// Displays a property value in its content-line form.
struct EncodedValue<'a>(&'a PropertyValue);

impl Display for EncodedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.0)
    }
}

fn write_value(out: &mut impl Write, value: &PropertyValue) -> fmt::Result {
    match value {
        PropertyValue::Binary(raw)
        | PropertyValue::CalAddress(raw)
        | PropertyValue::Uri(raw)
        | PropertyValue::UnknownRaw(raw)
        | PropertyValue::Unparsed { raw, .. } => out.write_str(raw),
        PropertyValue::Boolean(true) => out.write_str(KW_BOOLEAN_TRUE),
        PropertyValue::Boolean(false) => out.write_str(KW_BOOLEAN_FALSE),
        PropertyValue::Date(date) => write!(out, "{date}"),
        PropertyValue::DateTime(datetime) => write!(out, "{datetime}"),
        PropertyValue::Duration(duration) => write!(out, "{duration}"),
        PropertyValue::Float(value) => write!(out, "{value}"),
        PropertyValue::Geo(geo) => write!(out, "{geo}"),
        PropertyValue::Integer(value) => write!(out, "{value}"),
        PropertyValue::Period(period) => write!(out, "{period}"),
        PropertyValue::Recur(rule) => write!(out, "{rule}"),
        PropertyValue::RequestStatus(status) => write!(out, "{status}"),
        PropertyValue::Text(text) => out.write_str(&escape_text(text)),
        PropertyValue::Time { time, utc } => {
            write!(out, "{time}{}", if *utc { "Z" } else { "" })
        }
        PropertyValue::UtcOffset(offset) => write!(out, "{offset}"),
        PropertyValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item)?;
            }
            Ok(())
        }
    }
}

/// Format a date value as `YYYYMMDD`.
impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Format a time value as `HHMMSS`.
impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)
    }
}

/// Format a date-time value as `YYYYMMDDTHHMMSS[Z]`.
///
/// An offset is converted to UTC. A named zone is written as local time; its
/// identifier belongs in the `TZID` parameter.
impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            None | Some(TimeZoneRef::Named(_)) => write!(f, "{}T{}", self.date, self.time),
            Some(TimeZoneRef::Utc) => write!(f, "{}T{}Z", self.date, self.time),
            Some(TimeZoneRef::Offset(seconds)) => match self.normalized() {
                Ok(utc) => write!(f, "{}T{}Z", utc.date, utc.time),
                Err(_) => write!(
                    f,
                    "{}T{}{}",
                    self.date,
                    self.time,
                    ValueUtcOffset::from_seconds(*seconds)
                ),
            },
        }
    }
}

impl Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrDateTime::Date(date) => date.fmt(f),
            DateOrDateTime::DateTime(datetime) => datetime.fmt(f),
        }
    }
}

/// Format a duration value as `[-]P[n]DT[n]H[n]M[n]S` or `[-]P[n]W`.
///
/// Zero fields are left out, except that a minute field bridges an hour and a
/// second as the grammar requires. The zero duration is `PT0H0M0S`.
impl Display for ValueDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueDuration::Week { positive, week } => {
                let sign = if positive { "" } else { "-" };
                write!(f, "{sign}P{week}W")
            }
            ValueDuration::DateTime {
                day: 0,
                hour: 0,
                minute: 0,
                second: 0,
                ..
            } => f.write_str("PT0H0M0S"),
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => {
                if !positive {
                    f.write_str("-")?;
                }
                f.write_str("P")?;
                if day > 0 {
                    write!(f, "{day}D")?;
                }
                if hour > 0 || minute > 0 || second > 0 {
                    f.write_str("T")?;
                }
                if hour > 0 {
                    write!(f, "{hour}H")?;
                }
                if minute > 0 || (hour > 0 && second > 0) {
                    write!(f, "{minute}M")?;
                }
                if second > 0 {
                    write!(f, "{second}S")?;
                }
                Ok(())
            }
        }
    }
}

/// Format a period value as `start/end` or `start/duration`.
impl Display for ValuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePeriod::Explicit { start, end } => write!(f, "{start}/{end}"),
            ValuePeriod::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// Format a UTC offset value as `+HHMM` or `-HHMM` (with optional seconds).
impl Display for ValueUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { "+" } else { "-" };
        write!(f, "{sign}{:02}{:02}", self.hour, self.minute)?;
        if let Some(second) = self.second {
            write!(f, "{second:02}")?;
        }
        Ok(())
    }
}

/// Format as `latitude;longitude` with at most six decimals.
impl Display for ValueGeo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latitude = fixed6(self.latitude);
        let longitude = fixed6(self.longitude);
        write!(f, "{latitude};{longitude}")
    }
}

fn fixed6(value: f64) -> String {
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Format as `code;description[;extdata]` with a two-decimal code. A
/// three-level code is written level by level, as in `3.1.1`.
impl Display for ValueRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subcode {
            Some(subcode) => {
                let code = format!("{:.2}", self.code);
                let code = code.strip_suffix('0').unwrap_or(&code);
                write!(f, "{code}.{subcode}")?;
            }
            None => write!(f, "{:.2}", self.code)?,
        }
        write!(f, ";{}", escape_text(&self.description))?;
        if let Some(extdata) = &self.extdata {
            write!(f, ";{}", escape_text(extdata))?;
        }
        Ok(())
    }
}

/// Format a weekday number (e.g., "1MO", "-1FR", "SU").
impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        write!(f, "{}", self.day)
    }
}

impl Display for ByValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByValue::Number(n) => write!(f, "{n}"),
            ByValue::Weekday(day) => day.fmt(f),
        }
    }
}

/// Format a recurrence rule value (RFC 5545 Section 3.3.10).
///
/// Parts come out in canonical order: FREQ, UNTIL or COUNT, INTERVAL when not
/// 1, the BYxxx parts from BYSECOND to BYSETPOS, WKST, then extensions in
/// their original order.
impl Display for RecurSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;

        match &self.end {
            Some(RecurEnd::Until(until)) => write!(f, ";{KW_RRULE_UNTIL}={until}")?,
            Some(RecurEnd::Count(count)) => write!(f, ";{KW_RRULE_COUNT}={count}")?,
            None => {}
        }

        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }

        for kind in ByRuleKind::iter() {
            let values = self.by(kind);
            if values.is_empty() {
                continue;
            }
            write!(f, ";{}=", kind.name())?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
        }

        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }

        for (key, value) in &self.extensions {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}
