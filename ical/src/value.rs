// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of iCalendar value types
//! as defined in RFC 5545 Section 3.3.

mod datetime;
mod duration;
mod miscellaneous;
mod numeric;
mod period;
mod rrule;
mod text;

use std::fmt;
use std::str::FromStr;

pub use datetime::{
    DateOrDateTime, TimeZoneRef, ValueDate, ValueDateTime, ValueTime, ValueUtcOffset, decode_date,
    decode_date_or_date_time, decode_date_time, decode_time, decode_utc_offset,
};
pub use duration::{ValueDuration, decode_duration};
pub use numeric::{
    ValueGeo, ValueRequestStatus, decode_float, decode_geo, decode_integer, decode_request_status,
};
pub use period::{ValuePeriod, decode_period};
pub use rrule::{
    ByRuleKind, ByValue, Frequency, RecurEnd, RecurSpec, Weekday, WeekdayNum, decode_recur,
};
pub use text::{escape_text, split_unescaped, unescape_text};

use crate::error::ValueError;
use crate::keyword::{
    KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_DATE, KW_DATETIME, KW_DURATION, KW_FLOAT, KW_GEO,
    KW_INTEGER, KW_PERIOD, KW_RECUR, KW_REQUEST_STATUS, KW_TEXT, KW_TIME, KW_URI, KW_UTC_OFFSET,
};
use crate::value::miscellaneous::{run, value_binary, value_boolean};

/// The properties in an iCalendar object are strongly typed.  The definition
/// of each property restricts the value to be one of the value data types, or
/// simply value types, defined in this section. The value type for a property
/// will either be specified implicitly as the default value type or will be
/// explicitly specified with the "VALUE" parameter.  If the value type of a
/// property is one of the alternate valid types, then it MUST be explicitly
/// specified with the "VALUE" parameter.
///
/// See RFC 5545 Section 3.3 for more details.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// This value type is used to identify properties that contain a character
    /// encoding of inline binary data.  For example, an inline attachment of a
    /// document might be included in an iCalendar object.
    ///
    /// The BASE64 text is kept encoded.
    ///
    /// See RFC 5545 Section 3.3.1 for more details.
    Binary(String),

    /// This value type is used to identify properties that contain either a
    /// "TRUE" or "FALSE" Boolean value.
    ///
    /// See RFC 5545 Section 3.3.2 for more details.
    Boolean(bool),

    /// This value type is used to identify properties that contain a calendar
    /// user address.
    ///
    /// See RFC 5545 Section 3.3.3 for more details.
    CalAddress(String),

    /// This value type is used to identify values that contain a calendar date.
    ///
    /// See RFC 5545 Section 3.3.4 for more details.
    Date(ValueDate),

    /// This value type is used to identify values that specify a precise
    /// calendar date and time of day.
    ///
    /// See RFC 5545 Section 3.3.5 for more details.
    DateTime(ValueDateTime),

    /// This value type is used to identify properties that contain a duration
    /// of time.
    ///
    /// See RFC 5545 Section 3.3.6 for more details.
    Duration(ValueDuration),

    /// This value type is used to identify properties that contain a real-
    /// number value.
    ///
    /// See RFC 5545 Section 3.3.7 for more details.
    Float(f64),

    /// Latitude and longitude of a GEO property.
    ///
    /// See RFC 5545 Section 3.8.1.6 for more details.
    Geo(ValueGeo),

    /// This value type is used to identify properties that contain a signed
    /// integer value.
    ///
    /// See RFC 5545 Section 3.3.8 for more details.
    Integer(i32),

    /// This value type is used to identify values that contain a precise
    /// period of time.
    ///
    /// See RFC 5545 Section 3.3.9 for more details.
    Period(ValuePeriod),

    /// This value type is used to identify properties that contain a
    /// recurrence rule specification.
    ///
    /// See RFC 5545 Section 3.3.10 for more details.
    Recur(RecurSpec),

    /// Status code and description of a REQUEST-STATUS property.
    ///
    /// See RFC 5545 Section 3.8.8.3 for more details.
    RequestStatus(ValueRequestStatus),

    /// This value type is used to identify values that contain human-readable
    /// text. Stored unescaped.
    ///
    /// See RFC 5545 Section 3.3.11 for more details.
    Text(String),

    /// This value type is used to identify values that contain a time of day.
    ///
    /// See RFC 5545 Section 3.3.12 for more details.
    Time {
        /// Time of day.
        time: ValueTime,
        /// Whether the value carries the `Z` suffix.
        utc: bool,
    },

    /// This value type is used to identify values that contain a uniform
    /// resource identifier (URI) type of reference to the property value.
    ///
    /// See RFC 5545 Section 3.3.13 for more details.
    Uri(String),

    /// This value type is used to identify properties that contain an offset
    /// from UTC to local time.
    ///
    /// See RFC 5545 Section 3.3.14 for more details.
    UtcOffset(ValueUtcOffset),

    /// Comma-separated values of a multi-valued property, such as CATEGORIES
    /// or EXDATE.
    List(Vec<PropertyValue>),

    /// The value of an unrecognized or `X-` property, kept verbatim.
    UnknownRaw(String),

    /// A value that did not match the grammar of its expected type. The
    /// original text is kept so that formatting re-emits it unchanged.
    Unparsed {
        /// Original value text.
        raw: String,
        /// The value type that was expected.
        expected: ValueKind,
        /// Why decoding failed.
        reason: String,
    },
}

impl PropertyValue {
    /// The value type of this value. A list reports the type of its first
    /// item, or TEXT when empty.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Binary(_) => ValueKind::Binary,
            PropertyValue::Boolean(_) => ValueKind::Boolean,
            PropertyValue::CalAddress(_) => ValueKind::CalAddress,
            PropertyValue::Date(_) => ValueKind::Date,
            PropertyValue::DateTime(_) => ValueKind::DateTime,
            PropertyValue::Duration(_) => ValueKind::Duration,
            PropertyValue::Float(_) => ValueKind::Float,
            PropertyValue::Geo(_) => ValueKind::Geo,
            PropertyValue::Integer(_) => ValueKind::Integer,
            PropertyValue::Period(_) => ValueKind::Period,
            PropertyValue::Recur(_) => ValueKind::Recur,
            PropertyValue::RequestStatus(_) => ValueKind::RequestStatus,
            PropertyValue::Text(_) => ValueKind::Text,
            PropertyValue::Time { .. } => ValueKind::Time,
            PropertyValue::Uri(_) => ValueKind::Uri,
            PropertyValue::UtcOffset(_) => ValueKind::UtcOffset,
            PropertyValue::List(items) => items.first().map_or(ValueKind::Text, Self::kind),
            PropertyValue::UnknownRaw(_) => ValueKind::Unknown,
            PropertyValue::Unparsed { expected, .. } => *expected,
        }
    }

    /// The items of a list, or this value alone.
    #[must_use]
    pub fn items(&self) -> &[PropertyValue] {
        match self {
            PropertyValue::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// The text of a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A DATE or DATE-TIME value.
    #[must_use]
    pub fn as_date_or_date_time(&self) -> Option<DateOrDateTime> {
        match self {
            PropertyValue::Date(date) => Some(DateOrDateTime::Date(*date)),
            PropertyValue::DateTime(dt) => Some(DateOrDateTime::DateTime(dt.clone())),
            _ => None,
        }
    }

    /// Whether the value failed to decode.
    #[must_use]
    pub const fn is_unparsed(&self) -> bool {
        matches!(self, PropertyValue::Unparsed { .. })
    }
}

/// Value data types, RFC 5545 Section 3.3, plus the structured property
/// values that have no `VALUE=` name of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum ValueKind {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    Geo,
    RequestStatus,
    Unknown,
}

impl ValueKind {
    /// Whether the kind may be named by a `VALUE=` parameter.
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        !matches!(
            self,
            ValueKind::Geo | ValueKind::RequestStatus | ValueKind::Unknown
        )
    }

    /// Whether commas inside the value are part of its grammar rather than
    /// list separators.
    #[must_use]
    pub const fn has_structural_commas(self) -> bool {
        matches!(
            self,
            ValueKind::Recur | ValueKind::Geo | ValueKind::RequestStatus
        )
    }
}

impl FromStr for ValueKind {
    type Err = ();

    #[rustfmt::skip]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_uppercase().as_str() {
            KW_BINARY     => ValueKind::Binary,
            KW_BOOLEAN    => ValueKind::Boolean,
            KW_CAL_ADDRESS => ValueKind::CalAddress,
            KW_DATE       => ValueKind::Date,
            KW_DATETIME   => ValueKind::DateTime,
            KW_DURATION   => ValueKind::Duration,
            KW_FLOAT      => ValueKind::Float,
            KW_INTEGER    => ValueKind::Integer,
            KW_PERIOD     => ValueKind::Period,
            KW_RECUR      => ValueKind::Recur,
            KW_TEXT       => ValueKind::Text,
            KW_TIME       => ValueKind::Time,
            KW_URI        => ValueKind::Uri,
            KW_UTC_OFFSET => ValueKind::UtcOffset,
            _ => return Err(()),
        };
        Ok(kind)
    }
}

impl fmt::Display for ValueKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Binary        => KW_BINARY,
            ValueKind::Boolean       => KW_BOOLEAN,
            ValueKind::CalAddress    => KW_CAL_ADDRESS,
            ValueKind::Date          => KW_DATE,
            ValueKind::DateTime      => KW_DATETIME,
            ValueKind::Duration      => KW_DURATION,
            ValueKind::Float         => KW_FLOAT,
            ValueKind::Integer       => KW_INTEGER,
            ValueKind::Period        => KW_PERIOD,
            ValueKind::Recur         => KW_RECUR,
            ValueKind::Text          => KW_TEXT,
            ValueKind::Time          => KW_TIME,
            ValueKind::Uri           => KW_URI,
            ValueKind::UtcOffset     => KW_UTC_OFFSET,
            ValueKind::Geo           => KW_GEO,
            ValueKind::RequestStatus => KW_REQUEST_STATUS,
            ValueKind::Unknown       => "UNKNOWN",
        })
    }
}

/// Decode a single raw value as `kind`.
///
/// TEXT is unescaped; URI, CAL-ADDRESS and unknown values are kept as
/// written. Commas are not treated as list separators here.
///
/// # Errors
/// Returns an error if the text does not match the grammar of `kind`.
pub fn decode_value(kind: ValueKind, raw: &str) -> Result<PropertyValue, ValueError> {
    Ok(match kind {
        ValueKind::Binary => {
            let payload = raw.trim();
            run(value_binary(), payload, kind)?;
            PropertyValue::Binary(payload.to_string())
        }
        ValueKind::Boolean => PropertyValue::Boolean(run(value_boolean(), raw.trim(), kind)?),
        ValueKind::CalAddress => PropertyValue::CalAddress(raw.to_string()),
        ValueKind::Date => PropertyValue::Date(decode_date(raw)?),
        ValueKind::DateTime => PropertyValue::DateTime(decode_date_time(raw)?),
        ValueKind::Duration => PropertyValue::Duration(decode_duration(raw)?),
        ValueKind::Float => PropertyValue::Float(decode_float(raw)?),
        ValueKind::Geo => PropertyValue::Geo(decode_geo(raw)?),
        ValueKind::Integer => PropertyValue::Integer(decode_integer(raw)?),
        ValueKind::Period => PropertyValue::Period(decode_period(raw)?),
        ValueKind::Recur => PropertyValue::Recur(decode_recur(raw)?),
        ValueKind::RequestStatus => PropertyValue::RequestStatus(decode_request_status(raw)?),
        ValueKind::Text => PropertyValue::Text(unescape_text(raw)),
        ValueKind::Time => {
            let (time, utc) = decode_time(raw)?;
            PropertyValue::Time { time, utc }
        }
        ValueKind::Uri => PropertyValue::Uri(raw.to_string()),
        ValueKind::UtcOffset => PropertyValue::UtcOffset(decode_utc_offset(raw)?),
        ValueKind::Unknown => PropertyValue::UnknownRaw(raw.to_string()),
    })
}
