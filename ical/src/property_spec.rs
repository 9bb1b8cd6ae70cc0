// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value typing of the properties defined in RFC 5545 Section 3.7 and 3.8,
//! plus EXRULE from RFC 2445.

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART,
    KW_DUE, KW_DURATION, KW_EXDATE, KW_EXRULE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED,
    KW_LOCATION, KW_METHOD, KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE,
    KW_RECURRENCE_ID, KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE,
    KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME,
    KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID, KW_URL, KW_VERSION,
};
use crate::value::ValueKind;

/// How a property's value is typed.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    /// Upper-case property name.
    pub name: &'static str,
    /// Value type used when no `VALUE` parameter is present.
    pub default_kind: ValueKind,
    /// Value types the property accepts, the default included.
    pub allowed_kinds: &'static [ValueKind],
    /// Whether the value is a comma-separated list.
    pub multiple_valued: bool,
}

impl PropertySpec {
    /// Whether the property may hold either a DATE or a DATE-TIME, in which
    /// case the form is detected from the value when `VALUE` is absent.
    #[must_use]
    pub fn is_date_or_date_time(&self) -> bool {
        self.allowed_kinds.contains(&ValueKind::Date)
            && self.allowed_kinds.contains(&ValueKind::DateTime)
    }
}

macro_rules! spec {
    ($name:expr, $default:ident, [$($kind:ident),*], $multi:expr) => {
        PropertySpec {
            name: $name,
            default_kind: ValueKind::$default,
            allowed_kinds: &[$(ValueKind::$kind),*],
            multiple_valued: $multi,
        }
    };
}

#[rustfmt::skip]
pub static PROPERTY_SPECS: &[PropertySpec] = &[
    // Calendar properties, Section 3.7
    spec!(KW_CALSCALE,         Text,          [Text],                     false),
    spec!(KW_METHOD,           Text,          [Text],                     false),
    spec!(KW_PRODID,           Text,          [Text],                     false),
    spec!(KW_VERSION,          Text,          [Text],                     false),
    // Descriptive, Section 3.8.1
    spec!(KW_ATTACH,           Uri,           [Uri, Binary],              false),
    spec!(KW_CATEGORIES,       Text,          [Text],                     true),
    spec!(KW_CLASS,            Text,          [Text],                     false),
    spec!(KW_COMMENT,          Text,          [Text],                     false),
    spec!(KW_DESCRIPTION,      Text,          [Text],                     false),
    spec!(KW_GEO,              Geo,           [Geo],                      false),
    spec!(KW_LOCATION,         Text,          [Text],                     false),
    spec!(KW_PERCENT_COMPLETE, Integer,       [Integer],                  false),
    spec!(KW_PRIORITY,         Integer,       [Integer],                  false),
    spec!(KW_RESOURCES,        Text,          [Text],                     true),
    spec!(KW_STATUS,           Text,          [Text],                     false),
    spec!(KW_SUMMARY,          Text,          [Text],                     false),
    // Date and time, Section 3.8.2
    spec!(KW_COMPLETED,        DateTime,      [DateTime],                 false),
    spec!(KW_DTEND,            DateTime,      [DateTime, Date],           false),
    spec!(KW_DUE,              DateTime,      [DateTime, Date],           false),
    spec!(KW_DTSTART,          DateTime,      [DateTime, Date],           false),
    spec!(KW_DURATION,         Duration,      [Duration],                 false),
    spec!(KW_FREEBUSY,         Period,        [Period],                   true),
    spec!(KW_TRANSP,           Text,          [Text],                     false),
    // Time zone, Section 3.8.3
    spec!(KW_TZID,             Text,          [Text],                     false),
    spec!(KW_TZNAME,           Text,          [Text],                     false),
    spec!(KW_TZOFFSETFROM,     UtcOffset,     [UtcOffset],                false),
    spec!(KW_TZOFFSETTO,       UtcOffset,     [UtcOffset],                false),
    spec!(KW_TZURL,            Uri,           [Uri],                      false),
    // Relationship, Section 3.8.4
    spec!(KW_ATTENDEE,         CalAddress,    [CalAddress],               false),
    spec!(KW_CONTACT,          Text,          [Text],                     false),
    spec!(KW_ORGANIZER,        CalAddress,    [CalAddress],               false),
    spec!(KW_RECURRENCE_ID,    DateTime,      [DateTime, Date],           false),
    spec!(KW_RELATED_TO,       Text,          [Text],                     false),
    spec!(KW_URL,              Uri,           [Uri],                      false),
    spec!(KW_UID,              Text,          [Text],                     false),
    // Recurrence, Section 3.8.5
    spec!(KW_EXDATE,           DateTime,      [DateTime, Date],           true),
    spec!(KW_EXRULE,           Recur,         [Recur],                    false),
    spec!(KW_RDATE,            DateTime,      [DateTime, Date, Period],   true),
    spec!(KW_RRULE,            Recur,         [Recur],                    false),
    // Alarm, Section 3.8.6
    spec!(KW_ACTION,           Text,          [Text],                     false),
    spec!(KW_REPEAT,           Integer,       [Integer],                  false),
    spec!(KW_TRIGGER,          Duration,      [Duration, DateTime],       false),
    // Change management, Section 3.8.7
    spec!(KW_CREATED,          DateTime,      [DateTime],                 false),
    spec!(KW_DTSTAMP,          DateTime,      [DateTime],                 false),
    spec!(KW_LAST_MODIFIED,    DateTime,      [DateTime],                 false),
    spec!(KW_SEQUENCE,         Integer,       [Integer],                  false),
    // Miscellaneous, Section 3.8.8
    spec!(KW_REQUEST_STATUS,   RequestStatus, [RequestStatus],            false),
];

/// Look up the typing of a property by name, ignoring case.
#[must_use]
pub fn property_spec(name: &str) -> Option<&'static PropertySpec> {
    PROPERTY_SPECS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}
