// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period value type parser as defined in RFC 5545 Section 3.3.9.

use crate::error::ValueError;
use crate::value::ValueKind;
use crate::value::datetime::{ValueDateTime, decode_date_time};
use crate::value::duration::{ValueDuration, decode_duration};

/// Period of Time value defined in RFC 5545 Section 3.3.9
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValuePeriod {
    /// Explicit period with start and end date-time
    ///
    /// Format: `date-time "/" date-time`
    Explicit {
        /// Start date-time
        start: ValueDateTime,

        /// End date-time
        end: ValueDateTime,
    },

    /// Period with start date-time and duration
    ///
    /// Format: `date-time "/" dur-value`
    Duration {
        /// Start date-time
        start: ValueDateTime,

        /// Duration
        duration: ValueDuration,
    },
}

impl ValuePeriod {
    /// Start of the period.
    #[must_use]
    pub fn start(&self) -> &ValueDateTime {
        match self {
            ValuePeriod::Explicit { start, .. } | ValuePeriod::Duration { start, .. } => start,
        }
    }

    /// Length of the period in seconds, if it can be computed from the
    /// wall-clock fields.
    #[must_use]
    pub fn length_seconds(&self) -> Option<i64> {
        match self {
            ValuePeriod::Duration { duration, .. } => Some(duration.as_seconds()),
            ValuePeriod::Explicit { start, end } => {
                let start = start.normalized().ok()?.civil_date_time().ok()?;
                let end = end.normalized().ok()?.civil_date_time().ok()?;
                Some(end.duration_since(start).as_secs())
            }
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and end.  The start MUST
/// ; be before the end.
///
/// period-start = date-time "/" dur-value
/// ; [ISO.8601.2004] complete representation basic format for a
/// ; period of time consisting of a start and positive duration
/// ; of time.
/// ```
///
/// The form is detected by the shape of the second field: a leading sign or
/// `P` marks a duration.
///
/// # Errors
/// Returns an error if either half is malformed, or an explicit period mixes
/// UTC and floating date-times.
pub fn decode_period(raw: &str) -> Result<ValuePeriod, ValueError> {
    let raw = raw.trim();
    let Some((start, second)) = raw.split_once('/') else {
        return Err(ValueError::new(ValueKind::Period, "missing '/' separator"));
    };

    let start = decode_date_time(start).map_err(|e| ValueError::new(ValueKind::Period, e.reason))?;
    if second.starts_with(['P', '+', '-']) {
        let duration =
            decode_duration(second).map_err(|e| ValueError::new(ValueKind::Period, e.reason))?;
        return Ok(ValuePeriod::Duration { start, duration });
    }

    let end = decode_date_time(second).map_err(|e| ValueError::new(ValueKind::Period, e.reason))?;
    // Both date-times must have the same UTC flag (both UTC or both floating)
    if start.is_utc() == end.is_utc() {
        Ok(ValuePeriod::Explicit { start, end })
    } else {
        Err(ValueError::new(
            ValueKind::Period,
            "period date-times must have consistent timezone",
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{ValueDate, ValueTime};

    use super::*;

    #[test]
    fn parses_period() {
        use ValueDuration::{DateTime, Week};

        #[rustfmt::skip]
        let explicit_cases = [
            ("19970101T180000Z/19970102T070000Z",
             (ValueDate { year: 1997, month: 1, day: 1 }, ValueTime::new(18, 0, 0),
              ValueDate { year: 1997, month: 1, day: 2 }, ValueTime::new(7, 0, 0))),
            ("20240101T000000Z/20240101T235959Z",
             (ValueDate { year: 2024, month: 1, day: 1 }, ValueTime::new(0, 0, 0),
              ValueDate { year: 2024, month: 1, day: 1 }, ValueTime::new(23, 59, 59))),
        ];
        for (src, (start_date, start_time, end_date, end_time)) in explicit_cases {
            let ValuePeriod::Explicit { start, end } = decode_period(src).unwrap() else {
                panic!("Expected Explicit period for {src}");
            };
            assert_eq!(start.date, start_date, "Failed start date for {src}");
            assert_eq!(start.time, start_time, "Failed start time for {src}");
            assert_eq!(end.date, end_date, "Failed end date for {src}");
            assert_eq!(end.time, end_time, "Failed end time for {src}");
        }

        #[rustfmt::skip]
        let duration_cases = [
            ("19970101T180000Z/PT5H30M", DateTime { positive: true, day: 0, hour: 5, minute: 30, second: 0 }),
            ("19970101T180000Z/P1D",     DateTime { positive: true, day: 1, hour: 0, minute: 0, second: 0 }),
            ("20240101T000000Z/P2W",     Week { positive: true, week: 2 }),
        ];
        for (src, expected) in duration_cases {
            let ValuePeriod::Duration { duration, .. } = decode_period(src).unwrap() else {
                panic!("Expected Duration period for {src}");
            };
            assert_eq!(duration, expected, "Failed duration for {src}");
        }

        let fail_cases = [
            "",                                 // empty string
            "19970101T180000Z",                 // missing / and duration/end
            "/19970102T070000Z",                // missing start
            "19970101T180000Z/",                // missing end/duration
            "19970101T180000Z/P",               // invalid duration
            "invalid/19970102T070000Z",         // invalid start
            "19970101T180000Z/invalid",         // invalid end
            "19970101T180000Z/19970102T070000", // mixed UTC and non-UTC
        ];
        for src in fail_cases {
            assert!(decode_period(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn computes_length() {
        let explicit = decode_period("19970101T180000Z/19970102T070000Z").unwrap();
        assert_eq!(explicit.length_seconds(), Some(13 * 3600));
        let duration = decode_period("19970101T180000Z/PT5H30M").unwrap();
        assert_eq!(duration.length_seconds(), Some(5 * 3600 + 30 * 60));
    }
}
