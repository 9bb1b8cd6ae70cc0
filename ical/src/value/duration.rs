// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type parser as defined in RFC 5545 Section 3.3.6.

use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::ValueKind;
use crate::value::miscellaneous::{Extra, run, uint};

/// Duration Value defined in RFC 5545 Section 3.3.6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDuration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl ValueDuration {
    /// The zero duration.
    pub const ZERO: Self = Self::DateTime {
        positive: true,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Total signed length in seconds, counting a day as 86400 seconds.
    #[must_use]
    pub fn as_seconds(self) -> i64 {
        let (positive, total) = match self {
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => (
                positive,
                i64::from(day) * 86_400
                    + i64::from(hour) * 3600
                    + i64::from(minute) * 60
                    + i64::from(second),
            ),
            ValueDuration::Week { positive, week } => (positive, i64::from(week) * 7 * 86_400),
        };
        if positive { total } else { -total }
    }

    /// Build a day/time duration from signed seconds.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_seconds(seconds: i64) -> Self {
        let abs = seconds.unsigned_abs();
        ValueDuration::DateTime {
            positive: seconds >= 0,
            day: (abs / 86_400).min(u64::from(u32::MAX)) as u32,
            hour: (abs / 3600 % 24) as u32,
            minute: (abs / 60 % 60) as u32,
            second: (abs % 60) as u32,
        }
    }

    /// Convert to `jiff::SignedDuration`.
    #[must_use]
    pub fn signed_duration(self) -> jiff::SignedDuration {
        jiff::SignedDuration::from_secs(self.as_seconds())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub(crate) fn value_duration<'src>() -> impl Parser<'src, &'src str, ValueDuration, Extra<'src>> {
    fn second<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> {
        uint().then_ignore(just('S'))
    }

    fn minute<'src>() -> impl Parser<'src, &'src str, (u32, u32), Extra<'src>> {
        // dur-minute = 1*DIGIT "M" [dur-second]
        uint()
            .then_ignore(just('M'))
            .then(second().or_not())
            .map(|(m, s)| (m, s.unwrap_or(0)))
    }

    fn time<'src>() -> impl Parser<'src, &'src str, (u32, u32, u32), Extra<'src>> {
        // dur-hour = 1*DIGIT "H" [dur-minute]
        let hour = uint()
            .then_ignore(just('H'))
            .then(minute().or_not())
            .map(|(h, ms)| {
                let (m, s) = ms.unwrap_or((0, 0));
                (h, m, s)
            });

        // dur-time = "T" (dur-hour / dur-minute / dur-second)
        just('T').ignore_then(choice((
            hour,
            minute().map(|(m, s)| (0, m, s)),
            second().map(|s| (0, 0, s)),
        )))
    }

    enum Body {
        Week(u32),
        DayTime(u32, (u32, u32, u32)),
    }

    // dur-week = 1*DIGIT "W"
    let week = uint().then_ignore(just('W')).map(Body::Week);

    // dur-date = dur-day [dur-time]
    let date = uint()
        .then_ignore(just('D'))
        .then(time().or_not())
        .map(|(day, time)| Body::DayTime(day, time.unwrap_or((0, 0, 0))));

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));

    sign.then_ignore(just('P'))
        .then(choice((week, date, time().map(|t| Body::DayTime(0, t)))))
        .map(|(positive, body)| match body {
            Body::Week(week) => ValueDuration::Week { positive, week },
            Body::DayTime(day, (hour, minute, second)) => ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            },
        })
}

/// Decode a DURATION value.
///
/// # Errors
/// Returns an error if the value does not follow the duration grammar.
pub fn decode_duration(raw: &str) -> Result<ValueDuration, ValueError> {
    run(value_duration(), raw.trim(), ValueKind::Duration)
}
