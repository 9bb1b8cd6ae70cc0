// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions for iCalendar.

use std::collections::HashMap;
use std::str::FromStr;

use chumsky::Parser;
use chumsky::prelude::*;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::ValueError;
use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::ValueKind;
use crate::value::datetime::{DateOrDateTime, decode_date_or_date_time};
use crate::value::miscellaneous::{Extra, int, run, uint};

/// Recurrence frequency
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Whether the period is shorter than a day.
    #[must_use]
    pub const fn is_sub_daily(self) -> bool {
        matches!(
            self,
            Frequency::Secondly | Frequency::Minutely | Frequency::Hourly
        )
    }
}

/// Day of the week
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
    #[strum(serialize = "SU")]
    Sunday,
}

impl From<Weekday> for jiff::civil::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => jiff::civil::Weekday::Monday,
            Weekday::Tuesday => jiff::civil::Weekday::Tuesday,
            Weekday::Wednesday => jiff::civil::Weekday::Wednesday,
            Weekday::Thursday => jiff::civil::Weekday::Thursday,
            Weekday::Friday => jiff::civil::Weekday::Friday,
            Weekday::Saturday => jiff::civil::Weekday::Saturday,
            Weekday::Sunday => jiff::civil::Weekday::Sunday,
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(value: jiff::civil::Weekday) -> Self {
        match value {
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

/// Day of week with optional ordinal, as used by BYDAY.
///
/// `+1MO` is the first Monday of the period, `-1FR` the last Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayNum {
    /// Position within the month or year, negative counting from the end.
    pub ordinal: Option<i8>,
    /// Day of the week
    pub day: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of `day`.
    #[must_use]
    pub const fn every(day: Weekday) -> Self {
        Self { ordinal: None, day }
    }

    /// The `ordinal`-th occurrence of `day`.
    #[must_use]
    pub const fn nth(ordinal: i8, day: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            day,
        }
    }
}

/// A single value in a BYxxx rule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByValue {
    /// A signed number; negative values count from the end of the period.
    Number(i16),
    /// A weekday with optional ordinal, only in BYDAY.
    Weekday(WeekdayNum),
}

/// The BYxxx rule parts, in the canonical RFC 5545 output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
#[expect(missing_docs)]
pub enum ByRuleKind {
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByMonth,
    BySetPos,
}

impl ByRuleKind {
    /// The rule-part name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ByRuleKind::BySecond => KW_RRULE_BYSECOND,
            ByRuleKind::ByMinute => KW_RRULE_BYMINUTE,
            ByRuleKind::ByHour => KW_RRULE_BYHOUR,
            ByRuleKind::ByDay => KW_RRULE_BYDAY,
            ByRuleKind::ByMonthDay => KW_RRULE_BYMONTHDAY,
            ByRuleKind::ByYearDay => KW_RRULE_BYYEARDAY,
            ByRuleKind::ByWeekNo => KW_RRULE_BYWEEKNO,
            ByRuleKind::ByMonth => KW_RRULE_BYMONTH,
            ByRuleKind::BySetPos => KW_RRULE_BYSETPOS,
        }
    }

    /// Allowed magnitude of values and whether they may be negative.
    const fn bounds(self) -> (i16, i16, bool) {
        match self {
            ByRuleKind::BySecond => (0, 60, false),
            ByRuleKind::ByMinute => (0, 59, false),
            ByRuleKind::ByHour => (0, 23, false),
            ByRuleKind::ByDay => (1, 53, true),
            ByRuleKind::ByMonthDay => (1, 31, true),
            ByRuleKind::ByYearDay | ByRuleKind::BySetPos => (1, 366, true),
            ByRuleKind::ByWeekNo => (1, 53, true),
            ByRuleKind::ByMonth => (1, 12, false),
        }
    }

    fn check(self, v: i32) -> bool {
        let (min, max, signed) = self.bounds();
        let magnitude = v.abs();
        (v >= 0 || signed) && magnitude >= i32::from(min) && magnitude <= i32::from(max)
    }
}

impl FromStr for ByRuleKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ByRuleKind::iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// How a recurrence ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecurEnd {
    /// After this many occurrences.
    Count(u32),
    /// At this date or date-time, inclusive.
    Until(DateOrDateTime),
}

/// A decoded RECUR value, RFC 5545 Section 3.3.10.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurSpec {
    /// Frequency of recurrence
    pub freq: Frequency,
    /// Interval between recurrences, at least 1
    pub interval: u32,
    /// COUNT or UNTIL; absent for rules without an end
    pub end: Option<RecurEnd>,
    /// Start day of week, as written
    pub wkst: Option<Weekday>,
    /// BYxxx rule parts
    pub by_rules: HashMap<ByRuleKind, Vec<ByValue>>,
    /// Vendor-extension and unknown rule parts, in input order
    pub extensions: Vec<(String, String)>,
}

impl RecurSpec {
    /// A rule with only FREQ set.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            end: None,
            wkst: None,
            by_rules: HashMap::new(),
            extensions: Vec::new(),
        }
    }

    /// Set INTERVAL; zero is treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Set COUNT.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.end = Some(RecurEnd::Count(count));
        self
    }

    /// Set UNTIL.
    #[must_use]
    pub fn with_until(mut self, until: DateOrDateTime) -> Self {
        self.end = Some(RecurEnd::Until(until));
        self
    }

    /// Set WKST.
    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }

    /// Set a numeric BYxxx rule part.
    #[must_use]
    pub fn with_numbers(mut self, kind: ByRuleKind, values: impl IntoIterator<Item = i16>) -> Self {
        let values = values.into_iter().map(ByValue::Number).collect();
        self.by_rules.insert(kind, values);
        self
    }

    /// Set BYDAY.
    #[must_use]
    pub fn with_weekdays(mut self, values: impl IntoIterator<Item = WeekdayNum>) -> Self {
        let values = values.into_iter().map(ByValue::Weekday).collect();
        self.by_rules.insert(ByRuleKind::ByDay, values);
        self
    }

    /// COUNT, if given.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        match self.end {
            Some(RecurEnd::Count(n)) => Some(n),
            _ => None,
        }
    }

    /// UNTIL, if given.
    #[must_use]
    pub fn until(&self) -> Option<&DateOrDateTime> {
        match &self.end {
            Some(RecurEnd::Until(until)) => Some(until),
            _ => None,
        }
    }

    /// WKST, defaulting to Monday.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.wkst.unwrap_or(Weekday::Monday)
    }

    /// Whether a BYxxx rule part is present.
    #[must_use]
    pub fn has(&self, kind: ByRuleKind) -> bool {
        self.by_rules.get(&kind).is_some_and(|v| !v.is_empty())
    }

    /// Values of a BYxxx rule part, empty when absent.
    #[must_use]
    pub fn by(&self, kind: ByRuleKind) -> &[ByValue] {
        self.by_rules.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Numeric values of a BYxxx rule part.
    pub fn numbers(&self, kind: ByRuleKind) -> impl Iterator<Item = i16> + '_ {
        self.by(kind).iter().filter_map(|v| match v {
            ByValue::Number(n) => Some(*n),
            ByValue::Weekday(_) => None,
        })
    }

    /// BYDAY values.
    pub fn weekdays(&self) -> impl Iterator<Item = WeekdayNum> + '_ {
        self.by(ByRuleKind::ByDay).iter().filter_map(|v| match v {
            ByValue::Weekday(w) => Some(*w),
            ByValue::Number(_) => None,
        })
    }

    /// Rule parts present, in canonical order.
    pub fn rule_parts(&self) -> impl Iterator<Item = (ByRuleKind, &[ByValue])> + '_ {
        ByRuleKind::iter()
            .filter(|kind| self.has(*kind))
            .map(|kind| (kind, self.by(kind)))
    }
}

impl FromStr for RecurSpec {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_recur(s)
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ordwk       = 1*2DIGIT       ;1 to 53
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday_num<'src>() -> impl Parser<'src, &'src str, WeekdayNum, Extra<'src>> {
    let ordinal = select! { c @ ('+' | '-') => c }
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .at_most(2)
                .collect::<String>(),
        )
        .try_map(|(sign, digits), span| {
            let n = lexical::parse::<i8, _>(&digits).map_err(|_| Rich::custom(span, "ordinal"))?;
            if (1..=53).contains(&n) {
                Ok(if sign == Some('-') { -n } else { n })
            } else {
                Err(Rich::custom(span, "weekday ordinal must be within 1-53"))
            }
        });

    let day = any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .exactly(2)
        .collect::<String>()
        .try_map(|s, span| {
            Weekday::from_str(&s).map_err(|_| Rich::custom(span, format!("unknown weekday {s}")))
        });

    ordinal
        .or_not()
        .then(day)
        .map(|(ordinal, day)| WeekdayNum { ordinal, day })
}

fn weekday(raw: &str) -> Result<Weekday, ValueError> {
    Weekday::from_str(raw.trim())
        .map_err(|_| ValueError::new(ValueKind::Recur, format!("unknown weekday {raw}")))
}

fn by_values(kind: ByRuleKind, raw: &str) -> Result<Vec<ByValue>, ValueError> {
    if kind == ByRuleKind::ByDay {
        let parser = weekday_num().separated_by(just(',')).at_least(1).collect();
        let days: Vec<WeekdayNum> = run(parser, raw.trim(), ValueKind::Recur)?;
        return Ok(days.into_iter().map(ByValue::Weekday).collect());
    }

    let parser = int().separated_by(just(',')).at_least(1).collect();
    let numbers: Vec<i32> = run(parser, raw.trim(), ValueKind::Recur)?;
    numbers
        .into_iter()
        .map(|n| match i16::try_from(n) {
            Ok(v) if kind.check(n) => Ok(ByValue::Number(v)),
            _ => Err(ValueError::new(
                ValueKind::Recur,
                format!("{} value {n} out of range", kind.name()),
            )),
        })
        .collect()
}

fn duplicate(key: &str) -> ValueError {
    ValueError::new(ValueKind::Recur, format!("duplicate rule part {key}"))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
///
/// Rule-part names are case-insensitive. Unknown names are kept as
/// extensions.
///
/// # Errors
/// Returns an error if FREQ is missing, a part repeats, COUNT and UNTIL are
/// both given, or a part value is malformed.
pub fn decode_recur(raw: &str) -> Result<RecurSpec, ValueError> {
    let mut freq = None;
    let mut interval = None;
    let mut end = None;
    let mut wkst = None;
    let mut by_rules = HashMap::new();
    let mut extensions = Vec::new();

    for part in raw.trim().split(';').filter(|p| !p.trim().is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            return Err(ValueError::new(
                ValueKind::Recur,
                format!("rule part {part} has no '='"),
            ));
        };
        let key = key.trim().to_ascii_uppercase();
        let value = value.trim();

        match key.as_str() {
            KW_RRULE_FREQ => {
                if freq.is_some() {
                    return Err(duplicate(&key));
                }
                let f = Frequency::from_str(value).map_err(|_| {
                    ValueError::new(ValueKind::Recur, format!("unknown frequency {value}"))
                })?;
                freq = Some(f);
            }
            KW_RRULE_UNTIL | KW_RRULE_COUNT => {
                if end.is_some() {
                    return Err(ValueError::new(
                        ValueKind::Recur,
                        "COUNT and UNTIL must not both occur",
                    ));
                }
                end = Some(if key == KW_RRULE_UNTIL {
                    let until = decode_date_or_date_time(value)
                        .map_err(|e| ValueError::new(ValueKind::Recur, e.reason))?;
                    RecurEnd::Until(until)
                } else {
                    RecurEnd::Count(run(uint(), value, ValueKind::Recur)?)
                });
            }
            KW_RRULE_INTERVAL => {
                if interval.is_some() {
                    return Err(duplicate(&key));
                }
                let n = run(uint(), value, ValueKind::Recur)?;
                if n == 0 {
                    return Err(ValueError::new(ValueKind::Recur, "INTERVAL must be positive"));
                }
                interval = Some(n);
            }
            KW_RRULE_WKST => {
                if wkst.is_some() {
                    return Err(duplicate(&key));
                }
                wkst = Some(weekday(value)?);
            }
            _ => match ByRuleKind::from_str(&key) {
                Ok(kind) => {
                    if by_rules.contains_key(&kind) {
                        return Err(duplicate(&key));
                    }
                    by_rules.insert(kind, by_values(kind, value)?);
                }
                Err(()) => extensions.push((key, value.to_string())),
            },
        }
    }

    let Some(freq) = freq else {
        return Err(ValueError::new(ValueKind::Recur, "FREQ is required"));
    };
    Ok(RecurSpec {
        freq,
        interval: interval.unwrap_or(1),
        end,
        wkst,
        by_rules,
        extensions,
    })
}
