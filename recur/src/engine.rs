// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};
use kalends_ical::{ByRuleKind, DateOrDateTime, Frequency, RecurSpec, WeekdayNum};
use strum::Display;

use crate::config::RecurConfig;
use crate::date::{DateTimeFields, StepUnit, period_index, period_start, step};
use crate::error::RecurError;
use crate::occurrence::{Occurrence, Window};
use crate::tables::{DayInfo, YearTable};
use crate::tz::TimeZoneProvider;

/// Average Gregorian year in seconds.
const SECONDS_PER_YEAR: i64 = 31_556_952;

/// Why an expansion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Termination {
    /// COUNT instances were produced.
    Count,
    /// The next instance would be after UNTIL.
    Until,
    /// The next instance would be after the end of the query window.
    WindowEnd,
    /// An open-ended rule reached the configured horizon.
    Horizon,
    /// Too many candidate dates were stepped through.
    CandidateLimit,
    /// Dates ran out of the supported range.
    Exhausted,
    /// The frequency is finer than a day; only DTSTART was produced.
    Unsupported,
}

/// Instances produced by one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Instances within the window, in start order.
    pub occurrences: Vec<Occurrence>,
    /// Why expansion stopped.
    pub termination: Termination,
}

/// Expand one recurrence rule anchored at `dtstart`.
///
/// DTSTART is the first instance and counts towards COUNT whether or not the
/// rule matches it. Only instances within `window` are returned, but COUNT
/// counts every instance from DTSTART on.
#[tracing::instrument(skip_all, fields(freq = %rule.freq, interval = rule.interval, window = ?window))]
pub fn expand_rule(
    rule: &RecurSpec,
    dtstart: &DateTimeFields,
    window: Window,
    provider: &dyn TimeZoneProvider,
    config: RecurConfig,
) -> Expansion {
    let expansion = Expander::new(rule, dtstart, window, provider, config).run();
    tracing::debug!(
        occurrences = expansion.occurrences.len(),
        termination = %expansion.termination,
        "expanded rule"
    );
    expansion
}

/// Which period a BYDAY ordinal such as `-1FR` counts within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrdinalScope {
    Month,
    Year,
    Ignored,
}

/// Position among the candidate dates.
///
/// Month and year cursors keep the day of DTSTART and yield nothing for
/// months that lack it, such as February 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Days(Date),
    Weeks(Date),
    Months { year: i16, month: i8, day: i8 },
    Years { year: i16, month: i8, day: i8 },
}

impl Cursor {
    fn start(rule: &RecurSpec, dtstart: Date) -> Result<Self, RecurError> {
        let cursor = match step_unit(rule) {
            StepUnit::Day => Self::Days(period_start(dtstart, rule.freq, rule.week_start(), 0)?),
            StepUnit::Week => Self::Weeks(dtstart),
            StepUnit::Month => Self::Months {
                year: dtstart.year(),
                month: if rule.freq == Frequency::Yearly { 1 } else { dtstart.month() },
                day: dtstart.day(),
            },
            StepUnit::Year => Self::Years {
                year: dtstart.year(),
                month: dtstart.month(),
                day: dtstart.day(),
            },
        };
        Ok(cursor)
    }

    /// The candidate date, `None` when the day does not exist.
    fn date(self) -> Option<Date> {
        match self {
            Self::Days(date) | Self::Weeks(date) => Some(date),
            Self::Months { year, month, day } | Self::Years { year, month, day } => {
                Date::new(year, month, day).ok()
            }
        }
    }

    /// A date that always exists within the same period as the candidate.
    fn anchor(self) -> Option<Date> {
        match self {
            Self::Days(date) | Self::Weeks(date) => Some(date),
            Self::Months { year, month, .. } | Self::Years { year, month, .. } => {
                Date::new(year, month, 1).ok()
            }
        }
    }

    fn advance(&mut self) -> Option<()> {
        match self {
            Self::Days(date) => *date = step(*date, StepUnit::Day, 1).ok()?,
            Self::Weeks(date) => *date = step(*date, StepUnit::Week, 1).ok()?,
            Self::Months { year, month, .. } => {
                if *month == 12 {
                    *year = year.checked_add(1)?;
                    *month = 1;
                } else {
                    *month += 1;
                }
            }
            Self::Years { year, .. } => *year = year.checked_add(1)?,
        }
        Some(())
    }

    /// Jump to the `n`th `freq` period after the current one.
    fn skip_periods(&mut self, rule: &RecurSpec, n: i64) -> Option<()> {
        match self {
            Self::Days(date) => {
                *date = period_start(*date, rule.freq, rule.week_start(), n).ok()?;
            }
            Self::Weeks(date) => *date = step(*date, StepUnit::Week, n).ok()?,
            Self::Months { year, month, .. } if rule.freq == Frequency::Yearly => {
                *year = year.checked_add(i16::try_from(n).ok()?)?;
                *month = 1;
            }
            Self::Months { year, month, .. } => {
                let index = i64::from(*year) * 12 + i64::from(*month) - 1 + n;
                *year = i16::try_from(index.div_euclid(12)).ok()?;
                *month = i8::try_from(index.rem_euclid(12) + 1).ok()?;
            }
            Self::Years { year, .. } => *year = year.checked_add(i16::try_from(n).ok()?)?,
        }
        Some(())
    }
}

/// The unit candidate dates are stepped by.
///
/// Day filters force stepping by day; otherwise whole periods are stepped,
/// keeping the month and day of DTSTART that no rule part overrides.
fn step_unit(rule: &RecurSpec) -> StepUnit {
    let has_any = |kinds: &[ByRuleKind]| kinds.iter().any(|kind| rule.has(*kind));
    match rule.freq {
        Frequency::Yearly => {
            if has_any(&[
                ByRuleKind::ByYearDay,
                ByRuleKind::ByMonthDay,
                ByRuleKind::ByDay,
                ByRuleKind::ByWeekNo,
            ]) {
                StepUnit::Day
            } else if rule.has(ByRuleKind::ByMonth) {
                StepUnit::Month
            } else {
                StepUnit::Year
            }
        }
        Frequency::Monthly => {
            if has_any(&[ByRuleKind::ByYearDay, ByRuleKind::ByMonthDay, ByRuleKind::ByDay]) {
                StepUnit::Day
            } else {
                StepUnit::Month
            }
        }
        Frequency::Weekly => {
            if has_any(&[ByRuleKind::ByYearDay, ByRuleKind::ByMonthDay, ByRuleKind::ByDay]) {
                StepUnit::Day
            } else {
                StepUnit::Week
            }
        }
        Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            StepUnit::Day
        }
    }
}

fn ordinal_scope(rule: &RecurSpec) -> OrdinalScope {
    match rule.freq {
        Frequency::Monthly => OrdinalScope::Month,
        Frequency::Yearly if rule.has(ByRuleKind::ByWeekNo) => OrdinalScope::Ignored,
        Frequency::Yearly if rule.has(ByRuleKind::ByMonth) => OrdinalScope::Month,
        Frequency::Yearly => OrdinalScope::Year,
        _ => OrdinalScope::Ignored,
    }
}

/// Times of day each matching date is expanded to, in order.
fn times_of_day(rule: &RecurSpec, dtstart: &DateTimeFields) -> Vec<Time> {
    if dtstart.is_date() {
        return vec![Time::midnight()];
    }
    let start = dtstart.civil();
    let values = |kind, default: i8, max: i16| -> Vec<i8> {
        let mut values: Vec<i8> = rule
            .numbers(kind)
            .filter(|n| (0..=max).contains(n))
            .filter_map(|n| i8::try_from(n).ok())
            .collect();
        if values.is_empty() {
            values.push(default);
        }
        values
    };
    let hours = values(ByRuleKind::ByHour, start.hour(), 23);
    let minutes = values(ByRuleKind::ByMinute, start.minute(), 59);
    let seconds = values(ByRuleKind::BySecond, start.second(), 59);

    let mut times: Vec<Time> = hours
        .iter()
        .flat_map(|&h| minutes.iter().map(move |&m| (h, m)))
        .flat_map(|(h, m)| seconds.iter().map(move |&s| (h, m, s)))
        .filter_map(|(h, m, s)| Time::new(h, m, s, 0).ok())
        .collect();
    times.sort_unstable();
    times.dedup();
    times
}

/// Stepping state of one rule expansion.
pub(crate) struct Expander<'a> {
    rule: &'a RecurSpec,
    dtstart: &'a DateTimeFields,
    window: Window,
    provider: &'a dyn TimeZoneProvider,
    config: RecurConfig,
    include_start: bool,

    by_day: Vec<WeekdayNum>,
    scope: OrdinalScope,
    times: Vec<Time>,
    limit: Option<(i64, Termination)>,
    table: Option<YearTable>,
    emitted: u64,
    occurrences: Vec<Occurrence>,
}

impl<'a> Expander<'a> {
    pub(crate) fn new(
        rule: &'a RecurSpec,
        dtstart: &'a DateTimeFields,
        window: Window,
        provider: &'a dyn TimeZoneProvider,
        config: RecurConfig,
    ) -> Self {
        let mut by_day: Vec<WeekdayNum> = rule.weekdays().collect();
        let implied_day = rule.freq == Frequency::Yearly
            && rule.has(ByRuleKind::ByWeekNo)
            && by_day.is_empty()
            && !rule.has(ByRuleKind::ByMonthDay)
            && !rule.has(ByRuleKind::ByYearDay);
        if implied_day {
            by_day.push(WeekdayNum::every(dtstart.civil_date().weekday().into()));
        }

        Self {
            rule,
            dtstart,
            window,
            provider,
            config,
            include_start: true,
            by_day,
            scope: ordinal_scope(rule),
            times: times_of_day(rule, dtstart),
            limit: None,
            table: None,
            emitted: 0,
            occurrences: Vec::new(),
        }
    }

    /// Whether DTSTART is an instance even when the rule does not match it.
    pub(crate) fn include_start(mut self, include: bool) -> Self {
        self.include_start = include;
        self
    }

    pub(crate) fn run(mut self) -> Expansion {
        let start_timestamp = self.dtstart.to_timestamp(self.provider);
        let count = self.rule.count();
        let has_set_pos = self.rule.has(ByRuleKind::BySetPos);

        if self.include_start && count != Some(0) {
            self.emitted = u64::from(!has_set_pos);
            if self.window.contains(start_timestamp) {
                self.occurrences
                    .push(Occurrence::new(self.dtstart.clone(), start_timestamp));
            }
        }

        if self.rule.freq.is_sub_daily() {
            tracing::warn!(freq = %self.rule.freq, "sub-daily frequency is not expanded");
            return self.finish(Termination::Unsupported);
        }
        if count.is_some_and(|count| self.emitted >= u64::from(count)) {
            return self.finish(Termination::Count);
        }

        self.limit = self.compute_limit(start_timestamp);
        let limit_date = self
            .limit
            .and_then(|(timestamp, _)| {
                DateTimeFields::from_timestamp(timestamp, self.dtstart.zone().cloned(), self.provider)
                    .ok()
            })
            .map_or(Date::MAX, |fields| fields.civil_date());
        let limit_reason = self.limit.map_or(Termination::Exhausted, |(_, reason)| reason);

        let termination = match self.walk(limit_date, limit_reason) {
            Ok(termination) => termination,
            Err(err) => {
                tracing::debug!(%err, "date out of range, ending expansion");
                Termination::Exhausted
            }
        };
        self.finish(termination)
    }

    fn finish(self, termination: Termination) -> Expansion {
        Expansion {
            occurrences: self.occurrences,
            termination,
        }
    }

    /// The earliest of UNTIL, the window end and the horizon, with the reason
    /// to report when it is passed.
    fn compute_limit(&self, start_timestamp: i64) -> Option<(i64, Termination)> {
        let until = self
            .rule
            .until()
            .map(|until| (self.until_timestamp(until), Termination::Until));
        let window_end = self.window.end().map(|end| (end, Termination::WindowEnd));
        let horizon = (self.rule.count().is_none() && until.is_none()).then(|| {
            let base = self.window.end().unwrap_or(start_timestamp);
            let span = i64::from(self.config.horizon_years).saturating_mul(SECONDS_PER_YEAR);
            tracing::debug!(base, years = self.config.horizon_years, "no COUNT or UNTIL, bounding by horizon");
            (base.saturating_add(span), Termination::Horizon)
        });

        [until, window_end, horizon]
            .into_iter()
            .flatten()
            .reduce(|best, next| if next.0 < best.0 { next } else { best })
    }

    /// A DATE UNTIL covers its whole day, and a floating UNTIL is read in the
    /// frame of DTSTART.
    fn until_timestamp(&self, until: &DateOrDateTime) -> i64 {
        let fields = match until {
            DateOrDateTime::Date(date) => date
                .civil_date()
                .map_err(RecurError::from)
                .map(|date| self.frame_of_start(DateTimeFields::floating(date.at(23, 59, 59, 0)))),
            DateOrDateTime::DateTime(dt) => {
                DateTimeFields::from_date_time(dt).map(|fields| match fields.zone() {
                    Some(_) => fields,
                    None => self.frame_of_start(fields),
                })
            }
        };
        match fields {
            Ok(fields) => fields.to_timestamp(self.provider),
            Err(err) => {
                tracing::warn!(%err, "invalid UNTIL, ignoring it");
                i64::MAX
            }
        }
    }

    fn frame_of_start(&self, fields: DateTimeFields) -> DateTimeFields {
        match self.dtstart.zone() {
            Some(zone) => fields.with_zone(zone.clone()),
            None => fields,
        }
    }

    fn walk(
        &mut self,
        limit_date: Date,
        limit_reason: Termination,
    ) -> Result<Termination, RecurError> {
        let rule = self.rule;
        let wkst = rule.week_start();
        let interval = i64::from(rule.interval.max(1));
        let start_date = self.dtstart.civil_date();
        let start_period = period_index(start_date, rule.freq, wkst);
        let has_set_pos = rule.has(ByRuleKind::BySetPos);

        let times = self.times.clone();
        let mut cursor = Cursor::start(rule, start_date)?;
        let mut current_period = None;
        let mut set: Vec<DateTimeFields> = Vec::new();
        let mut candidates = 0_usize;

        loop {
            candidates += 1;
            if candidates > self.config.max_candidates {
                tracing::warn!(candidates, "candidate limit reached, ending expansion");
                return Ok(Termination::CandidateLimit);
            }

            let Some(anchor) = cursor.anchor() else {
                return Ok(self.flush(&mut set).unwrap_or(Termination::Exhausted));
            };
            let period = period_index(anchor, rule.freq, wkst);
            let period_changed = current_period != Some(period);
            if period_changed {
                if let Some(stop) = self.flush(&mut set) {
                    return Ok(stop);
                }
                current_period = Some(period);
            }

            if anchor > limit_date && (!has_set_pos || period_changed) {
                return Ok(limit_reason);
            }

            let offset = (period - start_period).rem_euclid(interval);
            if offset != 0 {
                if cursor.skip_periods(rule, interval - offset).is_none() {
                    return Ok(self.flush(&mut set).unwrap_or(Termination::Exhausted));
                }
                continue;
            }

            // a BYSETPOS period counts its dates before DTSTART too
            let date = cursor
                .date()
                .filter(|date| has_set_pos || *date >= start_date);
            if let Some(date) = date {
                if self.matches(date)? {
                    for &time in &times {
                        let candidate = self.dtstart.with_civil(date.to_datetime(time));
                        if has_set_pos {
                            set.push(candidate);
                        } else if let Some(stop) = self.emit(&candidate) {
                            return Ok(stop);
                        }
                    }
                }
            }

            if cursor.advance().is_none() {
                return Ok(self.flush(&mut set).unwrap_or(Termination::Exhausted));
            }
        }
    }

    /// Emit the BYSETPOS picks of one period's candidates.
    fn flush(&mut self, set: &mut Vec<DateTimeFields>) -> Option<Termination> {
        if set.is_empty() {
            return None;
        }
        let len = i64::try_from(set.len()).unwrap_or(i64::MAX);
        let mut picks: Vec<usize> = self
            .rule
            .numbers(ByRuleKind::BySetPos)
            .filter_map(|pos| {
                let pos = i64::from(pos);
                let index = if pos > 0 { pos - 1 } else { len + pos };
                (0..len).contains(&index).then_some(index)
            })
            .filter_map(|index| usize::try_from(index).ok())
            .collect();
        picks.sort_unstable();
        picks.dedup();

        let candidates = std::mem::take(set);
        picks
            .into_iter()
            .filter_map(|index| candidates.get(index))
            .find_map(|candidate| self.emit(candidate))
    }

    /// Record one instance produced by the rule, returning why to stop if this
    /// ends the expansion.
    fn emit(&mut self, candidate: &DateTimeFields) -> Option<Termination> {
        let start = self.dtstart.civil();
        if candidate.civil() < start || (self.include_start && candidate.civil() == start) {
            return None;
        }

        let timestamp = candidate.to_timestamp(self.provider);
        if let Some((limit, reason)) = self.limit {
            if timestamp > limit {
                return Some(reason);
            }
        }

        self.emitted += 1;
        tracing::trace!(n = self.emitted, timestamp, "instance");
        if self.window.contains(timestamp) {
            self.occurrences
                .push(Occurrence::new(candidate.clone(), timestamp));
        }
        self.rule
            .count()
            .is_some_and(|count| self.emitted >= u64::from(count))
            .then_some(Termination::Count)
    }

    /// Whether `date` passes every BYxxx filter of the rule.
    fn matches(&mut self, date: Date) -> Result<bool, RecurError> {
        let rule = self.rule;
        if self.table.as_ref().is_none_or(|table| table.year() != date.year()) {
            self.table = Some(YearTable::new(date.year(), rule.week_start())?);
        }
        let Some(info) = self.table.as_ref().and_then(|table| table.get(date)) else {
            return Ok(false);
        };

        let month = |n: i16| n == i16::from(info.month);
        let week = |n: i16| n == i16::from(info.week_no) || n == i16::from(info.week_no_back);
        let year_day = |n: i16| n == info.year_day || n == info.year_day_back;
        let month_day =
            |n: i16| n == i16::from(info.month_day) || n == i16::from(info.month_day_back);
        let passes = |kind, test: &dyn Fn(i16) -> bool| {
            !rule.has(kind) || rule.numbers(kind).any(test)
        };

        Ok(passes(ByRuleKind::ByMonth, &month)
            && passes(ByRuleKind::ByWeekNo, &week)
            && passes(ByRuleKind::ByYearDay, &year_day)
            && passes(ByRuleKind::ByMonthDay, &month_day)
            && (self.by_day.is_empty() || self.by_day.iter().any(|wd| self.day_matches(*wd, info))))
    }

    fn day_matches(&self, wd: WeekdayNum, info: &DayInfo) -> bool {
        if wd.day != info.weekday {
            return false;
        }
        match (wd.ordinal, self.scope) {
            (None, _) | (Some(_), OrdinalScope::Ignored) => true,
            (Some(n), OrdinalScope::Month) => {
                n == info.weekday_in_month || n == info.weekday_in_month_back
            }
            (Some(n), OrdinalScope::Year) => {
                let n = i16::from(n);
                n == info.weekday_in_year || n == info.weekday_in_year_back
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use kalends_ical::Weekday;

    use crate::tz::StaticTimeZones;

    use super::*;

    fn expand(rule: &RecurSpec, dtstart: &DateTimeFields, window: Window) -> Expansion {
        expand_rule(rule, dtstart, window, &StaticTimeZones::new(), RecurConfig::default())
    }

    fn dates(expansion: &Expansion) -> Vec<Date> {
        expansion
            .occurrences
            .iter()
            .map(|o| o.start.civil_date())
            .collect()
    }

    #[test]
    fn picks_step_unit() {
        #[rustfmt::skip]
        let cases = [
            (RecurSpec::new(Frequency::Yearly),                                          StepUnit::Year),
            (RecurSpec::new(Frequency::Yearly).with_numbers(ByRuleKind::ByMonth, [3]),   StepUnit::Month),
            (RecurSpec::new(Frequency::Yearly).with_numbers(ByRuleKind::ByWeekNo, [20]), StepUnit::Day),
            (RecurSpec::new(Frequency::Monthly),                                         StepUnit::Month),
            (RecurSpec::new(Frequency::Monthly).with_numbers(ByRuleKind::ByMonthDay, [1]), StepUnit::Day),
            (RecurSpec::new(Frequency::Weekly),                                          StepUnit::Week),
            (RecurSpec::new(Frequency::Weekly).with_weekdays([WeekdayNum::every(Weekday::Friday)]), StepUnit::Day),
            (RecurSpec::new(Frequency::Daily),                                           StepUnit::Day),
        ];
        for (rule, expected) in cases {
            assert_eq!(step_unit(&rule), expected, "Step unit of {rule:?}");
        }
    }

    #[test]
    fn expands_times_of_day() {
        let start = DateTimeFields::new(2024, 1, 1, 9, 15, 0).unwrap();
        let rule = RecurSpec::new(Frequency::Daily)
            .with_numbers(ByRuleKind::ByHour, [14, 9, 25])
            .with_numbers(ByRuleKind::ByMinute, [0]);
        let times = times_of_day(&rule, &start);
        assert_eq!(times, [Time::constant(9, 0, 0, 0), Time::constant(14, 0, 0, 0)]);

        let day = DateTimeFields::date(2024, 1, 1).unwrap();
        assert_eq!(times_of_day(&rule, &day), [Time::midnight()]);
    }

    #[test]
    fn counts_dtstart_first() {
        // DTSTART on a Wednesday, rule only matches Fridays
        let start = DateTimeFields::new(2024, 1, 3, 10, 0, 0).unwrap();
        let rule = RecurSpec::new(Frequency::Weekly)
            .with_count(3)
            .with_weekdays([WeekdayNum::every(Weekday::Friday)]);
        let expansion = expand(&rule, &start, Window::unbounded());
        assert_eq!(expansion.termination, Termination::Count);
        assert_eq!(dates(&expansion), [date(2024, 1, 3), date(2024, 1, 5), date(2024, 1, 12)]);
    }

    #[test]
    fn reports_termination() {
        let start = DateTimeFields::new(2024, 1, 1, 0, 0, 0).unwrap();
        let midnight = |d: Date| DateTimeFields::floating(d.at(0, 0, 0, 0)).to_timestamp(&StaticTimeZones::new());

        let daily = RecurSpec::new(Frequency::Daily);
        let window = Window::until(midnight(date(2024, 1, 10)));
        let expansion = expand(&daily, &start, window);
        assert_eq!(expansion.termination, Termination::WindowEnd);
        assert_eq!(expansion.occurrences.len(), 10);

        let expansion = expand(&daily, &start, Window::unbounded());
        assert_eq!(expansion.termination, Termination::Horizon);
        assert_eq!(expansion.occurrences.len(), 366);

        let until = daily.clone().with_until(DateOrDateTime::Date(date(2024, 1, 5).into()));
        let expansion = expand(&until, &start, window);
        assert_eq!(expansion.termination, Termination::Until);
        assert_eq!(expansion.occurrences.len(), 5);

        let hourly = RecurSpec::new(Frequency::Hourly).with_count(10);
        let expansion = expand(&hourly, &start, Window::unbounded());
        assert_eq!(expansion.termination, Termination::Unsupported);
        assert_eq!(dates(&expansion), [date(2024, 1, 1)]);

        let config = RecurConfig::default().max_candidates(20);
        let expansion = expand_rule(&daily, &start, Window::unbounded(), &StaticTimeZones::new(), config);
        assert_eq!(expansion.termination, Termination::CandidateLimit);
    }

    #[test]
    fn count_spans_whole_series() {
        let start = DateTimeFields::new(2024, 1, 1, 8, 0, 0).unwrap();
        let midnight = |d: Date| DateTimeFields::floating(d.at(0, 0, 0, 0)).to_timestamp(&StaticTimeZones::new());
        let rule = RecurSpec::new(Frequency::Daily).with_count(5);
        let window = Window::starting(midnight(date(2024, 1, 4)));
        let expansion = expand(&rule, &start, window);
        assert_eq!(expansion.termination, Termination::Count);
        assert_eq!(dates(&expansion), [date(2024, 1, 4), date(2024, 1, 5)]);
    }

    #[test]
    fn excluding_rule_starts_from_matches() {
        let start = DateTimeFields::new(2024, 1, 3, 10, 0, 0).unwrap();
        let rule = RecurSpec::new(Frequency::Weekly)
            .with_count(2)
            .with_weekdays([WeekdayNum::every(Weekday::Friday)]);
        let expansion = Expander::new(&rule, &start, Window::unbounded(), &StaticTimeZones::new(), RecurConfig::default())
            .include_start(false)
            .run();
        assert_eq!(dates(&expansion), [date(2024, 1, 5), date(2024, 1, 12)]);
    }
}
