// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per-year lookup tables for the BYxxx filters.
//!
//! Every day of a year gets its ascending and descending position within its
//! month, within its year and among the same weekdays of both, plus its week
//! number for a given week start. Negative positions count from the end, so
//! `-1` is the last.

use jiff::civil::Date;
use kalends_ical::Weekday;

use crate::error::RecurError;

/// Positions of one day within its month, year and week-numbering year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    /// Month, 1-12
    pub month: i8,
    /// Day of month, from 1
    pub month_day: i8,
    /// Day of month from the end, from -1
    pub month_day_back: i8,
    /// Day of year, from 1
    pub year_day: i16,
    /// Day of year from the end, from -1
    pub year_day_back: i16,
    /// Day of week
    pub weekday: Weekday,
    /// Which of the month's days with this weekday, from 1
    pub weekday_in_month: i8,
    /// Which of the month's days with this weekday from the end, from -1
    pub weekday_in_month_back: i8,
    /// Which of the year's days with this weekday, from 1
    pub weekday_in_year: i16,
    /// Which of the year's days with this weekday from the end, from -1
    pub weekday_in_year_back: i16,
    /// Week number, from 1
    pub week_no: i8,
    /// Week number from the end of its week-numbering year, from -1
    pub week_no_back: i8,
}

/// Day positions for every day of one year.
#[derive(Debug, Clone)]
pub struct YearTable {
    year: i16,
    days: Vec<DayInfo>,
}

impl YearTable {
    /// Build the table for `year`, numbering weeks from `wkst`.
    ///
    /// Week 1 is the first week with at least four days in the year, as in
    /// ISO 8601.
    ///
    /// # Errors
    /// Returns an error if the year is out of the supported range.
    pub fn new(year: i16, wkst: Weekday) -> Result<Self, RecurError> {
        let jan1 = Date::new(year, 1, 1)?;
        let year_len = days_in_year(year);
        let start_shift = weekday_shift(jan1.weekday(), wkst);
        let week_one = first_week_start(start_shift);
        let weeks = weeks_in_year(year, start_shift);
        let previous_weeks = weeks_in_year(
            year.saturating_sub(1),
            (start_shift - days_in_year(year.saturating_sub(1))).rem_euclid(7),
        );
        let next_weeks = weeks_in_year(
            year.saturating_add(1),
            (start_shift + year_len).rem_euclid(7),
        );

        let mut days = Vec::with_capacity(usize::try_from(year_len).unwrap_or(366));
        let mut year_day: i16 = 0;
        for month in 1..=12 {
            let first = Date::new(year, month, 1)?;
            let month_len = first.days_in_month();
            for month_day in 1..=month_len {
                year_day += 1;
                let date = Date::new(year, month, month_day)?;

                let offset = year_day - 1 - week_one;
                let (week_no, week_total) = if offset < 0 {
                    (previous_weeks, previous_weeks)
                } else if offset / 7 + 1 > weeks {
                    (1, next_weeks)
                } else {
                    (offset / 7 + 1, weeks)
                };

                days.push(DayInfo {
                    month,
                    month_day,
                    month_day_back: month_day - month_len - 1,
                    year_day,
                    year_day_back: year_day - year_len - 1,
                    weekday: date.weekday().into(),
                    weekday_in_month: (month_day - 1) / 7 + 1,
                    weekday_in_month_back: -((month_len - month_day) / 7 + 1),
                    weekday_in_year: (year_day - 1) / 7 + 1,
                    weekday_in_year_back: -((year_len - year_day) / 7 + 1),
                    week_no: narrow(week_no),
                    week_no_back: narrow(week_no - week_total - 1),
                });
            }
        }

        Ok(Self { year, days })
    }

    /// The year described.
    #[must_use]
    pub const fn year(&self) -> i16 {
        self.year
    }

    /// Positions of `date`, `None` if it lies in another year.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<&DayInfo> {
        if date.year() != self.year {
            return None;
        }
        let index = usize::try_from(date.day_of_year() - 1).ok()?;
        self.days.get(index)
    }
}

/// Days in a year of the proleptic Gregorian calendar.
#[must_use]
pub const fn days_in_year(year: i16) -> i16 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    if leap { 366 } else { 365 }
}

/// Days from the week start to `day`, 0-6.
fn weekday_shift(day: jiff::civil::Weekday, wkst: Weekday) -> i16 {
    let day = i16::from(day.to_monday_zero_offset());
    let start = i16::from(jiff::civil::Weekday::from(wkst).to_monday_zero_offset());
    (day - start).rem_euclid(7)
}

/// Zero-based day of year on which week 1 starts, negative when it starts in
/// the previous year. `shift` is the distance of January 1 from the week
/// start.
const fn first_week_start(shift: i16) -> i16 {
    if shift <= 3 { -shift } else { 7 - shift }
}

/// Number of weeks, 52 or 53, in a week-numbering year.
fn weeks_in_year(year: i16, shift: i16) -> i16 {
    let next_shift = (shift + days_in_year(year)).rem_euclid(7);
    let span = days_in_year(year) + first_week_start(next_shift) - first_week_start(shift);
    span / 7
}

#[expect(clippy::cast_possible_truncation)]
const fn narrow(week: i16) -> i8 {
    week as i8
}
