// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date arithmetic for recurrence expansion.
//!
//! [`DateTimeFields`] is a validated field set, year down to second, tagged
//! with the frame it is expressed in. It converts to and from Unix seconds,
//! the integer instant occurrences are keyed by. The free functions step
//! dates by a calendar unit and number the frequency periods a date falls in.

use jiff::civil::{self, Date, DateTime, Time};
use jiff::{SignedDuration, Span};
use kalends_ical::{
    DateOrDateTime, Frequency, PropertyValue, TimeZoneRef, ValueDate, ValueDateTime, ValueTime,
    Weekday,
};
use strum::Display;

use crate::error::RecurError;
use crate::tz::{TimeZoneProvider, offset_at_instant, offset_for_local};

const UNIX_EPOCH: DateTime = civil::datetime(1970, 1, 1, 0, 0, 0, 0);

const SECONDS_PER_DAY: i64 = 86_400;

/// A date-time with validated fields and the frame it is expressed in.
///
/// Floating values, and values naming a zone the provider does not know, are
/// read as UTC wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTimeFields {
    civil: DateTime,
    zone: Option<TimeZoneRef>,
    date_only: bool,
}

impl DateTimeFields {
    /// A floating date-time.
    ///
    /// # Errors
    /// Returns an error if the fields do not form a valid date-time.
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
    ) -> Result<Self, RecurError> {
        let civil = DateTime::new(year, month, day, hour, minute, second, 0)?;
        Ok(Self::floating(civil))
    }

    /// A date without time of day.
    ///
    /// # Errors
    /// Returns an error if the fields do not form a valid date.
    pub fn date(year: i16, month: i8, day: i8) -> Result<Self, RecurError> {
        let date = Date::new(year, month, day)?;
        Ok(Self {
            civil: date.to_datetime(Time::midnight()),
            zone: None,
            date_only: true,
        })
    }

    /// A floating date-time from civil fields.
    #[must_use]
    pub const fn floating(civil: DateTime) -> Self {
        Self {
            civil,
            zone: None,
            date_only: false,
        }
    }

    /// Express the same wall-clock fields in `zone`.
    #[must_use]
    pub fn with_zone(mut self, zone: TimeZoneRef) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Convert a decoded DATE or DATE-TIME value.
    ///
    /// # Errors
    /// Returns an error if the fields are out of range.
    pub fn from_value(value: &DateOrDateTime) -> Result<Self, RecurError> {
        match value {
            DateOrDateTime::Date(date) => Self::date(date.year, date.month, date.day),
            DateOrDateTime::DateTime(dt) => Self::from_date_time(dt),
        }
    }

    /// Convert a decoded DATE-TIME value.
    ///
    /// # Errors
    /// Returns an error if the fields are out of range.
    pub fn from_date_time(value: &ValueDateTime) -> Result<Self, RecurError> {
        Ok(Self {
            civil: value.civil_date_time()?,
            zone: value.zone.clone(),
            date_only: false,
        })
    }

    /// The property value for these fields: DATE for a date, DATE-TIME with
    /// its zone otherwise.
    #[must_use]
    pub fn to_value(&self) -> PropertyValue {
        let date = ValueDate::from(self.civil.date());
        if self.date_only {
            return PropertyValue::Date(date);
        }
        PropertyValue::DateTime(ValueDateTime {
            date,
            time: ValueTime::from(self.civil.time()),
            zone: self.zone.clone(),
        })
    }

    /// The wall-clock fields.
    #[must_use]
    pub const fn civil(&self) -> DateTime {
        self.civil
    }

    /// The calendar date.
    #[must_use]
    pub fn civil_date(&self) -> Date {
        self.civil.date()
    }

    /// The frame, `None` when floating.
    #[must_use]
    pub fn zone(&self) -> Option<&TimeZoneRef> {
        self.zone.as_ref()
    }

    /// Whether this is a DATE without time of day.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.date_only
    }

    /// The same frame and kind with other wall-clock fields.
    #[must_use]
    pub(crate) fn with_civil(&self, civil: DateTime) -> Self {
        Self {
            civil,
            zone: self.zone.clone(),
            date_only: self.date_only,
        }
    }

    /// Unix seconds of this date-time.
    ///
    /// Named zones are resolved through `provider`; a wall-clock time
    /// repeated by a transition takes its earlier instant.
    #[must_use]
    pub fn to_timestamp(&self, provider: &dyn TimeZoneProvider) -> i64 {
        let local = self.civil.duration_since(UNIX_EPOCH).as_secs();
        let offset = match &self.zone {
            None | Some(TimeZoneRef::Utc) => 0,
            Some(TimeZoneRef::Offset(seconds)) => *seconds,
            Some(TimeZoneRef::Named(tzid)) => match provider.transitions(tzid) {
                Some(transitions) => offset_for_local(transitions, local),
                None => {
                    tracing::warn!(tzid, "unknown time zone, reading as floating time");
                    0
                }
            },
        };
        local.saturating_sub(i64::from(offset))
    }

    /// The wall-clock fields of an instant in `zone`.
    ///
    /// # Errors
    /// Returns an error if the instant is out of the supported range.
    pub fn from_timestamp(
        timestamp: i64,
        zone: Option<TimeZoneRef>,
        provider: &dyn TimeZoneProvider,
    ) -> Result<Self, RecurError> {
        let offset = match &zone {
            None | Some(TimeZoneRef::Utc) => 0,
            Some(TimeZoneRef::Offset(seconds)) => *seconds,
            Some(TimeZoneRef::Named(tzid)) => provider
                .transitions(tzid)
                .map_or(0, |transitions| offset_at_instant(transitions, timestamp)),
        };
        let local = timestamp.saturating_add(i64::from(offset));
        let civil = UNIX_EPOCH.checked_add(SignedDuration::from_secs(local))?;
        Ok(Self {
            civil,
            zone,
            date_only: false,
        })
    }

    /// Re-express these fields in another frame. Dates and floating values
    /// have no instant to convert and are returned as they are.
    ///
    /// # Errors
    /// Returns an error if the converted instant is out of range.
    pub fn in_frame(
        &self,
        zone: Option<&TimeZoneRef>,
        provider: &dyn TimeZoneProvider,
    ) -> Result<Self, RecurError> {
        if self.date_only || self.zone.is_none() || self.zone.as_ref() == zone {
            return Ok(self.clone());
        }
        Self::from_timestamp(self.to_timestamp(provider), zone.cloned(), provider)
    }

    /// Add seconds to the wall clock. A DATE stays a DATE.
    ///
    /// # Errors
    /// Returns an error if the result is out of range.
    pub fn checked_add_seconds(&self, seconds: i64) -> Result<Self, RecurError> {
        let civil = self.civil.checked_add(SignedDuration::from_secs(seconds))?;
        Ok(self.with_civil(civil))
    }
}

/// Calendar units a date can be stepped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StepUnit {
    /// One day
    Day,
    /// Seven days
    Week,
    /// One month, clamping the day to the end of a shorter month
    Month,
    /// One year, clamping February 29 to February 28
    Year,
}

/// Advance `date` by `amount` units.
///
/// # Errors
/// Returns an error if the result is out of range.
pub fn step(date: Date, unit: StepUnit, amount: i64) -> Result<Date, RecurError> {
    let span = match unit {
        StepUnit::Day => Span::new().try_days(amount)?,
        StepUnit::Week => Span::new().try_weeks(amount)?,
        StepUnit::Month => Span::new().try_months(amount)?,
        StepUnit::Year => Span::new().try_years(amount)?,
    };
    Ok(date.checked_add(span)?)
}

/// Days since 1970-01-01.
#[must_use]
pub fn epoch_day(date: Date) -> i64 {
    date.to_datetime(Time::midnight())
        .duration_since(UNIX_EPOCH)
        .as_secs()
        .div_euclid(SECONDS_PER_DAY)
}

/// Days from the most recent `wkst` on or before `date`, 0-6.
#[must_use]
pub fn days_since_week_start(date: Date, wkst: Weekday) -> i8 {
    let day = date.weekday().to_monday_zero_offset();
    let start = civil::Weekday::from(wkst).to_monday_zero_offset();
    (day - start).rem_euclid(7)
}

/// Number of the `freq` period containing `date`.
///
/// Consecutive periods have consecutive numbers: years for YEARLY, months
/// for MONTHLY, weeks starting on `wkst` for WEEKLY and days otherwise.
#[must_use]
pub fn period_index(date: Date, freq: Frequency, wkst: Weekday) -> i64 {
    match freq {
        Frequency::Yearly => i64::from(date.year()),
        Frequency::Monthly => i64::from(date.year()) * 12 + i64::from(date.month()) - 1,
        Frequency::Weekly => {
            // 1970-01-05 is a Monday
            let monday_based = epoch_day(date) - 4;
            let shift = i64::from(civil::Weekday::from(wkst).to_monday_zero_offset());
            (monday_based - shift).div_euclid(7)
        }
        Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            epoch_day(date)
        }
    }
}

/// First day of the `freq` period `periods` after the one containing `date`.
///
/// # Errors
/// Returns an error if the result is out of range.
pub fn period_start(
    date: Date,
    freq: Frequency,
    wkst: Weekday,
    periods: i64,
) -> Result<Date, RecurError> {
    match freq {
        Frequency::Yearly => step(Date::new(date.year(), 1, 1)?, StepUnit::Year, periods),
        Frequency::Monthly => step(date.first_of_month(), StepUnit::Month, periods),
        Frequency::Weekly => {
            let offset = i64::from(days_since_week_start(date, wkst));
            step(date, StepUnit::Day, periods * 7 - offset)
        }
        Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            step(date, StepUnit::Day, periods)
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::tz::{StaticTimeZones, Transition};

    use super::*;

    #[test]
    fn converts_to_and_from_timestamps() {
        let zones = StaticTimeZones::new().with_fixed("Asia/Tokyo", 9 * 3600, "JST");
        let noon = DateTimeFields::new(2024, 1, 1, 12, 0, 0).unwrap();

        #[rustfmt::skip]
        let cases = [
            (None,                                       1_704_110_400),
            (Some(TimeZoneRef::Utc),                     1_704_110_400),
            (Some(TimeZoneRef::Offset(-5 * 3600)),       1_704_128_400),
            (Some(TimeZoneRef::Named("Asia/Tokyo".into())), 1_704_078_000),
            (Some(TimeZoneRef::Named("Mars/Olympus".into())), 1_704_110_400),
        ];
        for (zone, expected) in cases {
            let mut fields = noon.clone();
            if let Some(zone) = zone.clone() {
                fields = fields.with_zone(zone);
            }
            let timestamp = fields.to_timestamp(&zones);
            assert_eq!(timestamp, expected, "Timestamp of {fields:?}");

            let back = DateTimeFields::from_timestamp(timestamp, zone, &zones).unwrap();
            assert_eq!(back.civil(), noon.civil(), "Fields of {timestamp}");
        }
    }

    #[test]
    fn converts_between_frames() {
        let zones = StaticTimeZones::new().with_zone(
            "Europe/Berlin",
            [Transition {
                effective: 0,
                offset_before: 3600,
                offset_after: 3600,
                abbreviation: "CET".into(),
                is_dst: false,
            }],
        );
        let utc = DateTimeFields::new(2024, 1, 1, 23, 30, 0)
            .unwrap()
            .with_zone(TimeZoneRef::Utc);
        let berlin = TimeZoneRef::Named("Europe/Berlin".into());
        let local = utc.in_frame(Some(&berlin), &zones).unwrap();
        assert_eq!(local.civil(), date(2024, 1, 2).at(0, 30, 0, 0));
        assert_eq!(local.zone(), Some(&berlin));

        let day = DateTimeFields::date(2024, 1, 1).unwrap();
        assert_eq!(day.in_frame(Some(&berlin), &zones).unwrap(), day);
    }

    #[test]
    fn renders_property_values() {
        let day = DateTimeFields::date(2024, 2, 29).unwrap();
        assert!(day.is_date());
        assert!(matches!(day.to_value(), PropertyValue::Date(_)));

        let next = day.checked_add_seconds(SECONDS_PER_DAY).unwrap();
        assert!(next.is_date());
        assert_eq!(next.civil_date(), date(2024, 3, 1));

        let named = DateTimeFields::new(2024, 2, 29, 9, 15, 0)
            .unwrap()
            .with_zone(TimeZoneRef::Named("Europe/Paris".into()));
        match named.to_value() {
            PropertyValue::DateTime(dt) => {
                assert_eq!(dt.time, ValueTime::new(9, 15, 0));
                assert_eq!(dt.zone, Some(TimeZoneRef::Named("Europe/Paris".into())));
            }
            other => panic!("unexpected value {other:?}"),
        }

        assert!(DateTimeFields::date(2023, 2, 29).is_err());
    }

    #[test]
    fn steps_by_unit() {
        #[rustfmt::skip]
        let cases = [
            (date(2024, 1, 31), StepUnit::Day,   1,  date(2024, 2, 1)),
            (date(2024, 1, 31), StepUnit::Week,  2,  date(2024, 2, 14)),
            (date(2024, 1, 31), StepUnit::Month, 1,  date(2024, 2, 29)),
            (date(2024, 2, 29), StepUnit::Year,  1,  date(2025, 2, 28)),
            (date(2024, 3, 1),  StepUnit::Day,   -1, date(2024, 2, 29)),
        ];
        for (from, unit, amount, expected) in cases {
            assert_eq!(step(from, unit, amount).unwrap(), expected, "Step {from} by {amount} {unit}");
        }
    }

    #[test]
    fn numbers_periods() {
        assert_eq!(epoch_day(date(1970, 1, 1)), 0);
        assert_eq!(epoch_day(date(1969, 12, 31)), -1);

        // 1997-08-05 is a Tuesday
        let tuesday = date(1997, 8, 5);
        assert_eq!(days_since_week_start(tuesday, Weekday::Monday), 1);
        assert_eq!(days_since_week_start(tuesday, Weekday::Sunday), 2);

        let monday_weeks = |d| period_index(d, Frequency::Weekly, Weekday::Monday);
        assert_eq!(monday_weeks(date(1997, 8, 4)), monday_weeks(date(1997, 8, 10)));
        assert_eq!(monday_weeks(date(1997, 8, 11)), monday_weeks(date(1997, 8, 10)) + 1);

        let sunday_weeks = |d| period_index(d, Frequency::Weekly, Weekday::Sunday);
        assert_eq!(sunday_weeks(date(1997, 8, 3)), sunday_weeks(date(1997, 8, 9)));
        assert_eq!(sunday_weeks(date(1997, 8, 10)), sunday_weeks(date(1997, 8, 9)) + 1);

        assert_eq!(
            period_index(date(1998, 1, 15), Frequency::Monthly, Weekday::Monday)
                - period_index(date(1997, 12, 1), Frequency::Monthly, Weekday::Monday),
            1
        );
    }

    #[test]
    fn finds_period_starts() {
        #[rustfmt::skip]
        let cases = [
            (date(1997, 8, 10), Frequency::Weekly,  Weekday::Sunday, 1, date(1997, 8, 17)),
            (date(1997, 8, 10), Frequency::Weekly,  Weekday::Monday, 1, date(1997, 8, 11)),
            (date(1997, 8, 10), Frequency::Weekly,  Weekday::Monday, 0, date(1997, 8, 4)),
            (date(1997, 9, 29), Frequency::Monthly, Weekday::Monday, 2, date(1997, 11, 1)),
            (date(1997, 9, 29), Frequency::Yearly,  Weekday::Monday, 3, date(2000, 1, 1)),
            (date(1997, 9, 29), Frequency::Daily,   Weekday::Monday, 10, date(1997, 10, 9)),
        ];
        for (from, freq, wkst, periods, expected) in cases {
            assert_eq!(
                period_start(from, freq, wkst, periods).unwrap(),
                expected,
                "Start of {freq} period {periods} after {from}"
            );
        }
    }
}
