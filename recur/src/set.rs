// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::civil::Date;
use kalends_ical::{Component, Property, PropertyValue, RecurSpec};

use crate::config::RecurConfig;
use crate::date::DateTimeFields;
use crate::engine::{Expander, expand_rule};
use crate::error::RecurError;
use crate::occurrence::{Occurrence, OccurrenceSet, Window};
use crate::tz::TimeZoneProvider;

const SECONDS_PER_DAY: i64 = 86_400;

/// How long each instance lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Length {
    /// Until DTEND or DUE of the first instance
    End(DateTimeFields),
    /// A fixed DURATION in seconds
    Duration(i64),
}

/// The recurrence properties of one component: DTSTART, the rules and the
/// explicit dates added to and removed from the series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSet {
    start: DateTimeFields,
    length: Option<Length>,
    rrules: Vec<RecurSpec>,
    exrules: Vec<RecurSpec>,
    rdates: Vec<(DateTimeFields, Option<i64>)>,
    exdates: Vec<DateTimeFields>,
}

impl RecurrenceSet {
    /// A series that so far consists of `start` alone.
    #[must_use]
    pub fn new(start: DateTimeFields) -> Self {
        Self {
            start,
            length: None,
            rrules: Vec::new(),
            exrules: Vec::new(),
            rdates: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Collect DTSTART, DTEND, DUE, DURATION, RRULE, EXRULE, RDATE and
    /// EXDATE from the properties of a component.
    ///
    /// Rules that failed to decode, and list items of the wrong type, are
    /// skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if DTSTART is missing or does not hold a date.
    pub fn from_properties(properties: &[Property]) -> Result<Self, RecurError> {
        let named = |name: &'static str| {
            properties
                .iter()
                .filter(move |p| p.name.eq_ignore_ascii_case(name))
        };

        let start = named("DTSTART")
            .next()
            .ok_or(RecurError::MissingStart)
            .and_then(|p| date_of(p, &p.value))?;
        let mut set = Self::new(start);

        if let Some(p) = named("DTEND").chain(named("DUE")).next() {
            set.length = Some(Length::End(date_of(p, &p.value)?));
        } else if let Some(p) = named("DURATION").next() {
            match &p.value {
                PropertyValue::Duration(duration) => {
                    set.length = Some(Length::Duration(duration.as_seconds()));
                }
                other => tracing::warn!(kind = %other.kind(), "ignoring DURATION that is not a duration"),
            }
        }

        for (name, rules) in [("RRULE", &mut set.rrules), ("EXRULE", &mut set.exrules)] {
            for p in named(name) {
                match &p.value {
                    PropertyValue::Recur(rule) => rules.push(rule.clone()),
                    other => tracing::warn!(property = name, kind = %other.kind(), "skipping rule that did not decode"),
                }
            }
        }

        for p in named("RDATE") {
            for item in p.value.items() {
                match item {
                    PropertyValue::Period(period) => {
                        let start = DateTimeFields::from_date_time(period.start())?;
                        set.rdates.push((start, period.length_seconds()));
                    }
                    PropertyValue::Date(_) | PropertyValue::DateTime(_) => {
                        set.rdates.push((date_of(p, item)?, None));
                    }
                    other => tracing::warn!(kind = %other.kind(), "skipping RDATE item"),
                }
            }
        }

        for p in named("EXDATE") {
            for item in p.value.items() {
                match item {
                    PropertyValue::Date(_) | PropertyValue::DateTime(_) => {
                        set.exdates.push(date_of(p, item)?);
                    }
                    other => tracing::warn!(kind = %other.kind(), "skipping EXDATE item"),
                }
            }
        }

        Ok(set)
    }

    /// Collect the recurrence properties of `component`.
    ///
    /// # Errors
    /// Returns an error if DTSTART is missing or does not hold a date.
    pub fn from_component(component: &Component) -> Result<Self, RecurError> {
        Self::from_properties(&component.properties)
    }

    /// Give every instance the length from DTSTART to `end`.
    #[must_use]
    pub fn with_end(mut self, end: DateTimeFields) -> Self {
        self.length = Some(Length::End(end));
        self
    }

    /// Give every instance a fixed length in seconds.
    #[must_use]
    pub fn with_duration(mut self, seconds: i64) -> Self {
        self.length = Some(Length::Duration(seconds));
        self
    }

    /// Add an RRULE.
    #[must_use]
    pub fn with_rrule(mut self, rule: RecurSpec) -> Self {
        self.rrules.push(rule);
        self
    }

    /// Add an EXRULE.
    #[must_use]
    pub fn with_exrule(mut self, rule: RecurSpec) -> Self {
        self.exrules.push(rule);
        self
    }

    /// Add an RDATE instance.
    #[must_use]
    pub fn with_rdate(mut self, date: DateTimeFields) -> Self {
        self.rdates.push((date, None));
        self
    }

    /// Add an RDATE period with its own length in seconds.
    #[must_use]
    pub fn with_rdate_period(mut self, start: DateTimeFields, seconds: i64) -> Self {
        self.rdates.push((start, Some(seconds)));
        self
    }

    /// Add an EXDATE; it removes every instance on the same day.
    #[must_use]
    pub fn with_exdate(mut self, date: DateTimeFields) -> Self {
        self.exdates.push(date);
        self
    }

    /// DTSTART.
    #[must_use]
    pub const fn start(&self) -> &DateTimeFields {
        &self.start
    }

    /// The rules adding instances.
    #[must_use]
    pub fn rrules(&self) -> &[RecurSpec] {
        &self.rrules
    }

    /// The rules removing instances.
    #[must_use]
    pub fn exrules(&self) -> &[RecurSpec] {
        &self.exrules
    }

    /// Length of an instance in seconds, when the component has one.
    #[must_use]
    pub fn duration(&self, provider: &dyn TimeZoneProvider) -> Option<i64> {
        match &self.length {
            None => None,
            Some(Length::Duration(seconds)) => Some(*seconds),
            Some(Length::End(end)) => {
                Some(end.to_timestamp(provider) - self.start.to_timestamp(provider))
            }
        }
    }

    /// The instances of the series within `window`, ascending and without
    /// duplicate start instants.
    ///
    /// RRULE instances and RDATEs are merged, then every instance falling on
    /// a day excluded by an EXDATE or an EXRULE instance is removed. Days are
    /// compared in the frame of DTSTART.
    #[tracing::instrument(skip_all, fields(rrules = self.rrules.len(), window = ?window))]
    pub fn occurrences(
        &self,
        window: Window,
        provider: &dyn TimeZoneProvider,
        config: RecurConfig,
    ) -> OccurrenceSet {
        let mut set = OccurrenceSet::new();

        if self.rrules.is_empty() {
            let timestamp = self.start.to_timestamp(provider);
            if window.contains(timestamp) {
                set.insert(Occurrence::new(self.start.clone(), timestamp));
            }
        }
        for rule in &self.rrules {
            let expansion = expand_rule(rule, &self.start, window, provider, config);
            set.extend(expansion.occurrences);
        }

        for (date, duration) in &self.rdates {
            let timestamp = date.to_timestamp(provider);
            if window.contains(timestamp) {
                set.insert(Occurrence {
                    start: date.clone(),
                    timestamp,
                    duration: *duration,
                });
            }
        }

        let excluded = self.excluded_days(window, provider, config);
        if !excluded.is_empty() {
            let before = set.len();
            set.remove_where(|o| excluded.contains(&self.local_day(&o.start, provider)));
            tracing::debug!(removed = before - set.len(), "applied exceptions");
        }

        let default = self.duration(provider);
        for occurrence in set.iter_mut() {
            occurrence.duration = occurrence.duration.or(default);
        }
        set
    }

    /// Days removed from the series by EXDATE and EXRULE.
    fn excluded_days(
        &self,
        window: Window,
        provider: &dyn TimeZoneProvider,
        config: RecurConfig,
    ) -> HashSet<Date> {
        let mut days: HashSet<Date> = self
            .exdates
            .iter()
            .map(|date| self.local_day(date, provider))
            .collect();

        // a day at the window edge may start before or after the edge itself
        let widened = window.widened(SECONDS_PER_DAY);
        for rule in &self.exrules {
            let expansion = Expander::new(rule, &self.start, widened, provider, config)
                .include_start(false)
                .run();
            days.extend(
                expansion
                    .occurrences
                    .iter()
                    .map(|o| self.local_day(&o.start, provider)),
            );
        }
        days
    }

    fn local_day(&self, date: &DateTimeFields, provider: &dyn TimeZoneProvider) -> Date {
        date.in_frame(self.start.zone(), provider)
            .map_or_else(|_| date.civil_date(), |fields| fields.civil_date())
    }
}

fn date_of(property: &Property, value: &PropertyValue) -> Result<DateTimeFields, RecurError> {
    match value.as_date_or_date_time() {
        Some(date) => DateTimeFields::from_value(&date),
        None => Err(RecurError::InvalidValue {
            property: property.name.clone(),
            reason: format!("found a {} value", value.kind()),
        }),
    }
}
