// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::collections::btree_map;

use kalends_ical::{Property, PropertyValue};

use crate::date::DateTimeFields;

/// A query range in Unix seconds. Both ends are inclusive and either may be
/// open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    start: Option<i64>,
    end: Option<i64>,
}

impl Window {
    /// A window from `start` to `end`.
    #[must_use]
    pub const fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// A window without bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// A window open towards the future.
    #[must_use]
    pub const fn starting(start: i64) -> Self {
        Self::new(Some(start), None)
    }

    /// A window open towards the past.
    #[must_use]
    pub const fn until(end: i64) -> Self {
        Self::new(None, Some(end))
    }

    /// The lower bound, if any.
    #[must_use]
    pub const fn start(&self) -> Option<i64> {
        self.start
    }

    /// The upper bound, if any.
    #[must_use]
    pub const fn end(&self) -> Option<i64> {
        self.end
    }

    /// Whether `timestamp` lies within the window.
    #[must_use]
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start.is_none_or(|start| start <= timestamp)
            && self.end.is_none_or(|end| timestamp <= end)
    }

    /// The same window grown by `seconds` on both bounded ends.
    #[must_use]
    pub fn widened(&self, seconds: i64) -> Self {
        Self {
            start: self.start.map(|start| start.saturating_sub(seconds)),
            end: self.end.map(|end| end.saturating_add(seconds)),
        }
    }
}

/// One concrete instance of a recurring component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Start, in the frame of DTSTART
    pub start: DateTimeFields,
    /// Unix seconds of `start`
    pub timestamp: i64,
    /// Length in seconds, when the component has one
    pub duration: Option<i64>,
}

impl Occurrence {
    /// An occurrence without a known length.
    #[must_use]
    pub const fn new(start: DateTimeFields, timestamp: i64) -> Self {
        Self {
            start,
            timestamp,
            duration: None,
        }
    }

    /// Unix seconds of the end, when the length is known.
    #[must_use]
    pub fn end_timestamp(&self) -> Option<i64> {
        self.duration.map(|d| self.timestamp.saturating_add(d))
    }

    /// Wall-clock end in the frame of the start, when the length is known.
    #[must_use]
    pub fn end(&self) -> Option<DateTimeFields> {
        let duration = self.duration?;
        self.start.checked_add_seconds(duration).ok()
    }

    /// Properties describing this instance as the `n`th of its series.
    ///
    /// `X-RECURRENCE` holds the 1-based position, `X-CURRENT-DTSTART` the start
    /// and `X-CURRENT-DTEND` the end when the length is known.
    #[must_use]
    pub fn provenance(&self, n: usize) -> Vec<Property> {
        let mut props = vec![
            Property::new("X-RECURRENCE", PropertyValue::UnknownRaw(n.to_string())),
            Property::new("X-CURRENT-DTSTART", self.start.to_value()),
        ];
        if let Some(end) = self.end() {
            props.push(Property::new("X-CURRENT-DTEND", end.to_value()));
        }
        props
    }
}

/// Occurrences ordered and deduplicated by start instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceSet {
    by_start: BTreeMap<i64, Occurrence>,
}

impl OccurrenceSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an occurrence unless one already starts at the same instant.
    /// Returns whether it was added.
    pub fn insert(&mut self, occurrence: Occurrence) -> bool {
        match self.by_start.entry(occurrence.timestamp) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(occurrence);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Drop every occurrence for which `excluded` returns `true`.
    pub fn remove_where(&mut self, mut excluded: impl FnMut(&Occurrence) -> bool) {
        self.by_start.retain(|_, occurrence| !excluded(occurrence));
    }

    /// Number of occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    /// Whether the set holds no occurrence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// Occurrences in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Occurrence> {
        self.by_start.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Occurrence> {
        self.by_start.values_mut()
    }

    /// Occurrences in start order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Occurrence> {
        self.by_start.into_values().collect()
    }
}

impl Extend<Occurrence> for OccurrenceSet {
    fn extend<I: IntoIterator<Item = Occurrence>>(&mut self, iter: I) {
        for occurrence in iter {
            self.insert(occurrence);
        }
    }
}

impl FromIterator<Occurrence> for OccurrenceSet {
    fn from_iter<I: IntoIterator<Item = Occurrence>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for OccurrenceSet {
    type Item = Occurrence;
    type IntoIter = btree_map::IntoValues<i64, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_start.into_values()
    }
}
