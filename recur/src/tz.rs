// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Time zone transition data.
//!
//! Time zone rules are not computed here. A [`TimeZoneProvider`] hands out
//! precomputed transitions per zone identifier, and the functions below pick
//! the UTC offset that applies to a wall-clock time or to an instant.

use std::collections::HashMap;

/// A change of UTC offset within a time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Unix seconds at which the new offset takes effect.
    pub effective: i64,
    /// Offset east of UTC in seconds before the transition.
    pub offset_before: i32,
    /// Offset east of UTC in seconds from the transition on.
    pub offset_after: i32,
    /// Zone abbreviation in effect after the transition, such as `EDT`.
    pub abbreviation: String,
    /// Whether daylight saving time is in effect after the transition.
    pub is_dst: bool,
}

/// Source of transition data for `TZID` values.
pub trait TimeZoneProvider {
    /// Transitions of the zone `tzid`, sorted by `effective`, or `None` when
    /// the zone is unknown.
    fn transitions(&self, tzid: &str) -> Option<&[Transition]>;
}

impl<T: TimeZoneProvider + ?Sized> TimeZoneProvider for &T {
    fn transitions(&self, tzid: &str) -> Option<&[Transition]> {
        (**self).transitions(tzid)
    }
}

/// In-memory transition tables keyed by zone identifier.
///
/// The default value knows no zones, so every named date-time is treated as
/// floating.
#[derive(Debug, Clone, Default)]
pub struct StaticTimeZones {
    zones: HashMap<String, Vec<Transition>>,
}

impl StaticTimeZones {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the transitions of a zone.
    pub fn insert(
        &mut self,
        tzid: impl Into<String>,
        transitions: impl IntoIterator<Item = Transition>,
    ) {
        let mut transitions: Vec<_> = transitions.into_iter().collect();
        transitions.sort_by_key(|t| t.effective);
        self.zones.insert(tzid.into(), transitions);
    }

    /// Add or replace the transitions of a zone.
    #[must_use]
    pub fn with_zone(
        mut self,
        tzid: impl Into<String>,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> Self {
        self.insert(tzid, transitions);
        self
    }

    /// Add a zone that always has the same offset.
    #[must_use]
    pub fn with_fixed(self, tzid: impl Into<String>, offset: i32, abbreviation: &str) -> Self {
        let always = Transition {
            effective: i64::MIN,
            offset_before: offset,
            offset_after: offset,
            abbreviation: abbreviation.to_string(),
            is_dst: false,
        };
        self.with_zone(tzid, [always])
    }
}

impl TimeZoneProvider for StaticTimeZones {
    fn transitions(&self, tzid: &str) -> Option<&[Transition]> {
        self.zones.get(tzid).map(Vec::as_slice)
    }
}

/// The transition in effect at an instant, if any has taken effect yet.
#[must_use]
pub fn transition_at(transitions: &[Transition], timestamp: i64) -> Option<&Transition> {
    let after = transitions.partition_point(|t| t.effective <= timestamp);
    after.checked_sub(1).and_then(|i| transitions.get(i))
}

/// The offset in effect at an instant.
#[must_use]
pub fn offset_at_instant(transitions: &[Transition], timestamp: i64) -> i32 {
    match transition_at(transitions, timestamp) {
        Some(t) => t.offset_after,
        None => transitions.first().map_or(0, |t| t.offset_before),
    }
}

/// The offset for a wall-clock time, given as seconds since the epoch as if
/// the wall clock were UTC.
///
/// A time repeated by a backward transition resolves to its earlier
/// instant. A time skipped by a forward transition is read with the offset
/// before the gap, landing after it.
#[must_use]
pub fn offset_for_local(transitions: &[Transition], local: i64) -> i32 {
    let applies = |t: &Transition| t.effective <= local.saturating_sub(i64::from(t.offset_after));
    let Some(t) = transitions.iter().rev().find(|t| applies(t)) else {
        return transitions.first().map_or(0, |t| t.offset_before);
    };
    if local.saturating_sub(i64::from(t.offset_before)) < t.effective {
        t.offset_before
    } else {
        t.offset_after
    }
}
