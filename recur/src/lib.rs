// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expand iCalendar recurrence rules into concrete occurrences.
//!
//! A [`RecurrenceSet`] gathers DTSTART, RRULE, EXRULE, RDATE and EXDATE of one
//! component and computes its instances within a [`Window`]. Named time zones
//! are resolved through a [`TimeZoneProvider`] that supplies precomputed
//! transitions.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod config;
pub mod date;
mod engine;
mod error;
mod occurrence;
mod set;
pub mod tables;
pub mod tz;

pub use crate::config::RecurConfig;
pub use crate::date::DateTimeFields;
pub use crate::engine::{Expansion, Termination, expand_rule};
pub use crate::error::RecurError;
pub use crate::occurrence::{Occurrence, OccurrenceSet, Window};
pub use crate::set::{Length, RecurrenceSet};
pub use crate::tz::{StaticTimeZones, TimeZoneProvider, Transition};
