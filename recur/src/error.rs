// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types of the recurrence engine.
//!
//! Expansion itself never fails. Errors come from building a
//! [`RecurrenceSet`](crate::RecurrenceSet) out of properties and from date
//! fields that do not exist in the calendar.

use thiserror::Error;

/// Failures while collecting recurrence inputs.
#[derive(Debug, Error)]
pub enum RecurError {
    /// The component has no DTSTART, so there is nothing to recur from.
    #[error("no DTSTART property to recur from")]
    MissingStart,

    /// A property that must hold a date or date-time holds something else.
    #[error("{property} does not hold a usable date: {reason}")]
    InvalidValue {
        /// Property name.
        property: String,
        /// What was found instead.
        reason: String,
    },

    /// Date fields out of range, or arithmetic left the supported range.
    #[error(transparent)]
    Date(#[from] jiff::Error),
}
