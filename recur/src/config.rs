// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Limits applied while expanding recurrence rules.
///
/// Deserializable so an application can keep them in its own config file:
///
/// ```toml
/// horizon_years = 2
/// max_candidates = 500000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct RecurConfig {
    /// How far past the end of the query window, or past DTSTART for an
    /// open window, a rule without COUNT or UNTIL is expanded.
    ///
    /// Default: `1`.
    pub horizon_years: u16,

    /// Upper bound on the candidate dates stepped through in one expansion.
    ///
    /// Default: `1_000_000`.
    pub max_candidates: usize,
}

impl Default for RecurConfig {
    fn default() -> Self {
        Self {
            horizon_years: 1,
            max_candidates: 1_000_000,
        }
    }
}

impl RecurConfig {
    /// Set the emergency horizon.
    #[must_use]
    pub const fn horizon_years(mut self, years: u16) -> Self {
        self.horizon_years = years;
        self
    }

    /// Set the candidate ceiling.
    #[must_use]
    pub const fn max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }
}
