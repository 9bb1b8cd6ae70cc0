// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types of the iCalendar codec.
//!
//! Only [`ParseError`] aborts a parse. Everything else is recoverable: a
//! [`LineError`] is reported as a diagnostic and the line is skipped, and a
//! [`ValueError`] makes the parser keep the raw text as
//! [`PropertyValue::Unparsed`](crate::PropertyValue::Unparsed).

use std::io;

use thiserror::Error;

use crate::value::ValueKind;

/// Hard failures of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input holds no `BEGIN`/`END` bracketed component at all.
    #[error("no top-level BEGIN/END component found")]
    MissingContainer,

    /// The input ended while a top-level component was still open.
    #[error("component {name} is never closed")]
    UnterminatedComponent {
        /// Name of the top-level component left open.
        name: String,
    },
}

/// Recoverable failure on a single content line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line has no name or no name/value separator. It is skipped.
    #[error("line {line}: malformed content line: {reason}")]
    MalformedLine {
        /// 1-based physical line number where the logical line starts.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A parameter could not be split into a name and values. An unterminated
    /// quote skips the whole line; otherwise only the parameter is dropped.
    #[error("line {line}: invalid parameter: {reason}")]
    InvalidParameter {
        /// 1-based physical line number where the logical line starts.
        line: usize,
        /// What was wrong with the parameter.
        reason: String,
    },

    /// An `END` line names no open component. The line is skipped.
    #[error("line {line}: expected END:{expected}, found END:{found}")]
    UnbalancedComponent {
        /// 1-based physical line number of the `END` line.
        line: usize,
        /// Name of the innermost open component, empty at top level.
        expected: String,
        /// Name found on the `END` line.
        found: String,
    },

    /// A property line appears outside of any component. It is skipped.
    #[error("line {line}: property {name} outside of any component")]
    OrphanProperty {
        /// 1-based physical line number of the property.
        line: usize,
        /// Property name.
        name: String,
    },
}

impl LineError {
    /// Physical line number the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            LineError::MalformedLine { line, .. }
            | LineError::InvalidParameter { line, .. }
            | LineError::UnbalancedComponent { line, .. }
            | LineError::OrphanProperty { line, .. } => *line,
        }
    }
}

/// A value does not match the grammar implied by its `VALUE=` parameter or
/// property name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {expected} value: {reason}")]
pub struct ValueError {
    /// The value type that was expected.
    pub expected: ValueKind,
    /// Rendered parser diagnostics.
    pub reason: String,
}

impl ValueError {
    pub(crate) fn new(expected: ValueKind, reason: impl Into<String>) -> Self {
        Self {
            expected,
            reason: reason.into(),
        }
    }
}

/// Failures while writing formatted output.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The underlying writer failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The folding width cannot hold the continuation prefix plus one
    /// character.
    #[error("folding width {width} is too small, at least {minimum} octets are required")]
    FoldingOverflow {
        /// Configured folding width.
        width: usize,
        /// Smallest usable folding width.
        minimum: usize,
    },
}
