// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Untyped iCalendar syntax, RFC 5545 Section 3.1.
//!
//! ```text
//! Source Text → Unfold → Logical Lines → Lexer → Scanner → Content Lines → Tree Builder
//! ```

pub mod lexer;
pub mod scanner;
pub mod tree_builder;
pub mod unfold;

pub use scanner::{ContentLine, ScannedParameter, ScannedParameterValue, scan_line};
pub use tree_builder::{RawComponent, TreeBuilderResult, build_tree};
pub use unfold::{LogicalLine, logical_lines, unfold};
