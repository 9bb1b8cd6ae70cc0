// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and format iCalendar (RFC 5545) content.
//!
//! Parsing turns folded text into [`Component`]s holding typed [`Property`]
//! values; formatting writes them back as folded content lines. Malformed
//! lines and values are kept or skipped instead of failing the whole input.

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
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod component;
mod error;
pub mod formatter;
pub mod keyword;
mod parameter;
mod parser;
mod property;
pub mod property_spec;
pub mod syntax;
pub mod value;

pub use crate::component::Component;
pub use crate::error::{FormatError, LineError, ParseError, ValueError};
pub use crate::formatter::{
    FoldingStyle, FormatOptions, Formatter, LineEnding, MIN_FOLD_WIDTH, encode_value, fold_line,
    format, format_property,
};
pub use crate::parameter::{Parameter, ParameterSet};
pub use crate::parser::{Parsed, parse, parse_properties, parse_property, parse_with_diagnostics};
pub use crate::property::{Property, decode_property_value};
pub use crate::property_spec::{PropertySpec, property_spec};
pub use crate::syntax::unfold;
pub use crate::value::{
    ByRuleKind, ByValue, DateOrDateTime, Frequency, PropertyValue, RecurEnd, RecurSpec,
    TimeZoneRef, ValueDate, ValueDateTime, ValueDuration, ValueGeo, ValueKind, ValuePeriod,
    ValueRequestStatus, ValueTime, ValueUtcOffset, Weekday, WeekdayNum, decode_value,
    escape_text, split_unescaped, unescape_text,
};
