// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser plumbing shared by the value codecs, plus the BINARY and BOOLEAN
//! grammars.

use std::fmt;

use chumsky::Parser;
use chumsky::prelude::*;

use crate::error::ValueError;
use crate::keyword::{KW_BOOLEAN_FALSE, KW_BOOLEAN_TRUE};
use crate::value::ValueKind;

/// Parser extra used by every value grammar.
pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A date value was expected
    Date,
    /// A 64-bit floating-point value was expected
    F64,
    /// A 32-bit signed integer value was expected
    I32,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A number was outside the range allowed for its position
    OutOfRange,
}

impl fmt::Display for ValueExpected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueExpected::Date => "invalid date",
            ValueExpected::F64 => "f64 out of range",
            ValueExpected::I32 => "i32 out of range",
            ValueExpected::U32 => "u32 out of range",
            ValueExpected::OutOfRange => "number out of range",
        })
    }
}

/// Runs `parser` over the whole of `src`, rendering chumsky diagnostics into a
/// [`ValueError`] for `expected`.
pub(crate) fn run<'src, O>(
    parser: impl Parser<'src, &'src str, O, Extra<'src>>,
    src: &'src str,
    expected: ValueKind,
) -> Result<O, ValueError> {
    parser
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| {
            let reason = errs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ValueError::new(expected, reason)
        })
}

/// One or more ASCII digits, parsed into an unsigned 32-bit integer.
pub(crate) fn uint<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> {
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map(|str, span| {
            lexical::parse::<u32, _>(&str).map_err(|_| Rich::custom(span, ValueExpected::U32))
        })
}

/// An optionally signed integer, parsed into a signed 32-bit integer.
pub(crate) fn int<'src>() -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    select! { c @ ('+' | '-') => c }
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .at_most(10)
                .collect::<String>(),
        )
        .try_map(|(sign, digits), span| {
            let v = lexical::parse::<i64, _>(&digits)
                .map_err(|_| Rich::custom(span, ValueExpected::I32))?;
            let v = if sign == Some('-') { -v } else { v };
            i32::try_from(v).map_err(|_| Rich::custom(span, ValueExpected::I32))
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// binary     = *(4b-char) [b-end]
/// ; A "BASE64" encoded character string, as defined by [RFC4648].
///
/// b-end      = (2b-char "==") / (3b-char "=")
///
/// b-char = ALPHA / DIGIT / "+" / "/"
/// ```
pub(crate) fn value_binary<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> {
    // b-char = ALPHA / DIGIT / "+" / "/"
    fn b_char<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> {
        select! {
            'A'..='Z' => (),
            'a'..='z' => (),
            '0'..='9' => (),
            '+' => (),
            '/' => (),
        }
    }

    // 4b-char
    let quartet = b_char().repeated().exactly(4).ignored();

    // b-end = (2b-char "==") / (3b-char "=")
    let b_end = choice((
        b_char().repeated().exactly(2).ignored().then_ignore(just("==")),
        b_char().repeated().exactly(3).ignored().then_ignore(just('=')),
    ));

    // *(4b-char) [b-end]
    quartet.repeated().ignore_then(b_end.or_not()).ignored()
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// boolean    = "TRUE" / "FALSE"
/// ```
///
/// Description:  These values are case-insensitive text.  No additional
///    content value encoding (i.e., BACKSLASH character encoding, see
///    Section 3.3.11) is defined for this value type.
pub(crate) fn value_boolean<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> {
    any()
        .filter(|c: &char| c.is_ascii_alphabetic())
        .repeated()
        .at_least(4)
        .at_most(5)
        .collect::<String>()
        .try_map(|word, span| {
            if word.eq_ignore_ascii_case(KW_BOOLEAN_TRUE) {
                Ok(true)
            } else if word.eq_ignore_ascii_case(KW_BOOLEAN_FALSE) {
                Ok(false)
            } else {
                Err(Rich::custom(span, "expected TRUE or FALSE"))
            }
        })
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        pub(crate) fn $fname<'src>() -> impl Parser<'src, &'src str, $ty, Extra<'src>> {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
