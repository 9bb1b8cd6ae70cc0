// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! # Content Line Format
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```
//!
//! `paramtext` may not contain a colon, but many producers write URIs and
//! Windows timezone names into unquoted parameter values anyway. A colon
//! inside an unquoted parameter value is therefore kept in the value when it
//! belongs to a URI scheme, an authority (`://`), a port, or a `UTC+hh:mm`
//! style offset.

use std::iter::Peekable;

use crate::error::LineError;
use crate::parameter::is_multi_valued;
use crate::syntax::lexer::{Span, SpannedToken, Token, tokenize};

/// URI schemes whose colon may appear inside an unquoted parameter value.
const URI_SCHEMES: &[&str] = &[
    "mailto", "tel", "fax", "crid", "http", "https", "ftp", "urn", "cid", "mid", "sip", "sips",
    "ldap", "news", "file", "data",
];

/// A scanned content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name as written.
    pub name: String,

    /// Parameters in source order.
    pub parameters: Vec<ScannedParameter>,

    /// Raw value text after the separating colon.
    pub value: String,

    /// 1-based physical line number.
    pub line: usize,

    /// Problems that did not prevent the line from being used, such as a
    /// dropped parameter.
    pub diagnostics: Vec<LineError>,
}

/// A scanned parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedParameter {
    /// Parameter name as written.
    pub name: String,

    /// Values, with surrounding quotes stripped.
    pub values: Vec<ScannedParameterValue>,
}

/// A single scanned parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedParameterValue {
    /// The parameter value
    pub value: String,

    /// Whether the value was quoted in the source
    pub quoted: bool,
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterErrorKind {
    /// Example: `TZID America/New_York`
    MissingEquals,

    /// Example: `;=value`
    EmptyName,

    /// Example: `PARAM="unclosed value`
    UnterminatedQuote,
}

impl ParameterErrorKind {
    const fn message(self) -> &'static str {
        match self {
            ParameterErrorKind::MissingEquals => "missing equals in parameter",
            ParameterErrorKind::EmptyName => "empty parameter name",
            ParameterErrorKind::UnterminatedQuote => "unterminated quoted string",
        }
    }
}

/// Scan one unfolded line.
///
/// # Errors
/// Returns [`LineError::MalformedLine`] when the line has no name or no
/// separating colon, and [`LineError::InvalidParameter`] when a quoted
/// parameter value is never closed.
pub fn scan_line(src: &str, line: usize) -> Result<ContentLine, LineError> {
    let mut tokens = tokenize(src).peekable();
    let malformed = |reason: &str| LineError::MalformedLine {
        line,
        reason: reason.to_string(),
    };

    let name = parse_property_name(src, &mut tokens);
    if name.is_empty() {
        return Err(malformed("missing property name"));
    }

    let mut parameters = Vec::new();
    let mut diagnostics = Vec::new();
    loop {
        match tokens.next() {
            Some(SpannedToken(Token::Colon, span)) => {
                let value = src.get(span.end..).unwrap_or_default().to_string();
                return Ok(ContentLine {
                    name,
                    parameters,
                    value,
                    line,
                    diagnostics,
                });
            }
            Some(SpannedToken(Token::Semicolon, _)) => match parse_parameter(src, &mut tokens) {
                Ok(param) => parameters.push(param),
                Err(ParameterErrorKind::UnterminatedQuote) => {
                    return Err(LineError::InvalidParameter {
                        line,
                        reason: ParameterErrorKind::UnterminatedQuote.message().to_string(),
                    });
                }
                Err(kind) => {
                    tracing::warn!(line, property = %name, reason = kind.message(), "dropping parameter");
                    diagnostics.push(LineError::InvalidParameter {
                        line,
                        reason: kind.message().to_string(),
                    });
                    skip_parameter(&mut tokens);
                }
            },
            Some(SpannedToken(token, _)) => {
                return Err(malformed(&format!("expected ':' after name, found {token}")));
            }
            None => return Err(malformed("missing ':' separator")),
        }
    }
}

/// Collect consecutive Word tokens (names can be hyphenated like "PERCENT-COMPLETE")
fn parse_property_name<'src, I>(src: &'src str, tokens: &mut Peekable<I>) -> String
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut name = String::new();
    while let Some(&SpannedToken(Token::Word(_), span)) = tokens.peek() {
        name.push_str(slice(src, span));
        tokens.next();
    }
    name
}

/// Parse a single parameter.
///
/// Format: `name=value` or `name=value1,value2`
fn parse_parameter<'src, I>(
    src: &'src str,
    tokens: &mut Peekable<I>,
) -> Result<ScannedParameter, ParameterErrorKind>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let name = parse_property_name(src, tokens);
    if name.is_empty() {
        return Err(ParameterErrorKind::EmptyName);
    }

    match tokens.peek() {
        Some(SpannedToken(Token::Equal, _)) => {
            tokens.next();
        }
        _ => return Err(ParameterErrorKind::MissingEquals),
    }

    let split_commas = is_multi_valued(&name.to_ascii_uppercase());
    let mut values = Vec::new();
    loop {
        values.push(parse_parameter_value(src, tokens, split_commas)?);
        match tokens.peek() {
            Some(SpannedToken(Token::Comma, _)) => {
                tokens.next();
            }
            _ => break,
        }
    }

    Ok(ScannedParameter { name, values })
}

/// Parse a single parameter value, quoted or not. An empty unquoted value is
/// allowed.
fn parse_parameter_value<'src, I>(
    src: &'src str,
    tokens: &mut Peekable<I>,
    split_commas: bool,
) -> Result<ScannedParameterValue, ParameterErrorKind>
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    if let Some(SpannedToken(Token::DQuote, _)) = tokens.peek() {
        tokens.next();
        let mut value = String::new();
        loop {
            match tokens.next() {
                Some(SpannedToken(Token::DQuote, _)) => break,
                Some(SpannedToken(_, span)) => value.push_str(slice(src, span)),
                None => return Err(ParameterErrorKind::UnterminatedQuote),
            }
        }
        // text glued to the closing quote stays with the value
        value.push_str(&collect_unquoted(src, tokens, split_commas));
        return Ok(ScannedParameterValue {
            value,
            quoted: true,
        });
    }

    Ok(ScannedParameterValue {
        value: collect_unquoted(src, tokens, split_commas),
        quoted: false,
    })
}

fn collect_unquoted<'src, I>(src: &'src str, tokens: &mut Peekable<I>, split_commas: bool) -> String
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    let mut value = String::new();
    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        match token {
            Token::Semicolon => break,
            Token::Comma if split_commas => break,
            Token::Colon if !colon_in_value(&value, src.get(span.end..).unwrap_or_default()) => {
                break;
            }
            _ => {
                value.push_str(slice(src, span));
                tokens.next();
            }
        }
    }
    value
}

/// Decide whether a colon belongs to an unquoted parameter value, given the
/// value text before it and the line text after it.
fn colon_in_value(before: &str, after: &str) -> bool {
    if URI_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(before)) || after.starts_with("//") {
        return true;
    }

    // host:port inside an authority
    if before.contains("://") {
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if (1..=5).contains(&digits) {
            let next = after.as_bytes().get(digits).copied();
            if matches!(next, None | Some(b'/' | b';' | b',' | b':' | b'"')) {
                return true;
            }
        }
    }

    // (UTC+01:00) and GMT-05:00 style offsets in Windows timezone names
    let after = after.as_bytes();
    let minutes = after.iter().take_while(|b| b.is_ascii_digit()).count();
    if minutes == 2 {
        let bytes = before.as_bytes();
        if let Some(tail) = bytes.len().checked_sub(6).and_then(|i| bytes.get(i..)) {
            let (zone, rest) = tail.split_at(3);
            let is_zone = zone.eq_ignore_ascii_case(b"UTC") || zone.eq_ignore_ascii_case(b"GMT");
            if is_zone
                && matches!(rest.first(), Some(b'+' | b'-'))
                && rest.iter().skip(1).all(u8::is_ascii_digit)
            {
                return true;
            }
        }
    }

    false
}

/// Skip what is left of a dropped parameter, up to the next `;` or `:`.
fn skip_parameter<'src, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = SpannedToken<'src>>,
{
    while let Some(SpannedToken(token, _)) = tokens.peek() {
        if matches!(token, Token::Semicolon | Token::Colon) {
            break;
        }
        tokens.next();
    }
}

fn slice(src: &str, span: Span) -> &str {
    src.get(span.start..span.end).unwrap_or_default()
}
