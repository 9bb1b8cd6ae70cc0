// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for INTEGER and FLOAT values (RFC 5545 Section 3.3.7-3.3.8) and the
//! structured GEO and REQUEST-STATUS property values built on them.

use chumsky::Parser;
use chumsky::prelude::*;

use crate::error::ValueError;
use crate::value::ValueKind;
use crate::value::miscellaneous::{Extra, ValueExpected, int, run};
use crate::value::text::{split_unescaped, unescape_text};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
fn value_float<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> {
    let digits = || {
        select! { c @ '0'..='9' => c }
            .repeated()
            .at_least(1)
            .collect::<String>()
    };

    select! { c @ ('+' | '-') => c }
        .or_not()
        .then(digits())
        .then(just('.').ignore_then(digits()).or_not())
        .try_map(|((sign, int_part), frac_part), span| {
            let mut s = String::with_capacity(int_part.len() + 8);
            if let Some(sign) = sign {
                s.push(sign);
            }
            s.push_str(&int_part);
            if let Some(frac) = frac_part {
                s.push('.');
                s.push_str(&frac);
            }

            match lexical::parse::<f64, _>(&s) {
                Ok(f) if f.is_finite() => Ok(f),
                _ => Err(Rich::custom(span, ValueExpected::F64)),
            }
        })
}

/// Decode an INTEGER value.
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
///
/// # Errors
/// Returns an error if the value is not an integer in the 32-bit range.
pub fn decode_integer(raw: &str) -> Result<i32, ValueError> {
    run(int(), raw.trim(), ValueKind::Integer)
}

/// Decode a FLOAT value.
///
/// # Errors
/// Returns an error if the value is not a finite decimal number.
pub fn decode_float(raw: &str) -> Result<f64, ValueError> {
    run(value_float(), raw.trim(), ValueKind::Float)
}

/// Geographic position, RFC 5545 Section 3.8.1.6.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueGeo {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Format Definition:
///
/// ```txt
/// geovalue = float ";" float
/// ;Latitude and Longitude components
/// ```
///
/// A comma is accepted in place of the semicolon.
///
/// # Errors
/// Returns an error unless the value holds exactly two floats.
pub fn decode_geo(raw: &str) -> Result<ValueGeo, ValueError> {
    let parser = value_float()
        .then_ignore(one_of(";,"))
        .then(value_float())
        .map(|(latitude, longitude)| ValueGeo {
            latitude,
            longitude,
        });
    run(parser, raw.trim(), ValueKind::Geo)
}

/// Request status, RFC 5545 Section 3.8.8.3.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRequestStatus {
    /// First two levels of the status code, such as `2.0` or `3.1`.
    pub code: f64,
    /// Third level of a three-level code such as `3.1.1`.
    pub subcode: Option<u32>,
    /// Human-readable status description, unescaped.
    pub description: String,
    /// Optional exception data, unescaped.
    pub extdata: Option<String>,
}

/// Format Definition:
///
/// ```txt
/// rstatus    = statcode ";" statdesc [";" extdata]
///
/// statcode   = 1*DIGIT 1*2("." 1*DIGIT)
/// ;Hierarchical, numeric return status code
///
/// statdesc   = text
/// ;Textual status description
///
/// extdata    = text
/// ;Textual exception data.  For example, the offending property
/// ;name and value or complete property line.
/// ```
///
/// # Errors
/// Returns an error if the code does not have two or three numeric levels or
/// the description is missing.
pub fn decode_request_status(raw: &str) -> Result<ValueRequestStatus, ValueError> {
    let mut parts = split_unescaped(raw, ';').into_iter();
    let code = parts.next().unwrap_or_default();
    let (code, subcode) = run(status_code(), code.trim(), ValueKind::RequestStatus)?;
    let Some(description) = parts.next() else {
        return Err(ValueError::new(
            ValueKind::RequestStatus,
            "missing status description",
        ));
    };

    let rest: Vec<&str> = parts.collect();
    let extdata = (!rest.is_empty()).then(|| unescape_text(&rest.join(";")));
    Ok(ValueRequestStatus {
        code,
        subcode,
        description: unescape_text(description),
        extdata,
    })
}

fn status_code<'src>() -> impl Parser<'src, &'src str, (f64, Option<u32>), Extra<'src>> {
    let level = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits, span| {
            lexical::parse::<u32, _>(&digits).map_err(|_| Rich::custom(span, ValueExpected::U32))
        });
    value_float().then(just('.').ignore_then(level).or_not())
}
