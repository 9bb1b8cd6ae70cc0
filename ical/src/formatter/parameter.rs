// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parameter formatting for iCalendar parameters.
//!
//! This module writes parameters as defined in RFC 5545 Section 3.2, each
//! prefixed with a semicolon: `;NAME=value[,value]`.

use std::borrow::Cow;

use crate::parameter::{ParameterSet, always_quoted};

/// Format all parameters, each prefixed with a semicolon.
pub(crate) fn write_parameters(out: &mut String, parameters: &ParameterSet) {
    for param in parameters {
        out.push(';');
        out.push_str(&param.name);
        out.push('=');
        let force = always_quoted(&param.name);
        for (i, value) in param.values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&quote_if_needed(value, force));
        }
    }
}

/// Quote a parameter value that holds `:`, `;` or `,`, or that must always be
/// quoted. A value that is already quoted is written as is.
///
/// A parameter value cannot contain DQUOTE, so inner quotes become `'`.
fn quote_if_needed(value: &str, force: bool) -> Cow<'_, str> {
    let already_quoted = value.len() >= 2 && value.starts_with('"') && value.ends_with('"');
    if already_quoted {
        return Cow::Borrowed(value);
    }

    let needs_quoting = force || value.contains([':', ';', ',']);
    let value = if value.contains('"') {
        Cow::Owned(value.replace('"', "'"))
    } else {
        Cow::Borrowed(value)
    };
    if needs_quoting {
        Cow::Owned(format!("\"{value}\""))
    } else {
        value
    }
}
