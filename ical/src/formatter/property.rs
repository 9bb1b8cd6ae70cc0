// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting for iCalendar properties.
//!
//! A property renders as one logical content line,
//! `NAME[;PARAM=VALUE...]:value`, before folding.

use std::borrow::Cow;

use crate::formatter::parameter::write_parameters;
use crate::formatter::value::encode_value;
use crate::keyword::{KW_BINARY, KW_ENCODING, KW_ENCODING_BASE64, KW_TZID, KW_VALUE};
use crate::parameter::ParameterSet;
use crate::property::Property;
use crate::value::{PropertyValue, TimeZoneRef};

/// Render a property as an unfolded content line.
pub(crate) fn render_property(property: &Property) -> String {
    let value = encode_value(&property.value);
    let mut out = String::with_capacity(property.name.len() + value.len() + 16);
    out.push_str(&property.name);
    write_parameters(&mut out, &effective_parameters(property));
    out.push(':');
    out.push_str(&value);
    out
}

/// The parameters to write: the property's own, plus whatever the value needs
/// to decode back to the same type.
///
/// - `TZID` for a date-time in a named zone
/// - `VALUE` when the value type is not the property's default
/// - `ENCODING=BASE64` and `VALUE=BINARY` for inline binary
fn effective_parameters(property: &Property) -> Cow<'_, ParameterSet> {
    let params = &property.parameters;
    let mut added: Vec<(&str, String)> = Vec::new();

    if !params.contains(KW_TZID)
        && let Some(tzid) = named_zone(&property.value)
    {
        added.push((KW_TZID, tzid.to_string()));
    }

    match &property.value {
        PropertyValue::UnknownRaw(_) | PropertyValue::Unparsed { .. } => {}
        PropertyValue::Binary(_) => {
            if !params.contains(KW_ENCODING) {
                added.push((KW_ENCODING, KW_ENCODING_BASE64.to_string()));
            }
            if !params.contains(KW_VALUE) {
                added.push((KW_VALUE, KW_BINARY.to_string()));
            }
        }
        value => {
            let kind = value.kind();
            let default = property.spec().map(|spec| spec.default_kind);
            if !params.contains(KW_VALUE) && kind.is_value_type() && default != Some(kind) {
                added.push((KW_VALUE, kind.to_string()));
            }
        }
    }

    if added.is_empty() {
        return Cow::Borrowed(params);
    }
    let mut params = params.clone();
    for (name, value) in added {
        params.insert(name, [value]);
    }
    Cow::Owned(params)
}

/// The zone identifier of the first date-time that names one.
fn named_zone(value: &PropertyValue) -> Option<&str> {
    let datetime = match value {
        PropertyValue::DateTime(datetime) => datetime,
        PropertyValue::Period(period) => period.start(),
        PropertyValue::List(items) => return items.iter().find_map(named_zone),
        _ => return None,
    };
    match &datetime.zone {
        Some(TimeZoneRef::Named(tzid)) => Some(tzid),
        _ => None,
    }
}
