// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed properties: a name, its parameters and a decoded value.

use crate::keyword::{KW_BINARY, KW_ENCODING, KW_ENCODING_BASE64, KW_TZID, KW_VALUE};
use crate::parameter::ParameterSet;
use crate::property_spec::{PropertySpec, property_spec};
use crate::value::{
    DateOrDateTime, PropertyValue, TimeZoneRef, ValueDateTime, ValueKind, ValuePeriod,
    decode_date_or_date_time, decode_value, split_unescaped,
};

/// One named, parameterized, typed value within a component.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Upper-case property name.
    pub name: String,
    /// Property parameters.
    pub parameters: ParameterSet,
    /// Decoded value.
    pub value: PropertyValue,
}

impl Property {
    /// Create a property without parameters. The name is upper-cased.
    #[must_use]
    pub fn new(name: &str, value: PropertyValue) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            parameters: ParameterSet::new(),
            value,
        }
    }

    /// Add a parameter value, merging with an existing parameter of the same
    /// name.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parameters.append(name, value);
        self
    }

    /// The typing of this property, if it is defined by RFC 5545.
    #[must_use]
    pub fn spec(&self) -> Option<&'static PropertySpec> {
        property_spec(&self.name)
    }

    /// Decode a raw value for property `name` into a typed property.
    ///
    /// See [`decode_property_value`].
    #[must_use]
    pub fn decode(name: &str, parameters: ParameterSet, raw: &str) -> Self {
        let value = decode_property_value(name, &parameters, raw);
        Self {
            name: name.to_ascii_uppercase(),
            parameters,
            value,
        }
    }
}

/// Decode the raw text of a property value.
///
/// The value type is taken from the `VALUE` parameter, or else from the
/// property's default. Properties that accept both DATE and DATE-TIME detect
/// the form from the text. A `TZID` parameter is attached to floating
/// date-times. Multi-valued properties are split on unescaped commas.
///
/// Unknown properties without `VALUE`, and `VALUE` types outside RFC 5545,
/// keep the raw text. A value that fails to decode is kept verbatim as
/// [`PropertyValue::Unparsed`] and a warning is logged. In a list only the
/// failing items are kept that way; the others still decode.
#[must_use]
pub fn decode_property_value(name: &str, params: &ParameterSet, raw: &str) -> PropertyValue {
    let spec = property_spec(name);
    let explicit = match params.first(KW_VALUE) {
        Some(value_type) => match value_type.parse::<ValueKind>() {
            Ok(kind) => Some(kind),
            Err(()) => return PropertyValue::UnknownRaw(raw.to_string()),
        },
        None if is_base64(params) => Some(ValueKind::Binary),
        None => None,
    };

    let Some(plan) = Plan::new(spec, explicit) else {
        return PropertyValue::UnknownRaw(raw.to_string());
    };

    let tzid = params.first(KW_TZID);
    let parts = if plan.multiple && !plan.kind.has_structural_commas() {
        split_unescaped(raw, ',')
    } else {
        vec![raw]
    };

    let mut values = Vec::with_capacity(parts.len());
    for part in parts {
        match plan.decode(part) {
            Ok(value) => values.push(attach_zone(value, tzid)),
            Err(reason) => {
                tracing::warn!(property = name, expected = %plan.kind, %reason, "keeping undecodable value verbatim");
                values.push(PropertyValue::Unparsed {
                    raw: part.to_string(),
                    expected: plan.kind,
                    reason,
                });
            }
        }
    }

    match values.len() {
        1 => values.swap_remove(0),
        _ => PropertyValue::List(values),
    }
}

fn is_base64(params: &ParameterSet) -> bool {
    params
        .first(KW_ENCODING)
        .is_some_and(|e| e.eq_ignore_ascii_case(KW_ENCODING_BASE64))
        && params
            .first(KW_VALUE)
            .is_none_or(|v| v.eq_ignore_ascii_case(KW_BINARY))
}

/// How the parts of one value are decoded.
struct Plan {
    kind: ValueKind,
    multiple: bool,
    /// Detect DATE versus DATE-TIME (and PERIOD where allowed) per part.
    detect: bool,
    period_allowed: bool,
}

impl Plan {
    fn new(spec: Option<&PropertySpec>, explicit: Option<ValueKind>) -> Option<Self> {
        match (spec, explicit) {
            (None, None) => None,
            (None, Some(kind)) => Some(Self {
                kind,
                multiple: false,
                detect: false,
                period_allowed: false,
            }),
            (Some(spec), Some(kind)) => Some(Self {
                kind,
                multiple: spec.multiple_valued,
                detect: false,
                period_allowed: false,
            }),
            (Some(spec), None) => Some(Self {
                kind: spec.default_kind,
                multiple: spec.multiple_valued,
                detect: spec.is_date_or_date_time(),
                period_allowed: spec.allowed_kinds.contains(&ValueKind::Period),
            }),
        }
    }

    fn decode(&self, part: &str) -> Result<PropertyValue, String> {
        if self.detect {
            if self.period_allowed && part.contains('/') {
                return decode_value(ValueKind::Period, part).map_err(|e| e.reason);
            }
            return match decode_date_or_date_time(part) {
                Ok(DateOrDateTime::Date(date)) => Ok(PropertyValue::Date(date)),
                Ok(DateOrDateTime::DateTime(dt)) => Ok(PropertyValue::DateTime(dt)),
                Err(e) => Err(e.reason),
            };
        }
        decode_value(self.kind, part).map_err(|e| e.reason)
    }
}

fn attach_zone(value: PropertyValue, tzid: Option<&str>) -> PropertyValue {
    let Some(tzid) = tzid else {
        return value;
    };

    let named = |mut dt: ValueDateTime| {
        if dt.zone.is_none() {
            dt.zone = Some(TimeZoneRef::Named(tzid.to_string()));
        }
        dt
    };
    match value {
        PropertyValue::DateTime(dt) => PropertyValue::DateTime(named(dt)),
        PropertyValue::Period(ValuePeriod::Explicit { start, end }) => {
            PropertyValue::Period(ValuePeriod::Explicit {
                start: named(start),
                end: named(end),
            })
        }
        PropertyValue::Period(ValuePeriod::Duration { start, duration }) => {
            PropertyValue::Period(ValuePeriod::Duration {
                start: named(start),
                duration,
            })
        }
        other => other,
    }
}
