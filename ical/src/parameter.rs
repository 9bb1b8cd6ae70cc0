// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.
//!
//! Parameter names are case-insensitive and stored upper-case. Values keep
//! their case and are stored without surrounding quotes.

use crate::keyword::{KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_MEMBER};

/// A single parameter with one or more values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Upper-case parameter name.
    pub name: String,
    /// Values, unquoted.
    pub values: Vec<String>,
}

impl Parameter {
    /// The first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Whether a parameter takes a comma-separated list of values.
///
/// RFC 5545 defines MEMBER, DELEGATED-TO and DELEGATED-FROM as lists of
/// quoted calendar addresses. Unknown and `X-` parameters are also split, as
/// their grammar is `param-value *("," param-value)`.
pub(crate) fn is_multi_valued(name: &str) -> bool {
    matches!(name, KW_MEMBER | KW_DELEGATED_TO | KW_DELEGATED_FROM)
        || name.starts_with("X-")
        || !is_known(name)
}

/// Whether each value must be written quoted.
pub(crate) fn always_quoted(name: &str) -> bool {
    matches!(name, KW_MEMBER | KW_DELEGATED_TO | KW_DELEGATED_FROM)
}

fn is_known(name: &str) -> bool {
    use crate::keyword::{
        KW_ALTREP, KW_CN, KW_CUTYPE, KW_DIR, KW_ENCODING, KW_FBTYPE, KW_FMTTYPE, KW_LANGUAGE,
        KW_PARTSTAT, KW_RANGE, KW_RELATED, KW_RELTYPE, KW_ROLE, KW_RSVP, KW_SENT_BY, KW_TZID,
        KW_VALUE,
    };

    matches!(
        name,
        KW_ALTREP
            | KW_CN
            | KW_CUTYPE
            | KW_DELEGATED_FROM
            | KW_DELEGATED_TO
            | KW_DIR
            | KW_ENCODING
            | KW_FBTYPE
            | KW_FMTTYPE
            | KW_LANGUAGE
            | KW_MEMBER
            | KW_PARTSTAT
            | KW_RANGE
            | KW_RELATED
            | KW_RELTYPE
            | KW_ROLE
            | KW_RSVP
            | KW_SENT_BY
            | KW_TZID
            | KW_VALUE
    )
}

/// Ordered mapping from parameter name to values.
///
/// Insertion order is kept for output. Adding a value under an existing name
/// appends to that parameter rather than creating a second entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Number of distinct parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up a parameter by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// First value of a parameter, ignoring case of the name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Parameter::value)
    }

    /// Whether a parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a parameter, replacing any existing values.
    pub fn insert<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.to_ascii_uppercase();
        let values = values.into_iter().map(Into::into).collect();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(param) => param.values = values,
            None => self.params.push(Parameter { name, values }),
        }
    }

    /// Append a value to a parameter, creating it if needed.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_uppercase();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(param) => param.values.push(value.into()),
            None => self.params.push(Parameter {
                name,
                values: vec![value.into()],
            }),
        }
    }

    /// Remove a parameter, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self
            .params
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?;
        Some(self.params.remove(index))
    }

    /// Iterate parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl FromIterator<(String, Vec<String>)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut set = ParameterSet::new();
        for (name, values) in iter {
            for value in values {
                set.append(&name, value);
            }
        }
        set
    }
}
