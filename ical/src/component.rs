// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Components bracketed by `BEGIN` and `END` lines.

use crate::property::Property;

/// A component such as VCALENDAR, VEVENT or VTIMEZONE, with its properties
/// and nested components in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    /// Upper-case component name.
    pub name: String,
    /// Properties in order. Names may repeat.
    pub properties: Vec<Property>,
    /// Nested components.
    pub children: Vec<Component>,
}

impl Component {
    /// An empty component. The name is upper-cased.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Append a child component.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// First property with the given name, ignoring case.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties_named(name).next()
    }

    /// All properties with the given name, ignoring case.
    pub fn properties_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Property> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Child components with the given name, ignoring case.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> {
        self.children
            .iter()
            .filter(move |c| c.name.eq_ignore_ascii_case(name))
    }
}
