// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting for iCalendar components, RFC 5545 Section 3.6.

use std::io::{self, Write};

use crate::component::Component;
use crate::formatter::Formatter;
use crate::formatter::property::render_property;
use crate::keyword::{KW_BEGIN, KW_END};

/// Format a component: its properties in order, then its children.
pub(crate) fn write_component<W: Write>(
    f: &mut Formatter<W>,
    component: &Component,
) -> io::Result<()> {
    with_block(f, &component.name, |f| {
        for property in &component.properties {
            f.write_line(&render_property(property))?;
        }
        for child in &component.children {
            write_component(f, child)?;
        }
        Ok(())
    })
}

fn with_block<W: Write, F: FnOnce(&mut Formatter<W>) -> io::Result<()>>(
    f: &mut Formatter<W>,
    name: &str,
    write_content: F,
) -> io::Result<()> {
    f.write_line(&format!("{KW_BEGIN}:{name}"))?;
    write_content(f)?;
    f.write_line(&format!("{KW_END}:{name}"))
}

#[cfg(test)]
mod tests {
    use crate::formatter::{FormatOptions, LineEnding};
    use crate::property::Property;
    use crate::value::PropertyValue;

    use super::*;

    #[test]
    fn writes_nested_blocks() {
        let alarm = Component::new("VALARM")
            .with_property(Property::new("ACTION", PropertyValue::Text("DISPLAY".into())));
        let event = Component::new("VEVENT")
            .with_property(Property::new("UID", PropertyValue::Text("1".into())))
            .with_child(alarm);
        let calendar = Component::new("VCALENDAR")
            .with_property(Property::new("VERSION", PropertyValue::Text("2.0".into())))
            .with_child(event);

        let options = FormatOptions::default().line_ending(LineEnding::Lf);
        let mut f = Formatter::new(Vec::new(), options).unwrap();
        write_component(&mut f, &calendar).unwrap();
        let out = String::from_utf8(f.into_writer()).unwrap();
        assert_eq!(
            out,
            "BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\nUID:1\nBEGIN:VALARM\nACTION:DISPLAY\nEND:VALARM\nEND:VEVENT\nEND:VCALENDAR\n"
        );
    }
}
