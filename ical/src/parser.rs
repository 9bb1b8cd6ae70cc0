// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::component::Component;
use crate::error::{LineError, ParseError};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::parameter::ParameterSet;
use crate::property::Property;
use crate::syntax::{ContentLine, RawComponent, build_tree, logical_lines, scan_line, unfold};

/// Parse iCalendar source into its top-level components
///
/// Malformed lines are skipped; use [`parse_with_diagnostics`] to see them.
///
/// ## Errors
///
/// Fails only when the input holds no `BEGIN`/`END` bracketed component, or a
/// top-level component is never closed.
///
/// ## Examples
///
/// ```
/// # use kalends_ical::parse;
/// let ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendars = parse(ical_src).unwrap();
/// assert_eq!(calendars[0].children[0].name, "VEVENT");
/// ```
pub fn parse(src: &str) -> Result<Vec<Component>, ParseError> {
    parse_with_diagnostics(src).map(|parsed| parsed.components)
}

/// Components together with the problems found on skipped lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Top-level components in source order.
    pub components: Vec<Component>,
    /// Recoverable problems, ordered by line.
    pub diagnostics: Vec<LineError>,
}

/// Parse iCalendar source, keeping line diagnostics.
///
/// ## Errors
///
/// See [`parse`].
#[tracing::instrument(skip_all, fields(bytes = src.len()))]
pub fn parse_with_diagnostics(src: &str) -> Result<Parsed, ParseError> {
    let (lines, mut diagnostics) = scan_all(src);
    let tree = build_tree(lines);
    diagnostics.extend(tree.diagnostics);
    diagnostics.sort_by_key(LineError::line);

    if let Some(open) = tree.unterminated {
        return Err(ParseError::UnterminatedComponent { name: open.name });
    }
    if tree.roots.is_empty() {
        return Err(ParseError::MissingContainer);
    }

    let components = tree.roots.into_iter().map(into_component).collect();
    Ok(Parsed {
        components,
        diagnostics,
    })
}

/// Parse a stream of content lines into properties without building
/// components. `BEGIN` and `END` lines are left out.
#[must_use]
pub fn parse_properties(src: &str) -> (Vec<Property>, Vec<LineError>) {
    let (lines, diagnostics) = scan_all(src);
    let properties = lines
        .into_iter()
        .filter(|line| {
            !line.name.eq_ignore_ascii_case(KW_BEGIN) && !line.name.eq_ignore_ascii_case(KW_END)
        })
        .map(into_property)
        .collect();
    (properties, diagnostics)
}

/// Parse a single content line, which may be folded.
///
/// ## Errors
///
/// Returns the line error if the line cannot be split into name, parameters
/// and value.
pub fn parse_property(line: &str) -> Result<Property, LineError> {
    let text = unfold(line);
    scan_line(&text, 1).map(into_property)
}

fn scan_all(src: &str) -> (Vec<ContentLine>, Vec<LineError>) {
    let mut lines = Vec::new();
    let mut diagnostics = Vec::new();
    for logical in logical_lines(src) {
        match scan_line(&logical.text, logical.line) {
            Ok(mut line) => {
                diagnostics.append(&mut line.diagnostics);
                lines.push(line);
            }
            Err(err) => {
                tracing::warn!(%err, "skipping content line");
                diagnostics.push(err);
            }
        }
    }
    (lines, diagnostics)
}

fn into_component(raw: RawComponent) -> Component {
    Component {
        name: raw.name,
        properties: raw.properties.into_iter().map(into_property).collect(),
        children: raw.children.into_iter().map(into_component).collect(),
    }
}

fn into_property(line: ContentLine) -> Property {
    let mut parameters = ParameterSet::new();
    for param in line.parameters {
        for value in param.values {
            parameters.append(&param.name, value.value);
        }
    }
    Property::decode(&line.name, parameters, &line.value)
}

#[cfg(test)]
mod tests {
    use crate::value::{PropertyValue, ValueKind};

    use super::*;

    #[test]
    fn parses_calendar() {
        let src = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=Europe/Berlin:20240101T090000\r\n\
SUMMARY:New year\\, new plans\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendars = parse(src).unwrap();
        assert_eq!(calendars.len(), 1);
        let event = calendars.first().and_then(|c| c.children.first()).unwrap();
        assert_eq!(
            event.property("SUMMARY").and_then(|p| p.value.as_text()),
            Some("New year, new plans")
        );
        let dtstart = event.property("DTSTART").unwrap();
        assert_eq!(dtstart.parameters.first("TZID"), Some("Europe/Berlin"));
        assert_eq!(dtstart.value.kind(), ValueKind::DateTime);
    }

    #[test]
    fn hard_failures() {
        assert_eq!(parse(""), Err(ParseError::MissingContainer));
        assert_eq!(parse("SUMMARY:x\r\n"), Err(ParseError::MissingContainer));
        assert_eq!(
            parse("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VEVENT\r\n"),
            Err(ParseError::UnterminatedComponent {
                name: "VCALENDAR".to_string()
            })
        );
    }

    #[test]
    fn collects_diagnostics_in_line_order() {
        let src = "\
BEGIN:VCALENDAR\r\n\
garbage line\r\n\
ATTENDEE;RSVP:mailto:a@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let parsed = parse_with_diagnostics(src).unwrap();
        let lines: Vec<_> = parsed.diagnostics.iter().map(LineError::line).collect();
        assert_eq!(lines, [2, 3, 4]);
        let calendar = parsed.components.first().unwrap();
        assert_eq!(calendar.properties.len(), 1, "the attendee survives its bad parameter");
    }

    #[test]
    fn parses_bare_properties() {
        let (properties, diagnostics) =
            parse_properties("BEGIN:VEVENT\nUID:1\nRRULE:FREQ=DAILY;COUNT=2\n:broken\nEND:VEVENT");
        assert_eq!(properties.len(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(properties.get(1).map(|p| p.value.kind()), Some(ValueKind::Recur));
    }

    #[test]
    fn parses_single_folded_property() {
        let property = parse_property("DESCRIPTION:long\r\n  text").unwrap();
        assert_eq!(property.value, PropertyValue::Text("long text".to_string()));
        assert!(parse_property("no separator").is_err());
    }
}
