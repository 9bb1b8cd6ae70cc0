// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder turning flat content lines into nested components.

use crate::error::LineError;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::scanner::ContentLine;

/// A component with its content lines, not yet typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComponent {
    /// Upper-case component name (e.g., "VCALENDAR", "VEVENT")
    pub name: String,
    /// Property lines in original order
    pub properties: Vec<ContentLine>,
    /// Nested child components
    pub children: Vec<RawComponent>,
    /// Line number of the `BEGIN` line
    pub line: usize,
}

/// Result of building a tree.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilderResult {
    /// The closed top-level components (typically one VCALENDAR)
    pub roots: Vec<RawComponent>,
    /// A top-level component left open at the end of input
    pub unterminated: Option<RawComponent>,
    /// Lines that were skipped
    pub diagnostics: Vec<LineError>,
}

/// Build a component tree from content lines.
///
/// # Algorithm
///
/// 1. On BEGIN:X, push a new component onto the stack
/// 2. On property, add it to the component on top of the stack
/// 3. On END:X, pop the matching component and add it to its parent. When X
///    names an ancestor instead, the components opened after it are closed
///    first
/// 4. An END naming no open component, or a property outside any component,
///    is skipped with a diagnostic
#[must_use]
pub fn build_tree(lines: impl IntoIterator<Item = ContentLine>) -> TreeBuilderResult {
    let mut stack: Vec<RawComponent> = Vec::new();
    let mut result = TreeBuilderResult::default();

    for line in lines {
        if line.name.eq_ignore_ascii_case(KW_BEGIN) {
            stack.push(RawComponent {
                name: line.value.trim().to_ascii_uppercase(),
                properties: Vec::new(),
                children: Vec::new(),
                line: line.line,
            });
        } else if line.name.eq_ignore_ascii_case(KW_END) {
            let found = line.value.trim().to_ascii_uppercase();
            let Some(depth) = stack.iter().rposition(|c| c.name == found) else {
                tracing::warn!(line = line.line, name = %found, "skipping unmatched END");
                result.diagnostics.push(LineError::UnbalancedComponent {
                    line: line.line,
                    expected: stack.last().map(|c| c.name.clone()).unwrap_or_default(),
                    found,
                });
                continue;
            };

            while stack.len() > depth {
                let Some(component) = stack.pop() else { break };
                if component.name != found {
                    tracing::warn!(line = line.line, name = %component.name, "closing component implicitly");
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(component),
                    None => result.roots.push(component),
                }
            }
        } else if let Some(current) = stack.last_mut() {
            current.properties.push(line);
        } else {
            tracing::warn!(line = line.line, name = %line.name, "skipping property outside of any component");
            result.diagnostics.push(LineError::OrphanProperty {
                line: line.line,
                name: line.name,
            });
        }
    }

    // close nested components so the open top-level one keeps its content
    while let Some(component) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(component),
            None => result.unterminated = Some(component),
        }
    }
    tracing::debug!(roots = result.roots.len(), skipped = result.diagnostics.len(), "built component tree");
    result
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use crate::syntax::scanner::scan_line;
    use crate::syntax::unfold::logical_lines;

    use super::*;

    fn scan_and_build(src: &str) -> TreeBuilderResult {
        let lines = logical_lines(src)
            .into_iter()
            .filter_map(|l| scan_line(&l.text, l.line).ok());
        build_tree(lines)
    }

    #[test]
    fn builds_simple_calendar() {
        let result = scan_and_build("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
        assert!(result.diagnostics.is_empty());
        assert!(result.unterminated.is_none());
        assert_eq!(result.roots.len(), 1);
        assert_eq!(result.roots[0].name, "VCALENDAR");
        assert_eq!(result.roots[0].properties.len(), 1);
    }

    #[test]
    fn builds_nested_components() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Event\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";
        let result = scan_and_build(src);
        assert!(result.diagnostics.is_empty());
        let calendar = &result.roots[0];
        assert_eq!(calendar.children.len(), 2);
        assert_eq!(calendar.children[0].name, "VEVENT");
        assert_eq!(calendar.children[0].children[0].name, "VALARM");
        assert_eq!(calendar.children[1].name, "VTODO");
    }

    #[test]
    fn names_are_case_insensitive() {
        let result = scan_and_build("begin:vcalendar\r\nEND:VCalendar\r\n");
        assert_eq!(result.roots.len(), 1);
        assert_eq!(result.roots[0].name, "VCALENDAR");
    }

    #[test]
    fn skips_unmatched_end() {
        let result = scan_and_build("BEGIN:VCALENDAR\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n");
        assert_eq!(result.roots.len(), 1);
        assert_eq!(
            result.diagnostics,
            [LineError::UnbalancedComponent {
                line: 2,
                expected: "VCALENDAR".to_string(),
                found: "VEVENT".to_string(),
            }]
        );
    }

    #[test]
    fn closes_children_when_ancestor_ends() {
        let src = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:x\r\nEND:VCALENDAR\r\n";
        let result = scan_and_build(src);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.roots[0].children.len(), 1);
        assert_eq!(result.roots[0].children[0].properties.len(), 1);
    }

    #[test]
    fn reports_unterminated_component() {
        let result = scan_and_build("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:x\r\n");
        assert!(result.roots.is_empty());
        let open = result.unterminated.unwrap();
        assert_eq!(open.name, "VCALENDAR");
        assert_eq!(open.children.len(), 1);
    }

    #[test]
    fn skips_orphan_properties() {
        let result = scan_and_build("VERSION:2.0\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
        assert_eq!(result.roots.len(), 1);
        assert!(matches!(
            result.diagnostics.as_slice(),
            [LineError::OrphanProperty { line: 1, .. }]
        ));
    }
}
