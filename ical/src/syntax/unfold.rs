// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line break normalization and unfolding, RFC 5545 Section 3.1.
//!
//! ```txt
//! Lines of text SHOULD NOT be longer than 75 octets, excluding the line
//! break.  Long content lines SHOULD be split into a multiple line
//! representations using a line "folding" technique.  That is, a long
//! line can be split between any two characters by inserting a CRLF
//! immediately followed by a single linear white-space character (i.e.,
//! SPACE or HTAB).
//! ```
//!
//! Producers in the wild also use bare LF or bare CR, so every break variant
//! is accepted.

/// A logical content line after unfolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Unfolded text without the line break.
    pub text: String,
    /// 1-based physical line number where the logical line starts.
    pub line: usize,
}

/// Split `src` into logical lines, unfolding continuation lines.
///
/// Blank lines are dropped. White space opens a continuation only after a
/// line break, so leading white space on the first line is kept.
#[must_use]
pub fn logical_lines(src: &str) -> Vec<LogicalLine> {
    let mut lines: Vec<LogicalLine> = Vec::new();
    for (index, physical) in physical_lines(src).enumerate() {
        if let Some(last) = lines.last_mut()
            && let Some(rest) = physical.strip_prefix([' ', '\t'])
        {
            last.text.push_str(rest);
            continue;
        }
        if !physical.is_empty() {
            lines.push(LogicalLine {
                text: physical.to_string(),
                line: index + 1,
            });
        }
    }
    lines
}

/// Unfold `src` into logical lines joined by `\n`.
#[must_use]
pub fn unfold(src: &str) -> String {
    let lines = logical_lines(src);
    let mut out = String::with_capacity(src.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&line.text);
    }
    out
}

/// Iterate physical lines, splitting on CRLF, LF or CR.
fn physical_lines(src: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(src);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(['\r', '\n']) {
            Some(i) => {
                let (line, tail) = s.split_at(i);
                let tail = tail
                    .strip_prefix("\r\n")
                    .or_else(|| tail.strip_prefix(['\r', '\n']))
                    .unwrap_or(tail);
                rest = (!tail.is_empty()).then_some(tail);
                Some(line)
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_every_break_style() {
        let lines: Vec<_> = physical_lines("A\r\nB\nC\rD").collect();
        assert_eq!(lines, ["A", "B", "C", "D"]);

        let lines: Vec<_> = physical_lines("A\r\n\r\nB\r\n").collect();
        assert_eq!(lines, ["A", "", "B"]);
    }

    #[test]
    fn unfolds_continuation_lines() {
        // example from RFC 5545 Section 3.1
        let src = "DESCRIPTION:This is a lo\r\n ng description\r\n  that exists on a long line.\r\n";
        assert_eq!(
            unfold(src),
            "DESCRIPTION:This is a long description that exists on a long line."
        );

        let tab = "SUMMARY:Hel\n\tlo\nUID:1";
        assert_eq!(unfold(tab), "SUMMARY:Hello\nUID:1");
    }

    #[test]
    fn tracks_physical_line_numbers() {
        let src = "BEGIN:VCALENDAR\r\n\r\nSUMMARY:a\r\n b\r\nEND:VCALENDAR";
        let lines = logical_lines(src);
        let numbers: Vec<_> = lines.iter().map(|l| (l.text.as_str(), l.line)).collect();
        assert_eq!(
            numbers,
            [("BEGIN:VCALENDAR", 1), ("SUMMARY:ab", 3), ("END:VCALENDAR", 5)]
        );
    }

    #[test]
    fn first_line_keeps_leading_white_space() {
        assert_eq!(unfold(" leading space"), " leading space");
        assert_eq!(unfold("\tA\r\n B"), "\tAB");

        let lines = logical_lines("\r\n X:1\r\n 2");
        assert_eq!(lines, [LogicalLine { text: " X:12".into(), line: 2 }]);
    }

    #[test]
    fn unfold_keeps_multibyte_characters() {
        let src = "SUMMARY:caf\u{e9}\r\n \u{1f600}";
        assert_eq!(unfold(src), "SUMMARY:caf\u{e9}\u{1f600}");
    }
}
