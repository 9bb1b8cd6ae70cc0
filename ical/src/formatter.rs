// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module renders components and properties to the RFC 5545 text format,
//! writing to any `std::io::Write` implementer. Logical lines are folded at a
//! configurable octet width without splitting a UTF-8 sequence or a text
//! escape pair.
//!
//! # Example
//!
//! ```
//! use kalends_ical::{Component, Property, PropertyValue, format};
//!
//! let event = Component::new("VEVENT")
//!     .with_property(Property::new("SUMMARY", PropertyValue::Text("Lunch; with Bob".into())));
//! let calendar = Component::new("VCALENDAR").with_child(event);
//!
//! let ics = format(&[calendar]).unwrap();
//! assert!(ics.contains("SUMMARY:Lunch\\; with Bob\r\n"));
//! ```

mod component;
mod parameter;
mod property;
mod value;

use std::io::{self, Write};

use crate::component::Component;
use crate::error::FormatError;
use crate::formatter::component::write_component;
use crate::formatter::property::render_property;
use crate::property::Property;

pub use crate::formatter::value::encode_value;

/// Smallest fold width that fits the continuation prefix and the longest
/// unit that is never split: a backslash followed by a four-byte character.
pub const MIN_FOLD_WIDTH: usize = 6;

/// Format components to a `String` with default options.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
pub fn format(components: &[Component]) -> Result<String, FormatError> {
    FormatOptions::default().format(components)
}

/// Render a single property as a folded content line, without the trailing
/// line break, using default options.
#[must_use]
pub fn format_property(property: &Property) -> String {
    fold_line(&render_property(property), &FormatOptions::default())
}

/// Formatting options for the iCalendar formatter.
///
/// Deserializable so an application can keep them in its own config file:
///
/// ```toml
/// folding = 75
/// folding_style = "tab"
/// line_ending = "lf"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (line break + SPACE).
    pub folding_style: FoldingStyle,

    /// Line break written after every physical line.
    ///
    /// Default: `LineEnding::Crlf`.
    pub line_ending: LineEnding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
            line_ending: LineEnding::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Set the line ending.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Check that the options can be honored.
    ///
    /// # Errors
    /// Returns [`FormatError::FoldingOverflow`] if the fold width is smaller
    /// than [`MIN_FOLD_WIDTH`].
    pub fn validate(&self) -> Result<(), FormatError> {
        match self.folding {
            Some(width) if width < MIN_FOLD_WIDTH => Err(FormatError::FoldingOverflow {
                width,
                minimum: MIN_FOLD_WIDTH,
            }),
            _ => Ok(()),
        }
    }

    /// Write components to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if the options are invalid or writing fails.
    pub fn write(&self, components: &[Component], w: &mut impl Write) -> Result<(), FormatError> {
        let mut formatter = Formatter::new(w, *self)?;
        for component in components {
            formatter.write_component(component)?;
        }
        formatter.flush()?;
        Ok(())
    }

    /// Write components to a `String`.
    ///
    /// # Errors
    /// Returns an error if the options are invalid or writing fails.
    pub fn format(&self, components: &[Component]) -> Result<String, FormatError> {
        let mut buffer = Vec::new();
        self.write(components, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| FormatError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with a line break
/// followed by a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldingStyle {
    /// Line break + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// Line break + TAB
    Tab,
}

impl FoldingStyle {
    /// The white-space character that starts a continuation line.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Tab => '\t',
        }
    }
}

/// Line break used between physical lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// CRLF, as RFC 5545 requires
    #[default]
    Crlf,
    /// Bare LF
    Lf,
}

impl LineEnding {
    /// The line break sequence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Fold a logical line into physical lines joined by the configured line
/// break and folding character. The result has no trailing line break.
///
/// Widths count octets. A multi-byte character or a backslash escape pair
/// such as `\n` always stays on one physical line. A continuation line starts
/// with one white-space octet that counts towards the width.
#[must_use]
pub fn fold_line(line: &str, options: &FormatOptions) -> String {
    let Some(width) = options.folding else {
        return line.to_string();
    };
    let ending = options.line_ending.as_str();
    let fold_char = options.folding_style.as_char();

    let mut out = String::with_capacity(line.len() + line.len() / width.max(1) * 3);
    let mut length = 0;
    for unit in (FoldUnits { rest: line }) {
        if length > 0 && length + unit.len() > width {
            out.push_str(ending);
            out.push(fold_char);
            length = 1;
        }
        out.push_str(unit);
        length += unit.len();
    }
    out
}

/// Splits a line into units that folding must keep together: an escape pair
/// or a single character.
struct FoldUnits<'a> {
    rest: &'a str,
}

impl<'a> Iterator for FoldUnits<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;
        let end = match (first, chars.next()) {
            ('\\', Some((i, c))) => i + c.len_utf8(),
            _ => first.len_utf8(),
        };
        let (unit, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(unit)
    }
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// # Example
///
/// ```
/// use kalends_ical::{Component, FormatOptions, Formatter};
///
/// let mut buffer = Vec::new();
/// let mut formatter = Formatter::new(&mut buffer, FormatOptions::default()).unwrap();
/// formatter.write_component(&Component::new("VCALENDAR")).unwrap();
/// assert_eq!(buffer, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
/// ```
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    ///
    /// # Errors
    /// Returns an error if the options fail [`FormatOptions::validate`].
    pub fn new(writer: W, options: FormatOptions) -> Result<Self, FormatError> {
        options.validate()?;
        Ok(Self { writer, options })
    }

    /// Get a mutable reference to the underlying writer.
    #[must_use]
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// The options in use.
    #[must_use]
    pub const fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Write a component with its properties and children.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_component(&mut self, component: &Component) -> io::Result<()> {
        write_component(self, component)
    }

    /// Write a single property line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, property: &Property) -> io::Result<()> {
        self.write_line(&render_property(property))
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Fold and write one logical line followed by the line ending.
    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer
            .write_all(fold_line(line, &self.options).as_bytes())?;
        self.writeln()
    }

    /// Write the line ending.
    fn writeln(&mut self) -> io::Result<()> {
        self.writer
            .write_all(self.options.line_ending.as_str().as_bytes())
    }
}
