// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar formatter.

use kalends_ical::{
    Component, FoldingStyle, FormatError, FormatOptions, Formatter, LineEnding, Property,
    PropertyValue, ValueDuration, fold_line, format, format_property, parse, parse_property,
    unfold,
};

#[test]
fn test_format_simple_event() {
    let input = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:12345@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DTEND:20250110T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let calendars = parse(input).unwrap();
    let formatted = format(&calendars).unwrap();
    assert_eq!(formatted, input);
}

#[test]
fn test_format_line_endings() {
    let calendar = Component::new("VCALENDAR")
        .with_property(Property::new("VERSION", PropertyValue::Text("2.0".into())));

    let crlf = format(std::slice::from_ref(&calendar)).unwrap();
    assert_eq!(crlf, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");

    let lf = FormatOptions::default()
        .line_ending(LineEnding::Lf)
        .format(&[calendar])
        .unwrap();
    assert_eq!(lf, "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n");
}

#[test]
fn test_format_text_with_special_characters() {
    let property = Property::new(
        "DESCRIPTION",
        PropertyValue::Text("Meeting; bring notes, pens\nand laptops \\ chargers".into()),
    );
    assert_eq!(
        format_property(&property),
        "DESCRIPTION:Meeting\\; bring notes\\, pens\\nand laptops \\\\ chargers"
    );
}

#[test]
fn test_format_with_parameters() {
    let property = parse_property(
        "ATTENDEE;ROLE=REQ-PARTICIPANT;CN=\"Doe, Jane\";DELEGATED-TO=\"mailto:a@example.com\",\"mailto:b@example.com\":mailto:jane@example.com",
    )
    .unwrap();
    assert_eq!(
        format_property(&property),
        "ATTENDEE;ROLE=REQ-PARTICIPANT;CN=\"Doe, Jane\";DELEGATED-TO=\"mailto:a@example\r\n .com\",\"mailto:b@example.com\":mailto:jane@example.com"
    );
}

#[test]
fn test_format_duration() {
    #[rustfmt::skip]
    let cases = [
        (ValueDuration::DateTime { positive: true,  day: 0, hour: 0, minute: 15, second: 0 }, "DURATION:PT15M"),
        (ValueDuration::DateTime { positive: false, day: 1, hour: 2, minute: 0,  second: 0 }, "DURATION:-P1DT2H"),
        (ValueDuration::Week { positive: true, week: 2 },                                    "DURATION:P2W"),
        (ValueDuration::ZERO,                                                                "DURATION:PT0H0M0S"),
    ];
    for (duration, expected) in cases {
        let property = Property::new("DURATION", PropertyValue::Duration(duration));
        assert_eq!(format_property(&property), expected);
    }
}

#[test]
fn test_format_rrule_canonical_order() {
    let property =
        parse_property("RRULE:WKST=SU;BYDAY=TU,SU;COUNT=4;INTERVAL=2;FREQ=WEEKLY").unwrap();
    assert_eq!(
        format_property(&property),
        "RRULE:FREQ=WEEKLY;COUNT=4;INTERVAL=2;BYDAY=TU,SU;WKST=SU"
    );
}

#[test]
fn test_format_geo_and_request_status() {
    let geo = parse_property("GEO:37.3860130;-122.0829320").unwrap();
    assert_eq!(format_property(&geo), "GEO:37.386013;-122.082932");

    let status = parse_property("REQUEST-STATUS:2.0;Success").unwrap();
    assert_eq!(format_property(&status), "REQUEST-STATUS:2.00;Success");
}

#[test]
fn test_fold_long_description() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(5);
    let property = Property::new("DESCRIPTION", PropertyValue::Text(text.clone()));
    let line = format_property(&property);

    for physical in line.split("\r\n") {
        assert!(physical.len() <= 75, "{physical:?} is longer than 75 octets");
    }
    let reparsed = parse_property(&line).unwrap();
    assert_eq!(reparsed.value, PropertyValue::Text(text));
}

#[test]
fn test_fold_multibyte_at_boundary() {
    // "SUMMARY:" is 8 octets, so 66 ASCII octets put the next character at
    // octets 75-78.
    let text = format!("{}日本語テキスト", "x".repeat(66));
    let property = Property::new("SUMMARY", PropertyValue::Text(text.clone()));
    let line = format_property(&property);

    let mut physical = line.split("\r\n");
    let first = physical.next().unwrap();
    assert_eq!(first.len(), 74);
    assert!(first.ends_with('x'));
    for rest in physical {
        assert!(rest.starts_with(' '));
        assert!(rest.len() <= 75);
    }
    assert_eq!(unfold(&line), format!("SUMMARY:{text}"));
}

#[test]
fn test_fold_unfold_inverse() {
    let alphabet = ['a', 'Z', ' ', ';', ':', ',', '\\', 'é', '€', '日', '😀', 'n', '"', '\t'];
    let mut state: u32 = 0x2545_f491;
    for len in [0, 1, 74, 75, 76, 150, 1_000, 10_000] {
        let mut s = String::with_capacity(len);
        while s.len() < len {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            s.push(alphabet[state as usize % alphabet.len()]);
        }
        for style in [FoldingStyle::Space, FoldingStyle::Tab] {
            let options = FormatOptions::default().folding_style(style);
            let folded = fold_line(&s, &options);
            assert_eq!(unfold(&folded), s, "fold/unfold of {len} bytes");
        }
    }
}

#[test]
fn test_fold_unfold_keeps_edges() {
    let cases = [
        " leading space".to_string(),
        "\tleading tab".to_string(),
        format!(" {}", "y".repeat(200)),
        // boundaries fall inside the three-octet and four-octet characters
        format!("{}€€€", "x".repeat(73)),
        format!("{}😀😀", "x".repeat(72)),
    ];
    for s in cases {
        for style in [FoldingStyle::Space, FoldingStyle::Tab] {
            let options = FormatOptions::default().folding_style(style);
            let folded = fold_line(&s, &options);
            for physical in folded.split("\r\n") {
                assert!(physical.len() <= 75, "{physical:?} is longer than 75 octets");
            }
            assert_eq!(unfold(&folded), s, "fold/unfold of {s:?}");
        }
    }
}

#[test]
fn test_folding_disabled_and_validated() {
    let property = Property::new("SUMMARY", PropertyValue::Text("y".repeat(200)));
    let calendar = Component::new("VCALENDAR").with_property(property);

    let out = FormatOptions::default()
        .folding(None)
        .format(std::slice::from_ref(&calendar))
        .unwrap();
    assert_eq!(out.lines().count(), 3);

    let err = FormatOptions::default()
        .folding(Some(2))
        .format(&[calendar])
        .unwrap_err();
    assert!(matches!(
        err,
        FormatError::FoldingOverflow {
            width: 2,
            minimum: 6
        }
    ));
}

#[test]
fn test_formatter_streams_to_writer() {
    let mut buffer = Vec::new();
    let mut formatter = Formatter::new(&mut buffer, FormatOptions::default()).unwrap();
    formatter
        .write_property(&Property::new("UID", PropertyValue::Text("abc".into())))
        .unwrap();
    formatter.write_component(&Component::new("VTODO")).unwrap();
    assert_eq!(buffer, b"UID:abc\r\nBEGIN:VTODO\r\nEND:VTODO\r\n");
}

#[test]
fn test_options_from_toml() {
    let options: FormatOptions = toml::from_str(
        r#"
folding = 40
folding_style = "tab"
line_ending = "lf"
"#,
    )
    .unwrap();
    assert_eq!(
        options,
        FormatOptions::default()
            .folding(Some(40))
            .folding_style(FoldingStyle::Tab)
            .line_ending(LineEnding::Lf)
    );

    let options: FormatOptions = toml::from_str("").unwrap();
    assert_eq!(options, FormatOptions::default());

    assert!(toml::from_str::<FormatOptions>("line_ending = \"cr\"").is_err());
}
