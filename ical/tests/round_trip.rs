// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the iCalendar parser and formatter.
//!
//! These tests verify that parsing, formatting, and parsing again produces
//! equal components, and that formatting is stable.

use kalends_ical::{
    Component, FormatOptions, Frequency, Property, PropertyValue, RecurSpec, TimeZoneRef,
    ValueDate, ValueDateTime, ValueDuration, ValueGeo, ValuePeriod, ValueRequestStatus, ValueTime,
    Weekday, WeekdayNum, format, format_property, parse, parse_property,
};

fn assert_round_trip(original: &str) {
    let first = parse(original).unwrap();
    let formatted = format(&first).unwrap();
    let second = parse(&formatted).unwrap();
    assert_eq!(first, second, "Round trip of:\n{original}\nformatted as:\n{formatted}");

    let again = format(&second).unwrap();
    assert_eq!(formatted, again, "Formatting should be stable");
}

#[test]
fn round_trip_simple_calendar() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:12345@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DTEND:20250110T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_calendar_with_timezone() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19671029T020000\r\n\
RRULE:FREQ=YEARLY;BYDAY=1SU;BYMONTH=11\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19870405T020000\r\n\
RRULE:FREQ=YEARLY;BYDAY=2SU;BYMONTH=3\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:tz@example.com\r\n\
DTSTART;TZID=America/New_York:19970902T090000\r\n\
DURATION:PT1H30M\r\n\
RRULE:FREQ=WEEKLY;UNTIL=19971007T000000Z;WKST=SU;BYDAY=TU,TH\r\n\
EXDATE;TZID=America/New_York:19970909T090000,19970911T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_calendar_with_todo_and_alarm() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
BEGIN:VTODO\r\n\
UID:todo@example.com\r\n\
DUE;VALUE=DATE:20250131\r\n\
PERCENT-COMPLETE:40\r\n\
PRIORITY:1\r\n\
CATEGORIES:FAMILY,FINANCE\r\n\
GEO:48.85299;2.36885\r\n\
BEGIN:VALARM\r\n\
ACTION:AUDIO\r\n\
TRIGGER;RELATED=END:-PT15M\r\n\
REPEAT:4\r\n\
DURATION:PT5M\r\n\
END:VALARM\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER;VALUE=DATE-TIME:19970317T133000Z\r\n\
DESCRIPTION:Breakfast meeting\r\n\
END:VALARM\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_calendar_with_parameters() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
ORGANIZER;CN=John Smith;SENT-BY=\"mailto:sec@example.com\":mailto:jsmith@example.com\r\n\
ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=TENTATIVE;CN=\"Doe, Henry\";MEMBER=\"mailto:a@example.com\",\"mailto:b@example.com\":mailto:hdoe@example.com\r\n\
ATTACH;FMTTYPE=text/plain;ENCODING=BASE64;VALUE=BINARY:VGhlIHF1aWNrIGJyb3duIGZveA==\r\n\
DESCRIPTION;ALTREP=\"cid:part1.0001@example.org\":The Fall'98 Wild Wizards Conference\r\n\
REQUEST-STATUS:3.1;Invalid property value;DTSTART:96-Apr-01\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_calendar_with_freebusy() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
BEGIN:VFREEBUSY\r\n\
UID:fb@example.com\r\n\
FREEBUSY;FBTYPE=BUSY-UNAVAILABLE:19970308T160000Z/PT8H30M\r\n\
FREEBUSY:19970308T160000Z/PT3H,19970308T200000Z/PT1H,19970308T230000Z/19970309T000000Z\r\n\
END:VFREEBUSY\r\n\
BEGIN:VEVENT\r\n\
UID:rdate@example.com\r\n\
DTSTART;VALUE=DATE:19970101\r\n\
RDATE;VALUE=PERIOD:19960403T020000Z/19960403T040000Z,19960404T010000Z/PT3H\r\n\
RDATE;VALUE=DATE:19970101,19970120,19970217\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_calendar_with_custom_and_broken_properties() {
    assert_round_trip(
        "BEGIN:VCALENDAR\r\n\
X-WR-CALNAME:My\\, Calendar\r\n\
X-CUSTOM;X-PARAM=a,b:anything: goes\\n here\r\n\
BEGIN:VEVENT\r\n\
DTSTART:sometime soon\r\n\
PRIORITY:high\r\n\
RRULE:FREQ=FORTNIGHTLY\r\n\
END:VEVENT\r\n\
BEGIN:X-VENDOR-THING\r\n\
X-FOO:bar\r\n\
END:X-VENDOR-THING\r\n\
END:VCALENDAR\r\n",
    );
}

#[test]
fn round_trip_long_folded_lines() {
    let description = "Lorem ipsum dolor sit amet, consectetur adipiscing elit; sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ünïcödé ✓ 日本語 😀 end.\n"
        .repeat(4);
    let event = Component::new("VEVENT")
        .with_property(Property::new("DESCRIPTION", PropertyValue::Text(description)));
    let calendar = Component::new("VCALENDAR").with_child(event);

    let formatted = format(std::slice::from_ref(&calendar)).unwrap();
    let parsed = parse(&formatted).unwrap();
    assert_eq!(parsed, [calendar]);
}

#[test]
fn round_trip_with_lf_and_tab_folding() {
    let original = "BEGIN:VCALENDAR\nSUMMARY:".to_string() + &"abc ".repeat(40) + "\nEND:VCALENDAR\n";
    let first = parse(&original).unwrap();
    let options = FormatOptions::default()
        .folding(Some(30))
        .folding_style(kalends_ical::FoldingStyle::Tab)
        .line_ending(kalends_ical::LineEnding::Lf);
    let formatted = options.format(&first).unwrap();
    assert!(formatted.contains("\n\t"));
    assert!(!formatted.contains('\r'));
    assert_eq!(parse(&formatted).unwrap(), first);
}

#[test]
fn round_trip_typed_properties() {
    let date = ValueDate {
        year: 2024,
        month: 2,
        day: 29,
    };
    let at = |hour| ValueDateTime {
        date,
        time: ValueTime::new(hour, 0, 0),
        zone: Some(TimeZoneRef::Named("Europe/Berlin".into())),
    };
    let rule = RecurSpec::new(Frequency::Yearly)
        .with_count(5)
        .with_weekdays([WeekdayNum::nth(-1, Weekday::Friday)]);

    let properties = [
        Property::new("DTSTART", PropertyValue::DateTime(at(9))),
        Property::new("DTSTART", PropertyValue::Date(date)),
        Property::new("RRULE", PropertyValue::Recur(rule)),
        Property::new(
            "EXDATE",
            PropertyValue::List(vec![PropertyValue::DateTime(at(9)), PropertyValue::DateTime(at(10))]),
        ),
        Property::new(
            "RDATE",
            PropertyValue::Period(ValuePeriod::Duration {
                start: at(12),
                duration: ValueDuration::Week {
                    positive: true,
                    week: 1,
                },
            }),
        ),
        Property::new(
            "GEO",
            PropertyValue::Geo(ValueGeo {
                latitude: 37.386_013,
                longitude: -122.082_932,
            }),
        ),
        Property::new(
            "REQUEST-STATUS",
            PropertyValue::RequestStatus(ValueRequestStatus {
                code: 2.8,
                subcode: None,
                description: "Success; repeating event ignored".into(),
                extdata: None,
            }),
        ),
        Property::new("SUMMARY", PropertyValue::Text("a\\b;c,d\ne".into())),
        Property::new("X-ANSWER", PropertyValue::Integer(42)),
    ];

    for property in properties {
        let line = format_property(&property);
        let reparsed = parse_property(&line).unwrap();
        assert_eq!(reparsed.name, property.name, "Round trip of {line}");
        assert_eq!(reparsed.value, property.value, "Round trip of {line}");
    }
}
