// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar parser.

use kalends_ical::{
    ByRuleKind, ByValue, Frequency, LineError, ParseError, PropertyValue, RecurEnd, TimeZoneRef,
    ValueDuration, ValueKind, ValuePeriod, Weekday, WeekdayNum, parse, parse_property,
    parse_with_diagnostics,
};

#[test]
fn parses_rfc_event() {
    let src = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//xyz Corp//NONSGML PDA Calendar Version 1.0//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:19960704T120000Z\r\n\
UID:uid1@example.com\r\n\
ORGANIZER:mailto:jsmith@example.com\r\n\
DTSTART:19960918T143000Z\r\n\
DTEND:19960920T220000Z\r\n\
STATUS:CONFIRMED\r\n\
CATEGORIES:CONFERENCE\r\n\
SUMMARY:Networld+Interop Conference\r\n\
DESCRIPTION:Networld+Interop Conference\r\n  and Exhibit\\nAtlanta World Congress Center\\n\r\n Atlanta\\, Georgia\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let calendars = parse(src).unwrap();
    assert_eq!(calendars.len(), 1);
    let calendar = &calendars[0];
    assert_eq!(calendar.name, "VCALENDAR");
    assert_eq!(calendar.properties.len(), 2);

    let event = &calendar.children[0];
    assert_eq!(event.name, "VEVENT");
    assert_eq!(
        event.property("DESCRIPTION").and_then(|p| p.value.as_text()),
        Some(
            "Networld+Interop Conference and Exhibit\nAtlanta World Congress Center\nAtlanta, Georgia"
        )
    );
    assert_eq!(
        event.property("ORGANIZER").map(|p| &p.value),
        Some(&PropertyValue::CalAddress("mailto:jsmith@example.com".into()))
    );
    let dtstart = event.property("DTSTART").unwrap();
    let PropertyValue::DateTime(dtstart) = &dtstart.value else {
        panic!("DTSTART should be a DATE-TIME: {dtstart:?}");
    };
    assert_eq!(dtstart.zone, Some(TimeZoneRef::Utc));
    assert_eq!((dtstart.date.year, dtstart.date.month, dtstart.date.day), (1996, 9, 18));
    assert_eq!(
        (dtstart.time.hour, dtstart.time.minute, dtstart.time.second),
        (14, 30, 0)
    );
}

#[test]
fn accepts_every_line_break_style() {
    #[rustfmt::skip]
    let sources = [
        "BEGIN:VCALENDAR\r\nSUMMARY:a\r\n  b\r\nEND:VCALENDAR\r\n",
        "BEGIN:VCALENDAR\nSUMMARY:a\n  b\nEND:VCALENDAR\n",
        "BEGIN:VCALENDAR\rSUMMARY:a\r  b\rEND:VCALENDAR",
        "BEGIN:VCALENDAR\r\nSUMMARY:a\n\t b\rEND:VCALENDAR\n",
    ];
    for src in sources {
        let calendars = parse(src).unwrap();
        assert_eq!(
            calendars[0].property("SUMMARY").and_then(|p| p.value.as_text()),
            Some("a b"),
            "Parse {src:?}"
        );
    }
}

#[test]
fn colons_in_parameter_values() {
    #[rustfmt::skip]
    let cases = [
        ("ATTENDEE;DELEGATED-FROM=mailto:a@example.com:mailto:b@example.com",   "DELEGATED-FROM", "mailto:a@example.com", "mailto:b@example.com"),
        ("ATTENDEE;SENT-BY=\"mailto:x@example.com\":mailto:b@example.com",      "SENT-BY",        "mailto:x@example.com", "mailto:b@example.com"),
        ("DESCRIPTION;ALTREP=http://example.com:8080/doc.txt:Read this",         "ALTREP",         "http://example.com:8080/doc.txt", "Read this"),
        ("DTSTART;TZID=(UTC+01:00) Amsterdam:20240101T090000",                   "TZID",           "(UTC+01:00) Amsterdam", "20240101T090000"),
        ("CONTACT;ALTREP=tel:+1-555-0100:Jim Dolittle",                          "ALTREP",         "tel:+1-555-0100", "Jim Dolittle"),
    ];
    for (src, param, expected_param, expected_value) in cases {
        let property = parse_property(src).unwrap();
        assert_eq!(property.parameters.first(param), Some(expected_param), "Parse {src}");
        let value = kalends_ical::encode_value(&property.value);
        assert_eq!(value, expected_value, "Parse {src}");
    }
}

#[test]
fn named_zone_from_tzid() {
    let property = parse_property("DTSTART;TZID=America/New_York:19970902T090000").unwrap();
    match property.value {
        PropertyValue::DateTime(dt) => {
            assert_eq!(dt.zone, Some(TimeZoneRef::Named("America/New_York".into())));
        }
        other => panic!("unexpected value {other:?}"),
    }

    let property = parse_property("DTSTART:19970902T090000-0500").unwrap();
    match property.value {
        PropertyValue::DateTime(dt) => assert_eq!(dt.zone, Some(TimeZoneRef::Offset(-5 * 3600))),
        other => panic!("unexpected value {other:?}"),
    }
}

#[test]
fn multi_valued_dates_and_periods() {
    let exdate =
        parse_property("EXDATE;TZID=Europe/Berlin:19960402T010000,19960403T010000,19960404T010000")
            .unwrap();
    let items = exdate.value.items();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|v| v.kind() == ValueKind::DateTime));

    let rdate =
        parse_property("RDATE;VALUE=PERIOD:19960403T020000Z/19960403T040000Z,19960404T010000Z/PT3H")
            .unwrap();
    let items = rdate.value.items();
    assert!(matches!(items[0], PropertyValue::Period(ValuePeriod::Explicit { .. })));
    assert!(matches!(
        items[1],
        PropertyValue::Period(ValuePeriod::Duration {
            duration: ValueDuration::DateTime { hour: 3, .. },
            ..
        })
    ));

    let rdate = parse_property("RDATE;VALUE=DATE:19970101,19970120,19970217").unwrap();
    assert_eq!(rdate.value.items().len(), 3);
    assert_eq!(rdate.value.kind(), ValueKind::Date);
}

#[test]
fn recurrence_rules() {
    let rrule = parse_property("RRULE:FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2").unwrap();
    let PropertyValue::Recur(rule) = &rrule.value else {
        panic!("RRULE should decode to RECUR");
    };
    assert_eq!(rule.freq, Frequency::Monthly);
    assert_eq!(rule.interval, 1);
    assert_eq!(rule.end, None);
    assert_eq!(rule.by(ByRuleKind::BySetPos), [ByValue::Number(-2)]);
    assert_eq!(rule.weekdays().count(), 5);

    let rrule = parse_property("RRULE:FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=-1SU").unwrap();
    let PropertyValue::Recur(rule) = &rrule.value else {
        panic!("RRULE should decode to RECUR");
    };
    assert!(matches!(rule.end, Some(RecurEnd::Until(_))));
    assert_eq!(
        rule.weekdays().collect::<Vec<_>>(),
        [WeekdayNum::nth(-1, Weekday::Sunday)]
    );
}

#[test]
fn structured_values() {
    let geo = parse_property("GEO:37.386013;-122.082932").unwrap();
    assert_eq!(geo.value.kind(), ValueKind::Geo);

    let status = parse_property("REQUEST-STATUS:3.1;Invalid property value;DTSTART:96-Apr-01").unwrap();
    match status.value {
        PropertyValue::RequestStatus(status) => {
            assert!((status.code - 3.1).abs() < f64::EPSILON);
            assert_eq!(status.description, "Invalid property value");
            assert_eq!(status.extdata.as_deref(), Some("DTSTART:96-Apr-01"));
        }
        other => panic!("unexpected value {other:?}"),
    }

    let categories = parse_property("CATEGORIES:APPOINTMENT,EDUCATION\\,ART").unwrap();
    assert_eq!(
        categories.value,
        PropertyValue::List(vec![
            PropertyValue::Text("APPOINTMENT".into()),
            PropertyValue::Text("EDUCATION,ART".into()),
        ])
    );
}

#[test]
fn bad_values_are_kept_verbatim() {
    let property = parse_property("DTSTART:next tuesday").unwrap();
    match &property.value {
        PropertyValue::Unparsed { raw, expected, .. } => {
            assert_eq!(raw, "next tuesday");
            assert_eq!(*expected, ValueKind::DateTime);
        }
        other => panic!("unexpected value {other:?}"),
    }
    assert_eq!(kalends_ical::format_property(&property), "DTSTART:next tuesday");
}

#[test]
fn bad_list_items_keep_the_good_ones() {
    let exdate = parse_property("EXDATE:19970903T090000,garbage,19970905T090000").unwrap();
    let items = exdate.value.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].kind(), ValueKind::DateTime);
    assert!(matches!(&items[1], PropertyValue::Unparsed { raw, .. } if raw == "garbage"));
    assert_eq!(items[2].kind(), ValueKind::DateTime);
    assert_eq!(
        kalends_ical::format_property(&exdate),
        "EXDATE:19970903T090000,garbage,19970905T090000"
    );

    let rdate = parse_property("RDATE;VALUE=PERIOD:19970101T180000Z/PT5H30M,soon").unwrap();
    assert!(matches!(rdate.value.items()[0], PropertyValue::Period(_)));
    assert!(rdate.value.items()[1].is_unparsed());
}

#[test]
fn unknown_properties_are_kept_raw() {
    let property = parse_property("X-WR-CALNAME;X-PARAM=a,b:My\\, Calendar").unwrap();
    assert_eq!(property.name, "X-WR-CALNAME");
    assert_eq!(property.value, PropertyValue::UnknownRaw("My\\, Calendar".into()));
    assert_eq!(
        property.parameters.get("X-PARAM").map(|p| p.values.clone()),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn skips_malformed_lines_with_diagnostics() {
    let src = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
this line has no colon\r\n\
:no name\r\n\
ATTENDEE;CN=\"unterminated:mailto:a@example.com\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:kept\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let parsed = parse_with_diagnostics(src).unwrap();
    let calendar = &parsed.components[0];
    assert_eq!(calendar.properties.len(), 1);
    assert_eq!(calendar.children.len(), 1);
    assert_eq!(parsed.diagnostics.len(), 3);
    assert!(matches!(parsed.diagnostics[0], LineError::MalformedLine { line: 3, .. }));
    assert!(matches!(parsed.diagnostics[1], LineError::MalformedLine { line: 4, .. }));
    assert!(matches!(parsed.diagnostics[2], LineError::InvalidParameter { line: 5, .. }));
}

#[test]
fn missing_container_is_fatal() {
    #[rustfmt::skip]
    let fail_cases = [
        ("",                                         ParseError::MissingContainer),
        ("VERSION:2.0\r\nPRODID:x\r\n",              ParseError::MissingContainer),
        ("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n",       ParseError::UnterminatedComponent { name: "VCALENDAR".into() }),
    ];
    for (src, expected) in fail_cases {
        assert_eq!(parse(src), Err(expected), "Parse {src:?} should fail");
    }
}

#[test]
fn multiple_top_level_components() {
    let src = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
    assert_eq!(parse(src).unwrap().len(), 2);
}
