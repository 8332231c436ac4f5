use chrono::{FixedOffset, TimeZone};
use recast_core::{Heap, Value, builtins, zero_time};
use recast_reflect::{Options, Zone, coerce, parse_time};

#[test]
fn test_parse_rfc3339_keeps_offset() {
    recast_testhelpers::setup();

    let t = parse_time(b"2022-07-01T19:00:00+02:00", Zone::Utc);
    assert_eq!(t.offset(), &FixedOffset::east_opt(2 * 3600).unwrap());
    assert_eq!(t.to_rfc3339(), "2022-07-01T19:00:00+02:00");
}

#[test]
fn test_parse_fraction_in_zone() {
    recast_testhelpers::setup();

    let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
    let t = parse_time(b"2022-07-01 19:00:00.250", Zone::Fixed(plus3));
    assert_eq!(t.to_rfc3339(), "2022-07-01T19:00:00.250+03:00");
}

#[test]
fn test_parse_explicit_offsets() {
    recast_testhelpers::setup();

    let t = parse_time(b"2022-07-01 19:00:00 -05:00", Zone::Utc);
    assert_eq!(t.to_rfc3339(), "2022-07-01T19:00:00-05:00");

    let t = parse_time(b"2022-07-01 19:00:00.5 Z", Zone::Fixed(FixedOffset::east_opt(3600).unwrap()));
    assert_eq!(t.to_rfc3339(), "2022-07-01T19:00:00.500+00:00");
}

#[test]
fn test_parse_wall_clock_in_zone() {
    recast_testhelpers::setup();

    let t = parse_time(b"2022-07-01 19:00:00", Zone::Utc);
    let expected = chrono::Utc.with_ymd_and_hms(2022, 7, 1, 19, 0, 0).unwrap();
    assert_eq!(t, expected.fixed_offset());

    let local = parse_time(b"2022-07-01 19:00:00", Zone::Local);
    assert_eq!(local.format("%Y-%m-%d %H:%M:%S").to_string(), "2022-07-01 19:00:00");
}

#[test]
fn test_zero_strings_give_zero_time() {
    recast_testhelpers::setup();

    for text in ["0000-00-00 00:00:00", "0001-01-01 00:00:00", "  ", "2022/07/01", "soon"] {
        assert_eq!(parse_time(text.as_bytes(), Zone::Utc), zero_time(), "{text:?}");
    }
    insta::assert_snapshot!(zero_time().to_rfc3339(), @"0001-01-01T00:00:00+00:00");
}

#[test]
fn test_text_and_bytes_coerce_to_time() {
    recast_testhelpers::setup();

    let mut heap = Heap::new();
    let opts = Options::default().zone(Zone::Utc);
    let from_text = coerce(&mut heap, &builtins::TIME, &Value::from("2022-07-01"), &opts)
        .unwrap()
        .unwrap();
    let from_bytes = coerce(
        &mut heap,
        &builtins::TIME,
        &Value::from(b"2022-07-01".to_vec()),
        &opts,
    )
    .unwrap()
    .unwrap();
    assert_eq!(from_text, from_bytes);
    insta::assert_snapshot!(heap.display(&from_text), @"2022-07-01 00:00:00 +0000");
}
