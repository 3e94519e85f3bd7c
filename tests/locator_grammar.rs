use proptest::prelude::*;
use wrp::{DeviceId, Locator, ParseError, Scheme};

#[test]
fn parse_normalizes_mac_locators() {
    let locator = Locator::parse("MAC:11:22:33:44:55:66").unwrap();
    assert_eq!(locator.scheme, Scheme::Mac);
    assert_eq!(locator.authority, "112233445566");
    assert_eq!(locator.id.as_ref().unwrap().as_str(), "mac:112233445566");
    assert_eq!(locator.to_string(), "mac:112233445566");
}

#[test]
fn device_ids_normalize_delimited_macs() {
    for input in ["MAC:11-aa-BB-44-55-66", "mac:11,AA,bb,44,55,66"] {
        let id = DeviceId::parse(input).unwrap();
        assert_eq!(id.as_str(), "mac:11aabb445566", "input {input:?}");
    }
}

#[test]
fn self_is_not_serial() {
    let locator = Locator::parse("self:").unwrap();
    assert_eq!(locator.scheme, Scheme::Self_);

    let locator = Locator::parse("serial:abc123").unwrap();
    assert_eq!(locator.scheme, Scheme::Serial);
    assert_eq!(locator.id.as_ref().unwrap().as_str(), "serial:abc123");
}

#[test]
fn case_folded_schemes_parse_to_canonical_form() {
    for (input, canonical) in [
        ("SELF:", "self:"),
        ("Serial:abc", "serial:abc"),
        ("UUID:1234", "uuid:1234"),
        ("Dns:example.com", "dns:example.com"),
        ("EVENT:topic", "event:topic"),
    ] {
        let locator = Locator::parse(input).unwrap();
        assert_eq!(locator.to_string(), canonical, "input {input:?}");
    }
}

#[test]
fn event_and_dns_have_no_service_segment() {
    let locator = Locator::parse("event:name/ignored/more").unwrap();
    assert_eq!(locator.service, "");
    assert_eq!(locator.ignored, "/ignored/more");

    let locator = Locator::parse("dns:example.com/anything").unwrap();
    assert_eq!(locator.service, "");
    assert_eq!(locator.ignored, "/anything");
}

#[test]
fn device_schemes_carve_out_a_service_segment() {
    let locator = Locator::parse("mac:481d70187fef/parodus/tail/end").unwrap();
    assert_eq!(locator.service, "parodus");
    assert_eq!(locator.ignored, "/tail/end");

    let locator = Locator::parse("self:/iot").unwrap();
    assert_eq!(locator.service, "iot");
    assert_eq!(locator.ignored, "");
}

#[test]
fn malformed_locators_are_rejected() {
    let bad = [
        "",
        "   ",
        "self:anything",
        "mac:11-aa-BB-44-55",
        "mac:11-aa-BB-44-55-66-77",
        "mac:nothexnothex",
        "invalid:foo",
        "mac:",
        "uuid:",
        "event:",
        "dns:",
    ];
    for input in bad {
        assert!(
            matches!(Locator::parse(input), Err(ParseError::InvalidLocator { .. })),
            "input {input:?} must be rejected"
        );
    }
}

#[test]
fn device_id_as_locator_round_trips() {
    let id = DeviceId::parse("uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
    let locator = id.as_locator();
    locator.validate().unwrap();
    assert_eq!(
        Locator::parse(&locator.to_string()).unwrap(),
        locator
    );
}

fn hex_pair() -> impl Strategy<Value = String> {
    "[0-9a-fA-F]{2}"
}

fn mac_authority() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(hex_pair(), 6),
        prop_oneof![Just(""), Just(":"), Just("-"), Just("."), Just(",")],
    )
        .prop_map(|(pairs, sep)| pairs.join(sep))
}

fn plain_authority() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,24}"
}

fn service_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9-]{1,8}".prop_map(|s| format!("/{s}")),
        ("[a-z0-9-]{1,8}", "[a-z0-9/-]{0,16}").prop_map(|(s, rest)| format!("/{s}/{rest}")),
    ]
}

fn locator_input() -> impl Strategy<Value = String> {
    prop_oneof![
        (mac_authority(), service_suffix()).prop_map(|(a, s)| format!("mac:{a}{s}")),
        (plain_authority(), service_suffix()).prop_map(|(a, s)| format!("uuid:{a}{s}")),
        (plain_authority(), service_suffix()).prop_map(|(a, s)| format!("serial:{a}{s}")),
        service_suffix().prop_map(|s| format!("self:{s}")),
        (plain_authority(), service_suffix()).prop_map(|(a, s)| format!("dns:{a}{s}")),
        (plain_authority(), service_suffix()).prop_map(|(a, s)| format!("event:{a}{s}")),
    ]
}

proptest! {
    /// Re-parsing a locator's display form yields the same locator.
    #[test]
    fn prop_reparse_is_idempotent(input in locator_input()) {
        let first = Locator::parse(&input).unwrap();
        let second = Locator::parse(&first.to_string()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Parsed locators always satisfy their own invariants.
    #[test]
    fn prop_parsed_locators_validate(input in locator_input()) {
        let locator = Locator::parse(&input).unwrap();
        prop_assert!(locator.validate().is_ok());
    }

    /// MAC device identifiers come out as exactly 12 lowercase hex digits,
    /// however the input was delimited or cased.
    #[test]
    fn prop_mac_ids_are_canonical(authority in mac_authority()) {
        let id = DeviceId::parse(&format!("mac:{authority}")).unwrap();
        let hex = id.authority();
        prop_assert_eq!(hex.len(), 12);
        prop_assert!(hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    /// Arbitrary junk either fails to parse or round-trips cleanly; parsing
    /// never panics.
    #[test]
    fn prop_parser_never_panics(input in "\\PC{0,40}") {
        if let Ok(locator) = Locator::parse(&input) {
            let reparsed = Locator::parse(&locator.to_string()).unwrap();
            prop_assert_eq!(locator, reparsed);
        }
    }
}
