use super::*;

#[test]
fn parse_ignores_case_and_whitespace() {
    assert_eq!(RequestStatus::parse("  в работе "), Some(RequestStatus::InProgress));
    assert_eq!(DeviceStatus::parse("отк"), Some(DeviceStatus::QualityControl));
}

#[test]
fn parse_rejects_unknown_values() {
    assert_eq!(RequestStatus::parse("в раБоте!"), None);
    assert_eq!(DeviceStatus::parse(""), None);
}

#[test]
fn every_variant_round_trips_through_wire_value() {
    for status in RequestStatus::ALL {
        assert_eq!(RequestStatus::parse(status.wire()), Some(*status));
    }
    for status in DeviceStatus::ALL {
        assert_eq!(DeviceStatus::parse(status.wire()), Some(*status));
    }
}

#[test]
fn badge_for_known_status_uses_table() {
    let badge = badge_for::<RequestStatus>("завершена");
    assert_eq!(badge.label, "Завершена");
    assert_eq!(badge.tone, Tone::Success);
}

#[test]
fn badge_for_unknown_status_is_neutral() {
    let badge = badge_for::<DeviceStatus>(" Утерян ");
    assert_eq!(badge, Badge::neutral("Утерян"));
    assert_eq!(badge.tone.css_class(), "badge badge--neutral");
}

#[test]
fn request_status_advances_until_terminal() {
    assert_eq!(RequestStatus::New.next(), Some(RequestStatus::Approved));
    assert_eq!(RequestStatus::Approved.next(), Some(RequestStatus::InProgress));
    assert_eq!(RequestStatus::InProgress.next(), Some(RequestStatus::Completed));
    assert_eq!(RequestStatus::Completed.next(), None);
    assert_eq!(RequestStatus::Cancelled.next(), None);
}
