use super::*;

#[test]
fn starts_empty() {
    assert_eq!(Banner::default().current(), None);
}

#[test]
fn show_replaces_current_message() {
    let mut banner = Banner::default();
    banner.success("Акт создан.");
    banner.error("Не удалось создать акт.");
    let current = banner.current().unwrap();
    assert_eq!(current.kind, BannerKind::Error);
    assert_eq!(current.text, "Не удалось создать акт.");
}

#[test]
fn stale_ticket_does_not_hide_newer_message() {
    let mut banner = Banner::default();
    let first = banner.success("one");
    let second = banner.success("two");
    banner.dismiss_if(first);
    assert_eq!(banner.current().map(|m| m.text.as_str()), Some("two"));
    banner.dismiss_if(second);
    assert_eq!(banner.current(), None);
}

#[test]
fn manual_dismiss_clears() {
    let mut banner = Banner::default();
    banner.error("x");
    banner.dismiss();
    assert!(banner.current().is_none());
}

#[test]
fn kind_classes_differ() {
    assert_ne!(BannerKind::Success.css_class(), BannerKind::Error.css_class());
}
