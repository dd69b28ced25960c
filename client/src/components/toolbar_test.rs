use super::*;

#[test]
fn exact_and_nested_paths_activate_link() {
    assert!(is_active_link("/acts", "/acts"));
    assert!(is_active_link("/acts/12", "/acts"));
    assert!(!is_active_link("/actsx", "/acts"));
    assert!(!is_active_link("/requests", "/acts"));
}

#[test]
fn device_pages_highlight_statuses() {
    assert!(is_active_link("/device/SN-1", "/statuses"));
    assert!(!is_active_link("/device/SN-1", "/requests"));
}

#[test]
fn every_link_is_absolute() {
    assert!(NAV_LINKS.iter().all(|(href, _)| href.starts_with('/')));
}
