#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn load_token_is_none_without_browser() {
    save_token("abc");
    assert_eq!(load_token(), None);
    clear_token();
}

#[test]
fn normalize_token_trims_and_drops_blank() {
    assert_eq!(normalize_token("  abc \n"), Some("abc".to_owned()));
    assert_eq!(normalize_token("   "), None);
    assert_eq!(normalize_token(""), None);
}
