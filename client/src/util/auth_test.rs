use super::*;

#[test]
fn should_redirect_unauth_when_not_loading_and_token_missing() {
    let session = AuthSession { token: None, loading: false };
    assert!(should_redirect_unauth(&session));
}

#[test]
fn should_not_redirect_while_loading() {
    let session = AuthSession { token: None, loading: true };
    assert!(!should_redirect_unauth(&session));
}

#[test]
fn should_not_redirect_when_token_exists() {
    let session = AuthSession { token: Some("t0k3n".to_owned()), loading: false };
    assert!(!should_redirect_unauth(&session));
}

#[test]
fn blank_token_counts_as_signed_out() {
    let session = AuthSession { token: Some(String::new()), loading: false };
    assert!(should_redirect_unauth(&session));
}

#[test]
fn sign_in_and_sign_out_update_session() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthSession { token: None, loading: true });
        sign_in(auth, " abc ");
        assert_eq!(auth.get_untracked().token.as_deref(), Some("abc"));
        assert!(!auth.get_untracked().loading);

        sign_out(auth);
        assert!(auth.get_untracked().token.is_none());
    });
}

#[test]
fn only_401_expires_the_session() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthSession { token: Some("abc".to_owned()), loading: false });
        assert!(!expire_on_unauthorized(auth, &ApiError::Status { status: 500, detail: None }));
        assert!(auth.get_untracked().is_authenticated());

        assert!(expire_on_unauthorized(auth, &ApiError::Status { status: 401, detail: None }));
        assert!(!auth.get_untracked().is_authenticated());
    });
}
