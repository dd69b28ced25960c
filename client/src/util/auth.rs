//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! any API call answered with 401 ends the session the same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::http::ApiError;
use crate::state::auth::AuthSession;
use crate::util::storage;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/requests";

/// Whether a route guard should send the user to the login page.
pub fn should_redirect_unauth(session: &AuthSession) -> bool {
    !session.loading && !session.is_authenticated()
}

/// Redirect to `/login` whenever the session has loaded and holds no token.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthSession>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}

/// Read the persisted token into the session once the browser is available.
pub fn restore_session(auth: RwSignal<AuthSession>) {
    let token = storage::load_token();
    auth.set(AuthSession { token, loading: false });
}

/// Persist a freshly issued token and mark the session authenticated.
pub fn sign_in(auth: RwSignal<AuthSession>, token: &str) {
    storage::save_token(token);
    auth.set(AuthSession { token: storage::normalize_token(token), loading: false });
}

/// Forget the token. The route guard handles the redirect.
pub fn sign_out(auth: RwSignal<AuthSession>) {
    storage::clear_token();
    auth.set(AuthSession { token: None, loading: false });
}

/// End the session if `err` is a rejected token. Returns `true` when it did.
pub fn expire_on_unauthorized(auth: RwSignal<AuthSession>, err: &ApiError) -> bool {
    if !err.is_unauthorized() {
        return false;
    }
    log::warn!("session token rejected, signing out");
    sign_out(auth);
    true
}
