//! Failure reporting shared by route pages.

#[cfg(test)]
#[path = "shared_test.rs"]
mod shared_test;

use leptos::prelude::*;

use crate::components::banner::flash;
use crate::net::http::{ActionError, ApiError};
use crate::state::auth::AuthSession;
use crate::state::banner::{Banner, BannerKind};
use crate::util::auth::expire_on_unauthorized;

/// Log a failed call, end the session on 401, otherwise flash the error.
pub fn report_failure(auth: RwSignal<AuthSession>, banner: RwSignal<Banner>, action: &str, err: &ApiError, fallback: &str) {
    log::error!("{action} failed: {err}");
    if expire_on_unauthorized(auth, err) {
        return;
    }
    flash(banner, BannerKind::Error, err.user_message(fallback));
}

/// Same as [`report_failure`] for a page action. Validation failures only flash.
pub fn report_action(auth: RwSignal<AuthSession>, banner: RwSignal<Banner>, action: &str, err: &ActionError) {
    match err {
        ActionError::Invalid(msg) => flash(banner, BannerKind::Error, *msg),
        ActionError::Api { error, fallback } => report_failure(auth, banner, action, error, fallback),
    }
}

/// Flash a success message.
pub fn report_success(banner: RwSignal<Banner>, text: &str) {
    flash(banner, BannerKind::Success, text);
}
