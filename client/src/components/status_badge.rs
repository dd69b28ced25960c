//! Status chip rendered from the shared badge table.

use leptos::prelude::*;

use crate::state::status::{Badge, StatusStyle, badge_for};

#[component]
pub fn StatusBadge(badge: Badge) -> impl IntoView {
    view! {
        <span class=badge.tone.css_class()>
            <span class="badge__icon" aria-hidden="true">{badge.icon}</span>
            <span class="badge__label">{badge.label}</span>
        </span>
    }
}

/// Badge for a raw server status string of kind `S`.
pub fn status_badge<S: StatusStyle>(raw: &str) -> impl IntoView + use<S> {
    let badge = badge_for::<S>(raw);
    view! { <StatusBadge badge=badge/> }
}
