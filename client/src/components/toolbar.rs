//! Top navigation bar with section links and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by `ConsoleLayout` on every authenticated route so primary
//! navigation stays visible across list and detail views.

#[cfg(test)]
#[path = "toolbar_test.rs"]
mod toolbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthSession;

/// Section links in display order.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/requests", "Заявки"),
    ("/statuses", "Статусы"),
    ("/acts", "Акты"),
    ("/warehouse", "Склад"),
    ("/flows", "Потоки"),
    ("/complaints", "Рекламации"),
    ("/stages", "Этапы"),
];

/// Whether `href` is the current section. Device pages belong to "Статусы".
pub fn is_active_link(pathname: &str, href: &str) -> bool {
    if pathname.starts_with("/device/") {
        return href == "/statuses";
    }
    pathname == href || pathname.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let location = use_location();

    let on_logout = move |_| crate::util::auth::sign_out(auth);

    view! {
        <nav class="toolbar">
            <a href="/requests" class="toolbar__brand">"Repaint"</a>
            <span class="toolbar__divider"></span>
            {NAV_LINKS
                .iter()
                .map(|&(href, label)| {
                    view! {
                        <a
                            href=href
                            class=move || {
                                if is_active_link(&location.pathname.get(), href) {
                                    "toolbar__link toolbar__link--active"
                                } else {
                                    "toolbar__link"
                                }
                            }
                        >
                            {label}
                        </a>
                    }
                })
                .collect_view()}
            <span class="toolbar__spacer"></span>
            <button class="btn toolbar__logout" on:click=on_logout title="Выйти">
                "Выйти"
            </button>
        </nav>
    }
}
