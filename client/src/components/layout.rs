//! Authenticated page frame with the route guard and toolbar.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::toolbar::Toolbar;
use crate::state::auth::AuthSession;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ConsoleLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <div class="console">
            <Toolbar/>
            <main class="console__main">
                <h1 class="console__title">{title}</h1>
                {children()}
            </main>
        </div>
    }
}
