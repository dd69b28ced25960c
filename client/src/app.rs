//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::pages::{
    acts::ActsPage, complaints::ComplaintsPage, device::DevicePage, flows::FlowsPage, login::LoginPage,
    requests::RequestsPage, stages::StagesPage, statuses::StatusesPage, warehouse::WarehousePage,
};
use crate::state::auth::AuthSession;
use crate::util::auth::{HOME_PATH, restore_session};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ru">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session context and sets up client-side routing. The session
/// starts in `loading` so guarded pages wait for the stored token instead of
/// bouncing to the login screen during hydration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthSession { token: None, loading: true });
    provide_context(auth);

    // Effects only run in the browser, where storage is available.
    Effect::new(move || restore_session(auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/repaint-console.css"/>
        <Title text="Repaint"/>

        <Router>
            <Routes fallback=|| "Страница не найдена.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=HOME_PATH/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("requests") view=RequestsPage/>
                <Route path=StaticSegment("statuses") view=StatusesPage/>
                <Route path=(StaticSegment("device"), ParamSegment("serial")) view=DevicePage/>
                <Route path=StaticSegment("acts") view=ActsPage/>
                <Route path=StaticSegment("warehouse") view=WarehousePage/>
                <Route path=StaticSegment("flows") view=FlowsPage/>
                <Route path=StaticSegment("complaints") view=ComplaintsPage/>
                <Route path=StaticSegment("stages") view=StagesPage/>
            </Routes>
        </Router>
    }
}
