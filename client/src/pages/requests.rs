//! Repair request list with status tabs, search, and date window.
//!
//! SYSTEM CONTEXT
//! ==============
//! The status tab is a server-side filter (`?status=`); search and the
//! received-date window run client-side over the fetched rows. "Advance"
//! moves one request to the next workflow status and refetches.

#[cfg(test)]
#[path = "requests_test.rs"]
mod requests_test;

use leptos::prelude::*;

use super::shared::{report_action, report_failure, report_success};
use crate::components::banner::BannerView;
use crate::components::layout::ConsoleLayout;
use crate::components::status_badge::status_badge;
use crate::net::api::ApiClient;
use crate::net::http::{ActionError, Transport};
use crate::net::types::RepairRequest;
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::filters::{DateWindow, RequestFilter};
use crate::state::inflight::InFlight;
use crate::state::status::{RequestStatus, StatusStyle};
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить заявки.";
pub const MSG_ADVANCE_FAILED: &str = "Не удалось изменить статус заявки.";
pub const MSG_NO_NEXT_STATUS: &str = "Заявка уже в конечном статусе.";

/// Caption for the advance button, `None` for terminal or unknown statuses.
pub fn advance_label(raw_status: &str) -> Option<String> {
    let next = RequestStatus::parse(raw_status)?.next()?;
    Some(format!("→ {}", next.wire()))
}

/// Move `request` to its next status.
///
/// # Errors
///
/// Returns [`MSG_NO_NEXT_STATUS`] without a request for terminal statuses,
/// otherwise the API failure with [`MSG_ADVANCE_FAILED`] as its fallback.
pub async fn advance_request<T: Transport>(api: &ApiClient<T>, request: &RepairRequest) -> Result<RequestStatus, ActionError> {
    let next = RequestStatus::parse(&request.status)
        .and_then(RequestStatus::next)
        .ok_or(ActionError::Invalid(MSG_NO_NEXT_STATUS))?;
    api.set_request_status(request.id, next.wire())
        .await
        .map_err(ActionError::api(MSG_ADVANCE_FAILED))?;
    Ok(next)
}

#[component]
pub fn RequestsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let rows = RwSignal::new(Vec::<RepairRequest>::new());
    let loading = RwSignal::new(true);
    let tab = RwSignal::new(None::<RequestStatus>);
    let filter = RwSignal::new(RequestFilter::default());
    let inflight = RwSignal::new(InFlight::<i64>::default());
    let reload = RwSignal::new(0_u32);
    let today = clock::today();

    Effect::new(move || {
        reload.track();
        let status = tab.get().map(RequestStatus::wire);
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_requests(status).await {
                Ok(items) => rows.set(items),
                Err(e) => report_failure(auth, banner, "list requests", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = status;
    });

    let on_advance = move |request: RepairRequest| {
        if !inflight.try_update(|f| f.begin(request.id)).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::browser_client();
            match advance_request(&api, &request).await {
                Ok(next) => {
                    inflight.update(|f| f.succeed(&request.id));
                    let text = format!("Заявка №{} переведена в статус «{}».", request.id, next.wire());
                    report_success(banner, &text);
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    inflight.update(|f| f.fail(request.id, e.user_message()));
                    report_action(auth, banner, &format!("advance request {}", request.id), &e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, auth);
    };

    let visible = move || filter.with(|f| rows.with(|items| f.apply(items, today)));

    let tab_button = move |status: Option<RequestStatus>, label: &'static str| {
        view! {
            <button
                class=move || if tab.get() == status { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                on:click=move |_| tab.set(status)
            >
                {label}
            </button>
        }
    };

    view! {
        <ConsoleLayout title="Заявки">
            <BannerView banner=banner/>
            <div class="tabs">
                {tab_button(None, "Все")}
                {RequestStatus::ALL.iter().map(|&s| tab_button(Some(s), s.wire())).collect_view()}
            </div>
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Поиск по проекту, типу, номеру"
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.search = value);
                    }
                />
                <select
                    class="filters__select"
                    on:change=move |ev| {
                        let window = DateWindow::from_key(&event_target_value(&ev));
                        filter.update(|f| f.window = window);
                    }
                >
                    {DateWindow::ALL
                        .into_iter()
                        .map(|w| view! { <option value=w.key() selected=move || filter.with(|f| f.window == w)>{w.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"№"</th>
                            <th>"Проект"</th>
                            <th>"Тип устройства"</th>
                            <th>"Кол-во"</th>
                            <th>"Получена"</th>
                            <th>"Срок"</th>
                            <th>"Статус"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=visible key=|r| (r.id, r.status.clone()) let:request>
                            {
                                let id = request.id;
                                let label = advance_label(&request.status);
                                let row = request.clone();
                                view! {
                                    <tr>
                                        <td>{request.id}</td>
                                        <td>{request.project.clone()}</td>
                                        <td>{request.device_type.clone()}</td>
                                        <td>{request.quantity}</td>
                                        <td>{clock::format_day(request.received_at.as_deref())}</td>
                                        <td>{clock::format_day(request.deadline.as_deref())}</td>
                                        <td>{status_badge::<RequestStatus>(&request.status)}</td>
                                        <td>
                                            {label.map(|label| {
                                                let row = row.clone();
                                                view! {
                                                    <button
                                                        class="btn btn--small"
                                                        disabled=move || inflight.with(|f| f.is_pending(&id))
                                                        on:click=move |_| on_advance(row.clone())
                                                    >
                                                        {label}
                                                    </button>
                                                }
                                            })}
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
                <Show when=move || visible().is_empty()>
                    <p class="muted">"Нет заявок."</p>
                </Show>
            </Show>
        </ConsoleLayout>
    }
}
