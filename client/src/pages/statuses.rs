//! Device status board with per-device status change and history drawer.

#[cfg(test)]
#[path = "statuses_test.rs"]
mod statuses_test;

use leptos::prelude::*;

use super::shared::{report_action, report_failure};
use crate::components::banner::BannerView;
use crate::components::layout::ConsoleLayout;
use crate::components::status_badge::status_badge;
use crate::net::api::ApiClient;
use crate::net::http::{ActionError, Transport, encode_component};
use crate::net::types::{DeviceStatusRecord, StatusChange, StatusHistoryEntry};
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::filters::StatusFilter;
use crate::state::inflight::InFlight;
use crate::state::status::{DeviceStatus, StatusStyle};
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить статусы.";
pub const MSG_CHANGE_FAILED: &str = "Не удалось изменить статус.";
pub const MSG_HISTORY_FAILED: &str = "Не удалось загрузить историю.";

pub fn device_href(serial: &str) -> String {
    format!("/device/{}", encode_component(serial))
}

/// The change to send, or `None` when the device already has `target`.
pub fn status_change(record: &DeviceStatusRecord, target: DeviceStatus) -> Option<StatusChange> {
    if DeviceStatus::parse(&record.status) == Some(target) {
        return None;
    }
    Some(StatusChange { serial_number: record.serial_number.clone(), status: target.wire().to_owned() })
}

/// Option the row's status picker shows: the stored status, blank when unparsed.
pub fn picker_value(record: &DeviceStatusRecord) -> &'static str {
    DeviceStatus::parse(&record.status).map_or("", DeviceStatus::wire)
}

/// # Errors
///
/// Returns the API failure with [`MSG_CHANGE_FAILED`] as its fallback text.
pub async fn apply_status_change<T: Transport>(api: &ApiClient<T>, change: &StatusChange) -> Result<(), ActionError> {
    api.change_status(change).await.map_err(ActionError::api(MSG_CHANGE_FAILED))
}

#[derive(Clone, Debug, Default, PartialEq)]
struct HistoryDrawer {
    serial: String,
    entries: Vec<StatusHistoryEntry>,
    loading: bool,
}

#[component]
pub fn StatusesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let rows = RwSignal::new(Vec::<DeviceStatusRecord>::new());
    let loading = RwSignal::new(true);
    let filter = RwSignal::new(StatusFilter::default());
    let inflight = RwSignal::new(InFlight::<String>::default());
    let drawer = RwSignal::new(None::<HistoryDrawer>);
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_statuses().await {
                Ok(items) => rows.set(items),
                Err(e) => report_failure(auth, banner, "list statuses", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    let on_change = move |record: DeviceStatusRecord, target: DeviceStatus| {
        let Some(change) = status_change(&record, target) else {
            return;
        };
        if !inflight.try_update(|f| f.begin(change.serial_number.clone())).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::browser_client();
            match apply_status_change(&api, &change).await {
                Ok(()) => {
                    inflight.update(|f| f.succeed(&change.serial_number));
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    inflight.update(|f| f.fail(change.serial_number.clone(), e.user_message()));
                    report_action(auth, banner, &format!("status change for {}", change.serial_number), &e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = change;
    };

    let open_history = move |serial: String| {
        drawer.set(Some(HistoryDrawer { serial: serial.clone(), entries: Vec::new(), loading: true }));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::browser_client().status_history(&serial).await;
            let entries = match result {
                Ok(entries) => entries,
                Err(e) => {
                    report_failure(auth, banner, "status history", &e, MSG_HISTORY_FAILED);
                    Vec::new()
                }
            };
            // Ignore the answer if another drawer was opened meanwhile.
            drawer.update(|d| {
                if let Some(d) = d.as_mut().filter(|d| d.serial == serial) {
                    d.entries = entries;
                    d.loading = false;
                }
            });
        });
    };

    let visible = move || filter.with(|f| rows.with(|items| f.apply(items)));

    view! {
        <ConsoleLayout title="Статусы устройств">
            <BannerView banner=banner/>
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Серийный номер или модель"
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.search = value);
                    }
                />
                <select
                    class="filters__select"
                    on:change=move |ev| {
                        let status = DeviceStatus::parse(&event_target_value(&ev));
                        filter.update(|f| f.status = status);
                    }
                >
                    <option value="">"Все статусы"</option>
                    {DeviceStatus::ALL.iter().map(|s| view! { <option value=s.wire()>{s.wire()}</option> }).collect_view()}
                </select>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Серийный номер"</th>
                            <th>"Модель"</th>
                            <th>"Статус"</th>
                            <th>"Обновлён"</th>
                            <th>"Сменить статус"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=visible key=|r| (r.serial_number.clone(), r.status.clone()) let:record>
                            {
                                let serial = record.serial_number.clone();
                                let pending_key = serial.clone();
                                let history_serial = serial.clone();
                                let shown = picker_value(&record);
                                let row = record.clone();
                                view! {
                                    <tr>
                                        <td><a href=device_href(&serial)>{serial.clone()}</a></td>
                                        <td>{record.model.clone()}</td>
                                        <td>{status_badge::<DeviceStatus>(&record.status)}</td>
                                        <td>{clock::format_day(record.updated_at.as_deref())}</td>
                                        <td>
                                            <select
                                                class="filters__select"
                                                disabled=move || inflight.with(|f| f.is_pending(&pending_key))
                                                prop:value=move || {
                                                    // Snap back to the stored status once a change settles.
                                                    inflight.track();
                                                    shown
                                                }
                                                on:change=move |ev| {
                                                    if let Some(target) = DeviceStatus::parse(&event_target_value(&ev)) {
                                                        on_change(row.clone(), target);
                                                    }
                                                }
                                            >
                                                {DeviceStatus::ALL
                                                    .iter()
                                                    .map(|&s| view! { <option value=s.wire() selected=shown == s.wire()>{s.wire()}</option> })
                                                    .collect_view()}
                                            </select>
                                        </td>
                                        <td>
                                            <button class="btn btn--small" on:click=move |_| open_history(history_serial.clone())>
                                                "История"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
                <Show when=move || visible().is_empty()>
                    <p class="muted">"Нет устройств."</p>
                </Show>
            </Show>
            {move || drawer.get().map(|d| view! {
                <aside class="drawer">
                    <div class="drawer__header">
                        <h2>{format!("История: {}", d.serial)}</h2>
                        <button class="drawer__close" title="Закрыть" on:click=move |_| drawer.set(None)>"✕"</button>
                    </div>
                    {if d.loading {
                        view! { <p class="muted">"Загрузка…"</p> }.into_any()
                    } else if d.entries.is_empty() {
                        view! { <p class="muted">"Изменений нет."</p> }.into_any()
                    } else {
                        view! {
                            <ol class="history">
                                {d.entries
                                    .into_iter()
                                    .map(|entry| view! {
                                        <li class="history__item">
                                            {status_badge::<DeviceStatus>(&entry.status)}
                                            <span class="history__who">{entry.changed_by.unwrap_or_default()}</span>
                                            <span class="history__when">{clock::format_day(entry.changed_at.as_deref())}</span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ol>
                        }
                        .into_any()
                    }}
                </aside>
            })}
        </ConsoleLayout>
    }
}
