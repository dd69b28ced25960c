//! Warehouse slots: search, create, edit, delete, and change history.

#[cfg(test)]
#[path = "warehouse_test.rs"]
mod warehouse_test;

use leptos::prelude::*;

use super::shared::{report_action, report_failure, report_success};
use crate::components::banner::BannerView;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::ConsoleLayout;
use crate::net::api::ApiClient;
use crate::net::http::{ActionError, Transport};
use crate::net::types::{SlotDraft, WarehouseSlot};
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::filters::filter_slots;
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить склад.";
pub const MSG_PLACE_REQUIRED: &str = "Укажите номер места.";
pub const MSG_SAVE_FAILED: &str = "Не удалось сохранить место.";
pub const MSG_DELETE_FAILED: &str = "Не удалось удалить место.";
pub const MSG_CREATED: &str = "Место добавлено.";
pub const MSG_UPDATED: &str = "Место обновлено.";
pub const MSG_DELETED: &str = "Место удалено.";

/// Trim the draft and require a place number.
///
/// # Errors
///
/// Returns [`MSG_PLACE_REQUIRED`] when the place number is blank.
pub fn validate_draft(draft: &SlotDraft) -> Result<SlotDraft, &'static str> {
    let place_number = draft.place_number.trim();
    if place_number.is_empty() {
        return Err(MSG_PLACE_REQUIRED);
    }
    Ok(SlotDraft { place_number: place_number.to_owned(), description: draft.description.trim().to_owned() })
}

/// Create a slot, or update `editing` when set. Returns the success text.
///
/// # Errors
///
/// Returns [`ActionError::Invalid`] for a bad draft, which issues no
/// request, otherwise the API failure with [`MSG_SAVE_FAILED`] as fallback.
pub async fn save_slot<T: Transport>(api: &ApiClient<T>, editing: Option<i64>, draft: &SlotDraft) -> Result<&'static str, ActionError> {
    let draft = validate_draft(draft).map_err(ActionError::Invalid)?;
    let result = match editing {
        Some(id) => api.update_slot(id, &draft).await.map(|()| MSG_UPDATED),
        None => api.create_slot(&draft).await.map(|()| MSG_CREATED),
    };
    result.map_err(ActionError::api(MSG_SAVE_FAILED))
}

/// # Errors
///
/// Returns the API failure with [`MSG_DELETE_FAILED`] as its fallback text.
pub async fn remove_slot<T: Transport>(api: &ApiClient<T>, id: i64) -> Result<(), ActionError> {
    api.delete_slot(id).await.map_err(ActionError::api(MSG_DELETE_FAILED))
}

#[component]
pub fn WarehousePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let slots = RwSignal::new(Vec::<WarehouseSlot>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<i64>);
    let draft = RwSignal::new(SlotDraft::default());
    let saving = RwSignal::new(false);
    let pending_delete = RwSignal::new(None::<i64>);
    let expanded = RwSignal::new(None::<i64>);
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_slots().await {
                Ok(items) => slots.set(items),
                Err(e) => report_failure(auth, banner, "list slots", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    let reset_form = move || {
        editing.set(None);
        draft.set(SlotDraft::default());
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = draft.get_untracked();
        if let Err(msg) = validate_draft(&current) {
            report_action(auth, banner, "save slot", &ActionError::Invalid(msg));
            return;
        }
        let target = editing.get_untracked();
        saving.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match save_slot(&crate::net::api::browser_client(), target, &current).await {
                Ok(text) => {
                    reset_form();
                    report_success(banner, text);
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_action(auth, banner, "save slot", &e),
            }
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    };

    let on_edit = move |slot: WarehouseSlot| {
        editing.set(Some(slot.id));
        draft.set(SlotDraft { place_number: slot.place_number, description: slot.description });
    };

    let on_delete_confirm = Callback::new(move |()| {
        let Some(id) = pending_delete.get_untracked() else {
            return;
        };
        saving.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match remove_slot(&crate::net::api::browser_client(), id).await {
                Ok(()) => {
                    if editing.get_untracked() == Some(id) {
                        reset_form();
                    }
                    report_success(banner, MSG_DELETED);
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_action(auth, banner, &format!("delete slot {id}"), &e),
            }
            pending_delete.set(None);
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });
    let on_delete_cancel = Callback::new(move |()| pending_delete.set(None));

    let visible = move || search.with(|q| slots.with(|items| filter_slots(items, q)));

    view! {
        <ConsoleLayout title="Склад">
            <BannerView banner=banner/>
            <form class="slot-form" on:submit=on_save>
                <input
                    class="slot-form__place"
                    type="text"
                    placeholder="Номер места"
                    prop:value=move || draft.with(|d| d.place_number.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.place_number = value);
                    }
                />
                <input
                    class="slot-form__description"
                    type="text"
                    placeholder="Описание"
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.description = value);
                    }
                />
                <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                    {move || if editing.get().is_some() { "Сохранить" } else { "Добавить" }}
                </button>
                <Show when=move || editing.get().is_some()>
                    <button class="btn" type="button" on:click=move |_| reset_form()>"Отмена"</button>
                </Show>
            </form>
            <input
                class="filters__search"
                type="search"
                placeholder="Поиск по номеру или описанию"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Место"</th>
                            <th>"Описание"</th>
                            <th>"Создано"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=visible key=|s| (s.id, s.place_number.clone(), s.description.clone(), s.history.len()) let:slot>
                            {
                                let id = slot.id;
                                let history = slot.history.clone();
                                let edit_slot = slot.clone();
                                view! {
                                    <tr>
                                        <td>{slot.place_number.clone()}</td>
                                        <td>{slot.description.clone()}</td>
                                        <td>{clock::format_day(slot.created_at.as_deref())}</td>
                                        <td class="table__actions">
                                            <button class="btn btn--small" on:click=move |_| expanded.update(|e| *e = if *e == Some(id) { None } else { Some(id) })>
                                                "История"
                                            </button>
                                            <button class="btn btn--small" on:click=move |_| on_edit(edit_slot.clone())>"Изменить"</button>
                                            <button class="btn btn--small btn--danger" on:click=move |_| pending_delete.set(Some(id))>"Удалить"</button>
                                        </td>
                                    </tr>
                                    <Show when=move || expanded.get() == Some(id)>
                                        <tr class="table__detail">
                                            <td colspan="4">
                                                {if history.is_empty() {
                                                    view! { <p class="muted">"Изменений нет."</p> }.into_any()
                                                } else {
                                                    view! {
                                                        <ol class="history">
                                                            {history
                                                                .iter()
                                                                .map(|entry| view! {
                                                                    <li class="history__item">
                                                                        <span>{entry.action.clone()}</span>
                                                                        <span class="history__who">{entry.actor.clone().unwrap_or_default()}</span>
                                                                        <span class="history__when">{clock::format_day(entry.timestamp.as_deref())}</span>
                                                                    </li>
                                                                })
                                                                .collect_view()}
                                                        </ol>
                                                    }
                                                    .into_any()
                                                }}
                                            </td>
                                        </tr>
                                    </Show>
                                }
                            }
                        </For>
                    </tbody>
                </table>
                <Show when=move || visible().is_empty()>
                    <p class="muted">"Нет мест."</p>
                </Show>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    message="Удалить место хранения?"
                    busy=saving
                    on_confirm=on_delete_confirm
                    on_cancel=on_delete_cancel
                />
            </Show>
        </ConsoleLayout>
    }
}
