//! Stage/work taxonomy editor.
//!
//! Stages own ordered works; deleting a stage removes its works on the
//! server. Every mutation refetches the whole taxonomy.

#[cfg(test)]
#[path = "stages_test.rs"]
mod stages_test;

use std::collections::HashMap;

use leptos::prelude::*;

use super::shared::{report_action, report_failure};
use crate::components::banner::BannerView;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::ConsoleLayout;
use crate::net::api::ApiClient;
use crate::net::http::{ActionError, Transport};
use crate::net::types::Stage;
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить этапы.";
pub const MSG_NAME_REQUIRED: &str = "Введите название.";
pub const MSG_SAVE_FAILED: &str = "Не удалось сохранить.";
pub const MSG_DELETE_FAILED: &str = "Не удалось удалить.";

/// What the confirmation dialog is about to delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Stage(i64),
    Work(i64),
}

impl DeleteTarget {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Stage(_) => "Удалить этап вместе со всеми работами?",
            Self::Work(_) => "Удалить работу?",
        }
    }
}

/// # Errors
///
/// Returns [`MSG_NAME_REQUIRED`] for a blank name.
pub fn validate_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(MSG_NAME_REQUIRED);
    }
    Ok(name.to_owned())
}

/// Add a stage, or a work under `stage_id` when set.
///
/// # Errors
///
/// Returns [`ActionError::Invalid`] for a blank name, which issues no
/// request, otherwise the API failure with [`MSG_SAVE_FAILED`] as fallback.
pub async fn add_entry<T: Transport>(api: &ApiClient<T>, stage_id: Option<i64>, raw_name: &str) -> Result<(), ActionError> {
    let name = validate_name(raw_name).map_err(ActionError::Invalid)?;
    let result = match stage_id {
        Some(stage_id) => api.create_work(stage_id, &name).await,
        None => api.create_stage(&name).await,
    };
    result.map_err(ActionError::api(MSG_SAVE_FAILED))
}

/// # Errors
///
/// Returns the API failure with [`MSG_DELETE_FAILED`] as its fallback text.
pub async fn delete_entry<T: Transport>(api: &ApiClient<T>, target: DeleteTarget) -> Result<(), ActionError> {
    let result = match target {
        DeleteTarget::Stage(id) => api.delete_stage(id).await,
        DeleteTarget::Work(id) => api.delete_work(id).await,
    };
    result.map_err(ActionError::api(MSG_DELETE_FAILED))
}

#[component]
pub fn StagesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let stages = RwSignal::new(Vec::<Stage>::new());
    let loading = RwSignal::new(true);
    let busy = RwSignal::new(false);
    let stage_name = RwSignal::new(String::new());
    let work_names = RwSignal::new(HashMap::<i64, String>::new());
    let pending_delete = RwSignal::new(None::<DeleteTarget>);
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_stages().await {
                Ok(items) => stages.set(items),
                Err(e) => report_failure(auth, banner, "list stages", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    // `None` adds a stage from the header form, `Some(id)` a work under that stage.
    let submit_entry = move |stage_id: Option<i64>| {
        if busy.get_untracked() {
            return;
        }
        let raw = match stage_id {
            Some(id) => work_names.with_untracked(|m| m.get(&id).cloned().unwrap_or_default()),
            None => stage_name.get_untracked(),
        };
        if let Err(msg) = validate_name(&raw) {
            report_action(auth, banner, "add stage entry", &ActionError::Invalid(msg));
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match add_entry(&crate::net::api::browser_client(), stage_id, &raw).await {
                Ok(()) => {
                    match stage_id {
                        Some(id) => work_names.update(|m| {
                            m.remove(&id);
                        }),
                        None => stage_name.set(String::new()),
                    }
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_action(auth, banner, "add stage entry", &e),
            }
            busy.set(false);
        });
    };

    let on_delete_confirm = Callback::new(move |()| {
        let Some(target) = pending_delete.get_untracked() else {
            return;
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match delete_entry(&crate::net::api::browser_client(), target).await {
                Ok(()) => reload.update(|n| *n += 1),
                Err(e) => report_action(auth, banner, &format!("delete {target:?}"), &e),
            }
            pending_delete.set(None);
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    });
    let on_delete_cancel = Callback::new(move |()| pending_delete.set(None));

    let stage_card = move |stage: Stage| {
        let id = stage.id;
        let works = stage.ordered_works();
        view! {
            <section class="stage">
                <div class="stage__header">
                    <h2 class="stage__name">{stage.name.clone()}</h2>
                    <button
                        class="btn btn--small btn--danger"
                        on:click=move |_| pending_delete.set(Some(DeleteTarget::Stage(id)))
                    >
                        "Удалить этап"
                    </button>
                </div>
                <ol class="stage__works">
                    {works
                        .into_iter()
                        .map(|work| {
                            let work_id = work.id;
                            view! {
                                <li class="stage__work">
                                    <span>{work.name}</span>
                                    <button
                                        class="btn btn--small"
                                        title="Удалить работу"
                                        on:click=move |_| pending_delete.set(Some(DeleteTarget::Work(work_id)))
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
                <form
                    class="stage__add"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        submit_entry(Some(id));
                    }
                >
                    <input
                        type="text"
                        placeholder="Новая работа"
                        prop:value=move || work_names.with(|m| m.get(&id).cloned().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            work_names.update(|m| {
                                m.insert(id, value);
                            });
                        }
                    />
                    <button class="btn btn--small" type="submit" disabled=move || busy.get()>"Добавить"</button>
                </form>
            </section>
        }
    };

    view! {
        <ConsoleLayout title="Этапы и работы">
            <BannerView banner=banner/>
            <form
                class="stage-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit_entry(None);
                }
            >
                <input
                    type="text"
                    placeholder="Название этапа"
                    prop:value=move || stage_name.get()
                    on:input=move |ev| stage_name.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Добавить этап"</button>
            </form>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                {move || stages.get().into_iter().map(stage_card).collect_view()}
                <Show when=move || stages.with(Vec::is_empty)>
                    <p class="muted">"Этапов пока нет."</p>
                </Show>
            </Show>
            {move || {
                pending_delete
                    .get()
                    .map(|target| {
                        view! {
                            <ConfirmDialog
                                message=target.prompt()
                                busy=busy
                                on_confirm=on_delete_confirm
                                on_cancel=on_delete_cancel
                            />
                        }
                    })
            }}
        </ConsoleLayout>
    }
}
