//! Flows: spreadsheet-imported device batches with progress, upload, and
//! the import template link.

#[cfg(test)]
#[path = "flows_test.rs"]
mod flows_test;

use leptos::prelude::*;

use super::shared::{report_action, report_failure, report_success};
use crate::components::banner::BannerView;
use crate::components::file_button::FileButton;
use crate::components::layout::ConsoleLayout;
use crate::net::api::ApiClient;
use crate::net::http::{ActionError, FileHandle, Transport};
use crate::net::types::FlowList;
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::filters::filter_flows;
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить потоки.";
pub const MSG_UPLOAD_FAILED: &str = "Не удалось загрузить файл потока.";
pub const MSG_UPLOADED: &str = "Поток загружен.";

/// # Errors
///
/// Returns the API failure with [`MSG_UPLOAD_FAILED`] as its fallback text.
pub async fn upload_flow_file<T: Transport>(api: &ApiClient<T>, file: FileHandle) -> Result<(), ActionError> {
    api.upload_flow(file).await.map_err(ActionError::api(MSG_UPLOAD_FAILED))
}

#[component]
pub fn FlowsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let data = RwSignal::new(FlowList::default());
    let loading = RwSignal::new(true);
    let uploading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_flows().await {
                Ok(list) => data.set(list),
                Err(e) => report_failure(auth, banner, "list flows", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    let on_file = Callback::new(move |file: FileHandle| {
        if uploading.get_untracked() {
            return;
        }
        uploading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match upload_flow_file(&crate::net::api::browser_client(), file).await {
                Ok(()) => {
                    report_success(banner, MSG_UPLOADED);
                    reload.update(|n| *n += 1);
                }
                Err(e) => report_action(auth, banner, "flow upload", &e),
            }
            uploading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = file;
    });

    let visible = move || search.with(|q| data.with(|d| filter_flows(&d.flows, q)));

    view! {
        <ConsoleLayout title="Потоки">
            <BannerView banner=banner/>
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Поиск по названию"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <FileButton label="Загрузить поток" accept=".xlsx,.xls,.csv" disabled=uploading on_file=on_file/>
                {move || {
                    data.with(|d| d.template_url.clone())
                        .map(|href| view! { <a class="btn" href=href target="_blank">"Шаблон"</a> })
                }}
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Поток"</th>
                            <th>"Создан"</th>
                            <th>"Всего"</th>
                            <th>"В работе"</th>
                            <th>"Готово"</th>
                            <th>"Прогресс"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=visible key=|f| (f.id, f.total, f.in_work, f.done) let:flow>
                            {
                                let percent = flow.progress_percent();
                                view! {
                                    <tr>
                                        <td>{flow.name.clone()}</td>
                                        <td>{clock::format_day(flow.created_at.as_deref())}</td>
                                        <td>{flow.total}</td>
                                        <td>{flow.in_work}</td>
                                        <td>{flow.done}</td>
                                        <td>
                                            <div class="progress" title=format!("{percent}%")>
                                                <div class="progress__bar" style=format!("width: {percent}%")></div>
                                            </div>
                                        </td>
                                    </tr>
                                }
                            }
                        </For>
                    </tbody>
                </table>
                <Show when=move || visible().is_empty()>
                    <p class="muted">"Нет потоков."</p>
                </Show>
            </Show>
        </ConsoleLayout>
    }
}
