//! Complaints grouped by originating request, searchable by serial/comment.

#[cfg(test)]
#[path = "complaints_test.rs"]
mod complaints_test;

use leptos::prelude::*;

use super::shared::report_failure;
use super::statuses::device_href;
use crate::components::banner::BannerView;
use crate::components::layout::ConsoleLayout;
use crate::net::types::ComplaintGroup;
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::filters::filter_complaints;
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить рекламации.";

fn group_title(group: &ComplaintGroup) -> String {
    match (group.request_id, group.project.trim()) {
        (Some(id), "") => format!("Заявка №{id}"),
        (Some(id), project) => format!("Заявка №{id} · {project}"),
        (None, "") => "Без заявки".to_owned(),
        (None, project) => project.to_owned(),
    }
}

#[component]
pub fn ComplaintsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let groups = RwSignal::new(Vec::<ComplaintGroup>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().list_complaints().await {
                Ok(items) => groups.set(items),
                Err(e) => report_failure(auth, banner, "list complaints", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    let visible = move || search.with(|q| groups.with(|items| filter_complaints(items, q)));

    let group_card = |group: ComplaintGroup| {
        let title = group_title(&group);
        let count = group.complaints.len();
        view! {
            <section class="complaints__group">
                <h2 class="complaints__title">
                    {title}
                    <span class="muted">{format!(" ({count})")}</span>
                </h2>
                <ul class="complaints__list">
                    {group
                        .complaints
                        .into_iter()
                        .map(|c| {
                            view! {
                                <li class="complaints__item">
                                    <a href=device_href(&c.serial_number)>{c.serial_number.clone()}</a>
                                    <span class="complaints__comment">{c.comment}</span>
                                    <span class="muted">{clock::format_day(c.created_at.as_deref())}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </section>
        }
    };

    view! {
        <ConsoleLayout title="Рекламации">
            <BannerView banner=banner/>
            <input
                class="filters__search"
                type="search"
                placeholder="Серийный номер или комментарий"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                {move || {
                    let items = visible();
                    if items.is_empty() {
                        view! { <p class="muted">"Рекламаций нет."</p> }.into_any()
                    } else {
                        items.into_iter().map(group_card).collect_view().into_any()
                    }
                }}
            </Show>
        </ConsoleLayout>
    }
}
