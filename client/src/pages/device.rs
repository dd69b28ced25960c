//! Device detail: header facts plus the categorized photo gallery.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from the status board via `/device/:serial`. The record is fetched
//! once per serial; photos are grouped by `state::gallery` and opened in the
//! shared lightbox. An unknown serial renders a "not found" state instead of
//! an error banner.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::shared::report_failure;
use crate::components::banner::BannerView;
use crate::components::layout::ConsoleLayout;
use crate::components::lightbox::LightboxView;
use crate::components::status_badge::status_badge;
use crate::net::http::ApiError;
use crate::net::types::DeviceDetail;
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::gallery::{ImageGroup, ImageLoadTracker, Lightbox, group_images};
use crate::state::status::DeviceStatus;
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить устройство.";

#[derive(Clone, Debug, PartialEq)]
pub enum DeviceLoad {
    Loading,
    NotFound,
    Failed,
    Ready(Box<DeviceDetail>),
}

impl DeviceLoad {
    pub fn from_result(result: &Result<DeviceDetail, ApiError>) -> Self {
        match result {
            Ok(detail) => Self::Ready(Box::new(detail.clone())),
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(_) => Self::Failed,
        }
    }

    /// State for an answer fetched for `requested`, or `None` when the route
    /// has since moved to `current`.
    pub fn answer_for(requested: &str, current: &str, result: &Result<DeviceDetail, ApiError>) -> Option<Self> {
        (requested == current).then(|| Self::from_result(result))
    }
}

#[component]
pub fn DevicePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let params = use_params_map();
    let banner = RwSignal::new(Banner::default());
    let load = RwSignal::new(DeviceLoad::Loading);
    let lightbox = RwSignal::new(Lightbox::default());
    let tracker = RwSignal::new(ImageLoadTracker::default());

    let serial = Memo::new(move |_| params.read().get("serial").unwrap_or_default());

    Effect::new(move || {
        let requested = serial.get();
        load.set(DeviceLoad::Loading);
        lightbox.update(Lightbox::close);
        tracker.update(ImageLoadTracker::reset);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::browser_client().device_detail(&requested).await;
            let Some(next) = DeviceLoad::answer_for(&requested, &serial.get_untracked(), &result) else {
                return;
            };
            if let Err(e) = &result {
                if !e.is_not_found() {
                    report_failure(auth, banner, "device detail", e, MSG_LOAD_FAILED);
                }
            }
            load.set(next);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (requested, auth);
    });

    let groups = Memo::new(move |_| {
        load.with(|l| match l {
            DeviceLoad::Ready(detail) => group_images(&detail.images, &detail.comments),
            _ => Vec::new(),
        })
    });

    let section = move |group: ImageGroup| {
        let category = group.category;
        let thumbs = group
            .images
            .iter()
            .enumerate()
            .map(|(i, img)| {
                let opener = group.clone();
                let url = img.url.clone();
                view! {
                    <button
                        class=move || {
                            if tracker.with(|t| t.is_loading(category, i)) {
                                "gallery__thumb gallery__thumb--loading"
                            } else {
                                "gallery__thumb"
                            }
                        }
                        on:click=move |_| lightbox.update(|lb| lb.open(&opener, i))
                    >
                        <img
                            src=url
                            alt=""
                            loading="lazy"
                            on:load=move |_| tracker.update(|t| t.mark_loaded(category, i))
                            on:error=move |_| tracker.update(|t| t.mark_loaded(category, i))
                        />
                    </button>
                }
            })
            .collect_view();
        let notes = group
            .comments
            .iter()
            .map(|text| view! { <p class="gallery__comment">{text.clone()}</p> })
            .collect_view();
        view! {
            <section class="gallery__section">
                <h2 class="gallery__title">{category.label()}</h2>
                {notes}
                <div class="gallery__grid">{thumbs}</div>
            </section>
        }
    };

    let header = move |detail: DeviceDetail| {
        view! {
            <dl class="facts">
                <dt>"Серийный номер"</dt>
                <dd>{detail.serial_number}</dd>
                <dt>"Модель"</dt>
                <dd>{detail.model}</dd>
                <dt>"Паллет"</dt>
                <dd>{detail.pallet.unwrap_or_else(|| "—".to_owned())}</dd>
                <dt>"Статус"</dt>
                <dd>{status_badge::<DeviceStatus>(&detail.status)}</dd>
                <dt>"Создан"</dt>
                <dd>{clock::format_day(detail.created_at.as_deref())}</dd>
                <dt>"Обновлён"</dt>
                <dd>{clock::format_day(detail.updated_at.as_deref())}</dd>
            </dl>
        }
    };

    let body = move || {
        load.with(|l| match l {
            DeviceLoad::Loading => view! { <p class="muted">"Загрузка…"</p> }.into_any(),
            DeviceLoad::NotFound => view! {
                <div class="empty-state">
                    <p>{format!("Устройство «{}» не найдено.", serial.get_untracked())}</p>
                    <a href="/statuses">"К списку устройств"</a>
                </div>
            }
            .into_any(),
            DeviceLoad::Failed => view! { <p class="muted">{MSG_LOAD_FAILED}</p> }.into_any(),
            DeviceLoad::Ready(detail) => {
                let visible = groups.get().into_iter().filter(ImageGroup::is_visible).collect::<Vec<_>>();
                let empty = visible.is_empty();
                view! {
                    {header((**detail).clone())}
                    <div class="gallery">{visible.into_iter().map(section).collect_view()}</div>
                    <Show when=move || empty>
                        <p class="muted">"Фотографий пока нет."</p>
                    </Show>
                }
                .into_any()
            }
        })
    };

    view! {
        <ConsoleLayout title="Устройство">
            <BannerView banner=banner/>
            {body}
            <LightboxView lightbox=lightbox/>
        </ConsoleLayout>
    }
}
