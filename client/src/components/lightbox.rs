//! Image modal with thumbnail strip and an independent fullscreen overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! All navigation lives in `state::gallery::Lightbox`; this component only
//! renders it and forwards clicks and window key presses.

use leptos::prelude::*;

use crate::state::gallery::Lightbox;

#[component]
pub fn LightboxView(lightbox: RwSignal<Lightbox>) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            if !lightbox.with_untracked(Lightbox::is_open) {
                return;
            }
            let key = ev.key();
            if lightbox.try_update(|lb| lb.handle_key(&key)).unwrap_or(false) {
                ev.prevent_default();
            }
        });
        on_cleanup(move || handle.remove());
    }

    let is_open = move || lightbox.with(Lightbox::is_open);
    let is_fullscreen = move || lightbox.with(Lightbox::is_fullscreen);
    let current_url = move || lightbox.with(|lb| lb.current().map(|img| img.url.clone()).unwrap_or_default());
    let current_comment = move || lightbox.with(|lb| lb.current().and_then(|img| img.comment.clone()));
    let title = move || lightbox.with(|lb| lb.category().map(|c| c.label()).unwrap_or_default());
    let counter = move || lightbox.with(|lb| format!("{} / {}", lb.index() + 1, lb.images().len()));

    let thumbnails = move || {
        lightbox.with(|lb| {
            let active = lb.index();
            lb.images()
                .iter()
                .enumerate()
                .map(|(i, img)| {
                    let url = img.url.clone();
                    view! {
                        <button
                            class=if i == active { "lightbox__thumb lightbox__thumb--active" } else { "lightbox__thumb" }
                            on:click=move |_| lightbox.update(|lb| lb.jump(i))
                        >
                            <img src=url alt=""/>
                        </button>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <Show when=is_open>
            <div class="lightbox__backdrop" on:click=move |_| lightbox.update(Lightbox::close)>
                <div class="lightbox" on:click=move |ev| ev.stop_propagation()>
                    <div class="lightbox__header">
                        <span class="lightbox__title">{title}</span>
                        <span class="lightbox__counter">{counter}</span>
                        <span class="lightbox__spacer"></span>
                        <button class="lightbox__action" title="Во весь экран" on:click=move |_| lightbox.update(Lightbox::toggle_fullscreen)>
                            "⛶"
                        </button>
                        <button class="lightbox__action" title="Закрыть" on:click=move |_| lightbox.update(Lightbox::close)>
                            "✕"
                        </button>
                    </div>
                    <div class="lightbox__stage">
                        <button class="lightbox__nav lightbox__nav--prev" title="Назад" on:click=move |_| lightbox.update(Lightbox::prev)>
                            "‹"
                        </button>
                        <img class="lightbox__image" src=current_url alt=""/>
                        <button class="lightbox__nav lightbox__nav--next" title="Вперёд" on:click=move |_| lightbox.update(Lightbox::next)>
                            "›"
                        </button>
                    </div>
                    {move || current_comment().map(|text| view! { <p class="lightbox__comment">{text}</p> })}
                    <div class="lightbox__strip">{thumbnails}</div>
                </div>
            </div>
            <Show when=is_fullscreen>
                <div class="lightbox-fullscreen" on:click=move |_| lightbox.update(Lightbox::toggle_fullscreen)>
                    <img class="lightbox-fullscreen__image" src=current_url alt=""/>
                </div>
            </Show>
        </Show>
    }
}
