//! Transient success/error notice shown at the top of a page.

use leptos::prelude::*;

use crate::state::banner::{BANNER_DISMISS_MS, Banner, BannerKind};
use crate::util::timer;

/// Show `text` and schedule its auto-dismiss.
pub fn flash(banner: RwSignal<Banner>, kind: BannerKind, text: impl Into<String>) {
    let text = text.into();
    let Some(ticket) = banner.try_update(|b| b.show(kind, text)) else {
        return;
    };
    timer::after(BANNER_DISMISS_MS, move || {
        banner.try_update(|b| b.dismiss_if(ticket));
    });
}

#[component]
pub fn BannerView(banner: RwSignal<Banner>) -> impl IntoView {
    let current = move || banner.with(|b| b.current().cloned());

    view! {
        {move || {
            current()
                .map(|msg| {
                    view! {
                        <div class=msg.kind.css_class() role="status">
                            <span class="banner__text">{msg.text}</span>
                            <button class="banner__close" title="Закрыть" on:click=move |_| banner.update(Banner::dismiss)>
                                "✕"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
