//! Button-styled file picker that hands the chosen file to a callback.

use leptos::prelude::*;

use crate::net::http::FileHandle;

#[component]
pub fn FileButton(
    #[prop(into)] label: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(optional)] accept: &'static str,
    on_file: Callback<FileHandle>,
) -> impl IntoView {
    let on_change = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::Event| {
                use wasm_bindgen::JsCast;

                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                else {
                    return;
                };
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    on_file.run(file);
                }
                // Allow picking the same file again.
                input.set_value("");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = on_file;
            move |_ev: leptos::ev::Event| {}
        }
    };

    view! {
        <label class=move || {
            if disabled.get() { "btn file-button file-button--disabled" } else { "btn file-button" }
        }>
            <span>{label}</span>
            <input
                class="file-button__input"
                type="file"
                accept=accept
                disabled=move || disabled.get()
                on:change=on_change
            />
        </label>
    }
}
