//! Six single-digit inputs bound to an `OtpInput` model.
//!
//! The model owns the focus index; an effect moves DOM focus to the matching
//! cell whenever it changes, so paste, typing, and arrow keys all route
//! through the same transitions.

use leptos::prelude::*;

use crate::state::otp::{CODE_LEN, OtpInput};

#[component]
pub fn OtpCells(otp: RwSignal<OtpInput>, #[prop(into, optional)] disabled: Signal<bool>) -> impl IntoView {
    let cells: [NodeRef<leptos::html::Input>; CODE_LEN] = std::array::from_fn(|_| NodeRef::new());

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let focus = otp.with(OtpInput::focus);
        if let Some(input) = cells.get(focus).and_then(|cell| cell.get()) {
            let _ = input.focus();
        }
    });

    let on_paste = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::ClipboardEvent| {
                ev.prevent_default();
                let Some(text) = ev.clipboard_data().and_then(|data| data.get_data("text").ok()) else {
                    return;
                };
                otp.update(|o| o.paste(&text));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::ClipboardEvent| {}
        }
    };

    view! {
        <div class="otp" role="group" aria-label="Код подтверждения">
            {(0..CODE_LEN)
                .map(|index| {
                    view! {
                        <input
                            node_ref=cells[index]
                            class="otp__cell"
                            type="text"
                            inputmode="numeric"
                            autocomplete="one-time-code"
                            aria-label=format!("Цифра {}", index + 1)
                            prop:value=move || otp.with(|o| o.cell(index))
                            disabled=move || disabled.get()
                            on:input=move |ev| otp.update(|o| o.input(index, &event_target_value(&ev)))
                            on:focus=move |_| otp.update(|o| o.set_focus(index))
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                let key = ev.key();
                                let handled = otp.try_update(|o| o.key_down(index, &key)).unwrap_or(false);
                                if handled {
                                    ev.prevent_default();
                                }
                            }
                            on:paste=on_paste
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
