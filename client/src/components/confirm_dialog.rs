//! Yes/no modal guarding destructive actions.

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    #[prop(into, optional)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_cancel.run(());
        }
    };

    view! {
        <div class="dialog__backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" tabindex="0" on:click=move |ev| ev.stop_propagation() on:keydown=on_keydown>
                <p class="dialog__message">{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(()) disabled=move || busy.get()>
                        "Отмена"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(()) disabled=move || busy.get()>
                        "Удалить"
                    </button>
                </div>
            </div>
        </div>
    }
}
