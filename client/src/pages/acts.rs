//! Acts: existing documents with signature upload, and the grouped
//! device-selection form for creating a new act.

use leptos::prelude::*;

use super::shared::{report_action, report_failure, report_success};
use crate::components::banner::BannerView;
use crate::components::file_button::FileButton;
use crate::components::layout::ConsoleLayout;
use crate::net::http::{ActionError, FileHandle};
use crate::net::types::{Act, ActsOverview};
use crate::state::acts::{ActForm, DeviceGroup, GroupSelection, MSG_CREATED, MSG_SIGNATURE_UPLOADED, group_devices};
use crate::state::auth::AuthSession;
use crate::state::banner::Banner;
use crate::state::inflight::InFlight;
use crate::util::clock;

pub const MSG_LOAD_FAILED: &str = "Не удалось загрузить акты.";

#[component]
pub fn ActsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let banner = RwSignal::new(Banner::default());
    let overview = RwSignal::new(ActsOverview::default());
    let loading = RwSignal::new(true);
    let form = RwSignal::new(ActForm::default());
    let uploads = RwSignal::new(InFlight::<i64>::default());
    let reload = RwSignal::new(0_u32);

    Effect::new(move || {
        reload.track();
        loading.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::browser_client().acts_overview().await {
                Ok(data) => {
                    form.update(|f| f.retain_available(&data.devices));
                    overview.set(data);
                }
                Err(e) => report_failure(auth, banner, "acts overview", &e, MSG_LOAD_FAILED),
            }
            loading.set(false);
        });
    });

    let groups = Memo::new(move |_| overview.with(|o| group_devices(&o.devices)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.with_untracked(|f| f.submitting) {
            return;
        }
        let snapshot = form.get_untracked();
        let next_number = overview.with_untracked(|o| o.next_number);
        if let Err(msg) = snapshot.to_new_act(next_number) {
            report_action(auth, banner, "create act", &ActionError::Invalid(msg));
            return;
        }
        form.update(|f| f.submitting = true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::browser_client();
            match crate::state::acts::submit_act(&api, &snapshot, next_number).await {
                Ok(()) => {
                    form.update(ActForm::finish_success);
                    report_success(banner, MSG_CREATED);
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    form.update(ActForm::finish_failure);
                    report_action(auth, banner, "create act", &e);
                }
            }
        });
    };

    let on_signature = move |act_id: i64, file: FileHandle| {
        if !uploads.try_update(|u| u.begin(act_id)).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = crate::net::api::browser_client();
            match crate::state::acts::upload_signature(&api, act_id, file).await {
                Ok(()) => {
                    uploads.update(|u| u.succeed(&act_id));
                    report_success(banner, MSG_SIGNATURE_UPLOADED);
                    reload.update(|n| *n += 1);
                }
                Err(e) => {
                    uploads.update(|u| u.fail(act_id, e.user_message()));
                    report_action(auth, banner, &format!("signature upload for act {act_id}"), &e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = file;
    };

    let act_row = move |act: Act| {
        let id = act.id;
        let number = act.number.map_or_else(|| format!("#{id}"), |n| n.to_string());
        let signed = act.signed_file.clone().filter(|_| act.is_signed());
        let on_file = Callback::new(move |file: FileHandle| on_signature(id, file));
        view! {
            <tr>
                <td>{number}</td>
                <td>{clock::format_day(act.date.as_deref())}</td>
                <td>{act.comment.clone().unwrap_or_default()}</td>
                <td>{act.device_ids.len()}</td>
                <td>
                    {act.unsigned_file.clone().map(|href| view! { <a href=href target="_blank">"Скачать"</a> })}
                </td>
                <td>
                    {match signed {
                        Some(href) => view! { <a href=href target="_blank">"Подписан"</a> }.into_any(),
                        None => view! {
                            <FileButton
                                label="Загрузить подписанный"
                                accept=".pdf,image/*"
                                disabled=Signal::derive(move || uploads.with(|u| u.is_pending(&id)))
                                on_file=on_file
                            />
                            {move || uploads.with(|u| u.error(&id).map(str::to_owned)).map(|msg| view! { <span class="error-text">{msg}</span> })}
                        }
                        .into_any(),
                    }}
                </td>
            </tr>
        }
    };

    let group_block = move |group: DeviceGroup| {
        let key = group.key;
        let header_group = group.clone();
        let state = {
            let group = group.clone();
            move || form.with(|f| f.group_selection(&group))
        };
        let checked = {
            let state = state.clone();
            move || state() == GroupSelection::All
        };
        let indeterminate = move || state() == GroupSelection::Some;
        let devices = group.devices.clone();
        view! {
            <div class="act-form__group">
                <div class="act-form__group-header">
                    <input
                        type="checkbox"
                        prop:checked=checked
                        prop:indeterminate=indeterminate
                        on:change=move |_| form.update(|f| f.toggle_group(&header_group))
                    />
                    <button type="button" class="act-form__group-title" on:click=move |_| form.update(|f| f.toggle_expanded(key))>
                        {group.title()}
                        {format!(" ({})", group.devices.len())}
                    </button>
                </div>
                <Show when=move || form.with(|f| f.is_expanded(key))>
                    <div class="act-form__devices">
                        {devices
                            .iter()
                            .map(|device| {
                                let id = device.id;
                                view! {
                                    <label class="act-form__device">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || form.with(|f| f.is_selected(id))
                                            on:change=move |_| form.update(|f| f.toggle_device(id))
                                        />
                                        <span>{device.serial_number.clone()}</span>
                                        <span class="muted">{device.model.clone()}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <ConsoleLayout title="Акты">
            <BannerView banner=banner/>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка…"</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Номер"</th>
                            <th>"Дата"</th>
                            <th>"Комментарий"</th>
                            <th>"Устройств"</th>
                            <th>"Акт"</th>
                            <th>"Подпись"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || overview.with(|o| o.acts.clone()).into_iter().map(act_row).collect_view()}
                    </tbody>
                </table>
            </Show>
            <form class="act-form" on:submit=on_submit>
                <h2>
                    {move || {
                        overview
                            .with(|o| o.next_number)
                            .map_or_else(|| "Новый акт".to_owned(), |n| format!("Новый акт №{n}"))
                    }}
                </h2>
                <div class="act-form__fields">
                    <input
                        type="date"
                        class="act-form__date"
                        prop:value=move || form.with(|f| f.date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.date = value);
                        }
                    />
                    <textarea
                        class="act-form__comment"
                        placeholder="Комментарий"
                        prop:value=move || form.with(|f| f.comment.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.comment = value);
                        }
                    ></textarea>
                </div>
                <div class="act-form__groups">
                    {move || groups.get().into_iter().map(group_block).collect_view()}
                </div>
                <div class="act-form__footer">
                    <span class="muted">{move || format!("Выбрано устройств: {}", form.with(ActForm::selected_count))}</span>
                    <button class="btn btn--primary" type="submit" disabled=move || form.with(|f| f.submitting)>
                        "Создать акт"
                    </button>
                </div>
            </form>
        </ConsoleLayout>
    }
}
