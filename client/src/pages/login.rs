//! Three-step sign-in: credentials, Telegram binding, one-time code.
//!
//! SYSTEM CONTEXT
//! ==============
//! The step machine lives in `state::auth::AuthWizard`; this page wires it to
//! the auth endpoints, the debounced code auto-submit, and the resend
//! countdown. A verified code stores the bearer token and leaves for
//! `/requests`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::otp_input::OtpCells;
use crate::net::api::ApiClient;
use crate::net::http::Transport;
use crate::state::auth::{AuthSession, AuthStep, AuthWizard};
use crate::state::cooldown::ResendCooldown;
use crate::state::otp::{AUTO_SUBMIT_DEBOUNCE_MS, OtpInput};
use crate::util::auth::HOME_PATH;
use crate::util::timer;

pub const MSG_LOGIN_FAILED: &str = "Неверный логин или пароль.";
pub const MSG_TELEGRAM_FAILED: &str = "Не удалось привязать Telegram.";
pub const MSG_CODE_REJECTED: &str = "Неверный код подтверждения.";
pub const MSG_RESEND_FAILED: &str = "Не удалось отправить код повторно.";

pub fn step_title(step: AuthStep) -> &'static str {
    match step {
        AuthStep::Credentials => "Вход в систему",
        AuthStep::TelegramBind => "Привязка Telegram",
        AuthStep::CodeConfirm => "Подтверждение входа",
        AuthStep::Authenticated => "Готово",
    }
}

// =============================================================================
// COLLABORATOR CALLS
// =============================================================================

/// # Errors
///
/// Returns the banner text when the server rejects the pair.
pub async fn check_credentials<T: Transport>(api: &ApiClient<T>, username: &str, password: &str) -> Result<(), String> {
    api.login(username, password).await.map_err(|e| {
        log::error!("login failed: {e}");
        e.user_message(MSG_LOGIN_FAILED)
    })
}

/// # Errors
///
/// Returns the banner text when binding fails.
pub async fn bind_telegram<T: Transport>(api: &ApiClient<T>, username: &str, telegram_id: &str) -> Result<(), String> {
    api.bind_telegram(username, telegram_id).await.map_err(|e| {
        log::error!("telegram bind failed: {e}");
        e.user_message(MSG_TELEGRAM_FAILED)
    })
}

/// Verify the code and return the issued token.
///
/// # Errors
///
/// Returns the banner text when the code is rejected or no token comes back.
pub async fn confirm_code<T: Transport>(api: &ApiClient<T>, username: &str, code: &str) -> Result<String, String> {
    match api.verify_code(username, code).await {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        Ok(_) => {
            log::error!("verify code returned an empty token");
            Err(MSG_CODE_REJECTED.to_owned())
        }
        Err(e) => {
            log::error!("verify code failed: {e}");
            Err(e.user_message(MSG_CODE_REJECTED))
        }
    }
}

/// # Errors
///
/// Returns the banner text when the resend request fails.
pub async fn resend_code<T: Transport>(api: &ApiClient<T>, username: &str) -> Result<(), String> {
    api.resend_code(username).await.map_err(|e| {
        log::error!("resend code failed: {e}");
        e.user_message(MSG_RESEND_FAILED)
    })
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let wizard = RwSignal::new(AuthWizard::default());
    let otp = RwSignal::new(OtpInput::default());
    let cooldown = RwSignal::new(ResendCooldown::default());
    let step = Memo::new(move |_| wizard.with(|w| w.step));

    let navigate = use_navigate();
    Effect::new(move || {
        if auth.get().is_authenticated() {
            navigate(HOME_PATH, NavigateOptions::default());
        }
    });

    timer::every(1_000, move || {
        match wizard.try_with_untracked(|w| w.step) {
            Some(AuthStep::CodeConfirm) => {
                cooldown.update(ResendCooldown::tick);
                true
            }
            Some(AuthStep::Authenticated) | None => false,
            Some(_) => true,
        }
    });

    let verify = move |code: String| {
        if !wizard.try_update(|w| w.submit_code(&code)).unwrap_or(false) {
            return;
        }
        let username = wizard.with_untracked(|w| w.username.trim().to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match confirm_code(&crate::net::api::browser_client(), &username, &code).await {
                Ok(token) => {
                    wizard.update(AuthWizard::advance);
                    crate::util::auth::sign_in(auth, &token);
                }
                Err(msg) => {
                    wizard.update(|w| w.fail(msg));
                    otp.update(OtpInput::reset);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = username;
    };

    // Debounced auto-submit: one verification per completed entry.
    Effect::new(move || {
        let Some(ticket) = otp.with(OtpInput::pending_submission) else {
            return;
        };
        timer::after(AUTO_SUBMIT_DEBOUNCE_MS, move || {
            if let Some(code) = otp.try_update(|o| o.take_submission(ticket)).flatten() {
                verify(code);
            }
        });
    });

    let on_credentials = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((username, password)) = wizard.try_update(AuthWizard::submit_credentials).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match check_credentials(&crate::net::api::browser_client(), &username, &password).await {
                Ok(()) => wizard.update(AuthWizard::advance),
                Err(msg) => wizard.update(|w| w.fail(msg)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (username, password);
    };

    let on_telegram = move |_| {
        let Some(telegram_id) = wizard.try_update(AuthWizard::submit_telegram).flatten() else {
            return;
        };
        let username = wizard.with_untracked(|w| w.username.trim().to_owned());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match bind_telegram(&crate::net::api::browser_client(), &username, &telegram_id).await {
                Ok(()) => {
                    cooldown.set(ResendCooldown::default());
                    otp.update(OtpInput::reset);
                    wizard.update(AuthWizard::advance);
                }
                Err(msg) => wizard.update(|w| w.fail(msg)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (username, telegram_id);
    };

    let on_confirm = move |_| {
        let Some(ticket) = otp.with_untracked(OtpInput::pending_submission) else {
            wizard.update(|w| w.fail(crate::state::auth::MSG_CODE_INCOMPLETE));
            return;
        };
        if let Some(code) = otp.try_update(|o| o.take_submission(ticket)).flatten() {
            verify(code);
        }
    };

    let on_resend = move |_| {
        if !cooldown.try_update(ResendCooldown::resend).unwrap_or(false) {
            return;
        }
        let username = wizard.with_untracked(|w| w.username.trim().to_owned());
        otp.update(OtpInput::reset);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(msg) = resend_code(&crate::net::api::browser_client(), &username).await {
                wizard.update(|w| w.fail(msg));
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = username;
    };

    let busy = Signal::derive(move || wizard.with(|w| w.busy));

    let credentials_form = move || {
        view! {
            <form class="login-form" on:submit=on_credentials>
                <input
                    class="login-input"
                    type="text"
                    autocomplete="username"
                    placeholder="Логин"
                    prop:value=move || wizard.with(|w| w.username.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| {
                            w.username = value;
                            w.clear_error();
                        });
                    }
                />
                <input
                    class="login-input"
                    type="password"
                    autocomplete="current-password"
                    placeholder="Пароль"
                    prop:value=move || wizard.with(|w| w.password.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| {
                            w.password = value;
                            w.clear_error();
                        });
                    }
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Войти"
                </button>
            </form>
        }
    };

    let telegram_form = move || {
        view! {
            <div class="login-form">
                <p class="login-card__hint">
                    "Откройте бота компании в Telegram, отправьте команду /start и вставьте полученный ID."
                </p>
                <input
                    class="login-input"
                    type="text"
                    placeholder="Telegram ID"
                    prop:value=move || wizard.with(|w| w.telegram_id.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        wizard.update(|w| {
                            w.telegram_id = value;
                            w.clear_error();
                        });
                    }
                />
                <button class="login-button" on:click=on_telegram disabled=move || busy.get()>
                    "Продолжить"
                </button>
            </div>
        }
    };

    let code_form = move || {
        view! {
            <div class="login-form">
                <p class="login-card__hint">"Введите 6-значный код, отправленный в Telegram."</p>
                <OtpCells otp=otp disabled=busy/>
                <button class="login-button" on:click=on_confirm disabled=move || busy.get()>
                    "Подтвердить"
                </button>
                <button
                    class="login-link"
                    on:click=on_resend
                    disabled=move || busy.get() || !cooldown.get().can_resend()
                >
                    {move || cooldown.get().label()}
                </button>
            </div>
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || step_title(step.get())}</h1>
                {move || {
                    step.get()
                        .ordinal()
                        .map(|n| view! { <p class="login-card__subtitle">{format!("Шаг {n} из 3")}</p> })
                }}
                {move || match step.get() {
                    AuthStep::Credentials => credentials_form().into_any(),
                    AuthStep::TelegramBind => telegram_form().into_any(),
                    AuthStep::CodeConfirm => code_form().into_any(),
                    AuthStep::Authenticated => view! { <p class="login-message">"Вход выполнен."</p> }.into_any(),
                }}
                {move || wizard.with(|w| w.error.clone()).map(|msg| view! { <p class="login-message login-message--error">{msg}</p> })}
            </div>
        </div>
    }
}
