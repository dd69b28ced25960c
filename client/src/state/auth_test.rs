use super::*;

fn wizard_at(step: AuthStep) -> AuthWizard {
    AuthWizard { step, ..AuthWizard::default() }
}

// =============================================================
// AuthSession
// =============================================================

#[test]
fn session_requires_non_empty_token() {
    assert!(!AuthSession::default().is_authenticated());
    assert!(!AuthSession { token: Some(String::new()), loading: false }.is_authenticated());
    assert!(AuthSession { token: Some("t".to_owned()), loading: false }.is_authenticated());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_credentials_trims_username_only() {
    assert_eq!(
        validate_credentials("  ivanov ", " secret "),
        Ok(("ivanov".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "pw"), Err(MSG_CREDENTIALS_REQUIRED));
    assert_eq!(validate_credentials("ivanov", ""), Err(MSG_CREDENTIALS_REQUIRED));
}

#[test]
fn validate_telegram_id_requires_value() {
    assert_eq!(validate_telegram_id(" @repair_bot_user "), Ok("@repair_bot_user".to_owned()));
    assert_eq!(validate_telegram_id("  "), Err(MSG_TELEGRAM_REQUIRED));
}

// =============================================================
// Wizard transitions
// =============================================================

#[test]
fn wizard_starts_at_credentials() {
    let wizard = AuthWizard::default();
    assert_eq!(wizard.step, AuthStep::Credentials);
    assert_eq!(wizard.step.ordinal(), Some(1));
    assert!(!wizard.busy);
}

#[test]
fn blank_credentials_set_error_and_stay() {
    let mut wizard = AuthWizard::default();
    assert_eq!(wizard.submit_credentials(), None);
    assert_eq!(wizard.error.as_deref(), Some(MSG_CREDENTIALS_REQUIRED));
    assert!(!wizard.busy);
    assert_eq!(wizard.step, AuthStep::Credentials);
}

#[test]
fn full_happy_path_is_linear() {
    let mut wizard = AuthWizard { username: "ivanov".to_owned(), password: "pw".to_owned(), ..AuthWizard::default() };

    assert_eq!(wizard.submit_credentials(), Some(("ivanov".to_owned(), "pw".to_owned())));
    assert!(wizard.busy);
    wizard.advance();
    assert_eq!(wizard.step, AuthStep::TelegramBind);
    assert!(wizard.password.is_empty());

    wizard.telegram_id = "123456789".to_owned();
    assert_eq!(wizard.submit_telegram(), Some("123456789".to_owned()));
    wizard.advance();
    assert_eq!(wizard.step, AuthStep::CodeConfirm);

    assert!(wizard.submit_code("123456"));
    wizard.advance();
    assert_eq!(wizard.step, AuthStep::Authenticated);
    assert_eq!(wizard.step.ordinal(), None);
}

#[test]
fn busy_wizard_rejects_duplicate_submission() {
    let mut wizard = AuthWizard { username: "u".to_owned(), password: "p".to_owned(), ..AuthWizard::default() };
    assert!(wizard.submit_credentials().is_some());
    assert!(wizard.submit_credentials().is_none());
}

#[test]
fn failure_keeps_step_and_reports_message() {
    let mut wizard = AuthWizard { username: "u".to_owned(), password: "p".to_owned(), ..AuthWizard::default() };
    wizard.submit_credentials();
    wizard.fail("Неверный логин или пароль");
    assert_eq!(wizard.step, AuthStep::Credentials);
    assert!(!wizard.busy);
    assert_eq!(wizard.error.as_deref(), Some("Неверный логин или пароль"));
    assert!(wizard.submit_credentials().is_some());
    assert_eq!(wizard.error, None);
}

#[test]
fn steps_cannot_be_submitted_out_of_order() {
    let mut wizard = wizard_at(AuthStep::Credentials);
    wizard.telegram_id = "42".to_owned();
    assert_eq!(wizard.submit_telegram(), None);
    assert!(!wizard.submit_code("123456"));
}

#[test]
fn submit_code_requires_six_digits() {
    let mut wizard = wizard_at(AuthStep::CodeConfirm);
    assert!(!wizard.submit_code("12345"));
    assert_eq!(wizard.error.as_deref(), Some(MSG_CODE_INCOMPLETE));
    assert!(!wizard.submit_code("12a456"));
    assert!(wizard.submit_code("654321"));
}

#[test]
fn authenticated_is_terminal() {
    let mut wizard = wizard_at(AuthStep::Authenticated);
    wizard.advance();
    assert_eq!(wizard.step, AuthStep::Authenticated);
}
