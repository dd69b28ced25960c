use super::*;

fn type_code(otp: &mut OtpInput, code: &str) -> Vec<u64> {
    let mut tickets = Vec::new();
    for (i, ch) in code.chars().enumerate() {
        otp.input(i, &ch.to_string());
        if let Some(ticket) = otp.pending_submission() {
            tickets.push(ticket);
        }
    }
    tickets
}

// =============================================================
// Typing
// =============================================================

#[test]
fn typing_advances_focus() {
    let mut otp = OtpInput::default();
    otp.input(0, "4");
    assert_eq!(otp.cell(0), "4");
    assert_eq!(otp.focus(), 1);
}

#[test]
fn non_digits_are_rejected() {
    let mut otp = OtpInput::default();
    otp.input(0, "a");
    assert_eq!(otp.cell(0), "");
    assert_eq!(otp.focus(), 0);
    assert_eq!(otp.value(), "");
}

#[test]
fn focus_stays_on_last_cell() {
    let mut otp = OtpInput::default();
    otp.input(5, "9");
    assert_eq!(otp.focus(), 5);
}

#[test]
fn empty_input_clears_cell() {
    let mut otp = OtpInput::default();
    otp.input(2, "7");
    otp.input(2, "");
    assert_eq!(otp.cell(2), "");
    assert_eq!(otp.focus(), 2);
}

#[test]
fn out_of_range_cell_is_ignored() {
    let mut otp = OtpInput::default();
    otp.input(6, "1");
    assert_eq!(otp, OtpInput::default());
}

// =============================================================
// Paste
// =============================================================

#[test]
fn paste_takes_first_six_digits_only() {
    let mut otp = OtpInput::default();
    otp.paste("a1b2c3d45");
    assert_eq!(otp.value(), "12345");
    assert!(!otp.is_complete());
    assert_eq!(otp.focus(), 5);
}

#[test]
fn paste_truncates_long_numeric_input() {
    let mut otp = OtpInput::default();
    otp.paste("987654321");
    assert_eq!(otp.value(), "987654");
    assert!(otp.value().len() <= CODE_LEN);
    assert!(otp.is_complete());
}

#[test]
fn paste_clears_trailing_cells() {
    let mut otp = OtpInput::default();
    otp.paste("111111");
    otp.paste("22");
    assert_eq!(otp.value(), "22");
    assert_eq!(otp.cell(2), "");
    assert_eq!(otp.focus(), 2);
}

#[test]
fn paste_without_digits_is_noop() {
    let mut otp = OtpInput::default();
    otp.input(0, "5");
    let before = otp.clone();
    otp.paste("abc-def");
    assert_eq!(otp, before);
}

#[test]
fn multi_digit_input_is_treated_as_paste() {
    let mut otp = OtpInput::default();
    otp.input(3, "123456");
    assert_eq!(otp.code(), Some("123456".to_owned()));
}

#[test]
fn typing_over_a_filled_cell_replaces_its_digit() {
    let mut otp = OtpInput::default();
    type_code(&mut otp, "123456");

    otp.input(3, "49");
    assert_eq!(otp.value(), "123956");
    assert_eq!(otp.focus(), 4);

    otp.input(0, "71");
    assert_eq!(otp.value(), "723956");
}

#[test]
fn overwrite_of_a_completed_code_submits_again() {
    let mut otp = OtpInput::default();
    type_code(&mut otp, "123456");
    let first = otp.pending_submission().unwrap();
    assert!(otp.take_submission(first).is_some());

    otp.input(5, "60");
    let again = otp.pending_submission().unwrap();
    assert_eq!(otp.take_submission(again), Some("123450".to_owned()));
}

#[test]
fn two_new_digits_in_an_empty_cell_paste() {
    let mut otp = OtpInput::default();
    otp.input(0, "1");
    otp.input(1, "98");
    assert_eq!(otp.value(), "98");
}

// =============================================================
// Keys
// =============================================================

#[test]
fn backspace_on_empty_cell_moves_back_and_clears() {
    let mut otp = OtpInput::default();
    otp.input(0, "1");
    otp.input(1, "2");
    otp.set_focus(2);
    assert!(otp.key_down(2, "Backspace"));
    assert_eq!(otp.cell(1), "");
    assert_eq!(otp.focus(), 1);
}

#[test]
fn backspace_on_filled_cell_clears_in_place() {
    let mut otp = OtpInput::default();
    otp.input(0, "1");
    assert!(otp.key_down(0, "Backspace"));
    assert_eq!(otp.cell(0), "");
    assert_eq!(otp.focus(), 0);
}

#[test]
fn arrows_move_focus_within_bounds() {
    let mut otp = OtpInput::default();
    assert!(otp.key_down(0, "ArrowLeft"));
    assert_eq!(otp.focus(), 0);
    assert!(otp.key_down(4, "ArrowRight"));
    assert_eq!(otp.focus(), 5);
    assert!(otp.key_down(5, "ArrowRight"));
    assert_eq!(otp.focus(), 5);
    assert!(!otp.key_down(3, "Tab"));
}

// =============================================================
// Debounced auto-submit
// =============================================================

#[test]
fn full_entry_submits_exactly_once() {
    let mut otp = OtpInput::default();
    let tickets = type_code(&mut otp, "123456");
    assert_eq!(tickets.len(), 1);

    let submissions = tickets
        .iter()
        .chain(tickets.iter())
        .filter_map(|t| otp.take_submission(*t))
        .collect::<Vec<_>>();
    assert_eq!(submissions, vec!["123456".to_owned()]);
    assert_eq!(otp.pending_submission(), None);
}

#[test]
fn stale_ticket_after_edit_is_ignored() {
    let mut otp = OtpInput::default();
    let tickets = type_code(&mut otp, "123456");
    otp.input(5, "7");
    assert_eq!(otp.take_submission(tickets[0]), None);
    let fresh = otp.pending_submission().unwrap();
    assert_eq!(otp.take_submission(fresh), Some("123457".to_owned()));
}

#[test]
fn incomplete_code_never_submits() {
    let mut otp = OtpInput::default();
    let tickets = type_code(&mut otp, "12345");
    assert!(tickets.is_empty());
    assert_eq!(otp.take_submission(0), None);
}

#[test]
fn reset_allows_a_new_submission() {
    let mut otp = OtpInput::default();
    let tickets = type_code(&mut otp, "000000");
    assert!(otp.take_submission(tickets[0]).is_some());
    otp.reset();
    assert_eq!(otp.value(), "");
    assert_eq!(otp.focus(), 0);
    let tickets = type_code(&mut otp, "111111");
    assert_eq!(otp.take_submission(tickets[0]), Some("111111".to_owned()));
}
