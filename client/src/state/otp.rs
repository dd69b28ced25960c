//! Six-cell one-time-code entry model.
//!
//! DESIGN
//! ======
//! Each cell holds at most one digit and `focus` is the index the view must
//! keep focused. Auto-submit is debounced with revision tickets: every edit
//! bumps `revision`, a timer scheduled for an older revision is a no-op, and
//! a completed code is handed out at most once until it is edited again.

#[cfg(test)]
#[path = "otp_test.rs"]
mod otp_test;

/// Number of digits in a one-time code.
pub const CODE_LEN: usize = 6;

/// Delay between the last keystroke and the automatic submission.
pub const AUTO_SUBMIT_DEBOUNCE_MS: u32 = 400;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OtpInput {
    cells: [Option<char>; CODE_LEN],
    focus: usize,
    revision: u64,
    submitted: bool,
}

impl OtpInput {
    /// Digit in `index` as a string for the input's `value`.
    pub fn cell(&self, index: usize) -> String {
        self.cells
            .get(index)
            .copied()
            .flatten()
            .map(String::from)
            .unwrap_or_default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(CODE_LEN - 1);
    }

    /// Entered digits, left to right, gaps skipped.
    pub fn value(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Full code when every cell is filled.
    pub fn code(&self) -> Option<String> {
        self.is_complete().then(|| self.value())
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.submitted = false;
    }

    /// Apply the raw `input` event value of cell `index`.
    ///
    /// Non-digits are dropped. An empty value clears the cell. Typing into a
    /// filled cell yields its old digit plus the new one, and the new one
    /// replaces it in place. Any other multi-digit value (autofill, IME) is
    /// treated as a paste.
    pub fn input(&mut self, index: usize, raw: &str) {
        if index >= CODE_LEN {
            return;
        }
        let mut digits = raw.chars().filter(char::is_ascii_digit).collect::<Vec<_>>();
        if let (Some(old), [first, second]) = (self.cells[index], digits.as_slice()) {
            if *first == old {
                digits = vec![*second];
            } else if *second == old {
                digits = vec![*first];
            }
        }
        match digits.as_slice() {
            [] if raw.is_empty() => {
                self.cells[index] = None;
                self.focus = index;
                self.touch();
            }
            [] => {}
            [digit] => {
                self.cells[index] = Some(*digit);
                self.focus = (index + 1).min(CODE_LEN - 1);
                self.touch();
            }
            _ => self.paste(raw),
        }
    }

    /// Distribute the first digits found in `text` from the first cell.
    ///
    /// At most [`CODE_LEN`] digits are taken; trailing cells are cleared.
    /// Text with no digits leaves the input untouched.
    pub fn paste(&mut self, text: &str) {
        let digits = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(CODE_LEN)
            .collect::<Vec<_>>();
        if digits.is_empty() {
            return;
        }
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = digits.get(i).copied();
        }
        self.focus = digits.len().min(CODE_LEN - 1);
        self.touch();
    }

    /// Navigation keys on cell `index`. Returns `true` when the key was handled.
    pub fn key_down(&mut self, index: usize, key: &str) -> bool {
        if index >= CODE_LEN {
            return false;
        }
        match key {
            "Backspace" => {
                if self.cells[index].is_some() {
                    self.cells[index] = None;
                    self.focus = index;
                } else if index > 0 {
                    self.cells[index - 1] = None;
                    self.focus = index - 1;
                } else {
                    return true;
                }
                self.touch();
                true
            }
            "ArrowLeft" => {
                self.focus = index.saturating_sub(1);
                true
            }
            "ArrowRight" => {
                self.focus = (index + 1).min(CODE_LEN - 1);
                true
            }
            _ => false,
        }
    }

    /// Ticket for a debounced auto-submit when the code is complete and not
    /// yet handed out.
    pub fn pending_submission(&self) -> Option<u64> {
        (self.is_complete() && !self.submitted).then_some(self.revision)
    }

    /// Redeem a debounce ticket. Yields the code only if nothing changed since
    /// the ticket was issued and the code has not been submitted already.
    pub fn take_submission(&mut self, ticket: u64) -> Option<String> {
        if ticket != self.revision || self.submitted {
            return None;
        }
        let code = self.code()?;
        self.submitted = true;
        Some(code)
    }

    /// Clear all cells after a rejected code and focus the first one.
    pub fn reset(&mut self) {
        self.cells = [None; CODE_LEN];
        self.focus = 0;
        self.touch();
    }
}
