//! Resend-code countdown.

#[cfg(test)]
#[path = "cooldown_test.rs"]
mod cooldown_test;

/// Seconds a user must wait before requesting another code.
pub const RESEND_COOLDOWN_SECS: u32 = 30;

/// One-second countdown gating the "resend code" control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl Default for ResendCooldown {
    /// Starts armed: a code was just sent.
    fn default() -> Self {
        Self { remaining: RESEND_COOLDOWN_SECS }
    }
}

impl ResendCooldown {
    pub fn remaining(self) -> u32 {
        self.remaining
    }

    pub fn can_resend(self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second; stays at zero.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Consume the resend and re-arm. Returns `false` while still counting.
    pub fn resend(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.remaining = RESEND_COOLDOWN_SECS;
        true
    }

    /// Button caption for the current state.
    pub fn label(self) -> String {
        if self.can_resend() {
            "Отправить код повторно".to_owned()
        } else {
            format!("Повторная отправка через {} с", self.remaining)
        }
    }
}
