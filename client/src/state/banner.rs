//! Transient page-level notice.
//!
//! Each `show` bumps a sequence number; the auto-dismiss timer captures that
//! number and `dismiss_if` only clears the banner it was armed for, so a newer
//! message is never hidden by an older timer.

#[cfg(test)]
#[path = "banner_test.rs"]
mod banner_test;

/// Banners clear themselves after this long.
pub const BANNER_DISMISS_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "banner banner--success",
            Self::Error => "banner banner--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerMessage {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Banner {
    current: Option<BannerMessage>,
    seq: u64,
}

impl Banner {
    pub fn current(&self) -> Option<&BannerMessage> {
        self.current.as_ref()
    }

    /// Show a message and return the ticket its dismiss timer should carry.
    pub fn show(&mut self, kind: BannerKind, text: impl Into<String>) -> u64 {
        self.seq += 1;
        self.current = Some(BannerMessage { kind, text: text.into() });
        self.seq
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.show(BannerKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.show(BannerKind::Error, text)
    }

    /// Clear only if no newer message was shown since `ticket`.
    pub fn dismiss_if(&mut self, ticket: u64) {
        if ticket == self.seq {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
