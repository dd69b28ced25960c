//! Workflow statuses and their shared badge presentation.
//!
//! DESIGN
//! ======
//! Status strings arrive free-form from the server. They are parsed once into
//! closed enums; every view renders through [`StatusStyle`] so color and icon
//! choices live in exactly one table per enum. Strings that fail to parse
//! render as the neutral badge and are logged, never silently mapped.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

/// Visual tone of a badge; maps onto a CSS modifier class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Progress,
    Warning,
    Success,
    Danger,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "badge badge--neutral",
            Self::Info => "badge badge--info",
            Self::Progress => "badge badge--progress",
            Self::Warning => "badge badge--warning",
            Self::Success => "badge badge--success",
            Self::Danger => "badge badge--danger",
        }
    }
}

/// Rendered status chip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
    pub icon: &'static str,
}

impl Badge {
    pub fn neutral(label: &str) -> Self {
        Self { label: label.to_owned(), tone: Tone::Neutral, icon: "•" }
    }
}

/// Shared presentation contract for every status enum.
pub trait StatusStyle: Sized + Copy + 'static {
    /// All variants in workflow order.
    const ALL: &'static [Self];

    /// Canonical wire value.
    fn wire(self) -> &'static str;
    fn tone(self) -> Tone;
    fn icon(self) -> &'static str;

    /// Parse a wire value, ignoring case and surrounding whitespace.
    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::ALL.iter().copied().find(|s| s.wire().to_lowercase() == needle)
    }

    fn badge(self) -> Badge {
        Badge { label: self.wire().to_owned(), tone: self.tone(), icon: self.icon() }
    }
}

/// Badge for a raw server string, neutral when it does not parse.
pub fn badge_for<S: StatusStyle>(raw: &str) -> Badge {
    if let Some(status) = S::parse(raw) {
        return status.badge();
    }
    if !raw.trim().is_empty() {
        log::warn!("unrecognized status value: {raw:?}");
    }
    Badge::neutral(raw.trim())
}

// =============================================================================
// REQUEST STATUS
// =============================================================================

/// Lifecycle of a repair request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    New,
    Approved,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// Status an "approve/advance" action moves to; terminal states have none.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Approved),
            Self::Approved => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }
}

impl StatusStyle for RequestStatus {
    const ALL: &'static [Self] = &[Self::New, Self::Approved, Self::InProgress, Self::Completed, Self::Cancelled];

    fn wire(self) -> &'static str {
        match self {
            Self::New => "Новая",
            Self::Approved => "Одобрена",
            Self::InProgress => "В работе",
            Self::Completed => "Завершена",
            Self::Cancelled => "Отменена",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::New => Tone::Info,
            Self::Approved => Tone::Warning,
            Self::InProgress => Tone::Progress,
            Self::Completed => Tone::Success,
            Self::Cancelled => Tone::Danger,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::New => "✉",
            Self::Approved => "✔",
            Self::InProgress => "⚙",
            Self::Completed => "★",
            Self::Cancelled => "✖",
        }
    }
}

// =============================================================================
// DEVICE STATUS
// =============================================================================

/// Position of a device in the repaint pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Received,
    Painting,
    QualityControl,
    Ready,
    Shipped,
    Defect,
}

impl StatusStyle for DeviceStatus {
    const ALL: &'static [Self] = &[
        Self::Received,
        Self::Painting,
        Self::QualityControl,
        Self::Ready,
        Self::Shipped,
        Self::Defect,
    ];

    fn wire(self) -> &'static str {
        match self {
            Self::Received => "Принят",
            Self::Painting => "Покраска",
            Self::QualityControl => "ОТК",
            Self::Ready => "Готов",
            Self::Shipped => "Отгружен",
            Self::Defect => "Брак",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Received => Tone::Info,
            Self::Painting => Tone::Progress,
            Self::QualityControl => Tone::Warning,
            Self::Ready | Self::Shipped => Tone::Success,
            Self::Defect => Tone::Danger,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Received => "⬇",
            Self::Painting => "🖌",
            Self::QualityControl => "🔍",
            Self::Ready => "✔",
            Self::Shipped => "🚚",
            Self::Defect => "⚠",
        }
    }
}
