//! Client-side predicates for the list views.
//!
//! DESIGN
//! ======
//! Each list holds the full server collection and derives its visible rows on
//! every keystroke through these pure functions. Nothing here talks to the
//! network; "today" is passed in so date windows are testable.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

use time::macros::format_description;
use time::{Date, Duration};

use super::status::{DeviceStatus, StatusStyle};
use crate::net::types::{ComplaintGroup, DeviceStatusRecord, Flow, RepairRequest, WarehouseSlot};

/// Case-insensitive substring match against any field. Blank queries match.
pub fn matches_search(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Parse the calendar day of an API date or timestamp.
///
/// Accepts `YYYY-MM-DD` (optionally followed by a time part) and `DD.MM.YYYY`.
pub fn parse_day(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Some(head) = raw.get(..10) {
        if let Ok(date) = Date::parse(head, format_description!("[year]-[month]-[day]")) {
            return Some(date);
        }
        if let Ok(date) = Date::parse(head, format_description!("[day].[month].[year]")) {
            return Some(date);
        }
    }
    None
}

/// Relative received-date window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateWindow {
    pub const ALL: [Self; 4] = [Self::All, Self::Today, Self::Week, Self::Month];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "За всё время",
            Self::Today => "Сегодня",
            Self::Week => "7 дней",
            Self::Month => "30 дней",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL.into_iter().find(|w| w.key() == key).unwrap_or_default()
    }

    fn span_days(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Today => Some(0),
            Self::Week => Some(6),
            Self::Month => Some(29),
        }
    }

    /// Whether `date` falls in the window ending on `today` (inclusive).
    ///
    /// Without a known `today` every row passes; with a window set, rows with
    /// a missing or unparseable date do not.
    pub fn contains(self, date: Option<&str>, today: Option<Date>) -> bool {
        let (Some(span), Some(today)) = (self.span_days(), today) else {
            return true;
        };
        let Some(day) = date.and_then(parse_day) else {
            return false;
        };
        let Some(start) = today.checked_sub(Duration::days(span)) else {
            return false;
        };
        day >= start && day <= today
    }
}

// =============================================================================
// PER-VIEW FILTERS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub search: String,
    pub window: DateWindow,
}

impl RequestFilter {
    pub fn apply(&self, items: &[RepairRequest], today: Option<Date>) -> Vec<RepairRequest> {
        items
            .iter()
            .filter(|r| {
                let id = r.id.to_string();
                matches_search(&self.search, &[&id, &r.project, &r.device_type])
                    && self.window.contains(r.received_at.as_deref(), today)
            })
            .cloned()
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusFilter {
    pub search: String,
    /// `None` shows every status, including unparsed ones.
    pub status: Option<DeviceStatus>,
}

impl StatusFilter {
    pub fn apply(&self, items: &[DeviceStatusRecord]) -> Vec<DeviceStatusRecord> {
        items
            .iter()
            .filter(|r| {
                matches_search(&self.search, &[&r.serial_number, &r.model])
                    && self.status.is_none_or(|s| DeviceStatus::parse(&r.status) == Some(s))
            })
            .cloned()
            .collect()
    }
}

pub fn filter_slots(items: &[WarehouseSlot], query: &str) -> Vec<WarehouseSlot> {
    items
        .iter()
        .filter(|s| matches_search(query, &[&s.place_number, &s.description]))
        .cloned()
        .collect()
}

pub fn filter_flows(items: &[Flow], query: &str) -> Vec<Flow> {
    items
        .iter()
        .filter(|f| matches_search(query, &[&f.name]))
        .cloned()
        .collect()
}

/// Keep whole groups whose project matches; otherwise keep only matching
/// complaints and drop groups left empty.
pub fn filter_complaints(groups: &[ComplaintGroup], query: &str) -> Vec<ComplaintGroup> {
    groups
        .iter()
        .filter_map(|g| {
            if matches_search(query, &[&g.project]) {
                return Some(g.clone());
            }
            let complaints = g
                .complaints
                .iter()
                .filter(|c| matches_search(query, &[&c.serial_number, &c.comment]))
                .cloned()
                .collect::<Vec<_>>();
            (!complaints.is_empty()).then(|| ComplaintGroup { complaints, ..g.clone() })
        })
        .collect()
}
