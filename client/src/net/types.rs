//! Wire DTOs for the repair-tracking REST API.
//!
//! DESIGN
//! ======
//! The server owns the schema. Everything optional on the wire is
//! `#[serde(default)]` here so a missing field degrades to an empty cell
//! rather than a failed page load. Numeric ids tolerate being sent as strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// DEVICES
// =============================================================================

/// One device with its photo documentation (`GET /atm-comment/{serial}/`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetail {
    pub serial_number: String,
    #[serde(default)]
    pub model: String,
    /// Pallet or group reference the device arrived on.
    #[serde(default)]
    pub pallet: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub images: Vec<DeviceImage>,
    #[serde(default)]
    pub comments: Vec<CategoryComment>,
}

/// An attached photo tagged with a category label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceImage {
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Free-text note attached to a photo category rather than a single photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryComment {
    #[serde(default)]
    pub category: Option<String>,
    pub text: String,
}

/// Row of the device status table (`GET /status_atm/`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusRecord {
    pub serial_number: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One entry of `GET /status_atm/?history={serial}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: String,
    #[serde(default)]
    pub changed_by: Option<String>,
    #[serde(default)]
    pub changed_at: Option<String>,
}

/// Body of `PATCH /status_atm/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusChange {
    pub serial_number: String,
    pub status: String,
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Incoming repair request (`GET /requests-list/`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepairRequest {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// ACTS
// =============================================================================

/// A completion document covering one or more devices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Act {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub device_ids: Vec<i64>,
    #[serde(default)]
    pub unsigned_file: Option<String>,
    #[serde(default)]
    pub signed_file: Option<String>,
}

impl Act {
    pub fn is_signed(&self) -> bool {
        self.signed_file.as_deref().is_some_and(|f| !f.is_empty())
    }
}

/// A device that can still be placed on an act.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableDevice {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub serial_number: String,
    #[serde(default)]
    pub model: String,
    /// Originating request; devices without one group under `None`.
    #[serde(default)]
    pub request_id: Option<i64>,
}

/// Combined payload of `GET /atm_act/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActsOverview {
    #[serde(default)]
    pub acts: Vec<Act>,
    #[serde(default)]
    pub devices: Vec<AvailableDevice>,
    #[serde(default)]
    pub next_number: Option<i64>,
}

/// Body of `POST /atm_act/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewAct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    pub date: String,
    pub comment: String,
    pub device_ids: Vec<i64>,
}

// =============================================================================
// COMPLAINTS / FLOWS
// =============================================================================

/// Complaints grouped under their originating request (`GET /complaints/`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintGroup {
    #[serde(default)]
    pub request_id: Option<i64>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub complaints: Vec<Complaint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub serial_number: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A spreadsheet-imported batch of devices with aggregate counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub in_work: u32,
    #[serde(default)]
    pub done: u32,
}

impl Flow {
    /// Completion share in whole percent, `0` for an empty flow.
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.done.min(self.total) * 100) / self.total
    }
}

/// Payload of `GET /flow_list/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowList {
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub template_url: Option<String>,
}

// =============================================================================
// WAREHOUSE
// =============================================================================

/// A physical storage place with its change log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSlot {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub place_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub history: Vec<SlotHistoryEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotHistoryEntry {
    pub action: String,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of warehouse create/update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SlotDraft {
    pub place_number: String,
    pub description: String,
}

// =============================================================================
// STAGES
// =============================================================================

/// A repair phase owning an ordered list of works.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub works: Vec<Work>,
}

impl Stage {
    /// Works in display order (`position`, then id for ties).
    pub fn ordered_works(&self) -> Vec<Work> {
        let mut works = self.works.clone();
        works.sort_by_key(|w| (w.position, w.id));
        works
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Work {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

// =============================================================================
// AUTH
// =============================================================================

/// Token returned by `POST /auth/verify-code/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom("expected integer id")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid id '{s}'"))),
        _ => Err(D::Error::custom("expected integer id")),
    }
}
