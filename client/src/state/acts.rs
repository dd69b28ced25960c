//! Act-creation form: devices grouped by request, one shared selection.
//!
//! DESIGN
//! ======
//! Selection is a single `BTreeSet` of device ids regardless of grouping, so a
//! device can never be selected twice and the submitted id list is stable.
//! Group toggles add or remove a whole group's ids and touch nothing else.

#[cfg(test)]
#[path = "acts_test.rs"]
mod acts_test;

use std::collections::{BTreeSet, HashSet};

use crate::net::api::ApiClient;
use crate::net::http::{ActionError, FileHandle, Transport};
use crate::net::types::{AvailableDevice, NewAct};

pub const MSG_DATE_REQUIRED: &str = "Укажите дату акта.";
pub const MSG_SELECTION_REQUIRED: &str = "Выберите хотя бы одно устройство.";
pub const MSG_CREATE_FAILED: &str = "Не удалось создать акт.";
pub const MSG_CREATED: &str = "Акт создан.";
pub const MSG_SIGNATURE_UPLOADED: &str = "Подписанный акт загружен.";
pub const MSG_SIGNATURE_FAILED: &str = "Не удалось загрузить подписанный акт.";

/// Devices without an originating request share the `None` group.
pub type GroupKey = Option<i64>;

/// Devices from one request.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceGroup {
    pub key: GroupKey,
    pub devices: Vec<AvailableDevice>,
}

impl DeviceGroup {
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.devices.iter().map(|d| d.id)
    }

    pub fn title(&self) -> String {
        match self.key {
            Some(id) => format!("Заявка №{id}"),
            None => "Без заявки".to_owned(),
        }
    }
}

/// Group devices by request id in first-seen order.
pub fn group_devices(devices: &[AvailableDevice]) -> Vec<DeviceGroup> {
    let mut groups: Vec<DeviceGroup> = Vec::new();
    for device in devices {
        match groups.iter_mut().find(|g| g.key == device.request_id) {
            Some(group) => group.devices.push(device.clone()),
            None => groups.push(DeviceGroup { key: device.request_id, devices: vec![device.clone()] }),
        }
    }
    groups
}

/// Tri-state of a group header checkbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupSelection {
    None,
    Some,
    All,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActForm {
    pub date: String,
    pub comment: String,
    selected: BTreeSet<i64>,
    collapsed: HashSet<GroupKey>,
    pub submitting: bool,
}

impl ActForm {
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn toggle_device(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn group_selection(&self, group: &DeviceGroup) -> GroupSelection {
        let total = group.devices.len();
        let picked = group.ids().filter(|id| self.selected.contains(id)).count();
        match picked {
            0 => GroupSelection::None,
            n if n == total => GroupSelection::All,
            _ => GroupSelection::Some,
        }
    }

    /// Add every device of the group. Idempotent.
    pub fn select_group(&mut self, group: &DeviceGroup) {
        self.selected.extend(group.ids());
    }

    /// Remove exactly this group's devices.
    pub fn deselect_group(&mut self, group: &DeviceGroup) {
        for id in group.ids() {
            self.selected.remove(&id);
        }
    }

    /// Header checkbox: deselect the group if fully selected, otherwise select all of it.
    pub fn toggle_group(&mut self, group: &DeviceGroup) {
        if group.devices.is_empty() {
            return;
        }
        if self.group_selection(group) == GroupSelection::All {
            self.deselect_group(group);
        } else {
            self.select_group(group);
        }
    }

    /// Groups start expanded.
    pub fn is_expanded(&self, key: GroupKey) -> bool {
        !self.collapsed.contains(&key)
    }

    pub fn toggle_expanded(&mut self, key: GroupKey) {
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
    }

    /// Drop selected ids that the server no longer offers.
    pub fn retain_available(&mut self, devices: &[AvailableDevice]) {
        let available = devices.iter().map(|d| d.id).collect::<HashSet<_>>();
        self.selected.retain(|id| available.contains(id));
    }

    /// Build the request body, or the reason it cannot be sent.
    ///
    /// # Errors
    ///
    /// Returns [`MSG_DATE_REQUIRED`] or [`MSG_SELECTION_REQUIRED`].
    pub fn to_new_act(&self, next_number: Option<i64>) -> Result<NewAct, &'static str> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(MSG_DATE_REQUIRED);
        }
        if self.selected.is_empty() {
            return Err(MSG_SELECTION_REQUIRED);
        }
        Ok(NewAct {
            number: next_number,
            date: date.to_owned(),
            comment: self.comment.trim().to_owned(),
            device_ids: self.selected_ids(),
        })
    }

    /// Reset after a successful submission. Collapse state is kept.
    pub fn finish_success(&mut self) {
        self.date.clear();
        self.comment.clear();
        self.selected.clear();
        self.submitting = false;
    }

    pub fn finish_failure(&mut self) {
        self.submitting = false;
    }
}

/// Validate a form snapshot and create the act.
///
/// Validation failures return before any request is made.
///
/// # Errors
///
/// Returns [`ActionError::Invalid`] for a validation failure, otherwise the
/// API failure with [`MSG_CREATE_FAILED`] as its fallback text.
pub async fn submit_act<T: Transport>(api: &ApiClient<T>, form: &ActForm, next_number: Option<i64>) -> Result<(), ActionError> {
    let act = form.to_new_act(next_number).map_err(ActionError::Invalid)?;
    api.create_act(&act).await.map_err(ActionError::api(MSG_CREATE_FAILED))
}

/// Attach the signed scan to act `act_id`.
///
/// # Errors
///
/// Returns the API failure with [`MSG_SIGNATURE_FAILED`] as its fallback text.
pub async fn upload_signature<T: Transport>(api: &ApiClient<T>, act_id: i64, file: FileHandle) -> Result<(), ActionError> {
    api.upload_act_signature(act_id, file)
        .await
        .map_err(ActionError::api(MSG_SIGNATURE_FAILED))
}
