//! Photo grouping and lightbox navigation for the device detail view.
//!
//! DESIGN
//! ======
//! Images are bucketed into a fixed four-category taxonomy. The lightbox is
//! always scoped to one bucket: navigation wraps inside it and never crosses
//! into a neighbouring category. The fullscreen overlay is a second level of
//! the same viewer and shares its index.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use std::collections::HashSet;

use crate::net::types::{CategoryComment, DeviceImage};

/// Photo category. Untagged or unrecognized photos are [`ImageCategory::Work`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageCategory {
    Intake,
    Dispatch,
    #[default]
    Work,
    Complaint,
}

impl ImageCategory {
    /// Display order of the sections.
    pub const ALL: [Self; 4] = [Self::Intake, Self::Dispatch, Self::Work, Self::Complaint];

    pub fn label(self) -> &'static str {
        match self {
            Self::Intake => "Приемка",
            Self::Dispatch => "Отгрузка",
            Self::Work => "Работы",
            Self::Complaint => "Рекламация",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Dispatch => "dispatch",
            Self::Work => "work",
            Self::Complaint => "complaint",
        }
    }

    /// Resolve a server tag by label or key; anything else falls into `Work`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::Work;
        };
        let needle = tag.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.key() == needle)
            .unwrap_or(Self::Work)
    }
}

/// One category section of the gallery.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageGroup {
    pub category: ImageCategory,
    /// Images in server order.
    pub images: Vec<DeviceImage>,
    pub comments: Vec<String>,
}

impl ImageGroup {
    /// A section is shown when it has photos or notes.
    pub fn is_visible(&self) -> bool {
        !self.images.is_empty() || !self.comments.is_empty()
    }
}

/// Partition images and category comments into the four fixed groups.
///
/// Always returns four groups in [`ImageCategory::ALL`] order.
pub fn group_images(images: &[DeviceImage], comments: &[CategoryComment]) -> Vec<ImageGroup> {
    let mut groups = ImageCategory::ALL
        .into_iter()
        .map(|category| ImageGroup { category, ..ImageGroup::default() })
        .collect::<Vec<_>>();
    for image in images {
        let category = ImageCategory::from_tag(image.category.as_deref());
        groups[category_slot(category)].images.push(image.clone());
    }
    for comment in comments {
        let text = comment.text.trim();
        if text.is_empty() {
            continue;
        }
        let category = ImageCategory::from_tag(comment.category.as_deref());
        groups[category_slot(category)].comments.push(text.to_owned());
    }
    groups
}

fn category_slot(category: ImageCategory) -> usize {
    ImageCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()
}

// =============================================================================
// LIGHTBOX
// =============================================================================

/// Modal viewer scoped to a single category group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lightbox {
    /// Open group and its images; `None` when closed.
    open: Option<(ImageCategory, Vec<DeviceImage>)>,
    index: usize,
    fullscreen: bool,
}

impl Lightbox {
    /// Open on `index` within `group`. Out-of-range or empty groups are ignored.
    pub fn open(&mut self, group: &ImageGroup, index: usize) {
        if index >= group.images.len() {
            return;
        }
        self.open = Some((group.category, group.images.clone()));
        self.index = index;
        self.fullscreen = false;
    }

    /// Close both the modal and the fullscreen overlay.
    pub fn close(&mut self) {
        self.open = None;
        self.index = 0;
        self.fullscreen = false;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn category(&self) -> Option<ImageCategory> {
        self.open.as_ref().map(|(c, _)| *c)
    }

    pub fn images(&self) -> &[DeviceImage] {
        match &self.open {
            Some((_, images)) => images,
            None => &[],
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&DeviceImage> {
        self.images().get(self.index)
    }

    pub fn next(&mut self) {
        let len = self.images().len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn prev(&mut self) {
        let len = self.images().len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Thumbnail-strip jump; out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize) {
        if index < self.images().len() {
            self.index = index;
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.is_open() {
            self.fullscreen = !self.fullscreen;
        }
    }

    /// Escape: leave fullscreen first, then close the modal.
    pub fn escape(&mut self) {
        if self.fullscreen {
            self.fullscreen = false;
        } else {
            self.close();
        }
    }

    /// Keyboard dispatch for the open viewer. Returns `true` when handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            "ArrowRight" => self.next(),
            "ArrowLeft" => self.prev(),
            "Escape" => self.escape(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// IMAGE LOADING
// =============================================================================

/// Tracks which thumbnails are still loading, keyed by (category, index).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageLoadTracker {
    loaded: HashSet<(ImageCategory, usize)>,
}

impl ImageLoadTracker {
    pub fn is_loading(&self, category: ImageCategory, index: usize) -> bool {
        !self.loaded.contains(&(category, index))
    }

    /// Called from the image's `load` or `error` event.
    pub fn mark_loaded(&mut self, category: ImageCategory, index: usize) {
        self.loaded.insert((category, index));
    }

    /// Forget everything, e.g. after the device record is refetched.
    pub fn reset(&mut self) {
        self.loaded.clear();
    }
}
