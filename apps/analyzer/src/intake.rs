#![allow(dead_code)]

//! Upload stage: two named file slots filled by picker selection or drag-and-drop.
//!
//! No type or size checks happen here; the scoring service enforces those.

use crate::models::{SlotName, UploadFile};

/// Advisory text shown next to each slot.
pub const ACCEPT_HINT: &str = "PDF or DOCX (max 5MB)";
/// Extensions the picker offers by default.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Advisory only: whether the picker would have offered this file.
pub fn is_accepted_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSlot {
    file: Option<UploadFile>,
    dragging: bool,
}

impl FileSlot {
    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }

    /// True while something is being dragged over this slot's drop target.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// First file wins; an empty list leaves the slot as it was.
    fn accept(&mut self, files: Vec<UploadFile>) -> bool {
        match files.into_iter().next() {
            Some(file) => {
                self.file = Some(file);
                true
            }
            None => false,
        }
    }
}

/// The resume / job-description pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    resume: FileSlot,
    jd: FileSlot,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, name: SlotName) -> &FileSlot {
        match name {
            SlotName::Resume => &self.resume,
            SlotName::Jd => &self.jd,
        }
    }

    fn slot_mut(&mut self, name: SlotName) -> &mut FileSlot {
        match name {
            SlotName::Resume => &mut self.resume,
            SlotName::Jd => &mut self.jd,
        }
    }

    /// Picker selection. Returns whether the slot changed.
    pub fn select(&mut self, name: SlotName, files: Vec<UploadFile>) -> bool {
        let changed = self.slot_mut(name).accept(files);
        if changed {
            tracing::debug!(slot = %name, file = ?self.slot(name).display_name(), "file selected");
        }
        changed
    }

    /// Completed drop. Always ends the drag, even when nothing was dropped.
    pub fn drop_files(&mut self, name: SlotName, files: Vec<UploadFile>) -> bool {
        let slot = self.slot_mut(name);
        slot.dragging = false;
        let changed = slot.accept(files);
        if changed {
            tracing::debug!(slot = %name, file = ?self.slot(name).display_name(), "file dropped");
        }
        changed
    }

    pub fn drag_over(&mut self, name: SlotName) {
        self.slot_mut(name).dragging = true;
    }

    pub fn drag_leave(&mut self, name: SlotName) {
        self.slot_mut(name).dragging = false;
    }

    pub fn clear(&mut self, name: SlotName) {
        self.slot_mut(name).file = None;
        tracing::debug!(slot = %name, "slot cleared");
    }

    pub fn is_complete(&self) -> bool {
        !self.resume.is_empty() && !self.jd.is_empty()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && self.is_complete()
    }

    /// Both files, if both slots are filled.
    pub fn files(&self) -> Option<(UploadFile, UploadFile)> {
        match (&self.resume.file, &self.jd.file) {
            (Some(resume), Some(jd)) => Some((resume.clone(), jd.clone())),
            _ => None,
        }
    }
}
