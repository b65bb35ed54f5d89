use std::fmt;
use std::path::Path;

use bytes::Bytes;

use crate::errors::AnalyzerError;

/// The two named upload fields. The name doubles as the multipart part name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    Resume,
    Jd,
}

impl SlotName {
    pub const ALL: [SlotName; 2] = [SlotName::Resume, SlotName::Jd];

    pub fn field_name(self) -> &'static str {
        match self {
            SlotName::Resume => "resume",
            SlotName::Jd => "jd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotName::Resume => "Resume",
            SlotName::Jd => "Job Description",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A user-selected file, held in memory for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Bytes,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first()
            .map(|m| m.essence_str().to_string());
        Self {
            name,
            content: content.into(),
            mime,
        }
    }

    /// Reads a file from disk. The display name is the file name component.
    pub async fn from_path(path: &Path) -> Result<Self, AnalyzerError> {
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
