//! Per-line text and metadata records
//!
//! Line IDs are a global namespace shared by every compiled unit and by
//! the external text and metadata tables: one ID identifies one
//! displayable utterance everywhere.

pub mod metadata;
pub mod text_table;

pub use metadata::MetadataTableBuilder;
pub use text_table::{text_or_placeholder, TextTableBuilder};

use serde::{Deserialize, Serialize};

/// Tags with this prefix restate the line's own ID. They are compiler
/// bookkeeping, not semantic metadata, and are filtered before storage.
pub const LINE_ID_TAG_PREFIX: &str = "line:";

/// Whether a tag merely restates the line identifier.
pub fn is_line_id_tag(tag: &str) -> bool {
    tag.starts_with(LINE_ID_TAG_PREFIX)
}

/// Fallback display text for one line, as extracted from a compiled unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub line_number: u32,
}

/// Tag annotations for one line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineMetadataRecord {
    pub id: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One row of a locale-specific override file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalizedRecord {
    pub id: String,
    /// Speaker label; empty or absent means the line carries no speaker.
    #[serde(default)]
    pub character: Option<String>,
    pub text: String,
}

impl LocalizedRecord {
    /// The text as stored in the merged table: `"<speaker>: <text>"` when
    /// a speaker label is present, the bare text otherwise.
    pub fn display_text(&self) -> String {
        match self.character.as_deref() {
            Some(speaker) if !speaker.is_empty() => format!("{speaker}: {}", self.text),
            _ => self.text.clone(),
        }
    }
}
