//! Discovery feed and external-compiler interfaces
//!
//! The core never scans the filesystem. An external discovery step hands
//! it an ordered list of sources; feed order defines override precedence,
//! with the last source winning every key collision downstream. Producing
//! a stable order (e.g. lexicographic by origin path) is the discovery
//! step's contract.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lines::{LineMetadataRecord, LineRecord};
use crate::program::Program;

/// One row of a compiled unit's string table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringEntry {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub line_number: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An immutable compiled unit: one program plus its string table.
///
/// Units are produced by the external compiler (or shipped precompiled);
/// this crate only links them. The unit's binary encoding is owned by the
/// external toolchain; the JSON form read and written here is the crate's
/// own interchange representation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledUnit {
    pub program: Program,
    #[serde(default)]
    pub string_table: Vec<StringEntry>,
}

impl CompiledUnit {
    /// Fallback line records derived from the string table.
    pub fn line_records(&self) -> Vec<LineRecord> {
        self.string_table
            .iter()
            .map(|entry| LineRecord {
                id: entry.id.clone(),
                text: entry.text.clone(),
                file: entry.file.clone(),
                node: entry.node.clone(),
                line_number: entry.line_number,
            })
            .collect()
    }

    /// Metadata records derived from the string table.
    ///
    /// Tags are carried raw; the metadata builder filters the reserved
    /// `line:` prefix when the table is built.
    pub fn metadata_records(&self) -> Vec<LineMetadataRecord> {
        self.string_table
            .iter()
            .map(|entry| LineMetadataRecord {
                id: entry.id.clone(),
                node: entry.node.clone(),
                line_number: entry.line_number,
                tags: entry.tags.clone(),
            })
            .collect()
    }
}

/// One discovered dialogue source, typically one mod's dialogue folder.
#[derive(Clone, Debug, Default)]
pub struct DialogueSource {
    /// Origin path, used for precedence ordering and diagnostics.
    pub origin: PathBuf,
    /// Script files to hand to the external compiler.
    pub scripts: Vec<PathBuf>,
    /// Precompiled unit files in the JSON interchange form.
    pub unit_files: Vec<PathBuf>,
    /// Units compiled ahead of time and shipped in memory.
    pub units: Vec<CompiledUnit>,
    /// Raw fallback line rows shipped alongside precompiled units.
    pub lines: Vec<LineRecord>,
    /// Raw metadata rows shipped alongside precompiled units.
    pub metadata: Vec<LineMetadataRecord>,
}

impl DialogueSource {
    pub fn new(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }
}

/// The external script compiler.
///
/// The scripting-language front end is not part of this crate; the load
/// phase only asks it for one compiled unit per source that carries
/// scripts. An error skips that source's entire contribution while other
/// sources still load.
pub trait ScriptCompiler {
    fn compile(&self, origin: &Path, scripts: &[PathBuf]) -> Result<CompiledUnit>;
}

/// A [`ScriptCompiler`] for feeds that only carry precompiled units.
///
/// Any source that does bring scripts fails with [`Error::Compile`] and
/// is skipped by the loader's per-source isolation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCompiler;

impl ScriptCompiler for NoCompiler {
    fn compile(&self, origin: &Path, _scripts: &[PathBuf]) -> Result<CompiledUnit> {
        Err(Error::Compile {
            origin: origin.to_path_buf(),
            message: "no script compiler available".to_string(),
        })
    }
}

/// Read a compiled unit from its JSON interchange form.
pub fn read_unit_file(path: &Path) -> Result<CompiledUnit> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Write a compiled unit in its JSON interchange form.
pub fn write_unit_file(path: &Path, unit: &CompiledUnit) -> Result<()> {
    let data = serde_json::to_string_pretty(unit)?;
    fs::write(path, data)?;
    Ok(())
}
