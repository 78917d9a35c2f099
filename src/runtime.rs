//! Injection phase: hand the merged results to the host runtime
//!
//! The host dialogue engine is an explicit collaborator behind
//! [`DialogueRuntime`]; how it stores its program and tables internally
//! is its own concern. The merged program and both tables are built
//! completely off to the side and only then installed, so a failure
//! while building leaves the previously installed program active.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::lines::{LocalizedRecord, MetadataTableBuilder, TextTableBuilder};
use crate::loader::DialogueAssets;
use crate::program::{insert_instruction, merge, OpCode, Operand, Program};

/// The host dialogue engine, as seen by the injection phase.
pub trait DialogueRuntime {
    /// Snapshot of the currently installed program, used as the merge base.
    fn active_program(&self) -> Result<Program>;

    /// Replace the active program wholesale.
    fn install_program(&mut self, program: Program) -> Result<()>;

    /// Append one entry to the runtime's string-lookup table.
    fn add_text_entry(&mut self, id: &str, text: &str) -> Result<()>;

    /// Append one space-joined tag string to the per-line tag store.
    fn add_metadata_entry(&mut self, id: &str, tags: &str) -> Result<()>;
}

/// A data-driven point patch applied to the merged program.
///
/// Deserializable so the patch list can live in data next to the caller's
/// hard-coded node names and offsets. Operands are JSON scalars,
/// classified on application; see [`Operand::from_json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub node: String,
    pub index: usize,
    pub opcode: OpCode,
    #[serde(default)]
    pub operands: Vec<serde_json::Value>,
}

impl PatchSpec {
    /// Apply this patch to `program`.
    pub fn apply(&self, program: &mut Program) -> Result<()> {
        let operands = self
            .operands
            .iter()
            .map(Operand::from_json)
            .collect::<Result<Vec<_>>>()?;
        insert_instruction(program, &self.node, self.index, self.opcode, operands)
    }
}

/// Outcome of one injection pass.
#[derive(Debug, Default)]
pub struct InjectReport {
    /// Node count of the installed program.
    pub nodes_installed: usize,
    /// Line-text entries appended.
    pub text_entries: usize,
    /// Metadata entries appended.
    pub metadata_entries: usize,
    /// Point patches applied.
    pub patches_applied: usize,
    /// Patches that failed their contract. Not fatal to the injection.
    pub patch_failures: Vec<(PatchSpec, Error)>,
}

/// Merge everything in `assets` onto the runtime's active program, overlay
/// the localized sources, apply the point patches, and install the results.
///
/// The text table is rebuilt from scratch on every call, so re-running
/// after a locale change reverts any ID the new locale no longer
/// overrides. A patch that violates its contract is logged and reported
/// but does not abort the injection; a failed program install does, and
/// happens before any table entry is appended.
pub fn inject<R: DialogueRuntime>(
    assets: &DialogueAssets,
    localized: &[Vec<LocalizedRecord>],
    patches: &[PatchSpec],
    runtime: &mut R,
) -> Result<InjectReport> {
    let mut report = InjectReport::default();

    let mut text = TextTableBuilder::new();
    text.add_fallback_lines(&assets.lines);
    for source in localized {
        text.add_localized_records(source);
    }
    let text_table = text.build();

    let mut metadata = MetadataTableBuilder::new();
    metadata.add_records(&assets.metadata);
    let metadata_table = metadata.build_joined();

    let base = runtime.active_program()?;
    let mut program = merge(&base, &assets.programs)?;

    for patch in patches {
        match patch.apply(&mut program) {
            Ok(()) => report.patches_applied += 1,
            Err(err) => {
                error!(node = %patch.node, index = patch.index, %err, "point patch failed");
                report.patch_failures.push((patch.clone(), err));
            }
        }
    }

    report.nodes_installed = program.len();
    runtime.install_program(program)?;

    for (id, entry) in &text_table {
        runtime.add_text_entry(id, entry)?;
        report.text_entries += 1;
    }
    for (id, tags) in &metadata_table {
        runtime.add_metadata_entry(id, tags)?;
        report.metadata_entries += 1;
    }

    debug!(
        nodes = report.nodes_installed,
        text = report.text_entries,
        metadata = report.metadata_entries,
        patches = report.patches_applied,
        "dialogue injection finished"
    );
    Ok(report)
}
