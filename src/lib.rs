//! # yarnlink
//!
//! A linker for compiled dialogue programs. Game mods ship independently
//! compiled dialogue units; `yarnlink` merges them into the one program a
//! dialogue runtime can execute, merges their per-line text tables with a
//! localization-fallback policy, and merges per-line tag metadata - all
//! without re-compiling from source and without corrupting control-flow
//! offsets.
//!
//! ## What it does
//!
//! - **Program merging** - overlay units onto a base program; node-name
//!   collisions resolve by whole-node override, initial-value tables
//!   concatenate.
//! - **Instruction patching** - splice single instructions into a node
//!   and shift every affected jump label so control flow stays correct.
//! - **Text tables** - fallback text from compiled units, overridden per
//!   line by the active locale's records, with speaker formatting.
//! - **Line metadata** - merged tag sets with the compiler's
//!   self-identifying `line:` tags filtered out.
//! - **Load & inject phases** - gather sources with per-source failure
//!   isolation, then hand the merged results to the host runtime as one
//!   atomic replacement.
//!
//! ## Quick start
//!
//! ### Merging units
//!
//! ```
//! use yarnlink::program::{self, Node, Program};
//!
//! let mut base = Program::new();
//! base.add_node(Node::new("Harbor"));
//!
//! // The overlay's "Harbor" replaces the base node wholesale.
//! let mut overlay = Program::new();
//! overlay.add_node(Node::new("Harbor"));
//! overlay.add_node(Node::new("Harbor_Night"));
//!
//! let merged = program::merge(&base, &[overlay])?;
//! assert_eq!(merged.len(), 2);
//! # Ok::<(), yarnlink::Error>(())
//! ```
//!
//! ### Patching without breaking jumps
//!
//! ```
//! use yarnlink::program::{insert_instruction, Instruction, Node, OpCode, Operand, Program};
//!
//! let mut node = Node::new("Harbor");
//! node.instructions.push(Instruction::new(OpCode::RunLine, vec![Operand::from("line:hb_1")]));
//! node.instructions.push(Instruction::new(OpCode::Stop, vec![]));
//! node.labels.insert("end".to_string(), 1);
//!
//! let mut program = Program::new();
//! program.add_node(node);
//!
//! insert_instruction(&mut program, "Harbor", 1, OpCode::RunCommand, vec![Operand::from("wait 1")])?;
//! // The label still points at the Stop instruction.
//! assert_eq!(program.node("Harbor").unwrap().labels["end"], 2);
//! # Ok::<(), yarnlink::Error>(())
//! ```
//!
//! ### Building the line-text table
//!
//! ```
//! use yarnlink::lines::{LocalizedRecord, TextTableBuilder};
//!
//! let mut builder = TextTableBuilder::new();
//! builder.add_fallback_entries([("line:hb_1".to_string(), "Morning.".to_string())]);
//! builder.add_localized_records(&[LocalizedRecord {
//!     id: "line:hb_1".to_string(),
//!     character: Some("Dockhand".to_string()),
//!     text: "Bonjour.".to_string(),
//! }]);
//!
//! let table = builder.build();
//! assert_eq!(table["line:hb_1"], "Dockhand: Bonjour.");
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `yarnlink` command-line binary

pub mod error;
pub mod lines;
pub mod loader;
pub mod program;
pub mod runtime;
pub mod source;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::lines::{
        LineMetadataRecord, LineRecord, LocalizedRecord, MetadataTableBuilder, TextTableBuilder,
    };
    pub use crate::loader::{DialogueAssets, LoadReport};
    pub use crate::program::{
        insert_instruction, merge, validate_program, Instruction, Node, OpCode, Operand, Program,
    };
    pub use crate::runtime::{inject, DialogueRuntime, InjectReport, PatchSpec};
    pub use crate::source::{
        read_unit_file, write_unit_file, CompiledUnit, DialogueSource, NoCompiler, ScriptCompiler,
        StringEntry,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
