//! Error types for `yarnlink`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `yarnlink` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Unit Validation Errors ====================
    /// A node carries a label table but no instructions to target.
    #[error("node '{node}' has a label table but no instructions")]
    EmptyNodeWithLabels {
        /// The offending node name.
        node: String,
    },

    /// A label targets an offset beyond the end of its node.
    #[error("label '{label}' in node '{node}' targets offset {offset}, but the node has {len} instructions")]
    LabelOutOfBounds {
        /// The node holding the label.
        node: String,
        /// The label name.
        label: String,
        /// The recorded offset.
        offset: usize,
        /// The node's instruction count.
        len: usize,
    },

    // ==================== Instruction Patch Errors ====================
    /// The patch target node does not exist in the program.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The patch insertion index is outside the node's instruction sequence.
    #[error("instruction index {index} out of range for node '{node}' ({len} instructions)")]
    IndexOutOfRange {
        /// The target node name.
        node: String,
        /// The requested insertion index.
        index: usize,
        /// The node's instruction count.
        len: usize,
    },

    /// A patch operand is not a string, boolean, or number.
    #[error("unsupported operand type: {0}")]
    UnsupportedOperand(String),

    // ==================== Source Processing Errors ====================
    /// A discovered dialogue source could not be read.
    #[error("failed to read dialogue source '{origin}': {message}")]
    SourceRead {
        /// The source's origin path.
        origin: PathBuf,
        /// The underlying read failure.
        message: String,
    },

    /// The external compiler rejected a source's scripts.
    #[error("failed to compile dialogue source '{origin}': {message}")]
    Compile {
        /// The source's origin path.
        origin: PathBuf,
        /// The compiler's error message.
        message: String,
    },

    // ==================== Injection Errors ====================
    /// The host runtime rejected the merged program swap.
    #[error("failed to install merged program: {0}")]
    Install(String),

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for `yarnlink` operations.
pub type Result<T> = std::result::Result<T, Error>;
