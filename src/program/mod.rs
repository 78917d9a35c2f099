//! Compiled dialogue program model
//!
//! The runtime representation shared by every compiled unit: named nodes
//! holding bytecode-like instruction sequences, jump-label tables, and
//! declared initial variable values. Node names are a per-program
//! namespace; labels are per-node. Neither overlaps with line IDs.

pub mod merge;
pub mod patch;
pub mod validate;

pub use merge::merge;
pub use patch::insert_instruction;
pub use validate::validate_program;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The closed set of VM operations understood by the dialogue runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpCode {
    /// Jump to a named label in the current node.
    JumpTo,
    /// Pop a label name off the stack and jump to it.
    Jump,
    /// Deliver a line to the player by string ID.
    RunLine,
    /// Deliver a command string to the host.
    RunCommand,
    /// Add an entry to the pending option list.
    AddOption,
    /// Present the pending options, then clear the list.
    ShowOptions,
    PushString,
    PushFloat,
    PushBool,
    PushNull,
    /// Jump to a named label if the top of the stack is falsy.
    JumpIfFalse,
    Pop,
    /// Call a host-registered function.
    CallFunc,
    PushVariable,
    StoreVariable,
    Stop,
    /// Run the node whose name is on top of the stack.
    RunNode,
}

/// A typed operand attached to an instruction.
///
/// The runtime has no integer representation; all numbers are stored as
/// 32-bit floats. Serialized untagged, so the JSON form is the bare scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    String(String),
    Bool(bool),
    Float(f32),
}

impl Operand {
    /// Classify a JSON value as an operand.
    ///
    /// Strings, booleans, and numbers are the only operand kinds the
    /// runtime understands; null, arrays, and objects are rejected with
    /// [`Error::UnsupportedOperand`].
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => Ok(Operand::String(s.clone())),
            serde_json::Value::Bool(b) => Ok(Operand::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(|f| Operand::Float(f as f32))
                .ok_or_else(|| Error::UnsupportedOperand(n.to_string())),
            other => Err(Error::UnsupportedOperand(other.to_string())),
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::String(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::String(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Bool(value)
    }
}

impl From<f32> for Operand {
    fn from(value: f32) -> Self {
        Operand::Float(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Float(value as f32)
    }
}

/// One VM instruction: an opcode plus its operands.
///
/// Instructions are addressed by zero-based position within their node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: OpCode,
    #[serde(default)]
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: OpCode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }
}

/// A named dialogue node: ordered instructions plus a jump table.
///
/// Label offsets index into `instructions`; an offset equal to the
/// instruction count addresses the end-of-node position. Several labels
/// may target the same offset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub labels: IndexMap<String, usize>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A compiled dialogue program: named nodes plus declared initial values.
///
/// Both tables keep insertion order, so merge precedence and serialized
/// output are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub nodes: IndexMap<String, Node>,
    #[serde(default)]
    pub initial_values: IndexMap<String, Operand>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the program.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node under its own name, replacing any existing node.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.name.clone(), node);
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }
}
