//! Structural validation of compiled units

use crate::error::{Error, Result};

use super::Program;

/// Check the structural invariants of a compiled program.
///
/// A node with a non-empty label table must have instructions, and every
/// label offset must stay within `0..=instructions.len()` (a label may
/// target the end-of-node position).
pub fn validate_program(program: &Program) -> Result<()> {
    for (name, node) in &program.nodes {
        if node.instructions.is_empty() && !node.labels.is_empty() {
            return Err(Error::EmptyNodeWithLabels { node: name.clone() });
        }

        let len = node.instructions.len();
        for (label, &offset) in &node.labels {
            if offset > len {
                return Err(Error::LabelOutOfBounds {
                    node: name.clone(),
                    label: label.clone(),
                    offset,
                    len,
                });
            }
        }
    }
    Ok(())
}
