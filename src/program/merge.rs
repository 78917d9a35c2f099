//! Linking of compiled dialogue units
//!
//! Combines a base program with any number of overlay units into one
//! runtime program. Node-name collisions resolve by override, not union:
//! the later unit's node replaces the earlier one entirely, instructions
//! and labels included.

use crate::error::Result;

use super::validate::validate_program;
use super::Program;

/// Merge `overlays` onto a deep copy of `base`, in order.
///
/// Inputs are left untouched; the result shares no storage with them.
/// Initial-value tables are concatenated in the same order, with the last
/// declaration winning when two units declare the same variable name.
/// Malformed units are rejected before any copying happens.
pub fn merge(base: &Program, overlays: &[Program]) -> Result<Program> {
    validate_program(base)?;
    for overlay in overlays {
        validate_program(overlay)?;
    }

    let mut merged = base.clone();
    for overlay in overlays {
        for (name, node) in &overlay.nodes {
            merged.nodes.insert(name.clone(), node.clone());
        }
        for (var, value) in &overlay.initial_values {
            merged.initial_values.insert(var.clone(), value.clone());
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;
    use crate::program::{Instruction, Node, OpCode, Operand};

    fn make_node(name: &str, opcodes: &[OpCode]) -> Node {
        let mut node = Node::new(name);
        for &opcode in opcodes {
            node.instructions.push(Instruction::new(opcode, Vec::new()));
        }
        node
    }

    fn make_program(nodes: Vec<Node>) -> Program {
        let mut program = Program::new();
        for node in nodes {
            program.add_node(node);
        }
        program
    }

    #[test]
    fn test_merge_empty_overlay_list_is_identity() {
        let mut base = make_program(vec![make_node("A", &[OpCode::RunLine, OpCode::Stop])]);
        base.initial_values
            .insert("$gold".to_string(), Operand::Float(10.0));

        let merged = merge(&base, &[]).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_overlay_node_replaces_base_node_wholesale() {
        let base = make_program(vec![
            make_node("A", &[OpCode::RunLine, OpCode::RunLine, OpCode::Stop]),
            make_node("B", &[OpCode::Stop]),
        ]);
        let overlay = make_program(vec![make_node("A", &[OpCode::RunCommand])]);

        let merged = merge(&base, &[overlay.clone()]).unwrap();
        assert_eq!(merged.node("A"), overlay.node("A"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_later_overlay_wins() {
        let base = make_program(vec![make_node("A", &[OpCode::Stop])]);
        let first = make_program(vec![make_node("A", &[OpCode::RunLine])]);
        let second = make_program(vec![make_node("A", &[OpCode::RunCommand])]);

        let merged = merge(&base, &[first, second.clone()]).unwrap();
        assert_eq!(merged.node("A"), second.node("A"));
    }

    #[test]
    fn test_initial_values_concatenate_last_wins() {
        let mut base = make_program(vec![make_node("A", &[OpCode::Stop])]);
        base.initial_values
            .insert("$gold".to_string(), Operand::Float(10.0));
        base.initial_values
            .insert("$name".to_string(), Operand::from("Sal"));

        let mut overlay = Program::new();
        overlay
            .initial_values
            .insert("$gold".to_string(), Operand::Float(99.0));
        overlay
            .initial_values
            .insert("$met_merchant".to_string(), Operand::Bool(false));

        let merged = merge(&base, &[overlay]).unwrap();
        assert_eq!(
            merged.initial_values.get("$gold"),
            Some(&Operand::Float(99.0))
        );
        assert_eq!(merged.initial_values.len(), 3);
    }

    #[test]
    fn test_malformed_overlay_is_rejected() {
        let base = make_program(vec![make_node("A", &[OpCode::Stop])]);
        let mut bad_node = Node::new("B");
        bad_node.labels.insert("loop".to_string(), 0);
        let overlay = make_program(vec![bad_node]);

        assert!(matches!(
            merge(&base, &[overlay]),
            Err(Error::EmptyNodeWithLabels { .. })
        ));
    }

    #[test]
    fn test_inputs_are_untouched() {
        let base = make_program(vec![make_node("A", &[OpCode::Stop])]);
        let overlay = make_program(vec![make_node("A", &[OpCode::RunLine])]);

        let mut merged = merge(&base, &[overlay.clone()]).unwrap();
        merged
            .nodes
            .get_mut("A")
            .unwrap()
            .instructions
            .push(Instruction::new(OpCode::Pop, Vec::new()));

        assert_eq!(base.node("A").unwrap().instructions.len(), 1);
        assert_eq!(overlay.node("A").unwrap().instructions.len(), 1);
    }
}
