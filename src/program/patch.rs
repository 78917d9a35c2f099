//! Point patching of merged programs
//!
//! Splices single instructions into existing nodes while keeping every
//! jump label pointing at the same logical instruction.

use crate::error::{Error, Result};

use super::{Instruction, OpCode, Operand, Program};

/// Insert one instruction into a node at `index`, fixing up the labels.
///
/// Every label whose recorded offset is at or after the insertion point
/// shifts by one; labels strictly before `index` are untouched. `index`
/// may equal the node's current instruction count (append); anything
/// larger fails with [`Error::IndexOutOfRange`] rather than clamping.
///
/// Each call re-reads the node's current length, so callers inserting
/// several instructions into the same node must account for the shift
/// caused by their own earlier insertions.
pub fn insert_instruction(
    program: &mut Program,
    node_name: &str,
    index: usize,
    opcode: OpCode,
    operands: Vec<Operand>,
) -> Result<()> {
    let node = program
        .nodes
        .get_mut(node_name)
        .ok_or_else(|| Error::NodeNotFound(node_name.to_string()))?;

    let len = node.instructions.len();
    if index > len {
        return Err(Error::IndexOutOfRange {
            node: node_name.to_string(),
            index,
            len,
        });
    }

    node.instructions
        .insert(index, Instruction::new(opcode, operands));
    for offset in node.labels.values_mut() {
        if *offset >= index {
            *offset += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Node;

    /// Three instructions and a label `L -> 2`.
    fn make_program() -> Program {
        let mut node = Node::new("A");
        for _ in 0..3 {
            node.instructions
                .push(Instruction::new(OpCode::RunLine, Vec::new()));
        }
        node.labels.insert("L".to_string(), 2);

        let mut program = Program::new();
        program.add_node(node);
        program
    }

    #[test]
    fn test_insert_shifts_labels_at_or_after_index() {
        let mut program = make_program();
        insert_instruction(&mut program, "A", 1, OpCode::RunCommand, Vec::new()).unwrap();

        let node = program.node("A").unwrap();
        assert_eq!(node.instructions.len(), 4);
        assert_eq!(node.instructions[1].opcode, OpCode::RunCommand);
        assert_eq!(node.labels["L"], 3);
    }

    #[test]
    fn test_append_leaves_labels_untouched() {
        let mut program = make_program();
        insert_instruction(&mut program, "A", 3, OpCode::Stop, Vec::new()).unwrap();

        let node = program.node("A").unwrap();
        assert_eq!(node.instructions.len(), 4);
        assert_eq!(node.labels["L"], 2);
    }

    #[test]
    fn test_label_at_insertion_index_shifts() {
        let mut program = make_program();
        insert_instruction(&mut program, "A", 2, OpCode::Pop, Vec::new()).unwrap();

        assert_eq!(program.node("A").unwrap().labels["L"], 3);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut program = make_program();
        let err = insert_instruction(&mut program, "A", 4, OpCode::Stop, Vec::new()).unwrap_err();

        assert!(matches!(
            err,
            Error::IndexOutOfRange { index: 4, len: 3, .. }
        ));
        assert_eq!(program.node("A").unwrap().instructions.len(), 3);
    }

    #[test]
    fn test_node_not_found() {
        let mut program = make_program();
        assert!(matches!(
            insert_instruction(&mut program, "missing", 0, OpCode::Stop, Vec::new()),
            Err(Error::NodeNotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_repeated_insertion_shifts_accumulate() {
        let mut program = make_program();
        let operands = vec![Operand::from("line:opt"), Operand::from(0), Operand::from(false)];
        insert_instruction(&mut program, "A", 1, OpCode::AddOption, operands.clone()).unwrap();
        insert_instruction(&mut program, "A", 2, OpCode::AddOption, operands).unwrap();

        let node = program.node("A").unwrap();
        assert_eq!(node.instructions.len(), 5);
        assert_eq!(node.labels["L"], 4);
    }
}
