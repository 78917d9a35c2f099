//! CLI command for inspecting a compiled unit

use std::path::Path;

use crate::source::read_unit_file;

/// Print a summary of a unit's nodes, labels, and tables.
pub fn execute(unit_path: &Path) -> anyhow::Result<()> {
    let unit = read_unit_file(unit_path)?;

    println!(
        "{}: {} nodes, {} string table entries",
        unit_path.display(),
        unit.program.len(),
        unit.string_table.len()
    );

    for (name, node) in &unit.program.nodes {
        println!("  {name}: {} instructions", node.instructions.len());
        for (label, offset) in &node.labels {
            println!("    {label} -> {offset}");
        }
    }

    if !unit.program.initial_values.is_empty() {
        println!("Initial values:");
        for (var, value) in &unit.program.initial_values {
            println!("  {var} = {value:?}");
        }
    }

    Ok(())
}
