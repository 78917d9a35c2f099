//! CLI command for merging compiled units

use std::fs;
use std::path::{Path, PathBuf};

use crate::program;
use crate::runtime::PatchSpec;
use crate::source::{read_unit_file, write_unit_file, CompiledUnit};

/// Merge `base` with `overlays`, apply optional point patches, and write
/// the merged unit.
pub fn execute(
    base: &Path,
    overlays: &[PathBuf],
    output: &Path,
    patches: Option<&Path>,
) -> anyhow::Result<()> {
    let base_unit = read_unit_file(base)?;
    let mut overlay_units = Vec::with_capacity(overlays.len());
    for path in overlays {
        overlay_units.push(read_unit_file(path)?);
    }

    let overlay_programs: Vec<_> = overlay_units.iter().map(|u| u.program.clone()).collect();
    let mut merged = program::merge(&base_unit.program, &overlay_programs)?;

    if let Some(patch_path) = patches {
        let data = fs::read_to_string(patch_path)?;
        let specs: Vec<PatchSpec> = serde_json::from_str(&data)?;
        for spec in &specs {
            spec.apply(&mut merged)?;
        }
        println!("Applied {} point patches", specs.len());
    }

    // The merged string table is the concatenation of every input's table,
    // in the same precedence order as the programs.
    let mut string_table = base_unit.string_table;
    for unit in overlay_units {
        string_table.extend(unit.string_table);
    }

    let merged_unit = CompiledUnit {
        program: merged,
        string_table,
    };
    write_unit_file(output, &merged_unit)?;
    println!(
        "Wrote merged unit with {} nodes to {}",
        merged_unit.program.len(),
        output.display()
    );
    Ok(())
}
