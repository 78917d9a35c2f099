//! CLI command for building the merged line-text table

use std::fs;
use std::path::{Path, PathBuf};

use crate::lines::{LocalizedRecord, TextTableBuilder};
use crate::source::read_unit_file;

/// Build the merged text table from unit string tables and localized
/// record files, then print it or write it as JSON.
pub fn execute(
    units: &[PathBuf],
    localized: &[PathBuf],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut builder = TextTableBuilder::new();

    for path in units {
        let unit = read_unit_file(path)?;
        builder.add_fallback_entries(
            unit.string_table
                .into_iter()
                .map(|entry| (entry.id, entry.text)),
        );
    }

    for path in localized {
        let data = fs::read_to_string(path)?;
        let records: Vec<LocalizedRecord> = serde_json::from_str(&data)?;
        builder.add_localized_records(&records);
    }

    let table = builder.build();
    match output {
        Some(path) => {
            fs::write(path, serde_json::to_string_pretty(&table)?)?;
            println!("Wrote {} line entries to {}", table.len(), path.display());
        }
        None => {
            for (id, text) in &table {
                println!("{id}\t{text}");
            }
        }
    }

    Ok(())
}
