//! Load phase: gather and validate every discovered source
//!
//! The accumulator is owned by the caller and passed explicitly; it is
//! written only during a load pass and read-only afterwards. A reload is
//! a fresh pass over a fresh (or cleared) accumulator, never an
//! incremental update.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lines::{LineMetadataRecord, LineRecord};
use crate::program::{validate_program, Program};
use crate::source::{read_unit_file, CompiledUnit, DialogueSource, ScriptCompiler};

/// Everything accumulated by the load phase.
#[derive(Clone, Debug, Default)]
pub struct DialogueAssets {
    /// Overlay programs, in discovery order.
    pub programs: Vec<Program>,
    /// Fallback line rows, in discovery order.
    pub lines: Vec<LineRecord>,
    /// Metadata rows, in discovery order.
    pub metadata: Vec<LineMetadataRecord>,
}

/// Outcome of one load pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Sources that contributed successfully.
    pub sources_loaded: usize,
    /// Units accumulated across all sources.
    pub units_loaded: usize,
    /// Sources skipped, with the failure that skipped them.
    pub failures: Vec<(PathBuf, Error)>,
}

impl LoadReport {
    /// Whether every source loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl DialogueAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything accumulated so far (start of a fresh load cycle).
    pub fn clear(&mut self) {
        self.programs.clear();
        self.lines.clear();
        self.metadata.clear();
    }

    /// Load every source in feed order, isolating per-source failures.
    ///
    /// A failing source is logged, recorded in the report, and skipped in
    /// full; sources accumulated before it are left intact and sources
    /// after it still load. One broken dialogue package degrades
    /// gracefully instead of disabling all dialogue.
    pub fn load_sources<C: ScriptCompiler>(
        &mut self,
        sources: &[DialogueSource],
        compiler: &C,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for source in sources {
            match self.load_source(source, compiler) {
                Ok(units) => {
                    report.sources_loaded += 1;
                    report.units_loaded += units;
                }
                Err(err) => {
                    warn!(
                        origin = %source.origin.display(),
                        %err,
                        "skipping dialogue source"
                    );
                    report.failures.push((source.origin.clone(), err));
                }
            }
        }
        debug!(
            sources = report.sources_loaded,
            units = report.units_loaded,
            "dialogue load pass finished"
        );
        report
    }

    /// Load one source. Nothing is committed unless the whole source is
    /// sound, so a failure contributes nothing rather than half a source.
    fn load_source<C: ScriptCompiler>(
        &mut self,
        source: &DialogueSource,
        compiler: &C,
    ) -> Result<usize> {
        let mut units: Vec<CompiledUnit> = Vec::new();

        if !source.scripts.is_empty() {
            units.push(compiler.compile(&source.origin, &source.scripts)?);
        }
        for path in &source.unit_files {
            let unit = read_unit_file(path).map_err(|err| Error::SourceRead {
                origin: source.origin.clone(),
                message: err.to_string(),
            })?;
            units.push(unit);
        }
        units.extend(source.units.iter().cloned());

        for unit in &units {
            validate_program(&unit.program)?;
        }

        let count = units.len();
        for unit in units {
            self.lines.extend(unit.line_records());
            self.metadata.extend(unit.metadata_records());
            self.programs.push(unit.program);
        }
        self.lines.extend(source.lines.iter().cloned());
        self.metadata.extend(source.metadata.iter().cloned());

        debug!(origin = %source.origin.display(), units = count, "loaded dialogue source");
        Ok(count)
    }
}
