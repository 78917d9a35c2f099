use clap::Subcommand;
use std::path::PathBuf;

pub mod inspect;
pub mod lines;
pub mod merge;

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a base unit with overlay units
    Merge {
        /// Base unit file (JSON)
        #[arg(short, long)]
        base: PathBuf,

        /// Overlay unit files, in precedence order (last wins)
        overlays: Vec<PathBuf>,

        /// Merged unit output path
        #[arg(short, long)]
        output: PathBuf,

        /// Point-patch file (JSON array) applied after the merge
        #[arg(short, long)]
        patches: Option<PathBuf>,
    },

    /// Summarize the nodes, labels, and string table of a unit
    Inspect {
        /// Unit file (JSON)
        unit: PathBuf,
    },

    /// Build the merged line-text table
    Lines {
        /// Unit files supplying fallback text, in precedence order
        units: Vec<PathBuf>,

        /// Localized record files (JSON arrays), in precedence order
        #[arg(short, long)]
        localized: Vec<PathBuf>,

        /// Write the table as JSON instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Merge {
                base,
                overlays,
                output,
                patches,
            } => merge::execute(&base, &overlays, &output, patches.as_deref()),
            Commands::Inspect { unit } => inspect::execute(&unit),
            Commands::Lines {
                units,
                localized,
                output,
            } => lines::execute(&units, &localized, output.as_deref()),
        }
    }
}
