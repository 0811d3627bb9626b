//! Exécution d'une conversion fichier → fichier

use std::path::PathBuf;

use anyhow::{Context, Result};
use gk_core::{ColumnNames, Separator, ZoneSelection};
use tracing::{info, warn};

use crate::report::RunReport;

/// Une conversion à exécuter, chemins déjà résolus
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub selection: ZoneSelection,
    pub separator: Separator,
    pub columns: ColumnNames,
}

impl ConversionJob {
    /// Lit l'entrée, convertit, écrit la sortie et renvoie le rapport
    ///
    /// Aucun fichier n'est écrit si la conversion échoue.
    pub fn execute(&self) -> Result<RunReport> {
        if !self.input.is_file() {
            anyhow::bail!("Input file not found: {}", self.input.display());
        }

        info!(input = %self.input.display(), "Reading input file");
        let data = std::fs::read(&self.input)
            .context(format!("Failed to read input file: {}", self.input.display()))?;

        let (text, lossy) = gk_core::decode_input(&data);
        if lossy {
            warn!(input = %self.input.display(), "Input is not valid UTF-8, invalid characters replaced");
        }

        info!(selection = %self.selection, separator = %self.separator, "Converting");
        let run = gk_core::run(&text, self.selection, self.separator, &self.columns)?;

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create output directory: {}", parent.display()))?;
        }
        std::fs::write(&self.output, run.output.as_bytes())
            .context(format!("Failed to write output file: {}", self.output.display()))?;

        info!(
            output = %self.output.display(),
            points = run.point_count(),
            epsg = run.zone.epsg,
            "Output written"
        );

        Ok(RunReport::new(&self.input, &self.output, &run, lossy))
    }
}
