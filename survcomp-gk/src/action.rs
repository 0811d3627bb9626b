//! Exécution en GitHub Action
//!
//! Les entrées viennent des variables `INPUT_*`, les chemins sont confinés au
//! workspace, les anomalies sont émises comme commandes de workflow
//! (`::warning::`, `::error::`) et les sorties ajoutées au fichier
//! `GITHUB_OUTPUT`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{ActionInputs, Workspace};
use crate::job::ConversionJob;
use crate::report::RunReport;

/// Environnement du runner : workspace et fichier de sorties
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub workspace: Workspace,
    pub github_output: Option<PathBuf>,
}

impl ActionContext {
    /// Lit `GITHUB_WORKSPACE` et `GITHUB_OUTPUT`
    pub fn from_env() -> Self {
        Self {
            workspace: Workspace::from_env(),
            github_output: std::env::var_os("GITHUB_OUTPUT")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Exécute l'action et écrit les commandes de workflow sur `out`
///
/// En cas d'erreur fatale, une ligne `::error::` est écrite avant de
/// renvoyer l'erreur ; l'appelant en fait un code de sortie non nul.
pub fn run_action<F, W>(lookup: F, context: &ActionContext, out: &mut W) -> Result<RunReport>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    match execute(lookup, context, out) {
        Ok(report) => Ok(report),
        Err(e) => {
            writeln!(out, "::error::{}", escape_annotation(&format!("{:#}", e)))?;
            Err(e)
        }
    }
}

fn execute<F, W>(lookup: F, context: &ActionContext, out: &mut W) -> Result<RunReport>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let inputs = ActionInputs::from_lookup(lookup)?;
    let workspace = &context.workspace;
    info!(workspace = %workspace.root().display(), "GitHub Action mode");

    let job = ConversionJob {
        input: workspace.resolve(Path::new(&inputs.input_file), "input")?,
        output: workspace.resolve(Path::new(&inputs.output_file), "output")?,
        selection: inputs.epsg_code.parse()?,
        separator: inputs.separator.parse()?,
        columns: Default::default(),
    };
    let report = job.execute()?;

    for warning in report.warnings() {
        writeln!(out, "::warning::{}", escape_annotation(&warning))?;
    }

    match &context.github_output {
        Some(path) => report.write_github_outputs(path)?,
        None => warn!("GITHUB_OUTPUT not set, action outputs are not exported"),
    }

    info!("{}", report.summary());
    Ok(report)
}

/// Échappe un message pour une commande de workflow GitHub
pub fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_annotation() {
        assert_eq!(escape_annotation("100% ok"), "100%25 ok");
        assert_eq!(escape_annotation("a\r\nb"), "a%0D%0Ab");
    }

    #[test]
    fn test_missing_required_input_is_annotated() {
        let dir = tempfile::tempdir().unwrap();
        let context = ActionContext {
            workspace: Workspace::new(dir.path()),
            github_output: None,
        };
        let mut out = Vec::new();

        let err = run_action(|_| None, &context, &mut out).unwrap_err();
        assert!(err.to_string().contains("input-file"));

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("::error::Input required and not supplied: input-file"));
    }
}
