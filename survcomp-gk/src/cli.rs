//! Définition et implémentation des commandes CLI
//!
//! - `convert`: fichier SurvComp → fichier gl-Survey
//! - `action`: même conversion, pilotée par l'environnement GitHub Action
//! - `zones`: liste des zones supportées

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use gk_core::{Separator, ZoneSelection, ZONES};
use tracing::{info, warn};

use survcomp_gk::config::default_output_path;
use survcomp_gk::{run_action, ActionContext, Config, ConversionJob, EnvDefaults, Workspace};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a SurvComp CSV export to gl-Survey Gauss-Krüger CSV
    Convert(ConvertArgs),

    /// Run as a GitHub Action (inputs from INPUT_* environment variables)
    Action,

    /// List the supported Gauss-Krüger zones
    Zones,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the SurvComp CSV export
    pub input: PathBuf,

    /// Target EPSG code: auto or 5681-5685 (défaut : env GK_EPSG / auto)
    #[arg(long)]
    pub epsg: Option<String>,

    /// Output file (default: <input>_glsurvey.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output separator: ; , or \t (défaut : env GK_SEPARATOR / ;)
    #[arg(long)]
    pub sep: Option<String>,

    /// Config preset name (survcomp) or path to a JSON config
    #[arg(long)]
    pub config: Option<String>,

    /// Write a JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Restrict input and output to this directory (défaut : env GK_WORKSPACE)
    #[arg(long)]
    pub workspace: Option<PathBuf>,
}

/// Exécute la commande convert
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let env = EnvDefaults::from_env();
    let config = match &args.config {
        Some(source) => Config::resolve(source)?,
        None => Config::default(),
    };

    // Priorité : argument > fichier de config > environnement > défaut
    let selection: ZoneSelection = args
        .epsg
        .or(config.epsg)
        .or(env.epsg)
        .unwrap_or_else(|| "auto".to_string())
        .parse()?;
    let separator: Separator = args
        .sep
        .or(config.separator)
        .or(env.separator)
        .unwrap_or_else(|| ";".to_string())
        .parse()?;

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    let (input, output) = match args.workspace.or(env.workspace) {
        Some(root) => {
            let workspace = Workspace::new(root);
            (
                workspace.resolve(&args.input, "input")?,
                workspace.resolve(&output, "output")?,
            )
        }
        None => (args.input, output),
    };

    let job = ConversionJob {
        input,
        output,
        selection,
        separator,
        columns: config.columns,
    };
    let report = job.execute()?;

    for warning in report.warnings() {
        warn!("{}", warning);
    }
    if let Some(path) = &args.report {
        report.save_to_file(path)?;
        info!(report = %path.display(), "Report saved");
    }

    report.display();
    Ok(())
}

/// Exécute la conversion en mode GitHub Action
///
/// Toute erreur est aussi émise comme annotation `::error::`.
pub fn cmd_action() -> Result<()> {
    let context = ActionContext::from_env();
    let mut stdout = std::io::stdout().lock();
    run_action(|name| std::env::var(name).ok(), &context, &mut stdout)?;
    Ok(())
}

/// Affiche le registre des zones
pub fn cmd_zones() {
    println!("{:<6} {:<5} {:>8} {:>14}  NAME", "EPSG", "ZONE", "MERIDIAN", "FALSE EASTING");
    for zone in ZONES.iter() {
        println!(
            "{:<6} {:<5} {:>7}° {:>14.0}  {}",
            zone.epsg, zone.zone, zone.central_meridian, zone.false_easting, zone.name
        );
    }
}
