//! # survcomp-gk
//!
//! Conversion d'exports SurvComp (WGS84) en fichiers gl-Survey Gauss-Krüger.
//!
//! ## Features
//!
//! - CLI locale, zone détectée automatiquement ou imposée
//! - Mode GitHub Action (entrées `INPUT_*`, sorties `GITHUB_OUTPUT`)
//! - Sandbox des chemins dans le workspace
//! - Rapport console et JSON
//!
//! ## Usage CLI
//!
//! ```bash
//! # Zone détectée depuis la longitude moyenne
//! survcomp-gk convert vermessungspunkte.csv
//!
//! # Zone imposée, sortie tabulée
//! survcomp-gk convert vermessungspunkte.csv --epsg 5682 --sep '\t' --output out.csv
//!
//! # Dans un workflow GitHub
//! survcomp-gk action
//! ```

pub mod action;
pub mod config;
pub mod job;
pub mod report;

pub use action::{run_action, ActionContext};
pub use config::{ActionInputs, Config, EnvDefaults, Workspace};
pub use job::ConversionJob;
pub use report::{RunReport, RunStatus};
