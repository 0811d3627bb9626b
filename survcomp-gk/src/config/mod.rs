//! Configuration du système
//!
//! - Fichier JSON ou preset embarqué (noms de colonnes, zone, séparateur)
//! - Variables d'environnement (`GK_*`, entrées GitHub Action `INPUT_*`)
//! - Sandbox du workspace pour les chemins d'entrée/sortie

mod workspace;

pub use workspace::{Workspace, WorkspaceError};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gk_core::ColumnNames;
use serde::{Deserialize, Serialize};

/// Configuration principale
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Noms des colonnes de l'export d'entrée
    #[serde(default)]
    pub columns: ColumnNames,

    /// Zone par défaut (`auto` ou 5681-5685)
    #[serde(default)]
    pub epsg: Option<String>,

    /// Séparateur de sortie par défaut
    #[serde(default)]
    pub separator: Option<String>,
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "survcomp" => Self::load_embedded(include_str!("presets/survcomp.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: survcomp", preset),
        }
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn resolve(source: &str) -> Result<Self> {
        let path = Path::new(source);
        if path.extension().map_or(false, |ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(source)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }
}

/// Valeurs par défaut lues dans l'environnement (`.env` compris)
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    /// `GK_EPSG`
    pub epsg: Option<String>,
    /// `GK_SEPARATOR`
    pub separator: Option<String>,
    /// `GK_WORKSPACE`
    pub workspace: Option<PathBuf>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        Self {
            epsg: std::env::var("GK_EPSG").ok(),
            separator: std::env::var("GK_SEPARATOR").ok(),
            workspace: std::env::var_os("GK_WORKSPACE").map(PathBuf::from),
        }
    }
}

/// Entrées d'une exécution en GitHub Action
#[derive(Debug, Clone)]
pub struct ActionInputs {
    pub input_file: String,
    pub output_file: String,
    /// Vide ou `auto` : détection automatique
    pub epsg_code: String,
    pub separator: String,
}

impl ActionInputs {
    /// Lit les entrées `INPUT_*` positionnées par le runner GitHub
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Lit les entrées via une fonction de recherche (testable sans toucher l'environnement)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |name: &str| lookup(&input_variable(name));
        let required = |name: &str| -> Result<String> {
            input(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("Input required and not supplied: {}", name))
        };

        Ok(Self {
            input_file: required("input-file")?,
            output_file: required("output-file")?,
            epsg_code: input("epsg-code")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            // Pas de trim : une tabulation est un séparateur valide
            separator: input("separator")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| ";".to_string()),
        })
    }
}

/// Nom de la variable d'environnement d'une entrée d'action
fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Chemin de sortie par défaut : `<stem>_glsurvey<.ext>` à côté de l'entrée
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}_glsurvey.{}", stem, ext.to_string_lossy()),
        None => format!("{}_glsurvey", stem),
    };
    input.with_file_name(file_name)
}
