//! Rapport de conversion
//!
//! Résumé d'une exécution : fichiers, zone retenue, nombre de points et
//! anomalies non fatales. Affichage console, export JSON et sorties
//! GitHub Action.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gk_core::ConversionRun;
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Tous les points ont une position
    Success,
    /// Sortie écrite, avec des points sans position ou des indices de parsing
    CompletedWithWarnings,
}

/// Rapport complet d'une conversion
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub input_file: PathBuf,
    pub output_file: PathBuf,

    /// Nombre de points écrits
    pub point_count: usize,

    pub epsg_code: u32,
    pub zone: u8,

    /// Longitude moyenne si la zone a été détectée
    pub mean_longitude: Option<f64>,

    /// Points sans coordonnées GPS exploitables
    pub unconvertible: usize,

    /// Anomalies non fatales du parsing
    pub hints: Vec<String>,

    /// Caractères invalides remplacés au décodage de l'entrée
    pub lossy_input: bool,
}

impl RunReport {
    /// Construit le rapport depuis le résultat de la conversion
    pub fn new(input_file: &Path, output_file: &Path, run: &ConversionRun, lossy_input: bool) -> Self {
        let mut report = Self {
            status: RunStatus::Success,
            input_file: input_file.to_path_buf(),
            output_file: output_file.to_path_buf(),
            point_count: run.point_count(),
            epsg_code: run.zone.epsg,
            zone: run.zone.zone,
            mean_longitude: run.detection.map(|d| d.mean_longitude),
            unconvertible: run.unconvertible,
            hints: run.hints.iter().map(|h| h.to_string()).collect(),
            lossy_input,
        };
        report.finalize();
        report
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.unconvertible > 0 || !self.hints.is_empty() || self.lossy_input {
            RunStatus::CompletedWithWarnings
        } else {
            RunStatus::Success
        };
    }

    /// Messages d'avertissement à remonter à l'utilisateur
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self.hints.iter().map(|h| format!("Hint: {}", h)).collect();
        if self.lossy_input {
            warnings.push("Input is not valid UTF-8, invalid characters were replaced".to_string());
        }
        if self.unconvertible > 0 {
            warnings.push(format!(
                "{} point(s) had no valid GPS coordinates",
                self.unconvertible
            ));
        }
        warnings
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - EPSG:{}", self.epsg_code);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Input:  {}", self.input_file.display());
        println!("Output: {}", self.output_file.display());

        println!("\n--- SUMMARY ---");
        println!("Points: {} written, {} without position", self.point_count, self.unconvertible);
        match self.mean_longitude {
            Some(lon) => println!(
                "Zone: {} (EPSG:{}, detected, mean longitude {:.4}°)",
                self.zone, self.epsg_code, lon
            ),
            None => println!("Zone: {} (EPSG:{})", self.zone, self.epsg_code),
        }

        let warnings = self.warnings();
        if !warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", warnings.len());
            for w in &warnings {
                println!("  {}", w);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} points, EPSG:{}, {} warnings",
            self.output_file.display(),
            self.point_count,
            self.epsg_code,
            self.unconvertible
        )
    }

    /// Ajoute les sorties de l'action au fichier `GITHUB_OUTPUT`
    pub fn write_github_outputs(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(format!("Failed to open GitHub output file: {}", path.display()))?;

        writeln!(file, "output-file={}", self.output_file.display())?;
        writeln!(file, "point-count={}", self.point_count)?;
        writeln!(file, "epsg-code={}", self.epsg_code)?;
        writeln!(file, "warnings={}", self.unconvertible)?;
        Ok(())
    }
}
