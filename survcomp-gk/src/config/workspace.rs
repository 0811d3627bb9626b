//! Sandbox des chemins de fichiers dans un répertoire de travail

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Chemin refusé par la sandbox
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Security error: the {role} file must be inside the workspace ({path} is outside {root})")]
    OutsideWorkspace {
        role: &'static str,
        path: PathBuf,
        root: PathBuf,
    },
}

/// Répertoire racine autorisé pour les fichiers d'entrée et de sortie
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Crée un workspace ; un chemin relatif est résolu depuis le répertoire courant
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: absolute(root.as_ref()),
        }
    }

    /// Workspace GitHub (`GITHUB_WORKSPACE`), sinon le répertoire courant
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_WORKSPACE") {
            Some(dir) if !dir.is_empty() => Self::new(PathBuf::from(dir)),
            _ => Self::new("."),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Résout `path` relativement au workspace et vérifie qu'il n'en sort pas
    ///
    /// La normalisation est purement lexicale (`..` et `.`) : le fichier de
    /// sortie n'existe pas forcément encore.
    pub fn resolve(&self, path: &Path, role: &'static str) -> Result<PathBuf, WorkspaceError> {
        let resolved = normalize(&self.root.join(path));
        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(WorkspaceError::OutsideWorkspace {
                role,
                path: resolved,
                root: self.root.clone(),
            })
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        let cwd = std::env::current_dir().unwrap_or_default();
        normalize(&cwd.join(path))
    }
}

/// Supprime les composants `.` et résout `..` sans accès disque
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_inside() {
        let ws = Workspace::new("/work/repo");
        assert_eq!(
            ws.resolve(Path::new("data/punkte.csv"), "input").unwrap(),
            PathBuf::from("/work/repo/data/punkte.csv")
        );
        assert_eq!(
            ws.resolve(Path::new("./out/../out/a.csv"), "output").unwrap(),
            PathBuf::from("/work/repo/out/a.csv")
        );
    }

    #[test]
    fn test_resolve_root_itself() {
        let ws = Workspace::new("/work/repo");
        assert!(ws.resolve(Path::new("."), "input").is_ok());
    }

    #[test]
    fn test_resolve_traversal_rejected() {
        let ws = Workspace::new("/work/repo");
        let err = ws.resolve(Path::new("../secret.csv"), "input").unwrap_err();
        assert!(err.to_string().contains("input file must be inside the workspace"));

        // Un préfixe commun n'est pas une inclusion
        assert!(ws.resolve(Path::new("../repo2/a.csv"), "output").is_err());
    }

    #[test]
    fn test_absolute_path_outside_rejected() {
        let ws = Workspace::new("/work/repo");
        assert!(ws.resolve(Path::new("/etc/passwd"), "input").is_err());
        assert!(ws.resolve(Path::new("/work/repo/x.csv"), "input").is_ok());
    }
}
