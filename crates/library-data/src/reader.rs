//! Catalog discovery and loading.
//!
//! A catalog is a flat directory of `project-*.json` files, one project per
//! file. Broken files are logged and skipped so one bad entry never hides
//! the rest of the catalog.

use std::path::{Path, PathBuf};

use library_core::error::{LibraryError, Result};
use library_core::models::Project;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find every `project-*.json` directly inside `dir`, sorted by path.
pub fn find_project_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Projects directory not found: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_project_file_name(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read and parse one project file.
pub fn load_project_file(path: &Path) -> Result<Project> {
    let content = std::fs::read_to_string(path).map_err(|source| LibraryError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the whole catalog from `dir`, newest id first.
///
/// A missing directory yields an empty catalog.
pub fn load_projects(dir: &Path) -> Vec<Project> {
    let files = find_project_files(dir);

    let mut projects: Vec<Project> = Vec::with_capacity(files.len());
    let mut skipped = 0usize;
    for file in &files {
        match load_project_file(file) {
            Ok(project) => projects.push(project),
            Err(e) => {
                skipped += 1;
                warn!("Error loading {}: {}", file.display(), e);
            }
        }
    }

    projects.sort_by(|a, b| b.id.cmp(&a.id));

    debug!(
        "Loaded {} projects from {} ({} skipped)",
        projects.len(),
        dir.display(),
        skipped
    );

    projects
}

/// Like [`load_projects`] but fails when the directory itself is absent.
pub fn load_catalog(dir: &Path) -> Result<Vec<Project>> {
    if !dir.is_dir() {
        return Err(LibraryError::CatalogNotFound(dir.to_path_buf()));
    }
    Ok(load_projects(dir))
}

/// Look a project up by exact id.
pub fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id == id)
}

/// Same as [`find_project`] but reports an unknown id as an error.
pub fn require_project<'a>(projects: &'a [Project], id: &str) -> Result<&'a Project> {
    find_project(projects, id).ok_or_else(|| LibraryError::UnknownProject(id.to_string()))
}

/// Default catalog location, `~/.project-library/projects`.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".project-library")
        .join("projects")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn is_project_file_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with("project-") && name.ends_with(".json"))
        .unwrap_or(false)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
