use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use library_core::models::Project;
use library_data::reader::{default_data_dir, load_catalog, load_projects};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.project-library/` and `~/.project-library/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    let app_dir = home.join(".project-library");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto an `EnvFilter` directive.
fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr, or is appended to `log_file` (without ANSI colours)
/// when one is given. Unrecognised levels fall back to `info`.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Locate the catalog directory.
///
/// An explicit `--data-dir` always wins. Otherwise the first existing of
/// `./public/projects` and `~/.project-library/projects` is used.
pub fn discover_data_dir_in(explicit: Option<&Path>, cwd: &Path, home: &Path) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }
    let candidates = [
        cwd.join("public").join("projects"),
        home.join(".project-library").join("projects"),
    ];
    candidates.into_iter().find(|p| p.is_dir())
}

/// Load the catalog the current invocation points at.
///
/// A missing explicit `--data-dir` is an error; a discovered or default
/// directory that does not exist just yields an empty catalog.
pub fn open_catalog(explicit: Option<&Path>) -> library_core::Result<Vec<Project>> {
    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    open_catalog_in(explicit, &cwd, &home)
}

pub fn open_catalog_in(
    explicit: Option<&Path>,
    cwd: &Path,
    home: &Path,
) -> library_core::Result<Vec<Project>> {
    if let Some(dir) = explicit {
        info!("Catalog: {}", dir.display());
        return load_catalog(dir);
    }
    let dir = discover_data_dir_in(None, cwd, home).unwrap_or_else(default_data_dir);
    info!("Catalog: {}", dir.display());
    Ok(load_projects(&dir))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
