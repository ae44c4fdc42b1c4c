use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Browse the side-project catalog and estimate monthly revenue
#[derive(Parser, Debug, Clone)]
#[command(
    name = "project-library",
    about = "Browse the side-project catalog and estimate monthly revenue",
    version
)]
pub struct Settings {
    /// View to print
    #[arg(long, default_value = "list", value_parser = ["list", "hot", "favorites", "show", "revenue", "stats"])]
    pub view: String,

    /// Project id for the show and revenue views
    #[arg(long)]
    pub project: Option<String>,

    /// Platform filter
    #[arg(long, default_value = "all")]
    pub platform: String,

    /// Profit model filter
    #[arg(long, default_value = "all")]
    pub profit_model: String,

    /// Case-insensitive search over title, summary and highlights
    #[arg(long, default_value = "")]
    pub search: String,

    /// Preference filter
    #[arg(long, default_value = "all", value_parser = ["all", "high-revenue", "low-threshold"])]
    pub preference: String,

    /// Sort order for the list view
    #[arg(long, default_value = "time", value_parser = ["time", "popularity"])]
    pub sort: String,

    /// Time window for the hot view
    #[arg(long, default_value = "1m", value_parser = ["7d", "1m", "3m", "1y"])]
    pub window: String,

    /// Ranking tab for the hot view
    #[arg(long, default_value = "likes", value_parser = ["likes", "voyage"])]
    pub tab: String,

    /// Directory holding project-*.json files (auto-discovered if not specified)
    #[arg(long, env = "PROJECT_LIBRARY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Toggle a project in favorites
    #[arg(long, value_name = "ID")]
    pub toggle_favorite: Option<String>,

    /// Toggle a like on a project
    #[arg(long, value_name = "ID")]
    pub toggle_like: Option<String>,

    /// Toggle a voyage request on a project
    #[arg(long, value_name = "ID")]
    pub toggle_voyage: Option<String>,

    /// Mark a project as read
    #[arg(long, value_name = "ID")]
    pub mark_read: Option<String>,

    /// Raw case text for the revenue view
    #[arg(long)]
    pub text: Option<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.project-library/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default location: `~/.project-library/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".project-library").join("last_used.json")
    }

    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments, fill unset browse options from the last
    /// run, and persist the merged result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Arg ids are field names, not flag spellings.
        if !is_arg_explicitly_set(&matches, "sort") {
            if let Some(v) = last.sort {
                settings.sort = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "window") {
            if let Some(v) = last.window {
                settings.window = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "tab") {
            if let Some(v) = last.tab {
                settings.tab = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_dir") && settings.data_dir.is_none() {
            settings.data_dir = last.data_dir;
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            sort: Some(s.sort.clone()),
            window: Some(s.window.clone()),
            tab: Some(s.tab.clone()),
            data_dir: s.data_dir.clone(),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
