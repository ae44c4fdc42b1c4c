mod bootstrap;
mod render;

use anyhow::{Context, Result};
use chrono::Local;
use library_core::settings::Settings;
use library_data::filter::{
    filter_projects, platform_facets, profit_model_facets, Preference, ProjectQuery, SortOption,
};
use library_data::flags::FlagStore;
use library_data::ranking::{rank_projects, CatalogStats, RankingTab, TimeWindow};
use library_data::reader::require_project;
use tracing::{info, warn};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    info!("Project Library v{} starting", env!("CARGO_PKG_VERSION"));

    let flags_path = FlagStore::default_path();
    let mut flags = FlagStore::load_from(&flags_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable flags file {}: {}", flags_path.display(), e);
        FlagStore::at(&flags_path)
    });

    if apply_flag_actions(&settings, &mut flags) {
        flags.save().context("saving flags")?;
    }

    // Pure text analysis needs no catalog.
    if settings.view == "revenue" {
        if let Some(text) = settings.text.as_deref() {
            print!("{}", render::render_revenue_text(text));
            return Ok(());
        }
    }

    let projects = bootstrap::open_catalog(settings.data_dir.as_deref())?;
    let now = Local::now().naive_local();

    match settings.view.as_str() {
        "list" => {
            let query = ProjectQuery {
                platform: settings.platform.clone(),
                profit_model: settings.profit_model.clone(),
                search: settings.search.clone(),
                preference: settings.preference.parse::<Preference>()?,
                sort: settings.sort.parse::<SortOption>()?,
            };
            let filtered = filter_projects(&projects, &query);
            print!("{}", render::render_list(&filtered, &flags, now));
        }

        "favorites" => {
            let favorites = flags.favorites(&projects);
            print!("{}", render::render_list(&favorites, &flags, now));
        }

        "hot" => {
            let window = settings.window.parse::<TimeWindow>()?;
            let tab = settings.tab.parse::<RankingTab>()?;
            let ranked = rank_projects(&projects, window, tab, now);
            print!("{}", render::render_hot(&ranked, window, tab, &flags, now));
        }

        "show" => {
            let id = require_id(&settings)?;
            let project = require_project(&projects, &id)?;
            print!("{}", render::render_detail(project, &flags, now));
            if flags.mark_read(&project.id) {
                flags.save().context("saving read marker")?;
            }
        }

        "revenue" => {
            let id = require_id(&settings)?;
            let project = require_project(&projects, &id)?;
            print!("{}", render::render_revenue_project(project));
        }

        "stats" => {
            let stats = CatalogStats::compute(&projects, now);
            let platforms = platform_facets(&projects, &settings.profit_model);
            let profit_models = profit_model_facets(&projects, &settings.platform);
            print!("{}", render::render_stats(&stats, &platforms, &profit_models));
        }

        unknown => {
            eprintln!("Unknown view: {}", unknown);
        }
    }

    Ok(())
}

/// Apply the `--toggle-*` and `--mark-read` switches. Returns whether anything changed.
fn apply_flag_actions(settings: &Settings, flags: &mut FlagStore) -> bool {
    let mut changed = false;

    if let Some(id) = settings.toggle_favorite.as_deref() {
        let on = flags.toggle_favorite(id);
        println!("{} {}", id, if on { "已收藏" } else { "已取消收藏" });
        changed = true;
    }
    if let Some(id) = settings.toggle_like.as_deref() {
        let on = flags.toggle_like(id);
        println!(
            "{} {} (点赞 {})",
            id,
            if on { "已点赞" } else { "已取消点赞" },
            flags.like_count(id)
        );
        changed = true;
    }
    if let Some(id) = settings.toggle_voyage.as_deref() {
        let on = flags.toggle_voyage_request(id);
        println!(
            "{} {} (上航海 {})",
            id,
            if on { "已申请上航海" } else { "已取消上航海" },
            flags.voyage_vote_count(id)
        );
        changed = true;
    }
    if let Some(id) = settings.mark_read.as_deref() {
        changed |= flags.mark_read(id);
    }

    changed
}

fn require_id(settings: &Settings) -> Result<String> {
    settings
        .project
        .clone()
        .with_context(|| format!("--view {} requires --project <ID>", settings.view))
}
