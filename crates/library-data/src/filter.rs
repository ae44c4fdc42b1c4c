//! Catalog filtering, preference narrowing, sorting and filter-bar facets.
//!
//! The pipeline runs in a fixed order: platform / profit model / search,
//! then preference, then sort.

use std::str::FromStr;

use library_core::error::LibraryError;
use library_core::labels::{FilterOption, ALL, PLATFORMS, PROFIT_MODELS};
use library_core::models::Project;

// ── Query options ─────────────────────────────────────────────────────────────

/// List ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Publish time string, newest first.
    #[default]
    Time,
    /// [`Project::popularity_score`], highest first.
    Popularity,
}

impl FromStr for SortOption {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(SortOption::Time),
            "popularity" => Ok(SortOption::Popularity),
            other => Err(LibraryError::Config(format!("unknown sort option: {other}"))),
        }
    }
}

/// Optional narrowing applied after the basic filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    #[default]
    All,
    HighRevenue,
    LowThreshold,
}

impl FromStr for Preference {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Preference::All),
            "high-revenue" => Ok(Preference::HighRevenue),
            "low-threshold" => Ok(Preference::LowThreshold),
            other => Err(LibraryError::Config(format!("unknown preference: {other}"))),
        }
    }
}

/// Everything the list view filters and sorts by.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectQuery {
    pub platform: String,
    pub profit_model: String,
    pub search: String,
    pub preference: Preference,
    pub sort: SortOption,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            platform: ALL.to_string(),
            profit_model: ALL.to_string(),
            search: String::new(),
            preference: Preference::All,
            sort: SortOption::Time,
        }
    }
}

// ── Predicates ────────────────────────────────────────────────────────────────

fn matches_platform(project: &Project, platform: &str) -> bool {
    platform == ALL || project.platform.iter().any(|p| p == platform)
}

fn matches_profit_model(project: &Project, profit_model: &str) -> bool {
    profit_model == ALL || project.profit_model == profit_model
}

/// `query` must already be lowercased.
fn matches_search(project: &Project, query: &str) -> bool {
    query.is_empty()
        || project.title.to_lowercase().contains(query)
        || project.summary.to_lowercase().contains(query)
        || project.highlights.to_lowercase().contains(query)
}

/// Tagged `low-threshold`, or a startup cost that reads as cheap.
pub fn is_low_threshold(project: &Project) -> bool {
    if project.has_tag("low-threshold") {
        return true;
    }
    let cost = &project.detail_content.cost_and_revenue.startup_cost;
    ["0", "几百", "免费", "低"].iter().any(|needle| cost.contains(needle))
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Filter, narrow and sort `projects` for the list view.
pub fn filter_projects<'a>(projects: &'a [Project], query: &ProjectQuery) -> Vec<&'a Project> {
    let search = query.search.to_lowercase();

    let mut filtered: Vec<&Project> = projects
        .iter()
        .filter(|p| matches_platform(p, &query.platform))
        .filter(|p| matches_profit_model(p, &query.profit_model))
        .filter(|p| matches_search(p, &search))
        .collect();

    match query.preference {
        // No revenue score is kept per project, so nothing is dropped here;
        // the sort order carries the priority.
        Preference::All | Preference::HighRevenue => {}
        Preference::LowThreshold => narrow_or_keep(&mut filtered, is_low_threshold),
    }

    sort_projects(&mut filtered, query.sort);
    filtered
}

/// Keep only projects matching `pred`, unless none do.
fn narrow_or_keep(projects: &mut Vec<&Project>, pred: fn(&Project) -> bool) {
    if projects.iter().any(|p| pred(*p)) {
        projects.retain(|p| pred(*p));
    }
}

/// Stable in-place sort.
pub fn sort_projects(projects: &mut [&Project], sort: SortOption) {
    match sort {
        SortOption::Time => projects.sort_by(|a, b| b.publish_time.cmp(&a.publish_time)),
        SortOption::Popularity => projects.sort_by(|a, b| {
            b.popularity_score().total_cmp(&a.popularity_score())
        }),
    }
}

// ── Facets ────────────────────────────────────────────────────────────────────

/// One filter-bar button with its project count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub id: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Distinct platforms among projects matching `profit_model`, first-seen order.
pub fn available_platforms(projects: &[Project], profit_model: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for project in projects.iter().filter(|p| matches_profit_model(p, profit_model)) {
        for platform in &project.platform {
            if !seen.contains(platform) {
                seen.push(platform.clone());
            }
        }
    }
    seen
}

/// Distinct profit models among projects matching `platform`, first-seen order.
pub fn available_profit_models(projects: &[Project], platform: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for project in projects.iter().filter(|p| matches_platform(p, platform)) {
        if !seen.contains(&project.profit_model) {
            seen.push(project.profit_model.clone());
        }
    }
    seen
}

/// Platform buttons under the current profit-model filter.
///
/// Only `all` and platforms that actually occur are listed, in catalog order.
pub fn platform_facets(projects: &[Project], profit_model: &str) -> Vec<Facet> {
    let available = available_platforms(projects, profit_model);
    facets(PLATFORMS, &available, |option| {
        projects
            .iter()
            .filter(|p| matches_profit_model(p, profit_model) && matches_platform(p, option))
            .count()
    })
}

/// Profit-model buttons under the current platform filter.
pub fn profit_model_facets(projects: &[Project], platform: &str) -> Vec<Facet> {
    let available = available_profit_models(projects, platform);
    facets(PROFIT_MODELS, &available, |option| {
        projects
            .iter()
            .filter(|p| matches_platform(p, platform) && matches_profit_model(p, option))
            .count()
    })
}

fn facets(
    options: &[FilterOption],
    available: &[String],
    count: impl Fn(&str) -> usize,
) -> Vec<Facet> {
    options
        .iter()
        .filter(|o| o.id == ALL || available.iter().any(|a| a == o.id))
        .map(|o| Facet {
            id: o.id,
            label: o.label,
            count: count(o.id),
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::models::{CostAndRevenue, DetailContent, Statistics};

    fn project(id: &str, platforms: &[&str], profit_model: &str, time: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("项目{id}"),
            platform: platforms.iter().map(|p| p.to_string()).collect(),
            profit_model: profit_model.to_string(),
            publish_time: time.to_string(),
            ..Default::default()
        }
    }

    fn with_cost(mut p: Project, cost: &str) -> Project {
        p.detail_content = DetailContent {
            cost_and_revenue: CostAndRevenue {
                startup_cost: cost.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        p
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    fn catalog() -> Vec<Project> {
        vec![
            project("0001", &["抖音", "小红书"], "电商带货", "2025-12-01 10:00"),
            project("0002", &["小红书"], "虚拟产品销售", "2025-12-05 09:00"),
            project("0003", &["闲鱼"], "电商带货", "2025-11-20 18:30"),
        ]
    }

    // ── Option parsing ────────────────────────────────────────────────────────

    #[test]
    fn test_option_parsing() {
        assert_eq!("popularity".parse::<SortOption>().unwrap(), SortOption::Popularity);
        assert_eq!("low-threshold".parse::<Preference>().unwrap(), Preference::LowThreshold);
        assert!("newest".parse::<SortOption>().is_err());
    }

    // ── filter_projects ───────────────────────────────────────────────────────

    #[test]
    fn test_default_query_sorts_by_time_desc() {
        let projects = catalog();
        let result = filter_projects(&projects, &ProjectQuery::default());
        assert_eq!(ids(&result), ["0002", "0001", "0003"]);
    }

    #[test]
    fn test_platform_and_profit_model_filters() {
        let projects = catalog();
        let query = ProjectQuery {
            platform: "小红书".to_string(),
            profit_model: "电商带货".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &query)), ["0001"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut projects = catalog();
        projects[2].summary = "二手 iPhone 翻新".to_string();
        let query = ProjectQuery {
            search: "IPHONE".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &query)), ["0003"]);
    }

    #[test]
    fn test_search_over_highlights() {
        let mut projects = catalog();
        projects[0].highlights = "零成本｜可复制｜长期".to_string();
        let query = ProjectQuery {
            search: "可复制".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_projects(&projects, &query)), ["0001"]);
    }

    #[test]
    fn test_low_threshold_narrows_by_cost() {
        let projects = vec![
            with_cost(project("0001", &[], "", "2025-01-01"), "5000元起"),
            with_cost(project("0002", &[], "", "2025-01-02"), "几百块"),
            with_cost(project("0003", &[], "", "2025-01-03"), "需要囤货"),
        ];
        let query = ProjectQuery {
            preference: Preference::LowThreshold,
            ..Default::default()
        };
        // "5000元起" contains a '0', so it counts as cheap too.
        assert_eq!(ids(&filter_projects(&projects, &query)), ["0002", "0001"]);
    }

    #[test]
    fn test_low_threshold_tag() {
        let mut tagged = with_cost(project("0004", &[], "", "2025-01-01"), "较高");
        tagged.tags = vec!["low-threshold".to_string()];
        assert!(is_low_threshold(&tagged));
    }

    #[test]
    fn test_low_threshold_falls_back_when_nothing_matches() {
        let projects = vec![
            with_cost(project("0001", &[], "", "2025-01-01"), "需要囤货"),
            with_cost(project("0002", &[], "", "2025-01-02"), "需要设备"),
        ];
        let query = ProjectQuery {
            preference: Preference::LowThreshold,
            ..Default::default()
        };
        assert_eq!(filter_projects(&projects, &query).len(), 2);
    }

    #[test]
    fn test_high_revenue_keeps_all_without_tags() {
        let projects = catalog();
        let query = ProjectQuery {
            preference: Preference::HighRevenue,
            ..Default::default()
        };
        assert_eq!(filter_projects(&projects, &query).len(), 3);
    }

    #[test]
    fn test_high_revenue_keeps_untagged_alongside_tagged() {
        let mut projects = catalog();
        projects[1].tags = vec!["high-revenue".to_string()];
        let query = ProjectQuery {
            preference: Preference::HighRevenue,
            ..Default::default()
        };
        assert_eq!(filter_projects(&projects, &query).len(), 3);
    }

    #[test]
    fn test_popularity_sort_is_stable() {
        let mut projects = catalog();
        projects[2].statistics = Statistics {
            like_count: 50,
            ..Default::default()
        };
        let query = ProjectQuery {
            sort: SortOption::Popularity,
            ..Default::default()
        };
        // 0001 and 0002 tie at zero and keep catalog order.
        assert_eq!(ids(&filter_projects(&projects, &query)), ["0003", "0001", "0002"]);
    }

    // ── Facets ────────────────────────────────────────────────────────────────

    #[test]
    fn test_available_platforms_under_profit_model() {
        let projects = catalog();
        assert_eq!(available_platforms(&projects, "电商带货"), ["抖音", "小红书", "闲鱼"]);
        assert_eq!(available_platforms(&projects, "虚拟产品销售"), ["小红书"]);
    }

    #[test]
    fn test_available_profit_models_under_platform() {
        let projects = catalog();
        assert_eq!(
            available_profit_models(&projects, "小红书"),
            ["电商带货", "虚拟产品销售"]
        );
    }

    #[test]
    fn test_platform_facets_counts() {
        let projects = catalog();
        let facets = platform_facets(&projects, ALL);
        let summary: Vec<(&str, usize)> = facets.iter().map(|f| (f.id, f.count)).collect();
        assert_eq!(summary, [(ALL, 3), ("小红书", 2), ("抖音", 1), ("闲鱼", 1)]);
    }

    #[test]
    fn test_profit_model_facets_under_platform() {
        let projects = catalog();
        let facets = profit_model_facets(&projects, "闲鱼");
        let summary: Vec<(&str, usize)> = facets.iter().map(|f| (f.id, f.count)).collect();
        assert_eq!(summary, [(ALL, 1), ("电商带货", 1)]);
    }
}
