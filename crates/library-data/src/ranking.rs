//! Hot-project rankings and catalog-wide statistics.

use std::str::FromStr;

use chrono::NaiveDateTime;
use library_core::error::LibraryError;
use library_core::models::Project;
use library_core::time_utils::{format_latest_time, within_days, DEFAULT_LATEST_TIME};
use serde::Serialize;

use crate::filter::{sort_projects, SortOption};

/// Entries shown per ranking.
pub const RANKING_SIZE: usize = 6;

/// Days counted as "this week" by the stats banner.
pub const NEW_PROJECT_DAYS: i64 = 7;

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// How far back a ranking looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    SevenDays,
    #[default]
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl TimeWindow {
    pub fn days(self) -> i64 {
        match self {
            TimeWindow::SevenDays => 7,
            TimeWindow::OneMonth => 30,
            TimeWindow::ThreeMonths => 90,
            TimeWindow::OneYear => 365,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::SevenDays => "近7天",
            TimeWindow::OneMonth => "近1月",
            TimeWindow::ThreeMonths => "近3月",
            TimeWindow::OneYear => "近1年",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeWindow::SevenDays),
            "1m" => Ok(TimeWindow::OneMonth),
            "3m" => Ok(TimeWindow::ThreeMonths),
            "1y" => Ok(TimeWindow::OneYear),
            other => Err(LibraryError::Config(format!("unknown time window: {other}"))),
        }
    }
}

// ── RankingTab ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingTab {
    /// 点赞榜: most popular first.
    #[default]
    Likes,
    /// 航海热度榜: newest first.
    Voyage,
}

impl RankingTab {
    pub fn label(self) -> &'static str {
        match self {
            RankingTab::Likes => "点赞榜",
            RankingTab::Voyage => "航海热度榜",
        }
    }
}

impl FromStr for RankingTab {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "likes" => Ok(RankingTab::Likes),
            "voyage" => Ok(RankingTab::Voyage),
            other => Err(LibraryError::Config(format!("unknown ranking tab: {other}"))),
        }
    }
}

/// Top [`RANKING_SIZE`] projects published inside `window`, ordered for `tab`.
///
/// Projects with an unparseable publish time never appear.
pub fn rank_projects(
    projects: &[Project],
    window: TimeWindow,
    tab: RankingTab,
    now: NaiveDateTime,
) -> Vec<&Project> {
    let mut recent: Vec<&Project> = projects
        .iter()
        .filter(|p| within_days(&p.publish_time, now, window.days()))
        .collect();

    let sort = match tab {
        RankingTab::Likes => SortOption::Popularity,
        RankingTab::Voyage => SortOption::Time,
    };
    sort_projects(&mut recent, sort);
    recent.truncate(RANKING_SIZE);
    recent
}

// ── CatalogStats ──────────────────────────────────────────────────────────────

/// Figures for the catalog banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    /// Published within the last [`NEW_PROJECT_DAYS`] days.
    pub new_this_week: usize,
    /// Greatest publish-time string, or [`DEFAULT_LATEST_TIME`] for an empty catalog.
    pub latest_time: String,
}

impl CatalogStats {
    pub fn compute(projects: &[Project], now: NaiveDateTime) -> Self {
        let latest_time = projects
            .iter()
            .map(|p| p.publish_time.as_str())
            .max()
            .unwrap_or(DEFAULT_LATEST_TIME)
            .to_string();

        Self {
            total: projects.len(),
            new_this_week: projects
                .iter()
                .filter(|p| within_days(&p.publish_time, now, NEW_PROJECT_DAYS))
                .count(),
            latest_time,
        }
    }

    /// `latest_time` as `M月D日 HH:MM`.
    pub fn latest_time_display(&self) -> String {
        format_latest_time(&self.latest_time)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
