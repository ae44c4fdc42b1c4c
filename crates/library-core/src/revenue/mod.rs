//! Monthly-revenue estimation from free-text earnings descriptions.
//!
//! Everything in this module is a pure function over its inputs: no I/O, no
//! shared state, and no error ever escapes. When no numeric signal can be
//! found the callers get `None` or the fixed fallback display.

/// Compile a pattern once and hand out a `'static` reference to it.
macro_rules! cached_regex {
    ($pattern:expr) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($pattern).expect("revenue pattern is valid"))
    }};
}

pub mod case_rules;
pub mod estimate;
pub mod headline;

use serde::Serialize;

use crate::formatting::format_monthly_range;
use crate::models::Project;

pub use case_rules::{extract_monthly_from_case, match_case_rule, CaseRule};
pub use estimate::{estimate_revenue, revenue_display, EstimateSource, RevenueEstimate, TextRule};
pub use headline::monthly_revenue;

/// Shown when no text source yields a usable number.
pub const FALLBACK_DISPLAY: &str = "¥3,000-10,000/月";

/// The interval behind [`FALLBACK_DISPLAY`].
pub const FALLBACK_RANGE: MonthlyRange = MonthlyRange {
    min: 3_000.0,
    max: 10_000.0,
};

/// Upper bound of `max / min` in any displayed interval.
pub const MAX_SPREAD: f64 = 5.0;

/// An estimated monthly income interval in CNY.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyRange {
    pub min: f64,
    pub max: f64,
}

impl MonthlyRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both endpoints are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.max > 0.0
    }

    /// Clamp `max` to `MAX_SPREAD × min`.
    pub fn capped(self) -> Self {
        Self {
            min: self.min,
            max: self.max.min(self.min * MAX_SPREAD),
        }
    }

    /// `¥{min}-{max}/月` with thousands separators.
    pub fn display(&self) -> String {
        format_monthly_range(self.min, self.max)
    }
}

/// The three text sources the estimator reads, borrowed from a project.
///
/// Per-case details take priority; the expected-revenue and case-revenue
/// blurbs are only consulted when no case yields a range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueInputs<'a> {
    pub case_details: Vec<&'a str>,
    pub expected_revenue: &'a str,
    pub case_revenue: &'a str,
}

impl<'a> From<&'a Project> for RevenueInputs<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            case_details: project
                .detail_content
                .case_images
                .iter()
                .map(|c| c.profit_detail.as_str())
                .collect(),
            expected_revenue: &project.detail_content.cost_and_revenue.expected_revenue,
            case_revenue: &project.case_revenue,
        }
    }
}

/// Parse capture group `idx` as a number, `None` when the group did not take part.
fn capture_number(caps: &regex::Captures<'_>, idx: usize) -> Option<f64> {
    caps.get(idx).and_then(|m| m.as_str().parse::<f64>().ok())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
