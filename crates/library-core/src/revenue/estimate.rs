//! Project-level aggregation: combine every case, then fall back to the
//! expected-revenue and case-revenue blurbs, then to a fixed placeholder.

use serde::Serialize;
use tracing::debug;

use super::case_rules::extract_monthly_from_case;
use super::{capture_number, MonthlyRange, RevenueInputs, FALLBACK_DISPLAY, FALLBACK_RANGE};
use crate::models::Project;

/// Pattern families tried, in order, against the combined blurb text when no
/// case description produced a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextRule {
    /// 月赚2到5万.
    TenThousandsRange,
    /// 月入3千到1万.
    ThousandsToTenThousands,
    /// 月入2万+.
    TenThousandsPlus,
    /// 日均100-300元.
    DailyAverage,
    /// 单视频变现500元, assuming 10–20 videos a month.
    PerVideo,
    /// 2万人充值, assuming 15 yuan each and a 30% platform cut.
    ChargeVolume,
    /// 累计进账12万.
    Cumulative,
    /// 50到100精准用户, assuming 10% conversion at 1,000 yuan.
    PreciseUsers,
}

impl TextRule {
    pub const CHAIN: [TextRule; 8] = [
        TextRule::TenThousandsRange,
        TextRule::ThousandsToTenThousands,
        TextRule::TenThousandsPlus,
        TextRule::DailyAverage,
        TextRule::PerVideo,
        TextRule::ChargeVolume,
        TextRule::Cumulative,
        TextRule::PreciseUsers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextRule::TenThousandsRange => "ten-thousands-range",
            TextRule::ThousandsToTenThousands => "thousands-to-ten-thousands",
            TextRule::TenThousandsPlus => "ten-thousands-plus",
            TextRule::DailyAverage => "daily-average",
            TextRule::PerVideo => "per-video",
            TextRule::ChargeVolume => "charge-volume",
            TextRule::Cumulative => "cumulative",
            TextRule::PreciseUsers => "precise-users",
        }
    }

    /// Try this rule alone. The result is already capped.
    pub fn apply(self, text: &str) -> Option<MonthlyRange> {
        let range = match self {
            TextRule::TenThousandsRange => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*[到至-]\s*([0-9]+(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                MonthlyRange::new(
                    capture_number(&caps, 1)? * 10_000.0,
                    capture_number(&caps, 2)? * 10_000.0,
                )
            }
            TextRule::ThousandsToTenThousands => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*千[到至-]\s*([0-9]+(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                MonthlyRange::new(
                    capture_number(&caps, 1)? * 1_000.0,
                    capture_number(&caps, 2)? * 10_000.0,
                )
            }
            TextRule::TenThousandsPlus => {
                let caps = cached_regex!(r"月[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*万\+?")
                    .captures(text)?;
                let base = capture_number(&caps, 1)? * 10_000.0;
                MonthlyRange::new(base * 0.6, base * 1.5)
            }
            TextRule::DailyAverage => {
                let caps = cached_regex!(r"日均?\s*([0-9]+)\s*[-到至]\s*([0-9]+)\s*元")
                    .captures(text)?;
                MonthlyRange::new(
                    capture_number(&caps, 1)? * 30.0 * 0.7,
                    capture_number(&caps, 2)? * 30.0,
                )
            }
            TextRule::PerVideo => {
                let caps = cached_regex!(r"单[视条]频.*?([0-9]+)\s*元").captures(text)?;
                let per_video = capture_number(&caps, 1)?;
                // Ten videos at a 50% hit rate up to twenty that all land.
                MonthlyRange::new(per_video * 10.0 * 0.5, per_video * 20.0)
            }
            TextRule::ChargeVolume => {
                let caps = cached_regex!(r"([0-9]+(?:\.[0-9]+)?)\s*万人?.*?充[值电]")
                    .captures(text)?;
                let users = capture_number(&caps, 1)? * 10_000.0;
                let monthly = users * 15.0 * 0.7 / 12.0;
                MonthlyRange::new(monthly * 0.5, monthly * 1.5)
            }
            TextRule::Cumulative => {
                let caps = cached_regex!(r"[累总进账共].*?([0-9]+(?:\.[0-9]+)?)\s*万")
                    .captures(text)?;
                let monthly = capture_number(&caps, 1)? * 10_000.0 / 6.0;
                MonthlyRange::new(monthly * 0.5, monthly * 1.2)
            }
            TextRule::PreciseUsers => {
                let caps = cached_regex!(
                    r"([0-9]+)\s*[到至-]\s*([0-9]+)\s*[个名位]?精准[用客]户"
                )
                .captures(text)?;
                MonthlyRange::new(
                    capture_number(&caps, 1)? * 0.1 * 1_000.0,
                    capture_number(&caps, 2)? * 0.1 * 1_000.0,
                )
            }
        };
        Some(range.capped())
    }
}

/// Where a [`RevenueEstimate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EstimateSource {
    /// Median of the ranges extracted from `used` case descriptions.
    Cases { used: usize },
    /// A blurb pattern.
    Text(TextRule),
    /// Any digits following 月赚/月入/月收 in the blurbs.
    LooseMonthly,
    /// Nothing usable; the fixed placeholder.
    Fallback,
}

/// A monthly interval plus the evidence it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueEstimate {
    pub range: MonthlyRange,
    pub source: EstimateSource,
}

impl RevenueEstimate {
    /// `¥{min}-{max}/月`, or the fallback literal.
    pub fn display(&self) -> String {
        match self.source {
            EstimateSource::Fallback => FALLBACK_DISPLAY.to_string(),
            _ => self.range.display(),
        }
    }
}

/// Element at index `len / 2` of the sorted values.
///
/// For an even count this is the upper of the two middle values, not their
/// mean. Display ranges are calibrated against that choice.
fn upper_median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(values[values.len() / 2])
}

/// Aggregate every case that yields a positive range.
fn estimate_from_cases(case_details: &[&str]) -> Option<RevenueEstimate> {
    let ranges: Vec<MonthlyRange> = case_details
        .iter()
        .filter(|detail| !detail.is_empty())
        .filter_map(|detail| extract_monthly_from_case(detail))
        .filter(MonthlyRange::is_positive)
        .collect();

    let range = match ranges.len() {
        0 => return None,
        1 => ranges[0],
        _ => MonthlyRange::new(
            upper_median(ranges.iter().map(|r| r.min).collect())?,
            upper_median(ranges.iter().map(|r| r.max).collect())?,
        ),
    };

    Some(RevenueEstimate {
        range: range.capped(),
        source: EstimateSource::Cases { used: ranges.len() },
    })
}

/// Collect every number that follows 月赚/月入/月收 and span min to max.
fn estimate_loose_monthly(text: &str) -> Option<RevenueEstimate> {
    let numbers: Vec<f64> = cached_regex!(r"月[赚入收].*?([0-9]+)")
        .captures_iter(text)
        .filter_map(|caps| capture_number(&caps, 1))
        .filter(|n| *n > 0.0)
        .collect();

    let min = numbers.iter().copied().reduce(f64::min)?;
    let max = numbers.iter().copied().reduce(f64::max)?;

    // Small figures are almost always quoted in 万.
    let range = if max < 100.0 {
        MonthlyRange::new(min * 10_000.0, max * 10_000.0)
    } else {
        MonthlyRange::new(min, max)
    };

    Some(RevenueEstimate {
        range: range.capped(),
        source: EstimateSource::LooseMonthly,
    })
}

/// Best-effort monthly estimate for one project's text sources.
///
/// Never fails: the last resort is [`EstimateSource::Fallback`].
pub fn estimate_revenue(inputs: &RevenueInputs<'_>) -> RevenueEstimate {
    if let Some(estimate) = estimate_from_cases(&inputs.case_details) {
        return estimate;
    }

    let text = format!("{} {}", inputs.expected_revenue, inputs.case_revenue);

    let text_hit = TextRule::CHAIN
        .iter()
        .find_map(|&rule| rule.apply(&text).map(|range| (rule, range)));
    if let Some((rule, range)) = text_hit {
        debug!("Text rule {} matched {:?}", rule.name(), text);
        return RevenueEstimate {
            range,
            source: EstimateSource::Text(rule),
        };
    }

    if let Some(estimate) = estimate_loose_monthly(&text) {
        return estimate;
    }

    debug!("No revenue signal in {:?}; using fallback", text);
    RevenueEstimate {
        range: FALLBACK_RANGE,
        source: EstimateSource::Fallback,
    }
}

/// Card display string for a project, e.g. `¥3,000-8,000/月`.
pub fn revenue_display(project: &Project) -> String {
    estimate_revenue(&RevenueInputs::from(project)).display()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
