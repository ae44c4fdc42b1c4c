//! The ordered rule chain that turns one case description into a monthly range.
//!
//! Rules are tried in [`CaseRule::CHAIN`] order and the first one that yields
//! a range wins. Mixed-unit patterns sit before the uniform-unit ones so that
//! "500到2千" reads as 500–2,000 yuan rather than 5–20 million.

use tracing::debug;

use super::{capture_number, MonthlyRange};

/// One pattern family of the case-description chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseRule {
    /// 月赚500到2千: bare yuan on the left, 千 on the right.
    YuanToThousands,
    /// 月入1400到1.4万: bare yuan on the left, 万 on the right.
    YuanToTenThousands,
    /// 月赚3千到1万.
    ThousandsToTenThousands,
    /// 月入2到5万: small numbers on both sides, read as 万.
    TenThousandsRange,
    /// 月赚3到5千.
    ThousandsRange,
    /// 月赚几千到几万.
    FewThousandToFewTenThousand,
    /// 月赚几百到几千.
    FewHundredToFewThousand,
    /// 月入2万 with no range.
    SingleTenThousands,
    /// 月赚X到Y with an optional 万/千/元 suffix.
    PlainRange,
    /// 日赚100到300元.
    DailyEarnings,
    /// 一天10到20单, optionally with a unit price.
    DailyOrders,
    /// 累计赚了5万.
    Cumulative,
    /// 年赚24万.
    Annual,
    /// 3000人付费 with a per-item price.
    PaidUsers,
}

impl CaseRule {
    /// Evaluation order. Reordering changes results on real inputs.
    pub const CHAIN: [CaseRule; 14] = [
        CaseRule::YuanToThousands,
        CaseRule::YuanToTenThousands,
        CaseRule::ThousandsToTenThousands,
        CaseRule::TenThousandsRange,
        CaseRule::ThousandsRange,
        CaseRule::FewThousandToFewTenThousand,
        CaseRule::FewHundredToFewThousand,
        CaseRule::SingleTenThousands,
        CaseRule::PlainRange,
        CaseRule::DailyEarnings,
        CaseRule::DailyOrders,
        CaseRule::Cumulative,
        CaseRule::Annual,
        CaseRule::PaidUsers,
    ];

    /// Short label for logs and the `revenue` view.
    pub fn name(self) -> &'static str {
        match self {
            CaseRule::YuanToThousands => "yuan-to-thousands",
            CaseRule::YuanToTenThousands => "yuan-to-ten-thousands",
            CaseRule::ThousandsToTenThousands => "thousands-to-ten-thousands",
            CaseRule::TenThousandsRange => "ten-thousands-range",
            CaseRule::ThousandsRange => "thousands-range",
            CaseRule::FewThousandToFewTenThousand => "few-thousand-to-few-ten-thousand",
            CaseRule::FewHundredToFewThousand => "few-hundred-to-few-thousand",
            CaseRule::SingleTenThousands => "single-ten-thousands",
            CaseRule::PlainRange => "plain-range",
            CaseRule::DailyEarnings => "daily-earnings",
            CaseRule::DailyOrders => "daily-orders",
            CaseRule::Cumulative => "cumulative",
            CaseRule::Annual => "annual",
            CaseRule::PaidUsers => "paid-users",
        }
    }

    /// Try this rule alone against `text`.
    pub fn apply(self, text: &str) -> Option<MonthlyRange> {
        match self {
            CaseRule::YuanToThousands => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]{3,})\s*[到至-]\s*([0-9]+)\s*千"
                )
                .captures(text)?;
                Some(MonthlyRange::new(
                    capture_number(&caps, 1)?,
                    capture_number(&caps, 2)? * 1_000.0,
                ))
            }
            CaseRule::YuanToTenThousands => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]{3,})\s*[到至-]\s*([0-9]+(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                Some(MonthlyRange::new(
                    capture_number(&caps, 1)?,
                    capture_number(&caps, 2)? * 10_000.0,
                ))
            }
            CaseRule::ThousandsToTenThousands => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*千[到至-]\s*([0-9]+(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                Some(MonthlyRange::new(
                    capture_number(&caps, 1)? * 1_000.0,
                    capture_number(&caps, 2)? * 10_000.0,
                ))
            }
            CaseRule::TenThousandsRange => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]{1,2}(?:\.[0-9]+)?)\s*[到至-]\s*([0-9]{1,2}(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                Some(MonthlyRange::new(
                    capture_number(&caps, 1)? * 10_000.0,
                    capture_number(&caps, 2)? * 10_000.0,
                ))
            }
            CaseRule::ThousandsRange => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]{1,2})\s*[到至-]\s*([0-9]+(?:\.[0-9]+)?)\s*千"
                )
                .captures(text)?;
                Some(MonthlyRange::new(
                    capture_number(&caps, 1)? * 1_000.0,
                    capture_number(&caps, 2)? * 1_000.0,
                ))
            }
            CaseRule::FewThousandToFewTenThousand => cached_regex!(r"月[赚入].*几千[到至].*几万")
                .is_match(text)
                .then_some(MonthlyRange::new(3_000.0, 30_000.0)),
            CaseRule::FewHundredToFewThousand => cached_regex!(r"月[赚入].*几百[到至].*几千")
                .is_match(text)
                .then_some(MonthlyRange::new(500.0, 5_000.0)),
            CaseRule::SingleTenThousands => {
                let caps = cached_regex!(r"月[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*万")
                    .captures(text)?;
                let value = capture_number(&caps, 1)? * 10_000.0;
                Some(MonthlyRange::new(value * 0.6, value * 1.2))
            }
            CaseRule::PlainRange => {
                let caps = cached_regex!(
                    r"月[赚入收]入?\s*([0-9]+)\s*[到至-]\s*([0-9]+)\s*(万|千|元)?"
                )
                .captures(text)?;
                let mut min = capture_number(&caps, 1)?;
                let mut max = capture_number(&caps, 2)?;
                match caps.get(3).map(|m| m.as_str()) {
                    Some("万") => {
                        min *= 10_000.0;
                        max *= 10_000.0;
                    }
                    Some("千") => {
                        min *= 1_000.0;
                        max *= 1_000.0;
                    }
                    // No unit (or 元): two small numbers are most likely 万.
                    _ => {
                        if min < 100.0 && max < 100.0 {
                            min *= 10_000.0;
                            max *= 10_000.0;
                        }
                    }
                }
                (min >= 100.0 && max >= 100.0 && max >= min).then_some(MonthlyRange::new(min, max))
            }
            CaseRule::DailyEarnings => {
                let caps = cached_regex!(
                    r"[日天]赚?\s*([0-9]+)\s*[到至-]?\s*([0-9]+)?\s*元"
                )
                .captures(text)?;
                let day_min = capture_number(&caps, 1)?;
                let day_max = capture_number(&caps, 2).unwrap_or(day_min);
                Some(MonthlyRange::new(day_min * 30.0 * 0.7, day_max * 30.0))
            }
            CaseRule::DailyOrders => {
                let orders = cached_regex!(
                    r"[一每]天\s*([0-9]+)\s*[到至-]?\s*([0-9]+)?\s*单"
                )
                .captures(text)?;
                let orders_min = capture_number(&orders, 1)?;
                let orders_max = capture_number(&orders, 2).unwrap_or(orders_min);
                let price = cached_regex!(r"([0-9]+)\s*[块元].*一[单份]|单价\s*([0-9]+)")
                    .captures(text)
                    .and_then(|caps| capture_number(&caps, 1).or_else(|| capture_number(&caps, 2)))
                    .unwrap_or(30.0);
                Some(MonthlyRange::new(
                    price * orders_min * 30.0 * 0.7,
                    price * orders_max * 30.0,
                ))
            }
            CaseRule::Cumulative => {
                let caps = cached_regex!(
                    r"[累总共]计?[赚进账了]*\s*([0-9]+(?:\.[0-9]+)?)\s*万"
                )
                .captures(text)?;
                // Spread over an assumed six months.
                let monthly = capture_number(&caps, 1)? * 10_000.0 / 6.0;
                Some(MonthlyRange::new(monthly * 0.5, monthly * 1.5))
            }
            CaseRule::Annual => {
                let caps = cached_regex!(r"年[赚入收]入?\s*([0-9]+(?:\.[0-9]+)?)\s*万")
                    .captures(text)?;
                let monthly = capture_number(&caps, 1)? * 10_000.0 / 12.0;
                Some(MonthlyRange::new(monthly * 0.8, monthly * 1.2))
            }
            CaseRule::PaidUsers => {
                let users_caps = cached_regex!(
                    r"([0-9]+(?:\.[0-9]+)?)\s*[万千]?人?.*[充值付费买]"
                )
                .captures(text)?;
                let price_caps = cached_regex!(
                    r"([0-9]+)\s*[块元].*一[份个]|[每单].*([0-9]+)\s*[块元]"
                )
                .captures(text)?;
                let mut users = capture_number(&users_caps, 1)?;
                if text.contains("万人") {
                    users *= 10_000.0;
                } else if text.contains("千人") {
                    users *= 1_000.0;
                }
                let price =
                    capture_number(&price_caps, 1).or_else(|| capture_number(&price_caps, 2))?;
                // Treated as a yearly total with a heavy discount.
                let monthly = users * price / 12.0;
                Some(MonthlyRange::new(monthly * 0.3, monthly * 0.8))
            }
        }
    }
}

/// Run the chain and report which rule produced the range.
pub fn match_case_rule(text: &str) -> Option<(CaseRule, MonthlyRange)> {
    let hit = CaseRule::CHAIN
        .iter()
        .find_map(|&rule| rule.apply(text).map(|range| (rule, range)));

    match &hit {
        Some((rule, range)) => debug!(
            "Case rule {} matched {:?}: {:.0}-{:.0}",
            rule.name(),
            text,
            range.min,
            range.max
        ),
        None => debug!("No case rule matched {:?}", text),
    }

    hit
}

/// Extract a monthly range from one case description, `None` when no rule fits.
pub fn extract_monthly_from_case(text: &str) -> Option<MonthlyRange> {
    match_case_rule(text).map(|(_, range)| range)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
