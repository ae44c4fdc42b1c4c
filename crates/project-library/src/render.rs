//! Plain-text views printed to stdout.
//!
//! Every function returns a `String` so the output can be asserted on in tests.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use library_core::labels::{display_platform, project_type_label};
use library_core::models::{ArticleLinkItem, CaseReferenceItem, Project};
use library_core::ordering::ordered_detail;
use library_core::revenue::{
    estimate_revenue, match_case_rule, monthly_revenue, revenue_display, EstimateSource,
    RevenueInputs,
};
use library_core::time_utils::relative_time;
use library_data::filter::Facet;
use library_data::flags::FlagStore;
use library_data::ranking::{CatalogStats, RankingTab, TimeWindow};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ── Width helpers ─────────────────────────────────────────────────────────────

/// Cut `s` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let ellipsis = "…";
    let budget = max.saturating_sub(UnicodeWidthStr::width(ellipsis));
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ellipsis);
    out
}

/// Truncate then right-pad with spaces to exactly `width` columns.
///
/// Wide CJK glyphs count as two columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = UnicodeWidthStr::width(out.as_str());
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn platforms_label(project: &Project) -> String {
    project
        .platform
        .iter()
        .map(|p| display_platform(p))
        .collect::<Vec<_>>()
        .join("/")
}

// ── list / favorites ──────────────────────────────────────────────────────────

/// Project table with type label, revenue estimate and markers
/// (`★` favorite, `·` read).
pub fn render_list(projects: &[&Project], flags: &FlagStore, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} {} {} {} {} {}",
        pad_to_width("编号", 6),
        pad_to_width("标题", 26),
        pad_to_width("类型", 8),
        pad_to_width("平台", 16),
        pad_to_width("收益", 22),
        "发布"
    );

    for project in projects {
        let marker = if flags.is_favorite(&project.id) {
            "★"
        } else if flags.is_read(&project.id) {
            "·"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {}",
            marker,
            pad_to_width(&project.id, 6),
            pad_to_width(&project.title, 26),
            pad_to_width(project_type_label(&project.profit_model), 8),
            pad_to_width(&platforms_label(project), 16),
            pad_to_width(&revenue_display(project), 22),
            relative_time(&project.publish_time, now)
        );
    }

    let _ = writeln!(out, "共 {} 个项目", projects.len());
    out
}

// ── hot ───────────────────────────────────────────────────────────────────────

pub fn render_hot(
    ranked: &[&Project],
    window: TimeWindow,
    tab: RankingTab,
    flags: &FlagStore,
    now: NaiveDateTime,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} · {}", tab.label(), window.label());

    if ranked.is_empty() {
        let _ = writeln!(out, "暂无项目");
        return out;
    }

    for (i, project) in ranked.iter().enumerate() {
        let score = match tab {
            RankingTab::Likes => format!("👍 {}", flags.like_count(&project.id)),
            RankingTab::Voyage => format!("⛵ {}", flags.voyage_vote_count(&project.id)),
        };
        let _ = writeln!(
            out,
            "{:>2}. {} {} {} {}",
            i + 1,
            pad_to_width(&project.title, 26),
            pad_to_width(&monthly_revenue(project), 20),
            pad_to_width(&score, 8),
            relative_time(&project.publish_time, now)
        );
    }
    out
}

// ── show ──────────────────────────────────────────────────────────────────────

fn write_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, item);
    }
}

fn write_references(out: &mut String, heading: &str, items: &[CaseReferenceItem]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {heading}");
    for item in items {
        let _ = writeln!(
            out,
            "    {}. {} ({} · {}) {}",
            item.order, item.case_title, item.author, item.publish_time, item.profit_detail
        );
        if !item.link.is_empty() {
            let _ = writeln!(out, "       {}", item.link);
        }
    }
}

fn write_links(out: &mut String, heading: &str, items: &[ArticleLinkItem]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {heading}");
    for item in items {
        let _ = writeln!(
            out,
            "    {}. [{}] {} ({} · {})",
            item.order, item.kind, item.title, item.author, item.publish_time
        );
        if !item.link.is_empty() {
            let _ = writeln!(out, "       {}", item.link);
        }
    }
}

/// Full detail page with every section in display order.
pub fn render_detail(project: &Project, flags: &FlagStore, now: NaiveDateTime) -> String {
    let detail = ordered_detail(&project.detail_content);
    let mut out = String::new();

    let favorite = if flags.is_favorite(&project.id) { " ★" } else { "" };
    let _ = writeln!(out, "{} · {}{}", project.id, project.title, favorite);
    if !project.summary.is_empty() {
        let _ = writeln!(out, "{}", project.summary);
    }
    let _ = writeln!(
        out,
        "平台: {}  模式: {} ({})",
        platforms_label(project),
        project.profit_model,
        project_type_label(&project.profit_model)
    );
    let _ = writeln!(
        out,
        "发布: {} ({})",
        project.publish_time,
        relative_time(&project.publish_time, now)
    );
    let _ = writeln!(
        out,
        "收益: {}  {}",
        revenue_display(project),
        monthly_revenue(project)
    );
    let _ = writeln!(
        out,
        "点赞 {}  上航海 {}",
        flags.like_count(&project.id),
        flags.voyage_vote_count(&project.id)
    );
    if !project.highlights.is_empty() {
        let _ = writeln!(out, "亮点: {}", project.highlights);
    }

    if !detail.overview.is_empty() {
        let _ = writeln!(out, "\n这是什么项目？\n  {}", detail.overview);
    }

    if !detail.case_images.is_empty() {
        let _ = writeln!(out, "\n案例");
        for case in &detail.case_images {
            let _ = writeln!(
                out,
                "  {}. [{}] {} ({})",
                case.order, case.kind, case.case_title, case.publish_time
            );
            if !case.profit_detail.is_empty() {
                let _ = writeln!(out, "     {}", case.profit_detail);
            }
        }
    }

    write_list(&mut out, "为什么值得做？", &detail.why_worth_doing);
    write_list(&mut out, "怎么赚钱？", &detail.how_to_profit);

    let cost = &detail.cost_and_revenue;
    if !(cost.startup_cost.is_empty()
        && cost.expected_revenue.is_empty()
        && cost.payback_period.is_empty())
    {
        let _ = writeln!(out, "\n成本与收益");
        let _ = writeln!(out, "  启动成本: {}", cost.startup_cost);
        let _ = writeln!(out, "  预期收益: {}", cost.expected_revenue);
        let _ = writeln!(out, "  回本周期: {}", cost.payback_period);
    }

    write_list(&mut out, "怎么做？", &detail.steps);

    let refs = &detail.case_references;
    if !(refs.on_site.is_empty() && refs.platform.is_empty()) {
        let _ = writeln!(out, "\n参考案例");
        write_references(&mut out, "站内", &refs.on_site);
        write_references(&mut out, "平台", &refs.platform);
    }

    let links = &detail.related_links;
    if !(links.articles.is_empty() && links.policies.is_empty()) {
        let _ = writeln!(out, "\n相关链接");
        write_links(&mut out, "文章", &links.articles);
        write_links(&mut out, "政策", &links.policies);
    }

    out
}

// ── revenue ───────────────────────────────────────────────────────────────────

fn source_label(source: &EstimateSource) -> String {
    match source {
        EstimateSource::Cases { used } => format!("{used} 个案例取中位数"),
        EstimateSource::Text(rule) => format!("文本规则 {}", rule.name()),
        EstimateSource::LooseMonthly => "月入数字兜底".to_string(),
        EstimateSource::Fallback => "默认区间".to_string(),
    }
}

/// Per-case rule hits, the blurb inputs and the final card display.
pub fn render_revenue_project(project: &Project) -> String {
    let inputs = RevenueInputs::from(project);
    let mut out = String::new();
    let _ = writeln!(out, "{} · {}", project.id, project.title);

    let _ = writeln!(out, "\n案例");
    if inputs.case_details.is_empty() {
        let _ = writeln!(out, "  (无)");
    }
    for (i, detail) in inputs.case_details.iter().enumerate() {
        let hit = match match_case_rule(detail) {
            Some((rule, range)) => format!("{} → {}", rule.name(), range.display()),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "  {}. {}", i + 1, detail);
        let _ = writeln!(out, "     {hit}");
    }

    let _ = writeln!(out, "\n预期收益: {}", inputs.expected_revenue);
    let _ = writeln!(out, "案例收益: {}", inputs.case_revenue);

    let estimate = estimate_revenue(&inputs);
    let _ = writeln!(
        out,
        "\n展示: {}  ({})",
        estimate.display(),
        source_label(&estimate.source)
    );
    let _ = writeln!(out, "月入标签: {}", monthly_revenue(project));
    out
}

/// Explain how a single piece of case text is read.
pub fn render_revenue_text(text: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "输入: {text}");
    match match_case_rule(text) {
        Some((rule, range)) => {
            let _ = writeln!(out, "规则: {}", rule.name());
            let _ = writeln!(out, "区间: {}", range.display());
        }
        None => {
            let _ = writeln!(out, "规则: 无匹配");
        }
    }
    let estimate = estimate_revenue(&RevenueInputs {
        case_details: vec![text],
        ..Default::default()
    });
    let _ = writeln!(
        out,
        "展示: {}  ({})",
        estimate.display(),
        source_label(&estimate.source)
    );
    out
}

// ── stats ─────────────────────────────────────────────────────────────────────

pub fn render_stats(
    stats: &CatalogStats,
    platforms: &[Facet],
    profit_models: &[Facet],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "项目总数: {}", stats.total);
    let _ = writeln!(out, "本周新增: {}", stats.new_this_week);
    let _ = writeln!(out, "最近更新: {}", stats.latest_time_display());

    let _ = writeln!(out, "\n平台");
    for facet in platforms {
        let _ = writeln!(out, "  {} {}", pad_to_width(facet.label, 14), facet.count);
    }
    let _ = writeln!(out, "\n变现方式");
    for facet in profit_models {
        let _ = writeln!(out, "  {} {}", pad_to_width(facet.label, 14), facet.count);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use library_core::models::{CaseImage, DetailContent};
    use library_core::time_utils::parse_publish_time;

    fn now() -> NaiveDateTime {
        parse_publish_time("2025-12-20 12:00").unwrap()
    }

    fn sample() -> Project {
        Project {
            id: "0001".to_string(),
            title: "小红书虚拟资料".to_string(),
            platform: vec!["小红书".to_string(), "微信视频号".to_string()],
            profit_model: "虚拟产品销售".to_string(),
            publish_time: "2025-12-18 10:00".to_string(),
            detail_content: DetailContent {
                case_images: vec![
                    CaseImage {
                        case_title: "旧案例".to_string(),
                        profit_detail: "月入3000到8000".to_string(),
                        publish_time: "2025-10-01".to_string(),
                        ..Default::default()
                    },
                    CaseImage {
                        case_title: "新案例".to_string(),
                        profit_detail: "随便聊聊".to_string(),
                        publish_time: "2025-12-01".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    // ── Width helpers ─────────────────────────────────────────────────────────

    #[test]
    fn test_pad_to_width_cjk() {
        let padded = pad_to_width("标题", 6);
        assert_eq!(padded, "标题  ");
        assert_eq!(UnicodeWidthStr::width(padded.as_str()), 6);
    }

    #[test]
    fn test_truncate_to_width_marks_cut() {
        let cut = truncate_to_width("小红书虚拟资料", 8);
        assert!(cut.ends_with('…'));
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 8);
    }

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_to_width("abc", 8), "abc");
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_list_shows_revenue_and_markers() {
        let project = sample();
        let mut flags = FlagStore::default();
        flags.add_favorite("0001");
        let out = render_list(&[&project], &flags, now());
        assert!(out.contains("★ 0001"));
        assert!(out.contains("¥3,000-8,000/月"));
        assert!(out.contains("虚拟产品"));
        assert!(out.contains("小红书/视频号"));
        assert!(out.contains("2天前"));
        assert!(out.contains("共 1 个项目"));
    }

    #[test]
    fn test_render_detail_orders_cases() {
        let project = sample();
        let out = render_detail(&project, &FlagStore::default(), now());
        let newer = out.find("新案例").expect("newer case shown");
        let older = out.find("旧案例").expect("older case shown");
        assert!(newer < older);
        assert!(out.contains("点赞 10"));
    }

    #[test]
    fn test_render_revenue_project_explains_each_case() {
        let out = render_revenue_project(&sample());
        assert!(out.contains("plain-range → ¥3,000-8,000/月"));
        assert!(out.contains("     -"));
        assert!(out.contains("1 个案例取中位数"));
    }

    #[test]
    fn test_render_revenue_text() {
        let out = render_revenue_text("日赚100到300元");
        assert!(out.contains("daily-earnings"));
        assert!(out.contains("¥2,100-9,000/月"));
    }

    #[test]
    fn test_render_revenue_text_no_match() {
        let out = render_revenue_text("看运气");
        assert!(out.contains("无匹配"));
        assert!(out.contains("¥3,000-10,000/月"));
        assert!(out.contains("默认区间"));
    }

    #[test]
    fn test_render_hot_empty() {
        let out = render_hot(
            &[],
            TimeWindow::SevenDays,
            RankingTab::Likes,
            &FlagStore::default(),
            now(),
        );
        assert!(out.starts_with("点赞榜 · 近7天"));
        assert!(out.contains("暂无项目"));
    }

    #[test]
    fn test_render_stats() {
        let stats = CatalogStats {
            total: 3,
            new_this_week: 1,
            latest_time: "2025-12-19 21:30".to_string(),
        };
        let facets = [Facet {
            id: "all",
            label: "全部平台",
            count: 3,
        }];
        let out = render_stats(&stats, &facets, &[]);
        assert!(out.contains("项目总数: 3"));
        assert!(out.contains("最近更新: 12月19日 21:30"));
        assert!(out.contains("全部平台"));
    }
}
