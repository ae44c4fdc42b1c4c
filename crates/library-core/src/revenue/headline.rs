//! Short "月入…" headline used on compact cards.

use tracing::warn;

use crate::models::Project;

/// Find the first 月入/月赚/月收入/月佣金 phrase anywhere in the project and
/// echo it back as `月入{phrase}`.
///
/// The whole serialised project is scanned, so a phrase in any field (a step,
/// an overview, a case title) counts. Without one, `caseRevenue` is returned
/// with its `案例：` prefix removed.
pub fn monthly_revenue(project: &Project) -> String {
    let document = serde_json::to_string(project).unwrap_or_else(|e| {
        warn!("Could not serialise project {}: {}", project.id, e);
        String::new()
    });

    let phrase = cached_regex!(r#"(月入|月赚|月收入|月佣金)([^，。；,.;\s)）"”]{1,20})"#)
        .captures(&document)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().replace('"', "").trim().to_string());

    if let Some(phrase) = phrase {
        return format!("月入{phrase}");
    }

    let case_revenue = project.case_revenue.as_str();
    case_revenue
        .strip_prefix("案例:")
        .or_else(|| case_revenue.strip_prefix("案例："))
        .unwrap_or(case_revenue)
        .trim()
        .to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostAndRevenue, DetailContent};

    #[test]
    fn test_headline_from_nested_field() {
        let project = Project {
            id: "0002".to_string(),
            detail_content: DetailContent {
                steps: vec!["坚持三个月，月入5000，不难".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "月入5000");
    }

    #[test]
    fn test_headline_normalises_verb() {
        let project = Project {
            detail_content: DetailContent {
                cost_and_revenue: CostAndRevenue {
                    expected_revenue: "月赚2到3万，看执行".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "月入2到3万");
    }

    #[test]
    fn test_headline_stops_at_punctuation() {
        let project = Project {
            summary: "月佣金3万+。另有奖励".to_string(),
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "月入3万+");
    }

    #[test]
    fn test_headline_falls_back_to_case_revenue() {
        let project = Project {
            case_revenue: "案例：单日流水过千".to_string(),
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "单日流水过千");
    }

    #[test]
    fn test_headline_ascii_colon_prefix() {
        let project = Project {
            case_revenue: "案例: 年入百万".to_string(),
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "年入百万");
    }

    #[test]
    fn test_headline_keeps_inner_case_marker() {
        let project = Project {
            case_revenue: "参考案例：单日流水过千".to_string(),
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "参考案例：单日流水过千");
    }

    #[test]
    fn test_headline_strips_prefix_once() {
        let project = Project {
            case_revenue: "案例：案例：单日流水过千".to_string(),
            ..Default::default()
        };
        assert_eq!(monthly_revenue(&project), "案例：单日流水过千");
    }

    #[test]
    fn test_headline_scans_unmodelled_fields() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "0009",
            "caseRevenue": "案例：单日流水过千",
            "mentorNote": "稳定后月入8000左右"
        }))
        .expect("valid project");
        assert_eq!(monthly_revenue(&project), "月入8000左右");
    }

    #[test]
    fn test_headline_empty_project() {
        assert_eq!(monthly_revenue(&Project::default()), "");
    }
}
