use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One image in a project's case carousel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseImage {
    pub image_url: String,
    /// Position after sorting, starting at 1.
    pub order: u32,
    pub case_title: String,
    /// Free-text description of what the case earned.
    #[serde(deserialize_with = "nullable")]
    pub profit_detail: String,
    /// Source kind, e.g. 中标 / 风向标 / 生财好事 / 帖子 / 线索.
    #[serde(rename = "type")]
    pub kind: String,
    pub publish_time: String,
}

/// A referenced case, either from the community site or an external platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseReferenceItem {
    pub order: u32,
    pub author: String,
    pub author_link: String,
    pub publish_time: String,
    pub case_title: String,
    #[serde(deserialize_with = "nullable")]
    pub profit_detail: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// An article or policy link attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleLinkItem {
    pub order: u32,
    pub author: String,
    pub author_link: String,
    pub publish_time: String,
    pub title: String,
    pub link: String,
    /// 航海 / 精华 / 帖子 / 中标.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Case references grouped by origin.
///
/// Older catalog files store a flat array; those items are read as on-site
/// (站内) references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CaseReferencesRepr")]
pub struct CaseReferences {
    #[serde(rename = "站内")]
    pub on_site: Vec<CaseReferenceItem>,
    #[serde(rename = "平台")]
    pub platform: Vec<CaseReferenceItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaseReferencesRepr {
    Flat(Vec<CaseReferenceItem>),
    Grouped {
        #[serde(rename = "站内", default, deserialize_with = "nullable")]
        on_site: Vec<CaseReferenceItem>,
        #[serde(rename = "平台", default, deserialize_with = "nullable")]
        platform: Vec<CaseReferenceItem>,
    },
}

impl From<CaseReferencesRepr> for CaseReferences {
    fn from(repr: CaseReferencesRepr) -> Self {
        match repr {
            CaseReferencesRepr::Flat(on_site) => Self {
                on_site,
                platform: Vec::new(),
            },
            CaseReferencesRepr::Grouped { on_site, platform } => Self { on_site, platform },
        }
    }
}

/// Related links grouped into articles and policies.
///
/// A flat array is read as articles (文章).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RelatedLinksRepr")]
pub struct RelatedLinks {
    #[serde(rename = "文章")]
    pub articles: Vec<ArticleLinkItem>,
    #[serde(rename = "政策")]
    pub policies: Vec<ArticleLinkItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RelatedLinksRepr {
    Flat(Vec<ArticleLinkItem>),
    Grouped {
        #[serde(rename = "文章", default, deserialize_with = "nullable")]
        articles: Vec<ArticleLinkItem>,
        #[serde(rename = "政策", default, deserialize_with = "nullable")]
        policies: Vec<ArticleLinkItem>,
    },
}

impl From<RelatedLinksRepr> for RelatedLinks {
    fn from(repr: RelatedLinksRepr) -> Self {
        match repr {
            RelatedLinksRepr::Flat(articles) => Self {
                articles,
                policies: Vec::new(),
            },
            RelatedLinksRepr::Grouped { articles, policies } => Self { articles, policies },
        }
    }
}

/// Startup cost, expected revenue and payback period, all free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostAndRevenue {
    #[serde(deserialize_with = "nullable")]
    pub startup_cost: String,
    #[serde(deserialize_with = "nullable")]
    pub expected_revenue: String,
    #[serde(deserialize_with = "nullable")]
    pub payback_period: String,
}

/// Engagement counters shipped with the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub click_count: u64,
    pub read_count: u64,
    pub favorite_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
}

/// Long-form content shown on a project's detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailContent {
    pub overview: String,
    #[serde(deserialize_with = "nullable")]
    pub case_images: Vec<CaseImage>,
    pub why_worth_doing: Vec<String>,
    pub how_to_profit: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub cost_and_revenue: CostAndRevenue,
    pub steps: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub case_references: CaseReferences,
    #[serde(deserialize_with = "nullable")]
    pub related_links: RelatedLinks,
}

/// A single catalog entry.
///
/// Field order matches the catalog files so that serialising a project
/// reproduces the document order the headline search scans. Unknown fields
/// survive the round trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Zero-padded project number, e.g. `"0001"`.
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Up to three highlights separated by `｜`.
    pub highlights: String,
    pub platform: Vec<String>,
    pub profit_model: String,
    /// Short revenue blurb, often prefixed with `案例：`.
    #[serde(deserialize_with = "nullable")]
    pub case_revenue: String,
    pub cover_image: String,
    pub publish_time: String,
    #[serde(deserialize_with = "nullable")]
    pub detail_content: DetailContent,
    #[serde(deserialize_with = "nullable")]
    pub statistics: Statistics,
    /// Optional curation tags such as `high-revenue` or `low-threshold`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Catalog fields without a typed counterpart, kept verbatim and
    /// serialised after the known ones.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    /// Engagement score used by the "hot" orderings:
    /// likes + favorites + reads / 10.
    pub fn popularity_score(&self) -> f64 {
        let stats = &self.statistics;
        stats.like_count as f64 + stats.favorite_count as f64 + stats.read_count as f64 / 10.0
    }

    /// Whether the project carries the given curation tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserialize_minimal() {
        let project: Project = serde_json::from_value(json!({ "id": "0007" })).unwrap();
        assert_eq!(project.id, "0007");
        assert!(project.case_revenue.is_empty());
        assert!(project.detail_content.case_images.is_empty());
        assert!(project.detail_content.cost_and_revenue.expected_revenue.is_empty());
    }

    #[test]
    fn test_project_keeps_unknown_fields_last() {
        let project: Project = serde_json::from_value(json!({
            "id": "0005",
            "mentorNote": "先做三单",
            "title": "闲鱼卖书"
        }))
        .unwrap();
        assert_eq!(project.extra.get("mentorNote"), Some(&json!("先做三单")));

        let text = serde_json::to_string(&project).unwrap();
        let title_at = text.find("\"title\"").unwrap();
        let note_at = text.find("\"mentorNote\"").unwrap();
        assert!(title_at < note_at);
    }

    #[test]
    fn test_project_deserialize_nulls_as_empty() {
        let project: Project = serde_json::from_value(json!({
            "id": "0003",
            "caseRevenue": null,
            "detailContent": {
                "caseImages": [{ "profitDetail": null }],
                "costAndRevenue": { "expectedRevenue": null }
            }
        }))
        .unwrap();
        assert_eq!(project.case_revenue, "");
        assert_eq!(project.detail_content.case_images.len(), 1);
        assert_eq!(project.detail_content.case_images[0].profit_detail, "");
    }

    #[test]
    fn test_project_deserialize_camel_case_fields() {
        let project: Project = serde_json::from_value(json!({
            "id": "0001",
            "profitModel": "电商带货",
            "caseRevenue": "案例：月入2万",
            "publishTime": "2025-12-18 14:28",
            "statistics": { "likeCount": 12, "favoriteCount": 3, "readCount": 250 },
            "detailContent": {
                "caseImages": [{ "caseTitle": "宝妈副业", "type": "中标", "profitDetail": "月入3000到8000" }]
            }
        }))
        .unwrap();
        assert_eq!(project.profit_model, "电商带货");
        assert_eq!(project.statistics.like_count, 12);
        assert_eq!(project.detail_content.case_images[0].kind, "中标");
        assert_eq!(
            project.detail_content.case_images[0].profit_detail,
            "月入3000到8000"
        );
    }

    #[test]
    fn test_case_references_grouped() {
        let refs: CaseReferences = serde_json::from_value(json!({
            "站内": [{ "caseTitle": "a" }],
            "平台": [{ "caseTitle": "b" }, { "caseTitle": "c" }]
        }))
        .unwrap();
        assert_eq!(refs.on_site.len(), 1);
        assert_eq!(refs.platform.len(), 2);
    }

    #[test]
    fn test_case_references_legacy_flat_array() {
        let refs: CaseReferences =
            serde_json::from_value(json!([{ "caseTitle": "a" }, { "caseTitle": "b" }])).unwrap();
        assert_eq!(refs.on_site.len(), 2);
        assert!(refs.platform.is_empty());
    }

    #[test]
    fn test_related_links_legacy_flat_array() {
        let links: RelatedLinks =
            serde_json::from_value(json!([{ "title": "航海手册", "type": "航海" }])).unwrap();
        assert_eq!(links.articles.len(), 1);
        assert_eq!(links.articles[0].kind, "航海");
        assert!(links.policies.is_empty());
    }

    #[test]
    fn test_related_links_serialize_grouped() {
        let links = RelatedLinks {
            articles: vec![ArticleLinkItem {
                title: "t".to_string(),
                ..Default::default()
            }],
            policies: Vec::new(),
        };
        let value = serde_json::to_value(&links).unwrap();
        assert!(value.get("文章").is_some());
        assert!(value.get("政策").is_some());
    }

    #[test]
    fn test_popularity_score() {
        let project = Project {
            statistics: Statistics {
                like_count: 10,
                favorite_count: 5,
                read_count: 120,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!((project.popularity_score() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn test_tags_skipped_when_empty() {
        let value = serde_json::to_value(Project::default()).unwrap();
        assert!(value.get("tags").is_none());
    }
}
