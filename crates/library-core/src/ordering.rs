//! Display order for the detail-page sections.
//!
//! Every function sorts stably, newest first, and renumbers `order` from 1.
//! Items whose publish time cannot be parsed sort as if published at the epoch.

use crate::models::{ArticleLinkItem, CaseImage, CaseReferenceItem, DetailContent};
use crate::time_utils::publish_timestamp;

/// Rank of an article type; lower sorts first. Unknown types go last.
pub fn article_type_priority(kind: &str) -> u32 {
    match kind {
        "航海" => 1,
        "精华" => 2,
        "帖子" => 3,
        "中标" => 4,
        _ => 999,
    }
}

pub fn sort_case_images(items: &[CaseImage]) -> Vec<CaseImage> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(publish_timestamp(&item.publish_time)));
    for (i, item) in sorted.iter_mut().enumerate() {
        item.order = i as u32 + 1;
    }
    sorted
}

pub fn sort_case_references(items: &[CaseReferenceItem]) -> Vec<CaseReferenceItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(publish_timestamp(&item.publish_time)));
    for (i, item) in sorted.iter_mut().enumerate() {
        item.order = i as u32 + 1;
    }
    sorted
}

/// Type priority first (航海 > 精华 > 帖子 > 中标), then newest first.
pub fn sort_article_links(items: &[ArticleLinkItem]) -> Vec<ArticleLinkItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| {
        (
            article_type_priority(&item.kind),
            std::cmp::Reverse(publish_timestamp(&item.publish_time)),
        )
    });
    for (i, item) in sorted.iter_mut().enumerate() {
        item.order = i as u32 + 1;
    }
    sorted
}

/// A copy of `content` with every list section in display order.
pub fn ordered_detail(content: &DetailContent) -> DetailContent {
    let mut ordered = content.clone();
    ordered.case_images = sort_case_images(&content.case_images);
    ordered.case_references.on_site = sort_case_references(&content.case_references.on_site);
    ordered.case_references.platform = sort_case_references(&content.case_references.platform);
    ordered.related_links.articles = sort_article_links(&content.related_links.articles);
    ordered.related_links.policies = sort_article_links(&content.related_links.policies);
    ordered
}
