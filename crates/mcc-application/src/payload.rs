//! Typed views over the agent's result payloads and their mapping into
//! history items.
//!
//! The payload shape depends on the task: content tasks return article
//! fields and SEO analysis, graphics tasks return a description plus a
//! generated-file reference in the invocation's artifact files. Fields are
//! read defensively; a missing or mistyped payload never fails the mapping,
//! it only reduces what gets recorded.

use serde::Deserialize;
use serde_json::Value;

use mcc_core::history::{HistoryItem, HistoryKind};
use mcc_core::invocation::ArtifactFile;

/// Result payload of a content generation or optimization task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentResult {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub article_content: Option<String>,
    pub seo_score: Option<u8>,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub keyword_usage_summary: Option<String>,
    pub heading_structure: Vec<String>,
    pub word_count: Option<u32>,
    pub readability_score: Option<u8>,
    pub improvement_notes: Vec<String>,
    pub optimization_summary: Option<String>,
    pub competitor_insights: Option<String>,
}

impl ContentResult {
    /// Parses the payload, falling back to an empty result when the shape
    /// does not match.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Result payload of a graphics generation task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphicsResult {
    pub description: Option<String>,
    pub style: Option<String>,
    pub prompt_used: Option<String>,
    pub suggestions: Vec<String>,
}

impl GraphicsResult {
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// Builds the history record for a completed article task.
pub fn article_item(result: &ContentResult, fallback_title: &str) -> HistoryItem {
    let title = result
        .title
        .clone()
        .unwrap_or_else(|| fallback_title.trim().to_string());
    let mut item = HistoryItem::new(HistoryKind::Article, title)
        .with_content(result.article_content.clone().unwrap_or_default())
        .with_keywords(result.primary_keywords.clone());
    if let Some(score) = result.seo_score {
        item = item.with_seo_score(score);
    }
    if let Some(meta) = &result.meta_description {
        item = item.with_meta_description(meta.clone());
    }
    item
}

/// Builds the history record for a completed optimization task.
///
/// The recorded content prefers the optimization summary over the rewritten
/// article body.
pub fn optimization_item(result: &ContentResult) -> HistoryItem {
    let title = result
        .title
        .clone()
        .unwrap_or_else(|| "SEO Optimization Report".to_string());
    let content = result
        .optimization_summary
        .clone()
        .or_else(|| result.article_content.clone())
        .unwrap_or_default();
    let mut item = HistoryItem::new(HistoryKind::Optimization, title)
        .with_content(content)
        .with_keywords(result.primary_keywords.clone());
    if let Some(score) = result.seo_score {
        item = item.with_seo_score(score);
    }
    if let Some(meta) = &result.meta_description {
        item = item.with_meta_description(meta.clone());
    }
    item
}

/// Builds the history record for a completed graphics task.
///
/// The image URL comes from the first artifact file the invocation carried;
/// a text-only response (no artifact) is still a valid result.
pub fn graphic_item(
    result: &GraphicsResult,
    artifact_files: &[ArtifactFile],
    fallback_title: &str,
) -> HistoryItem {
    let title = result
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback_title.trim().to_string());
    let mut item = HistoryItem::new(HistoryKind::Graphic, title);
    if let Some(artifact) = artifact_files.first() {
        item = item.with_image_url(artifact.file_url.clone());
    }
    item
}
