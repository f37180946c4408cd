//! History domain model.
//!
//! A history item is the durable record of one completed task. It is created
//! exactly once per successful invocation and is immutable afterwards except
//! for deletion.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of task a history item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Article,
    Optimization,
    Graphic,
}

/// A durable record of one completed task outcome.
///
/// Identity is the `id`; uniqueness of ids is a store invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub kind: HistoryKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// SEO score in the 0-100 range, when the task produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Creation instant as an RFC 3339 string.
    pub timestamp: String,
}

impl HistoryItem {
    /// Creates an item with a fresh unique id and the current timestamp.
    pub fn new(kind: HistoryKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            content: None,
            image_url: None,
            seo_score: None,
            meta_description: None,
            keywords: Vec::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_seo_score(mut self, score: u8) -> Self {
        self.seo_score = Some(score.min(100));
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Type restriction applied by [`list`](super::HistoryStore::list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Kind(HistoryKind),
}

impl HistoryFilter {
    /// Whether the item passes this filter.
    pub fn matches(&self, item: &HistoryItem) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Kind(kind) => item.kind == *kind,
        }
    }
}
