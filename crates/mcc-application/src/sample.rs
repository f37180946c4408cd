//! Canned sample content for demo mode.
//!
//! Sample items stand in for real history only while the store is empty;
//! they are never persisted, and any real recorded item displaces them.

use chrono::{Duration, Utc};

use mcc_core::history::{HistoryItem, HistoryKind};

/// Sample history entries, newest first, timestamped relative to now.
pub fn sample_history() -> Vec<HistoryItem> {
    let now = Utc::now();
    vec![
        HistoryItem {
            id: "sample-1".to_string(),
            kind: HistoryKind::Article,
            title: "The Ultimate Guide to Content Marketing in 2025".to_string(),
            content: Some(SAMPLE_ARTICLE_BODY.to_string()),
            image_url: None,
            seo_score: Some(87),
            meta_description: Some(
                "Discover the latest content marketing strategies, tools, and best \
                 practices to drive organic growth and engagement in 2025."
                    .to_string(),
            ),
            keywords: vec![
                "content marketing".to_string(),
                "SEO optimization".to_string(),
                "content strategy 2025".to_string(),
            ],
            timestamp: (now - Duration::hours(1)).to_rfc3339(),
        },
        HistoryItem {
            id: "sample-2".to_string(),
            kind: HistoryKind::Graphic,
            title: "Modern Marketing Dashboard Graphic".to_string(),
            content: None,
            image_url: Some(
                "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&h=600&fit=crop"
                    .to_string(),
            ),
            seo_score: None,
            meta_description: None,
            keywords: Vec::new(),
            timestamp: (now - Duration::hours(2)).to_rfc3339(),
        },
        HistoryItem {
            id: "sample-3".to_string(),
            kind: HistoryKind::Optimization,
            title: "SEO Optimization Report - Homepage".to_string(),
            content: Some(
                "Optimization analysis complete. Score improved from 62 to 84.".to_string(),
            ),
            image_url: None,
            seo_score: Some(84),
            meta_description: None,
            keywords: vec![
                "homepage optimization".to_string(),
                "conversion rate".to_string(),
            ],
            timestamp: (now - Duration::hours(24)).to_rfc3339(),
        },
    ]
}

/// What to display given the real history and whether demo mode is on.
/// Samples appear only when demo mode is on and the real history is empty.
pub fn display_history(real: Vec<HistoryItem>, sample_mode: bool) -> Vec<HistoryItem> {
    if sample_mode && real.is_empty() {
        sample_history()
    } else {
        real
    }
}

const SAMPLE_ARTICLE_BODY: &str = "# The Ultimate Guide to Content Marketing in 2025\n\n\
## Introduction\n\n\
Content marketing continues to evolve rapidly. In 2025, brands that embrace \
**AI-assisted workflows**, **data-driven strategy**, and **multi-channel distribution** \
will dominate organic search.\n\n\
## Key Strategies\n\n\
### 1. AI-Powered Content Creation\n\n\
Leverage AI tools to research topics, generate outlines, and produce first drafts \
faster than ever before.\n\n\
### 2. SEO-First Approach\n\n\
Every piece of content should be optimized for search engines from the start:\n\n\
- Target long-tail keywords with clear search intent\n\
- Structure content with proper heading hierarchy\n\
- Include internal and external links\n\
- Optimize meta descriptions and title tags\n\n\
### 3. Visual Content Integration\n\n\
Articles with custom graphics receive **94% more views** than text-only content.\n\n\
## Measuring Success\n\n\
Track these key metrics:\n\n\
1. Organic traffic growth\n\
2. Keyword ranking improvements\n\
3. Engagement rate (time on page, scroll depth)\n\
4. Conversion rate from content\n\
5. Backlink acquisition\n\n\
## Conclusion\n\n\
Content marketing in 2025 is about working smarter, not harder. Combine AI \
efficiency with human creativity for maximum impact.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_history_shape() {
        let samples = sample_history();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].kind, HistoryKind::Article);
        assert_eq!(samples[1].kind, HistoryKind::Graphic);
        assert_eq!(samples[2].kind, HistoryKind::Optimization);
        assert_eq!(samples[0].seo_score, Some(87));
        assert!(samples[1].image_url.is_some());
    }

    #[test]
    fn test_samples_only_cover_an_empty_history() {
        assert_eq!(display_history(Vec::new(), true).len(), 3);
        assert!(display_history(Vec::new(), false).is_empty());

        let real = vec![HistoryItem::new(HistoryKind::Article, "Real")];
        let shown = display_history(real, true);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Real");
    }
}
