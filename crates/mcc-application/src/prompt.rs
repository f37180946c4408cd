//! Task specifications and the prompts built from them.

use std::fmt;

/// Inputs for a new SEO article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSpec {
    pub topic: String,
    pub audience: String,
    pub tone: String,
    pub keywords: Vec<String>,
}

impl ArticleSpec {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            audience: "General".to_string(),
            tone: "Professional".to_string(),
            keywords: Vec::new(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn prompt(&self) -> String {
        let keywords = if self.keywords.is_empty() {
            String::new()
        } else {
            format!(" Keywords to include: {}.", self.keywords.join(", "))
        };
        format!(
            "Write an SEO-optimized article about: {}. Target audience: {}. Tone: {}.{}",
            self.topic.trim(),
            self.audience,
            self.tone,
            keywords
        )
    }
}

/// Inputs for an SEO optimization pass over existing content.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationSource {
    /// Analyze content behind a URL.
    Url(String),
    /// Analyze pasted content directly.
    PastedContent(String),
}

impl OptimizationSource {
    pub fn prompt(&self) -> String {
        match self {
            OptimizationSource::Url(url) => format!(
                "Analyze and optimize this content for SEO. URL: {}",
                url.trim()
            ),
            OptimizationSource::PastedContent(content) => format!(
                "Analyze and optimize this content for SEO:\n\n{}",
                content.trim()
            ),
        }
    }
}

/// Visual styles the graphics generator supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicStyle {
    #[default]
    Modern,
    Minimalist,
    Bold,
    Illustrated,
    Photorealistic,
}

impl GraphicStyle {
    pub const ALL: [GraphicStyle; 5] = [
        GraphicStyle::Modern,
        GraphicStyle::Minimalist,
        GraphicStyle::Bold,
        GraphicStyle::Illustrated,
        GraphicStyle::Photorealistic,
    ];
}

impl fmt::Display for GraphicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GraphicStyle::Modern => "Modern",
            GraphicStyle::Minimalist => "Minimalist",
            GraphicStyle::Bold => "Bold",
            GraphicStyle::Illustrated => "Illustrated",
            GraphicStyle::Photorealistic => "Photorealistic",
        };
        write!(f, "{}", label)
    }
}

/// Inputs for a marketing graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicSpec {
    pub description: String,
    pub style: GraphicStyle,
}

impl GraphicSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            style: GraphicStyle::default(),
        }
    }

    pub fn with_style(mut self, style: GraphicStyle) -> Self {
        self.style = style;
        self
    }

    pub fn prompt(&self) -> String {
        format!(
            "Create a {} marketing graphic: {}",
            self.style.to_string().to_lowercase(),
            self.description.trim()
        )
    }
}
