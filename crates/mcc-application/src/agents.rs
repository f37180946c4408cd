//! The built-in remote agent catalog.

/// Default platform id of the content orchestrator agent.
pub const CONTENT_AGENT_ID: &str = "69939142b175ad1ab1aed346";
/// Default platform id of the graphics generator agent.
pub const GRAPHICS_AGENT_ID: &str = "69939142b6bc6d320bbb0398";

/// Descriptive profile of one remote agent, for display and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub purpose: String,
}

/// The pair of agent ids a runner routes tasks to.
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    pub content_agent_id: String,
    pub graphics_agent_id: String,
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self {
            content_agent_id: CONTENT_AGENT_ID.to_string(),
            graphics_agent_id: GRAPHICS_AGENT_ID.to_string(),
        }
    }
}

impl AgentCatalog {
    /// Profiles for the built-in agents, in display order.
    pub fn profiles(&self) -> Vec<AgentProfile> {
        vec![
            AgentProfile {
                id: self.content_agent_id.clone(),
                name: "Content Orchestrator".to_string(),
                purpose: "SEO content generation and optimization".to_string(),
            },
            AgentProfile {
                id: self.graphics_agent_id.clone(),
                name: "Graphics Generator".to_string(),
                purpose: "Marketing visuals and graphic generation".to_string(),
            },
        ]
    }
}
