//! Application layer: task orchestration over the agent platform.
//!
//! Builds prompts from task specifications, routes them to the right remote
//! agent, and turns usable results into history records. The lower layers
//! stay policy-free; everything opinionated about the marketing workflows
//! lives here.

pub mod agents;
pub mod export;
pub mod payload;
pub mod prompt;
pub mod runner;
pub mod sample;

pub use agents::{AgentCatalog, AgentProfile, CONTENT_AGENT_ID, GRAPHICS_AGENT_ID};
pub use prompt::{ArticleSpec, GraphicSpec, GraphicStyle, OptimizationSource};
pub use runner::{TaskReport, TaskRequest, TaskRunner};
