mod assistant_service;
mod context_service;

pub use assistant_service::{assemble_prompt, AssistantError, AssistantService, PERSONA};
pub use context_service::{ContextError, ContextService, ExtractedContext};
