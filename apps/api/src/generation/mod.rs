// Content generation: prompts, the two LLM flows, and the action layer that wraps them.
// All LLM calls go through llm_client. No direct Anthropic calls here.

pub mod actions;
pub mod handlers;
pub mod hashtags;
pub mod posts;
pub mod prompts;
