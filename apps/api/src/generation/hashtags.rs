//! One LLM call that replaces a single post's hashtag list.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::generation::prompts::{
    render_hashtag_optimization_prompt, system_prompt, HASHTAG_OPTIMIZATION_SYSTEM,
};
use crate::llm_client::{call_json, LanguageModel, LlmError};
use crate::models::post::{normalize_hashtags, MAX_HASHTAGS, MIN_HASHTAGS};

#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("model output failed validation: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizePostHashtagsInput {
    pub post_copy: String,
    pub original_hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizePostHashtagsOutput {
    pub optimized_hashtags: Vec<String>,
}

pub async fn optimize_post_hashtags(
    model: &dyn LanguageModel,
    input: &OptimizePostHashtagsInput,
) -> Result<OptimizePostHashtagsOutput, OptimizationError> {
    let prompt = render_hashtag_optimization_prompt(input);
    let output: OptimizePostHashtagsOutput =
        call_json(model, &prompt, &system_prompt(HASHTAG_OPTIMIZATION_SYSTEM)).await?;

    let optimized_hashtags = normalize_hashtags(output.optimized_hashtags);
    if !(MIN_HASHTAGS..=MAX_HASHTAGS).contains(&optimized_hashtags.len()) {
        return Err(OptimizationError::InvalidOutput(format!(
            "got {} hashtags, expected {MIN_HASHTAGS}-{MAX_HASHTAGS}",
            optimized_hashtags.len()
        )));
    }

    info!(
        "Optimized hashtags: {} -> {}",
        input.original_hashtags.len(),
        optimized_hashtags.len()
    );
    Ok(OptimizePostHashtagsOutput { optimized_hashtags })
}
