//! Turns a business profile into a 30-day calendar of finished posts.
//!
//! Flow: validate profile → render prompt → one LLM call → validate 30 drafts →
//!       resolve an image per draft (concurrently, placeholder on failure) → assemble.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::{
    render_post_generation_prompt, system_prompt, POST_GENERATION_SYSTEM,
};
use crate::images::ImageResolver;
use crate::llm_client::{call_json, LanguageModel, LlmError};
use crate::models::post::{
    normalize_hashtags, BusinessProfile, Post, PostDraft, CALENDAR_DAYS, MAX_HASHTAGS,
    MIN_HASHTAGS,
};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("missing required fields: {}", .0.join(", "))]
    InvalidProfile(Vec<&'static str>),

    #[error("model call failed: {0}")]
    Model(LlmError),

    #[error("model output failed validation: {0}")]
    InvalidOutput(String),
}

/// Structured output expected from the generation prompt.
#[derive(Debug, Deserialize)]
pub struct GeneratePostsOutput {
    pub posts: Vec<PostDraft>,
}

/// Runs the full generation flow. Image lookups never fail the flow; everything else does.
pub async fn generate_posts(
    model: &dyn LanguageModel,
    images: &ImageResolver,
    profile: &BusinessProfile,
) -> Result<Vec<Post>, GenerationError> {
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(GenerationError::InvalidProfile(missing));
    }

    info!("Generating content calendar for {:?}", profile.company_name);
    let prompt = render_post_generation_prompt(profile);
    let output: GeneratePostsOutput = call_json(model, &prompt, &system_prompt(POST_GENERATION_SYSTEM))
        .await
        .map_err(|e| match e {
            LlmError::Parse(e) => GenerationError::InvalidOutput(format!("malformed JSON: {e}")),
            LlmError::EmptyContent => {
                GenerationError::InvalidOutput("no structured output returned".to_string())
            }
            other => GenerationError::Model(other),
        })?;

    let drafts = validate_drafts(output.posts)?;

    let descriptions: Vec<String> = drafts.iter().map(|d| d.image_description.clone()).collect();
    let image_urls = images.resolve_all(&descriptions).await;

    let posts: Vec<Post> = drafts
        .into_iter()
        .zip(image_urls)
        .map(|(draft, image_url)| Post {
            copy: draft.copy,
            hashtags: draft.hashtags,
            image_url,
        })
        .collect();

    info!(
        "Generated {} posts for {:?}",
        posts.len(),
        profile.company_name
    );
    Ok(posts)
}

/// Enforces the calendar shape: exactly 30 drafts, non-empty copy, 3–5 hashtags each
/// (counted after normalization).
fn validate_drafts(drafts: Vec<PostDraft>) -> Result<Vec<PostDraft>, GenerationError> {
    if drafts.len() != CALENDAR_DAYS {
        warn!(
            "Model returned {} posts, expected {}",
            drafts.len(),
            CALENDAR_DAYS
        );
        return Err(GenerationError::InvalidOutput(format!(
            "expected {CALENDAR_DAYS} posts, got {}",
            drafts.len()
        )));
    }

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            if draft.copy.trim().is_empty() {
                return Err(GenerationError::InvalidOutput(format!(
                    "post {index} has empty copy"
                )));
            }
            let hashtags = normalize_hashtags(draft.hashtags);
            if !(MIN_HASHTAGS..=MAX_HASHTAGS).contains(&hashtags.len()) {
                return Err(GenerationError::InvalidOutput(format!(
                    "post {index} has {} hashtags, expected {MIN_HASHTAGS}-{MAX_HASHTAGS}",
                    hashtags.len()
                )));
            }
            Ok(PostDraft { hashtags, ..draft })
        })
        .collect()
}
