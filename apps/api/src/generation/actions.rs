//! The one place flow failures become user-facing messages.
//!
//! Every entry point returns an `ActionResult`; no flow error escapes to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::generation::hashtags::{optimize_post_hashtags, OptimizePostHashtagsInput};
use crate::generation::posts::{generate_posts, GenerationError};
use crate::images::ImageResolver;
use crate::llm_client::LanguageModel;
use crate::models::post::{BusinessProfile, Post};

pub const GENERATION_FAILED_MESSAGE: &str =
    "Could not generate posts at this time. Please try again later.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all required fields to generate posts.";
pub const OPTIMIZATION_FAILED_MESSAGE: &str =
    "Could not optimize hashtags at this time. Please try again later.";

/// `{...payload}` on success, `{"error": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResult<T> {
    Success(T),
    Failure { error: String },
}

impl<T> ActionResult<T> {
    fn failure(message: &str) -> Self {
        ActionResult::Failure {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPosts {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedHashtags {
    pub optimized_hashtags: Vec<String>,
}

/// Entry points for both flows, bound to a model and an image resolver.
#[derive(Clone)]
pub struct PostActions {
    model: Arc<dyn LanguageModel>,
    images: ImageResolver,
}

impl PostActions {
    pub fn new(model: Arc<dyn LanguageModel>, images: ImageResolver) -> Self {
        Self { model, images }
    }

    pub async fn generate_posts(&self, profile: &BusinessProfile) -> ActionResult<GeneratedPosts> {
        match generate_posts(self.model.as_ref(), &self.images, profile).await {
            Ok(posts) => ActionResult::Success(GeneratedPosts { posts }),
            Err(e @ GenerationError::InvalidProfile(_)) => {
                error!("Error generating posts: {e}");
                ActionResult::failure(MISSING_FIELDS_MESSAGE)
            }
            Err(e) => {
                error!("Error generating posts: {e}");
                ActionResult::failure(GENERATION_FAILED_MESSAGE)
            }
        }
    }

    pub async fn optimize_hashtags(
        &self,
        post_copy: String,
        original_hashtags: Vec<String>,
    ) -> ActionResult<OptimizedHashtags> {
        let input = OptimizePostHashtagsInput {
            post_copy,
            original_hashtags,
        };
        match optimize_post_hashtags(self.model.as_ref(), &input).await {
            Ok(output) => ActionResult::Success(OptimizedHashtags {
                optimized_hashtags: output.optimized_hashtags,
            }),
            Err(e) => {
                error!("Error optimizing hashtags: {e}");
                ActionResult::failure(OPTIMIZATION_FAILED_MESSAGE)
            }
        }
    }
}
