// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::generation::hashtags::OptimizePostHashtagsInput;
use crate::llm_client::prompts::{HASHTAG_FORMAT_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::models::post::BusinessProfile;

/// System prompt for calendar generation. Append `JSON_ONLY_INSTRUCTION` before sending.
pub const POST_GENERATION_SYSTEM: &str = "You are an expert social media manager who plans \
    month-long content calendars for small and medium businesses.";

/// Calendar generation prompt template.
/// Replace: {company_name}, {industry}, {target_audience}, {goals}, {more_info_line},
///          {hashtag_format}
pub const POST_GENERATION_PROMPT_TEMPLATE: &str = r#"Your task is to generate a 30-day content calendar for a business.

Business Information:
- Company Name: {company_name}
- Industry: {industry}
- Target Audience: {target_audience}
- Goals/Products/Services: {goals}
{more_info_line}
Generate exactly 30 social media posts, one per day. Each post must include:
1. copy: engaging and relevant text for the post.
2. hashtags: 3-5 relevant hashtags. {hashtag_format}
3. imageDescription: a short description of a visually appealing photo that matches the post. It is used as a stock-photo search query, so keep it concrete (subjects, setting, mood).

Create a diverse range of content, including promotional posts, behind-the-scenes looks, user-generated content ideas, educational content, and engaging questions. Ensure the tone is appropriate for the target audience and any additional information provided.

Return a JSON object with this EXACT schema (no extra fields):
{
  "posts": [
    {
      "copy": "Rise and shine! Our sourdough comes out of the oven at 7am sharp.",
      "hashtags": ["sourdough", "FreshBaked", "LocalBakery"],
      "imageDescription": "golden sourdough loaves cooling on a wooden rack in morning light"
    }
  ]
}

HARD RULES:
1. The "posts" array MUST contain exactly 30 objects
2. Every post MUST have between 3 and 5 hashtags"#;

/// System prompt for hashtag optimization. Append `JSON_ONLY_INSTRUCTION` before sending.
pub const HASHTAG_OPTIMIZATION_SYSTEM: &str = "You are a social media expert who tunes \
    hashtags to increase reach and engagement.";

/// Hashtag optimization prompt template.
/// Replace: {post_copy}, {original_hashtags}, {hashtag_format}
pub const HASHTAG_OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"Given the following post copy and original hashtags, optimize the hashtags to increase reach and engagement.

Post Copy: {post_copy}
Original Hashtags: {original_hashtags}

{hashtag_format}

Return a JSON object with this EXACT schema (no extra fields):
{
  "optimizedHashtags": ["SmallBusiness", "ShopLocal", "FreshBaked"]
}

Provide only optimized hashtags."#;

/// Combines a role prompt with the JSON-only rule.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_INSTRUCTION}")
}

/// Fills the calendar template from a profile. The additional-info line is omitted
/// entirely when the profile carries none.
pub fn render_post_generation_prompt(profile: &BusinessProfile) -> String {
    let more_info_line = profile
        .extra_info()
        .map(|info| format!("- Additional Info: {info}\n"))
        .unwrap_or_default();

    POST_GENERATION_PROMPT_TEMPLATE
        .replace("{company_name}", profile.company_name.trim())
        .replace("{industry}", profile.industry.trim())
        .replace("{target_audience}", profile.target_audience.trim())
        .replace("{goals}", profile.goals.trim())
        .replace("{more_info_line}", &more_info_line)
        .replace("{hashtag_format}", HASHTAG_FORMAT_INSTRUCTION)
}

pub fn render_hashtag_optimization_prompt(input: &OptimizePostHashtagsInput) -> String {
    let original_hashtags = input
        .original_hashtags
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    HASHTAG_OPTIMIZATION_PROMPT_TEMPLATE
        .replace("{post_copy}", input.post_copy.trim())
        .replace("{original_hashtags}", &original_hashtags)
        .replace("{hashtag_format}", HASHTAG_FORMAT_INSTRUCTION)
}
