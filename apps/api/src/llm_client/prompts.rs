// Shared prompt fragments.
// Each flow that calls the model defines its own prompts alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Hashtag formatting rule shared by both prompts.
pub const HASHTAG_FORMAT_INSTRUCTION: &str = "Write each hashtag as a single word or \
    CamelCase phrase without the leading '#' and without spaces.";
