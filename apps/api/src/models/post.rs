use serde::{Deserialize, Serialize};

/// Number of posts in a content calendar (one per day).
pub const CALENDAR_DAYS: usize = 30;
/// Inclusive bounds on hashtags per generated post.
pub const MIN_HASHTAGS: usize = 3;
pub const MAX_HASHTAGS: usize = 5;

/// Business details the calendar is written for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub company_name: String,
    pub industry: String,
    pub target_audience: String,
    pub goals: String,
    /// Tone, style, or specific points to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

impl BusinessProfile {
    /// Wire names of required fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("companyName", &self.company_name),
            ("industry", &self.industry),
            ("targetAudience", &self.target_audience),
            ("goals", &self.goals),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// `more_info` when it carries any text.
    pub fn extra_info(&self) -> Option<&str> {
        self.more_info
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One day's post as drafted by the model, before image resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub copy: String,
    pub hashtags: Vec<String>,
    pub image_description: String,
}

/// A finished post as shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub copy: String,
    pub hashtags: Vec<String>,
    pub image_url: String,
}

/// Trims whitespace and leading '#' from each tag, dropping tags left empty.
pub fn normalize_hashtags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().trim_start_matches('#').trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Clipboard form: `#a #b #c`.
pub fn format_hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            company_name: "The Cozy Corner Bakery".to_string(),
            industry: "local bakery".to_string(),
            target_audience: "families".to_string(),
            goals: "promote sourdough".to_string(),
            more_info: None,
        }
    }

    #[test]
    fn test_complete_profile_has_no_missing_fields() {
        assert!(profile().missing_fields().is_empty());
    }

    #[test]
    fn test_whitespace_fields_count_as_missing() {
        let mut p = profile();
        p.industry = "   ".to_string();
        p.goals = String::new();
        assert_eq!(p.missing_fields(), vec!["industry", "goals"]);
    }

    #[test]
    fn test_more_info_is_optional_on_the_wire() {
        let json = r#"{
            "companyName": "Acme",
            "industry": "gym",
            "targetAudience": "students",
            "goals": "memberships"
        }"#;
        let p: BusinessProfile = serde_json::from_str(json).unwrap();
        assert!(p.more_info.is_none());
        assert_eq!(p.target_audience, "students");
    }

    #[test]
    fn test_blank_more_info_is_not_extra_info() {
        let mut p = profile();
        p.more_info = Some("  ".to_string());
        assert_eq!(p.extra_info(), None);
        p.more_info = Some(" witty tone ".to_string());
        assert_eq!(p.extra_info(), Some("witty tone"));
    }

    #[test]
    fn test_post_uses_camel_case_image_url() {
        let post = Post {
            copy: "Fresh bread today".to_string(),
            hashtags: vec!["bakery".to_string()],
            image_url: "https://picsum.photos/600/400?random=0".to_string(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["imageUrl"], "https://picsum.photos/600/400?random=0");
    }

    #[test]
    fn test_normalize_hashtags_strips_hash_and_blanks() {
        let tags = vec![
            "#bakery".to_string(),
            " ##Fresh ".to_string(),
            "#".to_string(),
            "local".to_string(),
        ];
        assert_eq!(normalize_hashtags(tags), vec!["bakery", "Fresh", "local"]);
    }

    #[test]
    fn test_format_hashtags_for_clipboard() {
        let tags = vec!["bakery".to_string(), "fresh".to_string()];
        assert_eq!(format_hashtags(&tags), "#bakery #fresh");
        assert_eq!(format_hashtags(&[]), "");
    }
}
