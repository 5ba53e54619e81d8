use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::post::{BusinessProfile, Post};

/// Key the session record is stored under.
pub const STATE_KEY: &str = "postCraftAIState";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record is missing '{0}'")]
    MissingKey(&'static str),
}

/// Everything the UI shows: the profile form fields plus the current calendar.
/// Persisted whole after every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub company_name: String,
    pub industry: String,
    pub target_audience: String,
    pub goals: String,
    pub more_info: String,
    pub posts: Vec<Post>,
    /// Identifies the calendar in `posts`; set on each successful generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Partial update of the profile form. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub target_audience: Option<String>,
    pub goals: Option<String>,
    pub more_info: Option<String>,
}

impl SessionState {
    pub fn profile(&self) -> BusinessProfile {
        BusinessProfile {
            company_name: self.company_name.clone(),
            industry: self.industry.clone(),
            target_audience: self.target_audience.clone(),
            goals: self.goals.clone(),
            more_info: Some(self.more_info.clone()).filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn apply(&mut self, patch: ProfilePatch) {
        let ProfilePatch {
            company_name,
            industry,
            target_audience,
            goals,
            more_info,
        } = patch;
        for (field, value) in [
            (&mut self.company_name, company_name),
            (&mut self.industry, industry),
            (&mut self.target_audience, target_audience),
            (&mut self.goals, goals),
            (&mut self.more_info, more_info),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    pub fn clear_posts(&mut self) {
        self.posts.clear();
        self.calendar_id = None;
        self.generated_at = None;
    }

    /// Parses a stored record. A record must be an object carrying at least
    /// `industry` and `posts`; other missing keys take their defaults.
    pub fn from_record(record: &str) -> Result<Self, RecordError> {
        let value: serde_json::Value = serde_json::from_str(record)?;
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        for key in ["industry", "posts"] {
            if !object.contains_key(key) {
                return Err(RecordError::MissingKey(key));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
