//! Test doubles shared by the unit tests: canned model replies, scripted photo
//! search, an in-memory state store, and calendar fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::images::{placeholder_url, PhotoSearch, PhotoSearchError};
use crate::llm_client::{LanguageModel, LlmError};
use crate::models::post::{BusinessProfile, Post};
use crate::session::store::StateStore;

/// Replies are consumed in call order; once exhausted the last reply repeats.
pub struct StubModel {
    replies: Vec<Result<String, String>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl StubModel {
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(|r| Ok(r.into())).collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Every call fails with a 503.
    pub fn failing(message: &str) -> Self {
        Self {
            replies: vec![Err(message.to_string())],
            ..Self::replying(Vec::<String>::new())
        }
    }

    /// The first call waits for `gate` to be notified before replying.
    pub fn gate_first_call(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if call == 0 {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }

        let reply = self
            .replies
            .get(call)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_else(|| Err("no stub reply configured".to_string()));

        reply.map_err(|message| LlmError::Api {
            status: 503,
            message,
        })
    }
}

#[derive(Default)]
pub struct StubPhotoSearch {
    hits: HashMap<String, String>,
    failures: HashSet<String>,
    calls: AtomicUsize,
}

impl StubPhotoSearch {
    /// Every query returns no results until scripted otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(mut self, query: &str, url: &str) -> Self {
        self.hits.insert(query.to_string(), url.to_string());
        self
    }

    pub fn fail(mut self, query: &str) -> Self {
        self.failures.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoSearch for StubPhotoSearch {
    async fn first_large_url(&self, query: &str) -> Result<Option<String>, PhotoSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(query) {
            return Err(PhotoSearchError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(self.hits.get(query).cloned())
    }
}

/// In-memory `StateStore`. `failing()` errors on every load and save.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<String>>,
    fail: bool,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_record(record: String) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            record: Mutex::new(None),
            fail: true,
        }
    }

    pub fn record(&self) -> Option<String> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<String>> {
        if self.fail {
            return Err(anyhow!("storage unavailable"));
        }
        Ok(self.record())
    }

    async fn save(&self, record: &str) -> Result<()> {
        if self.fail {
            return Err(anyhow!("quota exceeded"));
        }
        *self.record.lock().unwrap() = Some(record.to_string());
        Ok(())
    }
}

pub fn sample_profile() -> BusinessProfile {
    BusinessProfile {
        company_name: "The Cozy Corner Bakery".to_string(),
        industry: "local bakery".to_string(),
        target_audience: "young professionals and families".to_string(),
        goals: "promote new sourdough bread and coffee drinks".to_string(),
        more_info: Some("witty and humorous tone".to_string()),
    }
}

/// Draft for `day` (1-based): three hashtags, description "photo for day N".
pub fn draft_json(day: usize) -> Value {
    json!({
        "copy": format!("Day {day}: fresh from the oven"),
        "hashtags": ["bakery", format!("day{day}"), "fresh"],
        "imageDescription": format!("photo for day {day}"),
    })
}

/// Model reply carrying `count` drafts.
pub fn calendar_json(count: usize) -> String {
    let posts: Vec<Value> = (1..=count).map(draft_json).collect();
    json!({ "posts": posts }).to_string()
}

/// Finished posts matching `draft_json`, with placeholder images.
pub fn sample_posts(count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| Post {
            copy: format!("Day {}: fresh from the oven", i + 1),
            hashtags: vec![
                "bakery".to_string(),
                format!("day{}", i + 1),
                "fresh".to_string(),
            ],
            image_url: placeholder_url(i),
        })
        .collect()
}
