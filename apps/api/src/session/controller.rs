//! Owns the profile form and the calendar the user is looking at.
//!
//! Every change replaces the whole `SessionState` and writes it to the `StateStore`
//! before the lock is released. The lock is never held across a model call.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::actions::{
    ActionResult, GeneratedPosts, OptimizedHashtags, PostActions, MISSING_FIELDS_MESSAGE,
};
use crate::models::post::format_hashtags;
use crate::session::state::{ProfilePatch, SessionState};
use crate::session::store::StateStore;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: NotificationVariant,
}

impl Notification {
    fn info(title: &str, description: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            description: description.map(str::to_string),
            variant: NotificationVariant::Default,
        }
    }

    fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some(description.to_string()),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Current state plus whatever the last operation wants to tell the user.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Caption,
    Hashtags,
}

impl FromStr for CopyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caption" => Ok(CopyKind::Caption),
            "hashtags" => Ok(CopyKind::Hashtags),
            other => Err(AppError::Validation(format!(
                "unknown copy kind '{other}', expected 'caption' or 'hashtags'"
            ))),
        }
    }
}

/// Text destined for the clipboard.
#[derive(Debug, Clone, Serialize)]
pub struct CopyView {
    pub text: String,
    pub notification: Notification,
}

/// A downloaded card image, ready to hand back as an attachment.
#[derive(Debug, Clone)]
pub struct ImageDownload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Resets the in-flight flag even if the request future is dropped mid-generation.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct SessionController {
    state: Mutex<SessionState>,
    store: Arc<dyn StateStore>,
    actions: PostActions,
    http: reqwest::Client,
    generating: AtomicBool,
}

impl SessionController {
    /// Restores the saved session. Anything unusable in the store yields an empty session.
    pub async fn load(store: Arc<dyn StateStore>, actions: PostActions) -> anyhow::Result<Self> {
        let state = match store.load().await {
            Ok(Some(record)) => match SessionState::from_record(&record) {
                Ok(state) => {
                    info!("Restored session with {} posts", state.posts.len());
                    state
                }
                Err(e) => {
                    warn!("Ignoring saved session state: {e}");
                    SessionState::default()
                }
            },
            Ok(None) => SessionState::default(),
            Err(e) => {
                error!("Failed to load session state: {e:?}");
                SessionState::default()
            }
        };

        Ok(Self {
            state: Mutex::new(state),
            store,
            actions,
            http: reqwest::Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?,
            generating: AtomicBool::new(false),
        })
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> SessionView {
        SessionView {
            state: self.snapshot().await,
            notification: None,
        }
    }

    pub async fn update_profile(&self, patch: ProfilePatch) -> SessionView {
        let state = self.replace(|s| s.apply(patch)).await;
        SessionView {
            state,
            notification: None,
        }
    }

    /// Validates the profile, clears the old calendar, and generates a new one.
    pub async fn submit(&self) -> SessionView {
        let profile = self.snapshot().await.profile();
        if !profile.missing_fields().is_empty() {
            return self
                .notify(Notification::destructive("Missing Fields", MISSING_FIELDS_MESSAGE))
                .await;
        }

        if self.generating.swap(true, Ordering::SeqCst) {
            return self
                .notify(Notification::destructive(
                    "Generation In Progress",
                    "Posts are already being generated. Please wait for them to finish.",
                ))
                .await;
        }
        let _in_flight = InFlight(&self.generating);

        self.replace(SessionState::clear_posts).await;

        match self.actions.generate_posts(&profile).await {
            ActionResult::Success(GeneratedPosts { posts }) => {
                let state = self
                    .replace(|s| {
                        s.posts = posts;
                        s.calendar_id = Some(Uuid::new_v4());
                        s.generated_at = Some(Utc::now());
                    })
                    .await;
                SessionView {
                    state,
                    notification: None,
                }
            }
            ActionResult::Failure { error } => {
                self.notify(Notification::destructive("Error Generating Posts", &error))
                    .await
            }
        }
    }

    /// Re-optimizes one card's hashtags. Other cards are untouched.
    pub async fn optimize_post(&self, index: usize) -> Result<SessionView, AppError> {
        let (copy, hashtags, calendar_id) = {
            let state = self.state.lock().await;
            let post = post_at(&state, index)?;
            (post.copy.clone(), post.hashtags.clone(), state.calendar_id)
        };

        match self.actions.optimize_hashtags(copy, hashtags).await {
            ActionResult::Success(OptimizedHashtags { optimized_hashtags }) => {
                let mut applied = false;
                let state = self
                    .replace(|s| {
                        if s.calendar_id != calendar_id {
                            return;
                        }
                        if let Some(post) = s.posts.get_mut(index) {
                            post.hashtags = optimized_hashtags;
                            applied = true;
                        }
                    })
                    .await;

                let notification = if applied {
                    Notification::info(
                        "Hashtags Optimized!",
                        Some("Your post's hashtags have been updated with AI-powered suggestions."),
                    )
                } else {
                    warn!("Calendar changed while optimizing post {index}; discarding result");
                    Notification::destructive(
                        "Calendar Changed",
                        "The calendar was regenerated before optimization finished. Please try again.",
                    )
                };
                Ok(SessionView {
                    state,
                    notification: Some(notification),
                })
            }
            ActionResult::Failure { error } => Ok(self
                .notify(Notification::destructive("Optimization Failed", &error))
                .await),
        }
    }

    pub async fn copy_text(&self, index: usize, kind: CopyKind) -> Result<CopyView, AppError> {
        let state = self.state.lock().await;
        let post = post_at(&state, index)?;
        let (text, title) = match kind {
            CopyKind::Caption => (post.copy.clone(), "Copied caption!"),
            CopyKind::Hashtags => (format_hashtags(&post.hashtags), "Copied hashtags!"),
        };
        Ok(CopyView {
            text,
            notification: Notification::info(title, None),
        })
    }

    pub async fn download_image(&self, index: usize) -> Result<ImageDownload, AppError> {
        let image_url = {
            let state = self.state.lock().await;
            post_at(&state, index)?.image_url.clone()
        };

        let response = self
            .http
            .get(&image_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::ImageDownload(format!("{image_url}: {e}")))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ImageDownload(format!("{image_url}: {e}")))?;

        Ok(ImageDownload {
            filename: format!("postcraft-image-{}.png", index + 1),
            content_type,
            bytes,
        })
    }

    /// Applies `change` to a copy of the state, swaps it in, and persists it.
    async fn replace(&self, change: impl FnOnce(&mut SessionState)) -> SessionState {
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        change(&mut next);
        *guard = next.clone();
        self.persist(&next).await;
        next
    }

    async fn persist(&self, state: &SessionState) {
        let result = match state.to_record() {
            Ok(record) => self.store.save(&record).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            error!("Failed to save session state: {e:?}");
        }
    }

    async fn notify(&self, notification: Notification) -> SessionView {
        SessionView {
            state: self.snapshot().await,
            notification: Some(notification),
        }
    }
}

fn post_at(state: &SessionState, index: usize) -> Result<&crate::models::post::Post, AppError> {
    state.posts.get(index).ok_or_else(|| {
        AppError::NotFound(format!(
            "Post {index} not found ({} posts in calendar)",
            state.posts.len()
        ))
    })
}
