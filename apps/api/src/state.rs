use std::sync::Arc;

use crate::config::Config;
use crate::generation::actions::PostActions;
use crate::session::controller::SessionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless action endpoints share the model and image resolver with the session.
    pub actions: PostActions,
    pub session: Arc<SessionController>,
    pub config: Config,
}
