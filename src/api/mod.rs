pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::{get, patch};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::database::Database;
use error::ApiError;

pub use error::ApiError as Error;

/// Shared handler state. Requests hold no state of their own; everything
/// lives in the store, which a request locks only for the span of one call.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    pub(crate) fn db(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".to_string()))
    }
}

/// Build the full API router: one resource family per entity.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/:id",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route(
            "/api/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route(
            "/api/events/:id",
            patch(handlers::update_event).delete(handlers::delete_event),
        )
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::upsert_habit),
        )
        .route(
            "/api/focus-sessions",
            get(handlers::list_focus_sessions).post(handlers::create_focus_session),
        )
        .route(
            "/api/creator-ideas",
            get(handlers::list_creator_ideas).post(handlers::create_creator_idea),
        )
        .route(
            "/api/creator-ideas/:id",
            patch(handlers::update_creator_idea).delete(handlers::delete_creator_idea),
        )
        .route(
            "/api/editing-tasks",
            get(handlers::list_editing_tasks).post(handlers::create_editing_task),
        )
        .route(
            "/api/editing-tasks/:id",
            patch(handlers::update_editing_task).delete(handlers::delete_editing_task),
        )
        .route(
            "/api/brand-deals",
            get(handlers::list_brand_deals).post(handlers::create_brand_deal),
        )
        .route(
            "/api/brand-deals/:id",
            patch(handlers::update_brand_deal).delete(handlers::delete_brand_deal),
        )
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind and run the API server until the process is stopped.
pub async fn serve(addr: &str, db: Database) -> Result<(), ServeError> {
    let state = AppState::new(db);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!(%addr, "glowplan API listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
