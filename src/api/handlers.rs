use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::models::{
    BrandDeal, BrandDealPatch, CreatorIdea, CreatorIdeaPatch, EditingTask, EditingTaskPatch, Event,
    EventPatch, FocusSession, Habit, Task, TaskPatch,
};
use crate::utils::current_date_string;
use crate::validate;

#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    pub list: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

// ─── Tasks ───────────────────────────────────────────

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.db()?.get_tasks(query.list.as_deref())?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let new_task = validate::new_task(&body)?;
    let task = state.db()?.insert_task(&new_task)?;
    tracing::debug!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, ApiError> {
    let patch: TaskPatch = validate::patch(&body)?;
    match state.db()?.update_task(id, &patch)? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound("Task")),
    }
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db()?.delete_task(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Events ──────────────────────────────────────────

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.db()?.get_events(query.date.as_deref())?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let new_event = validate::new_event(&body)?;
    let event = state.db()?.insert_event(&new_event)?;
    tracing::debug!(id = event.id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Event>, ApiError> {
    let patch: EventPatch = validate::patch(&body)?;
    match state.db()?.update_event(id, &patch)? {
        Some(event) => Ok(Json(event)),
        None => Err(ApiError::NotFound("Event")),
    }
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db()?.delete_event(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Habits ──────────────────────────────────────────

pub async fn list_habits(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let date = query.date.unwrap_or_else(current_date_string);
    let habits = state.db()?.get_habits(&date)?;
    Ok(Json(habits))
}

/// POST is an upsert keyed on (habitKey, date), so it answers 200 rather
/// than 201: re-posting the same key/date updates the single existing row.
pub async fn upsert_habit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Habit>, ApiError> {
    let new_habit = validate::new_habit(&body)?;
    let habit = state.db()?.upsert_habit(&new_habit)?;
    tracing::debug!(key = %habit.habit_key, date = %habit.date, value = habit.value, "habit upserted");
    Ok(Json(habit))
}

// ─── Focus Sessions ─────────────────────────────────

pub async fn list_focus_sessions(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<FocusSession>>, ApiError> {
    let sessions = state.db()?.get_focus_sessions(query.date.as_deref())?;
    Ok(Json(sessions))
}

pub async fn create_focus_session(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<FocusSession>), ApiError> {
    let new_session = validate::new_focus_session(&body)?;
    let session = state.db()?.insert_focus_session(&new_session)?;
    tracing::debug!(id = session.id, minutes = session.duration, "focus session logged");
    Ok((StatusCode::CREATED, Json(session)))
}

// ─── Creator Ideas ──────────────────────────────────

pub async fn list_creator_ideas(
    State(state): State<AppState>,
) -> Result<Json<Vec<CreatorIdea>>, ApiError> {
    let ideas = state.db()?.get_creator_ideas()?;
    Ok(Json(ideas))
}

pub async fn create_creator_idea(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatorIdea>), ApiError> {
    let new_idea = validate::new_creator_idea(&body)?;
    let idea = state.db()?.insert_creator_idea(&new_idea)?;
    tracing::debug!(id = idea.id, "creator idea created");
    Ok((StatusCode::CREATED, Json(idea)))
}

pub async fn update_creator_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<CreatorIdea>, ApiError> {
    let patch: CreatorIdeaPatch = validate::patch(&body)?;
    match state.db()?.update_creator_idea(id, &patch)? {
        Some(idea) => Ok(Json(idea)),
        None => Err(ApiError::NotFound("Idea")),
    }
}

pub async fn delete_creator_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db()?.delete_creator_idea(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Editing Tasks ──────────────────────────────────

pub async fn list_editing_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<EditingTask>>, ApiError> {
    let tasks = state.db()?.get_editing_tasks()?;
    Ok(Json(tasks))
}

pub async fn create_editing_task(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<EditingTask>), ApiError> {
    let new_task = validate::new_editing_task(&body)?;
    let task = state.db()?.insert_editing_task(&new_task)?;
    tracing::debug!(id = task.id, "editing task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_editing_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<EditingTask>, ApiError> {
    let patch: EditingTaskPatch = validate::patch(&body)?;
    match state.db()?.update_editing_task(id, &patch)? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound("Editing task")),
    }
}

pub async fn delete_editing_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db()?.delete_editing_task(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Brand Deals ────────────────────────────────────

pub async fn list_brand_deals(
    State(state): State<AppState>,
) -> Result<Json<Vec<BrandDeal>>, ApiError> {
    let deals = state.db()?.get_brand_deals()?;
    Ok(Json(deals))
}

pub async fn create_brand_deal(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<BrandDeal>), ApiError> {
    let new_deal = validate::new_brand_deal(&body)?;
    let deal = state.db()?.insert_brand_deal(&new_deal)?;
    tracing::debug!(id = deal.id, "brand deal created");
    Ok((StatusCode::CREATED, Json(deal)))
}

pub async fn update_brand_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<BrandDeal>, ApiError> {
    let patch: BrandDealPatch = validate::patch(&body)?;
    match state.db()?.update_brand_deal(id, &patch)? {
        Some(deal) => Ok(Json(deal)),
        None => Err(ApiError::NotFound("Brand deal")),
    }
}

pub async fn delete_brand_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db()?.delete_brand_deal(id)?;
    Ok(StatusCode::NO_CONTENT)
}
