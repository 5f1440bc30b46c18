use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::client::cache::{InvalidationPublisher, QueryKey};
use crate::models::{
    BrandDeal, BrandDealPatch, CreatorIdea, CreatorIdeaPatch, EditingTask, EditingTaskPatch, Event,
    FocusSession, Habit, NewBrandDeal, NewCreatorIdea, NewEditingTask, NewEvent, NewFocusSession,
    NewHabit, NewTask, Task, TaskPatch,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Blocking HTTP client for the glowplan API. Successful mutations publish
/// the touched resource on the invalidation bus so cached collections
/// refetch on the next pass.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    bus: InvalidationPublisher,
}

impl ApiClient {
    pub fn new(base_url: &str, bus: InvalidationPublisher) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bus,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Turn a non-2xx response into a ClientError, pulling the message out
    /// of the API's `{"error": ...}` body when present.
    fn check(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch the collection a query key describes.
    pub fn fetch<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Vec<T>, ClientError> {
        let mut url = self.url(key.resource);
        if let Some(query) = key.query_string() {
            url.push('?');
            url.push_str(&query);
        }
        let response = Self::check(self.http.get(&url).send()?)?;
        Ok(response.json::<Vec<T>>()?)
    }

    // ─── Tasks ───────────────────────────────────────────

    pub fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let response = Self::check(self.http.post(self.url("tasks")).json(task).send()?)?;
        let created = response.json()?;
        self.bus.publish("tasks");
        Ok(created)
    }

    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ClientError> {
        let url = format!("{}/{}", self.url("tasks"), id);
        let response = Self::check(self.http.patch(&url).json(patch).send()?)?;
        let updated = response.json()?;
        self.bus.publish("tasks");
        Ok(updated)
    }

    pub fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url("tasks"), id);
        Self::check(self.http.delete(&url).send()?)?;
        self.bus.publish("tasks");
        Ok(())
    }

    // ─── Events ──────────────────────────────────────────

    pub fn create_event(&self, event: &NewEvent) -> Result<Event, ClientError> {
        let response = Self::check(self.http.post(self.url("events")).json(event).send()?)?;
        let created = response.json()?;
        self.bus.publish("events");
        Ok(created)
    }

    pub fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url("events"), id);
        Self::check(self.http.delete(&url).send()?)?;
        self.bus.publish("events");
        Ok(())
    }

    // ─── Habits ──────────────────────────────────────────

    /// Upsert the habit row for (habitKey, date). The value on the wire is
    /// absolute; callers compute current + delta themselves.
    pub fn upsert_habit(&self, habit: &NewHabit) -> Result<Habit, ClientError> {
        let response = Self::check(self.http.post(self.url("habits")).json(habit).send()?)?;
        let row = response.json()?;
        self.bus.publish("habits");
        Ok(row)
    }

    // ─── Focus Sessions ─────────────────────────────────

    pub fn log_focus_session(
        &self,
        session: &NewFocusSession,
    ) -> Result<FocusSession, ClientError> {
        let response = Self::check(
            self.http
                .post(self.url("focus-sessions"))
                .json(session)
                .send()?,
        )?;
        let logged = response.json()?;
        self.bus.publish("focus-sessions");
        Ok(logged)
    }

    // ─── Creator Studio ─────────────────────────────────

    pub fn create_creator_idea(&self, idea: &NewCreatorIdea) -> Result<CreatorIdea, ClientError> {
        let response = Self::check(
            self.http
                .post(self.url("creator-ideas"))
                .json(idea)
                .send()?,
        )?;
        let created = response.json()?;
        self.bus.publish("creator-ideas");
        Ok(created)
    }

    pub fn update_creator_idea(
        &self,
        id: i64,
        patch: &CreatorIdeaPatch,
    ) -> Result<CreatorIdea, ClientError> {
        let url = format!("{}/{}", self.url("creator-ideas"), id);
        let response = Self::check(self.http.patch(&url).json(patch).send()?)?;
        let updated = response.json()?;
        self.bus.publish("creator-ideas");
        Ok(updated)
    }

    pub fn delete_creator_idea(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url("creator-ideas"), id);
        Self::check(self.http.delete(&url).send()?)?;
        self.bus.publish("creator-ideas");
        Ok(())
    }

    pub fn create_editing_task(&self, task: &NewEditingTask) -> Result<EditingTask, ClientError> {
        let response = Self::check(
            self.http
                .post(self.url("editing-tasks"))
                .json(task)
                .send()?,
        )?;
        let created = response.json()?;
        self.bus.publish("editing-tasks");
        Ok(created)
    }

    pub fn update_editing_task(
        &self,
        id: i64,
        patch: &EditingTaskPatch,
    ) -> Result<EditingTask, ClientError> {
        let url = format!("{}/{}", self.url("editing-tasks"), id);
        let response = Self::check(self.http.patch(&url).json(patch).send()?)?;
        let updated = response.json()?;
        self.bus.publish("editing-tasks");
        Ok(updated)
    }

    pub fn delete_editing_task(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url("editing-tasks"), id);
        Self::check(self.http.delete(&url).send()?)?;
        self.bus.publish("editing-tasks");
        Ok(())
    }

    pub fn create_brand_deal(&self, deal: &NewBrandDeal) -> Result<BrandDeal, ClientError> {
        let response = Self::check(self.http.post(self.url("brand-deals")).json(deal).send()?)?;
        let created = response.json()?;
        self.bus.publish("brand-deals");
        Ok(created)
    }

    pub fn update_brand_deal(
        &self,
        id: i64,
        patch: &BrandDealPatch,
    ) -> Result<BrandDeal, ClientError> {
        let url = format!("{}/{}", self.url("brand-deals"), id);
        let response = Self::check(self.http.patch(&url).json(patch).send()?)?;
        let updated = response.json()?;
        self.bus.publish("brand-deals");
        Ok(updated)
    }

    pub fn delete_brand_deal(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.url("brand-deals"), id);
        Self::check(self.http.delete(&url).send()?)?;
        self.bus.publish("brand-deals");
        Ok(())
    }
}
