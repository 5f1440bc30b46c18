use serde::{Deserialize, Serialize};

use crate::utils::current_date_string;

/// Default accent color for calendar events (hex).
pub const DEFAULT_EVENT_COLOR: &str = "#F472B6";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub category: String, // personal, study, errands, ...
    pub priority: String, // high, medium, low
    pub done: bool,
    pub list: String, // daily, master
    pub date: String, // ISO 8601: YYYY-MM-DD
    pub order_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String, // ISO 8601: YYYY-MM-DD
    pub time: String, // display string, e.g. "10:00 AM"
    pub duration: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String, // hex, e.g. "#F472B6"
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub habit_key: String, // water, steps, sleep, skincare
    pub value: i64,
    pub target: i64,
    pub date: String, // ISO 8601: YYYY-MM-DD
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: i64,
    pub duration: i64, // minutes
    pub date: String,  // ISO 8601: YYYY-MM-DD
    pub completed_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorIdea {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub hook: Option<String>,
    pub caption: Option<String>,
    pub audio_ref: Option<String>,
    pub status: String, // Idea, Filming, Editing, Posted
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingTask {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub platform: String,
    pub deadline: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDeal {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
    pub platform: String,
    pub status: String,
    pub deliverables: Option<String>,
    pub deadline: Option<String>,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

// Insert-shaped payloads: the subset of fields a client may supply on
// creation. Server-assigned fields (id, completedAt) are absent by
// construction. Constructors fill the documented defaults.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub category: String,
    pub priority: String,
    pub done: bool,
    pub list: String,
    pub date: String,
    pub order_index: i64,
}

impl NewTask {
    pub fn new(title: String) -> Self {
        Self {
            title,
            category: "personal".to_string(),
            priority: "medium".to_string(),
            done: false,
            list: "daily".to_string(),
            date: current_date_string(),
            order_index: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub notes: Option<String>,
}

impl NewEvent {
    pub fn new(title: String, date: String, time: String) -> Self {
        Self {
            title,
            date,
            time,
            duration: None,
            location: None,
            kind: "class".to_string(),
            color: DEFAULT_EVENT_COLOR.to_string(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub habit_key: String,
    pub value: i64,
    pub target: i64,
    pub date: String,
}

impl NewHabit {
    pub fn new(habit_key: String, value: i64, target: i64) -> Self {
        Self {
            habit_key,
            value,
            target,
            date: current_date_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFocusSession {
    pub duration: i64,
    pub date: String,
}

impl NewFocusSession {
    pub fn new(duration: i64) -> Self {
        Self {
            duration,
            date: current_date_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreatorIdea {
    pub title: String,
    pub category: String,
    pub hook: Option<String>,
    pub caption: Option<String>,
    pub audio_ref: Option<String>,
    pub status: String,
    pub platform: String,
}

impl NewCreatorIdea {
    pub fn new(title: String) -> Self {
        Self {
            title,
            category: "Lifestyle".to_string(),
            hook: None,
            caption: None,
            audio_ref: None,
            status: "Idea".to_string(),
            platform: "TikTok".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEditingTask {
    pub title: String,
    pub status: String,
    pub platform: String,
    pub deadline: Option<String>,
    pub notes: Option<String>,
}

impl NewEditingTask {
    pub fn new(title: String) -> Self {
        Self {
            title,
            status: "To Edit".to_string(),
            platform: "TikTok".to_string(),
            deadline: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrandDeal {
    pub name: String,
    pub contact_email: Option<String>,
    pub platform: String,
    pub status: String,
    pub deliverables: Option<String>,
    pub deadline: Option<String>,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

impl NewBrandDeal {
    pub fn new(name: String) -> Self {
        Self {
            name,
            contact_email: None,
            platform: "TikTok".to_string(),
            status: "Idea".to_string(),
            deliverables: None,
            deadline: None,
            amount: None,
            notes: None,
        }
    }
}

// Partial-field PATCH payloads. Absent fields leave the stored value
// untouched; last write wins.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
}

impl TaskPatch {
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorIdeaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl CreatorIdeaPatch {
    pub fn status(status: String) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingTaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EditingTaskPatch {
    pub fn status(status: String) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BrandDealPatch {
    pub fn status(status: String) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
