use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{
    DEFAULT_EVENT_COLOR, NewBrandDeal, NewCreatorIdea, NewEditingTask, NewEvent, NewFocusSession,
    NewHabit, NewTask,
};
use crate::utils::{current_date_string, parse_date};

/// A single field-level constraint violation.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Structured validation failure. Collects every violated constraint so the
/// caller sees all of them at once, not just the first.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Field accessor over a raw JSON object. Every accessor records violations
/// instead of failing fast; `finish` reports them all. Fields outside the
/// insertable shape (id, completedAt, typos) are ignored.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    fn new(body: &'a Value) -> Result<Self, ValidationError> {
        match body.as_object() {
            Some(obj) => Ok(Self {
                obj,
                errors: Vec::new(),
            }),
            None => Err(ValidationError::single("body", "expected a JSON object")),
        }
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    // Null is treated the same as absent throughout.
    fn raw(&self, name: &str) -> Option<&Value> {
        self.obj.get(name).filter(|v| !v.is_null())
    }

    fn req_str(&mut self, name: &str) -> Option<String> {
        match self.raw(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(name, "expected a string");
                None
            }
            None => {
                self.push(name, "is required");
                None
            }
        }
    }

    fn opt_str(&mut self, name: &str) -> Option<String> {
        match self.raw(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.push(name, "expected a string");
                None
            }
            None => None,
        }
    }

    fn str_or(&mut self, name: &str, default: &str) -> String {
        self.opt_str(name).unwrap_or_else(|| default.to_string())
    }

    fn one_of(&mut self, name: &str, default: &str, allowed: &[&str]) -> String {
        let value = self.str_or(name, default);
        if !allowed.contains(&value.as_str()) {
            self.push(name, format!("must be one of: {}", allowed.join(", ")));
        }
        value
    }

    fn bool_or(&mut self, name: &str, default: bool) -> bool {
        match self.raw(name) {
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.push(name, "expected a boolean");
                default
            }
            None => default,
        }
    }

    fn req_int(&mut self, name: &str) -> Option<i64> {
        match self.raw(name) {
            Some(v) => match v.as_i64() {
                Some(n) => Some(n),
                None => {
                    self.push(name, "expected an integer");
                    None
                }
            },
            None => {
                self.push(name, "is required");
                None
            }
        }
    }

    fn int_or(&mut self, name: &str, default: i64) -> i64 {
        match self.raw(name) {
            Some(v) => match v.as_i64() {
                Some(n) => n,
                None => {
                    self.push(name, "expected an integer");
                    default
                }
            },
            None => default,
        }
    }

    fn req_date(&mut self, name: &str) -> Option<String> {
        let value = self.req_str(name)?;
        if parse_date(&value).is_err() {
            self.push(name, "expected an ISO date (YYYY-MM-DD)");
            return None;
        }
        Some(value)
    }

    fn date_or_today(&mut self, name: &str) -> String {
        match self.opt_str(name) {
            Some(value) => {
                if parse_date(&value).is_err() {
                    self.push(name, "expected an ISO date (YYYY-MM-DD)");
                }
                value
            }
            None => current_date_string(),
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

pub fn new_task(body: &Value) -> Result<NewTask, ValidationError> {
    let mut f = Fields::new(body)?;
    let title = f.req_str("title");
    let category = f.str_or("category", "personal");
    let priority = f.one_of("priority", "medium", &["high", "medium", "low"]);
    let done = f.bool_or("done", false);
    let list = f.one_of("list", "daily", &["daily", "master"]);
    let date = f.date_or_today("date");
    let order_index = f.int_or("orderIndex", 0);
    f.finish()?;
    Ok(NewTask {
        title: title.unwrap_or_default(),
        category,
        priority,
        done,
        list,
        date,
        order_index,
    })
}

pub fn new_event(body: &Value) -> Result<NewEvent, ValidationError> {
    let mut f = Fields::new(body)?;
    let title = f.req_str("title");
    let date = f.req_date("date");
    let time = f.req_str("time");
    let duration = f.opt_str("duration");
    let location = f.opt_str("location");
    let kind = f.str_or("type", "class");
    let color = f.str_or("color", DEFAULT_EVENT_COLOR);
    let notes = f.opt_str("notes");
    f.finish()?;
    Ok(NewEvent {
        title: title.unwrap_or_default(),
        date: date.unwrap_or_default(),
        time: time.unwrap_or_default(),
        duration,
        location,
        kind,
        color,
        notes,
    })
}

pub fn new_habit(body: &Value) -> Result<NewHabit, ValidationError> {
    let mut f = Fields::new(body)?;
    let habit_key = f.req_str("habitKey");
    if let Some(ref key) = habit_key {
        if key.trim().is_empty() {
            f.push("habitKey", "must not be empty");
        }
    }
    let value = f.req_int("value");
    let target = f.req_int("target");
    if let Some(t) = target {
        if t <= 0 {
            f.push("target", "must be greater than zero");
        }
    }
    let date = f.date_or_today("date");
    f.finish()?;
    Ok(NewHabit {
        habit_key: habit_key.unwrap_or_default(),
        value: value.unwrap_or_default(),
        target: target.unwrap_or_default(),
        date,
    })
}

pub fn new_focus_session(body: &Value) -> Result<NewFocusSession, ValidationError> {
    let mut f = Fields::new(body)?;
    let duration = f.req_int("duration");
    let date = f.date_or_today("date");
    f.finish()?;
    Ok(NewFocusSession {
        duration: duration.unwrap_or_default(),
        date,
    })
}

pub fn new_creator_idea(body: &Value) -> Result<NewCreatorIdea, ValidationError> {
    let mut f = Fields::new(body)?;
    let title = f.req_str("title");
    let category = f.str_or("category", "Lifestyle");
    let hook = f.opt_str("hook");
    let caption = f.opt_str("caption");
    let audio_ref = f.opt_str("audioRef");
    let status = f.str_or("status", "Idea");
    let platform = f.str_or("platform", "TikTok");
    f.finish()?;
    Ok(NewCreatorIdea {
        title: title.unwrap_or_default(),
        category,
        hook,
        caption,
        audio_ref,
        status,
        platform,
    })
}

pub fn new_editing_task(body: &Value) -> Result<NewEditingTask, ValidationError> {
    let mut f = Fields::new(body)?;
    let title = f.req_str("title");
    let status = f.str_or("status", "To Edit");
    let platform = f.str_or("platform", "TikTok");
    let deadline = f.opt_str("deadline");
    let notes = f.opt_str("notes");
    f.finish()?;
    Ok(NewEditingTask {
        title: title.unwrap_or_default(),
        status,
        platform,
        deadline,
        notes,
    })
}

pub fn new_brand_deal(body: &Value) -> Result<NewBrandDeal, ValidationError> {
    let mut f = Fields::new(body)?;
    let name = f.req_str("name");
    let contact_email = f.opt_str("contactEmail");
    let platform = f.str_or("platform", "TikTok");
    let status = f.str_or("status", "Idea");
    let deliverables = f.opt_str("deliverables");
    let deadline = f.opt_str("deadline");
    let amount = f.opt_str("amount");
    let notes = f.opt_str("notes");
    f.finish()?;
    Ok(NewBrandDeal {
        name: name.unwrap_or_default(),
        contact_email,
        platform,
        status,
        deliverables,
        deadline,
        amount,
        notes,
    })
}

/// Validate a PATCH body against a partial-record shape. Unknown fields are
/// ignored; type mismatches are reported as a validation failure.
pub fn patch<T: DeserializeOwned>(body: &Value) -> Result<T, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError::single("body", "expected a JSON object"));
    }
    serde_json::from_value(body.clone())
        .map_err(|e| ValidationError::single("body", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPatch;
    use serde_json::json;

    #[test]
    fn task_defaults_applied() {
        let task = new_task(&json!({ "title": "Call mom" })).unwrap();
        assert_eq!(task.category, "personal");
        assert_eq!(task.priority, "medium");
        assert_eq!(task.list, "daily");
        assert!(!task.done);
        assert_eq!(task.order_index, 0);
        assert!(parse_date(&task.date).is_ok());
    }

    #[test]
    fn task_missing_title_rejected() {
        let err = new_task(&json!({ "priority": "high" })).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "title");
    }

    #[test]
    fn task_enum_membership_enforced() {
        let err = new_task(&json!({ "title": "x", "priority": "urgent" })).unwrap_err();
        assert_eq!(err.errors[0].field, "priority");

        let err = new_task(&json!({ "title": "x", "list": "someday" })).unwrap_err();
        assert_eq!(err.errors[0].field, "list");
    }

    #[test]
    fn task_collects_all_violations() {
        let err = new_task(&json!({ "done": "yes", "orderIndex": 1.5 })).unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"done"));
        assert!(fields.contains(&"orderIndex"));
    }

    #[test]
    fn server_assigned_fields_ignored() {
        // Clients sometimes echo a whole record back; id must not break create.
        let task = new_task(&json!({ "id": 99, "title": "x" })).unwrap();
        assert_eq!(task.title, "x");
    }

    #[test]
    fn non_object_body_rejected() {
        assert!(new_task(&json!([1, 2, 3])).is_err());
        assert!(new_task(&json!("title")).is_err());
    }

    #[test]
    fn event_requires_date_and_time() {
        let err = new_event(&json!({ "title": "Lecture" })).unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"date"));
        assert!(fields.contains(&"time"));

        let event = new_event(&json!({
            "title": "Lecture", "date": "2024-05-01", "time": "10:00 AM"
        }))
        .unwrap();
        assert_eq!(event.color, DEFAULT_EVENT_COLOR);
        assert_eq!(event.kind, "class");
    }

    #[test]
    fn event_rejects_malformed_date() {
        let err = new_event(&json!({
            "title": "Lecture", "date": "05/01/2024", "time": "10:00 AM"
        }))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "date");
    }

    #[test]
    fn habit_constraints() {
        assert!(
            new_habit(&json!({ "habitKey": "water", "value": 3, "target": 8, "date": "2024-01-01" }))
                .is_ok()
        );

        let err = new_habit(&json!({ "habitKey": "", "value": 3, "target": 8 })).unwrap_err();
        assert_eq!(err.errors[0].field, "habitKey");

        let err = new_habit(&json!({ "habitKey": "water", "value": 3, "target": 0 })).unwrap_err();
        assert_eq!(err.errors[0].field, "target");

        let err =
            new_habit(&json!({ "habitKey": "water", "value": "three", "target": 8 })).unwrap_err();
        assert_eq!(err.errors[0].field, "value");
    }

    #[test]
    fn habit_date_defaults_to_today() {
        let habit = new_habit(&json!({ "habitKey": "steps", "value": 100, "target": 10000 }))
            .unwrap();
        assert_eq!(habit.date, current_date_string());
    }

    #[test]
    fn patch_accepts_partial_and_rejects_bad_types() {
        let p: TaskPatch = patch(&json!({ "done": true })).unwrap();
        assert_eq!(p.done, Some(true));
        assert!(p.title.is_none());

        let err = patch::<TaskPatch>(&json!({ "done": "yes" })).unwrap_err();
        assert_eq!(err.errors[0].field, "body");

        assert!(patch::<TaskPatch>(&json!(42)).is_err());
    }
}
