use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{
    BrandDeal, BrandDealPatch, CreatorIdea, CreatorIdeaPatch, EditingTask, EditingTaskPatch, Event,
    EventPatch, FocusSession, Habit, NewBrandDeal, NewCreatorIdea, NewEditingTask, NewEvent,
    NewFocusSession, NewHabit, NewTask, Task, TaskPatch,
};
use crate::utils::current_timestamp_string;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                category        TEXT NOT NULL DEFAULT 'personal',
                priority        TEXT NOT NULL DEFAULT 'medium',
                done            INTEGER NOT NULL DEFAULT 0,
                list            TEXT NOT NULL DEFAULT 'daily',
                date            TEXT NOT NULL,
                order_index     INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                date            TEXT NOT NULL,
                time            TEXT NOT NULL,
                duration        TEXT,
                location        TEXT,
                type            TEXT NOT NULL DEFAULT 'class',
                color           TEXT NOT NULL DEFAULT '#F472B6',
                notes           TEXT
            )",
            [],
        )?;

        // The UNIQUE constraint is what makes the habit upsert safe under
        // concurrent writers: two racing upserts for the same (habit_key,
        // date) can never leave two rows behind.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS habits (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                habit_key       TEXT NOT NULL,
                value           INTEGER NOT NULL DEFAULT 0,
                target          INTEGER NOT NULL,
                date            TEXT NOT NULL,
                UNIQUE(habit_key, date)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS focus_sessions (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                duration        INTEGER NOT NULL,
                date            TEXT NOT NULL,
                completed_at    TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS creator_ideas (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                category        TEXT NOT NULL DEFAULT 'Lifestyle',
                hook            TEXT,
                caption         TEXT,
                audio_ref       TEXT,
                status          TEXT NOT NULL DEFAULT 'Idea',
                platform        TEXT NOT NULL DEFAULT 'TikTok'
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS editing_tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                status          TEXT NOT NULL DEFAULT 'To Edit',
                platform        TEXT NOT NULL DEFAULT 'TikTok',
                deadline        TEXT,
                notes           TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS brand_deals (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                contact_email   TEXT,
                platform        TEXT NOT NULL DEFAULT 'TikTok',
                status          TEXT NOT NULL DEFAULT 'Idea',
                deliverables    TEXT,
                deadline        TEXT,
                amount          TEXT,
                notes           TEXT
            )",
            [],
        )?;

        // Indexes for the filter queries
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_list ON tasks(list)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_habits_date ON habits(date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_focus_sessions_date ON focus_sessions(date)",
            [],
        )?;

        Ok(())
    }

    // ─── Tasks ───────────────────────────────────────────

    /// Helper function to map a row to a Task
    fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            category: row.get(2)?,
            priority: row.get(3)?,
            done: row.get::<_, i64>(4)? != 0,
            list: row.get(5)?,
            date: row.get(6)?,
            order_index: row.get(7)?,
        })
    }

    /// Insert a task and return the stored row
    pub fn insert_task(&self, task: &NewTask) -> Result<Task, DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (title, category, priority, done, list, date, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                task.title,
                task.category,
                task.priority,
                if task.done { 1 } else { 0 },
                task.list,
                task.date,
                task.order_index
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_task(id)?
            .ok_or(DatabaseError::SqliteError(
                rusqlite::Error::QueryReturnedNoRows,
            ))
    }

    /// Get all tasks, optionally filtered by list (daily or master)
    pub fn get_tasks(&self, list: Option<&str>) -> Result<Vec<Task>, DatabaseError> {
        if let Some(list) = list {
            let mut stmt = self.conn.prepare(
                "SELECT id, title, category, priority, done, list, date, order_index
                 FROM tasks WHERE list = ?1",
            )?;
            let tasks = stmt
                .query_map(rusqlite::params![list], Self::row_to_task)?
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(tasks);
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, priority, done, list, date, order_index FROM tasks",
        )?;
        let tasks = stmt
            .query_map([], Self::row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Get a single task by ID
    pub fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, priority, done, list, date, order_index
             FROM tasks WHERE id = ?1",
        )?;

        match stmt.query_row(rusqlite::params![id], Self::row_to_task) {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Apply a partial update to a task. Returns None if the id is absent.
    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Option<Task>, DatabaseError> {
        let Some(existing) = self.get_task(id)? else {
            return Ok(None);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE tasks SET title = ?1, category = ?2, priority = ?3,
             done = ?4, list = ?5, date = ?6, order_index = ?7 WHERE id = ?8",
            rusqlite::params![
                patch.title.clone().unwrap_or(existing.title),
                patch.category.clone().unwrap_or(existing.category),
                patch.priority.clone().unwrap_or(existing.priority),
                if patch.done.unwrap_or(existing.done) { 1 } else { 0 },
                patch.list.clone().unwrap_or(existing.list),
                patch.date.clone().unwrap_or(existing.date),
                patch.order_index.unwrap_or(existing.order_index),
                id
            ],
        )?;
        tx.commit()?;
        self.get_task(id)
    }

    /// Delete a task by ID. Deleting a missing id is a no-op.
    pub fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
    }

    // ─── Events ──────────────────────────────────────────

    /// Helper function to map a row to an Event
    fn row_to_event(row: &rusqlite::Row) -> Result<Event, rusqlite::Error> {
        Ok(Event {
            id: row.get(0)?,
            title: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            duration: row.get(4)?,
            location: row.get(5)?,
            kind: row.get(6)?,
            color: row.get(7)?,
            notes: row.get(8)?,
        })
    }

    /// Insert an event and return the stored row
    pub fn insert_event(&self, event: &NewEvent) -> Result<Event, DatabaseError> {
        self.conn.execute(
            "INSERT INTO events (title, date, time, duration, location, type, color, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                event.title,
                event.date,
                event.time,
                event.duration,
                event.location,
                event.kind,
                event.color,
                event.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_event(id)?
            .ok_or(DatabaseError::SqliteError(
                rusqlite::Error::QueryReturnedNoRows,
            ))
    }

    /// Get all events, optionally filtered by date
    pub fn get_events(&self, date: Option<&str>) -> Result<Vec<Event>, DatabaseError> {
        if let Some(date) = date {
            let mut stmt = self.conn.prepare(
                "SELECT id, title, date, time, duration, location, type, color, notes
                 FROM events WHERE date = ?1",
            )?;
            let events = stmt
                .query_map(rusqlite::params![date], Self::row_to_event)?
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(events);
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, title, date, time, duration, location, type, color, notes FROM events",
        )?;
        let events = stmt
            .query_map([], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get a single event by ID
    pub fn get_event(&self, id: i64) -> Result<Option<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, date, time, duration, location, type, color, notes
             FROM events WHERE id = ?1",
        )?;

        match stmt.query_row(rusqlite::params![id], Self::row_to_event) {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Apply a partial update to an event. Returns None if the id is absent.
    pub fn update_event(
        &self,
        id: i64,
        patch: &EventPatch,
    ) -> Result<Option<Event>, DatabaseError> {
        let Some(existing) = self.get_event(id)? else {
            return Ok(None);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE events SET title = ?1, date = ?2, time = ?3, duration = ?4,
             location = ?5, type = ?6, color = ?7, notes = ?8 WHERE id = ?9",
            rusqlite::params![
                patch.title.clone().unwrap_or(existing.title),
                patch.date.clone().unwrap_or(existing.date),
                patch.time.clone().unwrap_or(existing.time),
                patch.duration.clone().or(existing.duration),
                patch.location.clone().or(existing.location),
                patch.kind.clone().unwrap_or(existing.kind),
                patch.color.clone().unwrap_or(existing.color),
                patch.notes.clone().or(existing.notes),
                id
            ],
        )?;
        tx.commit()?;
        self.get_event(id)
    }

    /// Delete an event by ID. Deleting a missing id is a no-op.
    pub fn delete_event(&self, id: i64) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM events WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
    }

    // ─── Habits ──────────────────────────────────────────

    /// Helper function to map a row to a Habit
    fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
        Ok(Habit {
            id: row.get(0)?,
            habit_key: row.get(1)?,
            value: row.get(2)?,
            target: row.get(3)?,
            date: row.get(4)?,
        })
    }

    /// Get all habit rows for a date
    pub fn get_habits(&self, date: &str) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_key, value, target, date FROM habits WHERE date = ?1",
        )?;
        let habits = stmt
            .query_map(rusqlite::params![date], Self::row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(habits)
    }

    /// Insert-or-update the habit row for (habit_key, date) and return it.
    /// On conflict only `value` is replaced; target and date are immutable
    /// once set for that day. The write is atomic at the storage layer.
    pub fn upsert_habit(&self, habit: &NewHabit) -> Result<Habit, DatabaseError> {
        self.conn.execute(
            "INSERT INTO habits (habit_key, value, target, date)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(habit_key, date) DO UPDATE SET value = excluded.value",
            rusqlite::params![habit.habit_key, habit.value, habit.target, habit.date],
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT id, habit_key, value, target, date
             FROM habits WHERE habit_key = ?1 AND date = ?2",
        )?;
        stmt.query_row(
            rusqlite::params![habit.habit_key, habit.date],
            Self::row_to_habit,
        )
        .map_err(DatabaseError::from)
    }

    // ─── Focus Sessions ─────────────────────────────────

    /// Helper function to map a row to a FocusSession
    fn row_to_focus_session(row: &rusqlite::Row) -> Result<FocusSession, rusqlite::Error> {
        Ok(FocusSession {
            id: row.get(0)?,
            duration: row.get(1)?,
            date: row.get(2)?,
            completed_at: row.get(3)?,
        })
    }

    /// Append a focus session; completed_at is assigned here
    pub fn insert_focus_session(
        &self,
        session: &NewFocusSession,
    ) -> Result<FocusSession, DatabaseError> {
        self.conn.execute(
            "INSERT INTO focus_sessions (duration, date, completed_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![session.duration, session.date, current_timestamp_string()],
        )?;
        let id = self.conn.last_insert_rowid();

        let mut stmt = self.conn.prepare(
            "SELECT id, duration, date, completed_at FROM focus_sessions WHERE id = ?1",
        )?;
        stmt.query_row(rusqlite::params![id], Self::row_to_focus_session)
            .map_err(DatabaseError::from)
    }

    /// Get all focus sessions, optionally filtered by date
    pub fn get_focus_sessions(
        &self,
        date: Option<&str>,
    ) -> Result<Vec<FocusSession>, DatabaseError> {
        if let Some(date) = date {
            let mut stmt = self.conn.prepare(
                "SELECT id, duration, date, completed_at FROM focus_sessions WHERE date = ?1",
            )?;
            let sessions = stmt
                .query_map(rusqlite::params![date], Self::row_to_focus_session)?
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(sessions);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, duration, date, completed_at FROM focus_sessions")?;
        let sessions = stmt
            .query_map([], Self::row_to_focus_session)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    // ─── Creator Ideas ──────────────────────────────────

    /// Helper function to map a row to a CreatorIdea
    fn row_to_creator_idea(row: &rusqlite::Row) -> Result<CreatorIdea, rusqlite::Error> {
        Ok(CreatorIdea {
            id: row.get(0)?,
            title: row.get(1)?,
            category: row.get(2)?,
            hook: row.get(3)?,
            caption: row.get(4)?,
            audio_ref: row.get(5)?,
            status: row.get(6)?,
            platform: row.get(7)?,
        })
    }

    /// Insert a creator idea and return the stored row
    pub fn insert_creator_idea(&self, idea: &NewCreatorIdea) -> Result<CreatorIdea, DatabaseError> {
        self.conn.execute(
            "INSERT INTO creator_ideas (title, category, hook, caption, audio_ref, status, platform)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                idea.title,
                idea.category,
                idea.hook,
                idea.caption,
                idea.audio_ref,
                idea.status,
                idea.platform
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_creator_idea(id)?
            .ok_or(DatabaseError::SqliteError(
                rusqlite::Error::QueryReturnedNoRows,
            ))
    }

    /// Get all creator ideas
    pub fn get_creator_ideas(&self) -> Result<Vec<CreatorIdea>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, hook, caption, audio_ref, status, platform
             FROM creator_ideas",
        )?;
        let ideas = stmt
            .query_map([], Self::row_to_creator_idea)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ideas)
    }

    /// Get a single creator idea by ID
    pub fn get_creator_idea(&self, id: i64) -> Result<Option<CreatorIdea>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, hook, caption, audio_ref, status, platform
             FROM creator_ideas WHERE id = ?1",
        )?;

        match stmt.query_row(rusqlite::params![id], Self::row_to_creator_idea) {
            Ok(idea) => Ok(Some(idea)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Apply a partial update to a creator idea. Returns None if the id is absent.
    pub fn update_creator_idea(
        &self,
        id: i64,
        patch: &CreatorIdeaPatch,
    ) -> Result<Option<CreatorIdea>, DatabaseError> {
        let Some(existing) = self.get_creator_idea(id)? else {
            return Ok(None);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE creator_ideas SET title = ?1, category = ?2, hook = ?3, caption = ?4,
             audio_ref = ?5, status = ?6, platform = ?7 WHERE id = ?8",
            rusqlite::params![
                patch.title.clone().unwrap_or(existing.title),
                patch.category.clone().unwrap_or(existing.category),
                patch.hook.clone().or(existing.hook),
                patch.caption.clone().or(existing.caption),
                patch.audio_ref.clone().or(existing.audio_ref),
                patch.status.clone().unwrap_or(existing.status),
                patch.platform.clone().unwrap_or(existing.platform),
                id
            ],
        )?;
        tx.commit()?;
        self.get_creator_idea(id)
    }

    /// Delete a creator idea by ID. Deleting a missing id is a no-op.
    pub fn delete_creator_idea(&self, id: i64) -> Result<(), DatabaseError> {
        self.conn.execute(
            "DELETE FROM creator_ideas WHERE id = ?1",
            rusqlite::params![id],
        )?;
        Ok(())
    }

    // ─── Editing Tasks ──────────────────────────────────

    /// Helper function to map a row to an EditingTask
    fn row_to_editing_task(row: &rusqlite::Row) -> Result<EditingTask, rusqlite::Error> {
        Ok(EditingTask {
            id: row.get(0)?,
            title: row.get(1)?,
            status: row.get(2)?,
            platform: row.get(3)?,
            deadline: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    /// Insert an editing task and return the stored row
    pub fn insert_editing_task(
        &self,
        task: &NewEditingTask,
    ) -> Result<EditingTask, DatabaseError> {
        self.conn.execute(
            "INSERT INTO editing_tasks (title, status, platform, deadline, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![task.title, task.status, task.platform, task.deadline, task.notes],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_editing_task(id)?
            .ok_or(DatabaseError::SqliteError(
                rusqlite::Error::QueryReturnedNoRows,
            ))
    }

    /// Get all editing tasks
    pub fn get_editing_tasks(&self) -> Result<Vec<EditingTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, status, platform, deadline, notes FROM editing_tasks",
        )?;
        let tasks = stmt
            .query_map([], Self::row_to_editing_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Get a single editing task by ID
    pub fn get_editing_task(&self, id: i64) -> Result<Option<EditingTask>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, status, platform, deadline, notes
             FROM editing_tasks WHERE id = ?1",
        )?;

        match stmt.query_row(rusqlite::params![id], Self::row_to_editing_task) {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Apply a partial update to an editing task. Returns None if the id is absent.
    pub fn update_editing_task(
        &self,
        id: i64,
        patch: &EditingTaskPatch,
    ) -> Result<Option<EditingTask>, DatabaseError> {
        let Some(existing) = self.get_editing_task(id)? else {
            return Ok(None);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE editing_tasks SET title = ?1, status = ?2, platform = ?3,
             deadline = ?4, notes = ?5 WHERE id = ?6",
            rusqlite::params![
                patch.title.clone().unwrap_or(existing.title),
                patch.status.clone().unwrap_or(existing.status),
                patch.platform.clone().unwrap_or(existing.platform),
                patch.deadline.clone().or(existing.deadline),
                patch.notes.clone().or(existing.notes),
                id
            ],
        )?;
        tx.commit()?;
        self.get_editing_task(id)
    }

    /// Delete an editing task by ID. Deleting a missing id is a no-op.
    pub fn delete_editing_task(&self, id: i64) -> Result<(), DatabaseError> {
        self.conn.execute(
            "DELETE FROM editing_tasks WHERE id = ?1",
            rusqlite::params![id],
        )?;
        Ok(())
    }

    // ─── Brand Deals ────────────────────────────────────

    /// Helper function to map a row to a BrandDeal
    fn row_to_brand_deal(row: &rusqlite::Row) -> Result<BrandDeal, rusqlite::Error> {
        Ok(BrandDeal {
            id: row.get(0)?,
            name: row.get(1)?,
            contact_email: row.get(2)?,
            platform: row.get(3)?,
            status: row.get(4)?,
            deliverables: row.get(5)?,
            deadline: row.get(6)?,
            amount: row.get(7)?,
            notes: row.get(8)?,
        })
    }

    /// Insert a brand deal and return the stored row
    pub fn insert_brand_deal(&self, deal: &NewBrandDeal) -> Result<BrandDeal, DatabaseError> {
        self.conn.execute(
            "INSERT INTO brand_deals (name, contact_email, platform, status, deliverables, deadline, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                deal.name,
                deal.contact_email,
                deal.platform,
                deal.status,
                deal.deliverables,
                deal.deadline,
                deal.amount,
                deal.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_brand_deal(id)?
            .ok_or(DatabaseError::SqliteError(
                rusqlite::Error::QueryReturnedNoRows,
            ))
    }

    /// Get all brand deals
    pub fn get_brand_deals(&self) -> Result<Vec<BrandDeal>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, contact_email, platform, status, deliverables, deadline, amount, notes
             FROM brand_deals",
        )?;
        let deals = stmt
            .query_map([], Self::row_to_brand_deal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(deals)
    }

    /// Get a single brand deal by ID
    pub fn get_brand_deal(&self, id: i64) -> Result<Option<BrandDeal>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, contact_email, platform, status, deliverables, deadline, amount, notes
             FROM brand_deals WHERE id = ?1",
        )?;

        match stmt.query_row(rusqlite::params![id], Self::row_to_brand_deal) {
            Ok(deal) => Ok(Some(deal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Apply a partial update to a brand deal. Returns None if the id is absent.
    pub fn update_brand_deal(
        &self,
        id: i64,
        patch: &BrandDealPatch,
    ) -> Result<Option<BrandDeal>, DatabaseError> {
        let Some(existing) = self.get_brand_deal(id)? else {
            return Ok(None);
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE brand_deals SET name = ?1, contact_email = ?2, platform = ?3, status = ?4,
             deliverables = ?5, deadline = ?6, amount = ?7, notes = ?8 WHERE id = ?9",
            rusqlite::params![
                patch.name.clone().unwrap_or(existing.name),
                patch.contact_email.clone().or(existing.contact_email),
                patch.platform.clone().unwrap_or(existing.platform),
                patch.status.clone().unwrap_or(existing.status),
                patch.deliverables.clone().or(existing.deliverables),
                patch.deadline.clone().or(existing.deadline),
                patch.amount.clone().or(existing.amount),
                patch.notes.clone().or(existing.notes),
                id
            ],
        )?;
        tx.commit()?;
        self.get_brand_deal(id)
    }

    /// Delete a brand deal by ID. Deleting a missing id is a no-op.
    pub fn delete_brand_deal(&self, id: i64) -> Result<(), DatabaseError> {
        self.conn.execute(
            "DELETE FROM brand_deals WHERE id = ?1",
            rusqlite::params![id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewEvent, NewHabit, NewTask, TaskPatch};

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn task_crud_round_trip() {
        let db = db();
        let created = db.insert_task(&NewTask::new("Draft essay".to_string())).unwrap();
        assert_eq!(created.title, "Draft essay");
        assert!(!created.done);

        let fetched = db.get_task(created.id).unwrap().unwrap();
        assert_eq!(fetched.title, created.title);

        let updated = db
            .update_task(created.id, &TaskPatch::done(true))
            .unwrap()
            .unwrap();
        assert!(updated.done);
        // Untouched fields survive a partial update
        assert_eq!(updated.title, "Draft essay");
        assert_eq!(updated.priority, "medium");

        db.delete_task(created.id).unwrap();
        assert!(db.get_task(created.id).unwrap().is_none());
    }

    #[test]
    fn task_list_filter_is_exact() {
        let db = db();
        let mut master = NewTask::new("Read Atomic Habits".to_string());
        master.list = "master".to_string();
        db.insert_task(&NewTask::new("Groceries".to_string())).unwrap();
        db.insert_task(&NewTask::new("Flashcards".to_string())).unwrap();
        db.insert_task(&master).unwrap();

        let daily = db.get_tasks(Some("daily")).unwrap();
        assert_eq!(daily.len(), 2);
        assert!(daily.iter().all(|t| t.list == "daily"));

        let all = db.get_tasks(None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn update_of_missing_id_reports_none() {
        let db = db();
        assert!(db.update_task(404, &TaskPatch::done(true)).unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let db = db();
        let task = db.insert_task(&NewTask::new("x".to_string())).unwrap();
        db.delete_task(task.id).unwrap();
        // Second delete of the same id is indistinguishable from success
        db.delete_task(task.id).unwrap();
        db.delete_task(99999).unwrap();
    }

    #[test]
    fn habit_upsert_keeps_one_row_per_key_and_date() {
        let db = db();
        let first = db
            .upsert_habit(&NewHabit {
                habit_key: "water".to_string(),
                value: 3,
                target: 8,
                date: "2024-01-01".to_string(),
            })
            .unwrap();
        assert_eq!(first.value, 3);

        for value in [5, 6, 7] {
            db.upsert_habit(&NewHabit {
                habit_key: "water".to_string(),
                value,
                target: 8,
                date: "2024-01-01".to_string(),
            })
            .unwrap();
        }

        let rows = db.get_habits("2024-01-01").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 7);
        assert_eq!(rows[0].id, first.id);
    }

    #[test]
    fn habit_upsert_leaves_target_immutable() {
        let db = db();
        db.upsert_habit(&NewHabit {
            habit_key: "sleep".to_string(),
            value: 6,
            target: 8,
            date: "2024-01-01".to_string(),
        })
        .unwrap();

        let updated = db
            .upsert_habit(&NewHabit {
                habit_key: "sleep".to_string(),
                value: 7,
                target: 9,
                date: "2024-01-01".to_string(),
            })
            .unwrap();
        assert_eq!(updated.value, 7);
        assert_eq!(updated.target, 8);
    }

    #[test]
    fn habit_rows_are_separate_per_date() {
        let db = db();
        for date in ["2024-01-01", "2024-01-02"] {
            db.upsert_habit(&NewHabit {
                habit_key: "steps".to_string(),
                value: 5000,
                target: 10000,
                date: date.to_string(),
            })
            .unwrap();
        }
        assert_eq!(db.get_habits("2024-01-01").unwrap().len(), 1);
        assert_eq!(db.get_habits("2024-01-02").unwrap().len(), 1);
    }

    #[test]
    fn event_date_filter() {
        let db = db();
        db.insert_event(&NewEvent::new(
            "Biology 101".to_string(),
            "2024-05-01".to_string(),
            "10:00 AM".to_string(),
        ))
        .unwrap();
        db.insert_event(&NewEvent::new(
            "Study session".to_string(),
            "2024-05-02".to_string(),
            "01:30 PM".to_string(),
        ))
        .unwrap();

        let day_one = db.get_events(Some("2024-05-01")).unwrap();
        assert_eq!(day_one.len(), 1);
        assert_eq!(day_one[0].title, "Biology 101");
        assert_eq!(db.get_events(None).unwrap().len(), 2);
    }

    #[test]
    fn focus_session_gets_server_timestamp() {
        let db = db();
        let session = db
            .insert_focus_session(&crate::models::NewFocusSession::new(25))
            .unwrap();
        assert_eq!(session.duration, 25);
        assert!(!session.completed_at.is_empty());

        let for_date = db.get_focus_sessions(Some(&session.date)).unwrap();
        assert_eq!(for_date.len(), 1);
    }

    #[test]
    fn studio_entities_round_trip() {
        let db = db();

        let idea = db
            .insert_creator_idea(&crate::models::NewCreatorIdea::new(
                "Morning routine".to_string(),
            ))
            .unwrap();
        assert_eq!(idea.status, "Idea");
        let idea = db
            .update_creator_idea(
                idea.id,
                &crate::models::CreatorIdeaPatch::status("Filming".to_string()),
            )
            .unwrap()
            .unwrap();
        assert_eq!(idea.status, "Filming");
        assert_eq!(idea.category, "Lifestyle");

        let edit = db
            .insert_editing_task(&crate::models::NewEditingTask::new(
                "Morning routine vlog".to_string(),
            ))
            .unwrap();
        assert_eq!(edit.status, "To Edit");
        db.delete_editing_task(edit.id).unwrap();
        assert!(db.get_editing_tasks().unwrap().is_empty());

        let deal = db
            .insert_brand_deal(&crate::models::NewBrandDeal::new("Glow Recipe".to_string()))
            .unwrap();
        let deal = db
            .update_brand_deal(
                deal.id,
                &crate::models::BrandDealPatch::status("Negotiating".to_string()),
            )
            .unwrap()
            .unwrap();
        assert_eq!(deal.status, "Negotiating");
        assert!(db.update_brand_deal(999, &Default::default()).unwrap().is_none());
    }
}
