use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::glow;
use crate::models::{NewHabit, NewTask};
use crate::utils::{current_date_string, parse_date};
use crate::validate::ValidationError;

#[derive(Parser)]
#[command(name = "glowplan")]
#[command(about = "Lifestyle planner: tasks, calendar, habits, focus timer and creator studio")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen address override (defaults to the configured listen_addr)
        #[arg(long)]
        listen: Option<String>,
    },
    /// Launch the interactive TUI (requires a running server)
    Tui,
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Priority: high, medium or low
        #[arg(long)]
        priority: Option<String>,
        /// Target list: daily or master
        #[arg(long)]
        list: Option<String>,
        /// Category label
        #[arg(long)]
        category: Option<String>,
    },
    /// Record today's progress for a habit (absolute value, not a delta)
    LogHabit {
        /// Habit key, e.g. water, steps, sleep, skincare
        key: String,
        /// Absolute progress value
        value: i64,
        /// Daily target (defaults to the built-in target for known habits)
        #[arg(long)]
        target: Option<i64>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print today's glow score
    Glow,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid input: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    priority: Option<String>,
    list: Option<String>,
    category: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let mut task = NewTask::new(title);
    if let Some(priority) = priority {
        if !["high", "medium", "low"].contains(&priority.as_str()) {
            return Err(CliError::InvalidInput(format!(
                "priority must be high, medium or low (got '{}')",
                priority
            )));
        }
        task.priority = priority;
    }
    if let Some(list) = list {
        if !["daily", "master"].contains(&list.as_str()) {
            return Err(CliError::InvalidInput(format!(
                "list must be daily or master (got '{}')",
                list
            )));
        }
        task.list = list;
    }
    if let Some(category) = category {
        task.category = category;
    }

    let created = db.insert_task(&task)?;
    println!("Task created successfully (ID: {})", created.id);

    Ok(())
}

/// Handle the log-habit command. The stored value is absolute; clamp at zero
/// here on behalf of the caller.
pub fn handle_log_habit(
    key: String,
    value: i64,
    target: Option<i64>,
    date: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let target = match target.or_else(|| glow::habit_def(&key).map(|d| d.target)) {
        Some(t) if t > 0 => t,
        Some(t) => {
            return Err(CliError::InvalidInput(format!(
                "target must be greater than zero (got {})",
                t
            )));
        }
        None => {
            return Err(CliError::InvalidInput(format!(
                "unknown habit '{}'; pass --target to track it anyway",
                key
            )));
        }
    };

    if let Some(ref date) = date {
        parse_date(date)
            .map_err(|e| CliError::InvalidInput(format!("invalid date '{}': {}", date, e)))?;
    }

    let mut habit = NewHabit::new(key, value.max(0), target);
    if let Some(date) = date {
        habit.date = date;
    }

    let row = db.upsert_habit(&habit)?;
    println!(
        "{}: {}/{} on {}",
        row.habit_key, row.value, row.target, row.date
    );

    Ok(())
}

/// Handle the glow command: recompute today's score from the habit rows
pub fn handle_glow(db: &Database) -> Result<(), CliError> {
    let today = current_date_string();
    let rows = db.get_habits(&today)?;

    for def in glow::HABIT_DEFS.iter() {
        let value = glow::value_for(&rows, def.key);
        let target = rows
            .iter()
            .find(|h| h.habit_key == def.key)
            .map(|h| h.target)
            .unwrap_or(def.target);
        let mark = if glow::is_complete(value, target) {
            "x"
        } else {
            " "
        };
        println!("[{}] {:<16} {}/{} {}", mark, def.name, value, target, def.unit);
    }
    println!("Glow score: {}", glow::glow_score(&rows));

    Ok(())
}
