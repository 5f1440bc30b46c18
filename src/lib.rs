pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod glow;
pub mod models;
pub mod tui;
pub mod utils;
pub mod validate;

pub use config::Config;
pub use database::Database;
pub use models::{
    BrandDeal, CreatorIdea, EditingTask, Event, FocusSession, Habit, Task,
};
pub use utils::Profile;
