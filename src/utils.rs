use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for glowplan
/// If profile is Dev, uses "glowplan-dev" instead of "glowplan"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "glowplan-dev",
        Profile::Prod => "glowplan",
    };
    ProjectDirs::from("com", "glowplan", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for glowplan
/// If profile is Dev, uses "glowplan-dev" instead of "glowplan"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "glowplan-dev",
        Profile::Prod => "glowplan",
    };
    ProjectDirs::from("com", "glowplan", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Get the current date as an ISO 8601 string (YYYY-MM-DD)
pub fn current_date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Get the current timestamp as "YYYY-MM-DD HH:MM:SS"
pub fn current_timestamp_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shift an ISO date string by a number of days. Returns the input unchanged
/// if it does not parse.
pub fn shift_date(date_str: &str, days: i64) -> String {
    match parse_date(date_str) {
        Ok(date) => (date + chrono::Duration::days(days))
            .format("%Y-%m-%d")
            .to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Format an ISO date string as a friendly header, e.g. "Friday, Aug 7".
/// Falls back to the raw string if it does not parse.
pub fn friendly_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Ok(date) => date.format("%A, %b %-d").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: crossterm::event::KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
            || modifiers.contains(crossterm::event::KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(crossterm::event::KeyModifiers::CONTROL)
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports single keys ("q", "n"), special keys ("Enter", "Space", "Left")
/// and the Ctrl modifier ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    use crossterm::event::KeyCode;
    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "F1" => Ok(KeyCode::F(1)),
        "F2" => Ok(KeyCode::F(2)),
        _ => {
            if key_str.chars().count() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(KeyCode::Char(c)),
                    None => Err("empty key string".to_string()),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("01/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn shifts_dates_across_month_boundaries() {
        assert_eq!(shift_date("2024-01-31", 1), "2024-02-01");
        assert_eq!(shift_date("2024-03-01", -1), "2024-02-29");
        assert_eq!(shift_date("not-a-date", 1), "not-a-date");
    }

    #[test]
    fn parses_key_bindings() {
        let plain = parse_key_binding("q").unwrap();
        assert!(!plain.requires_ctrl);
        let ctrl = parse_key_binding("Ctrl+s").unwrap();
        assert!(ctrl.requires_ctrl);
        assert!(parse_key_binding("NotAKey").is_err());
    }
}
