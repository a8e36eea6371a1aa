use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for MoodGarden
/// If profile is Dev, uses "moodgarden-dev" instead of "moodgarden"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "moodgarden-dev",
        Profile::Prod => "moodgarden",
    };
    // Use "com" as qualifier for better cross-platform compatibility
    ProjectDirs::from("com", "moodgarden", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for MoodGarden
/// If profile is Dev, uses "moodgarden-dev" instead of "moodgarden"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "moodgarden-dev",
        Profile::Prod => "moodgarden",
    };
    ProjectDirs::from("com", "moodgarden", app_name)
        .map(|dirs| dirs.data_dir().to_path_buf())
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

/// Get the current local date as an ISO 8601 string (YYYY-MM-DD)
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Get the current local date
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Sanitize a companion name into a storage key fragment.
/// Lowercases and collapses each run of non-alphanumeric characters into a
/// single underscore, so "Mr. Fluffy!" becomes "mr_fluffy_".
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out
}

/// Validate an HH:MM time-of-day string (used for bedtime, wake time and meal times)
pub fn is_valid_time(time_str: &str) -> bool {
    chrono::NaiveTime::parse_from_str(time_str, "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_collapses_punctuation() {
        assert_eq!(sanitize_name("Mr. Fluffy!"), "mr_fluffy_");
        assert_eq!(sanitize_name("Tom"), "tom");
        assert_eq!(sanitize_name("  spaced  out  "), "_spaced_out_");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2024-01-31").is_ok());
        assert!(parse_date("31/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn time_validation() {
        assert!(is_valid_time("22:00"));
        assert!(is_valid_time("07:30"));
        assert!(!is_valid_time("25:00"));
        assert!(!is_valid_time("bedtime"));
    }
}
