//! # Config - shell settings
//!
//! Every setting comes from an environment variable and falls back to a
//! default when the variable is unset or does not parse.
//!
//! ```text
//! INI_PROFILE_PATH   profile file to open          (default: "profile.ini")
//! INI_CREATE         create the file if missing    (default: "true")
//! INI_GET_CAPACITY   capacity passed to GET/GETN   (default: 251)
//! INI_LOG            tracing filter for stderr     (default: "warn")
//! ```

use std::path::PathBuf;

pub const DEFAULT_PROFILE_PATH: &str = "profile.ini";
/// Longest value (250 characters) plus the terminator.
pub const DEFAULT_GET_CAPACITY: usize = 251;
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub profile_path: PathBuf,
    pub create_if_missing: bool,
    /// Never zero.
    pub get_capacity: usize,
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            create_if_missing: true,
            get_capacity: DEFAULT_GET_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ShellConfig {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let profile_path = env_or("INI_PROFILE_PATH", DEFAULT_PROFILE_PATH);
        let create_if_missing: bool = env_or("INI_CREATE", "true").trim().parse().unwrap_or(true);
        let get_capacity = env_or("INI_GET_CAPACITY", "251")
            .trim()
            .parse()
            .ok()
            .filter(|&c: &usize| c > 0)
            .unwrap_or(DEFAULT_GET_CAPACITY);
        let log_filter = env_or("INI_LOG", DEFAULT_LOG_FILTER);

        Self {
            profile_path: if profile_path.is_empty() {
                PathBuf::from(DEFAULT_PROFILE_PATH)
            } else {
                PathBuf::from(profile_path)
            },
            create_if_missing,
            get_capacity,
            log_filter,
        }
    }
}
