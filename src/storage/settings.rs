//! Settings resolution
//!
//! Settings come from a fixed cascade of `todo.cfg` files, overridden by the
//! process environment, then `$HOME` and `$TODO_DIR` references are expanded
//! textually in every value.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use super::envfile::{self, EnvFileError};

/// Location of the system-wide configuration file
pub const SYSTEM_CONFIG: &str = "/etc/todo/config";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read the current working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] EnvFileError),

    #[error("Unknown setting: {0}")]
    UnknownKey(String),
}

/// A recognized setting name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    TodoDir,
    TodoFile,
    DoneFile,
    ReportFile,
    ActionsDir,
    SortCommand,
    FinalFilter,
    DateOnAdd,
    Force,
    Verbose,
}

impl SettingKey {
    /// All keys, in display order
    pub const ALL: [SettingKey; 10] = [
        SettingKey::TodoDir,
        SettingKey::TodoFile,
        SettingKey::DoneFile,
        SettingKey::ReportFile,
        SettingKey::ActionsDir,
        SettingKey::SortCommand,
        SettingKey::FinalFilter,
        SettingKey::DateOnAdd,
        SettingKey::Force,
        SettingKey::Verbose,
    ];

    /// The environment variable name
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::TodoDir => "TODO_DIR",
            SettingKey::TodoFile => "TODO_FILE",
            SettingKey::DoneFile => "DONE_FILE",
            SettingKey::ReportFile => "REPORT_FILE",
            SettingKey::ActionsDir => "TODO_ACTIONS_DIR",
            SettingKey::SortCommand => "TODOTXT_SORT_COMMAND",
            SettingKey::FinalFilter => "TODOTXT_FINAL_FILTER",
            SettingKey::DateOnAdd => "TODOTXT_DATE_ON_ADD",
            SettingKey::Force => "TODOTXT_FORCE",
            SettingKey::Verbose => "TODOTXT_VERBOSE",
        }
    }

    /// Value used when neither a config file nor the environment sets it
    pub fn default_value(&self) -> &'static str {
        match self {
            SettingKey::DateOnAdd | SettingKey::Force | SettingKey::Verbose => "0",
            _ => "",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

/// Everything the resolver reads from the outside world
#[derive(Debug, Clone)]
pub struct Environment {
    /// Home directory, `None` when `HOME` is unset or empty
    pub home: Option<PathBuf>,

    /// Working directory, used for `./todo.cfg`
    pub cwd: PathBuf,

    /// Snapshot of the process environment
    pub vars: HashMap<String, String>,

    /// System-wide configuration file
    pub system_config: PathBuf,
}

impl Environment {
    /// Captures the current process environment
    pub fn from_process() -> Result<Self, SettingsError> {
        let cwd = std::env::current_dir().map_err(SettingsError::WorkingDir)?;
        // Non-UTF-8 variables can't name or hold a setting
        let vars: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        Ok(Self::new(cwd, vars))
    }

    /// Builds an environment from explicit values; `HOME` is taken from `vars`
    pub fn new(cwd: impl Into<PathBuf>, vars: HashMap<String, String>) -> Self {
        let home = vars
            .get("HOME")
            .map(|h| clean_home(h))
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);

        Self {
            home,
            cwd: cwd.into(),
            vars,
            system_config: PathBuf::from(SYSTEM_CONFIG),
        }
    }

    /// Overrides the system-wide configuration path
    pub fn with_system_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_config = path.into();
        self
    }

    /// Candidate configuration files, lowest precedence first
    pub fn config_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(4);
        if let Some(home) = &self.home {
            candidates.push(home.join("todo.cfg"));
            candidates.push(home.join(".todo.cfg"));
        }
        candidates.push(self.cwd.join("todo.cfg"));
        candidates.push(self.system_config.clone());
        candidates
    }
}

fn clean_home(home: &str) -> String {
    let trimmed = home.trim_end_matches('/');
    if trimmed.is_empty() && home.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolved, read-only settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<SettingKey, String>,
    loaded_from: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: SettingKey::ALL
                .iter()
                .map(|key| (*key, key.default_value().to_string()))
                .collect(),
            loaded_from: Vec::new(),
        }
    }
}

impl Settings {
    /// Resolves settings from configuration files and the environment
    pub fn resolve(env: &Environment) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        let mut from_files: HashMap<String, String> = HashMap::new();

        for path in env.config_candidates() {
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "config file not found, skipping");
                continue;
            }

            let assignments = envfile::load(&path)?;
            tracing::debug!(
                path = %path.display(),
                count = assignments.len(),
                "loaded config file"
            );

            for assignment in assignments {
                from_files.insert(assignment.key, assignment.value);
            }
            settings.loaded_from.push(path);
        }

        for key in SettingKey::ALL {
            let value = env
                .vars
                .get(key.name())
                .or_else(|| from_files.get(key.name()));

            if let Some(value) = value {
                settings.values.insert(key, value.clone());
            }
        }

        let home = env
            .home
            .as_deref()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default();
        settings.expand("HOME", &home);

        let todo_dir = settings.get_key(SettingKey::TodoDir).to_string();
        settings.expand("TODO_DIR", &todo_dir);

        for key in SettingKey::ALL {
            tracing::debug!(key = key.name(), value = settings.get_key(key), "resolved setting");
        }

        Ok(settings)
    }

    /// Replaces `$name` and `${name}` in every value
    fn expand(&mut self, name: &str, replacement: &str) {
        let bare = format!("${}", name);
        let braced = format!("${{{}}}", name);

        for value in self.values.values_mut() {
            if value.contains('$') {
                *value = value.replace(&bare, replacement).replace(&braced, replacement);
            }
        }
    }

    /// Looks up a setting by name; `None` for unknown names
    pub fn get(&self, name: &str) -> Option<&str> {
        name.parse::<SettingKey>().ok().map(|key| self.get_key(key))
    }

    /// Looks up a setting by name; unknown names read as empty
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Looks up a known setting
    pub fn get_key(&self, key: SettingKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or("")
    }

    /// True when the setting is exactly `1`
    pub fn flag(&self, key: SettingKey) -> bool {
        self.get_key(key).trim() == "1"
    }

    /// Numeric level of a setting; empty or invalid values read as 0
    pub fn level(&self, key: SettingKey) -> u32 {
        self.get_key(key).trim().parse().unwrap_or(0)
    }

    /// All settings in display order
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> + '_ {
        SettingKey::ALL.iter().map(move |key| (*key, self.get_key(*key)))
    }

    /// Configuration files that were loaded, lowest precedence first
    pub fn loaded_from(&self) -> &[PathBuf] {
        &self.loaded_from
    }

    /// Path of the task file, `None` when `TODO_FILE` is empty
    pub fn todo_file(&self) -> Option<&Path> {
        let path = self.get_key(SettingKey::TodoFile);
        if path.is_empty() {
            None
        } else {
            Some(Path::new(path))
        }
    }
}
