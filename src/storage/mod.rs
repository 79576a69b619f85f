//! # Storage Layer
//!
//! Everything that touches the filesystem: configuration files, the task
//! file and the `init` scaffolding.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Settings | `KEY=VALUE` env-file | `$HOME/todo.cfg`, `$HOME/.todo.cfg`, `./todo.cfg`, `/etc/todo/config` |
//! | Tasks | One task per line | `$TODO_FILE` |
//! | Done / report | One entry per line | `$DONE_FILE`, `$REPORT_FILE` |
//!
//! ## Concurrency
//!
//! Nothing is locked. Appends are a single `write` of one line, so
//! concurrent `todo add` runs may interleave lines but never tear them for
//! typical line lengths.
//!
//! ## Key Types
//!
//! - [`Settings`] - Resolved configuration, built once per run
//! - [`TodoFile`] - Read and append tasks
//! - [`TodoLayout`] - No-clobber scaffolding for `todo init`

pub mod envfile;
mod layout;
mod settings;
mod todo_file;

pub use envfile::EnvFileError;
pub use layout::{
    FileReport, FileStatus, InitReport, LayoutError, TodoLayout, CONFIG_TEMPLATE, LAYOUT_FILES,
};
pub use settings::{Environment, SettingKey, Settings, SettingsError, SYSTEM_CONFIG};
pub use todo_file::{TodoFile, TodoFileError};
