//! todotxt - A simple and extensible utility for managing todo.txt files
//!
//! Reads todo.txt task files into structured records, appends new tasks and
//! resolves the `todo.cfg` configuration cascade.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{parse_all, Task, TaskList, TaskReader};
pub use storage::{Environment, SettingKey, Settings, TodoFile};
