//! Domain models for the todo.txt CLI
//!
//! Contains the task model and line parser without any file I/O.

mod reader;
mod task;

pub use reader::{parse_all, TaskReader};
pub use task::{sanitize, Task, TaskList};
