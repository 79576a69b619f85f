//! # Command-Line Interface
//!
//! User-facing `todo` commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add`, `addm` | Append tasks to `$TODO_FILE` |
//! | `list` | Print tasks with sequence numbers |
//! | `env` | Print resolved settings as shell assignments |
//! | `init` | Create `todo.cfg`, `todo.txt`, `done.txt`, `report.txt` |
//!
//! ## Global Flags
//!
//! - `-t` / `-T` - prefix (or not) today's date to added tasks
//! - `-f` - never prompt for input
//! - `-v` - debug output on stderr
//! - `--format json` - machine-readable output
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod add;
mod app;
mod env;
mod init;
mod list;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
