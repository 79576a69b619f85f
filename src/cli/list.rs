//! `list` command

use anyhow::Result;

use super::output::Output;
use crate::domain::Task;
use crate::storage::{SettingKey, Settings, TodoFile, TodoFileError};

/// Prints tasks with zero-padded sequence numbers.
///
/// Every term must appear in a task's text (case-insensitive) for it to be
/// shown. Sequence numbers always refer to the unfiltered file.
pub fn run(output: &Output, settings: &Settings, terms: &[String]) -> Result<()> {
    let path = settings.todo_file().ok_or(TodoFileError::NotConfigured)?;
    let file = TodoFile::new(path);
    output.verbose_ctx("list", &format!("Reading {}", file.path().display()));

    let tasks = file.read_all()?;
    if tasks.is_empty() {
        output.verbose_ctx("list", "Task file is empty");
    }
    let shown: Vec<&Task> = tasks.matching(terms).collect();
    output.verbose_ctx(
        "list",
        &format!("{} tasks, {} match {:?}", tasks.len(), shown.len(), terms),
    );

    if output.is_json() {
        output.data(&shown)?;
        return Ok(());
    }

    let width = tasks.sequence_width();
    for task in &shown {
        output.line(&format_line(task, width));
    }

    let verbosity = settings.level(SettingKey::Verbose);
    if verbosity > 1 {
        output.line(&format!("TODO DEBUG: Filter terms were: {:?}", terms));
    }
    if verbosity >= 1 {
        output.line("--");
        output.line(&format!("TODO: {} of {} tasks shown", shown.len(), tasks.len()));
    }

    Ok(())
}

/// Formats `NN: text` with the sequence number padded to `width`
pub fn format_line(task: &Task, width: usize) -> String {
    format!("{:0width$}: {}", task.sequence, task.text, width = width)
}
