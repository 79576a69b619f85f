//! `add` and `addm` commands

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use super::output::Output;
use crate::domain::sanitize;
use crate::storage::{SettingKey, Settings, TodoFile, TodoFileError};

/// Flags affecting how tasks are added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Prefix today's date to each task
    pub date: bool,

    /// Never prompt on stdin
    pub force: bool,
}

impl AddOptions {
    /// Combines command-line flags with `TODOTXT_DATE_ON_ADD`/`TODOTXT_FORCE`.
    /// `-T` wins over both `-t` and the setting.
    pub fn resolve(date: bool, no_date: bool, force: bool, settings: &Settings) -> Self {
        Self {
            date: !no_date && (date || settings.flag(SettingKey::DateOnAdd)),
            force: force || settings.flag(SettingKey::Force),
        }
    }
}

/// Adds one task from the arguments, or from stdin when there are none
pub fn add(output: &Output, settings: &Settings, options: AddOptions, args: &[String]) -> Result<()> {
    let text = if args.is_empty() {
        if options.force {
            bail!("Missing task text. Usage: todo -f add [task]");
        }
        let stdin = io::stdin();
        prompt("Add:", &mut stdin.lock(), &mut io::stdout())?
    } else {
        args.join(" ")
    };

    let task = prepare(&text, options, today())?;
    save(output, settings, &task)
}

/// Adds the task from the arguments, then a second one read from stdin
pub fn addm(output: &Output, settings: &Settings, options: AddOptions, args: &[String]) -> Result<()> {
    if args.is_empty() {
        bail!("Missing task text. Usage: todo addm [task]");
    }

    let first = prepare(&args.join(" "), options, today())?;
    let stdin = io::stdin();
    let second = prompt(">", &mut stdin.lock(), &mut io::stdout())?;
    let second = prepare(&second, options, today())?;

    save(output, settings, &first)?;
    save(output, settings, &second)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Sanitizes task text and applies the date prefix
pub fn prepare(text: &str, options: AddOptions, today: NaiveDate) -> Result<String> {
    let task = sanitize(text);
    if task.is_empty() {
        bail!("Nothing to add: the task text is empty");
    }

    if options.date {
        Ok(format!("{} {}", today.format("%Y-%m-%d"), task))
    } else {
        Ok(task)
    }
}

/// Shows `label` and reads one line of input
pub fn prompt<R: BufRead, W: Write>(label: &str, input: &mut R, out: &mut W) -> Result<String> {
    if !label.is_empty() {
        write!(out, "{} ", label)?;
        out.flush()?;
    }

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read task from standard input")?;
    if read == 0 {
        bail!("No task text provided on standard input");
    }

    Ok(line)
}

fn save(output: &Output, settings: &Settings, task: &str) -> Result<()> {
    let path = settings.todo_file().ok_or(TodoFileError::NotConfigured)?;
    let file = TodoFile::new(path);
    output.verbose_ctx("add", &format!("Appending to {}", file.path().display()));

    let sequence = file.append(task)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "sequence": sequence,
            "text": task,
        }))?;
    } else {
        output.line(&format!("{}: {}", sequence, task));
        output.line(&format!("TODO: {} added", sequence));
    }

    Ok(())
}
