//! Task domain model
//!
//! A task is one non-blank line of a todo.txt file. Only `@context` and
//! `+project` tokens are extracted; priority, dates and completion markers
//! stay part of the free text.

use serde::Serialize;

/// A single parsed todo.txt line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based position among the non-blank lines of this read
    pub sequence: usize,

    /// The line, trimmed of surrounding whitespace
    pub raw: String,

    /// Display text (currently identical to `raw`)
    pub text: String,

    /// `@context` tokens in order of appearance
    pub contexts: Vec<String>,

    /// `+project` tokens in order of appearance
    pub projects: Vec<String>,

    /// Always false: the `x ` completion marker is not parsed
    pub completed: bool,
}

impl Task {
    /// Parses a single line, returning `None` for blank lines
    pub fn parse(sequence: usize, line: &str) -> Option<Self> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }

        let mut contexts = Vec::new();
        let mut projects = Vec::new();

        for token in raw.split_whitespace() {
            if token.starts_with('@') {
                contexts.push(token.to_string());
            } else if token.starts_with('+') {
                projects.push(token.to_string());
            }
        }

        Some(Self {
            sequence,
            raw: raw.to_string(),
            text: raw.to_string(),
            contexts,
            projects,
            completed: false,
        })
    }

    /// Returns true if the text contains `term`, ignoring case
    pub fn matches(&self, term: &str) -> bool {
        self.text.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Ordered list of tasks produced by one read of a task file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of tasks read
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Appends a line, numbering it after the tasks already in the list.
    /// Returns false if the line was blank and skipped.
    pub fn push_line(&mut self, line: &str) -> bool {
        match Task::parse(self.0.len() + 1, line) {
            Some(task) => {
                self.0.push(task);
                true
            }
            None => false,
        }
    }

    /// Tasks whose text contains every term (case-insensitive)
    pub fn matching<'a>(&'a self, terms: &'a [String]) -> impl Iterator<Item = &'a Task> + 'a {
        self.iter()
            .filter(move |task| terms.iter().all(|term| task.matches(term)))
    }

    /// Width needed to zero-pad every sequence number in this list
    pub fn sequence_width(&self) -> usize {
        self.0.len().to_string().len()
    }
}

/// Cleans user-supplied task text before it is written.
///
/// Trims, drops one pair of surrounding double quotes and collapses every
/// whitespace run (including tabs and line breaks) to a single space.
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
