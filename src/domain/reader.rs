//! Line-oriented todo.txt reader
//!
//! Turns raw text into a [`TaskList`]. Blank lines are skipped and never
//! consume a sequence number; everything else is a task.

use std::io::{self, BufRead};

use super::task::TaskList;

/// Reads tasks from any buffered source
pub struct TaskReader<R> {
    source: R,
}

impl<R: BufRead> TaskReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads every remaining line into a task list.
    ///
    /// I/O failures and invalid UTF-8 are returned to the caller as-is.
    pub fn read_all(self) -> io::Result<TaskList> {
        let mut tasks = TaskList::new();
        let mut skipped = 0usize;

        for line in self.source.lines() {
            if !tasks.push_line(&line?) {
                skipped += 1;
            }
        }

        tracing::debug!(tasks = tasks.len(), skipped, "read task list");
        Ok(tasks)
    }
}

/// Parses a whole task file held in memory
pub fn parse_all(text: &str) -> TaskList {
    let mut tasks = TaskList::new();
    for line in text.lines() {
        tasks.push_line(line);
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use proptest::prelude::*;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn parse_all_numbers_non_blank_lines() {
        let text = "Do a load of laundry +cleaning\n\n   \nVacuum the house +cleaning\r\nBuy eggs @grocery";
        let tasks = parse_all(text);

        assert_eq!(tasks.len(), 3);
        let seqs: Vec<_> = tasks.iter().map(|t| t.sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(tasks.iter().nth(1).unwrap().text, "Vacuum the house +cleaning");
    }

    #[test]
    fn parse_all_empty_input() {
        assert!(parse_all("").is_empty());
        assert!(parse_all("\n\n\r\n").is_empty());
    }

    #[test]
    fn reader_matches_parse_all() {
        let text = "one @a\n\ntwo +b\nthree\n";
        let from_reader = TaskReader::new(Cursor::new(text)).read_all().unwrap();
        assert_eq!(from_reader, parse_all(text));
    }

    #[test]
    fn reader_keeps_hash_lines() {
        let tasks = TaskReader::new(Cursor::new("# not a comment\ntask\n"))
            .read_all()
            .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.iter().next().unwrap().text, "# not a comment");
    }

    #[test]
    fn reader_surfaces_invalid_utf8() {
        let bytes: &[u8] = b"fine\n\xff\xfe broken\n";
        let result = TaskReader::new(BufReader::new(bytes)).read_all();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn reader_surfaces_io_errors() {
        let result = TaskReader::new(BufReader::new(FailingSource)).read_all();
        assert_eq!(result.unwrap_err().to_string(), "disk on fire");
    }

    fn word() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,8}",
            "@[a-z]{1,6}",
            "\\+[A-Za-z]{1,6}",
        ]
    }

    fn line() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::collection::vec(word(), 1..6).prop_map(|w| w.join(" ")),
            Just(String::new()),
            Just("   \t".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn count_equals_non_blank_lines(lines in prop::collection::vec(line(), 0..30)) {
            let text = lines.join("\n");
            let tasks = parse_all(&text);

            let expected = lines.iter().filter(|l| !l.trim().is_empty()).count();
            prop_assert_eq!(tasks.len(), expected);

            let seqs: Vec<_> = tasks.iter().map(|t| t.sequence).collect();
            let range: Vec<_> = (1..=expected).collect();
            prop_assert_eq!(seqs, range);
        }

        #[test]
        fn tags_are_classified_in_order(words in prop::collection::vec(word(), 1..12)) {
            let line = words.join(" ");
            let task = Task::parse(1, &line).unwrap();

            let contexts: Vec<_> = words.iter().filter(|w| w.starts_with('@')).cloned().collect();
            let projects: Vec<_> = words.iter().filter(|w| w.starts_with('+')).cloned().collect();

            prop_assert_eq!(&task.contexts, &contexts);
            prop_assert_eq!(&task.projects, &projects);
            prop_assert_eq!(task.text, line);
        }
    }
}
