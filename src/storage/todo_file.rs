//! Access to the todo.txt task file
//!
//! Tasks are plain lines of text. Appends never rewrite existing lines and
//! are not locked; the sequence number returned by [`TodoFile::append`] is
//! for display only.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{TaskList, TaskReader};

#[derive(Debug, Error)]
pub enum TodoFileError {
    #[error("TODO_FILE is not set. Run 'todo init' and check your todo.cfg")]
    NotConfigured,

    #[error("DIR:{} doesn't exist. Please create the missing directory with: `mkdir -p {}`", .0.display(), .0.display())]
    MissingDir(PathBuf),

    #[error("DIR:{} is not a directory. Please fix your todo.cfg file and be sure to specify a directory with an absolute path", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} or {} don't have correct permission bits. Please fix the directory / file permissions", file.display(), dir.display())]
    PermissionDenied { file: PathBuf, dir: PathBuf },

    #[error("{} doesn't exist. Run 'todo init' or add a task first", .0.display())]
    Missing(PathBuf),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a pass over the task file found
#[derive(Debug, Default)]
struct Scan {
    tasks: usize,
    unterminated: bool,
}

/// The configured task file
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the task file (`.` for a bare file name)
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Reads and parses every task in the file
    pub fn read_all(&self) -> Result<TaskList, TodoFileError> {
        let file = File::open(&self.path).map_err(|e| self.open_error(e))?;

        TaskReader::new(BufReader::new(file))
            .read_all()
            .map_err(|source| self.io_error(source))
    }

    /// Appends one line and returns its sequence number.
    ///
    /// The parent directory must already exist; it is never created here.
    pub fn append(&self, text: &str) -> Result<usize, TodoFileError> {
        self.check_dir()?;

        let scan = self.scan()?;

        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.open_error(e))?;

        // One write call per line keeps appends from interleaving. An
        // unterminated last line gets its newline in the same write.
        let line = if scan.unterminated {
            format!("\n{}\n", text)
        } else {
            format!("{}\n", text)
        };
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.io_error(source))?;

        let sequence = scan.tasks + 1;
        tracing::debug!(path = %self.path.display(), sequence, "appended task");
        Ok(sequence)
    }

    /// Counts tasks the way the reader does; a missing file counts as empty
    fn scan(&self) -> Result<Scan, TodoFileError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Scan::default()),
            Err(e) => return Err(self.open_error(e)),
        };

        let mut reader = BufReader::new(file);
        let mut scan = Scan::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| self.io_error(source))?;
            if read == 0 {
                break;
            }

            scan.unterminated = !line.ends_with(b"\n");
            if !String::from_utf8_lossy(&line).trim().is_empty() {
                scan.tasks += 1;
            }
        }

        Ok(scan)
    }

    fn check_dir(&self) -> Result<(), TodoFileError> {
        let dir = self.dir();
        match dir.metadata() {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(TodoFileError::NotADirectory(dir.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(TodoFileError::MissingDir(dir.to_path_buf()))
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(self.permission_error()),
            Err(source) => Err(TodoFileError::Io {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    fn open_error(&self, e: io::Error) -> TodoFileError {
        match e.kind() {
            io::ErrorKind::NotFound => TodoFileError::Missing(self.path.clone()),
            io::ErrorKind::PermissionDenied => self.permission_error(),
            _ => self.io_error(e),
        }
    }

    fn permission_error(&self) -> TodoFileError {
        TodoFileError::PermissionDenied {
            file: self.path.clone(),
            dir: self.dir().to_path_buf(),
        }
    }

    fn io_error(&self, source: io::Error) -> TodoFileError {
        TodoFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
