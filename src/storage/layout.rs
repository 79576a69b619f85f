//! todo.txt directory scaffolding
//!
//! `todo init` creates the configuration file and the three task files in a
//! destination directory. Existing files are never overwritten.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Default `todo.cfg` written by `todo init`
pub const CONFIG_TEMPLATE: &str = r#"
# === FILE LOCATIONS ===

# Your todo.txt directory
#export TODO_DIR="$HOME/todo"
export TODO_DIR="."

# Your todo/done/report.txt locations
export TODO_FILE="$TODO_DIR/todo.txt"
export DONE_FILE="$TODO_DIR/done.txt"
export REPORT_FILE="$TODO_DIR/report.txt"

# You can customize your actions directory location
#export TODO_ACTIONS_DIR="$HOME/.todo.actions.d"

# === APP OPTIONS ===

# is same as option -t (1)/-T (0)
export TODOTXT_DATE_ON_ADD=0

# is same as option -f
export TODOTXT_FORCE=0
"#;

/// Files making up a todo.txt structure, in creation order
pub const LAYOUT_FILES: [(&str, &str); 4] = [
    ("todo.cfg", CONFIG_TEMPLATE),
    ("todo.txt", ""),
    ("done.txt", ""),
    ("report.txt", ""),
];

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("DIR:{} doesn't exist. Please create the missing directory with: `mkdir -p {}`", .0.display(), .0.display())]
    MissingDir(PathBuf),

    #[error("DIR:{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to one file during init
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Created { bytes: usize },
    Exists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: &'static str,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Outcome of `todo init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub root: PathBuf,
    pub reinitialized: bool,
    pub files: Vec<FileReport>,
}

impl InitReport {
    /// Summary line, e.g. `Initialized a new todo.txt structure in /x`
    pub fn headline(&self) -> String {
        let message = if self.reinitialized {
            "Reinitialized an existing"
        } else {
            "Initialized a new"
        };
        format!("{} todo.txt structure in {}", message, self.root.display())
    }
}

impl FileReport {
    /// Status line, e.g. `todo.cfg [new] (512 bytes)`
    pub fn line(&self) -> String {
        match self.status {
            FileStatus::Created { bytes } => format!("{} [new] ({} bytes)", self.name, bytes),
            FileStatus::Exists => format!("{} [exists]", self.name),
        }
    }
}

/// A directory holding a todo.txt structure
pub struct TodoLayout {
    root: PathBuf,
}

impl TodoLayout {
    /// Opens a layout at an existing directory
    pub fn at(dest: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let dest = dest.as_ref();

        match dest.metadata() {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(LayoutError::NotADirectory(dest.to_path_buf())),
            Err(_) => return Err(LayoutError::MissingDir(dest.to_path_buf())),
        }

        let root = dest.canonicalize().map_err(|source| LayoutError::Create {
            path: dest.to_path_buf(),
            source,
        })?;

        Ok(Self { root })
    }

    /// True if any of the layout files already exists
    pub fn is_initialized(&self) -> bool {
        LAYOUT_FILES
            .iter()
            .any(|(name, _)| self.root.join(name).exists())
    }

    /// Creates every missing file, leaving existing ones untouched
    pub fn init(&self) -> Result<InitReport, LayoutError> {
        let reinitialized = self.is_initialized();
        let mut files = Vec::with_capacity(LAYOUT_FILES.len());

        for (name, template) in LAYOUT_FILES {
            let path = self.root.join(name);
            let status = create_new(&path, template)?;
            tracing::debug!(path = %path.display(), ?status, "init file");
            files.push(FileReport { name, status });
        }

        Ok(InitReport {
            root: self.root.clone(),
            reinitialized,
            files,
        })
    }
}

fn create_new(path: &Path, content: &str) -> Result<FileStatus, LayoutError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file: File = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(FileStatus::Exists),
        Err(source) => {
            return Err(LayoutError::Create {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|source| LayoutError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(FileStatus::Created {
        bytes: content.len(),
    })
}
