//! `init` command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::storage::TodoLayout;

/// Creates the todo.txt structure in `dest` without overwriting anything
pub fn run(output: &Output, dest: &Path) -> Result<()> {
    output.verbose_ctx("init", &format!("Initializing todo.txt structure at: {}", dest.display()));

    let layout = TodoLayout::at(dest)?;
    let report = layout.init()?;

    if output.is_json() {
        output.data(&report)?;
        return Ok(());
    }

    output.line(&report.headline());
    for file in &report.files {
        output.line(&file.line());
    }

    Ok(())
}
