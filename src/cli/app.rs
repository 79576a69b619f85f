//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use super::add::{self, AddOptions};
use super::output::{Output, OutputFormat};
use super::{env, init, list};
use crate::storage::{Environment, Settings};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "A simple and extensible utility for managing your todo.txt files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Prefix the current date to a task automatically when it's added
    #[arg(short = 't', global = true)]
    pub date: bool,

    /// Do not prefix the current date to a task when it's added
    #[arg(short = 'T', global = true)]
    pub no_date: bool,

    /// Force actions without confirmation or interactive input
    #[arg(long, short = 'f', global = true)]
    pub force: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// System-wide configuration file read last in the cascade
    #[arg(long, env = "TODO_SYSTEM_CONFIG", global = true, hide = true)]
    pub system_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to your todo.txt file
    ///
    /// Examples:
    ///   todo add "Buy eggs and milk @grocery"
    ///   todo add Feed the kitten +BellyOfTheBeast
    ///   todo add                  # prompts for the task
    #[command(visible_alias = "a")]
    Add {
        /// Task text (read from stdin when omitted)
        text: Vec<String>,
    },

    /// Add a task from the arguments and a second one from stdin
    Addm {
        /// Text of the first task
        text: Vec<String>,
    },

    /// Display tasks with line numbers
    #[command(visible_alias = "ls")]
    List {
        /// Only show tasks containing every term
        terms: Vec<String>,
    },

    /// Display the resolved todo environment as shell assignments
    Env {
        /// Setting names to print (all when omitted)
        names: Vec<String>,
    },

    /// Initialize a todo.txt structure with default values
    Init {
        /// Destination directory (defaults to current directory)
        #[arg(long, short = 'd', default_value = ".")]
        dest: PathBuf,
    },

    /// Show a brief usage summary (same as --help)
    Shorthelp,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("todo starting");

    let mut environment = Environment::from_process()?;
    if let Some(path) = &cli.system_config {
        environment = environment.with_system_config(path);
    }
    let settings = Settings::resolve(&environment).context("Failed to load settings")?;
    for path in settings.loaded_from() {
        output.verbose_ctx("config", &format!("Loaded {}", path.display()));
    }

    let options = AddOptions::resolve(cli.date, cli.no_date, cli.force, &settings);

    match cli.command {
        Commands::Add { text } => add::add(&output, &settings, options, &text)?,
        Commands::Addm { text } => add::addm(&output, &settings, options, &text)?,
        Commands::List { terms } => list::run(&output, &settings, &terms)?,
        Commands::Env { names } => env::run(&output, &settings, &names)?,
        Commands::Init { dest } => init::run(&output, &dest)?,
        Commands::Shorthelp => {
            Cli::command().print_help()?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Sends library diagnostics to stderr; `RUST_LOG` adds further directives
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")
}
