mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_core::{DaybookConfig, EventStore};

use commands::{parse_date, parse_optional_date};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Browse dates and keep a simple list of dated events")]
struct Cli {
    /// Events file to use instead of the one from config.toml
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day and its events
    Show {
        /// Starting date (DD-MM-YYYY, today, tomorrow, yesterday)
        date: Option<String>,

        /// Move this many days from the starting date
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        days: i32,

        /// Move this many weeks from the starting date
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        weeks: i32,

        /// Move this many months from the starting date
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        months: i32,
    },
    /// Print a month grid with event days highlighted
    Month {
        /// Any date in the month (defaults to today)
        date: Option<String>,

        /// Move this many months from that date
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        months: i32,
    },
    /// Add an event
    Add {
        date: String,

        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Replace the events on a date with a single edited event
    Edit {
        date: String,

        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Move the event to this date
        #[arg(long)]
        to: Option<String>,
    },
    /// Remove all events on a date
    Remove {
        date: String,

        /// Don't ask before removing several events
        #[arg(short, long)]
        yes: bool,
    },
    /// List events
    Events {
        /// Only events on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Only events on or before this date
        #[arg(long)]
        to: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show config and events file paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose)?;

    let config = DaybookConfig::load().context("Failed to load config")?;

    match cli.command {
        Commands::Config => commands::config::run(&config, cli.file.as_deref()),
        Commands::Show {
            date,
            days,
            weeks,
            months,
        } => {
            let store = open_store(&config, cli.file)?;
            let date = parse_optional_date(date.as_deref())?;
            commands::show::run(&store, date, days, weeks, months)
        }
        Commands::Month { date, months } => {
            let store = open_store(&config, cli.file)?;
            let date = parse_optional_date(date.as_deref())?;
            commands::month::run(&store, date, months)
        }
        Commands::Add { date, description } => {
            let mut store = open_store(&config, cli.file)?;
            commands::add::run(&mut store, parse_date(&date)?, &description.join(" "))
        }
        Commands::Edit {
            date,
            description,
            to,
        } => {
            let mut store = open_store(&config, cli.file)?;
            let new_date = to.as_deref().map(parse_date).transpose()?;
            let date = parse_date(&date)?;
            commands::edit::run(&mut store, date, new_date, &description.join(" "))
        }
        Commands::Remove { date, yes } => {
            let mut store = open_store(&config, cli.file)?;
            commands::remove::run(&mut store, parse_date(&date)?, yes)
        }
        Commands::Events { from, to, json } => {
            let store = open_store(&config, cli.file)?;
            let from = from.as_deref().map(parse_date).transpose()?;
            let to = to.as_deref().map(parse_date).transpose()?;
            commands::events::run(&store, from, to, json)
        }
    }
}

fn open_store(config: &DaybookConfig, file: Option<PathBuf>) -> Result<EventStore> {
    let mut store = match file {
        Some(path) => EventStore::new(path).with_strict_load(config.strict_load),
        None => EventStore::from_config(config),
    };

    store
        .load()
        .with_context(|| format!("Failed to load events from {}", store.path().display()))?;

    Ok(store)
}
