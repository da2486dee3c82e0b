use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

mod application;
mod components;
mod message;

use goal_tracker::config::{self, TrackerConfig};
use goal_tracker::core::calendar::{self, parse_day_key};
use goal_tracker::core::GoalIcon;
use goal_tracker::storage::{BlobStore, FileBlobStore, MemoryBlobStore};
use goal_tracker::store::GoalStore;

use application::{GoalTracker, Status};
use message::Message;

/// Track daily progress toward a handful of personal goals.
#[derive(Parser)]
#[command(name = "goal-tracker")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the goal snapshot (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every goal with this month's grid
    Show {
        /// Highlight this goal
        #[arg(long)]
        select: Option<String>,
    },
    /// Add a goal
    Add {
        name: String,
        #[arg(long, default_value_t = GoalIcon::Target)]
        icon: GoalIcon,
    },
    /// Rename a goal and change its icon
    Edit {
        id: String,
        name: String,
        /// Keep the current icon when omitted
        #[arg(long)]
        icon: Option<GoalIcon>,
    },
    /// Delete a goal
    Delete { id: String },
    /// Flip a day's completion for a goal
    Toggle {
        id: String,
        /// Day as YYYY-MM-DD, today when omitted
        day: Option<String>,
    },
    /// Adjust a goal's video counter
    Videos { id: String, action: VideoAction },
    /// Print the day keys of a month
    Days {
        /// Any day of the month as YYYY-MM-DD, today when omitted
        date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VideoAction {
    Inc,
    Dec,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The logger goes in first so config warnings reach the journal.
    init_logging(cli.debug);

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = resolve_config(&config_path, cli.data_dir.clone(), cli.debug);
    goal_tracker::set_debug_logging(config.debug_logging);

    let today = calendar::today();

    if let Some(Commands::Days { date }) = &cli.command {
        let reference = match date {
            Some(s) => parse_day_key(s)?,
            None => today,
        };
        for key in calendar::day_keys_of_month(reference) {
            println!("{}", key);
        }
        return Ok(());
    }

    let blob: Box<dyn BlobStore> = match config.ensure_dirs() {
        Ok(()) => Box::new(FileBlobStore::new(&config.data_directory)),
        Err(e) => {
            log::error!(
                "Cannot create data directory {}: {}; changes will not persist",
                config.data_directory.display(),
                e
            );
            Box::new(MemoryBlobStore::new())
        }
    };

    let mut app = GoalTracker::new(GoalStore::open(blob), today);

    for message in messages_for(cli.command, &app, today)? {
        app.update(message);
    }

    print!("{}", app.view());

    match app.status() {
        Some(Status::Rejected(reason)) => Err(reason.clone().into()),
        _ => Ok(()),
    }
}

/// Config file values with the command-line overrides applied.
fn resolve_config(path: &Path, data_dir: Option<PathBuf>, debug: bool) -> TrackerConfig {
    let mut config = TrackerConfig::load(path);
    if let Some(dir) = data_dir {
        config.data_directory = dir;
    }
    config.debug_logging |= debug;
    config
}

/// Translate a command into the messages a user would send from the goal screen.
fn messages_for<B: BlobStore>(
    command: Option<Commands>,
    app: &GoalTracker<B>,
    today: chrono::NaiveDate,
) -> Result<Vec<Message>, Box<dyn std::error::Error>> {
    let messages = match command {
        None | Some(Commands::Days { .. }) => Vec::new(),
        Some(Commands::Show { select }) => select.map(Message::SelectGoal).into_iter().collect(),
        Some(Commands::Add { name, icon }) => vec![
            Message::OpenNewGoalForm,
            Message::FormNameChanged(name),
            Message::FormIconChanged(icon),
            Message::SubmitForm,
        ],
        Some(Commands::Edit { id, name, icon }) => {
            let mut messages = vec![
                Message::OpenEditGoalForm(id.clone()),
                Message::FormNameChanged(name),
            ];
            if let Some(icon) = icon {
                messages.push(Message::FormIconChanged(icon));
            }
            messages.push(Message::SubmitForm);
            if !app.store().state().contains(&id) {
                log::warn!("No goal with id {}", id);
            }
            messages
        }
        Some(Commands::Delete { id }) => vec![Message::DeleteGoal(id)],
        Some(Commands::Toggle { id, day }) => {
            let day = match day {
                Some(s) => parse_day_key(&s)?,
                None => today,
            };
            vec![Message::SelectGoal(id.clone()), Message::ToggleDay(id, day)]
        }
        Some(Commands::Videos { id, action }) => match action {
            VideoAction::Inc => vec![Message::IncrementVideos(id)],
            VideoAction::Dec => vec![Message::DecrementVideos(id)],
        },
    };
    Ok(messages)
}

/// Log to the systemd user journal (`journalctl --user -t goal-tracker -f`).
/// Our own targets log at info (debug when enabled), everything else at warn.
fn init_logging(debug: bool) {
    struct FilteredJournal {
        inner: systemd_journal_logger::JournalLog,
    }

    impl log::Log for FilteredJournal {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            if metadata.target().starts_with("goal_tracker") {
                let max = if goal_tracker::debug_logging() {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                };
                metadata.level() <= max
            } else {
                metadata.level() <= log::LevelFilter::Warn
            }
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.inner.log(record);
            }
        }
        fn flush(&self) {
            self.inner.flush();
        }
    }

    goal_tracker::set_debug_logging(debug);

    let journal = match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => journal.with_syslog_identifier("goal-tracker".to_string()),
        Err(e) => {
            eprintln!("journal unavailable, logging disabled: {}", e);
            return;
        }
    };

    if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
        // Global max must be Debug so our debug logs can pass when toggled
        log::set_max_level(log::LevelFilter::Debug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"debug_logging": true}"#).unwrap();

        let config = resolve_config(&path, Some(dir.path().join("data")), false);
        assert!(config.debug_logging);
        assert_eq!(config.data_directory, dir.path().join("data"));

        let config = resolve_config(&dir.path().join("absent.json"), None, true);
        assert!(config.debug_logging);
        assert_eq!(config.data_directory, TrackerConfig::default().data_directory);
    }
}
