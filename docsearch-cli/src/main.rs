use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use docsearch::{
    history, BufferHost, CliOverrides, FileStore, Match, OptionSet, SearchSession,
    SearchSettings, SettingsStore, TextBuffer,
};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, UNIX_EPOCH},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod diff_utils;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file layered over the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// History file (overrides history_path from configuration)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags that adjust the configured default search options
#[derive(Args, Debug, Clone, Copy)]
struct MatchFlags {
    /// Match case exactly
    #[arg(short = 'c', long)]
    case_sensitive: bool,

    /// Match whole words only
    #[arg(short = 'w', long)]
    whole_word: bool,

    /// Treat the query as plain text instead of a regular expression
    #[arg(short = 'l', long)]
    literal: bool,
}

impl MatchFlags {
    fn apply(self, mut options: OptionSet) -> OptionSet {
        if self.case_sensitive {
            options.case_sensitive = true;
        }
        if self.whole_word {
            options.whole_word = true;
        }
        if self.literal {
            options.use_regex = false;
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search a file and list every match
    Search {
        /// File to search
        file: PathBuf,

        /// Query to search for
        #[arg(short = 'p', long = "pattern")]
        query: String,

        #[command(flatten)]
        flags: MatchFlags,
    },

    /// Replace matches in a file
    Replace {
        /// File to edit
        file: PathBuf,

        /// Query to search for
        #[arg(short = 'p', long = "pattern")]
        query: String,

        /// Replacement text; `$1` or `${name}` insert capture groups
        #[arg(short = 'r', long)]
        replacement: String,

        /// Replace only the match at this zero-based index
        #[arg(short = 'i', long)]
        index: Option<usize>,

        /// Dry run - show what would be changed without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,

        #[command(flatten)]
        flags: MatchFlags,
    },

    /// Inspect or edit the search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Print the effective configuration as YAML
    Config,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List {
        /// Print the raw JSON entries
        #[arg(long)]
        json: bool,
    },

    /// Delete the entry with the given timestamp
    Delete {
        #[arg(required = true)]
        timestamp: u64,
    },

    /// Remove every entry
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = SearchSettings::load_from(cli.config.as_deref())?.merge_with_cli(CliOverrides {
        history_path: cli.history.clone(),
        max_history_items: None,
        log_level: cli.log_level.clone(),
    });
    init_logging(cli.log_level.as_deref(), &settings.log_level);

    run(cli.command, settings)
}

/// `--log-level` wins over `RUST_LOG`, which wins over the configured level
fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands, settings: SearchSettings) -> Result<()> {
    match command {
        Commands::Search { file, query, flags } => {
            let mut store = FileStore::open(settings)?;
            let buffer = TextBuffer::new(read_file(&file)?);
            let mut session = start_session(&store, false, &query, flags);

            if !session.is_pattern_valid() {
                println!("{}", "Invalid pattern".yellow());
            }
            print_matches(buffer.text(), session.matches(&buffer));
            println!("{} matches", session.match_count(&buffer));

            session.record_history(&mut store)?;
            Ok(())
        }
        Commands::Replace {
            file,
            query,
            replacement,
            index,
            dry_run,
            flags,
        } => {
            let mut store = FileStore::open(settings)?;
            let original = read_file(&file)?;
            let mut buffer = TextBuffer::new(original.clone());
            let mut session = start_session(&store, true, &query, flags);
            session.set_replacement(replacement);

            let total = session.match_count(&buffer);
            let replaced = match index {
                Some(index) => {
                    if session.select(&mut buffer, index).is_none() {
                        bail!("No match at index {} ({} matches)", index, total);
                    }
                    usize::from(session.replace_one(&mut buffer))
                }
                None => session.replace_all(&mut buffer),
            };
            session.record_history(&mut store)?;

            if replaced == 0 {
                println!("No changes made");
                return Ok(());
            }

            if dry_run {
                println!("Dry run - no changes will be made");
                diff_utils::print_unified_diff(&file, &original, buffer.text());
            } else {
                write_document(&file, buffer.text())
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                info!("Wrote {}", file.display());
            }
            println!(
                "Made {} replacements ({} matches found) in {}",
                replaced,
                total,
                file.display().to_string().blue()
            );
            Ok(())
        }
        Commands::History { action } => {
            let mut store = FileStore::open(settings)?;
            match action {
                HistoryAction::List { json } => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(store.search_history())?);
                    } else {
                        print_history(store.search_history());
                    }
                }
                HistoryAction::Delete { timestamp } => {
                    let entry = history::find_entry(store.search_history(), timestamp)?;
                    println!("Deleted '{}'", entry.query);
                    let remaining = history::delete_entry(store.search_history(), timestamp);
                    store.save_search_history(remaining)?;
                }
                HistoryAction::Clear => {
                    let count = store.search_history().len();
                    store.save_search_history(Vec::new())?;
                    println!("Cleared {} history entries", count);
                }
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", settings.to_yaml()?);
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes `content` next to `path` and renames it into place
fn write_document(path: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(&tmp_path, metadata.permissions())?;
    }
    fs::rename(&tmp_path, path)
}

fn start_session(store: &FileStore, replace_mode: bool, query: &str, flags: MatchFlags) -> SearchSession {
    let mut session = SearchSession::new();
    session.open(replace_mode, store);
    let options = flags.apply(session.state().options);
    session.set_options(options);
    session.set_query(query);
    debug!("Searching for '{}' with {:?}", query, options);
    session
}

fn print_matches(text: &str, matches: &[Match]) {
    for m in matches {
        let line_start = text[..m.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = text[m.start..]
            .find('\n')
            .map_or(text.len(), |i| m.start + i);
        let line_number = text[..line_start].matches('\n').count() + 1;
        let column = text[line_start..m.start].chars().count() + 1;
        let highlight_end = m.end.min(line_end);

        println!(
            "{} {}{}{}",
            format!("{}:{}:", line_number, column).green(),
            &text[line_start..m.start],
            text[m.start..highlight_end].red().bold(),
            &text[highlight_end..line_end]
        );
    }
}

fn print_history(entries: &[docsearch::HistoryEntry]) {
    if entries.is_empty() {
        println!("No search history");
        return;
    }

    for entry in entries {
        let when = UNIX_EPOCH + Duration::from_millis(entry.timestamp);
        let mut flags = Vec::new();
        if entry.options.case_sensitive {
            flags.push("case");
        }
        if entry.options.whole_word {
            flags.push("word");
        }
        if !entry.options.use_regex {
            flags.push("literal");
        }

        print!(
            "{} {} {}",
            entry.timestamp.to_string().yellow(),
            humantime::format_rfc3339_seconds(when),
            entry.query.blue()
        );
        if !entry.replacement.is_empty() {
            print!(" -> {}", entry.replacement.green());
        }
        if !flags.is_empty() {
            print!(" [{}]", flags.join(","));
        }
        println!();
    }
}
