// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use anyhow::{bail, Context};
use clap::{Args, Subcommand};
use dpt_core::config::Config;
use dpt_core::stats::CatalogStats;
use dpt_core::{
    DateRange, FileStore, FilterCriteria, HistoryEntry, Record, RecordStatus, SearchMode,
    SearchOutcome, SearchRequest, SearchSession, WatchlistStatus, Watchlists,
};
use std::path::PathBuf;

/// A parsed subcommand ready to be executed against [`AppState`].
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the catalog by text and/or filters
    Search(SearchArgs),
    /// Show or edit the search history
    #[command(subcommand)]
    History(HistoryCommand),
    /// Manage watchlists
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
    /// List records shown alongside a record
    Similar {
        record: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Catalog statistics
    Stats,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Matched against title, organization, description and inventor names
    pub query: Option<String>,
    /// Organization contains (case-insensitive)
    #[arg(long)]
    pub organization: Option<String>,
    /// Exact category code, e.g. D14-138
    #[arg(long)]
    pub category: Option<String>,
    /// pending | granted | abandoned
    #[arg(long)]
    pub status: Option<RecordStatus>,
    /// Exact country code, e.g. US
    #[arg(long)]
    pub country: Option<String>,
    /// Any inventor name contains (case-insensitive)
    #[arg(long)]
    pub inventor: Option<String>,
    /// Patent number contains (case-insensitive)
    #[arg(long)]
    pub number: Option<String>,
    /// Filed on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Filed on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Attach a reference image
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Record the search as an advanced search
    #[arg(long)]
    pub advanced: bool,
}

impl SearchArgs {
    pub fn into_request(self) -> SearchRequest {
        let date_range = if self.from.is_some() || self.to.is_some() {
            Some(DateRange::new(self.from, self.to))
        } else {
            None
        };
        let criteria = FilterCriteria {
            organization: self.organization,
            category: self.category,
            status: self.status,
            country: self.country,
            inventor: self.inventor,
            external_id: self.number,
            date_range,
        };
        let mode = if self.advanced {
            SearchMode::Advanced
        } else {
            SearchMode::Basic
        };
        let request = SearchRequest::new(self.query.unwrap_or_default())
            .criteria(criteria)
            .mode(mode);
        match self.image {
            Some(path) => request.reference_image(path),
            None => request,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List past searches, newest first
    List,
    /// Forget every past search
    Clear,
    /// Forget one past search
    Remove { id: String },
    /// Run a past search again
    Rerun { id: String },
}

#[derive(Debug, Subcommand)]
pub enum WatchlistCommand {
    /// List watchlists
    List,
    /// Show the records in a watchlist
    Show { id: String },
    /// Create an empty watchlist
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a record to a watchlist
    Add { id: String, record: String },
    /// Remove a record from a watchlist
    Remove { id: String, record: String },
    /// Tag a watchlist
    Tag { id: String, tag: String },
    /// Set a watchlist's status (active | draft | archived)
    Status { id: String, status: WatchlistStatus },
    /// Delete a watchlist
    Delete { id: String },
}

/// Everything a command can act on, built once in `main`.
pub struct AppState {
    pub config: Config,
    pub session: SearchSession<FileStore>,
    pub watchlists: Watchlists<FileStore>,
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Search(args) => {
            let outcome = s.session.perform(args.into_request())?;
            print_outcome(&outcome);
        }
        Command::History(HistoryCommand::List) => {
            let entries = s.session.history().entries();
            if entries.is_empty() {
                println!("No search history.");
            }
            for (i, entry) in entries.iter().enumerate() {
                print_history_entry(i, entry, &s.config.display.timestamp_format);
            }
        }
        Command::History(HistoryCommand::Clear) => {
            s.session.history_mut().clear()?;
            println!("Search history cleared.");
        }
        Command::History(HistoryCommand::Remove { id }) => {
            if s.session.history_mut().remove(&id)? {
                println!("Removed {id}.");
            } else {
                println!("No history entry {id}.");
            }
        }
        Command::History(HistoryCommand::Rerun { id }) => {
            let outcome = s.session.rerun(&id)?;
            print_outcome(&outcome);
        }
        Command::Watchlist(cmd) => execute_watchlist(s, cmd)?,
        Command::Similar { record, limit } => {
            let limit = limit.unwrap_or(s.config.search.similar_limit);
            for r in s.session.similar(&record, limit)? {
                print_record(&r);
            }
        }
        Command::Stats => print_stats(&CatalogStats::from_records(s.session.records())),
    }
    Ok(())
}

fn execute_watchlist(s: &mut AppState, cmd: WatchlistCommand) -> anyhow::Result<()> {
    match cmd {
        WatchlistCommand::List => {
            if s.watchlists.list().is_empty() {
                println!("No watchlists.");
            }
            for w in s.watchlists.list() {
                let tags = if w.tags.is_empty() {
                    String::new()
                } else {
                    format!("  [{}]", w.tags.join(", "))
                };
                println!(
                    "{}  {:<8} {:>3} records  {}{}",
                    w.id,
                    w.status,
                    w.records.len(),
                    w.name,
                    tags
                );
            }
        }
        WatchlistCommand::Show { id } => {
            let Some(list) = s.watchlists.get(&id) else {
                bail!("no watchlist with id {id:?}");
            };
            println!("{} ({})", list.name, list.status);
            if !list.description.is_empty() {
                println!("{}", list.description);
            }
            println!(
                "created {}",
                list.created_at.format(&s.config.display.timestamp_format)
            );
            for r in &list.records {
                print_record(r);
            }
        }
        WatchlistCommand::Create { name, description } => {
            let list = s.watchlists.create(&name, &description)?;
            println!("Created watchlist {} ({}).", list.name, list.id);
        }
        WatchlistCommand::Add { id, record } => {
            let record = s
                .session
                .record(&record)
                .cloned()
                .with_context(|| format!("no record with id {record:?}"))?;
            if s.watchlists.add_record(&id, record)? {
                println!("Added.");
            } else {
                println!("Already in watchlist.");
            }
        }
        WatchlistCommand::Remove { id, record } => {
            if s.watchlists.remove_record(&id, &record)? {
                println!("Removed.");
            } else {
                println!("Record {record} is not in that watchlist.");
            }
        }
        WatchlistCommand::Tag { id, tag } => s.watchlists.add_tag(&id, &tag)?,
        WatchlistCommand::Status { id, status } => s.watchlists.set_status(&id, status)?,
        WatchlistCommand::Delete { id } => {
            let list = s.watchlists.delete(&id)?;
            println!("Deleted watchlist {}.", list.name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_outcome(outcome: &SearchOutcome) {
    println!("{}: {} result(s)", outcome.entry.describe(), outcome.results.len());
    for r in &outcome.results {
        print_record(r);
    }
    for e in &outcome.date_errors {
        eprintln!("warning: {e}");
    }
}

fn print_record(r: &Record) {
    let score = r.score.map(|s| format!("{s:>3}%  ")).unwrap_or_default();
    println!(
        "{score}{:>4}  {:<10} {:<9} {:<2} {}  {} - {}",
        r.id,
        r.external_id.as_deref().unwrap_or("-"),
        r.status,
        r.country,
        r.filing_date,
        r.title,
        r.organization
    );
}

fn print_history_entry(index: usize, entry: &HistoryEntry, timestamp_format: &str) {
    println!(
        "{:>2}. {}  {}  {:<8} {:>3} result(s)  {}",
        index + 1,
        entry.id,
        entry.timestamp.format(timestamp_format),
        entry.mode,
        entry.result_count,
        entry.describe()
    );
}

fn print_stats(stats: &CatalogStats) {
    println!("Records: {}", stats.total);
    println!("By status:");
    for (status, n) in &stats.by_status {
        println!("  {status:<10} {n}");
    }
    println!("By country:");
    for (country, n) in &stats.by_country {
        println!("  {country:<10} {n}");
    }
    println!("By category:");
    for (category, n) in &stats.by_category {
        println!("  {category:<10} {n}");
    }
    println!("Filings by year:");
    for (year, n) in &stats.by_year {
        println!("  {year:<10} {n}");
    }
    if stats.undated > 0 {
        println!("  undated    {}", stats.undated);
    }
    println!("Top organizations:");
    for (org, n) in stats.top_organizations.iter().take(5) {
        println!("  {n:>3}  {org}");
    }
}
