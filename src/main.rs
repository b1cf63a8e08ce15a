//! Binary entry point for notecore.
//!
//! This binary provides the CLI interface for the notecore notes engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use notecore::config::NotecoreConfig;
use notecore::io::{ExportOptions, ExportService, Format};
use notecore::rendering::{preview, relative_time, share_text};
use notecore::storage::open_backend;
use notecore::{
    current_timestamp_ms, observability, BackupOutcome, BackupService, ConnectivityProbe, Note,
    NoteStore, SettingsStore, Theme,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Notecore - a local-first notes engine with backup and restore.
#[derive(Parser)]
#[command(name = "notecore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "NOTECORE_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a note.
    Add {
        /// The note title.
        title: String,

        /// The note content.
        #[arg(default_value = "")]
        content: String,
    },

    /// List all notes, newest first.
    List,

    /// Show one note in full.
    Show {
        /// Note id (a unique prefix is enough).
        id: String,
    },

    /// Replace a note's title and content.
    Edit {
        /// Note id (a unique prefix is enough).
        id: String,

        /// The new title.
        title: String,

        /// The new content.
        #[arg(default_value = "")]
        content: String,
    },

    /// Delete a note.
    Delete {
        /// Note id (a unique prefix is enough).
        id: String,
    },

    /// Search notes by title and content.
    Search {
        /// The search query.
        query: String,
    },

    /// Print a note as shareable plain text.
    Share {
        /// Note id (a unique prefix is enough).
        id: String,
    },

    /// Export the collection to a file.
    Export {
        /// Output path; a directory gets the date-stamped backup name.
        path: PathBuf,

        /// Output format: json, csv, or markdown (default: from extension).
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Import a backup file, replacing the whole collection.
    Import {
        /// Backup file to import.
        path: PathBuf,

        /// Validate only; do not touch the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// Back up the collection.
    Backup {
        #[command(subcommand)]
        target: BackupTarget,
    },

    /// Control offline mode.
    Offline {
        #[command(subcommand)]
        action: OfflineAction,
    },

    /// Show or set the theme preference.
    Theme {
        /// Theme name: light or dark. Omit to show the current theme.
        name: Option<String>,
    },

    /// Show store status.
    Status,

    /// Show the resolved configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

/// Backup targets.
#[derive(Subcommand)]
enum BackupTarget {
    /// Write a date-stamped file into the backup directory.
    Local,
    /// Run the remote backup path (gated on connectivity).
    Remote,
    /// Prefer remote, fall back to local.
    Auto,
}

/// Offline mode actions.
#[derive(Subcommand)]
enum OfflineAction {
    /// Enable offline mode.
    On,
    /// Disable offline mode.
    Off,
    /// Show whether offline mode is enabled.
    Status,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_config(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<NotecoreConfig> {
    path.map_or_else(
        || Ok(NotecoreConfig::load_default()),
        |p| NotecoreConfig::load_from_file(p).context("reading config file"),
    )
}

fn run_command(cli: Cli, config: NotecoreConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Add { title, content } => cmd_add(&config, &title, &content),
        Commands::List => cmd_list(&config),
        Commands::Show { id } => cmd_show(&config, &id),
        Commands::Edit { id, title, content } => cmd_edit(&config, &id, &title, &content),
        Commands::Delete { id } => cmd_delete(&config, &id),
        Commands::Search { query } => cmd_search(&config, &query),
        Commands::Share { id } => cmd_share(&config, &id),
        Commands::Export { path, format } => cmd_export(&config, path, format),
        Commands::Import { path, dry_run } => cmd_import(&config, &path, dry_run),
        Commands::Backup { target } => cmd_backup(&config, &target),
        Commands::Offline { action } => cmd_offline(&config, &action),
        Commands::Theme { name } => cmd_theme(&config, name),
        Commands::Status => cmd_status(&config),
        Commands::Config => cmd_config(&config),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

fn note_store(config: &NotecoreConfig) -> anyhow::Result<NoteStore> {
    Ok(NoteStore::new(open_backend(config)?))
}

fn settings_store(config: &NotecoreConfig) -> anyhow::Result<SettingsStore> {
    Ok(SettingsStore::new(open_backend(config)?))
}

/// Resolves a note by exact id or unique id prefix.
fn resolve_note(store: &NoteStore, id: &str) -> anyhow::Result<Note> {
    let notes = store.list()?;

    if let Some(note) = notes.iter().find(|n| n.id.as_str() == id) {
        return Ok(note.clone());
    }

    let mut matches = notes.iter().filter(|n| n.id.as_str().starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note.clone()),
        (Some(_), Some(_)) => bail!("id prefix '{id}' is ambiguous"),
        _ => bail!("no note with id '{id}'"),
    }
}

fn print_note_line(note: &Note, now_ms: i64) {
    let short_id: String = note.id.as_str().chars().take(8).collect();
    println!(
        "{short_id}  {:<30}  {}",
        note.title,
        relative_time(note.updated_at, now_ms)
    );
    if !note.content.is_empty() {
        println!("          {}", preview(&note.content));
    }
}

fn cmd_add(config: &NotecoreConfig, title: &str, content: &str) -> anyhow::Result<()> {
    let mut store = note_store(config)?;
    let note = store.create(title, content)?;
    println!("Created note {}", note.id);
    Ok(())
}

fn cmd_list(config: &NotecoreConfig) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let notes = store.list()?;

    if notes.is_empty() {
        println!("No notes.");
        return Ok(());
    }

    let now = current_timestamp_ms();
    for note in &notes {
        print_note_line(note, now);
    }
    println!("\n{} note(s)", notes.len());
    Ok(())
}

fn cmd_show(config: &NotecoreConfig, id: &str) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let note = resolve_note(&store, id)?;
    let now = current_timestamp_ms();

    println!("{}", note.title);
    println!("id:      {}", note.id);
    println!("created: {}", relative_time(note.created_at, now));
    println!("updated: {}", relative_time(note.updated_at, now));
    println!("\n{}", note.content);
    Ok(())
}

fn cmd_edit(config: &NotecoreConfig, id: &str, title: &str, content: &str) -> anyhow::Result<()> {
    let mut store = note_store(config)?;
    let note = resolve_note(&store, id)?;
    store.update(&note.id, title, content)?;
    println!("Updated note {}", note.id);
    Ok(())
}

fn cmd_delete(config: &NotecoreConfig, id: &str) -> anyhow::Result<()> {
    let mut store = note_store(config)?;
    let note = resolve_note(&store, id)?;
    store.delete(&note.id)?;
    println!("Deleted note {}", note.id);
    Ok(())
}

fn cmd_search(config: &NotecoreConfig, query: &str) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let hits = store.search(query)?;

    if hits.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    let now = current_timestamp_ms();
    for note in &hits {
        print_note_line(note, now);
    }
    println!("\n{} match(es)", hits.len());
    Ok(())
}

fn cmd_share(config: &NotecoreConfig, id: &str) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let note = resolve_note(&store, id)?;
    println!("{}", share_text(&note));
    Ok(())
}

fn cmd_export(
    config: &NotecoreConfig,
    path: PathBuf,
    format: Option<String>,
) -> anyhow::Result<()> {
    let store = note_store(config)?;

    let target = notecore::io::services::export::resolve_target(
        &path,
        &notecore::models::backup_file_name(),
    );
    let mut options = ExportOptions::new(target);
    if let Some(name) = format {
        options = options.with_format(name.parse::<Format>()?);
    }

    let result = ExportService::new().export_to_file(&store, &options)?;
    println!(
        "Exported {} note(s) to {} ({})",
        result.notes,
        result.path.display(),
        result.format
    );
    Ok(())
}

fn cmd_import(config: &NotecoreConfig, path: &std::path::Path, dry_run: bool) -> anyhow::Result<()> {
    let service = BackupService::new(&config.backup_dir);

    if dry_run {
        let report = service.validate_file(path)?;
        if let Some(reason) = report.first_error() {
            bail!("invalid backup document: {reason}");
        }
        for warning in report.warnings() {
            println!("warning: {warning}");
        }
        println!("{} is a valid backup document", path.display());
        return Ok(());
    }

    let mut store = note_store(config)?;
    let summary = service.import_file(&mut store, path)?;
    for warning in &summary.warnings {
        println!("warning: {warning}");
    }
    println!("Imported {} note(s) from {}", summary.notes, path.display());
    Ok(())
}

fn cmd_backup(config: &NotecoreConfig, target: &BackupTarget) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let service = BackupService::new(&config.backup_dir);

    let outcome = match target {
        BackupTarget::Local => service.export_local(&store)?,
        BackupTarget::Remote => {
            let settings = settings_store(config)?;
            let probe = ConnectivityProbe::from_config(config);
            service.export_remote(&store, &settings, &probe)?
        },
        BackupTarget::Auto => {
            let settings = settings_store(config)?;
            let probe = ConnectivityProbe::from_config(config);
            service.create_backup(&store, &settings, &probe)?
        },
    };

    match outcome {
        BackupOutcome::NothingToBackUp => println!("Nothing to back up."),
        BackupOutcome::Local { path, notes } => {
            println!("Backed up {notes} note(s) to {}", path.display());
        },
        BackupOutcome::Remote { notes } => println!("Backed up {notes} note(s) remotely"),
    }
    Ok(())
}

fn cmd_offline(config: &NotecoreConfig, action: &OfflineAction) -> anyhow::Result<()> {
    let mut settings = settings_store(config)?;

    match action {
        OfflineAction::On => {
            settings.set_offline_mode(true)?;
            println!("Offline mode enabled");
        },
        OfflineAction::Off => {
            settings.set_offline_mode(false)?;
            println!("Offline mode disabled");
        },
        OfflineAction::Status => {
            let state = if settings.offline_mode() { "on" } else { "off" };
            println!("Offline mode: {state}");
        },
    }
    Ok(())
}

fn cmd_theme(config: &NotecoreConfig, name: Option<String>) -> anyhow::Result<()> {
    let mut settings = settings_store(config)?;

    match name {
        Some(name) => {
            let theme = Theme::parse(&name);
            settings.set_theme(theme)?;
            println!("Theme set to {theme}");
        },
        None => println!("Theme: {}", settings.theme()),
    }
    Ok(())
}

fn cmd_status(config: &NotecoreConfig) -> anyhow::Result<()> {
    let store = note_store(config)?;
    let settings = settings_store(config)?;
    let probe = ConnectivityProbe::from_config(config);

    println!("Notes:        {}", store.count()?);
    println!("Storage:      {}", config.storage.as_str());
    println!("Data dir:     {}", config.data_dir.display());
    println!("Backup dir:   {}", config.backup_dir.display());
    println!(
        "Offline mode: {}",
        if settings.offline_mode() { "on" } else { "off" }
    );
    println!(
        "Network:      {}",
        if probe.is_online(&settings) {
            "online"
        } else {
            "offline"
        }
    );
    Ok(())
}

fn cmd_config(config: &NotecoreConfig) -> anyhow::Result<()> {
    println!("data_dir   = {}", config.data_dir.display());
    println!("backup_dir = {}", config.backup_dir.display());
    println!("storage    = {}", config.storage.as_str());
    println!("[probe]");
    println!("endpoint   = {}", config.probe.endpoint);
    println!("timeout_ms = {}", config.probe.timeout_ms);
    Ok(())
}

fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "notecore",
        &mut std::io::stdout(),
    );
    Ok(())
}
