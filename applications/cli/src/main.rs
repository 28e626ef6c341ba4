/// Preset Sorter - command line interface for the sorting engine
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sorter_core::{BpmRange, KeyFilter, KeyFilterMode, ScanItem, SortMode, BPM_RANGE_MAX};
use sorter_engine::{EnginePaths, SorterEngine};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "preset-sorter")]
#[command(about = "Sort audio plugin presets and samples into category folders", long_about = None)]
struct Cli {
    /// Directory for dictionaries and move logs (defaults to the user
    /// config directory)
    #[arg(long, global = true, env = "PRESET_SORTER_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Presets,
    Samples,
}

impl From<Mode> for SortMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Presets => SortMode::Presets,
            Mode::Samples => SortMode::Samples,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KeyChoice {
    All,
    Major,
    Minor,
    Notes,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder and preview how files would be categorized
    Scan {
        /// Folder to scan
        path: PathBuf,
        /// What to look for
        #[arg(short, long, value_enum)]
        mode: Mode,
        /// Do not guess tempo, key, or mood from file names
        #[arg(long)]
        no_intelligence: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan a folder and move the files into category folders
    Sort {
        /// Folder to sort
        path: PathBuf,
        /// What to sort
        #[arg(short, long, value_enum)]
        mode: Mode,
        /// Keep only files in this key family
        #[arg(long, value_enum, default_value = "all")]
        key: KeyChoice,
        /// Root notes to keep when --key is "notes" (e.g. "F#" "Bb")
        #[arg(long, num_args = 1..)]
        notes: Vec<String>,
        /// Lower tempo bound
        #[arg(long, default_value_t = 0)]
        bpm_min: u32,
        /// Upper tempo bound
        #[arg(long, default_value_t = BPM_RANGE_MAX)]
        bpm_max: u32,
        /// Do not guess tempo, key, or mood from file names
        #[arg(long)]
        no_intelligence: bool,
    },
    /// Put the files from the last sort back where they were
    Undo {
        /// Which sort to undo
        #[arg(short, long, value_enum)]
        mode: Mode,
    },
    /// Inspect and edit the keyword dictionaries
    Keywords {
        #[arg(short, long, value_enum)]
        mode: Mode,
        #[command(subcommand)]
        action: KeywordAction,
    },
}

#[derive(Subcommand)]
enum KeywordAction {
    /// Print every category with its keywords
    Show,
    /// Add an empty category
    AddCategory { name: String },
    /// Remove a category (protected categories refuse)
    RemoveCategory { name: String },
    /// Add a custom keyword to a category
    Add { category: String, word: String },
    /// Remove a custom keyword from a category
    Remove { category: String, word: String },
    /// Drop all custom keywords
    Restore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "preset_sorter=info,sorter_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let engine = SorterEngine::new(EnginePaths::in_dir(&state_dir(cli.state_dir)?));

    match cli.command {
        Commands::Scan {
            path,
            mode,
            no_intelligence,
            json,
        } => {
            let items = scan(&engine, &path, mode, !no_intelligence).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_scan_table(&items);
            }
        }
        Commands::Sort {
            path,
            mode,
            key,
            notes,
            bpm_min,
            bpm_max,
            no_intelligence,
        } => {
            let items = scan(&engine, &path, mode, !no_intelligence).await?;
            let key_filter = key_filter(key, notes);
            let bpm_range = BpmRange {
                min: bpm_min,
                max: bpm_max,
            };
            let outcome = match mode {
                Mode::Presets => {
                    engine
                        .sort_presets(&path, &items, &key_filter, &bpm_range, progress_printer())
                        .await?
                }
                Mode::Samples => {
                    engine
                        .sort_samples(&path, &items, &key_filter, &bpm_range, progress_printer())
                        .await?
                }
            };
            finish_progress();
            println!(
                "Moved {} file(s) into {}",
                outcome.moved,
                outcome.sort_root.display()
            );
        }
        Commands::Undo { mode } => {
            let outcome = match mode {
                Mode::Presets => engine.undo_last_preset_sort().await?,
                Mode::Samples => engine.undo_last_sample_sort().await?,
            };
            if outcome.restored == 0 {
                println!("Nothing to undo");
            } else {
                println!(
                    "Restored {} file(s) to {}",
                    outcome.restored,
                    outcome
                        .source_folder
                        .map_or_else(|| "their original folders".to_string(), |p| p
                            .display()
                            .to_string())
                );
            }
        }
        Commands::Keywords { mode, action } => run_keyword_action(&engine, mode.into(), action)?,
    }

    Ok(())
}

fn state_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let base = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(base.join("preset-sorter"))
}

async fn scan(
    engine: &SorterEngine,
    path: &std::path::Path,
    mode: Mode,
    use_intelligence: bool,
) -> anyhow::Result<Vec<ScanItem>> {
    let items = match mode {
        Mode::Presets => engine.scan_presets(path, progress_printer()).await?,
        Mode::Samples => {
            engine
                .scan_samples(path, use_intelligence, progress_printer())
                .await?
        }
    };
    finish_progress();
    tracing::info!("Scanned {} file(s)", items.len());
    Ok(items)
}

fn key_filter(choice: KeyChoice, notes: Vec<String>) -> KeyFilter {
    let mode = match choice {
        KeyChoice::All => KeyFilterMode::All,
        KeyChoice::Major => KeyFilterMode::Major,
        KeyChoice::Minor => KeyFilterMode::Minor,
        KeyChoice::Notes => KeyFilterMode::Notes,
    };
    KeyFilter { mode, notes }
}

/// Percentage printer that rewrites a single stderr line
fn progress_printer() -> impl FnMut(u8) {
    let mut last = None;
    move |percent| {
        if last != Some(percent) {
            last = Some(percent);
            eprint!("\r{percent:>3}%");
            let _ = std::io::stderr().flush();
        }
    }
}

fn finish_progress() {
    eprintln!();
}

fn print_scan_table(items: &[ScanItem]) {
    for item in items {
        let mut extras = Vec::new();
        if let Some(bpm) = item.metadata.bpm {
            extras.push(format!("{bpm} bpm"));
        }
        if let Some(key) = &item.metadata.key {
            extras.push(key.clone());
        }
        if let Some(plugin) = &item.plugin_name {
            extras.push(plugin.clone());
        }
        if item.is_duplicate() {
            extras.push("duplicate".to_string());
        }
        let extras = if extras.is_empty() {
            String::new()
        } else {
            format!("  [{}]", extras.join(", "))
        };
        println!(
            "{:>3}%  {:<12} {}{extras}",
            item.confidence, item.category, item.file_name
        );
    }
    println!("{} file(s)", items.len());
}

fn run_keyword_action(
    engine: &SorterEngine,
    mode: SortMode,
    action: KeywordAction,
) -> anyhow::Result<()> {
    match action {
        KeywordAction::Show => {
            let dictionary = engine.dictionary(mode);
            for category in &dictionary.categories {
                let mut words: Vec<&str> = category.all_words().collect();
                words.sort_unstable();
                let protected = if dictionary.meta.protected.contains(&category.name) {
                    " (protected)"
                } else {
                    ""
                };
                println!("{}{protected}: {}", category.name, words.join(", "));
            }
        }
        KeywordAction::AddCategory { name } => {
            let mut dictionary = engine.dictionary(mode);
            dictionary.add_category(name.clone())?;
            engine.save_dictionary(mode, &dictionary)?;
            println!("Added category {name}");
        }
        KeywordAction::RemoveCategory { name } => {
            let mut dictionary = engine.dictionary(mode);
            dictionary.remove_category(&name)?;
            engine.save_dictionary(mode, &dictionary)?;
            println!("Removed category {name}");
        }
        KeywordAction::Add { category, word } => {
            let mut dictionary = engine.dictionary(mode);
            dictionary.add_custom_keyword(&category, word.clone())?;
            engine.save_dictionary(mode, &dictionary)?;
            println!("Added \"{word}\" to {category}");
        }
        KeywordAction::Remove { category, word } => {
            let mut dictionary = engine.dictionary(mode);
            dictionary.remove_custom_keyword(&category, &word)?;
            engine.save_dictionary(mode, &dictionary)?;
            println!("Removed \"{word}\" from {category}");
        }
        KeywordAction::Restore => {
            engine.restore_default_keywords(mode)?;
            println!("Custom keywords cleared");
        }
    }
    Ok(())
}
