use crate::side_channel::{Artifact, copy_to_clipboard, write_artifacts};
use crate::works::{JsonDirStore, Work, WorkStore as _};
use anyhow::{Error, anyhow};
use clap::{Args, Parser, Subcommand, value_parser};
use exporter::{ArtifactPair, ExportConfig, ProtectionLevel, export_document};
use log::{error, info, warn};
use poison::WordSource;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;

mod side_channel;
mod works;

#[derive(Parser)]
#[command(name = "workskin", version)]
#[command(about = "Export editor documents as cleaned HTML plus a skin stylesheet")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export an HTML file or a saved work
    Export(ExportArgs),
    /// Manage saved works
    Works {
        /// Work store directory (overrides WORKSKIN_WORKS_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(subcommand)]
        action: WorksAction,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Editor HTML to export
    #[arg(required_unless_present = "work")]
    input: Option<PathBuf>,
    /// Export a saved work instead of a file
    #[arg(long, conflicts_with = "input")]
    work: Option<String>,
    /// Protection level, 0 (off) to 3 (maximum)
    #[arg(short, long, default_value_t = 0, value_parser = value_parser!(u8).range(0..=3))]
    level: u8,
    /// Output directory (overrides WORKSKIN_OUT_DIR)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Word list URL or path (overrides WORKSKIN_WORDS_URL)
    #[arg(long)]
    words: Option<String>,
    /// Copy one artifact to the clipboard after exporting
    #[arg(long, value_enum)]
    copy: Option<Artifact>,
    /// Write only one artifact
    #[arg(long, value_enum)]
    only: Option<Artifact>,
}

#[derive(Subcommand)]
enum WorksAction {
    /// List saved works, most recently updated first
    List,
    /// Print the content of a work
    Show { id: String },
    /// Save an HTML file as a new work, or update an existing one
    Save {
        name: String,
        input: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a work
    Delete { id: String },
}

pub fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = ExportConfig::from_env();
    match cli.command {
        Command::Export(args) => {
            let runtime = Runtime::new()?;
            runtime.block_on(export(args, config))
        }
        Command::Works { dir, action } => {
            if let Some(dir) = dir {
                config.works_dir = dir;
            }
            manage_works(&JsonDirStore::new(config.works_dir), action)
        }
    }
}

async fn export(args: ExportArgs, mut config: ExportConfig) -> Result<(), Error> {
    if let Some(words) = args.words {
        config.words_location = words;
    }
    if let Some(out) = args.out {
        config.out_dir = out;
    }
    let html = match (args.input, args.work) {
        (Some(path), _) => fs::read_to_string(&path)
            .map_err(|err| anyhow!("Failed to read {}: {err}", path.display()))?,
        (None, Some(id)) => {
            let store = JsonDirStore::new(config.works_dir.clone());
            store
                .get(&id)?
                .ok_or_else(|| anyhow!("No saved work with id {id}"))?
                .content
        }
        (None, None) => return Err(anyhow!("Nothing to export")),
    };

    let level = ProtectionLevel::try_from(args.level)?;
    info!("Protection level {level}: {}", level.description());
    if let Some(warning) = level.warning() {
        warn!("{warning}");
    }

    let words = config.word_source()?;
    let pair = export_with_fallback(&html, level, &words).await?;
    write_artifacts(&config.out_dir, &pair, args.only)?;
    if let Some(artifact) = args.copy {
        copy_to_clipboard(artifact.text(&pair))?;
        info!("Copied {} to the clipboard", artifact.file_name());
    }
    Ok(())
}

/// Export at `level`; if poisoning fails, report it and export unprotected.
async fn export_with_fallback(
    html: &str,
    level: ProtectionLevel,
    words: &dyn WordSource,
) -> Result<ArtifactPair, Error> {
    match export_document(html, level, words).await {
        Ok(pair) => Ok(pair),
        Err(err) => {
            error!("Protection failed, exporting without it: {err:#}");
            export_document(html, ProtectionLevel::Off, words).await
        }
    }
}

#[allow(clippy::print_stdout, reason = "Work listings are the command's output")]
fn manage_works(store: &JsonDirStore, action: WorksAction) -> Result<(), Error> {
    match action {
        WorksAction::List => {
            for work in store.list()? {
                println!("{}\t{}\t{}", work.id, work.updated_at, work.name);
            }
        }
        WorksAction::Show { id } => {
            let work = store
                .get(&id)?
                .ok_or_else(|| anyhow!("No saved work with id {id}"))?;
            println!("{}", work.content);
        }
        WorksAction::Save { name, input, id } => {
            let content = fs::read_to_string(&input)
                .map_err(|err| anyhow!("Failed to read {}: {err}", input.display()))?;
            let existing = match &id {
                Some(id) => store.get(id)?,
                None => None,
            };
            let work = match existing {
                Some(mut work) => {
                    work.name = name;
                    work.update_content(content)?;
                    work
                }
                None => {
                    let mut work = Work::new(name, content)?;
                    if let Some(id) = id {
                        work.id = id;
                    }
                    work
                }
            };
            store.put(&work)?;
            info!("Saved work {} to {}", work.id, store.dir().display());
            println!("{}", work.id);
        }
        WorksAction::Delete { id } => {
            if store.delete(&id)? {
                info!("Deleted work {id}");
            } else {
                warn!("No saved work with id {id}");
            }
        }
    }
    Ok(())
}
