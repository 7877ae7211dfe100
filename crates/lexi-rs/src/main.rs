//! Command-line entry point for Lexi.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lexi_rs::config::{LayeredConfigOptions, LexiConfig};
use lexi_rs::core::{
    DraftField, EntryDraft, EntryId, ListStatus, LoadState, SortDirection, SortKey,
    VocabularyList,
};
use lexi_rs::tui::TuiConfig;
use lexi_rs::{build_list, entry_lines, init_logging, load_config, table_lines};
use log::{debug, info};
use std::path::PathBuf;

/// Manage a personal Bangla/English vocabulary list.
#[derive(Parser, Debug)]
#[command(name = "lexi", version)]
struct Cli {
    /// Extra lexi.json5 applied on top of the discovered layers
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Work against the local snapshot instead of the remote store
    #[arg(long, global = true)]
    offline: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive terminal UI (default)
    Tui,
    /// Print the vocabulary table
    List(ListArgs),
    /// Print one entry in full
    Show { id: String },
    /// Add a new entry
    Add(AddArgs),
    /// Delete an entry by id
    Delete {
        id: String,
        /// Only remove the entry from the local snapshot
        #[arg(long)]
        local_only: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive filter on word and meanings
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
    /// Emit the entries as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    word: String,
    #[arg(long)]
    bangla: Option<String>,
    #[arg(long)]
    english: Option<String>,
    #[arg(long)]
    example: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    Word,
    CreatedAt,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Word => SortKey::Word,
            SortArg::CreatedAt => SortKey::CreatedAt,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => SortDirection::Asc,
            OrderArg::Desc => SortDirection::Desc,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    info!(
        "starting lexi (config_set={}, offline={})",
        cli.config.is_some(),
        cli.offline
    );

    let config = resolve_config(cli.config.as_ref())?;
    let mut list = build_list(&config, cli.offline).context("failed to set up store")?;
    let store_label = if cli.offline {
        "offline".to_string()
    } else {
        list.store().name().to_string()
    };

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => lexi_rs::tui::run(list, TuiConfig { store_label }).await,
        Command::List(args) => {
            load_or_fail(&mut list).await?;
            print_list(&mut list, args)
        }
        Command::Show { id } => {
            load_or_fail(&mut list).await?;
            let id = EntryId::new(id);
            if !list.select_entry(&id) {
                bail!("no vocabulary with id {id}");
            }
            if let Some(entry) = list.selected_entry() {
                for line in entry_lines(entry) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Command::Add(args) => {
            load_or_fail(&mut list).await?;
            let mut draft = draft_from(args);
            let entry = list
                .create_entry(&mut draft)
                .await
                .context("failed to add vocabulary")?;
            println!("Added \"{}\" to vocabulary (id={})", entry.word, entry.id);
            Ok(())
        }
        Command::Delete { id, local_only } => {
            load_or_fail(&mut list).await?;
            let id = EntryId::new(id);
            let removed = if local_only {
                list.delete_local(&id)
            } else {
                list.delete_entry(&id)
                    .await
                    .context("failed to delete vocabulary")?
            };
            match removed {
                Some(entry) => {
                    println!("Deleted \"{}\" (id={})", entry.word, entry.id);
                    Ok(())
                }
                None => bail!("no vocabulary with id {id}"),
            }
        }
    }
}

fn resolve_config(path: Option<&PathBuf>) -> anyhow::Result<LexiConfig> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = path {
        info!("adding runtime config layer (path={})", path.display());
        options = options.with_runtime_path(path);
    }
    load_config(options).context("failed to load config")
}

/// Run the load path and fail when nothing could be shown.
async fn load_or_fail(list: &mut VocabularyList) -> anyhow::Result<()> {
    list.load().await;
    if let LoadState::Unavailable { message } = list.load_state() {
        bail!("failed to load vocabularies: {message}");
    }
    if let Some(toast) = list.toast() {
        eprintln!("warning: {} (showing cached entries)", toast.message);
    }
    list.dismiss_toast();
    Ok(())
}

fn print_list(list: &mut VocabularyList, args: ListArgs) -> anyhow::Result<()> {
    if let Some(term) = args.search {
        list.set_search_term(term);
    }
    if let Some(sort) = args.sort {
        list.set_sort(sort.into(), Some(args.order.map_or(SortDirection::Asc, Into::into)));
    } else if let Some(order) = args.order {
        let (key, _) = list.sort();
        list.set_sort(key, Some(order.into()));
    }
    let (key, direction) = list.sort();
    debug!("printing list (sort={key}, order={direction})");

    let visible = list.projection();
    if args.json {
        let json = serde_json::to_string_pretty(&visible).context("failed to encode entries")?;
        println!("{json}");
        return Ok(());
    }
    match list.status() {
        ListStatus::Empty => println!("No vocabularies yet"),
        ListStatus::NoMatches => println!("No vocabularies match \"{}\"", list.search_term()),
        ListStatus::Ready { shown, total } => {
            for line in table_lines(&visible) {
                println!("{line}");
            }
            println!();
            println!("Showing {shown} of {total} vocabularies");
        }
        ListStatus::Loading | ListStatus::Unavailable(_) => {}
    }
    Ok(())
}

fn draft_from(args: AddArgs) -> EntryDraft {
    let mut draft = EntryDraft::new();
    *draft.field_mut(DraftField::Word) = args.word;
    *draft.field_mut(DraftField::MeaningBangla) = args.bangla.unwrap_or_default();
    *draft.field_mut(DraftField::MeaningEnglish) = args.english.unwrap_or_default();
    *draft.field_mut(DraftField::ExampleSentence) = args.example.unwrap_or_default();
    draft
}
