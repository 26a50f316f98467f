//! Command implementations.
//!
//! Each command opens a session over a [`FileStore`], applies its edit, and
//! saves explicitly. The history lives only for the process, so undo/redo
//! is a designer concern; the CLI surface is straight CRUD plus publish.

use anyhow::{bail, Context};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{MoveDirection, Mutation, MutationOutcome, SectionKind};
use pagecraft_workspace::{FileStore, Notification, Publisher, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

const DEFAULT_KEY: &str = "site";

#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Directory holding the persisted site document
    #[arg(long, default_value = ".pagecraft")]
    pub store_dir: PathBuf,

    /// Document key within the store
    #[arg(long, default_value = DEFAULT_KEY)]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Section kind tag (e.g. hero-1, banner, collection-grid)
    pub kind: String,

    /// Insert position (appends when omitted)
    #[arg(short, long)]
    pub position: Option<usize>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Section id
    pub id: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Section id
    pub id: String,

    /// Direction: up or down
    pub direction: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct DuplicateArgs {
    /// Section id
    pub id: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct SetTitleArgs {
    /// New page title
    pub title: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Publish endpoint URL
    #[arg(long)]
    pub endpoint: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

fn open_session(store: &StoreArgs) -> (Session, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let file_store = Arc::new(FileStore::new(&store.store_dir));
    (Session::open(file_store, store.key.clone(), tx), rx)
}

fn drain_notifications(rx: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(note) = rx.try_recv() {
        println!("{} {}", "note:".yellow(), note.message);
    }
}

pub fn init(args: InitArgs) -> anyhow::Result<()> {
    let (mut session, mut rx) = open_session(&args.store);
    session
        .save_now()
        .context("could not write the new site document")?;
    drain_notifications(&mut rx);

    println!(
        "{} site document at {}",
        "Created".green().bold(),
        args.store.store_dir.display()
    );
    Ok(())
}

pub fn show(args: ShowArgs) -> anyhow::Result<()> {
    let (session, _rx) = open_session(&args.store);
    let doc = session.editor().document();

    for page in &doc.pages {
        let marker = if page.id == doc.current_page_id {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} {} {}",
            marker,
            page.name.bold(),
            page.path.dimmed(),
            format!("({})", page.id).dimmed()
        );
        for section in &page.sections {
            println!(
                "    {} {} {}",
                section.kind.tag().cyan(),
                section.name,
                format!("({})", section.id).dimmed()
            );
        }
    }
    Ok(())
}

async fn apply_and_save(
    args: &StoreArgs,
    mutation: Mutation,
) -> anyhow::Result<MutationOutcome> {
    let (mut session, mut rx) = open_session(args);
    let outcome = session.apply(mutation)?;
    if matches!(outcome, MutationOutcome::Applied { .. }) {
        session.save_now()?;
    }
    drain_notifications(&mut rx);
    Ok(outcome)
}

pub async fn add(args: AddArgs) -> anyhow::Result<()> {
    if SectionKind::parse(&args.kind).is_none() {
        let known = SectionKind::ALL
            .iter()
            .map(|k| k.tag())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("unknown section kind '{}' (known: {})", args.kind, known);
    }

    let outcome = apply_and_save(
        &args.store,
        Mutation::AddSection {
            kind: args.kind.clone(),
            name: None,
            position: args.position,
            patch: None,
        },
    )
    .await?;

    if let MutationOutcome::Applied {
        created_id: Some(id),
        ..
    } = outcome
    {
        println!("{} {} section {}", "Added".green().bold(), args.kind, id);
    }
    Ok(())
}

pub async fn remove(args: RemoveArgs) -> anyhow::Result<()> {
    let outcome = apply_and_save(
        &args.store,
        Mutation::RemoveSection {
            section_id: args.id.clone(),
        },
    )
    .await?;

    match outcome {
        MutationOutcome::Applied { .. } => {
            println!("{} section {}", "Removed".green().bold(), args.id);
        }
        MutationOutcome::Noop { reason } => {
            println!("{} {}", "Nothing to do:".yellow(), reason);
        }
    }
    Ok(())
}

pub async fn move_section(args: MoveArgs) -> anyhow::Result<()> {
    let direction = match args.direction.as_str() {
        "up" => MoveDirection::Up,
        "down" => MoveDirection::Down,
        other => bail!("direction must be 'up' or 'down', got '{other}'"),
    };

    let outcome = apply_and_save(
        &args.store,
        Mutation::MoveSection {
            section_id: args.id.clone(),
            direction,
        },
    )
    .await?;

    match outcome {
        MutationOutcome::Applied { .. } => {
            println!("{} section {}", "Moved".green().bold(), args.id);
        }
        MutationOutcome::Noop { reason } => {
            println!("{} {}", "Nothing to do:".yellow(), reason);
        }
    }
    Ok(())
}

pub async fn duplicate(args: DuplicateArgs) -> anyhow::Result<()> {
    let outcome = apply_and_save(
        &args.store,
        Mutation::DuplicateSection {
            section_id: args.id.clone(),
        },
    )
    .await?;

    if let MutationOutcome::Applied {
        created_id: Some(id),
        ..
    } = outcome
    {
        println!("{} {} as {}", "Duplicated".green().bold(), args.id, id);
    }
    Ok(())
}

pub async fn set_title(args: SetTitleArgs) -> anyhow::Result<()> {
    let (mut session, mut rx) = open_session(&args.store);
    let page_id = session.editor().current_page()?.id.clone();

    session.apply(Mutation::UpdatePageSettings {
        page_id,
        title: Some(args.title.clone()),
        description: None,
    })?;
    session.save_now()?;
    drain_notifications(&mut rx);

    println!("{} page title to '{}'", "Set".green().bold(), args.title);
    Ok(())
}

pub async fn publish(args: PublishArgs) -> anyhow::Result<()> {
    let (session, mut rx) = open_session(&args.store);
    let session = session.with_publisher(Publisher::new(args.endpoint.clone()));

    session.publish().await;
    drain_notifications(&mut rx);
    Ok(())
}
