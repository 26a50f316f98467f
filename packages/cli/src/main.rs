mod commands;

use clap::{Parser, Subcommand};
use commands::{
    add, duplicate, init, move_section, publish, remove, set_title, show, AddArgs, DuplicateArgs,
    InitArgs, MoveArgs, PublishArgs, RemoveArgs, SetTitleArgs, ShowArgs,
};

/// Pagecraft CLI - storefront page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new site document
    Init(InitArgs),

    /// Print the page and section tree
    Show(ShowArgs),

    /// Add a section to the current page
    Add(AddArgs),

    /// Remove a section from the current page
    Remove(RemoveArgs),

    /// Move a section up or down
    Move(MoveArgs),

    /// Duplicate a section
    Duplicate(DuplicateArgs),

    /// Set the current page's title
    SetTitle(SetTitleArgs),

    /// Publish the site to a remote endpoint
    Publish(PublishArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init(args) => init(args),
        Command::Show(args) => show(args),
        Command::Add(args) => add(args).await,
        Command::Remove(args) => remove(args).await,
        Command::Move(args) => move_section(args).await,
        Command::Duplicate(args) => duplicate(args).await,
        Command::SetTitle(args) => set_title(args).await,
        Command::Publish(args) => publish(args).await,
    }
}
