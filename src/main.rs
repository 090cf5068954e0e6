use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use colored::Colorize;

use tunesync::{cli, config, error, providers::Platform};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move playlists from one platform to another
    Move(MoveOptions),

    /// Show the user's playlists on a platform
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(group = ArgGroup::new("selection").required(true).multiple(false))]
pub struct MoveOptions {
    /// Source platform
    #[clap(short, long, value_enum)]
    pub source: Platform,

    /// Destination platform
    #[clap(short, long, value_enum)]
    pub destination: Platform,

    /// Move the single playlist with this name
    #[clap(short, long, group = "selection")]
    pub playlist: Option<String>,

    /// Move every playlist named in this file, one name per line
    #[clap(short, long, group = "selection")]
    pub file: Option<String>,

    /// Move all playlists
    #[clap(short, long, group = "selection")]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Platform whose playlists to show
    #[clap(short, long, value_enum)]
    pub source: Platform,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    // A user interrupt aborts the whole run immediately; partially moved
    // playlists are picked up again by the delta on the next invocation.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n[{}] Operation cancelled by user.", "!".yellow().bold());
            std::process::exit(0);
        }
    });

    let cli = Cli::parse();

    match cli.command {
        Command::Move(opt) => {
            if let Some(name) = opt.playlist {
                cli::sync_playlist(opt.source, opt.destination, name).await
            } else if let Some(path) = opt.file {
                cli::sync_file(opt.source, opt.destination, path).await
            } else {
                cli::sync_all(opt.source, opt.destination).await
            }
        }

        Command::Playlists(opt) => cli::playlists(opt.source).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
