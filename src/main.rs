use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discotrack::{cli, config, error};

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
    /// Manage the local catalog database
    Db(DbOptions),

    /// Synchronize the artist's catalog from Spotify
    Sync(SyncOptions),

    /// List the cached catalog
    List,

    /// Generate the discography HTML page
    Discography(DiscographyOptions),

    /// Generate a story image for a track
    Story(StoryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage the local catalog database")]
pub struct DbOptions {
    #[command(subcommand)]
    pub command: DbSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DbSubcommand {
    /// Create the database schema if absent
    Init,

    /// Drop and recreate all tables
    Recreate,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Artist ID to synchronize (defaults to SPOTIFY_ARTIST_ID)
    #[clap(long)]
    pub artist: Option<String>,

    /// Show saved records and per-track progress
    #[clap(long)]
    pub verbose: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscographyOptions {
    /// Output file (default: discography.html)
    #[clap(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct StoryOptions {
    /// Track title to render
    pub title: String,

    /// Layout configuration file (TOML)
    #[clap(long)]
    pub layout: Option<PathBuf>,

    /// Directory for the generated image (default: current directory)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
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

    let cli = Cli::parse();

    match cli.command {
        Command::Db(opt) => match opt.command {
            DbSubcommand::Init => cli::init_db().await,
            DbSubcommand::Recreate => cli::recreate_db().await,
        },

        Command::Sync(opt) => cli::run_sync(opt.artist, opt.verbose).await,

        Command::List => cli::list().await,

        Command::Discography(opt) => cli::discography(opt.output).await,

        Command::Story(opt) => cli::story(opt.title, opt.layout, opt.output_dir).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
