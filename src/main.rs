use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use log::LevelFilter;

use radiosync::{cli, config, error};

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
    /// Print request details
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy aired tracks into a playlist on every Tidal account
    Sync(SyncOptions),

    /// Show aired tracks without touching Tidal
    History(HistoryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Start of the history window: Unix timestamp, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (UTC).
    /// Defaults to 24 hours ago.
    #[clap(long)]
    from: Option<String>,

    /// Number of tracks to copy
    #[clap(long, default_value_t = 100)]
    count: usize,

    /// Playlist title. Defaults to "<station> <start time>"
    #[clap(long)]
    name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Start of the history window (same formats as for sync)
    #[clap(long)]
    from: Option<String>,

    /// Number of tracks to show
    #[clap(long, default_value_t = 10)]
    count: usize,
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

    let mut clog = colog::default_builder();
    clog.filter(None, LevelFilter::Warn);
    if cli.verbose {
        clog.filter(Some("radiosync"), LevelFilter::Debug);
    }
    clog.init();

    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let result = match cli.command {
        Command::Sync(opt) => cli::sync(&settings, opt.from, opt.count, opt.name).await,
        Command::History(opt) => cli::history(&settings, opt.from, opt.count).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
