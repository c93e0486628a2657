use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodic::{
    cli,
    config::{self, Config, RecommendMode},
    error,
};

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
    /// Run the relay server
    Serve(ServeOptions),

    /// List the known moods and what they translate to
    Moods,

    /// Show the Spotify parameters for a mood selection
    Translate(TranslateOptions),

    /// Ask Spotify for recommendations with an existing access token
    Recommend(RecommendOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (overrides SERVER_ADDRESS)
    #[clap(long)]
    pub addr: Option<String>,

    /// Open the login page in the browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TranslateOptions {
    /// Mood label; can be repeated
    #[clap(long = "mood", required = true, action = ArgAction::Append, num_args = 1)]
    pub moods: Vec<String>,

    /// Language label
    #[clap(long)]
    pub language: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Spotify access token
    #[clap(long, env = "SPOTIFY_ACCESS_TOKEN")]
    pub token: String,

    /// Mood label; can be repeated
    #[clap(long = "mood", required = true, action = ArgAction::Append, num_args = 1)]
    pub moods: Vec<String>,

    /// Language label
    #[clap(long)]
    pub language: Option<String>,

    /// Proxy policy (search, recommendations, playlists); defaults to MOODIC_RECOMMEND_MODE
    #[clap(long)]
    pub mode: Option<RecommendMode>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            let mut config = load_config();
            if let Some(addr) = opt.addr {
                config.server_addr = addr;
            }
            cli::serve(config, opt.open).await
        }
        Command::Moods => cli::moods(),
        Command::Translate(opt) => cli::translate(opt.moods, opt.language),
        Command::Recommend(opt) => {
            cli::recommend(load_config(), opt.token, opt.moods, opt.language, opt.mode).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
