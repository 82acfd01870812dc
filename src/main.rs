use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use bandstosee::{cli, config, error};

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
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the bands list over HTTP (default)
    Serve(ServeOptions),

    /// Fetch the bands list once and print it
    Bands(BandsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct BandsOptions {
    /// Print JSON instead of a table
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_settings() -> config::Settings {
    match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    match cli.command {
        Some(Command::Bands(opt)) => cli::bands(load_settings(), opt.json).await,
        Some(Command::Serve(opt)) => {
            let mut settings = load_settings();
            if let Some(addr) = opt.addr {
                settings.server_addr = addr;
            }
            cli::serve(settings).await
        }
        None => cli::serve(load_settings()).await,
        Some(Command::Completions(_)) => {}
    }
}
