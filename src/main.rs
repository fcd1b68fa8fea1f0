mod error;
mod prompt;
mod run;

use crate::error::{ErrorKind, Result};
use crate::prompt::{INPUT_QUESTION, OUTPUT_QUESTION, Pause};
use clap::Parser;
use exn::ResultExt;
use mapdef_config::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "mapdef")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database folder to summarise; asked for when omitted
    input: Option<PathBuf>,

    /// Folder the reports are written to; asked for when omitted
    output: Option<PathBuf>,

    /// Configuration file replacing the per-user one (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Abort on a malformed map descriptor instead of skipping the map
    #[arg(long)]
    strict: bool,

    /// Exit without waiting for ENTER
    #[arg(long)]
    no_pause: bool,

    /// More logging; repeat for more detail. `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let pause = Pause::new(!cli.no_pause);
    let code = match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            println!("{}", err.user_message());
            ExitCode::FAILURE
        },
    };
    pause.wait(&mut std::io::stdin().lock(), &mut std::io::stdout());
    code
}

fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if cli.strict {
        config.parse.strict = true;
    }
    tracing::debug!(?config, "Configuration loaded");

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    let input = prompt::resolve_path(cli.input, INPUT_QUESTION, &mut stdin, &mut stdout)?;
    let output = prompt::resolve_path(cli.output, OUTPUT_QUESTION, &mut stdin, &mut stdout)?;
    drop(stdin);

    let outcome = run::run(&config, &input, &output, &mut stdout)?;
    tracing::info!(?outcome, "Finished");
    Ok(())
}
