/// Entry point: read a script, run it against a fresh world, then print the
/// resulting snapshot as JSON or replay it in the terminal.

mod config;
mod domain;
mod script;
mod sim;
mod ui;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use config::GameConfig;
use script::executor::Executor;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script file to run. Reads stdin when omitted or `-`.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Animate the path in the terminal instead of printing JSON.
    #[arg(long)]
    replay: bool,

    /// Pretty-print the JSON snapshot.
    #[arg(long)]
    pretty: bool,

    /// Config file to use instead of searching for `config.toml`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::load(),
    };
    debug!("config: {config:?}");

    let source = read_script(args.script.as_deref())?;
    let executor = Executor::new(&config);

    if args.replay {
        return replay(&executor.run(&source), &config);
    }

    let json = if args.pretty {
        executor.run(&source).to_json_pretty()
    } else {
        executor.run_json(&source)
    }
    .context("serializing snapshot")?;
    println!("{json}");
    Ok(())
}

fn read_script(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("reading script {}", p.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("reading script from stdin")?;
            Ok(source)
        }
    }
}

#[cfg(feature = "replay")]
fn replay(snapshot: &sim::snapshot::Snapshot, config: &GameConfig) -> Result<()> {
    use std::time::Duration;
    use ui::replay::Replay;

    let mut screen = Replay::new(config.grid.size);
    screen.init().context("terminal init failed")?;
    let result = screen.play(snapshot, Duration::from_millis(config.replay.step_delay_ms));
    // Always restore the terminal, even if playback failed.
    screen.cleanup().context("terminal cleanup failed")?;
    result.context("replay failed")
}

#[cfg(not(feature = "replay"))]
fn replay(_snapshot: &sim::snapshot::Snapshot, _config: &GameConfig) -> Result<()> {
    anyhow::bail!("built without the `replay` feature")
}
