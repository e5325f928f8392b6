use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use asterm::{Config, Console};

/// Polls the keyboard and echoes keys as they are typed. 'q' quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with console settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not echo keys after reading them
    #[arg(long)]
    no_echo: bool,

    /// Polling interval in milliseconds
    #[arg(long, default_value_t = 50)]
    interval: u64,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_ref())?;
    if args.no_echo {
        config = config.echo(false);
    }

    let mut console = Console::stdio(config).context("stdin must be a terminal")?;
    info!(?config, "demo starting");

    write!(console.output(), "Press any key to start: ")?;
    let first = console.read_one_char()?;
    info!(key = first, "started");

    println!("Polling every {} ms, type 'q' to quit", args.interval);
    let mut ticks = 0u64;
    loop {
        match console.try_read_char()? {
            Some(b'q') => break,
            Some(_) => ticks = 0,
            None => {
                ticks += 1;
                thread::sleep(Duration::from_millis(args.interval));
            }
        }
    }

    println!("Exiting after {ticks} idle polls");
    Ok(())
}
