use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sapper_core::{Frame, InputEdgeTracker, Registry, Session};

mod config;
mod render;
mod script;

use config::Config;
use render::{Format, TerminalRenderer};
use script::{ScriptFrame, parse_script};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with the seed and difficulty presets
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Input script, one frame per line, read from stdin when absent
    #[arg(long)]
    script: Option<PathBuf>,

    /// How frames are printed
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    /// Show the content of hidden cells
    #[arg(long)]
    reveal_all: bool,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(verbose.tracing_level_filter())
        .init();
}

fn read_script(path: Option<&PathBuf>) -> anyhow::Result<Vec<ScriptFrame>> {
    let source = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read script {}", path.display()))?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("could not read script from stdin")?;
            source
        }
    };
    Ok(parse_script(&source)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let difficulties = config.difficulties().context("invalid difficulty table")?;
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);

    let frames = read_script(args.script.as_ref())?;
    log::debug!("{} frames scripted", frames.len());

    let mut session = Session::new(difficulties, seed);
    let mut registry = Registry::new();
    sapper_core::start(&mut registry)?;

    let mut input = InputEdgeTracker::default();
    let mut renderer = TerminalRenderer::new(args.format, args.reveal_all);
    let mut out = io::stdout().lock();

    for (index, frame) in frames.iter().enumerate() {
        input.refresh(frame.pressed);
        registry
            .update(&mut session, Frame::new(&input, frame.pointer), &mut renderer)
            .with_context(|| format!("update failed on frame {}", index))?;
        renderer.present(&mut out)?;

        if session.quit_requested() {
            log::info!("quit after {} frames", index + 1);
            return Ok(());
        }
    }
    log::info!("script ended");
    Ok(())
}
