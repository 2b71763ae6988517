use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use textmask::app::{App, FieldOutcome};
use textmask::terminal::CrosstermTerminal;
use textmask::{MaskConfig, MaskEngine, parse_placeholder};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mask template: 9 digit, A letter, * digit or letter, ? any, \ escape
    #[arg(short, long, value_name = "MASK")]
    mask: String,

    /// Character shown in unfilled slots
    #[arg(short, long, value_name = "CHAR", default_value = " ", value_parser = parse_placeholder)]
    placeholder: char,

    /// Print only the user's input, without mask characters
    #[arg(short, long)]
    strip: bool,

    /// Edit a single masked field in the terminal
    #[arg(short, long)]
    interactive: bool,

    /// Increase log verbosity (repeatable); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = MaskConfig::new(&args.mask, args.placeholder);
    log::info!("mask {:?}, placeholder {:?}", config.mask, config.placeholder);

    if args.interactive {
        run_interactive(config, args.strip)
    } else {
        run_batch(config, args.strip)
    }
}

/// Format each stdin line as if it had been typed into an empty field.
fn run_batch(config: MaskConfig, strip: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for (n, line) in stdin.lock().lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of stdin", n + 1))?;
        let engine = MaskEngine::with_text(config.clone(), &line);
        writeln!(stdout, "{}", engine.value(strip))?;
    }
    Ok(())
}

fn run_interactive(config: MaskConfig, strip: bool) -> Result<()> {
    let mut terminal = CrosstermTerminal::new();
    let mut app = App::new(MaskEngine::new(config));
    match app.run(&mut terminal)? {
        FieldOutcome::Accepted => {
            println!("{}", app.engine.value(strip));
            Ok(())
        }
        FieldOutcome::Cancelled => std::process::exit(1),
    }
}
