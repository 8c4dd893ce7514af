//! Command-line front end for the pencilmark scanner.
//!
//! Loads a puzzle document, then runs a single step, a timed scan, or a
//! visibility or highlight query, and prints the result.
//!
//! # Usage
//!
//! ```sh
//! pencilmark puzzle.json step --seed r1c1
//! pencilmark --speed fast puzzle.json scan --max-steps 20
//! pencilmark puzzle.json seen --cell r5c5
//! pencilmark puzzle.json highlight --highlight tuples --cell r1c1
//! ```
//!
//! Set `RUST_LOG=debug` to follow the scanner's eliminations.

use std::{fs, path::Path, process, thread};

use clap::Parser as _;
use pencilmark_core::{Position, PuzzleDocument};
use pencilmark_scanner::{ScannerSettings, Session, TimerQueue, visibility};

use crate::{
    cli::{Args, Command},
    error::CliError,
};

mod cli;
mod error;
mod render;

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let text = fs::read_to_string(&args.puzzle).map_err(CliError::io(&args.puzzle))?;
    let mut document = PuzzleDocument::from_json(&text)?;
    let mut session = Session::from_document(document.clone())?;
    session.configure(load_settings(args)?);
    log::debug!("loaded {}", args.puzzle.display());

    match &args.command {
        Command::Step { seed } => {
            let seed = seed
                .as_deref()
                .map(|s| parse_cell(&session, s))
                .transpose()?;
            step(&mut session, seed);
        }
        Command::Scan { max_steps } => scan(&mut session, *max_steps),
        Command::Seen { cell } => {
            let pos = parse_cell(&session, cell)?;
            let seen = visibility::seen_cells(session.rules(), session.settings(), pos);
            print!("{}", render::seen(&seen));
            return Ok(());
        }
        Command::Highlight { highlight, cells } => {
            let selection = cells
                .iter()
                .map(|s| parse_cell(&session, s))
                .collect::<Result<Vec<_>, _>>()?;
            session.configure(session.settings().with_highlight((*highlight).into()));
            session.select(selection);
            println!("{}", render::cells(session.highlighted().get()));
            return Ok(());
        }
    }

    if let Some(output) = &args.output {
        document.set_grid(session.grid());
        write(output, &document.to_json()?)?;
    }
    Ok(())
}

fn load_settings(args: &Args) -> Result<ScannerSettings, CliError> {
    let settings = match &args.settings {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(CliError::io(path))?;
            serde_json::from_str(&text)?
        }
        None => ScannerSettings::default(),
    };
    Ok(args.apply(settings))
}

fn write(path: &Path, text: &str) -> Result<(), CliError> {
    fs::write(path, text).map_err(CliError::io(path))
}

/// Parses a cell in playable coordinates, so `r1c1` is the top-left
/// playable cell even when the grid has margins.
fn parse_cell(session: &Session, text: &str) -> Result<Position, CliError> {
    let pos: Position = text.parse()?;
    session
        .rules()
        .dimensions()
        .from_playable(pos.row, pos.column)
        .ok_or(CliError::OutOfBounds { pos })
}

fn step(session: &mut Session, seed: Option<Position>) {
    if !session.step(seed) {
        println!("no change");
        return;
    }
    if let Some(change) = session.last_change() {
        match change.committed {
            Some(digit) => println!("{} = {digit}", change.cell),
            None => println!("{}: marks updated", change.cell),
        }
        if !change.highlights.is_empty() {
            println!("because of {}", render::cells(&change.highlights));
        }
    }
    print!("{}", render::grid(session.rules(), session.grid()));
}

fn scan(session: &mut Session, max_steps: Option<usize>) {
    let rules = session.rules().clone();
    let printer = session.grid_store_mut().subscribe(move |grid| {
        println!("{}", render::grid(&rules, grid));
    });

    let start = session.grid_store().revision();
    let limit = max_steps.map(|max| u64::try_from(max).unwrap_or(u64::MAX));
    let reached = |session: &Session| {
        limit.is_some_and(|limit| session.grid_store().revision() - start >= limit)
    };

    let mut timers = TimerQueue::new();
    if !reached(session) {
        session.start_scan(&mut timers);
    }
    while !reached(session) && timers.run_next_with(session, thread::sleep) {}
    session.stop_scan();
    session.grid_store_mut().unsubscribe(printer);

    let steps = session.grid_store().revision() - start;
    log::info!("scan finished after {steps} steps");
    println!("{steps} cells changed");
}
