//! Terminal falling-block runner (default binary).
//!
//! Owns the timing loop: crossterm input is polled with a timeout so gravity
//! ticks land on schedule, and every applied event goes through the optional
//! session trace.

use std::env;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::core::GameState;
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::term::{GameView, TerminalRenderer, Viewport};
use tui_blockfall::trace::TraceWriter;
use tui_blockfall::types::{GameEvent, TICK_MS};

const SEED_ENV: &str = "BLOCKFALL_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunConfig {
    seed: u32,
}

fn parse_args(args: &[String], default_seed: u32) -> Result<RunConfig> {
    let mut seed = default_seed;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            other => {
                bail!("unknown argument: {} (usage: tui-blockfall [--seed N])", other);
            }
        }
        i += 1;
    }
    Ok(RunConfig { seed })
}

fn seed_from_env() -> Result<u32> {
    match env::var(SEED_ENV) {
        Ok(v) => v
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("invalid {} value: {}", SEED_ENV, v)),
        Err(_) => Ok(0),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = parse_args(&args, seed_from_env()?)?;
    let mut trace = TraceWriter::from_env(config.seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, trace.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: RunConfig,
    mut trace: Option<&mut TraceWriter>,
) -> Result<()> {
    let mut state = GameState::new(config.seed);
    let view = GameView::default();

    let tick = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let frame = view.render(&state, Viewport::new(w, h));
        term.draw(&frame)?;

        // Input with timeout until the next gravity tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key)
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                {
                    // Terminal auto-repeat stands in for a key-repeat handler.
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(game_event) = handle_key_event(key) {
                        state = apply_traced(&state, game_event, trace.as_deref_mut())?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            state = apply_traced(&state, GameEvent::Tick, trace.as_deref_mut())?;
        }
    }
}

fn apply_traced(
    state: &GameState,
    event: GameEvent,
    trace: Option<&mut TraceWriter>,
) -> Result<GameState> {
    let next = state.apply(event);
    if let Some(trace) = trace {
        trace.record(event, &next)?;
    }
    Ok(next)
}
