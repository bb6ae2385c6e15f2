use anyhow::{Result, anyhow};
use clap::Parser;
use log::{info, warn};
use sspm_txt::{
    LoggingEngine, PlayArgs, Player, PointerEngine, default_engine, load_playback_notes,
    parse_delay, parse_screen_size,
};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

const FALLBACK_SCREEN: (i32, i32) = (1920, 1080);

fn main() -> Result<()> {
    env_logger::init();
    let args = PlayArgs::parse();
    let delay = parse_delay(args.delay_start)?;

    let screen = match args.screen.as_deref() {
        Some(s) => parse_screen_size(s)
            .ok_or_else(|| anyhow!("Invalid screen size '{}', expected e.g. 1920x1080..!", s))?,
        None => FALLBACK_SCREEN,
    };

    if args.dry_run {
        return preview(&args, screen);
    }

    run(default_engine(screen), &args, delay)
}

fn preview(args: &PlayArgs, screen: (i32, i32)) -> Result<()> {
    let player = Player::new(
        LoggingEngine::new(screen.0, screen.1),
        args.grid_size,
        args.verbose,
        Duration::ZERO,
    );
    player.load_notes(&load_playback_notes(&args.input, args.speed)?)?;

    info!("Previewing at most {} moves..!", args.dry_run_max);
    for (i, ev) in player
        .scheduled()?
        .iter()
        .take(args.dry_run_max)
        .enumerate()
    {
        info!(
            "Move {}: time_ms={:.3} pointer=({}, {})",
            i, ev.time_ms, ev.x, ev.y
        );
    }

    Ok(())
}

fn run<E: PointerEngine + 'static>(engine: E, args: &PlayArgs, delay: Duration) -> Result<()> {
    let player = Arc::new(Player::new(engine, args.grid_size, args.verbose, delay));
    let player_for_handler = Arc::clone(&player);

    ctrlc::set_handler(move || {
        warn!("Ctrl-C received, stopping playback..!");
        if player_for_handler.stop().is_err() {
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow!("Error setting Ctrl-C handler: {}", e))?;

    loop {
        info!("Loading notes from '{}'...", args.input.display());
        player.load_notes(&load_playback_notes(&args.input, args.speed)?)?;

        if !args.no_prompt && prompt("Press ENTER to start...")?.is_none() {
            return Ok(());
        }

        player.play(true)?;
        info!("Finished playback for '{}'..!", args.input.display());

        if args.no_prompt {
            return Ok(());
        }

        loop {
            let Some(answer) = prompt("Type R to restart, or Q to quit: ")? else {
                return Ok(());
            };

            match answer.trim().to_lowercase().as_str() {
                "r" | "restart" => {
                    info!("Restarting..!");
                    break;
                }
                "q" | "quit" => {
                    info!("Quitting..!");
                    return Ok(());
                }
                other => warn!("Unknown choice '{}'..!", other),
            }
        }
    }
}

/// Prints `message` and reads one line. `None` once stdin is closed.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{} ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
