//! Treason headless runner
//!
//! Drives a session with the autopilot at a fixed tick rate and logs the HUD.
//! A graphical front end would replace the autopilot with real key events and
//! draw each `ui::Frame`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use treason::consts::TICK_RATE_HZ;
use treason::platform::{Autopilot, TickPacer};
use treason::sim::{GameEvent, GameState, tick};
use treason::ui::{Overlay, build_frame, hud_text};
use treason::{Rules, Variant};

#[derive(Debug, Parser)]
#[command(name = "treason", about = "Play Treason headless with the autopilot")]
struct Args {
    /// Session seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Rule preset
    #[arg(long, value_enum, default_value_t = Variant::Treason)]
    variant: Variant,

    /// JSON rules file, overrides the preset
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 60 * 60)]
    max_ticks: u64,

    /// Run as fast as possible instead of pacing to the tick rate
    #[arg(long)]
    unpaced: bool,

    /// Log the HUD every N ticks
    #[arg(long, default_value_t = 60)]
    hud_every: u64,
}

fn load_rules(args: &Args) -> Result<Rules> {
    if let Some(path) = &args.rules {
        return Rules::load(path).with_context(|| format!("loading {}", path.display()));
    }
    Ok(Rules::from_variant(args.variant))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rules = load_rules(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Treason (headless) starting with seed {}", seed);

    let mut state = GameState::new(rules, seed);
    let mut bot = Autopilot::new(seed);
    let mut pacer = TickPacer::new(TICK_RATE_HZ);
    let hud_every = args.hud_every.max(1);

    for step in 0..args.max_ticks {
        let input = bot.next_input(&state);
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::LevelAdvanced { level } => log::info!("Reached level {}", level),
                GameEvent::PlayerHurt { lives } => log::debug!("Ouch, {} lives left", lives),
                _ => {}
            }
        }

        if step % hud_every == 0 {
            let lives = state.rules.track_lives.then_some(state.lives);
            log::info!("{}", hud_text(state.level, lives));
        }

        if state.close_requested || state.is_over() {
            break;
        }

        if !args.unpaced {
            pacer.wait();
        }
    }

    for overlay in build_frame(&state).overlays {
        match overlay {
            Overlay::Hud { level, lives } => println!("{}", hud_text(level, lives)),
            Overlay::GameOver { headline, reason } => println!("{headline}: {reason}"),
            Overlay::Instructions { title, .. } => println!("{title}"),
        }
    }
    println!(
        "ticks: {}, enemies left: {}",
        state.frame_counter,
        state.enemies_remaining()
    );

    Ok(())
}
