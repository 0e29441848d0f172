//! Seeded autoplay for the bundled games.
//!
//! Picks uniformly among the legal operators until the game ends or the
//! step cap is reached, logging the narrative as it goes, then prints the
//! final view for one role.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stakeholder_sim::core::TracingSink;
use stakeholder_sim::{
    CityWithoutWalls, CoverageClash, GameRng, RoleId, Ruleset, SavedGame, Session,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Game {
    CoverageClash,
    CityWithoutWalls,
}

#[derive(Debug, Parser)]
#[command(name = "playthrough", about = "Autoplay a seeded stakeholder game")]
struct Args {
    /// Game to play.
    #[arg(long, value_enum, env = "SIM_GAME", default_value = "coverage-clash")]
    game: Game,

    /// Seed for both the world and the operator choices.
    #[arg(long, env = "SIM_SEED", default_value_t = 42)]
    seed: u64,

    /// Stop after this many steps even if the game is not over.
    #[arg(long, env = "SIM_MAX_STEPS", default_value_t = 500)]
    max_steps: u32,

    /// Role index whose view is printed at the end.
    #[arg(long, env = "SIM_VIEWER", default_value_t = 0)]
    viewer: u8,

    /// Write the final saved game as JSON.
    #[arg(long, env = "SIM_SAVE")]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    info!(game = ?args.game, seed = args.seed, max_steps = args.max_steps, "playthrough starting");

    match args.game {
        Game::CoverageClash => play(&CoverageClash::new(), &args),
        Game::CityWithoutWalls => play(&CityWithoutWalls::new(), &args),
    }
}

fn play<R: Ruleset>(game: &R, args: &Args) -> Result<()> {
    let viewer = RoleId::new(args.viewer);
    if game.config().roster.get(viewer).is_none() {
        bail!("{} has no role {}", game.config().name, args.viewer);
    }

    let mut session = Session::new(GameRng::new(args.seed), TracingSink);
    let mut chooser = GameRng::new(args.seed.wrapping_add(1));
    let mut state = game.initial_state();

    while !game.is_terminal(&state) && state.step() < args.max_steps {
        let legal = game.legal_operators(&state);
        let Some(&operator) = chooser.choose(&legal) else {
            bail!("no legal operator at step {}", state.step());
        };
        state = game
            .apply(&mut session, &state, operator)
            .with_context(|| format!("applying {operator} at step {}", state.step()))?;
    }

    match game.outcome(&state) {
        Some(outcome) => info!(steps = state.step(), result = ?outcome.result, "game over"),
        None => info!(steps = state.step(), "step cap reached"),
    }
    println!("{}", game.render_text(&state, viewer));

    if let Some(path) = &args.save {
        let json = SavedGame::capture(game, &state, &session).to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "saved game written");
    }
    Ok(())
}
