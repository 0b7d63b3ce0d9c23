use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use ray_chess::engines::engine_negamax::NegamaxEngine;
use ray_chess::engines::engine_random::RandomEngine;
use ray_chess::engines::engine_trait::Engine;
use ray_chess::game_state::game_state::GameState;
use ray_chess::move_generation::perft::{perft, perft_divide};
use ray_chess::search::negamax::{SearchConfig, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use ray_chess::utils::engine_match_harness::{MatchConfig, MatchDriver};
use ray_chess::utils::long_algebraic::move_to_long_algebraic;
use ray_chess::utils::pgn::write_pgn;
use ray_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    Random,
    Negamax,
}

/// Plays two engines against each other, or counts perft nodes.
#[derive(Debug, Parser)]
#[command(name = "ray_chess", version)]
struct Cli {
    /// Engine playing the light pieces.
    #[arg(long, value_enum, default_value = "negamax")]
    white: EngineKind,

    /// Engine playing the dark pieces.
    #[arg(long, value_enum, default_value = "random")]
    black: EngineKind,

    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    white_depth: u8,

    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    black_depth: u8,

    /// Plies after which the game is drawn.
    #[arg(long, default_value_t = 300)]
    max_plies: u16,

    /// Seed for every random choice; omit for a fresh game each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position; defaults to the standard setup.
    #[arg(long)]
    fen: Option<String>,

    /// Print perft counts to this depth instead of playing.
    #[arg(long, value_name = "DEPTH")]
    perft: Option<u8>,

    /// Only print the game record.
    #[arg(long)]
    quiet: bool,
}

fn build_engine(kind: EngineKind, depth: u8, seed: Option<u64>) -> Result<Box<dyn Engine>> {
    if !(1..=MAX_SEARCH_DEPTH).contains(&depth) {
        bail!("search depth must be between 1 and {MAX_SEARCH_DEPTH}, got {depth}");
    }
    let engine: Box<dyn Engine> = match kind {
        EngineKind::Random => match seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
        EngineKind::Negamax => Box::new(NegamaxEngine::new(SearchConfig {
            depth,
            shuffle_root_moves: true,
            seed,
        })),
    };
    Ok(engine)
}

fn run_perft(start: &GameState, depth: u8) {
    let mut state = start.clone();
    for (mv, nodes) in perft_divide(&mut state, depth) {
        println!("{}: {}", move_to_long_algebraic(&mv), nodes);
    }
    let counts = perft(&mut state, depth);
    println!();
    println!("nodes      {}", counts.nodes);
    println!("captures   {}", counts.captures);
    println!("en passant {}", counts.en_passant);
    println!("castles    {}", counts.castles);
    println!("promotions {}", counts.promotions);
    println!("checks     {}", counts.checks);
    println!("checkmates {}", counts.checkmates);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let start = match &cli.fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("cannot load position `{fen}`"))?,
        None => GameState::new_game(),
    };

    if let Some(depth) = cli.perft {
        run_perft(&start, depth);
        return Ok(());
    }

    // Distinct seeds per side so two seeded engines don't mirror each other.
    let light = build_engine(cli.white, cli.white_depth, cli.seed)?;
    let dark = build_engine(cli.black, cli.black_depth, cli.seed.map(|s| s.wrapping_add(1)))?;
    let white_name = light.name().to_owned();
    let black_name = dark.name().to_owned();

    let config = MatchConfig {
        max_plies: cli.max_plies,
        ..MatchConfig::default()
    };
    info!("{white_name} (light) vs {black_name} (dark)");
    let result = MatchDriver::new(light, dark, start, config, cli.seed).play()?;

    if !cli.quiet {
        println!("{}", render_game_state(&result.final_state));
        println!("{:?} after {} plies", result.outcome, result.played_moves.len());
        if result.fallback_moves > 0 {
            println!("{} fallback moves", result.fallback_moves);
        }
        println!();
    }
    println!(
        "{}",
        write_pgn(
            &result.initial_state,
            &result.played_moves,
            &white_name,
            &black_name,
            result.outcome.result_token(),
        )
    );
    Ok(())
}
