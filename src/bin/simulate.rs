use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use slide_2048::config::GameConfig;
use slide_2048::engine::{Game, GameState, Move};
use slide_2048::weighted::{WeightedItem, WeightedRandomSet};
use std::time::Instant;

// Keeps the move policy's stream independent of the engine's spawn stream.
const POLICY_SALT: u64 = 0x5EED_0F_A11_D1CE;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Play many seeded games with a random policy and report statistics")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1000)]
    games: usize,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 4)]
    rows: usize,

    #[arg(long, default_value_t = 4)]
    columns: usize,

    /// Tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    win: u32,

    /// Spawn weights as VALUE:WEIGHT pairs, e.g. 2:98,4:2
    #[arg(long, value_delimiter = ',', default_values_t = [WeightedItem::new(2, 98), WeightedItem::new(4, 2)])]
    weights: Vec<WeightedItem>,

    /// Stop a game after this many move attempts
    #[arg(long, default_value_t = 100_000)]
    max_moves: usize,

    /// Draws used to estimate the spawn-value distribution
    #[arg(long, default_value_t = 100_000)]
    draws: usize,

    /// Disable the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameStats {
    score: u64,
    highest: u32,
    moves: usize,
    won: bool,
}

fn play(config: &GameConfig, seed: u64, max_moves: usize) -> anyhow::Result<GameStats> {
    let mut game = Game::seeded(config, seed)?;
    let mut policy = StdRng::seed_from_u64(seed ^ POLICY_SALT);
    game.start();
    let mut moves = 0;
    while game.state() == GameState::Playing && moves < max_moves {
        let direction = Move::ALL[policy.gen_range(0..Move::ALL.len())];
        game.make_move(direction)?;
        moves += 1;
    }
    log::debug!("seed {} finished: score {} after {} moves", seed, game.score(), moves);
    Ok(GameStats {
        score: game.score(),
        highest: game.grid().highest_value(),
        moves,
        won: game.has_won(),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.games == 0 {
        anyhow::bail!("--games must be at least 1");
    }
    let config = GameConfig::new(args.rows, args.columns)
        .with_win_threshold(args.win)
        .with_weights(args.weights.clone());
    config.validate()?;

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise} | eta {eta}")?,
        );
        pb
    };

    let start = Instant::now();
    let results: Vec<GameStats> = (0..args.games as u64)
        .into_par_iter()
        .map(|i| {
            let stats = play(&config, args.seed.wrapping_add(i), args.max_moves);
            pb.inc(1);
            stats
        })
        .collect::<anyhow::Result<_>>()?;
    pb.finish_and_clear();
    log::info!("played {} games in {:.2?}", results.len(), start.elapsed());

    let n = results.len() as f64;
    let mean_score = results.iter().map(|s| s.score as f64).sum::<f64>() / n;
    let max_score = results.iter().map(|s| s.score).max().unwrap_or(0);
    let highest = results.iter().map(|s| s.highest).max().unwrap_or(0);
    let mean_moves = results.iter().map(|s| s.moves as f64).sum::<f64>() / n;
    let wins = results.iter().filter(|s| s.won).count();

    println!("Games: {}", results.len());
    println!("Mean score: {:.1}, max score: {}", mean_score, max_score);
    println!("Highest tile: {}", highest);
    println!("Mean move attempts: {:.1}", mean_moves);
    println!("Win rate: {:.2}% ({} of {})", 100.0 * wins as f64 / n, wins, results.len());

    let spawn_table = WeightedRandomSet::from_items(config.weights.iter().copied())?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let counts = spawn_table.sample_counts(&mut rng, args.draws);
    println!("Spawn distribution over {} draws:", args.draws);
    for (item, count) in spawn_table.items().iter().zip(&counts) {
        let share = if args.draws == 0 { 0.0 } else { 100.0 * *count as f64 / args.draws as f64 };
        println!("  {:>6} (weight {:>4}): {:>6.2}%", item.value, item.weight, share);
    }
    Ok(())
}
