use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use slide_2048::config::GameConfig;
use slide_2048::engine::{Game, GameEvent, GameState, Move};
use slide_2048::weighted::WeightedItem;

#[derive(Debug, Parser)]
#[command(name = "slide-2048", about = "Play the sliding-tile merge puzzle in the terminal")]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 4)]
    rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = 4)]
    columns: usize,

    /// Snapshots kept for undo
    #[arg(long, default_value_t = 3)]
    undo_depth: usize,

    /// Tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    win: u32,

    /// Spawn weights as VALUE:WEIGHT pairs, e.g. 2:98,4:2
    #[arg(long, value_delimiter = ',', default_values_t = [WeightedItem::new(2, 98), WeightedItem::new(4, 2)])]
    weights: Vec<WeightedItem>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Save file: resumed at start if present, written on quit
    #[arg(long)]
    archive: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig::new(self.rows, self.columns)
            .with_undo_depth(self.undo_depth)
            .with_win_threshold(self.win)
            .with_weights(self.weights.clone())
    }
}

enum Command {
    Move(Move),
    Undo,
    Restart,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "u" | "undo" => Some(Command::Undo),
        "r" | "restart" => Some(Command::Restart),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => other.parse::<Move>().ok().map(Command::Move),
    }
}

/// Resume from `path`; an unreadable or mismatched archive is reported and
/// the caller starts a new game instead.
fn load_or_start_fresh(game: &mut Game, path: &Path) -> bool {
    match game.load_from(path) {
        Ok(resumed) => resumed,
        Err(e) => {
            log::warn!("ignoring archive {}: {}", path.display(), e);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = args.config();

    let mut game = match args.seed {
        Some(seed) => Game::seeded(&config, seed)?,
        None => Game::new(&config)?,
    };

    let resumed = match &args.archive {
        Some(path) => load_or_start_fresh(&mut game, path),
        None => false,
    };
    if !resumed {
        game.start();
    }
    game.drain_events();

    println!("w/a/s/d to move, u to undo, r to restart, q to quit");
    println!("{}", game);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            println!("Unknown command: {:?}", line.trim());
            continue;
        };
        match command {
            Command::Quit => break,
            Command::Restart => game.start(),
            Command::Undo => {
                if game.state() == GameState::Playing && !game.undo()? {
                    println!("Nothing to undo");
                }
            }
            Command::Move(direction) => {
                if game.state() != GameState::Playing {
                    println!("Game over. Press r to restart.");
                    continue;
                }
                game.make_move(direction)?;
            }
        }
        println!("{}", game);
        for event in game.drain_events() {
            if let GameEvent::GameOver { won } = event {
                if won {
                    println!("You reached {}! Final score: {}", game.win_threshold(), game.score());
                } else {
                    println!("No moves left. Final score: {}", game.score());
                }
            }
        }
        stdout.flush()?;
    }

    if let Some(path) = &args.archive {
        game.save_to(path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mismatched_archive_falls_back_to_fresh_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.s2sv");
        let mut small = Game::seeded(&GameConfig::new(2, 2), 1).unwrap();
        small.start();
        small.save_to(&path).unwrap();

        let mut game = Game::seeded(&GameConfig::default(), 2).unwrap();
        assert!(!load_or_start_fresh(&mut game, &path));
        assert_eq!(game.state(), GameState::Ready);
        std::fs::write(&path, b"garbage").unwrap();
        assert!(!load_or_start_fresh(&mut game, &path));
    }

    #[test]
    fn commands_parse() {
        assert!(matches!(parse_command("u"), Some(Command::Undo)));
        assert!(matches!(parse_command(" Q "), Some(Command::Quit)));
        assert!(matches!(parse_command("a"), Some(Command::Move(Move::Left))));
        assert!(parse_command("zz").is_none());
    }
}
