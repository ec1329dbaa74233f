use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use card_duel::{
    Bonus, DeckCatalog, GameResult, GameRng, LevelCatalog, RankingEntry, RankingStore,
    RulesConfig, Side, Stage,
};

#[derive(Subcommand)]
enum Cmd {
    /// Play one level to the end without a screen
    Play {
        /// Level file (JSON, `level_<n>` keys)
        #[arg(long)]
        levels: PathBuf,
        /// Card catalog (JSON, as written by `scan`)
        #[arg(long)]
        cards: PathBuf,
        /// Level number to play
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// RNG seed for determinism; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Player name
        #[arg(long, default_value = "PLAYER")]
        name: String,
        /// Use the heal bonus before this round
        #[arg(long)]
        heal_after: Option<u32>,
        /// Raise the shield before this round
        #[arg(long)]
        shield_after: Option<u32>,
        /// Simulated seconds that pass per round
        #[arg(long, default_value_t = 2)]
        seconds_per_round: u64,
        /// Ranking file to record the player's score in
        #[arg(long)]
        ranking: Option<PathBuf>,
    },
    /// Print the best scores
    Ranking {
        /// Ranking file
        #[arg(long)]
        file: PathBuf,
        /// How many entries to show
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Build a card catalog from a directory of card art
    Scan {
        /// Directory with one sub-directory per deck
        #[arg(long)]
        dir: PathBuf,
        /// Where to write the catalog JSON
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Headless card duel driver")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

struct PlayOptions {
    heal_after: Option<u32>,
    shield_after: Option<u32>,
    seconds_per_round: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Play {
            levels,
            cards,
            level,
            seed,
            name,
            heal_after,
            shield_after,
            seconds_per_round,
            ranking,
        } => {
            let levels = LevelCatalog::load(&levels)?;
            let catalog = DeckCatalog::load(&cards)?;
            let config = levels.level(level)?.clone();
            let rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
            println!("level {} seed {}", level, rng.seed());

            let mut stage = Stage::initialize(level, config, RulesConfig::default(), &catalog, name, rng)?;
            stage.deal_and_start()?;
            let options = PlayOptions {
                heal_after,
                shield_after,
                seconds_per_round,
            };
            play(&mut stage, &options)?;
            report(&stage);

            if let Some(path) = ranking {
                let store = RankingStore::open(&path)?;
                store.append(&RankingEntry::from_participant(stage.participant(Side::Player)))?;
                println!("recorded in {}", path.display());
            }
        }
        Cmd::Ranking { file, top } => {
            let store = RankingStore::open(&file)?;
            for (place, entry) in store.top(top)?.iter().enumerate() {
                println!("{:>2}. {:<16} {}", place + 1, entry.name, entry.score);
            }
        }
        Cmd::Scan { dir, out } => {
            let catalog = DeckCatalog::scan_dir(&dir)?;
            catalog.save(&out)?;
            for name in catalog.names() {
                let cards = catalog.deck(name).map(|d| d.len()).unwrap_or(0);
                println!("{}: {} cards", name, cards);
            }
        }
    }
    Ok(())
}

fn play(stage: &mut Stage, options: &PlayOptions) -> Result<(), Box<dyn Error>> {
    let mut round = 1;
    while !stage.is_finished() {
        if !stage.anyone_has_cards() {
            // Nothing left to play: let the clock decide
            stage.tick(Duration::from_secs(1));
            continue;
        }

        if options.heal_after == Some(round) && stage.heal_available() {
            stage.activate_bonus(Bonus::Heal)?;
        }
        if options.shield_after == Some(round) && stage.shield_available() {
            stage.activate_bonus(Bonus::Shield)?;
        }

        if let Some(outcome) = stage.play_round()? {
            let winner = outcome.winner.map_or("nobody".to_string(), |s| s.to_string());
            println!(
                "round {:>2}: {} wins{}{} | hp {} vs {} | score {}",
                round,
                winner,
                if outcome.critical { ", critical" } else { "" },
                if outcome.reflected { ", reflected" } else { "" },
                stage.hp(Side::Player),
                stage.hp(Side::Enemy),
                stage.score(Side::Player)
            );
        }
        stage.tick(Duration::from_secs(options.seconds_per_round));
        round += 1;
    }
    Ok(())
}

fn report(stage: &Stage) {
    match stage.result() {
        Some(GameResult::Winner(side)) => {
            let winner = stage.participant(side);
            println!("{} wins with {} hp", winner.name(), winner.hp());
        }
        Some(GameResult::Draw) => println!("draw"),
        None => println!("unfinished"),
    }
    println!(
        "final score {} ({}s left)",
        stage.score(Side::Player),
        stage.seconds_left()
    );
}
