// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use log::error;
use std::path::PathBuf;

use fivecard_sim::{Config, CsvRecorder, simulation};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of games to simulate.
    #[clap(long, short, default_value_t = 100_000)]
    games: usize,
    /// Number of players sharing the dealer cards.
    #[clap(long, short, default_value_t = 1)]
    players: usize,
    /// The random seed.
    #[clap(long, short, default_value_t = 42)]
    seed: u64,
    /// Seed from the OS, runs are not reproducible.
    #[clap(long, conflicts_with = "seed")]
    random: bool,
    /// Number of parallel tasks.
    #[clap(
        long,
        short,
        default_value_t = 4,
        value_parser = clap::value_parser!(u16).range(1..=256)
    )]
    tasks: u16,
    /// Write each game to this CSV file.
    #[clap(long, short)]
    output: Option<PathBuf>,
    /// Write the results summary to this JSON file.
    #[clap(long)]
    summary: Option<PathBuf>,
    /// Classify every five cards hand instead of sampling games.
    #[clap(long, conflicts_with_all = ["games", "players", "output"])]
    exhaustive: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            games: self.games,
            players: self.players,
            seed: (!self.random).then_some(self.seed),
            tasks: self.tasks as usize,
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config();

    let tally = if cli.exhaustive {
        simulation::enumerate(config.tasks)?
    } else {
        match &cli.output {
            Some(path) => {
                let mut recorder = CsvRecorder::create(path, config.players)?;
                simulation::run_with_recorder(&config, &mut recorder)?
            }
            None => simulation::run(&config)?,
        }
    };

    println!("{tally}");

    if let Some(path) = &cli.summary {
        tally.save_summary(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fivecard_sim::Deal;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fivecard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_config() {
        let config = parse(&[]).config();
        assert_eq!(config.games, 100_000);
        assert_eq!(config.players, 1);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tasks, 4);

        assert_eq!(parse(&["--random"]).config().seed, None);
        assert!(Cli::try_parse_from(["fivecard", "--random", "-s", "7"]).is_err());
    }

    #[test]
    fn players_checked_by_config() {
        let max = Deal::MAX_PLAYERS.to_string();
        assert!(parse(&["-p", &max]).config().validate().is_ok());

        let over = (Deal::MAX_PLAYERS + 1).to_string();
        let err = parse(&["-p", &over]).config().validate().unwrap_err();
        assert!(err.to_string().contains(&max), "{err}");

        assert!(parse(&["-p", "0"]).config().validate().is_err());
    }
}
