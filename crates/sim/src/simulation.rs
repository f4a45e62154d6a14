// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo and exhaustive simulations.
use anyhow::{Context, Result, bail};
use log::{debug, info};
use parking_lot::Mutex;
use std::{
    mem,
    sync::mpsc::{Receiver, SyncSender, sync_channel},
    thread,
    time::Instant,
};

use fivecard_eval::{Card, Category, Deck, Hand, InvalidHandError, classify};

use crate::{deal::Deal, recorder::Recorder, tally::Tally};

/// The simulation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of games to simulate.
    pub games: usize,
    /// Number of players sharing the dealer cards in each game.
    pub players: usize,
    /// The random seed, runs with the same seed and tasks deal the same games.
    pub seed: Option<u64>,
    /// Number of parallel tasks.
    pub tasks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games: 100_000,
            players: 1,
            seed: Some(42),
            tasks: 4,
        }
    }
}

impl Config {
    /// Checks the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            bail!("The number of games must be at least 1");
        }

        if !(1..=Deal::MAX_PLAYERS).contains(&self.players) {
            bail!(
                "The number of players must be between 1 and {}, got {}",
                Deal::MAX_PLAYERS,
                self.players
            );
        }

        if self.tasks == 0 {
            bail!("The number of tasks must be at least 1");
        }

        Ok(())
    }
}

/// Games sent to the recorder in one batch.
const BATCH_SIZE: usize = 1024;

/// Batches a task can deal ahead of the recorder.
const BATCHES_AHEAD: usize = 2;

type Game = (Deal, Vec<Category>);

/// Per task simulation state.
#[derive(Default)]
struct TaskState {
    tally: Tally,
    games: u64,
    batch: Vec<Game>,
    sender: Option<SyncSender<Vec<Game>>>,
    stopped: bool,
    error: Option<InvalidHandError>,
}

impl TaskState {
    fn deal(&mut self, sample: &[Card], players: usize) {
        if self.stopped {
            return;
        }

        let deal = Deal::from_sample(sample, players);
        match deal.results() {
            Ok(results) => {
                self.tally.add_game(&results);
                if self.sender.is_some() {
                    self.push((deal, results));
                }
            }
            Err(e) => {
                self.error = Some(e);
                self.stop();
            }
        }
    }

    fn push(&mut self, game: Game) {
        self.batch.push(game);

        let last = self.tally.games() == self.games;
        if self.batch.len() < BATCH_SIZE && !last {
            return;
        }

        let batch = mem::take(&mut self.batch);
        let sent = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(batch).is_ok());

        if !sent {
            self.stop();
        } else if last {
            self.sender = None;
        }
    }

    fn stop(&mut self) {
        // Dropping the sender wakes up the recorder waiting on this task.
        self.stopped = true;
        self.sender = None;
        self.batch.clear();
    }
}

/// Number of games dealt by a task, as split by [Deck::par_sample].
fn task_games(config: &Config, task_id: usize) -> u64 {
    (config.games / config.tasks + usize::from(task_id < config.games % config.tasks)) as u64
}

/// Simulates random games and returns the results tally.
pub fn run(config: &Config) -> Result<Tally> {
    simulate(config, None)
}

/// Simulates random games writing each game to the given recorder.
///
/// Games are recorded while they are dealt, taking a batch of games from each
/// task in turn, so that runs with the same seed and tasks write the same rows.
/// Games are numbered from 0.
pub fn run_with_recorder(config: &Config, recorder: &mut dyn Recorder) -> Result<Tally> {
    simulate(config, Some(recorder))
}

fn simulate(config: &Config, mut recorder: Option<&mut dyn Recorder>) -> Result<Tally> {
    config.validate()?;

    info!(
        "Simulating {} games with {} players on {} tasks",
        config.games, config.players, config.tasks
    );

    // Each task only locks its own state so there is no contention.
    let mut states = Vec::with_capacity(config.tasks);
    let mut receivers = Vec::with_capacity(config.tasks);
    for task_id in 0..config.tasks {
        let mut state = TaskState {
            games: task_games(config, task_id),
            ..TaskState::default()
        };

        if recorder.is_some() {
            let (sender, receiver) = sync_channel(BATCHES_AHEAD);
            if state.games > 0 {
                state.sender = Some(sender);
            }
            receivers.push(receiver);
        }

        states.push(Mutex::new(state));
    }

    let now = Instant::now();

    let recorded = thread::scope(|s| {
        s.spawn(|| {
            Deck::default().par_sample(
                config.tasks,
                config.games,
                Deal::sample_size(config.players),
                config.seed,
                |task_id, sample| states[task_id].lock().deal(sample, config.players),
            );
        });

        recorder
            .as_deref_mut()
            .map(|recorder| record_games(recorder, receivers))
    });

    let elapsed = now.elapsed().as_secs_f64();

    let states = states
        .into_iter()
        .map(Mutex::into_inner)
        .collect::<Vec<_>>();

    let mut tally = Tally::default();
    for (task_id, state) in states.iter().enumerate() {
        if let Some(e) = &state.error {
            return Err(e.clone())
                .with_context(|| format!("Task {task_id} dealt an invalid hand"));
        }

        debug!("Task {task_id} simulated {} games", state.tally.games());
        tally.merge(&state.tally);
    }

    let recorded = recorded.transpose()?;

    info!(
        "Simulated {} games in {:.3}s ({:.0} games/sec)",
        tally.games(),
        elapsed,
        tally.games() as f64 / elapsed
    );

    if let (Some(recorder), Some(games)) = (recorder, recorded) {
        recorder.finish()?;
        info!("Recorded {games} games");
    }

    Ok(tally)
}

/// Records the tasks games as they arrive, one batch from each task in turn,
/// until all tasks are done. Returns the number of recorded games.
fn record_games(
    recorder: &mut dyn Recorder,
    receivers: Vec<Receiver<Vec<Game>>>,
) -> Result<u64> {
    let mut game = 0;
    let mut open = receivers;

    while !open.is_empty() {
        let mut next = Vec::with_capacity(open.len());
        for receiver in open {
            // A disconnected task has no more games.
            let Ok(batch) = receiver.recv() else {
                continue;
            };

            for (deal, results) in batch {
                recorder
                    .record(game, &deal, &results)
                    .with_context(|| format!("Cannot record game {game}"))?;
                game += 1;
            }

            next.push(receiver);
        }

        open = next;
    }

    Ok(game)
}

/// Classifies every five cards hand and returns the exact categories counts,
/// each hand is counted as a single player game.
pub fn enumerate(tasks: usize) -> Result<Tally> {
    if tasks == 0 {
        bail!("The number of tasks must be at least 1");
    }

    info!("Enumerating all hands on {tasks} tasks");

    let tallies = (0..tasks)
        .map(|_| Mutex::new(Tally::default()))
        .collect::<Vec<_>>();
    let error = Mutex::new(None);

    let now = Instant::now();

    Deck::default().par_for_each(tasks, Hand::SIZE, |task_id, cards| {
        match classify(cards) {
            Ok(category) => tallies[task_id].lock().add_game(&[category]),
            Err(e) => *error.lock() = Some(e),
        }
    });

    if let Some(e) = error.into_inner() {
        return Err(e).context("Invalid hand while enumerating");
    }

    let tally = tallies.into_iter().fold(Tally::default(), |mut tally, t| {
        tally.merge(&t.into_inner());
        tally
    });

    info!(
        "Enumerated {} hands in {:.3}s",
        tally.hands(),
        now.elapsed().as_secs_f64()
    );

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::CsvRecorder;

    fn config(games: usize, players: usize, tasks: usize) -> Config {
        Config {
            games,
            players,
            seed: Some(42),
            tasks,
        }
    }

    /// Keeps the recorded game numbers.
    #[derive(Default)]
    struct GameNumbers {
        games: Vec<u64>,
        finished: usize,
        fail_at: Option<u64>,
    }

    impl Recorder for GameNumbers {
        fn record(&mut self, game: u64, deal: &Deal, results: &[Category]) -> Result<()> {
            assert_eq!(self.finished, 0);
            assert_eq!(deal.players().len(), results.len());

            if self.fail_at == Some(game) {
                bail!("disk full");
            }

            self.games.push(game);
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn record(config: &Config) -> (Tally, String) {
        let mut recorder = CsvRecorder::new(Vec::new(), config.players);
        let tally = run_with_recorder(config, &mut recorder).unwrap();
        let csv = String::from_utf8(recorder.into_inner()).unwrap();
        (tally, csv)
    }

    #[test]
    fn invalid_config() {
        assert!(run(&config(0, 1, 4)).is_err());
        assert!(run(&config(10, 0, 4)).is_err());
        assert!(run(&config(10, Deal::MAX_PLAYERS + 1, 4)).is_err());
        assert!(run(&config(10, 1, 0)).is_err());
        assert!(Config::default().validate().is_ok());
        assert!(enumerate(0).is_err());
    }

    #[test]
    fn counts_games_and_hands() {
        let tally = run(&config(1_000, 3, 4)).unwrap();
        assert_eq!(tally.games(), 1_000);
        assert_eq!(tally.hands(), 3_000);

        // Fewer games than tasks.
        let tally = run(&config(3, 1, 8)).unwrap();
        assert_eq!(tally.games(), 3);

        let tally = run(&config(500, Deal::MAX_PLAYERS, 2)).unwrap();
        assert_eq!(tally.hands(), 500 * Deal::MAX_PLAYERS as u64);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let c = config(2_000, 2, 3);
        let (t1, csv1) = record(&c);
        let (t2, csv2) = record(&c);

        assert_eq!(t1, t2);
        assert_eq!(csv1, csv2);

        let other = Config {
            seed: Some(7),
            ..c
        };
        assert_ne!(record(&other).1, csv1);
    }

    #[test]
    fn recorded_rows_match_tally() {
        let (tally, csv) = record(&config(1_000, 2, 4));

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("game,dealer,player_1,player_2,player_1_result,player_2_result")
        );

        let mut counted = Tally::default();
        for (idx, line) in lines.enumerate() {
            let fields = line.split(',').collect::<Vec<_>>();
            assert_eq!(fields.len(), 6);
            assert_eq!(fields[0], idx.to_string());
            assert_eq!(fields[1].split(' ').count(), 2);
            assert_eq!(fields[2].split(' ').count(), 3);

            // The recorded result matches the recorded cards.
            let dealer = fivecard_eval::parse_cards(fields[1]).unwrap();
            let player = fivecard_eval::parse_cards(fields[3]).unwrap();
            let result = fields[5].parse::<Category>().unwrap();
            assert_eq!(fivecard_eval::score(&dealer, &player), Ok(result));

            let results = [fields[4], fields[5]].map(|f| f.parse::<Category>().unwrap());
            counted.add_game(&results);
        }

        assert_eq!(counted, tally);
    }

    #[test]
    fn games_recorded_in_order() {
        let mut recorder = GameNumbers::default();
        let tally = run_with_recorder(&config(5_000, 2, 3), &mut recorder).unwrap();

        assert_eq!(tally.games(), 5_000);
        assert_eq!(recorder.games, (0..5_000).collect::<Vec<_>>());
        assert_eq!(recorder.finished, 1);

        // Tasks without games.
        let mut recorder = GameNumbers::default();
        run_with_recorder(&config(2, 1, 5), &mut recorder).unwrap();
        assert_eq!(recorder.games, [0, 1]);
    }

    #[test]
    fn record_error_stops_dealing() {
        let mut recorder = GameNumbers {
            fail_at: Some(10),
            ..GameNumbers::default()
        };

        // Dealing stops after a few batches instead of dealing every game.
        let err = run_with_recorder(&config(5_000_000, 1, 2), &mut recorder).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Cannot record game 10"), "{msg}");
        assert!(msg.contains("disk full"), "{msg}");

        assert_eq!(recorder.games, (0..10).collect::<Vec<_>>());
        assert_eq!(recorder.finished, 0);
    }

    #[test]
    fn sampled_frequencies() {
        let tally = run(&config(200_000, 1, 4)).unwrap();

        // Exact no payout frequency is 2_059_272 / 2_598_960.
        let no_payout = tally.frequency(Category::NoPayout);
        assert!((no_payout - 0.7923).abs() < 0.01, "{no_payout}");

        let pair = tally.frequency(Category::Pair);
        assert!((pair - 0.1873).abs() < 0.01, "{pair}");
    }

    #[test]
    fn enumerate_all_hands() {
        let tally = enumerate(4).unwrap();
        assert_eq!(tally.games(), 2_598_960);
        assert_eq!(tally.hands(), 2_598_960);

        let expected = [
            (Category::NoPayout, 2_059_272),
            (Category::Pair, 486_720),
            (Category::TwoPair, 15_840),
            (Category::ThreeOfAKind, 22_080),
            (Category::FourOfAKind, 240),
            (Category::FullHouse, 480),
            (Category::Straight, 9_180),
            (Category::Flush, 5_112),
            (Category::StraightFlush, 32),
            (Category::RoyalFlush, 4),
        ];

        assert_eq!(tally.iter().collect::<Vec<_>>(), expected);
    }
}
