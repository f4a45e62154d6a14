// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulated games recording.
use anyhow::{Context, Result, ensure};
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use fivecard_eval::{Card, Category};

use crate::deal::Deal;

/// A sink for simulated games.
pub trait Recorder {
    /// Records a game deal and the players results.
    fn record(&mut self, game: u64, deal: &Deal, results: &[Category]) -> Result<()>;

    /// Called after the last game has been recorded.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Records games as CSV rows.
///
/// Each row has the game number, the dealer cards, the cards of each player,
/// and the result tag of each player, the cards in a hand are separated by
/// spaces:
///
/// ```text
/// game,dealer,player_1,player_1_result
/// 0,5S 6D,2C 3D 4H,straight
/// ```
#[derive(Debug)]
pub struct CsvRecorder<W: Write> {
    writer: W,
    players: usize,
    has_header: bool,
}

impl CsvRecorder<BufWriter<fs::File>> {
    /// Creates a recorder that writes to a new file, parent directories are
    /// created if missing.
    pub fn create<P: AsRef<Path>>(path: P, players: usize) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }

        let file = fs::File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?;

        Ok(Self::new(BufWriter::new(file), players))
    }
}

impl<W: Write> CsvRecorder<W> {
    /// Creates a recorder for games with the given number of players.
    pub fn new(writer: W, players: usize) -> Self {
        Self {
            writer,
            players,
            has_header: false,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<()> {
        if self.has_header {
            return Ok(());
        }

        write!(self.writer, "game,dealer")?;
        for player in 1..=self.players {
            write!(self.writer, ",player_{player}")?;
        }

        for player in 1..=self.players {
            write!(self.writer, ",player_{player}_result")?;
        }

        writeln!(self.writer)?;
        self.has_header = true;

        Ok(())
    }

    fn write_cards(&mut self, cards: &[Card]) -> Result<()> {
        for (idx, card) in cards.iter().enumerate() {
            if idx > 0 {
                write!(self.writer, " ")?;
            }

            write!(self.writer, "{card}")?;
        }

        Ok(())
    }
}

impl<W: Write> Recorder for CsvRecorder<W> {
    fn record(&mut self, game: u64, deal: &Deal, results: &[Category]) -> Result<()> {
        ensure!(
            deal.players().len() == self.players && results.len() == self.players,
            "game {game} has {} hands and {} results for {} players",
            deal.players().len(),
            results.len(),
            self.players
        );

        self.write_header()?;

        write!(self.writer, "{game},")?;
        self.write_cards(deal.dealer())?;

        for player in deal.players() {
            write!(self.writer, ",")?;
            self.write_cards(player)?;
        }

        for result in results {
            write!(self.writer, ",{result}")?;
        }

        writeln!(self.writer)?;

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
