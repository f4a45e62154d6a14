// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Categories frequency counts.
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fmt, fs,
    io::{BufWriter, Write},
    path::Path,
};

use fivecard_eval::Category;

/// Counts how many player hands ended in each category.
///
/// Tallies from different tasks can be merged in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    games: u64,
    counts: [u64; Category::COUNT],
}

impl Tally {
    /// Adds a game with the given players results.
    pub fn add_game(&mut self, results: &[Category]) {
        self.games += 1;
        for category in results {
            self.add(*category);
        }
    }

    /// Adds a single hand result.
    pub fn add(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Adds the other tally counts to this one.
    pub fn merge(&mut self, other: &Tally) {
        self.games += other.games;
        for (count, other) in self.counts.iter_mut().zip(other.counts) {
            *count += other;
        }
    }

    /// The number of games.
    pub fn games(&self) -> u64 {
        self.games
    }

    /// The number of classified hands.
    pub fn hands(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The number of hands in the given category.
    pub fn count(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    /// The fraction of hands in the given category.
    pub fn frequency(&self, category: Category) -> f64 {
        match self.hands() {
            0 => 0.0,
            hands => self.count(category) as f64 / hands as f64,
        }
    }

    /// Iterates categories counts from the weakest to the strongest category.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().zip(self.counts.iter().copied())
    }

    /// A serializable summary of this tally.
    pub fn summary(&self) -> Summary {
        Summary {
            games: self.games,
            hands: self.hands(),
            categories: self
                .iter()
                .map(|(category, count)| CategoryCount {
                    category,
                    count,
                    frequency: self.frequency(category),
                })
                .collect(),
        }
    }

    /// Writes the summary as JSON to the given path.
    pub fn save_summary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }

        let file = fs::File::create(path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.summary())
            .with_context(|| format!("Cannot write {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Cannot write {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games:           {}", self.games)?;
        writeln!(f, "Hands:           {}\n", self.hands())?;
        writeln!(f, "{:<16} {:>10} {:>9} {:>12}", "Category", "Count", "Percent", "1 in")?;

        for (category, count) in self.iter() {
            let freq = self.frequency(category);
            write!(f, "{:<16} {count:>10} {:>8.4}%", category, freq * 100.0)?;
            if count > 0 {
                writeln!(f, " {:>12.1}", 1.0 / freq)?;
            } else {
                writeln!(f, " {:>12}", "-")?;
            }
        }

        Ok(())
    }
}

/// Tally summary.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// The number of games.
    pub games: u64,
    /// The number of classified hands.
    pub hands: u64,
    /// The categories counts from the weakest to the strongest.
    pub categories: Vec<CategoryCount>,
}

/// The number of hands in a category.
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    /// The category.
    pub category: Category,
    /// The number of hands.
    pub count: u64,
    /// The fraction of hands.
    pub frequency: f64,
}
