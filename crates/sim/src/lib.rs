// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Fivecard games simulator.
//!
//! Deals random games, two dealer cards shared by one or more players with
//! three cards each, classifies each player hand and counts the results:
//!
//! ```
//! # use fivecard_sim::{Config, run};
//! let config = Config {
//!     games: 1_000,
//!     players: 2,
//!     seed: Some(42),
//!     tasks: 2,
//! };
//!
//! let tally = run(&config).unwrap();
//! assert_eq!(tally.games(), 1_000);
//! assert_eq!(tally.hands(), 2_000);
//! ```
//!
//! Games can be written to a [Recorder], see [CsvRecorder].
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod deal;
pub use deal::Deal;
pub mod recorder;
pub use recorder::{CsvRecorder, Recorder};
pub mod simulation;
pub use simulation::{Config, enumerate, run, run_with_recorder};
pub mod tally;
pub use tally::Tally;
