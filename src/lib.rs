#![warn(
    missing_debug_implementations,
    clippy::indexing_slicing,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::pedantic,
    clippy::missing_panics_doc
)]
#![allow(clippy::wildcard_imports, clippy::module_name_repetitions)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)
)]
#![deny(unsafe_code)]

//! Deterministic one-on-one duels and statistics over repeated duels.
//!
//! ```
//! use duel_sim::{
//!     model::{Character, Weapon, WeaponType},
//!     simulate::AggregationEngine,
//! };
//!
//! let bow = Weapon::new("Ebony Bow", 19.0, 1.0, WeaponType::Bow)?;
//! let greatsword = Weapon::new(
//!     "Dragonbone Greatsword",
//!     25.0,
//!     0.7,
//!     WeaponType::TwoHandedGreatsword,
//! )?;
//! let mut archer = Character::new("Stealth Archer", 200.0, 250.0, 100.0, bow)?;
//! let mut warrior =
//!     Character::new("Two-Handed Warrior", 400.0, 250.0, 100.0, greatsword)?;
//!
//! let stats =
//!     AggregationEngine::default().run_batch(&mut archer, &mut warrior, 100)?;
//! assert_eq!(stats.overall_winner(), "Two-Handed Warrior");
//! assert_eq!(stats.win_margin(), 100);
//! # Ok::<(), duel_sim::error::SimError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod simulate;

pub use config::SimulationConfig;
pub use error::SimError;
