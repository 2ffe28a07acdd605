use enum_map::EnumMap;
use log::{info, warn};

use crate::{
    config::SimulationConfig,
    error::SimError,
    model::Combatant,
    simulate::{DrawReason, DuelEngine, FightResult, Side, Verdict},
};

/// What [`MultiSimulationResult::overall_winner`] reports, if both fighters
/// won equally often
pub const TIE_LABEL: &str = "Draw";

/// The statistics of a batch of duels between the same two fighters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMultiSimulationResult"))]
pub struct MultiSimulationResult {
    fighter1_name: String,
    fighter2_name: String,
    total_fights: u32,
    wins: EnumMap<Side, u32>,
    draws: u32,
    all_fights: Vec<FightResult>,
}

impl MultiSimulationResult {
    /// Builds the statistics of a batch
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the tallies do not add up to `total_fights`,
    /// if the amount of fights is not `total_fights`, or if the tallies do
    /// not agree with the verdicts of the fights
    pub fn new(
        fighter1_name: impl Into<String>,
        fighter2_name: impl Into<String>,
        total_fights: u32,
        fighter1_wins: u32,
        fighter2_wins: u32,
        draws: u32,
        all_fights: Vec<FightResult>,
    ) -> Result<Self, SimError> {
        let tally_error = SimError::TallyMismatch {
            wins1: fighter1_wins,
            wins2: fighter2_wins,
            draws,
            total: total_fights,
        };

        let tallied = u64::from(fighter1_wins)
            + u64::from(fighter2_wins)
            + u64::from(draws);
        if tallied != u64::from(total_fights) {
            return Err(tally_error);
        }
        if all_fights.len() as u64 != u64::from(total_fights) {
            return Err(SimError::FightCountMismatch {
                recorded: all_fights.len(),
                total: total_fights,
            });
        }

        let mut recorded_wins: EnumMap<Side, u32> = EnumMap::default();
        let mut recorded_draws = 0;
        for fight in &all_fights {
            match fight.verdict() {
                Verdict::Winner(side) => recorded_wins[side] += 1,
                Verdict::Draw(_) => recorded_draws += 1,
            }
        }
        let wins = EnumMap::from_array([fighter1_wins, fighter2_wins]);
        if recorded_wins != wins || recorded_draws != draws {
            return Err(tally_error);
        }

        Ok(Self {
            fighter1_name: fighter1_name.into(),
            fighter2_name: fighter2_name.into(),
            total_fights,
            wins,
            draws,
            all_fights,
        })
    }

    #[must_use]
    pub fn fighter1_name(&self) -> &str {
        &self.fighter1_name
    }

    #[must_use]
    pub fn fighter2_name(&self) -> &str {
        &self.fighter2_name
    }

    #[must_use]
    pub fn total_fights(&self) -> u32 {
        self.total_fights
    }

    #[must_use]
    pub fn wins(&self, side: Side) -> u32 {
        self.wins[side]
    }

    #[must_use]
    pub fn fighter1_wins(&self) -> u32 {
        self.wins[Side::Fighter1]
    }

    #[must_use]
    pub fn fighter2_wins(&self) -> u32 {
        self.wins[Side::Fighter2]
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Every fight of the batch in the order they were fought
    #[must_use]
    pub fn all_fights(&self) -> &[FightResult] {
        &self.all_fights
    }

    fn percent_of_fights(&self, count: u32) -> f64 {
        if self.total_fights == 0 {
            return 0.0;
        }
        f64::from(count) * 100.0 / f64::from(self.total_fights)
    }

    /// The win rate of the given side in percent (0-100)
    #[must_use]
    pub fn win_rate(&self, side: Side) -> f64 {
        self.percent_of_fights(self.wins[side])
    }

    #[must_use]
    pub fn fighter1_win_rate(&self) -> f64 {
        self.win_rate(Side::Fighter1)
    }

    #[must_use]
    pub fn fighter2_win_rate(&self) -> f64 {
        self.win_rate(Side::Fighter2)
    }

    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        self.percent_of_fights(self.draws)
    }

    /// The name of the fighter with more wins, or [`TIE_LABEL`], if both
    /// won equally often
    #[must_use]
    pub fn overall_winner(&self) -> &str {
        let (w1, w2) = (self.fighter1_wins(), self.fighter2_wins());
        match w1.cmp(&w2) {
            std::cmp::Ordering::Greater => &self.fighter1_name,
            std::cmp::Ordering::Less => &self.fighter2_name,
            std::cmp::Ordering::Equal => TIE_LABEL,
        }
    }

    #[must_use]
    pub fn win_margin(&self) -> u32 {
        self.fighter1_wins().abs_diff(self.fighter2_wins())
    }

    /// Whether the win margin is more than 10% of all fights
    #[must_use]
    pub fn is_significant(&self) -> bool {
        f64::from(self.win_margin()) > f64::from(self.total_fights) * 0.1
    }

    #[must_use]
    pub fn is_data_consistent(&self) -> bool {
        let tallied = u64::from(self.fighter1_wins())
            + u64::from(self.fighter2_wins())
            + u64::from(self.draws);
        tallied == u64::from(self.total_fights)
            && self.all_fights.len() as u64 == u64::from(self.total_fights)
    }

    /// The average amount of turns per fight, or 0 for an empty batch
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fight_duration(&self) -> f64 {
        if self.all_fights.is_empty() {
            return 0.0;
        }
        let turns: u64 = self
            .all_fights
            .iter()
            .map(|f| u64::from(f.total_turns()))
            .sum();
        turns as f64 / self.all_fights.len() as f64
    }

    /// Whether the batch is not empty and every duel in it ran into the
    /// turn limit
    #[must_use]
    pub fn every_fight_timed_out(&self) -> bool {
        !self.all_fights.is_empty()
            && self.all_fights.iter().all(|f| {
                f.verdict() == Verdict::Draw(DrawReason::Timeout)
            })
    }

    #[must_use]
    pub fn shortest_fight_duration(&self) -> Option<u32> {
        self.all_fights.iter().map(FightResult::total_turns).min()
    }

    #[must_use]
    pub fn longest_fight_duration(&self) -> Option<u32> {
        self.all_fights.iter().map(FightResult::total_turns).max()
    }
}

/// Runs the same duel many times and collects the statistics
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    duel: DuelEngine,
}

impl AggregationEngine {
    /// Creates an engine with the given limits
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the config does not validate
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        Ok(Self {
            duel: DuelEngine::new(config)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        self.duel.config()
    }

    #[must_use]
    pub fn duel_engine(&self) -> &DuelEngine {
        &self.duel
    }

    /// Lets `first` and `second` fight `fights` times. Both are reset before
    /// every duel, so nothing carries over between them. Because combat has
    /// no randomness, unchanged fighters produce the same result every time
    ///
    /// # Errors
    ///
    /// Will return `Err`, if `fights` is 0 or larger than the configured
    /// max batch size. This is checked before any duel runs. Errors of the
    /// individual duels abort the whole batch
    pub fn run_batch<A, B>(
        &self,
        first: &mut A,
        second: &mut B,
        fights: u32,
    ) -> Result<MultiSimulationResult, SimError>
    where
        A: Combatant + ?Sized,
        B: Combatant + ?Sized,
    {
        let max = self.config().max_batch_size;
        if fights == 0 || fights > max {
            return Err(SimError::BatchSize {
                requested: fights,
                max,
            });
        }

        info!(
            "Running {fights} duels: {} vs {}",
            first.name(),
            second.name()
        );

        let mut all_fights = Vec::with_capacity(fights as usize);
        let mut wins: EnumMap<Side, u32> = EnumMap::default();
        let mut draws = 0;

        for _ in 0..fights {
            let fight = self.duel.resolve(first, second)?;
            match fight.verdict() {
                Verdict::Winner(side) => wins[side] += 1,
                Verdict::Draw(_) => draws += 1,
            }
            all_fights.push(fight);
        }

        let result = MultiSimulationResult::new(
            first.name(),
            second.name(),
            fights,
            wins[Side::Fighter1],
            wins[Side::Fighter2],
            draws,
            all_fights,
        )?;

        if result.every_fight_timed_out() {
            warn!(
                "Every duel between {} and {} hit the limit of {} turns",
                result.fighter1_name(),
                result.fighter2_name(),
                self.config().max_turns
            );
        }
        info!(
            "{} won {}, {} won {}, {} draws",
            result.fighter1_name(),
            result.fighter1_wins(),
            result.fighter2_name(),
            result.fighter2_wins(),
            result.draws()
        );
        Ok(result)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMultiSimulationResult {
    fighter1_name: String,
    fighter2_name: String,
    total_fights: u32,
    wins: EnumMap<Side, u32>,
    draws: u32,
    all_fights: Vec<FightResult>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMultiSimulationResult> for MultiSimulationResult {
    type Error = SimError;

    fn try_from(raw: RawMultiSimulationResult) -> Result<Self, Self::Error> {
        MultiSimulationResult::new(
            raw.fighter1_name,
            raw.fighter2_name,
            raw.total_fights,
            raw.wins[Side::Fighter1],
            raw.wins[Side::Fighter2],
            raw.draws,
            raw.all_fights,
        )
    }
}
