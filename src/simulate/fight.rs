use enum_map::Enum;

use crate::{error::SimError, model::CombatEvent};

/// One of the two fighters in a duel, by the position it was passed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The first fighter. This one always attacks first
    Fighter1,
    Fighter2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawReason {
    /// Both fighters were still standing once the turn limit was reached
    Timeout,
    /// Both fighters were down at the end of the duel. Fighters that start
    /// the duel alive can not end up here, because the duel stops as soon
    /// as the first one goes down
    MutualKill,
}

impl DrawReason {
    /// The name reported as the "winner" of a duel, that ended this way
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DrawReason::Timeout => "Draw (Timeout, Max Turns Exceeded)",
            DrawReason::MutualKill => "Draw (Both Characters Died)",
        }
    }
}

/// The terminal state of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Winner(Side),
    Draw(DrawReason),
}

/// The full record of a single duel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFightResult"))]
pub struct FightResult {
    fighter1_name: String,
    fighter2_name: String,
    verdict: Verdict,
    total_turns: u32,
    /// Every attack in the order it happened
    events: Vec<CombatEvent>,
}

impl FightResult {
    /// Builds the result of a duel. The result takes ownership of the
    /// events, so nobody else can change them afterwards
    ///
    /// # Errors
    ///
    /// Will return `Err`, if a name is blank, or if the amount of events can
    /// not have happened in `total_turns` turns. Every turn has two attacks,
    /// except for the last one, which may end after the first attack
    pub fn new(
        fighter1_name: impl Into<String>,
        fighter2_name: impl Into<String>,
        verdict: Verdict,
        total_turns: u32,
        events: Vec<CombatEvent>,
    ) -> Result<Self, SimError> {
        let fighter1_name = fighter1_name.into();
        let fighter2_name = fighter2_name.into();
        if fighter1_name.trim().is_empty() || fighter2_name.trim().is_empty() {
            return Err(SimError::InvalidFighter("fighter name is blank"));
        }

        let max_events = u64::from(total_turns) * 2;
        let min_events = max_events.saturating_sub(1);
        let event_count = events.len() as u64;
        if event_count < min_events || event_count > max_events {
            return Err(SimError::EventCountMismatch {
                events: events.len(),
                turns: total_turns,
            });
        }

        Ok(Self {
            fighter1_name,
            fighter2_name,
            verdict,
            total_turns,
            events,
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
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The name of the winner, or the label of the draw, if nobody won
    #[must_use]
    pub fn winner_name(&self) -> &str {
        match self.verdict {
            Verdict::Winner(Side::Fighter1) => &self.fighter1_name,
            Verdict::Winner(Side::Fighter2) => &self.fighter2_name,
            Verdict::Draw(reason) => reason.label(),
        }
    }

    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.total_turns
    }

    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    #[must_use]
    pub fn did_fighter1_win(&self) -> bool {
        self.verdict == Verdict::Winner(Side::Fighter1)
    }

    #[must_use]
    pub fn did_fighter2_win(&self) -> bool {
        self.verdict == Verdict::Winner(Side::Fighter2)
    }

    #[must_use]
    pub fn was_draw(&self) -> bool {
        matches!(self.verdict, Verdict::Draw(_))
    }

    fn attacks_by<'a>(
        &'a self,
        fighter_name: &'a str,
    ) -> impl Iterator<Item = &'a CombatEvent> + 'a {
        self.events
            .iter()
            .filter(move |e| e.attacker_name() == fighter_name)
    }

    /// The amount of attacks the fighter with this name did
    #[must_use]
    pub fn attack_count_by(&self, fighter_name: &str) -> usize {
        self.attacks_by(fighter_name).count()
    }

    /// The sum of all damage the fighter with this name dealt
    #[must_use]
    pub fn total_damage_by(&self, fighter_name: &str) -> f64 {
        self.attacks_by(fighter_name)
            .map(CombatEvent::damage_dealt)
            .sum()
    }

    /// The average damage per attack of the fighter with this name, or 0, if
    /// they never attacked
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_damage_by(&self, fighter_name: &str) -> f64 {
        let attacks = self.attack_count_by(fighter_name);
        if attacks == 0 {
            return 0.0;
        }
        self.total_damage_by(fighter_name) / attacks as f64
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFightResult {
    fighter1_name: String,
    fighter2_name: String,
    verdict: Verdict,
    total_turns: u32,
    events: Vec<CombatEvent>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFightResult> for FightResult {
    type Error = SimError;

    fn try_from(raw: RawFightResult) -> Result<Self, Self::Error> {
        FightResult::new(
            raw.fighter1_name,
            raw.fighter2_name,
            raw.verdict,
            raw.total_turns,
            raw.events,
        )
    }
}
