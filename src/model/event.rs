use chrono::{DateTime, Local};

use crate::error::SimError;

/// The outcome of a single attack. Events can only be built through
/// [`CombatEvent::new`] and [`CombatEvent::at`], which validate the data
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCombatEvent"))]
pub struct CombatEvent {
    attacker_name: String,
    defender_name: String,
    damage_dealt: f64,
    weapon_used: String,
    was_critical: bool,
    was_sneak_attack: bool,
    /// The moment the attack was resolved
    timestamp: DateTime<Local>,
}

impl CombatEvent {
    /// Creates an event, that happened right now
    ///
    /// # Errors
    ///
    /// See [`CombatEvent::at`]
    pub fn new(
        attacker_name: &str,
        defender_name: &str,
        damage_dealt: f64,
        weapon_used: &str,
        was_critical: bool,
        was_sneak_attack: bool,
    ) -> Result<Self, SimError> {
        Self::at(
            attacker_name,
            defender_name,
            damage_dealt,
            weapon_used,
            was_critical,
            was_sneak_attack,
            Local::now(),
        )
    }

    /// Creates an event, that happened at the given time
    ///
    /// # Errors
    ///
    /// Will return `Err`, if either name is blank, or the damage is negative
    /// or not a finite number
    pub fn at(
        attacker_name: &str,
        defender_name: &str,
        damage_dealt: f64,
        weapon_used: &str,
        was_critical: bool,
        was_sneak_attack: bool,
        timestamp: DateTime<Local>,
    ) -> Result<Self, SimError> {
        if attacker_name.trim().is_empty() {
            return Err(SimError::InvalidEvent("attacker name is blank"));
        }
        if defender_name.trim().is_empty() {
            return Err(SimError::InvalidEvent("defender name is blank"));
        }
        if !damage_dealt.is_finite() || damage_dealt < 0.0 {
            return Err(SimError::InvalidEvent(
                "damage must be a finite, non negative number",
            ));
        }
        Ok(Self {
            attacker_name: attacker_name.to_string(),
            defender_name: defender_name.to_string(),
            damage_dealt,
            weapon_used: weapon_used.to_string(),
            was_critical,
            was_sneak_attack,
            timestamp,
        })
    }

    #[must_use]
    pub fn attacker_name(&self) -> &str {
        &self.attacker_name
    }

    #[must_use]
    pub fn defender_name(&self) -> &str {
        &self.defender_name
    }

    #[must_use]
    pub fn damage_dealt(&self) -> f64 {
        self.damage_dealt
    }

    #[must_use]
    pub fn weapon_used(&self) -> &str {
        &self.weapon_used
    }

    #[must_use]
    pub fn was_critical(&self) -> bool {
        self.was_critical
    }

    #[must_use]
    pub fn was_sneak_attack(&self) -> bool {
        self.was_sneak_attack
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    #[must_use]
    pub fn is_special_attack(&self) -> bool {
        self.was_critical || self.was_sneak_attack
    }
}

/// Two events are equal, if they describe the same attack. When the attack
/// was resolved is not part of that
impl PartialEq for CombatEvent {
    fn eq(&self, other: &Self) -> bool {
        self.attacker_name == other.attacker_name
            && self.defender_name == other.defender_name
            && self.damage_dealt.to_bits() == other.damage_dealt.to_bits()
            && self.weapon_used == other.weapon_used
            && self.was_critical == other.was_critical
            && self.was_sneak_attack == other.was_sneak_attack
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCombatEvent {
    attacker_name: String,
    defender_name: String,
    damage_dealt: f64,
    weapon_used: String,
    was_critical: bool,
    was_sneak_attack: bool,
    timestamp: DateTime<Local>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCombatEvent> for CombatEvent {
    type Error = SimError;

    fn try_from(raw: RawCombatEvent) -> Result<Self, Self::Error> {
        CombatEvent::at(
            &raw.attacker_name,
            &raw.defender_name,
            raw.damage_dealt,
            &raw.weapon_used,
            raw.was_critical,
            raw.was_sneak_attack,
            raw.timestamp,
        )
    }
}
