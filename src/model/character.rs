use enum_map::{Enum, EnumMap};
use strum::EnumIter;

use crate::{
    error::SimError,
    model::{Perk, Weapon},
};

/// The skills a character can level. Levels range from 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    OneHanded,
    TwoHanded,
    Archery,
    Sneak,
}

impl Skill {
    pub const MAX_LEVEL: u8 = 100;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Health,
    Stamina,
    Magicka,
}

/// A single resource pool, that can never go below 0, or above its max
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPool"))]
pub struct Pool {
    current: f64,
    max: f64,
}

impl Pool {
    /// A full pool. Callers have to make sure `max` is finite and not
    /// negative
    #[must_use]
    pub(crate) fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Removes `amount` from the pool. Negative and NaN amounts are ignored
    pub fn drain(&mut self, amount: f64) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// The health, stamina & magicka of a fighter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVitals"))]
pub struct Vitals {
    pools: EnumMap<Resource, Pool>,
}

impl Vitals {
    /// Creates full pools with the given maximums
    ///
    /// # Errors
    ///
    /// Will return `Err`, if any max is negative or not finite, or if the max
    /// health is zero
    pub fn new(
        max_health: f64,
        max_stamina: f64,
        max_magicka: f64,
    ) -> Result<Self, SimError> {
        for max in [max_health, max_stamina, max_magicka] {
            check_max(max)?;
        }
        Self::from_pools(EnumMap::from_array([
            Pool::full(max_health),
            Pool::full(max_stamina),
            Pool::full(max_magicka),
        ]))
    }

    fn from_pools(pools: EnumMap<Resource, Pool>) -> Result<Self, SimError> {
        if pools[Resource::Health].max() <= 0.0 {
            return Err(SimError::InvalidFighter(
                "max health must be above zero",
            ));
        }
        Ok(Self { pools })
    }

    #[must_use]
    pub fn pool(&self, resource: Resource) -> &Pool {
        &self.pools[resource]
    }

    pub fn pool_mut(&mut self, resource: Resource) -> &mut Pool {
        &mut self.pools[resource]
    }

    #[must_use]
    pub fn health(&self) -> f64 {
        self.pools[Resource::Health].current()
    }

    pub fn restore_all(&mut self) {
        for (_, pool) in &mut self.pools {
            pool.restore();
        }
    }
}

/// Everything the duel engine needs from a fighter. Implementors only have
/// to expose their name, weapon and vitals. The rest has sensible defaults
pub trait Combatant {
    fn name(&self) -> &str;
    fn weapon(&self) -> &Weapon;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// The damage a single attack of this fighter does right now
    fn current_damage_output(&self) -> f64 {
        self.weapon().base_damage()
    }

    fn is_alive(&self) -> bool {
        self.vitals().health() > 0.0
    }

    fn take_damage(&mut self, damage: f64) {
        self.vitals_mut().pool_mut(Resource::Health).drain(damage);
    }

    /// Restores every resource pool to its max
    fn reset(&mut self) {
        self.vitals_mut().restore_all();
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCharacter"))]
pub struct Character {
    name: String,
    vitals: Vitals,
    weapon: Weapon,
    skills: EnumMap<Skill, u8>,
    /// Never contains two ranks of the same perk line
    perks: Vec<Perk>,
}

impl Character {
    /// Creates a character with full resource pools, no skills and no perks
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the name is blank, or the maximums are invalid.
    /// See [`Vitals::new`]
    pub fn new(
        name: impl Into<String>,
        max_health: f64,
        max_stamina: f64,
        max_magicka: f64,
        weapon: Weapon,
    ) -> Result<Self, SimError> {
        let vitals = Vitals::new(max_health, max_stamina, max_magicka)?;
        Self::with_vitals(name.into(), vitals, weapon)
    }

    fn with_vitals(
        name: String,
        vitals: Vitals,
        weapon: Weapon,
    ) -> Result<Self, SimError> {
        if name.trim().is_empty() {
            return Err(SimError::InvalidFighter("name is blank"));
        }
        Ok(Self {
            name,
            vitals,
            weapon,
            skills: EnumMap::default(),
            perks: Vec::new(),
        })
    }

    #[must_use]
    pub fn skill(&self, skill: Skill) -> u8 {
        self.skills[skill]
    }

    /// Sets the level of a skill. Levels above 100 are capped
    pub fn set_skill(&mut self, skill: Skill, level: u8) {
        self.skills[skill] = level.min(Skill::MAX_LEVEL);
    }

    #[must_use]
    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    #[must_use]
    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }

    /// Adds a perk. If another rank of the same line is already held, only
    /// the higher rank is kept
    pub fn add_perk(&mut self, perk: Perk) {
        if let Some(held) =
            self.perks.iter_mut().find(|p| p.line() == perk.line())
        {
            if (perk as usize) > (*held as usize) {
                *held = perk;
            }
            return;
        }
        self.perks.push(perk);
    }

    /// The combined multiplier of all perks, that boost every plain attack
    /// with the equipped weapon. Duels have no critical hits, power attacks
    /// or sneak attacks, so only the Armsman, Barbarian and Overdraw ranks of
    /// the weapon's own tree count
    #[must_use]
    pub fn perk_damage_multiplier(&self) -> f64 {
        let weapon_skill = self.weapon.typ().skill();
        self.perks
            .iter()
            .filter(|p| p.applies_to_every_attack())
            .filter(|p| p.tree().skill() == Some(weapon_skill))
            .map(|p| p.multiplier())
            .product()
    }

    #[must_use]
    pub fn health(&self) -> f64 {
        self.vitals.health()
    }

    #[must_use]
    pub fn max_health(&self) -> f64 {
        self.vitals.pool(Resource::Health).max()
    }
}

fn check_max(max: f64) -> Result<(), SimError> {
    if !max.is_finite() || max < 0.0 {
        return Err(SimError::InvalidFighter(
            "resource maximums must be finite, non negative numbers",
        ));
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPool {
    current: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPool> for Pool {
    type Error = SimError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        check_max(raw.max)?;
        if !(0.0..=raw.max).contains(&raw.current) {
            return Err(SimError::InvalidFighter(
                "current resource value must be between zero and the max",
            ));
        }
        Ok(Pool {
            current: raw.current,
            max: raw.max,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVitals {
    pools: EnumMap<Resource, Pool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVitals> for Vitals {
    type Error = SimError;

    fn try_from(raw: RawVitals) -> Result<Self, Self::Error> {
        Vitals::from_pools(raw.pools)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCharacter {
    name: String,
    vitals: Vitals,
    weapon: Weapon,
    skills: EnumMap<Skill, u8>,
    perks: Vec<Perk>,
}

/// Skills above the max level are capped and lower ranks of a perk line are
/// dropped, the same way [`Character::set_skill`] and
/// [`Character::add_perk`] handle them
#[cfg(feature = "serde")]
impl TryFrom<RawCharacter> for Character {
    type Error = SimError;

    fn try_from(raw: RawCharacter) -> Result<Self, Self::Error> {
        let mut character =
            Character::with_vitals(raw.name, raw.vitals, raw.weapon)?;
        for (skill, level) in raw.skills {
            character.set_skill(skill, level);
        }
        for perk in raw.perks {
            character.add_perk(perk);
        }
        Ok(character)
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn current_damage_output(&self) -> f64 {
        self.weapon.base_damage() * self.perk_damage_multiplier()
    }
}
