//! Resolves duels between two fighters and aggregates the results of many
//! duels into batch statistics.
//!
//! Combat is fully deterministic. The first fighter always attacks first and
//! every attack deals the current damage output of the attacker. Running the
//! same duel twice thus always yields the same result.
//!
//! Fighters are mutated in place while a duel runs. The engines take both of
//! them by `&mut`, so a fighter can never take part in two duels at once. If
//! you want to run duels in parallel, give every duel its own clone of the
//! fighters.
mod batch;
mod fight;

pub use batch::*;
pub use fight::*;
use log::{debug, trace};

use crate::{
    config::SimulationConfig,
    error::SimError,
    model::{CombatEvent, Combatant},
};

/// Resolves a single duel
#[derive(Debug, Clone, Default)]
pub struct DuelEngine {
    config: SimulationConfig,
}

impl DuelEngine {
    /// Creates an engine with the given limits
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the config does not validate
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Resets both fighters and lets them fight, until one of them goes down,
    /// or the turn limit is reached. In every turn `first` attacks, then
    /// `second` strikes back, if it is still alive
    ///
    /// # Errors
    ///
    /// Will return `Err`, if a fighter reports a negative or non finite
    /// damage output, or has a blank name. Well behaved fighters, like
    /// [`crate::model::Character`], never do that
    pub fn resolve<A, B>(
        &self,
        first: &mut A,
        second: &mut B,
    ) -> Result<FightResult, SimError>
    where
        A: Combatant + ?Sized,
        B: Combatant + ?Sized,
    {
        first.reset();
        second.reset();

        let mut events = Vec::new();
        let mut turn = 0;

        while first.is_alive()
            && second.is_alive()
            && turn < self.config.max_turns
        {
            turn += 1;

            events.push(strike(first, second)?);
            if !second.is_alive() {
                break;
            }

            events.push(strike(second, first)?);
            if !first.is_alive() {
                break;
            }
        }

        // If both are still alive, the loop can only have stopped because of
        // the turn limit
        let verdict = match (first.is_alive(), second.is_alive()) {
            (true, true) => Verdict::Draw(DrawReason::Timeout),
            (true, false) => Verdict::Winner(Side::Fighter1),
            (false, true) => Verdict::Winner(Side::Fighter2),
            (false, false) => Verdict::Draw(DrawReason::MutualKill),
        };

        debug!(
            "{} vs {} ended after {turn} turns and {} attacks: {verdict:?}",
            first.name(),
            second.name(),
            events.len()
        );

        FightResult::new(first.name(), second.name(), verdict, turn, events)
    }
}

/// A single attack of `attacker` on `defender`
fn strike<A, D>(attacker: &A, defender: &mut D) -> Result<CombatEvent, SimError>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let damage = attacker.current_damage_output();
    let event = CombatEvent::new(
        attacker.name(),
        defender.name(),
        damage,
        attacker.weapon().name(),
        false,
        false,
    )?;
    defender.take_damage(damage);
    trace!(
        "{} hits {} for {damage}, {} health left",
        attacker.name(),
        defender.name(),
        defender.vitals().health()
    );
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Character, Resource, Vitals, Weapon, WeaponType};

    pub(crate) fn fighter(name: &str, health: f64, damage: f64) -> Character {
        let weapon = Weapon::new(
            format!("{name}'s Sword"),
            damage,
            1.0,
            WeaponType::OneHandedSword,
        )
        .unwrap();
        Character::new(name, health, 100.0, 100.0, weapon).unwrap()
    }

    #[test]
    fn test_first_fighter_wins_mid_turn() {
        let mut a = fighter("A", 200.0, 50.0);
        let mut b = fighter("B", 100.0, 10.0);

        let fight = DuelEngine::default().resolve(&mut a, &mut b).unwrap();

        assert_eq!(fight.verdict(), Verdict::Winner(Side::Fighter1));
        assert_eq!(fight.winner_name(), "A");
        assert_eq!(fight.total_turns(), 2);
        assert_eq!(fight.events().len(), 3);

        let attackers: Vec<_> =
            fight.events().iter().map(CombatEvent::attacker_name).collect();
        assert_eq!(attackers, ["A", "B", "A"]);
        assert!((a.health() - 190.0).abs() < f64::EPSILON);
        assert!(b.health().abs() < f64::EPSILON);
        assert!(fight.events().iter().all(|e| !e.is_special_attack()));
        assert_eq!(fight.events()[1].weapon_used(), "B's Sword");
    }

    #[test]
    fn test_second_fighter_wins_on_counter() {
        let mut archer = fighter("Stealth Archer", 200.0, 19.0);
        let mut warrior = fighter("Two-Handed Warrior", 400.0, 25.0);

        let fight = DuelEngine::default()
            .resolve(&mut archer, &mut warrior)
            .unwrap();

        assert!(fight.did_fighter2_win());
        assert_eq!(fight.total_turns(), 8);
        assert_eq!(fight.events().len(), 16);
        let archer_damage = fight.total_damage_by("Stealth Archer");
        let warrior_damage = fight.total_damage_by("Two-Handed Warrior");
        assert!((archer_damage - 152.0).abs() < 1e-9);
        assert!((warrior_damage - 200.0).abs() < 1e-9);
        let warrior_average = fight.average_damage_by("Two-Handed Warrior");
        assert!((warrior_average - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_damage_times_out() {
        let config = SimulationConfig::new().with_max_turns(37);
        let engine = DuelEngine::new(config).unwrap();
        let mut a = fighter("Pacifist", 100.0, 0.0);
        let mut b = fighter("Also Pacifist", 100.0, 0.0);

        let fight = engine.resolve(&mut a, &mut b).unwrap();

        assert_eq!(fight.verdict(), Verdict::Draw(DrawReason::Timeout));
        assert_eq!(fight.total_turns(), 37);
        assert_eq!(fight.events().len(), 74);
        assert_eq!(fight.winner_name(), DrawReason::Timeout.label());
    }

    #[test]
    fn test_kill_on_the_last_allowed_turn_is_a_win() {
        // B goes down with the very first hit of turn 2, which is the limit
        let engine =
            DuelEngine::new(SimulationConfig::new().with_max_turns(2)).unwrap();
        let mut a = fighter("A", 200.0, 50.0);
        let mut b = fighter("B", 100.0, 10.0);

        let fight = engine.resolve(&mut a, &mut b).unwrap();
        assert!(fight.did_fighter1_win());
        assert_eq!(fight.total_turns(), 2);
    }

    #[test]
    fn test_fighters_are_reset_before_the_duel() {
        let mut a = fighter("A", 200.0, 50.0);
        let mut b = fighter("B", 100.0, 10.0);
        a.take_damage(195.0);

        let engine = DuelEngine::default();
        let first = engine.resolve(&mut a, &mut b).unwrap();
        let second = engine.resolve(&mut a, &mut b).unwrap();

        assert!(first.did_fighter1_win());
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_input_same_result() {
        let mut rng = fastrand::Rng::with_seed(7);
        let engine = DuelEngine::default();
        for _ in 0..200 {
            let mut a = fighter(
                "A",
                rng.f64().mul_add(500.0, 1.0),
                rng.f64() * 60.0,
            );
            let mut b = fighter(
                "B",
                rng.f64().mul_add(500.0, 1.0),
                rng.f64() * 60.0,
            );

            let first = engine.resolve(&mut a, &mut b).unwrap();
            let second = engine.resolve(&mut a, &mut b).unwrap();
            assert_eq!(first, second);
            assert!(first.total_turns() <= engine.config().max_turns);
        }
    }

    #[test]
    fn test_positive_damage_always_finishes() {
        let mut rng = fastrand::Rng::with_seed(1337);
        let engine = DuelEngine::default();
        for _ in 0..200 {
            let a_health = f64::from(rng.u32(1..=1000));
            let b_health = f64::from(rng.u32(1..=1000));
            let a_damage = f64::from(rng.u32(1..=100));
            let b_damage = f64::from(rng.u32(1..=100));
            let mut a = fighter("A", a_health, a_damage);
            let mut b = fighter("B", b_health, b_damage);

            let fight = engine.resolve(&mut a, &mut b).unwrap();

            assert!(!fight.was_draw());
            assert!(fight.total_turns() <= engine.config().max_turns);
            // Every attack, but possibly the last one of the winner, came in
            // pairs
            let expected_events = fight.total_turns() as usize * 2
                - usize::from(fight.did_fighter1_win());
            assert_eq!(fight.events().len(), expected_events);

            let a_total = fight.total_damage_by("A");
            let a_sum: f64 = fight
                .events()
                .iter()
                .filter(|e| e.attacker_name() == "A")
                .map(CombatEvent::damage_dealt)
                .sum();
            assert!((a_total - a_sum).abs() < 1e-9);
        }
    }

    /// A fighter, that is down before the duel even starts
    struct Fallen {
        name: &'static str,
        weapon: Weapon,
        vitals: Vitals,
    }

    impl Fallen {
        fn new(name: &'static str) -> Self {
            let mut vitals = Vitals::new(10.0, 0.0, 0.0).unwrap();
            vitals.pool_mut(Resource::Health).drain(10.0);
            Self {
                name,
                weapon: Weapon::new(
                    "Fists",
                    1.0,
                    1.0,
                    WeaponType::OneHandedMace,
                )
                .unwrap(),
                vitals,
            }
        }
    }

    impl Combatant for Fallen {
        fn name(&self) -> &str {
            self.name
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

        fn reset(&mut self) {}
    }

    #[test]
    fn test_both_down_is_a_mutual_kill() {
        let mut a = Fallen::new("A");
        let mut b = Fallen::new("B");

        let fight = DuelEngine::default().resolve(&mut a, &mut b).unwrap();

        assert_eq!(fight.verdict(), Verdict::Draw(DrawReason::MutualKill));
        assert_eq!(fight.total_turns(), 0);
        assert!(fight.events().is_empty());
    }

    #[test]
    fn test_one_side_down_from_the_start() {
        let mut a = fighter("A", 100.0, 5.0);
        let mut b = Fallen::new("B");

        let fight = DuelEngine::default().resolve(&mut a, &mut b).unwrap();
        assert!(fight.did_fighter1_win());
        assert_eq!(fight.total_turns(), 0);
    }

    /// A fighter, that reports nonsense damage
    struct Cursed(Character);

    impl Combatant for Cursed {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn weapon(&self) -> &Weapon {
            self.0.weapon()
        }

        fn vitals(&self) -> &Vitals {
            self.0.vitals()
        }

        fn vitals_mut(&mut self) -> &mut Vitals {
            self.0.vitals_mut()
        }

        fn current_damage_output(&self) -> f64 {
            -3.0
        }
    }

    #[test]
    fn test_negative_damage_is_rejected() {
        let mut a = Cursed(fighter("A", 100.0, 5.0));
        let mut b = fighter("B", 100.0, 5.0);

        let res = DuelEngine::default().resolve(&mut a, &mut b);
        assert!(matches!(res, Err(SimError::InvalidEvent(_))));
    }

    #[test]
    fn test_works_with_trait_objects() {
        let mut a: Box<dyn Combatant> = Box::new(fighter("A", 200.0, 50.0));
        let mut b: Box<dyn Combatant> = Box::new(fighter("B", 100.0, 10.0));

        let fight = DuelEngine::default()
            .resolve(a.as_mut(), b.as_mut())
            .unwrap();
        assert!(fight.did_fighter1_win());
    }
}
