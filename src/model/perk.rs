use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::model::Skill;

/// The perk tree a perk belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PerkTree {
    OneHanded,
    TwoHanded,
    Archery,
    Sneak,
    HeavyArmor,
    LightArmor,
    Block,
}

impl PerkTree {
    /// The skill, that levels up this tree, if it is one of the tracked
    /// skills
    #[must_use]
    pub fn skill(self) -> Option<Skill> {
        match self {
            PerkTree::OneHanded => Some(Skill::OneHanded),
            PerkTree::TwoHanded => Some(Skill::TwoHanded),
            PerkTree::Archery => Some(Skill::Archery),
            PerkTree::Sneak => Some(Skill::Sneak),
            PerkTree::HeavyArmor | PerkTree::LightArmor | PerkTree::Block => {
                None
            }
        }
    }
}

/// A perk a character can have. Ranked perks (Armsman 1/5 - 5/5, etc.) are
/// separate variants. Only the highest rank of a line is ever held at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Perk {
    Armsman1,
    Armsman2,
    Armsman3,
    Armsman4,
    Armsman5,
    DualFlurry,
    DualSavagery,
    CriticalCharge,

    Barbarian1,
    Barbarian2,
    Barbarian3,
    Barbarian4,
    Barbarian5,
    ChampionsStance,
    DevastatingBlow,

    Overdraw1,
    Overdraw2,
    Overdraw3,
    Overdraw4,
    Overdraw5,
    CriticalShot,
    HuntersDiscipline,
    QuickShot,
    SteadyHand,
    Ranger,

    Backstab,
    AssassinsBlade,
    DeadlyAim,
    ShadowWarrior,

    Juggernaut1,
    Juggernaut2,
    Juggernaut3,
    Juggernaut4,
    Juggernaut5,
    Conditioning,
    MatchingSet,

    AgileDefender1,
    AgileDefender2,
    AgileDefender3,
    AgileDefender4,
    AgileDefender5,
    WindWalker,

    ShieldWall1,
    ShieldWall2,
    ShieldWall3,
    ShieldWall4,
    ShieldWall5,
    ShieldCharge,
}

/// The static data of a single perk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerkInfo {
    pub display_name: &'static str,
    pub multiplier: f64,
    pub tree: PerkTree,
    /// Whether the multiplier applies to every plain attack. Perks, that
    /// only work for critical hits, power attacks, sneak attacks, certain
    /// targets, or that boost speed instead of damage, do not
    pub applies_to_every_attack: bool,
}

#[allow(clippy::enum_glob_use, clippy::match_same_arms)]
impl Perk {
    #[must_use]
    pub fn info(self) -> PerkInfo {
        use Perk::*;
        use PerkTree as T;

        let (display_name, multiplier, tree) = match self {
            // 20% more one-handed damage per rank
            Armsman1 => ("Armsman 1/5", 1.2, T::OneHanded),
            Armsman2 => ("Armsman 2/5", 1.4, T::OneHanded),
            Armsman3 => ("Armsman 3/5", 1.6, T::OneHanded),
            Armsman4 => ("Armsman 4/5", 1.8, T::OneHanded),
            Armsman5 => ("Armsman 5/5", 2.0, T::OneHanded),
            // Attack speed only
            DualFlurry => ("Dual Flurry", 1.2, T::OneHanded),
            // Dual wielding power attacks only
            DualSavagery => ("Dual Savagery", 1.5, T::OneHanded),
            CriticalCharge => ("Critical Charge", 1.0, T::OneHanded),

            Barbarian1 => ("Barbarian 1/5", 1.2, T::TwoHanded),
            Barbarian2 => ("Barbarian 2/5", 1.4, T::TwoHanded),
            Barbarian3 => ("Barbarian 3/5", 1.6, T::TwoHanded),
            Barbarian4 => ("Barbarian 4/5", 1.8, T::TwoHanded),
            Barbarian5 => ("Barbarian 5/5", 2.0, T::TwoHanded),
            // Power attacks only
            ChampionsStance => ("Champion's Stance", 1.25, T::TwoHanded),
            DevastatingBlow => ("Devastating Blow", 1.0, T::TwoHanded),

            Overdraw1 => ("Overdraw 1/5", 1.2, T::Archery),
            Overdraw2 => ("Overdraw 2/5", 1.4, T::Archery),
            Overdraw3 => ("Overdraw 3/5", 1.6, T::Archery),
            Overdraw4 => ("Overdraw 4/5", 1.8, T::Archery),
            Overdraw5 => ("Overdraw 5/5", 2.0, T::Archery),
            // Critical hits only
            CriticalShot => ("Critical Shot", 1.5, T::Archery),
            // Animals only
            HuntersDiscipline => ("Hunter's Discipline", 1.25, T::Archery),
            // Draw speed only
            QuickShot => ("Quick Shot", 1.3, T::Archery),
            SteadyHand => ("Steady Hand", 1.0, T::Archery),
            Ranger => ("Ranger", 1.0, T::Archery),

            // Sneak attack multipliers. Duels never sneak attack
            Backstab => ("Backstab", 6.0, T::Sneak),
            AssassinsBlade => ("Assassin's Blade", 15.0, T::Sneak),
            DeadlyAim => ("Deadly Aim", 3.0, T::Sneak),
            ShadowWarrior => ("Shadow Warrior", 1.0, T::Sneak),

            Juggernaut1 => ("Juggernaut 1/5", 1.2, T::HeavyArmor),
            Juggernaut2 => ("Juggernaut 2/5", 1.4, T::HeavyArmor),
            Juggernaut3 => ("Juggernaut 3/5", 1.6, T::HeavyArmor),
            Juggernaut4 => ("Juggernaut 4/5", 1.8, T::HeavyArmor),
            Juggernaut5 => ("Juggernaut 5/5", 2.0, T::HeavyArmor),
            Conditioning => ("Conditioning", 1.0, T::HeavyArmor),
            MatchingSet => ("Matching Set", 1.25, T::HeavyArmor),

            AgileDefender1 => ("Agile Defender 1/5", 1.2, T::LightArmor),
            AgileDefender2 => ("Agile Defender 2/5", 1.4, T::LightArmor),
            AgileDefender3 => ("Agile Defender 3/5", 1.6, T::LightArmor),
            AgileDefender4 => ("Agile Defender 4/5", 1.8, T::LightArmor),
            AgileDefender5 => ("Agile Defender 5/5", 2.0, T::LightArmor),
            WindWalker => ("Wind Walker", 1.0, T::LightArmor),

            ShieldWall1 => ("Shield Wall 1/5", 1.2, T::Block),
            ShieldWall2 => ("Shield Wall 2/5", 1.4, T::Block),
            ShieldWall3 => ("Shield Wall 3/5", 1.6, T::Block),
            ShieldWall4 => ("Shield Wall 4/5", 1.8, T::Block),
            ShieldWall5 => ("Shield Wall 5/5", 2.0, T::Block),
            ShieldCharge => ("Shield Charge", 1.0, T::Block),
        };
        PerkInfo {
            display_name,
            multiplier,
            tree,
            applies_to_every_attack: matches!(
                self.line(),
                Armsman1 | Barbarian1 | Overdraw1
            ),
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        self.info().multiplier
    }

    #[must_use]
    pub fn tree(self) -> PerkTree {
        self.info().tree
    }

    #[must_use]
    pub fn boosts_damage(self) -> bool {
        self.multiplier() > 1.0
    }

    #[must_use]
    pub fn applies_to_every_attack(self) -> bool {
        self.info().applies_to_every_attack
    }

    /// The bonus of this perk in percent. 1.2 => 20%
    #[must_use]
    pub fn damage_increase_percent(self) -> f64 {
        (self.multiplier() - 1.0) * 100.0
    }

    /// The first rank of the line this perk belongs to. Unranked perks are
    /// their own line
    #[must_use]
    pub fn line(self) -> Perk {
        use Perk::*;
        match self {
            Armsman1 | Armsman2 | Armsman3 | Armsman4 | Armsman5 => Armsman1,
            Barbarian1 | Barbarian2 | Barbarian3 | Barbarian4 | Barbarian5 => {
                Barbarian1
            }
            Overdraw1 | Overdraw2 | Overdraw3 | Overdraw4 | Overdraw5 => {
                Overdraw1
            }
            Juggernaut1 | Juggernaut2 | Juggernaut3 | Juggernaut4
            | Juggernaut5 => Juggernaut1,
            AgileDefender1 | AgileDefender2 | AgileDefender3
            | AgileDefender4 | AgileDefender5 => AgileDefender1,
            ShieldWall1 | ShieldWall2 | ShieldWall3 | ShieldWall4
            | ShieldWall5 => ShieldWall1,
            other => other,
        }
    }

    /// Every perk, that has a multiplier above 1.0
    pub fn damage_boosting() -> impl Iterator<Item = Perk> {
        Perk::iter().filter(|p| p.boosts_damage())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Perk::Armsman5, "Armsman 5/5", 2.0)]
    #[case(Perk::AssassinsBlade, "Assassin's Blade", 15.0)]
    #[case(Perk::ChampionsStance, "Champion's Stance", 1.25)]
    #[case(Perk::SteadyHand, "Steady Hand", 1.0)]
    fn test_catalog_entries(
        #[case] perk: Perk,
        #[case] name: &str,
        #[case] multiplier: f64,
    ) {
        assert_eq!(perk.display_name(), name);
        assert!((perk.multiplier() - multiplier).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boost_predicate() {
        assert!(Perk::Armsman1.boosts_damage());
        assert!(!Perk::CriticalCharge.boosts_damage());
        assert!((Perk::Armsman5.damage_increase_percent() - 100.0).abs() < 1e-9);
        assert!(Perk::damage_boosting().all(|p| p.multiplier() > 1.0));
        assert!(!Perk::damage_boosting().any(|p| p == Perk::Ranger));
    }

    #[test]
    fn test_no_multiplier_below_one() {
        assert_eq!(Perk::iter().count(), Perk::COUNT);
        for perk in Perk::iter() {
            assert!(perk.multiplier() >= 1.0, "{perk:?}");
        }
    }

    #[rstest]
    #[case(Perk::Armsman1, true)]
    #[case(Perk::Barbarian3, true)]
    #[case(Perk::Overdraw5, true)]
    #[case(Perk::DualFlurry, false)]
    #[case(Perk::DualSavagery, false)]
    #[case(Perk::ChampionsStance, false)]
    #[case(Perk::CriticalShot, false)]
    #[case(Perk::HuntersDiscipline, false)]
    #[case(Perk::QuickShot, false)]
    #[case(Perk::Backstab, false)]
    #[case(Perk::Juggernaut5, false)]
    fn test_plain_attack_perks(#[case] perk: Perk, #[case] applies: bool) {
        assert_eq!(perk.applies_to_every_attack(), applies);
    }

    #[test]
    fn test_lines() {
        assert_eq!(Perk::Armsman4.line(), Perk::Armsman1);
        assert_eq!(Perk::ShieldWall5.line(), Perk::ShieldWall1);
        assert_eq!(Perk::Backstab.line(), Perk::Backstab);
        for perk in Perk::iter() {
            assert_eq!(perk.line().tree(), perk.tree());
        }
    }
}
