use strum::EnumIter;

use crate::{error::SimError, model::Skill};

/// The kind of weapon. This decides which skill, and thus which perks,
/// govern the damage of a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    OneHandedSword,
    OneHandedDagger,
    OneHandedMace,
    OneHandedAxe,
    TwoHandedGreatsword,
    TwoHandedBattleaxe,
    TwoHandedWarhammer,
    Bow,
    Crossbow,
}

impl WeaponType {
    #[must_use]
    pub fn skill(self) -> Skill {
        use WeaponType::*;
        match self {
            OneHandedSword | OneHandedDagger | OneHandedMace | OneHandedAxe => {
                Skill::OneHanded
            }
            TwoHandedGreatsword | TwoHandedBattleaxe | TwoHandedWarhammer => {
                Skill::TwoHanded
            }
            Bow | Crossbow => Skill::Archery,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWeapon"))]
pub struct Weapon {
    name: String,
    base_damage: f64,
    /// Swings (or shots) per second relative to a normal one-handed weapon
    attack_speed: f64,
    typ: WeaponType,
}

impl Weapon {
    /// Creates a new weapon
    ///
    /// # Errors
    ///
    /// Will return `Err`, if the name is blank, or either the damage or the
    /// speed is negative or not a finite number
    pub fn new(
        name: impl Into<String>,
        base_damage: f64,
        attack_speed: f64,
        typ: WeaponType,
    ) -> Result<Self, SimError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::InvalidWeapon("name is blank"));
        }
        if !base_damage.is_finite() || base_damage < 0.0 {
            return Err(SimError::InvalidWeapon(
                "base damage must be a finite, non negative number",
            ));
        }
        if !attack_speed.is_finite() || attack_speed < 0.0 {
            return Err(SimError::InvalidWeapon(
                "attack speed must be a finite, non negative number",
            ));
        }
        Ok(Self {
            name,
            base_damage,
            attack_speed,
            typ,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn base_damage(&self) -> f64 {
        self.base_damage
    }

    #[must_use]
    pub fn attack_speed(&self) -> f64 {
        self.attack_speed
    }

    #[must_use]
    pub fn typ(&self) -> WeaponType {
        self.typ
    }

    /// Damage per second, if every swing connects
    #[must_use]
    pub fn dps(&self) -> f64 {
        self.base_damage * self.attack_speed
    }
}

/// A weapon as it was read, before it has been validated
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWeapon {
    name: String,
    base_damage: f64,
    attack_speed: f64,
    typ: WeaponType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWeapon> for Weapon {
    type Error = SimError;

    fn try_from(raw: RawWeapon) -> Result<Self, Self::Error> {
        Weapon::new(raw.name, raw.base_damage, raw.attack_speed, raw.typ)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_dps() {
        let greatsword = Weapon::new(
            "Dragonbone Greatsword",
            25.0,
            0.7,
            WeaponType::TwoHandedGreatsword,
        )
        .unwrap();
        assert!((greatsword.dps() - 17.5).abs() < 1e-9);
        assert_eq!(greatsword.typ().skill(), Skill::TwoHanded);
    }

    #[rstest]
    #[case("", 7.0, 1.0)]
    #[case("   ", 7.0, 1.0)]
    #[case("Iron Sword", -1.0, 1.0)]
    #[case("Iron Sword", f64::NAN, 1.0)]
    #[case("Iron Sword", 7.0, f64::INFINITY)]
    fn test_invalid_weapons(
        #[case] name: &str,
        #[case] damage: f64,
        #[case] speed: f64,
    ) {
        let res = Weapon::new(name, damage, speed, WeaponType::OneHandedSword);
        assert!(matches!(res, Err(SimError::InvalidWeapon(_))));
    }

    #[test]
    fn test_zero_damage_is_allowed() {
        let stick =
            Weapon::new("Wooden Stick", 0.0, 1.0, WeaponType::OneHandedSword);
        assert!(stick.is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let bow = Weapon::new("Ebony Bow", 19.0, 1.0, WeaponType::Bow).unwrap();
        let json = serde_json::to_string(&bow).unwrap();
        assert_eq!(serde_json::from_str::<Weapon>(&json).unwrap(), bow);

        let blank = serde_json::json!({
            "name": "",
            "base_damage": 10.0,
            "attack_speed": 1.0,
            "typ": "Bow"
        });
        let err = serde_json::from_value::<Weapon>(blank).unwrap_err();
        assert!(err.to_string().contains("name is blank"));

        let negative = serde_json::json!({
            "name": "Bow",
            "base_damage": -50.0,
            "attack_speed": 1.0,
            "typ": "Bow"
        });
        assert!(serde_json::from_value::<Weapon>(negative).is_err());
    }

    #[test]
    fn test_every_type_has_a_weapon_skill() {
        for typ in WeaponType::iter() {
            assert_ne!(typ.skill(), Skill::Sneak);
        }
    }
}
