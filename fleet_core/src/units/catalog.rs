//! Built-in unit catalog

use super::UnitType;
use crate::damage::DamageVector;
use chance_core::Chance;

/// A distribution that lands `damage` with probability `percent`, else nothing
///
/// The standard phrasing for unit attack and defense tables.
pub fn hit(percent: f64, damage: DamageVector) -> Chance<DamageVector> {
    Chance::percent(percent, damage, DamageVector::zero())
}

/// Standard line craft: moderate attack, strong point defense
pub fn basic() -> UnitType {
    UnitType::new("basic")
        .with_initiative(50)
        .with_attacks(hit(60.0, DamageVector::named("basic") * 100.0))
        .with_defends(hit(95.0, DamageVector::named("basic") * 100.0))
}

/// Single-use mine: heavy explosive strike, no defense, cannot open a battle
pub fn exploding() -> UnitType {
    UnitType::new("exploding")
        .with_initiative(20)
        .with_attacks(hit(80.0, DamageVector::named("explosive") * 500.0))
        .with_one_time(true)
        .with_can_initiate(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_hit_lands_or_misses() {
        let table = hit(60.0, DamageVector::named("basic") * 100.0);

        // A 0.0-real source takes the landing branch
        let landed = table.resolve_with(&mut StepRng::new(0, 0));
        assert!((landed.get("basic") - 100.0).abs() < f64::EPSILON);

        // A just-below-1.0 source misses
        let missed = table.resolve_with(&mut StepRng::new(u64::MAX, 0));
        assert!(missed.is_zero());
    }

    #[test]
    fn test_hit_extremes() {
        let sure = hit(100.0, DamageVector::named("basic"));
        assert!(!sure.resolve_with(&mut StepRng::new(u64::MAX, 0)).is_zero());

        let never = hit(0.0, DamageVector::named("basic"));
        assert!(never.resolve_with(&mut StepRng::new(0, 0)).is_zero());
    }

    #[test]
    fn test_basic_profile() {
        let unit = basic();
        assert_eq!(unit.name, "basic");
        assert_eq!(unit.initiative, Some(50));
        assert!(unit.can_initiate);

        let strike = unit.attacks.resolve_with(&mut StepRng::new(0, 0));
        assert!((strike.get("basic") - 100.0).abs() < f64::EPSILON);
        let guard = unit.defends.resolve_with(&mut StepRng::new(0, 0));
        assert!((guard.get("basic") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exploding_profile() {
        let unit = exploding();
        assert_eq!(unit.initiative, Some(20));
        assert!(unit.one_time);
        assert!(!unit.can_initiate);

        let blast = unit.attacks.resolve_with(&mut StepRng::new(0, 0));
        assert!((blast.get("explosive") - 500.0).abs() < f64::EPSILON);

        // No defense table: certain zero for any source
        assert!(unit.defends.resolve_with(&mut StepRng::new(0, 0)).is_zero());
        assert!(unit.defends.resolve_with(&mut StepRng::new(u64::MAX, 0)).is_zero());
    }
}
