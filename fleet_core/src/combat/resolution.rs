//! Rolling a whole fleet's distributions into a single volley

use crate::combat::result::Volley;
use crate::fleet::Fleet;
use crate::units::{UnitError, UnitRegistry};
use rand::Rng;

enum Role {
    Attack,
    Defense,
}

/// Roll every craft's attack distribution once and sum the outcomes
pub fn aggregate_attacks(registry: &UnitRegistry, fleet: &Fleet) -> Result<Volley, UnitError> {
    let mut rng = rand::thread_rng();
    aggregate_attacks_with_rng(registry, fleet, &mut rng)
}

/// Attack aggregation with a provided RNG (for deterministic use)
pub fn aggregate_attacks_with_rng(
    registry: &UnitRegistry,
    fleet: &Fleet,
    rng: &mut impl Rng,
) -> Result<Volley, UnitError> {
    aggregate(registry, fleet, Role::Attack, rng)
}

/// Roll every craft's defense distribution once and sum the outcomes
pub fn aggregate_defenses(registry: &UnitRegistry, fleet: &Fleet) -> Result<Volley, UnitError> {
    let mut rng = rand::thread_rng();
    aggregate_defenses_with_rng(registry, fleet, &mut rng)
}

/// Defense aggregation with a provided RNG (for deterministic use)
pub fn aggregate_defenses_with_rng(
    registry: &UnitRegistry,
    fleet: &Fleet,
    rng: &mut impl Rng,
) -> Result<Volley, UnitError> {
    aggregate(registry, fleet, Role::Defense, rng)
}

fn aggregate(
    registry: &UnitRegistry,
    fleet: &Fleet,
    role: Role,
    rng: &mut impl Rng,
) -> Result<Volley, UnitError> {
    // Look everything up first so an unknown type fails before any rolling
    let mut pending = Vec::new();
    for (name, count) in fleet.iter() {
        let unit = registry.lookup(name)?;
        let node = match role {
            Role::Attack => &unit.attacks,
            Role::Defense => &unit.defends,
        };
        pending.push((name, count, node));
    }

    let mut volley = Volley::new();
    for (name, count, node) in pending {
        let mut outcomes = Vec::with_capacity(count);
        for _ in 0..count {
            let outcome = node.resolve_with(rng);
            volley.total += outcome.clone();
            outcomes.push(outcome);
        }
        volley.per_unit.insert(name.to_string(), outcomes);
    }
    Ok(volley)
}
