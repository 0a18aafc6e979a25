//! Example Battle - A console skirmish demonstrating chance_core and fleet_core integration
//!
//! This demo shows:
//! - Building probability trees with operators (chance_core)
//! - Registering unit types with percent-gated hit tables (fleet_core)
//! - Sampling fleets and rolling whole-fleet volleys
//! - Detaching a strike group by percentage
//! - Replaying a battle from a command line seed

use chance_core::Chance;
use fleet_core::{
    combat::{aggregate_attacks_with_rng, aggregate_defenses_with_rng, Volley},
    config::default_units,
    fleet::random_fleet_with_rng,
    units::{hit, UnitRegistry, UnitType},
    DamageVector,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const DEFAULT_SEED: u64 = 42;

fn banner(title: &str) {
    println!("\n=== {} ===", title);
}

fn print_roster(registry: &UnitRegistry) {
    for name in registry.names() {
        if let Some(unit) = registry.get(name) {
            let initiative = unit
                .initiative
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  {} (initiative {})", unit.name, initiative);
            println!("    attacks: {}", unit.attacks);
            println!("    defends: {}", unit.defends);
            if unit.one_time {
                println!("    expended after one engagement");
            }
            if !unit.can_initiate {
                println!("    cannot open an engagement");
            }
        }
    }
}

fn print_volley(side: &str, volley: &Volley) {
    println!("  {} volley:", side);
    for line in volley.summary().lines() {
        println!("    {}", line);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Fleet skirmish (seed {})", seed);

    banner("Unit Roster");
    let mut registry = UnitRegistry::from_units(default_units());

    // A custom raider: either a strafing run or a lucky torpedo, plus a
    // follow-up burst that only sometimes connects
    let payload = Chance::weighted(
        [
            DamageVector::named("basic") * 50.0,
            DamageVector::named("explosive") * 200.0,
        ],
        &[3.0, 1.0],
    )?;
    let raider = UnitType::new("raider")
        .with_initiative(70)
        .with_attacks(payload + hit(50.0, DamageVector::named("basic") * 25.0))
        .with_defends(hit(40.0, DamageVector::named("basic") * 30.0));
    registry.register(raider);
    print_roster(&registry);

    banner("Fleets");
    let types = registry.names();
    let attackers = random_fleet_with_rng(&types, 6, 12, &mut rng)?;
    let defenders = random_fleet_with_rng(&types, 5, 9, &mut rng)?;
    println!("  Attackers: {}", attackers);
    println!("  Defenders: {}", defenders);

    banner("Exchange");
    let attack = aggregate_attacks_with_rng(&registry, &attackers, &mut rng)?;
    print_volley("Attack", &attack);
    let defense = aggregate_defenses_with_rng(&registry, &defenders, &mut rng)?;
    print_volley("Defense", &defense);

    banner("Strike Group");
    let strike_group = attackers.extract_pct_with_rng(30.0, &mut rng);
    println!("  Detached 30% of the attackers: {}", strike_group);
    let raid = aggregate_attacks_with_rng(&registry, &strike_group, &mut rng)?;
    print_volley("Raid", &raid);

    banner("Attack Volley as JSON");
    println!("{}", serde_json::to_string_pretty(&attack)?);

    Ok(())
}
