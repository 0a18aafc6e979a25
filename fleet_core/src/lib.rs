//! fleet_core - Fleet combat built on lazy probability trees
//!
//! This library provides:
//! - DamageVector: Named damage amounts with vector arithmetic
//! - UnitType / UnitRegistry: Craft definitions with attack and defense tables
//! - Fleet: Compositions, random sampling, and percentage extraction
//! - Volley aggregation: Rolling a whole fleet's distributions at once

pub mod combat;
pub mod config;
pub mod damage;
pub mod fleet;
pub mod prelude;
pub mod units;

// Re-export core types for convenience
pub use combat::{
    aggregate_attacks, aggregate_attacks_with_rng, aggregate_defenses,
    aggregate_defenses_with_rng, Volley,
};
pub use config::default_units;
pub use damage::DamageVector;
pub use fleet::{random_fleet, random_fleet_with_rng, Fleet, FleetError};
pub use units::{UnitError, UnitRegistry, UnitType};

// Re-export chance_core types for convenience
pub use chance_core::{Chance, ChanceError, Outcome};
