//! Prelude module for convenient imports
//!
//! ```rust
//! use fleet_core::prelude::*;
//! ```

// Damage algebra
pub use crate::damage::DamageVector;

// Units
pub use crate::units::{basic, exploding, hit, UnitError, UnitRegistry, UnitType};

// Fleets
pub use crate::fleet::{random_fleet, random_fleet_with_rng, Fleet, FleetError};

// Combat
pub use crate::combat::{
    aggregate_attacks, aggregate_attacks_with_rng, aggregate_defenses,
    aggregate_defenses_with_rng, Volley,
};

// Config
pub use crate::config::{default_units, load_units, parse_units, ConfigError};

// Re-exports from chance_core
pub use chance_core::{Chance, ChanceError, FloorDiv, Outcome};
