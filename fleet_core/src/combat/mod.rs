//! Volley aggregation - resolve a whole fleet's distributions at once

mod resolution;
mod result;

pub use resolution::{
    aggregate_attacks, aggregate_attacks_with_rng, aggregate_defenses, aggregate_defenses_with_rng,
};
pub use result::Volley;
