//! chance_core - Lazily evaluated random-value expression trees
//!
//! This library provides:
//! - Chance: composable random-value nodes (certain, uniform, weighted,
//!   percent splits, function combinators)
//! - Resolution protocol: explicit source > bound source > fresh source,
//!   with one source threaded through a whole resolve call
//! - Operator overloads that build nodes instead of computing eagerly
//! - SharedSource: seeded sources bindable to nodes for reproducible draws

pub mod chance;
pub mod source;

// Re-export core types for convenience
pub use chance::{Chance, ChanceError, FloorDiv, Outcome};
pub use source::{shared_source, SharedSource};
