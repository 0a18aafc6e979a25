//! Fleet composition, sampling, and percentage extraction

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Raised when a fleet request cannot be satisfied
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("a fleet needs at least one unit type to draw from")]
    NoTypes,
    #[error("minimum size {min_size} cannot cover {types} distinct unit types")]
    SizeBelowTypeCount { min_size: usize, types: usize },
    #[error("empty size range: min {min_size}, max {max_size}")]
    EmptyRange { min_size: usize, max_size: usize },
}

/// A fleet composition: instance count per unit-type name
///
/// Counts are never negative and zero-count entries are not stored, so the
/// stored type set is exactly the set of types present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fleet {
    counts: BTreeMap<String, usize>,
}

impl Fleet {
    /// Create an empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fleet from explicit counts; zero counts are dropped
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        counts.into_iter().collect()
    }

    /// Add `count` craft of a type
    pub fn add(&mut self, name: impl Into<String>, count: usize) {
        if count > 0 {
            *self.counts.entry(name.into()).or_insert(0) += count;
        }
    }

    /// Number of craft of one type
    pub fn count_of(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Total craft across all types
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Type names present, in sorted order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// (name, count) pairs in sorted name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Split off approximately `pct` percent of the fleet
    ///
    /// `pct` is clamped to [0, 100]. The extracted size is
    /// `round(pct/100 * total)`, raised to 1 when a positive `pct` would
    /// otherwise round to nobody, and capped at the whole fleet. Craft are
    /// selected uniformly without replacement, so per-type extracted counts
    /// never exceed the originals.
    pub fn extract_pct(&self, pct: f64) -> Fleet {
        let mut rng = rand::thread_rng();
        self.extract_pct_with_rng(pct, &mut rng)
    }

    /// Extract with a provided RNG (for deterministic use)
    pub fn extract_pct_with_rng(&self, pct: f64, rng: &mut impl Rng) -> Fleet {
        let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) };
        let total = self.total();
        if total == 0 || pct == 0.0 {
            return Fleet::new();
        }

        let rounded = (pct / 100.0 * total as f64).round() as usize;
        let count = rounded.max(1).min(total);

        let mut craft: Vec<&str> = Vec::with_capacity(total);
        for (name, n) in self.iter() {
            craft.extend(std::iter::repeat(name).take(n));
        }

        let mut extracted = Fleet::new();
        for name in craft.choose_multiple(rng, count) {
            extracted.add(*name, 1);
        }
        extracted
    }
}

// Deserialization goes through the normalizing constructor so stored data
// with explicit zero counts still upholds the no-zero-entries invariant.
impl<'de> Deserialize<'de> for Fleet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let counts = BTreeMap::<String, usize>::deserialize(deserializer)?;
        Ok(Fleet::from_counts(counts))
    }
}

impl FromIterator<(String, usize)> for Fleet {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut fleet = Fleet::new();
        for (name, count) in iter {
            fleet.add(name, count);
        }
        fleet
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty fleet");
        }
        for (position, (name, count)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} {}", count, name)?;
        }
        write!(f, " ({} craft)", self.total())
    }
}

/// Sample a fleet containing at least one of each requested type
///
/// The total size is drawn uniformly from `[min_size, max_size]`; after the
/// mandatory one instance per distinct type, the remainder is drawn uniformly
/// with replacement. Duplicate names in `types` count once.
pub fn random_fleet(types: &[&str], min_size: usize, max_size: usize) -> Result<Fleet, FleetError> {
    let mut rng = rand::thread_rng();
    random_fleet_with_rng(types, min_size, max_size, &mut rng)
}

/// Sample a fleet with a provided RNG (for deterministic use)
pub fn random_fleet_with_rng(
    types: &[&str],
    min_size: usize,
    max_size: usize,
    rng: &mut impl Rng,
) -> Result<Fleet, FleetError> {
    let pool: Vec<&str> = types
        .iter()
        .copied()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .collect();

    if pool.is_empty() {
        return Err(FleetError::NoTypes);
    }
    if min_size < pool.len() {
        return Err(FleetError::SizeBelowTypeCount {
            min_size,
            types: pool.len(),
        });
    }
    if max_size < min_size {
        return Err(FleetError::EmptyRange { min_size, max_size });
    }

    let size = rng.gen_range(min_size..=max_size);

    let mut fleet = Fleet::new();
    for name in &pool {
        fleet.add(*name, 1);
    }
    for _ in pool.len()..size {
        let name = pool[rng.gen_range(0..pool.len())];
        fleet.add(name, 1);
    }
    Ok(fleet)
}
