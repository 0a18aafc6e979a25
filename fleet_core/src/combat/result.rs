//! Aggregated outcome of one side of an exchange

use crate::damage::DamageVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one fleet produced in a single exchange
///
/// `total` is the sum over every individual roll; `per_unit` keeps each
/// craft's own outcome so callers can still see who hit and who missed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volley {
    pub total: DamageVector,
    pub per_unit: BTreeMap<String, Vec<DamageVector>>,
}

impl Volley {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of individual rolls recorded
    pub fn shots(&self) -> usize {
        self.per_unit.values().map(Vec::len).sum()
    }

    /// Per-craft outcomes for one unit type, empty when absent
    pub fn of_unit(&self, name: &str) -> &[DamageVector] {
        self.per_unit.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when nothing landed at all
    pub fn is_zero(&self) -> bool {
        self.total.is_zero()
    }

    /// Multi-line report: one line per unit type, then the grand total
    pub fn summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.per_unit.len() + 1);
        for (name, outcomes) in &self.per_unit {
            let landed = outcomes.iter().filter(|hit| !hit.is_zero()).count();
            let subtotal: DamageVector = outcomes.iter().cloned().sum();
            lines.push(format!(
                "{}x {}: {}/{} landed -> {}",
                outcomes.len(),
                name,
                landed,
                outcomes.len(),
                subtotal
            ));
        }
        lines.push(format!("total: {}", self.total));
        lines.join("\n")
    }
}
