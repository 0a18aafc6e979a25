//! DamageVector - typed damage quantities as a named vector space

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A typed damage quantity: f64 coefficients over named basis labels
///
/// `named("basic")` is the unit vector for the `basic` damage type; vectors
/// add component-wise and scale by `f64` on either side. Labels are data,
/// not variants: any string names a valid basis vector.
///
/// Entries with coefficient 0.0 are never stored, so `v + (-v)` is exactly
/// [`DamageVector::zero`] and equality is plain entry comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DamageVector {
    entries: BTreeMap<String, f64>,
}

impl DamageVector {
    /// The zero vector (no damage of any type)
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a vector from explicit coefficients; zero entries are dropped
    pub fn from_coefficients(entries: BTreeMap<String, f64>) -> Self {
        DamageVector { entries }.normalized()
    }

    /// The unit basis vector for a damage label
    pub fn named(label: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(label.into(), 1.0);
        DamageVector { entries }
    }

    /// Coefficient for a label, 0.0 when absent
    pub fn get(&self, label: &str) -> f64 {
        self.entries.get(label).copied().unwrap_or(0.0)
    }

    /// Labels with non-zero coefficients, in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// (label, coefficient) pairs in sorted label order
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalized(mut self) -> Self {
        self.entries.retain(|_, value| *value != 0.0);
        self
    }
}

impl Add for DamageVector {
    type Output = DamageVector;

    fn add(mut self, rhs: DamageVector) -> DamageVector {
        for (label, value) in rhs.entries {
            *self.entries.entry(label).or_insert(0.0) += value;
        }
        self.normalized()
    }
}

impl AddAssign for DamageVector {
    fn add_assign(&mut self, rhs: DamageVector) {
        let merged = std::mem::take(self) + rhs;
        *self = merged;
    }
}

impl Sub for DamageVector {
    type Output = DamageVector;

    fn sub(self, rhs: DamageVector) -> DamageVector {
        self + (-rhs)
    }
}

impl Neg for DamageVector {
    type Output = DamageVector;

    fn neg(mut self) -> DamageVector {
        for value in self.entries.values_mut() {
            *value = -*value;
        }
        self
    }
}

impl Mul<f64> for DamageVector {
    type Output = DamageVector;

    fn mul(mut self, scalar: f64) -> DamageVector {
        for value in self.entries.values_mut() {
            *value *= scalar;
        }
        self.normalized()
    }
}

impl Mul<DamageVector> for f64 {
    type Output = DamageVector;

    fn mul(self, rhs: DamageVector) -> DamageVector {
        rhs * self
    }
}

// Deserialization goes through the normalizing constructor so stored data
// with explicit zero coefficients still upholds the no-zero-entries invariant.
impl<'de> Deserialize<'de> for DamageVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Ok(DamageVector::from_coefficients(entries))
    }
}

impl Sum for DamageVector {
    fn sum<I: Iterator<Item = DamageVector>>(iter: I) -> DamageVector {
        iter.fold(DamageVector::zero(), Add::add)
    }
}

impl fmt::Display for DamageVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (position, (label, value)) in self.entries.iter().enumerate() {
            if position > 0 {
                write!(f, " + ")?;
            }
            if value.fract() == 0.0 {
                write!(f, "{:.0} {}", value, label)?;
            } else {
                write!(f, "{} {}", value, label)?;
            }
        }
        Ok(())
    }
}
