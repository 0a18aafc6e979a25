//! Combat unit definitions and the definition registry

pub mod catalog;

pub use catalog::{basic, exploding, hit};

use crate::damage::DamageVector;
use chance_core::Chance;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

/// Raised when a unit-type name is not in the registry
#[derive(Error, Debug)]
pub enum UnitError {
    #[error("unknown unit type: {0}")]
    Unknown(String),
}

/// A combat unit definition
///
/// The attack and defense tables are chance trees over [`DamageVector`];
/// resolving one rolls a single instance of the unit.
#[derive(Debug, Clone)]
pub struct UnitType {
    pub name: String,
    /// Turn-order priority; units without one act in no particular order
    pub initiative: Option<u32>,
    pub attacks: Chance<DamageVector>,
    pub defends: Chance<DamageVector>,
    /// Spent after its first attack (mines, missiles)
    pub one_time: bool,
    /// Whether this unit type may open an engagement
    pub can_initiate: bool,
}

impl UnitType {
    /// A harmless definition: no initiative, fresh certain-zero attack and
    /// defense tables, reusable, may initiate
    pub fn new(name: impl Into<String>) -> Self {
        UnitType {
            name: name.into(),
            initiative: None,
            attacks: Chance::certain(DamageVector::zero()),
            defends: Chance::certain(DamageVector::zero()),
            one_time: false,
            can_initiate: true,
        }
    }

    pub fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = Some(initiative);
        self
    }

    pub fn with_attacks(mut self, attacks: Chance<DamageVector>) -> Self {
        self.attacks = attacks;
        self
    }

    pub fn with_defends(mut self, defends: Chance<DamageVector>) -> Self {
        self.defends = defends;
        self
    }

    pub fn with_one_time(mut self, one_time: bool) -> Self {
        self.one_time = one_time;
        self
    }

    pub fn with_can_initiate(mut self, can_initiate: bool) -> Self {
        self.can_initiate = can_initiate;
        self
    }
}

/// Unit definition registry
///
/// Filled during setup through `&mut` methods and shared immutably
/// afterwards; definitions are never mutated or removed once registered.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<String, UnitType>,
}

impl UnitRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        UnitRegistry {
            units: HashMap::new(),
        }
    }

    /// Register a unit definition, returning a handle to the stored entry
    ///
    /// Registering a name twice replaces the earlier definition.
    pub fn register(&mut self, unit: UnitType) -> &UnitType {
        match self.units.entry(unit.name.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(unit);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(unit),
        }
    }

    /// Get a unit definition by name
    pub fn get(&self, name: &str) -> Option<&UnitType> {
        self.units.get(name)
    }

    /// Get a unit definition by name, failing when absent
    pub fn lookup(&self, name: &str) -> Result<&UnitType, UnitError> {
        self.units
            .get(name)
            .ok_or_else(|| UnitError::Unknown(name.to_string()))
    }

    /// Registered type names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Registry pre-loaded with the built-in catalog
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(catalog::basic());
        registry.register(catalog::exploding());
        registry
    }

    /// Build a registry from an already loaded definition list
    pub fn from_units(units: impl IntoIterator<Item = UnitType>) -> Self {
        let mut registry = Self::new();
        for unit in units {
            registry.register(unit);
        }
        registry
    }
}
