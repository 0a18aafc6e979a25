//! Unit roster loading from TOML files

use crate::damage::DamageVector;
use crate::units::{catalog, UnitType};
use chance_core::Chance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Container for unit definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsConfig {
    pub units: Vec<UnitSpec>,
}

/// One unit type as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    #[serde(default)]
    pub initiative: Option<u32>,
    #[serde(default)]
    pub one_time: bool,
    #[serde(default = "default_can_initiate")]
    pub can_initiate: bool,
    #[serde(default)]
    pub attacks: Option<HitSpec>,
    #[serde(default)]
    pub defends: Option<HitSpec>,
}

fn default_can_initiate() -> bool {
    true
}

/// A percent-gated roll: `percent` chance of `amount` damage of one label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitSpec {
    pub percent: f64,
    pub amount: f64,
    pub damage: String,
}

impl HitSpec {
    fn to_chance(&self) -> Chance<DamageVector> {
        catalog::hit(
            self.percent,
            DamageVector::named(self.damage.as_str()) * self.amount,
        )
    }
}

impl UnitSpec {
    fn build(&self) -> UnitType {
        let mut unit = UnitType::new(self.name.as_str())
            .with_one_time(self.one_time)
            .with_can_initiate(self.can_initiate);
        if let Some(initiative) = self.initiative {
            unit = unit.with_initiative(initiative);
        }
        if let Some(spec) = &self.attacks {
            unit = unit.with_attacks(spec.to_chance());
        }
        if let Some(spec) = &self.defends {
            unit = unit.with_defends(spec.to_chance());
        }
        unit
    }
}

/// Load unit definitions from a TOML file
pub fn load_units(path: &Path) -> Result<Vec<UnitType>, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_units(&content)
}

/// Load unit definitions from a TOML string
pub fn parse_units(content: &str) -> Result<Vec<UnitType>, ConfigError> {
    let config: UnitsConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config.units.iter().map(UnitSpec::build).collect())
}

fn validate(config: &UnitsConfig) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for spec in &config.units {
        if spec.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "unit with an empty name".to_string(),
            ));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate unit name: {}",
                spec.name
            )));
        }
        for hit in spec.attacks.iter().chain(spec.defends.iter()) {
            if hit.damage.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{}: empty damage label",
                    spec.name
                )));
            }
            if !hit.amount.is_finite() || hit.amount < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{}: damage amount must be non-negative, got {}",
                    spec.name, hit.amount
                )));
            }
        }
    }
    Ok(())
}

/// Default unit roster shipped with the crate
pub fn default_units() -> Vec<UnitType> {
    let toml = include_str!("../config/units.toml");
    parse_units(toml).unwrap_or_else(|_| vec![catalog::basic(), catalog::exploding()])
}
