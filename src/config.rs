//! TOML-based plan configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::capacity::CapacityTemplate;
use crate::demo::DemoConfig;
use crate::plan::adjust::{MAX_ADDITION_PCT, MIN_ADDITION_PCT};
use crate::plan::engine::{AdditionPctPolicy, EngineConfig, MissingCapacity, SurplusPolicy};

/// Largest number of decimal places the export accepts.
pub const MAX_EXPORT_PRECISION: usize = 6;

/// Top-level plan configuration parsed from TOML.
///
/// All sections have defaults matching the `standard` preset. Load from
/// TOML with [`PlanConfig::from_toml_file`] or use
/// [`PlanConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    /// Leveling engine parameters and policies.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Tabular export formatting.
    #[serde(default)]
    pub export: ExportConfig,
    /// Capacity template used when no capacity file is given.
    #[serde(default)]
    pub capacity_defaults: CapacityTemplate,
    /// Synthetic demand used when no demand file is given.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Tabular export formatting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Field delimiter (single ASCII character).
    pub delimiter: char,
    /// Write `12,50` instead of `12.50`.
    pub decimal_comma: bool,
    /// Decimal places for fractional columns.
    pub precision: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            decimal_comma: true,
            precision: 2,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"engine.leave_buffer_ratio"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl PlanConfig {
    /// Returns the standard configuration (all defaults).
    pub fn standard() -> Self {
        Self::default()
    }

    /// Returns the lenient preset: clamps percentages, drops stranded
    /// surplus, zeroes demand without capacity and tolerates disjoint input.
    pub fn lenient() -> Self {
        Self {
            engine: EngineConfig {
                missing_capacity: MissingCapacity::ZeroDemand,
                addition_pct: AdditionPctPolicy::Clamp,
                unresolvable_surplus: SurplusPolicy::Drop,
                strict_alignment: false,
                ..EngineConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "lenient"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "lenient" => Ok(Self::lenient()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigError {
                field: field.to_string(),
                message,
            });
        };

        let ratio = self.engine.leave_buffer_ratio;
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            push("engine.leave_buffer_ratio", "must be in [0.0, 1.0]".into());
        }

        let ex = &self.export;
        if !ex.delimiter.is_ascii() || ex.delimiter.is_ascii_alphanumeric() {
            push(
                "export.delimiter",
                format!("must be a non-alphanumeric ASCII character, got {:?}", ex.delimiter),
            );
        }
        if ex.decimal_comma && ex.delimiter == ',' {
            push(
                "export.delimiter",
                "cannot be ',' while export.decimal_comma is enabled".into(),
            );
        }
        if ex.precision > MAX_EXPORT_PRECISION {
            push(
                "export.precision",
                format!("must be <= {MAX_EXPORT_PRECISION}"),
            );
        }

        let cap = &self.capacity_defaults;
        if cap.picking_capacity < 0 {
            push("capacity_defaults.picking_capacity", "must be >= 0".into());
        }
        if cap.packing_capacity < 0 {
            push("capacity_defaults.packing_capacity", "must be >= 0".into());
        }
        if !(MIN_ADDITION_PCT..=MAX_ADDITION_PCT).contains(&cap.forecast_addition_pct) {
            push(
                "capacity_defaults.forecast_addition_pct",
                "must be in [-100, 100]".into(),
            );
        }

        let demo = &self.demo;
        if demo.days == 0 {
            push("demo.days", "must be > 0".into());
        }
        if !demo.mean_quantity.is_finite() || demo.mean_quantity < 0.0 {
            push("demo.mean_quantity", "must be >= 0".into());
        }
        if !(0.0..=1.0).contains(&demo.spread) {
            push("demo.spread", "must be in [0.0, 1.0]".into());
        }

        errors
    }
}
