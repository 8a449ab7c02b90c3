//! Planner configuration: canvas bounds, grid step and tolerances.
//!
//! The presentation layer usually runs with [`PlannerConfig::default`], but a
//! deployment can ship a JSON file to resize the canvas or loosen the wall
//! tolerances:
//!
//! ```
//! use floorplan_logic::config::{validate_config, PlannerConfig};
//!
//! let mut config = PlannerConfig::default();
//! config.canvas_width = 1600;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{canvas, openings, tolerance};

/// Tunable parameters of the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Horizontal canvas bound; relative placement wraps to a new row past it.
    pub canvas_width: i32,
    /// Vertical canvas bound.
    pub canvas_height: i32,
    /// Drag positions are snapped to multiples of this.
    pub grid_step: i32,
    /// Distance within which a point counts as lying on a wall.
    pub wall_tolerance: i32,
    /// Perpendicular distance within which two openings conflict.
    pub opening_tolerance: i32,
    /// Gap within which two room edges are treated as one shared wall.
    pub adjacency_tolerance: i32,
    /// Drawn length of a window.
    pub window_length: i32,
    /// Span a window reserves on its wall for conflict checks.
    pub window_clearance: i32,
    /// Distance within which a door cuts a wall line when drawing.
    pub door_cut_tolerance: i32,
    /// Span a door needs inside a wall segment to cut it.
    pub door_cut_span: i32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            canvas_width: canvas::WIDTH,
            canvas_height: canvas::HEIGHT,
            grid_step: canvas::GRID_STEP,
            wall_tolerance: tolerance::WALL,
            opening_tolerance: tolerance::OPENING_OVERLAP,
            adjacency_tolerance: tolerance::ADJACENCY,
            window_length: openings::WINDOW_LENGTH,
            window_clearance: openings::WINDOW_CLEARANCE,
            door_cut_tolerance: tolerance::DOOR_CUT,
            door_cut_span: openings::DOOR_CUT_SPAN,
        }
    }
}

impl PlannerConfig {
    /// Parse a JSON document (missing fields take their defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(ConfigLoadError::Invalid(errors));
        }
        Ok(config)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Canvas width or height not positive.
    InvalidCanvas { width: i32, height: i32 },
    /// Grid step below 1.
    InvalidGridStep(i32),
    /// A tolerance is negative.
    NegativeTolerance(&'static str),
    /// An opening length is not positive.
    InvalidOpeningLength(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidCanvas { width, height } => {
                write!(f, "canvas must be positive, got {}×{}", width, height)
            }
            ConfigError::InvalidGridStep(step) => write!(f, "grid step must be ≥ 1, got {}", step),
            ConfigError::NegativeTolerance(name) => write!(f, "{} must not be negative", name),
            ConfigError::InvalidOpeningLength(name) => write!(f, "{} must be positive", name),
        }
    }
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {}", format_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &PlannerConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.canvas_width <= 0 || config.canvas_height <= 0 {
        errors.push(ConfigError::InvalidCanvas {
            width: config.canvas_width,
            height: config.canvas_height,
        });
    }
    if config.grid_step < 1 {
        errors.push(ConfigError::InvalidGridStep(config.grid_step));
    }

    let tolerances = [
        ("wall_tolerance", config.wall_tolerance),
        ("opening_tolerance", config.opening_tolerance),
        ("adjacency_tolerance", config.adjacency_tolerance),
        ("door_cut_tolerance", config.door_cut_tolerance),
    ];
    for (name, value) in tolerances {
        if value < 0 {
            errors.push(ConfigError::NegativeTolerance(name));
        }
    }

    let lengths = [
        ("window_length", config.window_length),
        ("window_clearance", config.window_clearance),
        ("door_cut_span", config.door_cut_span),
    ];
    for (name, value) in lengths {
        if value <= 0 {
            errors.push(ConfigError::InvalidOpeningLength(name));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(validate_config(&PlannerConfig::default()).is_empty());
    }

    #[test]
    fn bad_values_are_all_reported() {
        let config = PlannerConfig {
            canvas_width: 0,
            grid_step: 0,
            wall_tolerance: -1,
            window_length: 0,
            ..PlannerConfig::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ConfigError::InvalidGridStep(0)));
        assert!(errors.contains(&ConfigError::NegativeTolerance("wall_tolerance")));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = PlannerConfig::from_json(r#"{ "canvas_width": 2000, "grid_step": 10 }"#)
            .expect("valid config");
        assert_eq!(config.canvas_width, 2000);
        assert_eq!(config.grid_step, 10);
        assert_eq!(config.canvas_height, canvas::HEIGHT);
        assert_eq!(config.wall_tolerance, tolerance::WALL);
    }

    #[test]
    fn json_rejects_invalid_values() {
        let err = PlannerConfig::from_json(r#"{ "grid_step": -4 }"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ref e) if e.len() == 1));
        assert!(err.to_string().contains("grid step"));
    }

    #[test]
    fn json_parse_error_is_reported() {
        let err = PlannerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }
}
