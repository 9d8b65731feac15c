//! Layout configuration
//!
//! Every field is optional in configuration files; absent fields take the
//! defaults below. Explicit zeros are honored, so `charge: 0` turns repulsion
//! off rather than falling back to the default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::io::{IoError, IoResult};
use crate::model::{Direction, LayoutHints};

/// Axis-aligned rectangle nodes are kept inside.
///
/// A free node that ends a step outside it is moved to a random coordinate
/// within the rectangle on each offending axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingRect {
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }
}

/// Configuration for the force simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Edge rest length
    pub edge_distance: f64,
    /// Edge spring strength
    pub edge_strength: f64,
    /// Velocity retained per step, in `[0, 1)`
    pub friction: f64,
    /// Per-node charge (negative = repulsion)
    pub charge: f64,
    /// Pull toward the center of `size`
    pub gravity: f64,
    /// Squared Barnes-Hut opening angle
    pub theta2: f64,
    /// World size; gravity pulls toward its center
    pub size: [f64; 2],
    /// Margin hint for mapping the result onto a surface
    pub margin: f64,
    /// Direction hint for mapping the result onto a surface
    pub direction: Direction,
    /// Squared cutoff distance for repulsion (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_distance2: Option<f64>,
    /// Escape-correction rectangle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingRect>,
    /// Seed for jitter and escape correction (OS entropy when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Upper bound on steps per run (none: run until alpha decays)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            edge_distance: 15.0,
            edge_strength: 1.0,
            friction: 0.9,
            charge: -30.0,
            gravity: 0.4,
            theta2: 0.64,
            size: [1.0, 1.0],
            margin: 0.05,
            direction: Direction::LeftRight,
            charge_distance2: None,
            bounds: None,
            seed: None,
            max_steps: None,
        }
    }
}

impl LayoutOptions {
    /// Load options from a YAML (`.yaml`, `.yml`) or JSON (`.json`) file
    pub fn from_path(path: &Path) -> IoResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;
        let content = fs::read_to_string(path)?;

        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))
            }
            "json" => serde_json::from_str(&content).map_err(|e| IoError::Parse(e.to_string())),
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Squared repulsion cutoff, `f64::INFINITY` when unbounded
    pub fn charge_cutoff2(&self) -> f64 {
        self.charge_distance2.unwrap_or(f64::INFINITY)
    }

    /// Center of the world rectangle
    pub fn center(&self) -> (f64, f64) {
        (self.size[0] / 2.0, self.size[1] / 2.0)
    }

    /// Presentation hints handed back to the caller after a run
    pub fn hints(&self) -> LayoutHints {
        LayoutHints {
            margin: self.margin,
            direction: self.direction,
        }
    }

    /// Reject options the integrator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.friction) {
            return Err(invalid(
                "friction",
                format!("{} is not in [0, 1)", self.friction),
            ));
        }
        if !(self.theta2 > 0.0) {
            return Err(invalid(
                "theta2",
                format!("{} is not positive", self.theta2),
            ));
        }
        if let Some(cutoff) = self.charge_distance2 {
            if !(cutoff > 0.0) {
                return Err(invalid(
                    "charge_distance2",
                    format!("{cutoff} is not positive"),
                ));
            }
        }
        if let Some(rect) = &self.bounds {
            if !(rect.min_x <= rect.max_x && rect.min_y <= rect.max_y) {
                return Err(invalid(
                    "bounds",
                    format!(
                        "[{}, {}] x [{}, {}] is empty",
                        rect.min_x, rect.max_x, rect.min_y, rect.max_y
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> LayoutError {
    LayoutError::InvalidOption { name, reason }
}
