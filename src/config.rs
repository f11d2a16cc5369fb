//! Render configuration and JSON scene descriptions.

use crate::error::{LSystemError, LSystemResult};
use crate::gradient::Rgb;
use crate::grammar::{Grammar, NameTable};
use crate::interpreter::InterpreterConfig;
use crate::turtle::Command;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;

/// Everything the driver needs besides the grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Starting x. Default: horizontal center.
    pub start_x: Option<f64>,
    /// Starting y. Default: vertical center.
    pub start_y: Option<f64>,
    pub background: Rgb,
    /// Gradient stops, applied in stroke order.
    pub pen_colors: Vec<Rgb>,
    pub movement_length: f64,
    pub pen_width: u32,
    /// Radians per rotate command.
    pub rotate_angle: f64,
    /// Rewrite generations before drawing.
    pub iterations: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            start_x: None,
            start_y: None,
            background: Rgb::BLACK,
            pen_colors: vec![Rgb::WHITE],
            movement_length: 5.0,
            pen_width: 1,
            rotate_angle: FRAC_PI_2,
            iterations: 10,
        }
    }
}

impl RenderConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> LSystemResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LSystemError::Config(format!(
                "canvas must be at least 1x1 pixels, got {}x{}",
                self.width, self.height
            )));
        }
        if self.pen_colors.is_empty() {
            return Err(LSystemError::EmptyGradient);
        }
        if !self.movement_length.is_finite() {
            return Err(LSystemError::Config(format!(
                "movement_length must be finite, got {}",
                self.movement_length
            )));
        }
        if self.pen_width == 0 {
            return Err(LSystemError::Config("pen_width must be >= 1".to_string()));
        }
        if !self.rotate_angle.is_finite() {
            return Err(LSystemError::Config(format!(
                "rotate_angle must be finite, got {}",
                self.rotate_angle
            )));
        }
        for (name, value) in [("start_x", self.start_x), ("start_y", self.start_y)] {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(LSystemError::Config(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Cursor start, defaulting each axis to the canvas center.
    pub fn start(&self) -> (f64, f64) {
        (
            self.start_x.unwrap_or((self.width / 2) as f64),
            self.start_y.unwrap_or((self.height / 2) as f64),
        )
    }

    pub fn interpreter_config(&self) -> InterpreterConfig {
        InterpreterConfig {
            movement_length: self.movement_length,
            rotate_angle: self.rotate_angle,
            pen_width: self.pen_width,
        }
    }
}

/// A complete drawing description.
///
/// ```json
/// {
///   "seed": "++X",
///   "rules": { "X": "F+[[XU]D-XU]D-F[-FXU]D+X", "F": "FF" },
///   "render": { "width": 800, "height": 800, "iterations": 6 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub seed: String,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    /// Replaces the standard vocabulary when present.
    #[serde(default)]
    pub names: Option<BTreeMap<String, Command>>,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Scene {
    /// Load from JSON string.
    pub fn from_json(json: &str) -> LSystemResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn name_table(&self) -> LSystemResult<NameTable> {
        match &self.names {
            Some(names) => NameTable::from_pairs(names.iter().map(|(k, &v)| (k, v))),
            None => Ok(NameTable::standard()),
        }
    }

    pub fn grammar(&self) -> LSystemResult<Grammar> {
        Grammar::from_strings(&self.seed, &self.rules, &self.name_table()?)
    }
}
