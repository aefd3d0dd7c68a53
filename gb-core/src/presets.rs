//! Ball property tables.
//!
//! A preset supplies the shell radii and spring moduli of a ball. Two are
//! built in (`standard` and `premium`); others can be loaded from YAML files
//! in a presets directory:
//!
//! ```text
//! presets/
//! ├── standard.yaml
//! └── premium.yaml
//! ```
//!
//! A preset without `piece_radii` spaces its shells evenly between the
//! configured ball radius and the center.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{ModelError, PresetError};

/// Built-in property table selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyTable {
    #[default]
    Standard,
    Premium,
}

/// Radii and moduli of a ball, per shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallPreset {
    pub name: String,
    /// Absolute radius of each generated shell, outermost first
    #[serde(default)]
    pub piece_radii: Option<Vec<f64>>,
    /// Modulus of same-shell springs, per shell
    pub neighbor_modulus: Vec<f64>,
    /// Modulus of cross-shell springs, per shell boundary
    pub layer_modulus: Vec<f64>,
}

impl BallPreset {
    /// Evenly spaced shells with a stiff outer cover.
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            piece_radii: None,
            neighbor_modulus: vec![2.94e8, 3.92e8, 3.92e8],
            layer_modulus: vec![3.92e7, 3.92e7, 3.92e7],
        }
    }

    /// Measured layer radii of a three-piece tour ball.
    pub fn premium() -> Self {
        Self {
            name: "premium".to_string(),
            piece_radii: Some(vec![0.02100, 0.018798, 0.01194]),
            neighbor_modulus: vec![2.94e8, 3.92e7, 3.92e7],
            layer_modulus: vec![3.92e7, 3.92e7, 3.92e7],
        }
    }

    pub fn for_table(table: PropertyTable) -> Self {
        match table {
            PropertyTable::Standard => Self::standard(),
            PropertyTable::Premium => Self::premium(),
        }
    }

    /// Per-shell values for the shells a configuration will generate.
    ///
    /// A model with `L` layers generates `L - 1` shells (the center particle
    /// is not generated), each needing a radius, a neighbor modulus and a
    /// modulus for the springs toward the next shell in.
    pub fn resolve(&self, config: &SimulationConfig) -> Result<ShellProperties, ModelError> {
        let layers = config.layers();
        let generated = layers - 1;

        let radii = match &self.piece_radii {
            Some(radii) => radii.clone(),
            None => (0..layers)
                .map(|k| config.ball_radius * (1.0 - k as f64 / (layers - 1) as f64))
                .collect(),
        };

        Ok(ShellProperties {
            radii: take(&radii, generated, "piece_radii")?,
            neighbor_modulus: take(&self.neighbor_modulus, generated, "neighbor_modulus")?,
            layer_modulus: take(&self.layer_modulus, generated, "layer_modulus")?,
        })
    }
}

impl Default for BallPreset {
    fn default() -> Self {
        Self::standard()
    }
}

fn take(values: &[f64], needed: usize, table: &'static str) -> Result<Vec<f64>, ModelError> {
    if values.len() < needed {
        return Err(ModelError::PresetTooShort {
            table,
            needed,
            available: values.len(),
        });
    }
    Ok(values[..needed].to_vec())
}

/// Values actually used to build one model, one entry per generated shell.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellProperties {
    pub radii: Vec<f64>,
    pub neighbor_modulus: Vec<f64>,
    /// Entry `k` joins generated shell `k` to the shell inside it.
    pub layer_modulus: Vec<f64>,
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a preset by name (without .yaml extension).
    pub fn load(&self, name: &str) -> Result<BallPreset, PresetError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(PresetError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let preset: BallPreset = serde_yaml::from_str(&contents)?;
        Ok(preset)
    }

    /// List all available presets.
    pub fn list(&self) -> Result<Vec<String>, PresetError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
