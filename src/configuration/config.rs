//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – stepping scheme and which forces act
//! - [`ParametersConfig`] – step size, step count, sampling, gravitational constant
//! - [`CentralConfig`]    – optional fixed dominant mass
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   scheme: "heun"          # or "second_order"
//!   pairwise: true          # bodies attract each other
//!
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   dt: 1.0e-3              # fixed step size
//!   num_points: 50000       # total steps
//!   points_inter: 100       # steps between drawn segments
//!
//! central:                  # optional, held fixed
//!   m: 1.0
//!   x: [ 0.0, 0.0 ]
//!   radius: 0.1
//!
//! bodies:
//!   - name: "a"
//!     x: [ -0.5, 1.0 ]
//!     v: [  0.0, -0.8 ]
//!     m: 0.001
//!   - x: [  0.5, -1.0 ]
//!     v: [  0.0, -1.0 ]
//!     m: 0.001
//!     radius: 0.01
//! ```
//!
//! `Scenario::build_scenario` validates this and maps it into runtime types.

use std::io::Read;

use serde::Deserialize;

use crate::simulation::engine::Scheme;
use crate::simulation::params::DEFAULT_POINTS_INTER;

/// Which stepping scheme the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeConfig {
    #[serde(rename = "second_order")] // averaged-acceleration displacement update
    SecondOrder,

    #[serde(rename = "heun")] // predictor-corrector
    #[default]
    Heun,
}

impl From<SchemeConfig> for Scheme {
    fn from(cfg: SchemeConfig) -> Self {
        match cfg {
            SchemeConfig::SecondOrder => Scheme::SecondOrder,
            SchemeConfig::Heun => Scheme::Heun,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_points_inter() -> usize {
    DEFAULT_POINTS_INTER
}

fn default_origin() -> Vec<f64> {
    vec![0.0, 0.0]
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub scheme: SchemeConfig,
    #[serde(default = "default_true")]
    pub pairwise: bool, // `false` - bodies only feel the central mass
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeConfig::default(),
            pairwise: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub dt: f64, // time step size
    pub num_points: usize, // total steps
    #[serde(default = "default_points_inter")]
    pub points_inter: usize, // steps between drawn segments
}

/// A heavy body held fixed for the whole run
#[derive(Deserialize, Debug, Clone)]
pub struct CentralConfig {
    pub m: f64,
    #[serde(default = "default_origin")]
    pub x: Vec<f64>,
    #[serde(default)]
    pub radius: f64, // collision radius
}

/// Initial state of one body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub x: Vec<f64>, // initial position
    pub v: Vec<f64>, // initial velocity
    pub m: f64, // mass
    #[serde(default)]
    pub radius: f64, // collision radius
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub central: Option<CentralConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
