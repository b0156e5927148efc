//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force model, parallel evaluation, SOI parent rule
//! - [`ParametersConfig`] – step count, step size, sampling cadence, `G`
//! - [`PrimaryConfig`]    – the star
//! - [`BodyConfig`]       – orbital elements of each orbiting body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   force_model: "patched-conic"  # or "full-nbody"
//!   parallel: false               # rayon force evaluation (full-nbody)
//!   parent_rule: "smallest-soi"   # or "nearest"
//!   primary_recoil: false         # let bodies move the star (full-nbody)
//!
//! parameters:
//!   steps: 8766
//!   dt: 1.0
//!   time_unit: "hours"            # seconds, minutes, hours, days, years
//!   report_interval: 24
//!   G: 6.674e-11
//!
//! primary:
//!   name: "Sun"
//!   mass: 1.989e30                # kg
//!   radius: 6.957e8               # m
//!
//! bodies:
//!   - name: "Earth"
//!     mass: 5.972e24              # kg
//!     radius: 6.371e6             # m
//!     sma: 1.496e8                # km
//!     vel: 29780.0                # m/s
//!     inc: 0.0                    # degrees
//! ```
//!
//! The engine maps this configuration into its runtime scenario through
//! [`crate::simulation::scenario::Scenario::build_scenario`], which is also
//! where values are validated.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::SimResult;
use crate::simulation::engine::ForceModel;
use crate::simulation::soi::ParentRule;
use crate::simulation::states::G_SI;

/// Unit the configured `dt` is expressed in
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
    Years, // julian year, 365.25 days
}

impl TimeUnit {
    /// Length of one unit in seconds
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86_400.0,
            TimeUnit::Years => 365.25 * 86_400.0,
        }
    }
}

fn default_g() -> f64 {
    G_SI
}

fn default_report_interval() -> i64 {
    1
}

/// Engine configuration
/// Controls which force model runs and how
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub force_model: ForceModel, // full N-body or patched-conic
    #[serde(default)]
    pub parallel: bool, // evaluate full N-body accelerations on the rayon pool
    #[serde(default)]
    pub parent_rule: ParentRule, // tie-break between overlapping spheres of influence
    #[serde(default)]
    pub primary_recoil: bool, // bodies pull the primary too (full N-body only)
}

/// Run parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub steps: i64, // number of integration steps, >= 0
    pub dt: f64, // step size in `time_unit`
    #[serde(default)]
    pub time_unit: TimeUnit,
    #[serde(default = "default_report_interval")]
    pub report_interval: i64, // sample every n-th step, >= 1
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
}

impl ParametersConfig {
    /// Step size in seconds
    pub fn dt_seconds(&self) -> f64 {
        self.dt * self.time_unit.seconds()
    }
}

/// The star at the origin
#[derive(Deserialize, Debug, Clone)]
pub struct PrimaryConfig {
    pub name: String,
    pub mass: f64, // kg
    #[serde(default)]
    pub radius: f64, // m
}

/// Configuration-time orbit of one body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64, // kg
    #[serde(default)]
    pub radius: f64, // m
    pub sma: f64, // semi-major axis, km
    pub vel: f64, // orbital speed, m/s
    #[serde(default)]
    pub inc: f64, // inclination, degrees
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Run parameters
    pub primary: Option<PrimaryConfig>, // Required, checked when the scenario is built
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Orbiting bodies in output order
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
