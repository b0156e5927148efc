//! CSV system presets
//!
//! One header row, then one row per body in the column order
//! `type,name,mass,radius,sma,vel,inc`. A `type` of `s` marks the star,
//! anything else an orbiting body. Columns are read by position, so the
//! header text itself is not checked.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::config::{BodyConfig, EngineConfig, ParametersConfig, PrimaryConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};

#[derive(Deserialize, Debug)]
struct PresetRow {
    kind: String,
    name: String,
    mass: f64,
    radius: f64,
    sma: f64,
    vel: f64,
    inc: f64,
}

/// Bodies of a preset, without run settings
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub primary: Option<PrimaryConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl Preset {
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut preset = Preset::default();

        for record in rdr.records() {
            let row: PresetRow = record?.deserialize(None)?;

            if row.kind.eq_ignore_ascii_case("s") {
                if let Some(existing) = &preset.primary {
                    return Err(SimError::config(format!(
                        "preset defines more than one star: {} and {}",
                        existing.name, row.name
                    )));
                }
                preset.primary = Some(PrimaryConfig {
                    name: row.name,
                    mass: row.mass,
                    radius: row.radius,
                });
            } else {
                preset.bodies.push(BodyConfig {
                    name: row.name,
                    mass: row.mass,
                    radius: row.radius,
                    sma: row.sma,
                    vel: row.vel,
                    inc: row.inc,
                });
            }
        }

        debug!(bodies = preset.bodies.len(), star = preset.primary.is_some(), "preset parsed");
        Ok(preset)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Combine with run settings into a full scenario
    pub fn into_scenario(self, engine: EngineConfig, parameters: ParametersConfig) -> ScenarioConfig {
        ScenarioConfig {
            engine,
            parameters,
            primary: self.primary,
            bodies: self.bodies,
        }
    }
}
