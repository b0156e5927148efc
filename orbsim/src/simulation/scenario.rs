//! Build validated, runnable simulation scenarios
//!
//! Takes a `ScenarioConfig` (YAML/CSV-facing) or already-built runtime parts
//! and produces a `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies not yet placed)
//! - active force model (`AccelSet`)
//!
//! All configuration checks happen here. The fields stay public, so the
//! [`Driver`] repeats the checks it cannot step without.

use tracing::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::driver::{Driver, Progress, RunOutcome};
use crate::simulation::elements::OrbitalElements;
use crate::simulation::engine::{Engine, ForceModel};
use crate::simulation::forces::{AccelSet, DirectGravity, ParallelDirectGravity, PatchedConicGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Primary, System};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

fn check_mass(what: &str, name: &str, m: f64) -> SimResult<()> {
    if !(m.is_finite() && m > 0.0) {
        return Err(SimError::config(format!("{what} {name}: mass must be positive, got {m}")));
    }
    Ok(())
}

fn check_radius(what: &str, name: &str, r: f64) -> SimResult<()> {
    if !(r.is_finite() && r >= 0.0) {
        return Err(SimError::config(format!("{what} {name}: radius must be non-negative, got {r}")));
    }
    Ok(())
}

/// Force model matching the engine selection
pub fn build_forces(engine: &Engine, parameters: &Parameters) -> AccelSet {
    let forces = AccelSet::new();
    match (engine.force_model, engine.parallel) {
        (ForceModel::FullNBody, false) => forces.with(DirectGravity {
            G: parameters.G,
            primary_recoil: engine.primary_recoil,
        }),
        (ForceModel::FullNBody, true) => forces.with(ParallelDirectGravity {
            G: parameters.G,
            primary_recoil: engine.primary_recoil,
        }),
        (ForceModel::PatchedConic, _) => forces.with(PatchedConicGravity { G: parameters.G }),
    }
}

impl Scenario {
    /// Validate runtime parts and attach the selected force model
    pub fn build(
        engine: Engine,
        parameters: Parameters,
        primary: Option<Primary>,
        bodies: Vec<Body>,
    ) -> SimResult<Self> {
        let primary = primary.ok_or_else(|| SimError::config("no primary configured"))?;
        check_mass("primary", &primary.name, primary.m)?;
        check_radius("primary", &primary.name, primary.radius)?;

        if bodies.is_empty() {
            return Err(SimError::config("at least one orbiting body is required"));
        }
        for b in &bodies {
            check_mass("body", &b.name, b.m)?;
            check_radius("body", &b.name, b.radius)?;

            let e = b.elements;
            if !(e.sma.is_finite() && e.vel.is_finite() && e.inc.is_finite()) {
                return Err(SimError::config(format!("body {}: orbital elements must be finite", b.name)));
            }
        }

        if parameters.report_interval == 0 {
            return Err(SimError::config("report interval must be a positive integer"));
        }
        if !(parameters.dt.is_finite() && parameters.dt > 0.0) {
            return Err(SimError::config(format!("step size must be positive, got {}", parameters.dt)));
        }
        if !(parameters.G.is_finite() && parameters.G > 0.0) {
            return Err(SimError::config(format!("G must be positive, got {}", parameters.G)));
        }

        if engine.force_model == ForceModel::PatchedConic && (engine.parallel || engine.primary_recoil) {
            debug!("parallel and primary_recoil only apply to the full N-body model, ignoring");
        }

        let forces = build_forces(&engine, &parameters);
        let system = System::new(primary, bodies);

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }

    /// Map a `ScenarioConfig` onto runtime types, then validate
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let p_cfg = &cfg.parameters;

        if p_cfg.report_interval <= 0 {
            return Err(SimError::config(format!(
                "report interval must be a positive integer, got {}",
                p_cfg.report_interval
            )));
        }
        if p_cfg.steps < 0 {
            return Err(SimError::config(format!("step count must not be negative, got {}", p_cfg.steps)));
        }

        let parameters = Parameters {
            steps: p_cfg.steps as usize,
            dt: p_cfg.dt_seconds(),
            report_interval: p_cfg.report_interval as usize,
            G: p_cfg.G,
        };

        let e_cfg = cfg.engine;
        let engine = Engine {
            force_model: e_cfg.force_model,
            parallel: e_cfg.parallel,
            parent_rule: e_cfg.parent_rule,
            primary_recoil: e_cfg.primary_recoil,
        };

        let primary = cfg.primary.map(|pc| Primary::new(pc.name, pc.mass, pc.radius));

        // Bodies: map `BodyConfig` -> runtime `Body`, placed later by the driver
        let bodies: Vec<Body> = cfg.bodies.into_iter().map(|bc: BodyConfig| {
            Body::new(bc.name, bc.mass, bc.radius, OrbitalElements::new(bc.sma, bc.vel, bc.inc))
        }).collect();

        Self::build(engine, parameters, primary, bodies)
    }

    /// Initialize and run to completion or cancellation
    pub fn run(self, progress: &mut dyn Progress) -> SimResult<RunOutcome> {
        Driver::new(self)?.run(progress)
    }
}
