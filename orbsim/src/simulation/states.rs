//! Core state types for the orbital simulation.
//!
//! Defines the star and its orbiting bodies:
//! - `Primary` the dominant star, pinned at the origin unless recoil is enabled
//! - `Body`    an orbiting body with its orbital elements and live state
//! - `System`  the primary plus the fixed set of bodies and the time `t`
//!
//! Both `Primary` and `Body` implement [`GravitySource`] so force models can
//! read mass and position from either without caring which one they hold.

use nalgebra::Vector3;

use super::elements::OrbitalElements;

pub type NVec3 = Vector3<f64>;

/// Gravitational constant in SI units (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.674e-11;

/// Anything that pulls on a body: the primary or another body
pub trait GravitySource {
    fn name(&self) -> &str;
    fn mass(&self) -> f64; // kg
    fn position(&self) -> NVec3; // m
}

/// Dominant gravity source of a body in the patched-conic model.
/// `Body(i)` indexes into `System::bodies` and never points at the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent {
    #[default]
    Primary,
    Body(usize),
}

#[derive(Debug, Clone)]
pub struct Primary {
    pub name: String,
    pub m: f64, // mass
    pub radius: f64, // radius
    pub x: NVec3, // position, origin for the whole run unless recoil is on
    pub v: NVec3, // velocity, only nonzero with recoil
    pub soi: f64, // sphere of influence, never used as a constraint
}

impl Primary {
    pub fn new(name: impl Into<String>, m: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            m,
            radius,
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            soi: f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub m: f64, // mass
    pub radius: f64, // radius
    pub elements: OrbitalElements, // configuration-time orbit
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub soi: f64, // sphere of influence radius
    pub parent: Parent, // dominant source for patched-conic
}

impl Body {
    /// Body with zeroed state, waiting for [`super::elements::initialize_state`]
    pub fn new(name: impl Into<String>, m: f64, radius: f64, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            m,
            radius,
            elements,
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            soi: 0.0,
            parent: Parent::Primary,
        }
    }
}

impl GravitySource for Primary {
    fn name(&self) -> &str {
        &self.name
    }

    fn mass(&self) -> f64 {
        self.m
    }

    fn position(&self) -> NVec3 {
        self.x
    }
}

impl GravitySource for Body {
    fn name(&self) -> &str {
        &self.name
    }

    fn mass(&self) -> f64 {
        self.m
    }

    fn position(&self) -> NVec3 {
        self.x
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub primary: Primary, // the star
    pub bodies: Vec<Body>, // orbiting bodies, fixed for the run
    pub t: f64, // time
}

impl System {
    pub fn new(primary: Primary, bodies: Vec<Body>) -> Self {
        Self { primary, bodies, t: 0.0 }
    }

    /// Resolve a parent reference to the source it names
    pub fn source(&self, parent: Parent) -> &dyn GravitySource {
        match parent {
            Parent::Primary => &self.primary,
            Parent::Body(j) => &self.bodies[j],
        }
    }
}
