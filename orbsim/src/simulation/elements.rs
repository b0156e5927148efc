//! Orbital elements and initial state derivation
//!
//! The conversion is a simplified placement rather than a full
//! elements-to-state-vector transform: every body starts at zero true
//! anomaly on the y axis, tilted about the x axis by its inclination, and
//! moves along +x.

use super::states::{NVec3, System};

const M_PER_KM: f64 = 1000.0;

/// Orbit of a body as entered at configuration time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub sma: f64, // semi-major axis in km
    pub vel: f64, // orbital speed in m/s
    pub inc: f64, // inclination in degrees
}

impl OrbitalElements {
    pub fn new(sma: f64, vel: f64, inc: f64) -> Self {
        Self { sma, vel, inc }
    }

    /// Semi-major axis in meters
    pub fn sma_m(&self) -> f64 {
        self.sma * M_PER_KM
    }

    /// Initial (position, velocity) in SI units
    pub fn to_state(&self) -> (NVec3, NVec3) {
        let r = self.sma_m();
        let inc = self.inc.to_radians();

        let x = NVec3::new(0.0, r * inc.cos(), r * inc.sin());
        let v = NVec3::new(self.vel, 0.0, 0.0);
        (x, v)
    }
}

/// Assign every body its Cartesian state from its orbital elements.
/// Called once by the driver before the first force evaluation.
pub fn initialize_state(sys: &mut System) {
    for b in sys.bodies.iter_mut() {
        let (x, v) = b.elements.to_state();
        b.x = x;
        b.v = v;
    }
    sys.t = 0.0;
}
