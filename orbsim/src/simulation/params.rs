//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - step count and step size (seconds),
//! - sampling cadence,
//! - gravitational constant `G`

#[derive(Debug, Clone)]
pub struct Parameters {
    pub steps: usize, // number of integration steps
    pub dt: f64, // step size in seconds
    pub report_interval: usize, // sample every n-th step, >= 1
    pub G: f64, // gravitational constant
}
