//! Fixed-step semi-implicit Euler integrator
//!
//! Velocity is kicked first, then position drifts with the updated
//! velocity. This is first order (global error ~ dt) but far better behaved
//! on closed orbits than explicit Euler, which drifts using the old velocity.

use super::forces::{AccelBuffer, AccelSet};
use super::params::Parameters;
use super::states::{NVec3, System};
use crate::error::{SimError, SimResult};

/// Apply precomputed accelerations over one step of length `dt`:
/// v_n+1 = v_n + dt * a_n, then x_n+1 = x_n + dt * v_n+1
pub fn euler_step(sys: &mut System, acc: &AccelBuffer, dt: f64) {
    for (b, a) in sys.bodies.iter_mut().zip(acc.bodies.iter()) {
        b.v += dt * *a;
        b.x += dt * b.v;
    }

    // zero unless recoil is on, so the primary stays put by default
    let p = &mut sys.primary;
    p.v += dt * acc.primary;
    p.x += dt * p.v;

    sys.t += dt;
}

/// Advance the system by one step: evaluate `forces` into `acc` from the
/// current positions, then kick and drift every body.
/// `step` only labels a [`SimError::NumericalInstability`].
pub fn euler_integrator(
    sys: &mut System,
    forces: &AccelSet,
    params: &Parameters,
    acc: &mut AccelBuffer,
    step: usize,
) -> SimResult<()> {
    // every acceleration is known before any position moves
    forces.accumulate_accels(&*sys, acc)?;

    euler_step(sys, acc, params.dt);

    check_finite(sys, step)
}

fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Fail on the first body (or the primary) whose state left the reals
pub fn check_finite(sys: &System, step: usize) -> SimResult<()> {
    for b in &sys.bodies {
        if !is_finite(&b.x) || !is_finite(&b.v) {
            return Err(SimError::NumericalInstability {
                step,
                body: b.name.clone(),
            });
        }
    }

    let p = &sys.primary;
    if !is_finite(&p.x) || !is_finite(&p.v) {
        return Err(SimError::NumericalInstability {
            step,
            body: p.name.clone(),
        });
    }
    Ok(())
}
