//! Force / acceleration models for the orbital engine
//!
//! Defines the acceleration trait and the three gravity models:
//! direct N-body summation (sequential and rayon-parallel) and the
//! single-parent patched-conic model.
//!
//! Every model reads positions from `&System` and writes into a separate
//! [`AccelBuffer`], so all accelerations of a step come from the pre-step
//! positions no matter the order bodies are visited in.

use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::simulation::states::{GravitySource, NVec3, System};

/// Scratch accelerations for one step
/// - `bodies[i]` belongs to `sys.bodies[i]`
/// - `primary` is the recoil of the star, zero unless a model enables it
#[derive(Debug, Clone)]
pub struct AccelBuffer {
    pub bodies: Vec<NVec3>,
    pub primary: NVec3,
}

impl AccelBuffer {
    pub fn new(n: usize) -> Self {
        Self {
            bodies: vec![NVec3::zeros(); n],
            primary: NVec3::zeros(),
        }
    }

    /// Zero buffer
    pub fn zero(&mut self) {
        for a in self.bodies.iter_mut() {
            *a = NVec3::zeros();
        }
        self.primary = NVec3::zeros();
    }
}

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out` is zeroed first, then every term adds its contribution
    pub fn accumulate_accels(&self, sys: &System, out: &mut AccelBuffer) -> SimResult<()> {
        out.zero();
        for term in &self.terms {
            term.acceleration(sys, out)?;
        }
        Ok(())
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration sources operating on a [`System`]
/// Implementations add their contribution into `out.bodies[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut AccelBuffer) -> SimResult<()>;
}

/// Pull of `source` on a point named `target` at `x`:
/// a = G * m_src / |r|^3 * r, with r pointing from the target to the source
fn pull(g: f64, target: &str, x: NVec3, source: &dyn GravitySource) -> SimResult<NVec3> {
    let r = source.position() - x;
    let r2 = r.dot(&r);

    // inverse-cube term is undefined at zero separation
    if r2 == 0.0 {
        return Err(SimError::Singularity {
            body: target.to_string(),
            against: source.name().to_string(),
        });
    }

    let inv_r = r2.sqrt().recip();
    let inv_r3 = inv_r * inv_r * inv_r;
    Ok(g * source.mass() * inv_r3 * r)
}

/// Sum of pulls on body `i` from every other body (by index) and the primary
fn direct_sum(g: f64, sys: &System, i: usize) -> SimResult<NVec3> {
    let bi = &sys.bodies[i];
    let mut a = NVec3::zeros();

    for (j, bj) in sys.bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        a += pull(g, &bi.name, bi.x, bj)?;
    }

    a += pull(g, &bi.name, bi.x, &sys.primary)?;
    Ok(a)
}

/// Pull of body `i` on the primary, used only for recoil
fn recoil_from(g: f64, sys: &System, i: usize) -> SimResult<NVec3> {
    pull(g, &sys.primary.name, sys.primary.x, &sys.bodies[i])
}

/// Direct N-body gravity, sequential
///
/// The primary pulls on every body; bodies pull on each other. The bodies'
/// pull on the primary is only applied when `primary_recoil` is set, so by
/// default momentum is not conserved and the star stays at the origin.
pub struct DirectGravity {
    pub G: f64, // gravitational constant
    pub primary_recoil: bool, // let bodies accelerate the primary
}

impl Acceleration for DirectGravity {
    fn acceleration(&self, sys: &System, out: &mut AccelBuffer) -> SimResult<()> {
        for i in 0..sys.bodies.len() {
            out.bodies[i] += direct_sum(self.G, sys, i)?;
        }

        if self.primary_recoil {
            for i in 0..sys.bodies.len() {
                out.primary += recoil_from(self.G, sys, i)?;
            }
        }
        Ok(())
    }
}

/// Direct N-body gravity, one rayon task per body
///
/// Each task only writes its own slot of `out.bodies`. `try_for_each` returns
/// once every task has finished, which is the barrier before the integrator
/// reads the buffer. Per-body summation order matches [`DirectGravity`]; the
/// recoil reduction order does not, so with recoil on the two models can
/// differ in the last bits.
pub struct ParallelDirectGravity {
    pub G: f64,
    pub primary_recoil: bool,
}

impl Acceleration for ParallelDirectGravity {
    fn acceleration(&self, sys: &System, out: &mut AccelBuffer) -> SimResult<()> {
        let g = self.G;

        out.bodies
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, a)| -> SimResult<()> {
                *a += direct_sum(g, sys, i)?;
                Ok(())
            })?;

        if self.primary_recoil {
            let recoil = (0..sys.bodies.len())
                .into_par_iter()
                .map(|i| recoil_from(g, sys, i))
                .try_reduce(|| NVec3::zeros(), |a, b| Ok(a + b))?;
            out.primary += recoil;
        }
        Ok(())
    }
}

/// Patched-conic gravity: each body feels only its current parent
/// O(n) per step; parents are maintained by [`super::soi`]
pub struct PatchedConicGravity {
    pub G: f64,
}

impl Acceleration for PatchedConicGravity {
    fn acceleration(&self, sys: &System, out: &mut AccelBuffer) -> SimResult<()> {
        for (i, b) in sys.bodies.iter().enumerate() {
            let source = sys.source(b.parent);
            out.bodies[i] += pull(self.G, &b.name, b.x, source)?;
        }
        Ok(())
    }
}
