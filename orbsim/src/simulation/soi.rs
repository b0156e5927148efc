//! Sphere-of-influence radii and parent resolution for the patched-conic model
//!
//! soi = sma * (m_body / m_primary)^(2/5)
//!
//! The radius only depends on configuration-level mass and semi-major axis,
//! so it is refreshed once per resolver pass (run start and report
//! boundaries) rather than every step.

use serde::Deserialize;
use tracing::debug;

use crate::simulation::states::{Parent, System};

/// How a body picks between several spheres of influence that all contain it
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentRule {
    /// innermost enclosing sphere wins, ties go to the lower index
    #[default]
    #[serde(rename = "smallest-soi")]
    SmallestSoi,

    /// closest enclosing body wins, ties go to the lower index
    #[serde(rename = "nearest")]
    Nearest,
}

/// Recompute every body's sphere-of-influence radius
pub fn compute_soi(sys: &mut System) {
    let m_primary = sys.primary.m;
    for b in sys.bodies.iter_mut() {
        b.soi = b.elements.sma_m() * (b.m / m_primary).powf(0.4);
    }
}

/// Refresh SOI radii, then reassign every body's parent.
///
/// A body whose distance to another body is strictly below that body's
/// `soi` is a candidate for capture; `rule` picks among candidates, and a
/// body with no candidate falls back to the primary. All parents are decided
/// from the same positions before any is written.
pub fn resolve_parents(sys: &mut System, rule: ParentRule) {
    compute_soi(sys);

    let n = sys.bodies.len();
    let mut parents = Vec::with_capacity(n);

    for i in 0..n {
        let xi = sys.bodies[i].x;

        // (index, soi, distance) of the best enclosing body so far
        let mut best: Option<(usize, f64, f64)> = None;

        for (j, other) in sys.bodies.iter().enumerate() {
            if j == i {
                continue;
            }

            let dist = (other.x - xi).norm();
            if dist >= other.soi {
                continue;
            }

            let better = match best {
                None => true,
                Some((_, soi, d)) => match rule {
                    ParentRule::SmallestSoi => other.soi < soi,
                    ParentRule::Nearest => dist < d,
                },
            };
            if better {
                best = Some((j, other.soi, dist));
            }
        }

        parents.push(match best {
            Some((j, _, _)) => Parent::Body(j),
            None => Parent::Primary,
        });
    }

    for (b, parent) in sys.bodies.iter_mut().zip(parents) {
        if b.parent != parent {
            debug!(body = %b.name, from = ?b.parent, to = ?parent, "parent reassigned");
            b.parent = parent;
        }
    }
}
