use std::time::Instant;

use crate::error::SimResult;
use crate::simulation::elements::{initialize_state, OrbitalElements};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelBuffer, AccelSet, Acceleration, DirectGravity, ParallelDirectGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::build_forces;
use crate::simulation::states::{Body, Primary, System, G_SI};

/// Helper to build a placed system of size `n`
/// Bodies sit on distinct radii and inclinations so no pair coincides
fn make_system(n: usize) -> System {
    let primary = Primary::new("Sun", 1.989e30, 6.957e8);

    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic elements, no rand needed
            let sma = 5.0e7 + 1.0e6 * i_f; // km
            let vel = (G_SI * primary.m / (sma * 1000.0)).sqrt();
            let inc = (i_f * 0.37).sin() * 10.0;
            Body::new(format!("b{i}"), 1.0e22, 1.0e6, OrbitalElements::new(sma, vel, inc))
        })
        .collect();

    let mut sys = System::new(primary, bodies);
    initialize_state(&mut sys);
    sys
}

fn make_params() -> Parameters {
    Parameters {
        steps: 2,
        dt: 3600.0,
        report_interval: 1,
        G: G_SI,
    }
}

/// Time one force evaluation, sequential vs rayon, for a range of n
pub fn bench_gravity() -> SimResult<()> {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = make_system(n);
        let mut out = AccelBuffer::new(n);

        let direct = DirectGravity { G: G_SI, primary_recoil: false };
        let parallel = ParallelDirectGravity { G: G_SI, primary_recoil: false };

        // Warm up
        direct.acceleration(&sys, &mut out)?;
        out.zero();
        parallel.acceleration(&sys, &mut out)?;
        out.zero();

        let t0 = Instant::now();
        direct.acceleration(&sys, &mut out)?;
        let dt_direct = t0.elapsed().as_secs_f64();
        out.zero();

        let t1 = Instant::now();
        parallel.acceleration(&sys, &mut out)?;
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, sequential = {:8.6} s, parallel = {:8.6} s", dt_direct, dt_parallel);
    }
    Ok(())
}

/// Time full Euler steps for a range of n, CSV to stdout
/// Paste output directly into a spreadsheet to graph
pub fn bench_euler_curve() -> SimResult<()> {
    println!("N,sequential_ms,parallel_ms");

    let params = make_params();

    for n in (200..=3200).step_by(200) {
        let template = make_system(n);
        let mut acc = AccelBuffer::new(n);

        let sequential = Engine { parallel: false, ..Engine::default() };
        let parallel = Engine { parallel: true, ..Engine::default() };

        let mut ms = [0.0; 2];
        for (slot, engine) in [sequential, parallel].iter().enumerate() {
            let forces: AccelSet = build_forces(engine, &params);
            let mut sys = template.clone();

            let t0 = Instant::now();
            for step in 0..params.steps {
                euler_integrator(&mut sys, &forces, &params, &mut acc, step)?;
            }
            ms[slot] = t0.elapsed().as_secs_f64() * 1000.0 / params.steps as f64;
        }

        println!("{},{:.6},{:.6}", n, ms[0], ms[1]);
    }
    Ok(())
}
