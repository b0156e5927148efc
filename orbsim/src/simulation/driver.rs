//! Simulation driver
//!
//! Runs a [`Scenario`] for its configured number of steps:
//!
//! ```text
//! Initialized -> Stepping -> Completed
//!                         -> Cancelled
//! ```
//!
//! Each step evaluates forces, advances the state, resolves SOI parents and
//! samples on report boundaries, then reports progress and polls for
//! cancellation. Cancellation is only observed between steps and keeps the
//! history recorded so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, trace, warn};

use super::elements::initialize_state;
use super::engine::Engine;
use super::forces::{AccelBuffer, AccelSet};
use super::history::History;
use super::integrator::euler_integrator;
use super::params::Parameters;
use super::scenario::Scenario;
use super::soi::resolve_parents;
use super::states::System;
use crate::error::{SimError, SimResult};

/// Progress and cancellation hooks, called once per completed step
pub trait Progress {
    /// `step` is the 0-based index of the step that just finished
    fn report(&mut self, step: usize);
    fn is_cancelled(&self) -> bool;
}

/// Never reports, never cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _step: usize) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shared cancellation flag; clone it into whatever thread decides to stop
#[derive(Debug, Default, Clone)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Progress for CancelFlag {
    fn report(&mut self, _step: usize) {}

    fn is_cancelled(&self) -> bool {
        self.is_set()
    }
}

/// Logs a progress line every `every` steps; cancellable through `cancel`
#[derive(Debug, Clone)]
pub struct LogProgress {
    pub total: usize,
    pub every: usize,
    pub cancel: CancelFlag,
}

impl LogProgress {
    pub fn new(total: usize, every: usize) -> Self {
        Self {
            total,
            every: every.max(1),
            cancel: CancelFlag::new(),
        }
    }
}

impl Progress for LogProgress {
    fn report(&mut self, step: usize) {
        let done = step + 1;
        if done % self.every == 0 || done == self.total {
            info!("step {done}/{}", self.total);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_set()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Stepping,
    Completed,
    Cancelled,
}

/// What a finished run hands back
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub history: History,
    pub state: RunState, // Completed or Cancelled
    pub steps_taken: usize,
    pub system: System, // final state
}

pub struct Driver {
    engine: Engine,
    parameters: Parameters,
    system: System,
    forces: AccelSet,
    history: History,
    acc: AccelBuffer,
    state: RunState,
}

impl Driver {
    /// Place every body from its orbital elements, resolve initial parents
    /// for the patched-conic model and record the initial sample.
    ///
    /// `Scenario` fields are public, so the stepping parameters are checked
    /// again here rather than trusted from [`Scenario::build`].
    pub fn new(scenario: Scenario) -> SimResult<Self> {
        let Scenario {
            engine,
            parameters,
            mut system,
            forces,
        } = scenario;

        if parameters.report_interval == 0 {
            return Err(SimError::config("report interval must be a positive integer"));
        }
        if !(parameters.dt.is_finite() && parameters.dt > 0.0) {
            return Err(SimError::config(format!("step size must be positive, got {}", parameters.dt)));
        }

        initialize_state(&mut system);
        if engine.resolves_soi() {
            resolve_parents(&mut system, engine.parent_rule);
        }

        let mut history = History::new(&system);
        history.record(&system);

        let acc = AccelBuffer::new(system.bodies.len());

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            history,
            acc,
            state: RunState::Initialized,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Step until the step count is exhausted or `progress` cancels.
    /// Errors abort the run and discard the history.
    pub fn run(mut self, progress: &mut dyn Progress) -> SimResult<RunOutcome> {
        let steps = self.parameters.steps;
        let report = self.parameters.report_interval;

        info!(
            bodies = self.system.bodies.len(),
            steps,
            dt = self.parameters.dt,
            model = ?self.engine.force_model,
            parallel = self.engine.parallel,
            "starting run"
        );

        self.state = RunState::Stepping;
        let mut taken = 0;

        for step in 0..steps {
            if let Err(e) = euler_integrator(
                &mut self.system,
                &self.forces,
                &self.parameters,
                &mut self.acc,
                step,
            ) {
                warn!(step, "run aborted: {e}");
                return Err(e);
            }
            taken = step + 1;

            if History::is_report_step(step, report) {
                if self.engine.resolves_soi() {
                    resolve_parents(&mut self.system, self.engine.parent_rule);
                }
                self.history.record(&self.system);
                trace!(step, t = self.system.t, "sampled");
            }

            progress.report(step);
            if progress.is_cancelled() {
                self.state = RunState::Cancelled;
                info!(step, samples = self.history.len(), "run cancelled");
                break;
            }
        }

        if self.state == RunState::Stepping {
            self.state = RunState::Completed;
            info!(samples = self.history.len(), t = self.system.t, "run completed");
        }

        Ok(RunOutcome {
            history: self.history,
            state: self.state,
            steps_taken: taken,
            system: self.system,
        })
    }
}
