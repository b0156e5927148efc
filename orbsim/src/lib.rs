pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, GravitySource, NVec3, Parent, Primary, System, G_SI};
pub use simulation::elements::{initialize_state, OrbitalElements};
pub use simulation::forces::{AccelBuffer, AccelSet, Acceleration, DirectGravity, ParallelDirectGravity, PatchedConicGravity};
pub use simulation::soi::{compute_soi, resolve_parents, ParentRule};
pub use simulation::integrator::{euler_integrator, euler_step};
pub use simulation::history::History;
pub use simulation::driver::{CancelFlag, Driver, LogProgress, NoProgress, Progress, RunOutcome, RunState};
pub use simulation::engine::{Engine, ForceModel};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, PrimaryConfig, ScenarioConfig, TimeUnit};
pub use configuration::preset::Preset;

pub use benchmark::benchmark::{bench_euler_curve, bench_gravity};
