pub mod states;
pub mod elements;
pub mod params;
pub mod engine;
pub mod forces;
pub mod soi;
pub mod integrator;
pub mod history;
pub mod driver;
pub mod scenario;
