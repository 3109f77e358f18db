pub mod config;
pub mod driver;
pub mod mapgen;

pub use config::{MapGenConfig, RunConfig};
pub use driver::{RunReport, RunStatus, RunTrace, prepare, run, run_traced};
