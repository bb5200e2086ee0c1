//! CLI command implementations.

mod analyze;
mod config;
mod doctor;
mod history;
mod serve;

pub use analyze::run_analyze;
pub use config::run_config;
pub use doctor::run_doctor;
pub use history::run_history;
pub use serve::run_serve;
