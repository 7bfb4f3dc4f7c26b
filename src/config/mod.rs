//! Configuration loading and management for the payslip engine.
//!
//! This module loads the payroll policy, HTTP listener settings and seed
//! accounts from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Listening on {}", config.server().bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, PayrollPolicy, ReimbursementAmountPolicy, SeedAccount, SeedData, ServerConfig,
};
