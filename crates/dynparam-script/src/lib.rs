//! Dynparam Script - shell-backed script evaluation
//!
//! Provides a `ScriptEvaluator` that:
//! - Runs a parameter's script through a configured shell or remote launcher
//! - Enforces a per-evaluation timeout
//! - Interprets stdout as JSON or as one choice per line
//!
//! plus the TOML configuration layer for hosts.

pub mod command;
pub mod config;
pub mod launch;
pub mod output;
pub mod runner;

// Re-export key types
pub use command::CommandScriptEvaluator;
pub use config::{ConfigError, EvaluatorConfig, OutputFormat, ScriptHostConfig};
pub use launch::{ExecutionTarget, LaunchPlan};
pub use output::parse_output;
pub use runner::{run_plan, ScriptOutput};
