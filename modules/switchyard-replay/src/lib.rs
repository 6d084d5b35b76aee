//! Config-driven replay of an action log through composed reducers.

pub mod config;
pub mod logging;
pub mod replay;

pub use config::{load_config, CounterConfig, LogConfig, ReplayConfig};
pub use logging::env_filter;
pub use replay::{build_classifier, build_reducer, parse_actions, read_actions, run, Outcome, ReplaySummary};
