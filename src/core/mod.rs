//! Core scheduler modules
//!
//! Contains the registry, state machine, timers and status views.

pub mod config;
pub mod critical;
pub mod error;
pub mod kernel;
pub mod types;
pub mod task;
pub mod sched;
pub mod status;
pub mod time;
pub mod cs_cell;
