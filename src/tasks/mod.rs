//! Background Tasks Module
//!
//! Contains the task that runs alongside every cache instance.
//!
//! # Tasks
//! - Sweeper: removes expired entries once per cleanup interval

mod sweeper;

pub(crate) use sweeper::spawn_sweeper;
pub use sweeper::{sweep_expired, SweepReport};
