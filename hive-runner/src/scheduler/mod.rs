//! Scheduler layer for the runner
//!
//! Drives a submitted execution to a terminal state by polling its callback
//! endpoint at a fixed cadence.

pub mod poller;

pub use poller::ExecutionPoller;
