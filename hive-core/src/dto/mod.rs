//! Data Transfer Objects for the StackSpot HTTP API
//!
//! These mirror the JSON and form bodies exchanged with the identity and
//! quick-command endpoints. Domain types are built from them at the edge.

pub mod execution;
pub mod token;
