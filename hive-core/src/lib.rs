//! Hive Core
//!
//! Core types shared by the quick-command client, runner and CLI.
//!
//! This crate contains:
//! - Domain types: credentials, access tokens, executions and notifications
//! - DTOs: wire representations of the StackSpot token and quick-command endpoints

pub mod domain;
pub mod dto;
