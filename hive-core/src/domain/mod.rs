//! Core domain types
//!
//! These types describe what the runner works with independently of how the
//! remote API happens to encode it. Conversions from the wire format live in
//! [`crate::dto`].

pub mod credentials;
pub mod execution;
pub mod notification;
pub mod token;
