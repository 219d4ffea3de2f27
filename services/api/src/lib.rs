//! HomeCover API Library Crate
//!
//! This library contains the HTTP host for the HomeCover skill: configuration,
//! application state, the skill endpoint and routing. The `api` binary is a
//! thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
