//! Command handlers for the `marketmap` binary.

pub mod config;
pub mod credentials;
pub mod extract;
pub mod theme;
