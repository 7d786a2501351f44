//! Terminal front-end for Pet Battler
//!
//! Talks to the game service over blocking HTTP and drives a
//! `battler_core::Session` from lines typed on stdin.

pub mod config;
pub mod http;
pub mod input;
pub mod render;
pub mod shell;
