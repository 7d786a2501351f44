//! Pet Battler client core
//!
//! Turns game-service responses into render-ready views and decides which
//! screen comes next. All game rules live on the server; this crate only
//! tracks which side of each match is the player and what to show.

pub mod allocation;
pub mod api;
pub mod engine;
pub mod error;
pub mod log;
pub mod reconciler;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use allocation::*;
pub use api::*;
pub use engine::*;
pub use error::*;
pub use reconciler::*;
pub use session::*;
pub use state::*;
pub use types::*;
pub use view::*;
