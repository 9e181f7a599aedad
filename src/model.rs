//! Core data model: warps, the players who create them, and world positions.

mod player;
mod position;
mod warp;

pub use player::{Player, WarpPlayer};
pub use position::{Dimension, Position};
pub use warp::Warp;
