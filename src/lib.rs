//! **corridors** carves seeded perfect mazes with a recursive backtracker and turns the
//! passages into textured corridor quads ready for rendering.

pub mod cells;
pub mod directions;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod renderers;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod units;

pub use crate::maze::Maze;
