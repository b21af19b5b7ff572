//! Core traits and planar primitives for Paddock.
//!
//! Paddock separates what a system *does* in a single step, captured by a
//! deterministic [`Model`], from how it is driven through time, captured by a
//! [`Simulation`].
//! The vehicle and track crates build on the shared [`Point`] type and the
//! heading normalization in [`angle`].

pub mod angle;
mod geometry;
mod model;
mod simulation;

pub use geometry::Point;
pub use model::{Model, Snapshot};
pub use simulation::{Simulation, SnapshotOf};
