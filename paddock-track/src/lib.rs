//! Closed race-track geometry for Paddock.
//!
//! A [`Track`] is a looped centerline with a constant width, a goal line, and
//! a set of [`Checkpoint`]s.
//! [`Track::validate_geometry`] checks that every crossing line is
//! perpendicular to the centerline and spans the full width.
//! [`indy_oval`] builds a validated Indianapolis-inspired oval.

mod error;
mod indy;
mod segment;
mod track;

pub use error::TrackError;
pub use indy::indy_oval;
pub use paddock_core::Point;
pub use segment::{Checkpoint, LineSegment};
pub use track::{Track, ValidationTolerances};
