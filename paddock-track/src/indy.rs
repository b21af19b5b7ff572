use paddock_core::Point;

use crate::{Checkpoint, LineSegment, Track, TrackError, ValidationTolerances};

const WIDTH: f64 = 18.0;
const HALF: f64 = WIDTH / 2.0;

const CENTERLINE: [Point; 16] = [
    Point::new(70.0, -45.0),
    Point::new(35.0, -45.0),
    Point::new(0.0, -45.0),
    Point::new(-35.0, -45.0),
    Point::new(-70.0, -45.0),
    Point::new(-75.0, -25.0),
    Point::new(-75.0, 0.0),
    Point::new(-75.0, 25.0),
    Point::new(-70.0, 45.0),
    Point::new(-35.0, 45.0),
    Point::new(0.0, 45.0),
    Point::new(35.0, 45.0),
    Point::new(70.0, 45.0),
    Point::new(75.0, 25.0),
    Point::new(75.0, 0.0),
    Point::new(75.0, -25.0),
];

const START_FINISH_INDEX: usize = 2;

/// Builds the Indianapolis-inspired "Indy Oval" and validates its geometry.
///
/// The oval is 150 m by 90 m on the centerline and 18 m wide.
/// The goal line crosses the south straight at `x = 0`, and five checkpoints
/// mark the turns and chutes in driving order.
///
/// # Errors
///
/// Returns a [`TrackError`] if the layout fails validation.
///
/// # Example
///
/// ```
/// let track = paddock_track::indy_oval().unwrap();
/// assert_eq!(track.name(), "Indy Oval");
/// assert_eq!(track.checkpoints().len(), 5);
/// ```
pub fn indy_oval() -> Result<Track, TrackError> {
    let goal_line = across_x(0.0, -45.0);

    let checkpoints = vec![
        Checkpoint::new("Turn 1", across_y(-75.0, -25.0), 5),
        Checkpoint::new("North Short Chute", across_y(-75.0, 0.0), 6),
        Checkpoint::new("Backstretch", across_x(0.0, 45.0), 10),
        Checkpoint::new("Turn 3", across_y(75.0, 25.0), 13),
        Checkpoint::new("South Short Chute", across_y(75.0, 0.0), 14),
    ];

    let track = Track::new(
        "Indy Oval",
        CENTERLINE.to_vec(),
        WIDTH,
        goal_line,
        checkpoints,
        START_FINISH_INDEX,
    )?;
    track.validate_geometry(ValidationTolerances::default())?;

    Ok(track)
}

/// A full-width line crossing a straight that runs along the X axis.
fn across_x(x: f64, y: f64) -> LineSegment {
    LineSegment::new(Point::new(x, y - HALF), Point::new(x, y + HALF))
}

/// A full-width line crossing a straight that runs along the Y axis.
fn across_y(x: f64, y: f64) -> LineSegment {
    LineSegment::new(Point::new(x - HALF, y), Point::new(x + HALF, y))
}
