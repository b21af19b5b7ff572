use paddock_core::Point;

use crate::TrackError;

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Returns the unit vector pointing from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::ZeroLengthSegment`] if the endpoints coincide.
    pub fn direction(&self) -> Result<(f64, f64), TrackError> {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let length = dx.hypot(dy);

        if length == 0.0 {
            return Err(TrackError::ZeroLengthSegment);
        }

        Ok((dx / length, dy / length))
    }

    /// Returns the shortest distance from `point` to any point on the segment.
    #[must_use]
    pub fn distance_to(&self, point: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let length_squared = dx * dx + dy * dy;

        if length_squared == 0.0 {
            return point.distance_to(self.start);
        }

        let t = (((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / length_squared)
            .clamp(0.0, 1.0);
        point.distance_to(Point::new(self.start.x + t * dx, self.start.y + t * dy))
    }

    /// Returns `true` if the two segments cross each other.
    ///
    /// Only proper crossings count: touching at an endpoint or overlapping
    /// collinearly does not.
    #[must_use]
    pub fn crosses(&self, other: &LineSegment) -> bool {
        let d1 = orientation(other.start, other.end, self.start);
        let d2 = orientation(other.start, other.end, self.end);
        let d3 = orientation(self.start, self.end, other.start);
        let d4 = orientation(self.start, self.end, other.end);

        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }
}

/// Signed area of the triangle `a, b, c`; positive when `c` is left of `a -> b`.
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// A labelled line across the track at a specific centerline index.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub label: String,
    pub segment: LineSegment,
    pub centerline_index: usize,
}

impl Checkpoint {
    #[must_use]
    pub fn new(label: impl Into<String>, segment: LineSegment, centerline_index: usize) -> Self {
        Self {
            label: label.into(),
            segment,
            centerline_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn direction_is_unit_length() {
        let segment = LineSegment::new(Point::new(1.0, 1.0), Point::new(4.0, 5.0));

        let (dx, dy) = segment.direction().unwrap();
        assert_relative_eq!(dx, 0.6);
        assert_relative_eq!(dy, 0.8);
        assert_relative_eq!(segment.length(), 5.0);
    }

    #[test]
    fn zero_length_segment_has_no_direction() {
        let point = Point::new(2.0, -3.0);
        let segment = LineSegment::new(point, point);

        assert_eq!(segment.direction(), Err(TrackError::ZeroLengthSegment));
        assert_eq!(segment.length(), 0.0);
    }

    #[test]
    fn distance_to_projects_onto_the_segment() {
        let segment = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));

        assert_relative_eq!(segment.distance_to(Point::new(4.0, 3.0)), 3.0);
        assert_relative_eq!(segment.distance_to(Point::new(13.0, 4.0)), 5.0);
        assert_relative_eq!(segment.distance_to(Point::new(-3.0, -4.0)), 5.0);

        let point = LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_relative_eq!(point.distance_to(Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn crossing_requires_both_segments_to_straddle() {
        let line = LineSegment::new(Point::new(0.0, -2.0), Point::new(0.0, 2.0));

        let through = LineSegment::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.5));
        let short = LineSegment::new(Point::new(-1.0, 0.0), Point::new(-0.1, 0.0));
        let wide = LineSegment::new(Point::new(-1.0, 3.0), Point::new(1.0, 3.0));
        let touching = LineSegment::new(Point::new(-1.0, 0.0), Point::new(0.0, 0.0));

        assert!(through.crosses(&line));
        assert!(line.crosses(&through));
        assert!(!short.crosses(&line));
        assert!(!wide.crosses(&line));
        assert!(!touching.crosses(&line));
    }
}
