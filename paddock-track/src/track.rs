use log::debug;
use paddock_core::Point;

use crate::{Checkpoint, LineSegment, TrackError};

/// Acceptance limits for [`Track::validate_geometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationTolerances {
    /// Largest allowed `|tangent · direction|` for a crossing line.
    pub perpendicular: f64,
    /// Slack allowed when comparing a crossing line's length to the width.
    pub length: f64,
}

impl Default for ValidationTolerances {
    fn default() -> Self {
        Self {
            perpendicular: 0.12,
            length: 1e-3,
        }
    }
}

/// A closed race track.
///
/// The centerline loops: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    name: String,
    centerline: Vec<Point>,
    width: f64,
    goal_line: LineSegment,
    checkpoints: Vec<Checkpoint>,
    start_finish_index: usize,
}

impl Track {
    /// Creates a track after checking its structure.
    ///
    /// Geometry (perpendicularity and span) is checked separately by
    /// [`validate_geometry`](Track::validate_geometry).
    ///
    /// # Errors
    ///
    /// - [`TrackError::TooFewPoints`] if the centerline has fewer than 3 points.
    /// - [`TrackError::InvalidWidth`] if `width` is not finite and positive.
    /// - [`TrackError::IndexOutOfRange`] if the start/finish index or any
    ///   checkpoint index is past the end of the centerline.
    pub fn new(
        name: impl Into<String>,
        centerline: Vec<Point>,
        width: f64,
        goal_line: LineSegment,
        checkpoints: Vec<Checkpoint>,
        start_finish_index: usize,
    ) -> Result<Self, TrackError> {
        let len = centerline.len();
        if len < 3 {
            return Err(TrackError::TooFewPoints { count: len });
        }

        if !(width.is_finite() && width > 0.0) {
            return Err(TrackError::InvalidWidth { width });
        }

        if start_finish_index >= len {
            return Err(TrackError::IndexOutOfRange {
                label: "Goal line".to_owned(),
                index: start_finish_index,
                len,
            });
        }

        if let Some(checkpoint) = checkpoints.iter().find(|c| c.centerline_index >= len) {
            return Err(TrackError::IndexOutOfRange {
                label: checkpoint_label(checkpoint),
                index: checkpoint.centerline_index,
                len,
            });
        }

        Ok(Self {
            name: name.into(),
            centerline,
            width,
            goal_line,
            checkpoints,
            start_finish_index,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn centerline(&self) -> &[Point] {
        &self.centerline
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn goal_line(&self) -> &LineSegment {
        &self.goal_line
    }

    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    #[must_use]
    pub fn start_finish_index(&self) -> usize {
        self.start_finish_index
    }

    /// Returns the unit tangent of the centerline at `index`.
    ///
    /// The tangent is the central difference between the neighbouring points.
    /// Indices wrap around the loop.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DegenerateCenterline`] if both neighbours coincide.
    pub fn tangent(&self, index: usize) -> Result<(f64, f64), TrackError> {
        let len = self.centerline.len();
        let index = index % len;

        let prev = self.centerline[(index + len - 1) % len];
        let next = self.centerline[(index + 1) % len];

        LineSegment::new(prev, next)
            .direction()
            .map_err(|_| TrackError::DegenerateCenterline { index })
    }

    /// Returns, for every centerline point, the tangent rotated 90° clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DegenerateCenterline`] for the first point whose
    /// tangent is undefined.
    pub fn normals(&self) -> Result<Vec<(f64, f64)>, TrackError> {
        (0..self.centerline.len())
            .map(|index| self.tangent(index).map(|(tx, ty)| (ty, -tx)))
            .collect()
    }

    /// Returns the distance from `point` to the closed centerline polyline.
    #[must_use]
    pub fn distance_to_centerline(&self, point: Point) -> f64 {
        let len = self.centerline.len();
        (0..len)
            .map(|index| {
                LineSegment::new(self.centerline[index], self.centerline[(index + 1) % len])
                    .distance_to(point)
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Checks that the goal line and every checkpoint cross the track squarely
    /// and span its full width.
    ///
    /// The goal line is checked first, then checkpoints in order.
    ///
    /// # Errors
    ///
    /// Returns the first violation found:
    /// [`TrackError::NotPerpendicular`], [`TrackError::InsufficientSpan`],
    /// [`TrackError::ZeroLengthSegment`], or
    /// [`TrackError::DegenerateCenterline`].
    pub fn validate_geometry(&self, tolerances: ValidationTolerances) -> Result<(), TrackError> {
        self.check_crossing(
            "Goal line",
            &self.goal_line,
            self.start_finish_index,
            tolerances,
        )?;

        for checkpoint in &self.checkpoints {
            self.check_crossing(
                &checkpoint_label(checkpoint),
                &checkpoint.segment,
                checkpoint.centerline_index,
                tolerances,
            )?;
        }

        debug!(
            "track '{}' geometry valid: goal line and {} checkpoints",
            self.name,
            self.checkpoints.len()
        );
        Ok(())
    }

    fn check_crossing(
        &self,
        label: &str,
        segment: &LineSegment,
        index: usize,
        tolerances: ValidationTolerances,
    ) -> Result<(), TrackError> {
        let (tx, ty) = self.tangent(index)?;
        let (sx, sy) = segment.direction()?;

        let dot = tx * sx + ty * sy;
        if dot.abs() > tolerances.perpendicular {
            return Err(TrackError::NotPerpendicular {
                label: label.to_owned(),
                dot,
            });
        }

        let length = segment.length();
        if length + tolerances.length < self.width {
            return Err(TrackError::InsufficientSpan {
                label: label.to_owned(),
                length,
                width: self.width,
            });
        }

        Ok(())
    }
}

fn checkpoint_label(checkpoint: &Checkpoint) -> String {
    format!("Checkpoint '{}'", checkpoint.label)
}
