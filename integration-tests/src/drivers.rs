use paddock_core::{Point, angle::wrap_radians};
use paddock_track::Track;
use paddock_vehicle::{Command, Driver, VehicleState};
use uom::si::{angle::radian, velocity::meter_per_second};

/// A pure-pursuit driver that chases the centerline point after the nearest one.
///
/// Throttle holds a target cruising speed; steering is proportional to the
/// heading error toward the chase point.
#[derive(Debug, Clone)]
pub struct PurePursuit {
    centerline: Vec<Point>,
    lookahead: usize,
    cruise_speed: f64,
    steering_gain: f64,
}

impl PurePursuit {
    #[must_use]
    pub fn new(track: &Track, cruise_speed: f64) -> Self {
        Self {
            centerline: track.centerline().to_vec(),
            lookahead: 1,
            cruise_speed,
            steering_gain: 1.0,
        }
    }

    /// Returns the index of the centerline point closest to `position`.
    #[must_use]
    pub fn nearest_index(&self, position: Point) -> usize {
        self.centerline
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                position
                    .distance_to(**a)
                    .total_cmp(&position.distance_to(**b))
            })
            .map_or(0, |(index, _)| index)
    }
}

impl Driver for PurePursuit {
    fn command(&self, state: &VehicleState) -> Command {
        let nearest = self.nearest_index(state.position);
        let target = self.centerline[(nearest + self.lookahead) % self.centerline.len()];

        let desired = (target.y - state.position.y).atan2(target.x - state.position.x);
        let error = wrap_radians(desired - state.heading.get::<radian>());

        let speed = state.speed.get::<meter_per_second>();
        let throttle = if speed < self.cruise_speed { 0.6 } else { 0.0 };

        Command::new(throttle, self.steering_gain * error)
    }
}
