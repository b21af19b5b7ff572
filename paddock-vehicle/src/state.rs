use paddock_core::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Velocity},
    velocity::meter_per_second,
};

/// Kinematic state of the vehicle.
///
/// `heading` is measured from the +X axis, positive counter-clockwise, and is
/// kept in (−π, π] by every step.
/// `speed` is signed: positive is forward, negative is reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleState {
    pub position: Point,
    pub heading: Angle,
    pub speed: Velocity,
}

impl VehicleState {
    /// Creates a state from its parts.
    #[must_use]
    pub fn new(position: Point, heading: Angle, speed: Velocity) -> Self {
        Self {
            position,
            heading,
            speed,
        }
    }

    /// Creates a stationary state at `position` facing `heading`.
    #[must_use]
    pub fn at_rest(position: Point, heading: Angle) -> Self {
        Self::new(position, heading, Velocity::new::<meter_per_second>(0.0))
    }

    /// Returns `self` with the given speed, keeping other fields unchanged.
    #[must_use]
    pub fn with_speed(self, speed: Velocity) -> Self {
        Self { speed, ..self }
    }

    /// Returns `self` with the given heading, keeping other fields unchanged.
    #[must_use]
    pub fn with_heading(self, heading: Angle) -> Self {
        Self { heading, ..self }
    }

    /// Returns `true` if the vehicle is exactly stationary.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.speed.get::<meter_per_second>() == 0.0
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at_rest(Point::ORIGIN, Angle::new::<radian>(0.0))
    }
}

/// Driver input for a single step.
///
/// Both fields are nominally in [−1, 1].
/// Out-of-range values are clamped when the step runs, never rejected.
/// A NaN input counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Positive drives forward, negative brakes or reverses.
    pub throttle: f64,
    /// Positive turns counter-clockwise when moving forward.
    pub steering: f64,
}

impl Command {
    /// No throttle and no steering.
    pub const COAST: Self = Self {
        throttle: 0.0,
        steering: 0.0,
    };

    #[must_use]
    pub const fn new(throttle: f64, steering: f64) -> Self {
        Self { throttle, steering }
    }

    /// Returns the command with both inputs clamped to [−1, 1].
    ///
    /// NaN inputs become zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            throttle: unit_interval(self.throttle),
            steering: unit_interval(self.steering),
        }
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_at_origin_and_stopped() {
        let state = VehicleState::default();
        assert_eq!(state.position, Point::ORIGIN);
        assert_eq!(state.heading.get::<radian>(), 0.0);
        assert!(state.is_stopped());
    }

    #[test]
    fn clamps_out_of_range_inputs() {
        assert_eq!(Command::new(3.0, -7.5).clamped(), Command::new(1.0, -1.0));
        assert_eq!(Command::new(-0.4, 0.9).clamped(), Command::new(-0.4, 0.9));
        assert_eq!(
            Command::new(f64::INFINITY, f64::NEG_INFINITY).clamped(),
            Command::new(1.0, -1.0)
        );
    }

    #[test]
    fn nan_inputs_clamp_to_zero() {
        assert_eq!(Command::new(f64::NAN, f64::NAN).clamped(), Command::COAST);
        assert_eq!(Command::new(f64::NAN, 0.5).clamped(), Command::new(0.0, 0.5));
        assert_eq!(Command::new(-0.5, f64::NAN).clamped(), Command::new(-0.5, 0.0));
    }
}
