//! Lateral model: speed-dependent steering authority on a bicycle model.

use uom::si::{angle::radian, length::meter};

use crate::ControllerConfig;

/// Returns the fraction of steering lock available at `speed`.
///
/// Decays from 1 at rest toward `min_high_speed_factor`, and never drops
/// below that floor.
pub(crate) fn authority(config: &ControllerConfig, speed: f64) -> f64 {
    let floor = config.min_high_speed_factor;
    let speed_factor = 1.0 / (1.0 + speed.abs() * config.steering_speed_sensitivity);
    let factor = floor + (1.0 - floor) * speed_factor;

    factor.max(floor)
}

/// Returns the effective front wheel angle, in radians.
pub(crate) fn steering_angle(config: &ControllerConfig, speed: f64, steering: f64) -> f64 {
    steering * config.max_steering_angle.get::<radian>() * authority(config, speed)
}

/// Advances `heading` by the bicycle-model yaw over `dt`.
///
/// No yaw occurs when the vehicle is stopped or the wheel is centred.
/// The returned heading is not normalized.
pub(crate) fn integrate_heading(
    config: &ControllerConfig,
    heading: f64,
    speed: f64,
    steering: f64,
    dt: f64,
) -> f64 {
    if speed == 0.0 || steering == 0.0 {
        return heading;
    }

    let angle = steering_angle(config, speed, steering);
    let turning_radius = config.wheelbase.get::<meter>() / angle.tan();
    let yaw_rate = speed / turning_radius;

    heading + yaw_rate * dt
}
