//! Longitudinal model: throttle, brake, drag, and rolling resistance.
//!
//! All values are SI scalars (m/s, m/s², s).

use uom::si::{acceleration::meter_per_second_squared, velocity::meter_per_second};

use crate::ControllerConfig;

/// Speeds below this magnitude snap to exactly zero.
pub(crate) const REST_THRESHOLD: f64 = 1e-3;

/// Returns the signed acceleration requested by `throttle`.
///
/// Negative throttle brakes at `max_brake` while the vehicle still rolls
/// forward, judged on `speed` *before* this step's update.
/// Once stopped or reversing it accelerates backward at `max_acceleration`.
pub(crate) fn acceleration(config: &ControllerConfig, throttle: f64, speed: f64) -> f64 {
    let max_acceleration = config.max_acceleration.get::<meter_per_second_squared>();

    if throttle >= 0.0 {
        return throttle * max_acceleration;
    }

    if speed > 0.0 {
        return throttle * config.max_brake.get::<meter_per_second_squared>();
    }

    throttle * max_acceleration
}

/// Integrates speed over `dt` and applies resistance, caps, and snap-to-zero.
pub(crate) fn integrate_speed(
    config: &ControllerConfig,
    speed: f64,
    acceleration: f64,
    dt: f64,
) -> f64 {
    let mut speed = speed + acceleration * dt;

    let drag = config.drag_coefficient * speed * speed.abs();
    let rolling = if speed == 0.0 {
        0.0
    } else {
        config.rolling_resistance.get::<meter_per_second_squared>() * speed.signum()
    };
    speed -= (drag + rolling) * dt;

    speed = if speed > 0.0 {
        speed.min(config.max_speed.get::<meter_per_second>())
    } else {
        speed.max(-config.max_reverse_speed.get::<meter_per_second>())
    };

    if speed.abs() < REST_THRESHOLD {
        speed = 0.0;
    }

    speed
}
