#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::{degree, radian},
    f64::{Acceleration, Angle, Length, Velocity},
    length::meter,
    velocity::meter_per_second,
};

/// Physical constants of a vehicle.
///
/// Values are fixed for the lifetime of a [`Controller`](crate::Controller).
/// Quantities with a natural unit are stored as [`uom`] types.
/// The remaining coefficients are plain SI scalars, documented per field.
///
/// With the `serde` feature, quantities (de)serialize as base-SI numbers
/// (m, m/s, m/s², rad) and missing fields take their default value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Distance between the front and rear axles.
    pub wheelbase: Length,
    /// Forward speed cap.
    pub max_speed: Velocity,
    /// Reverse speed cap, as a magnitude.
    pub max_reverse_speed: Velocity,
    /// Acceleration at full throttle, forward or reverse.
    pub max_acceleration: Acceleration,
    /// Deceleration at full brake while still rolling forward.
    pub max_brake: Acceleration,
    /// Quadratic drag coefficient, in 1/m.
    pub drag_coefficient: f64,
    /// Constant deceleration opposing motion.
    pub rolling_resistance: Acceleration,
    /// Front wheel angle at full steering lock, at rest.
    pub max_steering_angle: Angle,
    /// Fraction of steering lock that survives at very high speed.
    pub min_high_speed_factor: f64,
    /// How quickly steering authority fades with speed, in s/m.
    pub steering_speed_sensitivity: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            wheelbase: Length::new::<meter>(2.85),
            max_speed: Velocity::new::<meter_per_second>(90.0),
            max_reverse_speed: Velocity::new::<meter_per_second>(35.0),
            max_acceleration: Acceleration::new::<meter_per_second_squared>(8.0),
            max_brake: Acceleration::new::<meter_per_second_squared>(12.0),
            drag_coefficient: 0.015,
            rolling_resistance: Acceleration::new::<meter_per_second_squared>(0.35),
            max_steering_angle: Angle::new::<degree>(28.0),
            min_high_speed_factor: 0.32,
            steering_speed_sensitivity: 0.035,
        }
    }
}

/// Error returned by [`ControllerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`min_high_speed_factor` must not exceed 1, got {0}")]
    FactorAboveOne(f64),

    #[error("`wheelbase` must be positive, got {0}")]
    NonPositiveWheelbase(f64),
}

impl ControllerConfig {
    /// Checks that every constant is finite and non-negative, that the
    /// wheelbase is positive, and that `min_high_speed_factor` is a fraction.
    ///
    /// [`Controller::new`](crate::Controller::new) does not call this;
    /// use it when loading constants from an untrusted source.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in field declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("wheelbase", self.wheelbase.get::<meter>()),
            ("max_speed", self.max_speed.get::<meter_per_second>()),
            (
                "max_reverse_speed",
                self.max_reverse_speed.get::<meter_per_second>(),
            ),
            (
                "max_acceleration",
                self.max_acceleration.get::<meter_per_second_squared>(),
            ),
            ("max_brake", self.max_brake.get::<meter_per_second_squared>()),
            ("drag_coefficient", self.drag_coefficient),
            (
                "rolling_resistance",
                self.rolling_resistance.get::<meter_per_second_squared>(),
            ),
            ("max_steering_angle", self.max_steering_angle.get::<radian>()),
            ("min_high_speed_factor", self.min_high_speed_factor),
            (
                "steering_speed_sensitivity",
                self.steering_speed_sensitivity,
            ),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let wheelbase = self.wheelbase.get::<meter>();
        if wheelbase <= 0.0 {
            return Err(ConfigError::NonPositiveWheelbase(wheelbase));
        }

        if self.min_high_speed_factor > 1.0 {
            return Err(ConfigError::FactorAboveOne(self.min_high_speed_factor));
        }

        Ok(())
    }

    /// Returns `self` with the given wheelbase, keeping other fields unchanged.
    #[must_use]
    pub fn with_wheelbase(self, wheelbase: Length) -> Self {
        Self { wheelbase, ..self }
    }

    /// Returns `self` with the given forward speed cap, keeping other fields unchanged.
    #[must_use]
    pub fn with_max_speed(self, max_speed: Velocity) -> Self {
        Self { max_speed, ..self }
    }

    /// Returns `self` with the given reverse speed cap, keeping other fields unchanged.
    #[must_use]
    pub fn with_max_reverse_speed(self, max_reverse_speed: Velocity) -> Self {
        Self {
            max_reverse_speed,
            ..self
        }
    }

    /// Returns `self` with the given throttle acceleration, keeping other fields unchanged.
    #[must_use]
    pub fn with_max_acceleration(self, max_acceleration: Acceleration) -> Self {
        Self {
            max_acceleration,
            ..self
        }
    }

    /// Returns `self` with the given brake deceleration, keeping other fields unchanged.
    #[must_use]
    pub fn with_max_brake(self, max_brake: Acceleration) -> Self {
        Self { max_brake, ..self }
    }

    /// Returns `self` with the given drag coefficient (1/m), keeping other fields unchanged.
    #[must_use]
    pub fn with_drag_coefficient(self, drag_coefficient: f64) -> Self {
        Self {
            drag_coefficient,
            ..self
        }
    }

    /// Returns `self` with the given rolling resistance, keeping other fields unchanged.
    #[must_use]
    pub fn with_rolling_resistance(self, rolling_resistance: Acceleration) -> Self {
        Self {
            rolling_resistance,
            ..self
        }
    }

    /// Returns `self` with the given steering lock, keeping other fields unchanged.
    #[must_use]
    pub fn with_max_steering_angle(self, max_steering_angle: Angle) -> Self {
        Self {
            max_steering_angle,
            ..self
        }
    }

    /// Returns `self` with the given high-speed steering floor, keeping other fields unchanged.
    #[must_use]
    pub fn with_min_high_speed_factor(self, min_high_speed_factor: f64) -> Self {
        Self {
            min_high_speed_factor,
            ..self
        }
    }

    /// Returns `self` with the given steering sensitivity (s/m), keeping other fields unchanged.
    #[must_use]
    pub fn with_steering_speed_sensitivity(self, steering_speed_sensitivity: f64) -> Self {
        Self {
            steering_speed_sensitivity,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_reference_vehicle() {
        let config = ControllerConfig::default();

        assert_relative_eq!(config.wheelbase.get::<meter>(), 2.85);
        assert_relative_eq!(config.max_speed.get::<meter_per_second>(), 90.0);
        assert_relative_eq!(config.max_reverse_speed.get::<meter_per_second>(), 35.0);
        assert_relative_eq!(
            config.max_acceleration.get::<meter_per_second_squared>(),
            8.0
        );
        assert_relative_eq!(config.max_brake.get::<meter_per_second_squared>(), 12.0);
        assert_relative_eq!(config.drag_coefficient, 0.015);
        assert_relative_eq!(
            config.rolling_resistance.get::<meter_per_second_squared>(),
            0.35
        );
        assert_relative_eq!(
            config.max_steering_angle.get::<radian>(),
            28.0_f64.to_radians(),
            epsilon = 1e-15
        );
        assert_relative_eq!(config.min_high_speed_factor, 0.32);
        assert_relative_eq!(config.steering_speed_sensitivity, 0.035);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_field_is_rejected() {
        let config = ControllerConfig::default().with_max_brake(
            Acceleration::new::<meter_per_second_squared>(-1.0),
        );

        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "max_brake",
                value: -1.0,
            })
        );
    }

    #[test]
    fn non_finite_field_is_rejected() {
        let config = ControllerConfig::default().with_drag_coefficient(f64::INFINITY);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "drag_coefficient",
                ..
            })
        ));
    }

    #[test]
    fn factor_above_one_is_rejected() {
        let config = ControllerConfig::default().with_min_high_speed_factor(1.5);
        assert_eq!(config.validate(), Err(ConfigError::FactorAboveOne(1.5)));
    }

    #[test]
    fn zero_wheelbase_is_rejected() {
        let config = ControllerConfig::default().with_wheelbase(Length::new::<meter>(0.0));
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveWheelbase(0.0)));

        let config = ControllerConfig::default().with_wheelbase(Length::new::<meter>(-2.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "wheelbase",
                value: -2.0,
            })
        );
    }

    #[test]
    fn builders_only_touch_their_field() {
        let base = ControllerConfig::default();
        let config = base.with_max_speed(Velocity::new::<meter_per_second>(40.0));

        assert_relative_eq!(config.max_speed.get::<meter_per_second>(), 40.0);
        assert_eq!(config.with_max_speed(base.max_speed), base);
    }
}
