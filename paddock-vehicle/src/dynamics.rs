use std::convert::Infallible;

use log::{trace, warn};
use paddock_core::{Model, angle::wrap_radians};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Time, Velocity},
    time::second,
    velocity::meter_per_second,
};

use crate::{Command, ControllerConfig, VehicleState, longitudinal, steering};

/// The pure single-step vehicle transition.
///
/// `VehicleDynamics` maps a state, a [`Command`], and a time step to the next
/// [`VehicleState`] without holding any state of its own.
/// Use [`Controller`](crate::Controller) when the current state should be
/// tracked between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleDynamics {
    config: ControllerConfig,
}

/// Input to [`VehicleDynamics`] when used as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepInput {
    pub state: VehicleState,
    pub command: Command,
    pub dt: Time,
}

impl VehicleDynamics {
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Advances `state` by `dt` under `command`.
    ///
    /// The step runs in a fixed order:
    ///
    /// 1. Clamp throttle and steering to [−1, 1].
    /// 2. Pick the acceleration from the throttle and the speed *before* this step.
    /// 3. Integrate speed, subtract drag and rolling resistance, cap, and snap near zero.
    /// 4. Integrate heading with the updated speed.
    /// 5. Integrate position with the updated heading and speed.
    /// 6. Wrap the heading into (−π, π].
    ///
    /// A `dt` that is zero, negative, or not finite leaves the state untouched.
    #[must_use]
    pub fn advance(&self, state: &VehicleState, command: Command, dt: Time) -> VehicleState {
        let dt = dt.get::<second>();
        if !(dt.is_finite() && dt > 0.0) {
            if dt == 0.0 {
                trace!("zero time step, state unchanged");
            } else {
                warn!("ignoring non-positive or non-finite time step of {dt} s");
            }
            return *state;
        }

        let Command { throttle, steering } = command.clamped();
        let current_speed = state.speed.get::<meter_per_second>();

        let acceleration = longitudinal::acceleration(&self.config, throttle, current_speed);
        let speed = longitudinal::integrate_speed(&self.config, current_speed, acceleration, dt);

        let heading = steering::integrate_heading(
            &self.config,
            state.heading.get::<radian>(),
            speed,
            steering,
            dt,
        );

        let dx = heading.cos() * speed * dt;
        let dy = heading.sin() * speed * dt;
        let position = state.position.translated(dx, dy);

        let next = VehicleState {
            position,
            heading: Angle::new::<radian>(wrap_radians(heading)),
            speed: Velocity::new::<meter_per_second>(speed),
        };

        trace!(
            "throttle={throttle:.3} steering={steering:.3} dt={dt}s -> \
             x={:.3} y={:.3} heading={:.4} speed={speed:.3}",
            next.position.x,
            next.position.y,
            next.heading.get::<radian>(),
        );

        next
    }
}

impl Model for VehicleDynamics {
    type Input = StepInput;
    type Output = VehicleState;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.advance(&input.state, input.command, input.dt))
    }
}
