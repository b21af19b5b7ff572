use log::debug;
use paddock_core::Point;
use uom::si::{angle::radian, f64::{Angle, Time}};

use crate::{Command, ControllerConfig, VehicleDynamics, VehicleState};

/// A vehicle controller with stable steering at all speeds.
///
/// The controller owns the current [`VehicleState`] and advances it with
/// [`step`](Controller::step).
/// Each step returns a copy of the new state, so callers can keep it without
/// aliasing the controller.
///
/// # Example
///
/// ```
/// use paddock_vehicle::Controller;
/// use uom::si::{f64::Time, time::second, velocity::meter_per_second};
///
/// let mut controller = Controller::default();
/// let state = controller.step(1.0, 0.0, Time::new::<second>(0.5));
///
/// assert!(state.speed.get::<meter_per_second>() > 0.0);
/// assert_eq!(controller.current_state(), state);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Controller {
    dynamics: VehicleDynamics,
    state: VehicleState,
}

impl Controller {
    /// Creates a controller at the origin, facing +X, stopped.
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            dynamics: VehicleDynamics::new(config),
            state: VehicleState::default(),
        }
    }

    /// Places the vehicle at `position` facing `heading`, stopped.
    ///
    /// The heading is stored exactly as given.
    pub fn reset(&mut self, position: impl Into<Point>, heading: Angle) {
        self.state = VehicleState::at_rest(position.into(), heading);
        debug!(
            "reset to ({}, {}) heading {} rad",
            self.state.position.x,
            self.state.position.y,
            heading.get::<radian>()
        );
    }

    /// Replaces the current state, including speed.
    pub fn set_state(&mut self, state: VehicleState) {
        self.state = state;
    }

    /// Advances the simulation by `dt` and returns the new state.
    ///
    /// `throttle` and `steering` are clamped to [−1, 1].
    /// See [`VehicleDynamics::advance`] for the full step order.
    pub fn step(&mut self, throttle: f64, steering: f64, dt: Time) -> VehicleState {
        self.state = self
            .dynamics
            .advance(&self.state, Command::new(throttle, steering), dt);
        self.state
    }

    #[must_use]
    pub fn current_state(&self) -> VehicleState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        self.dynamics.config()
    }

    #[must_use]
    pub fn dynamics(&self) -> &VehicleDynamics {
        &self.dynamics
    }
}
