use std::convert::Infallible;

use paddock_core::{Simulation, SnapshotOf};
use uom::si::{f64::Time, time::second};

use crate::{Command, StepInput, VehicleDynamics, VehicleState};

/// A policy that chooses a [`Command`] from the current state.
///
/// Implemented for any `Fn(&VehicleState) -> Command` closure.
pub trait Driver {
    fn command(&self, state: &VehicleState) -> Command;
}

impl<F> Driver for F
where
    F: Fn(&VehicleState) -> Command,
{
    fn command(&self, state: &VehicleState) -> Command {
        self(state)
    }
}

/// Closed-loop driving: a [`Driver`] steering [`VehicleDynamics`] through time.
///
/// Each step feeds the previous output state to the driver and advances the
/// vehicle with the resulting command.
///
/// # Example
///
/// ```
/// use paddock_core::Simulation;
/// use paddock_vehicle::{Command, Drive, VehicleDynamics, VehicleState};
/// use uom::si::{f64::Time, time::second, velocity::meter_per_second};
///
/// let drive = Drive::new(VehicleDynamics::default(), |_: &VehicleState| {
///     Command::new(1.0, 0.0)
/// });
///
/// let start = drive.initial_input(VehicleState::default());
/// let snapshots = drive.step_many(start, 10, Time::new::<second>(0.1)).unwrap();
///
/// assert_eq!(snapshots.len(), 11);
/// assert!(snapshots[10].output.speed.get::<meter_per_second>() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Drive<D> {
    dynamics: VehicleDynamics,
    driver: D,
}

impl<D: Driver> Drive<D> {
    #[must_use]
    pub fn new(dynamics: VehicleDynamics, driver: D) -> Self {
        Self { dynamics, driver }
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns a zero-length step input whose output is `state` itself.
    #[must_use]
    pub fn initial_input(&self, state: VehicleState) -> StepInput {
        StepInput {
            state,
            command: self.driver.command(&state),
            dt: Time::new::<second>(0.0),
        }
    }
}

impl<D: Driver> Simulation for Drive<D> {
    type Model = VehicleDynamics;
    type StepError = Infallible;

    fn model(&self) -> &Self::Model {
        &self.dynamics
    }

    fn advance_time(
        &self,
        snapshot: &SnapshotOf<Self>,
        dt: Time,
    ) -> Result<StepInput, Self::StepError> {
        let state = snapshot.output;

        Ok(StepInput {
            state,
            command: self.driver.command(&state),
            dt,
        })
    }
}
