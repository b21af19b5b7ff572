//! Single-track vehicle kinematics for Paddock.
//!
//! A [`Controller`] owns the current [`VehicleState`] and advances it from
//! throttle and steering inputs.
//! The transition itself lives in [`VehicleDynamics`], a pure
//! [`Model`](paddock_core::Model) that can be replayed or driven in closed
//! loop through [`Drive`].
//!
//! Each step runs three sub-steps in order:
//!
//! 1. Longitudinal: throttle or brake, then drag and rolling resistance.
//! 2. Lateral: a bicycle-model yaw rate whose steering authority fades with speed.
//! 3. Position: semi-implicit Euler using the *updated* heading and speed.

mod config;
mod controller;
mod drive;
mod dynamics;
mod longitudinal;
mod state;
mod steering;

pub use config::{ConfigError, ControllerConfig};
pub use controller::Controller;
pub use drive::{Drive, Driver};
pub use dynamics::{StepInput, VehicleDynamics};
pub use state::{Command, VehicleState};
