//! Session layer of the simulator.
//!
//! A [`SessionController`] owns one experiment: the optics, the microscope
//! carriage and the measurement log. Input sources push [`SessionCommand`]s
//! into it; renderers implement [`SnapshotPresenterPort`] and consume
//! [`SessionSnapshot`]s.

pub mod command;
mod controller;
pub mod errors;
pub mod motion_controller;
pub mod ports;
pub mod snapshot;

pub use command::{CommandOutcome, SessionCommand, ViewMode};
pub use controller::{SessionConfig, SessionController};
pub use errors::SessionError;
pub use motion_controller::{MotionController, TickResult};
pub use ports::SnapshotPresenterPort;
pub use snapshot::SessionSnapshot;
