//! Test support shared by the backend's integration tests and the simulator:
//! one-time logging setup and unique player names.

pub mod logging;
pub mod unique_helpers;
