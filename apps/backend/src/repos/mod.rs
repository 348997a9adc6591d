//! Store operations for the domain layer.

pub mod rooms;
