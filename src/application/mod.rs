//! Application layer: orchestrates domain logic behind the port seams.

pub mod handlers;
