//! Shared type definitions for the Eventgrid world.
//!
//! Types defined here are used by both the world crate and the interactive
//! shell, so neither has to depend on the other's internals.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for ticket and event identifiers
//! - [`coordinate`] -- Signed grid coordinates and Manhattan distance

pub mod coordinate;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use coordinate::Coordinate;
pub use ids::{EventId, TicketId};
