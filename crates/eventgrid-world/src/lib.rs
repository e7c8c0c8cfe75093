//! Grid world, events, tickets, and nearest-event search for Eventgrid.
//!
//! The world is a dense rectangle of cells over a signed integer coordinate
//! range. Some cells host an event that sells zero or more tickets. Given a
//! query coordinate, the world ranks the cells holding events with tickets
//! by Manhattan distance and reports the cheapest ticket of each.
//!
//! The whole model is built once and read many times: a [`World`] is
//! constructed, populated by the [`generator`], and never mutated again.
//!
//! # Modules
//!
//! - [`cell`] -- One grid slot, optionally owning an event.
//! - [`error`] -- Error types for world construction and lookup.
//! - [`event`] -- Events and their cheapest-ticket lookup.
//! - [`generator`] -- Identifier allocation and randomized population.
//! - [`search`] -- Ranked search results.
//! - [`ticket`] -- Priced tickets.
//! - [`world`] -- The grid itself: bounds, lookup, and search.

pub mod cell;
pub mod error;
pub mod event;
pub mod generator;
pub mod search;
pub mod ticket;
pub mod world;

// Re-export primary types at crate root.
pub use cell::Cell;
pub use error::{Axis, WorldError};
pub use event::Event;
pub use generator::{GenerationSettings, Generator, IdAllocator};
pub use search::{DEFAULT_RESULT_LIMIT, SearchResult};
pub use ticket::Ticket;
pub use world::{Bounds, World};
