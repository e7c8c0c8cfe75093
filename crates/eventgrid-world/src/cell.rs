//! Grid cells.
//!
//! A [`Cell`] is one coordinate's storage slot in the world. It may host a
//! single [`Event`]. Cells are created when the world is allocated and
//! receive their event during population; afterwards they are read-only.

use eventgrid_types::Coordinate;
use serde::Serialize;

use crate::event::Event;

/// One coordinate of the world grid, optionally hosting an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    #[serde(flatten)]
    coordinate: Coordinate,
    event: Option<Event>,
}

impl Cell {
    /// Create a cell. Coordinates are not validated here; the owning world
    /// only creates cells inside its bounds.
    pub const fn new(x: i32, y: i32, event: Option<Event>) -> Self {
        Self {
            coordinate: Coordinate::new(x, y),
            event,
        }
    }

    /// The cell's position.
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Horizontal position.
    pub const fn x(&self) -> i32 {
        self.coordinate.x
    }

    /// Vertical position.
    pub const fn y(&self) -> i32 {
        self.coordinate.y
    }

    /// The hosted event, if any.
    pub const fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// The hosted event if it has at least one ticket.
    pub fn available_event(&self) -> Option<&Event> {
        self.event.as_ref().filter(|event| event.has_tickets_available())
    }

    /// Manhattan distance to another cell.
    pub fn distance_to(&self, other: &Self) -> u64 {
        self.coordinate.manhattan_distance(other.coordinate)
    }

    /// Replace the hosted event. Only the world calls this, while it is
    /// being built.
    pub(crate) fn set_event(&mut self, event: Option<Event>) {
        self.event = event;
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Cell {}", self.coordinate)?;
        match &self.event {
            Some(event) => event.write_listing(f),
            None => writeln!(f, "\tNo event"),
        }
    }
}
