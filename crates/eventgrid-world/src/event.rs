//! Events and their cheapest-ticket lookup.

use eventgrid_types::EventId;
use serde::Serialize;

use crate::error::WorldError;
use crate::ticket::Ticket;

/// A sellable occasion hosted at a cell.
///
/// Owns its tickets in insertion order. The ticket list is fixed at
/// construction and may be empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    id: EventId,
    tickets: Vec<Ticket>,
}

impl Event {
    /// Create an event owning the given tickets.
    pub const fn new(id: EventId, tickets: Vec<Ticket>) -> Self {
        Self { id, tickets }
    }

    /// The event's identifier.
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// The event's tickets in insertion order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Whether at least one ticket exists.
    pub fn has_tickets_available(&self) -> bool {
        !self.tickets.is_empty()
    }

    /// Return the lowest-priced ticket.
    ///
    /// Ties go to the ticket inserted first.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoTicketsAvailable`] if the event has no
    /// tickets. Check [`has_tickets_available`](Self::has_tickets_available)
    /// first.
    pub fn cheapest_ticket(&self) -> Result<&Ticket, WorldError> {
        // min_by keeps the first of several equal minima.
        self.tickets
            .iter()
            .min_by(|a, b| a.price().total_cmp(&b.price()))
            .ok_or(WorldError::NoTicketsAvailable(self.id))
    }

    /// Multi-line listing used when inspecting a cell.
    pub(crate) fn write_listing(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "\t{self}")?;
        if self.tickets.is_empty() {
            writeln!(f, "\t\tNo tickets available")?;
        }
        for ticket in &self.tickets {
            writeln!(f, "\t\t{ticket}")?;
        }
        Ok(())
    }
}

impl core::fmt::Display for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Event {:03}", self.id.get())
    }
}
