//! Priced tickets.

use eventgrid_types::TicketId;
use serde::Serialize;

/// Lowest price the generator will assign to a ticket.
pub const MIN_TICKET_PRICE: f64 = 1.0;

/// A priced, purchasable unit belonging to an event.
///
/// Immutable after creation. Tickets are never consumed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    id: TicketId,
    price: f64,
}

impl Ticket {
    /// Create a ticket.
    ///
    /// The identifier comes from an [`IdAllocator`](crate::IdAllocator);
    /// keeping prices at or above [`MIN_TICKET_PRICE`] is the caller's job.
    pub const fn new(id: TicketId, price: f64) -> Self {
        Self { id, price }
    }

    /// The ticket's identifier.
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// The ticket's price in dollars.
    pub const fn price(&self) -> f64 {
        self.price
    }
}

impl core::fmt::Display for Ticket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ticket {:06} - {}", self.id.get(), Dollars(self.price))
    }
}

/// Dollar rendering shared by tickets and search results.
///
/// The integer part is zero-padded to two digits: `$05.50`, `$42.00`.
pub(crate) struct Dollars(pub(crate) f64);

impl core::fmt::Display for Dollars {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:05.2}", self.0)
    }
}
