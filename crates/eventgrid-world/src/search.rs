//! Ranked search results.

use eventgrid_types::Coordinate;
use serde::{Serialize, Serializer};

use crate::event::Event;
use crate::ticket::{Dollars, Ticket};

/// Number of results a search returns unless told otherwise.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// One ranked hit from [`World::search_nearby_events`](crate::World::search_nearby_events).
///
/// Borrows from the world it was produced by; results are computed per
/// query and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult<'a> {
    #[serde(rename = "event_id", serialize_with = "serialize_event_id")]
    event: &'a Event,
    cheapest_ticket: &'a Ticket,
    coordinate: Coordinate,
    distance: u64,
}

impl<'a> SearchResult<'a> {
    pub(crate) const fn new(
        event: &'a Event,
        cheapest_ticket: &'a Ticket,
        coordinate: Coordinate,
        distance: u64,
    ) -> Self {
        Self {
            event,
            cheapest_ticket,
            coordinate,
            distance,
        }
    }

    /// The matched event.
    pub const fn event(&self) -> &'a Event {
        self.event
    }

    /// The event's lowest-priced ticket.
    pub const fn cheapest_ticket(&self) -> &'a Ticket {
        self.cheapest_ticket
    }

    /// Where the event is hosted.
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Manhattan distance from the query centre.
    pub const fn distance(&self) -> u64 {
        self.distance
    }
}

fn serialize_event_id<S: Serializer>(event: &&Event, serializer: S) -> Result<S::Ok, S::Error> {
    event.id().serialize(serializer)
}

impl core::fmt::Display for SearchResult<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} - {}, distance {}",
            self.event,
            Dollars(self.cheapest_ticket.price()),
            self.distance
        )
    }
}
