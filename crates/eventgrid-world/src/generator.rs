//! Identifier allocation and randomized world population.
//!
//! # Identifiers
//!
//! Tickets and events are numbered by an [`IdAllocator`] owned by the
//! [`Generator`]. There is no process-wide counter: two generators number
//! independently, and a generator driven by a seeded random source always
//! produces the same identifiers in the same cells.
//!
//! # Population
//!
//! Cells are visited in storage order (x outer, y inner). Each cell draws a
//! roll in `[0, 1)`; a roll at or below the event frequency attaches a new
//! event. The event's ticket count is drawn from `[0, max_tickets)` and each
//! price from `[0, max_ticket_price)`, raised to [`MIN_TICKET_PRICE`].

use eventgrid_types::{EventId, TicketId};
use rand::Rng;
use tracing::debug;

use crate::error::WorldError;
use crate::event::Event;
use crate::ticket::{MIN_TICKET_PRICE, Ticket};
use crate::world::{Bounds, World};

/// Default upper bound (exclusive) on tickets per event.
pub const DEFAULT_MAX_TICKETS: u32 = 5;

/// Default upper bound (exclusive) on a drawn ticket price.
pub const DEFAULT_MAX_TICKET_PRICE: f64 = 99.99;

/// Default probability that a cell hosts an event.
pub const DEFAULT_EVENT_FREQUENCY: f64 = 1.0;

/// Hands out monotonically increasing ticket and event identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next_ticket: Option<TicketId>,
    next_event: Option<EventId>,
}

impl IdAllocator {
    /// Create an allocator whose first identifiers are 1.
    pub const fn new() -> Self {
        Self {
            next_ticket: Some(TicketId::FIRST),
            next_event: Some(EventId::FIRST),
        }
    }

    /// Take the next ticket identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdentifiersExhausted`] once `u32::MAX` has been
    /// handed out.
    pub fn next_ticket_id(&mut self) -> Result<TicketId, WorldError> {
        let id = self.next_ticket.ok_or(WorldError::IdentifiersExhausted)?;
        self.next_ticket = id.next();
        Ok(id)
    }

    /// Take the next event identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdentifiersExhausted`] once `u32::MAX` has been
    /// handed out.
    pub fn next_event_id(&mut self) -> Result<EventId, WorldError> {
        let id = self.next_event.ok_or(WorldError::IdentifiersExhausted)?;
        self.next_event = id.next();
        Ok(id)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for random population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    /// Exclusive upper bound on tickets per event. Zero means every event
    /// is generated without tickets.
    pub max_tickets: u32,
    /// Exclusive upper bound on a drawn price, before the minimum clamp.
    pub max_ticket_price: f64,
    /// Probability in `[0, 1]` that a cell hosts an event. Values above 1
    /// behave as 1, values below 0 as 0.
    pub event_frequency: f64,
}

impl GenerationSettings {
    /// Check that the settings can drive a generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSettings`] if the maximum price is not a
    /// positive finite number or the event frequency is not finite.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.max_ticket_price.is_finite() || self.max_ticket_price <= 0.0 {
            return Err(WorldError::InvalidSettings(format!(
                "max ticket price must be a positive number, got {}",
                self.max_ticket_price
            )));
        }
        if !self.event_frequency.is_finite() {
            return Err(WorldError::InvalidSettings(format!(
                "event frequency must be a finite number, got {}",
                self.event_frequency
            )));
        }
        Ok(())
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tickets: DEFAULT_MAX_TICKETS,
            max_ticket_price: DEFAULT_MAX_TICKET_PRICE,
            event_frequency: DEFAULT_EVENT_FREQUENCY,
        }
    }
}

/// Randomized builder of tickets, events, and whole worlds.
#[derive(Debug, Clone)]
pub struct Generator {
    settings: GenerationSettings,
    ids: IdAllocator,
}

impl Generator {
    /// Create a generator with a fresh identifier allocator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSettings`] if the settings fail
    /// [`GenerationSettings::validate`].
    pub fn new(settings: GenerationSettings) -> Result<Self, WorldError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ids: IdAllocator::new(),
        })
    }

    /// The settings this generator draws with.
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// The allocator's current state.
    pub const fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Draw a ticket list.
    ///
    /// With `max_tickets == 0` nothing is drawn and the list is empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdentifiersExhausted`] if ticket identifiers
    /// run out.
    pub fn generate_tickets(&mut self, rng: &mut impl Rng) -> Result<Vec<Ticket>, WorldError> {
        if self.settings.max_tickets == 0 {
            return Ok(Vec::new());
        }
        let count = rng.random_range(0..self.settings.max_tickets);
        let mut tickets = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
        for _ in 0..count {
            let drawn = rng.random::<f64>() * self.settings.max_ticket_price;
            tickets.push(Ticket::new(
                self.ids.next_ticket_id()?,
                drawn.max(MIN_TICKET_PRICE),
            ));
        }
        Ok(tickets)
    }

    /// Draw a ticket list and wrap it in a new event.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IdentifiersExhausted`] if identifiers run out.
    pub fn generate_event(&mut self, rng: &mut impl Rng) -> Result<Event, WorldError> {
        let tickets = self.generate_tickets(rng)?;
        Ok(Event::new(self.ids.next_event_id()?, tickets))
    }

    /// Give every cell of a freshly allocated world its event roll.
    ///
    /// Only [`Generator::generate_world`] calls this, on the world it has
    /// just allocated.
    pub(crate) fn populate(
        &mut self,
        world: &mut World,
        rng: &mut impl Rng,
    ) -> Result<(), WorldError> {
        let frequency = self.settings.event_frequency;
        let mut event_count: u64 = 0;
        let mut ticket_count: u64 = 0;

        for cell in world.cells_mut() {
            let roll = rng.random::<f64>();
            let event = if roll <= frequency {
                let event = self.generate_event(rng)?;
                event_count = event_count.saturating_add(1);
                ticket_count = ticket_count
                    .saturating_add(u64::try_from(event.tickets().len()).unwrap_or(u64::MAX));
                Some(event)
            } else {
                None
            };
            cell.set_event(event);
        }

        debug!(
            width = world.width(),
            height = world.height(),
            events = event_count,
            tickets = ticket_count,
            "world populated"
        );
        Ok(())
    }

    /// Allocate a world over the given bounds and populate it.
    ///
    /// Population happens exactly once, here. A finished world cannot be
    /// handed back to a generator:
    ///
    /// ```compile_fail
    /// use eventgrid_world::{Bounds, GenerationSettings, Generator};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut generator = Generator::new(GenerationSettings::default()).unwrap();
    /// let mut world = generator.generate_world(Bounds::default(), &mut rng).unwrap();
    /// generator.populate(&mut world, &mut rng).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridTooLarge`] if the grid cannot be allocated,
    /// or [`WorldError::IdentifiersExhausted`] if identifiers run out.
    pub fn generate_world(
        &mut self,
        bounds: Bounds,
        rng: &mut impl Rng,
    ) -> Result<World, WorldError> {
        let mut world = World::with_bounds(bounds)?;
        self.populate(&mut world, rng)?;
        Ok(world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn generator(max_tickets: u32, max_ticket_price: f64, event_frequency: f64) -> Generator {
        Generator::new(GenerationSettings {
            max_tickets,
            max_ticket_price,
            event_frequency,
        })
        .unwrap()
    }

    #[test]
    fn allocator_is_monotonic_from_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_ticket_id().unwrap(), TicketId::new(1));
        assert_eq!(ids.next_ticket_id().unwrap(), TicketId::new(2));
        assert_eq!(ids.next_event_id().unwrap(), EventId::new(1));
        assert_eq!(ids.next_ticket_id().unwrap(), TicketId::new(3));
    }

    #[test]
    fn allocator_reports_exhaustion() {
        let mut ids = IdAllocator {
            next_ticket: Some(TicketId::new(u32::MAX)),
            next_event: Some(EventId::new(u32::MAX)),
        };
        assert_eq!(ids.next_ticket_id().unwrap(), TicketId::new(u32::MAX));
        assert_eq!(ids.next_ticket_id(), Err(WorldError::IdentifiersExhausted));
        assert_eq!(ids.next_event_id().unwrap(), EventId::new(u32::MAX));
        assert_eq!(ids.next_event_id(), Err(WorldError::IdentifiersExhausted));
    }

    #[test]
    fn zero_max_tickets_yields_no_tickets() {
        let mut generator = generator(0, 99.99, 1.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(generator.generate_tickets(&mut rng).unwrap().is_empty());
        }
    }

    #[test]
    fn ticket_count_and_prices_stay_in_range() {
        let mut generator = generator(5, 99.99, 1.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let tickets = generator.generate_tickets(&mut rng).unwrap();
            assert!(tickets.len() < 5);
            for ticket in &tickets {
                assert!(ticket.price() >= MIN_TICKET_PRICE);
                assert!(ticket.price() < 99.99);
            }
        }
    }

    #[test]
    fn low_max_price_clamps_to_minimum() {
        let mut generator = generator(4, 0.5, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            for ticket in generator.generate_tickets(&mut rng).unwrap() {
                assert!((ticket.price() - MIN_TICKET_PRICE).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn ticket_ids_are_unique_and_increasing() {
        let mut generator = generator(5, 50.0, 1.0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut last = 0_u32;
        for _ in 0..50 {
            for ticket in generator.generate_tickets(&mut rng).unwrap() {
                assert!(ticket.id().get() > last);
                last = ticket.id().get();
            }
        }
        assert!(last > 0);

        // The allocator resumes right after the last ticket handed out.
        let mut ids = generator.ids().clone();
        assert_eq!(Some(ids.next_ticket_id().unwrap()), TicketId::new(last).next());
        assert_eq!(ids.next_event_id().unwrap(), EventId::FIRST);
    }

    #[test]
    fn generator_keeps_the_settings_it_was_given() {
        let generator = generator(3, 12.5, 0.25);
        assert_eq!(generator.settings().max_tickets, 3);
        assert!((generator.settings().max_ticket_price - 12.5).abs() < f64::EPSILON);
        assert!((generator.settings().event_frequency - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn later_generation_leaves_finished_worlds_alone() {
        let mut generator = generator(5, 99.99, 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(0, 0, 1, 1).unwrap();
        let first = generator.generate_world(bounds, &mut rng).unwrap();
        let snapshot = first.clone();

        let second = generator.generate_world(bounds, &mut rng).unwrap();
        assert!(first.cells().eq(snapshot.cells()));

        let first_ids: Vec<u32> = first
            .cells()
            .filter_map(|cell| cell.event().map(|e| e.id().get()))
            .collect();
        let second_ids: Vec<u32> = second
            .cells()
            .filter_map(|cell| cell.event().map(|e| e.id().get()))
            .collect();
        assert_eq!(first_ids, vec![1, 2, 3, 4]);
        assert_eq!(second_ids, vec![5, 6, 7, 8]);
    }

    #[test]
    fn full_frequency_gives_every_cell_an_event() {
        let mut generator = generator(5, 99.99, 1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let world = generator
            .generate_world(Bounds::new(-3, -3, 3, 3).unwrap(), &mut rng)
            .unwrap();
        assert!(world.cells().all(|cell| cell.event().is_some()));
    }

    #[test]
    fn negative_frequency_gives_no_events() {
        let mut generator = generator(5, 99.99, -1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let world = generator
            .generate_world(Bounds::new(-3, -3, 3, 3).unwrap(), &mut rng)
            .unwrap();
        assert!(world.cells().all(|cell| cell.event().is_none()));
    }

    #[test]
    fn event_ids_follow_storage_order() {
        let mut generator = generator(2, 10.0, 1.0);
        let mut rng = StdRng::seed_from_u64(11);
        let world = generator
            .generate_world(Bounds::new(0, 0, 2, 2).unwrap(), &mut rng)
            .unwrap();
        let ids: Vec<u32> = world
            .cells()
            .filter_map(|cell| cell.event().map(|e| e.id().get()))
            .collect();
        assert_eq!(ids, (1..=9).collect::<Vec<u32>>());
    }

    #[test]
    fn same_seed_same_world() {
        let bounds = Bounds::new(-4, -4, 4, 4).unwrap();
        let a = generator(5, 99.99, 0.6)
            .generate_world(bounds, &mut StdRng::seed_from_u64(2024))
            .unwrap();
        let b = generator(5, 99.99, 0.6)
            .generate_world(bounds, &mut StdRng::seed_from_u64(2024))
            .unwrap();
        assert!(a.cells().eq(b.cells()));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        for settings in [
            GenerationSettings {
                max_ticket_price: 0.0,
                ..GenerationSettings::default()
            },
            GenerationSettings {
                max_ticket_price: f64::INFINITY,
                ..GenerationSettings::default()
            },
            GenerationSettings {
                event_frequency: f64::NAN,
                ..GenerationSettings::default()
            },
        ] {
            assert!(matches!(
                Generator::new(settings),
                Err(WorldError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn default_settings_match_documented_values() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.max_tickets, 5);
        assert!((settings.max_ticket_price - 99.99).abs() < f64::EPSILON);
        assert!((settings.event_frequency - 1.0).abs() < f64::EPSILON);
    }
}
