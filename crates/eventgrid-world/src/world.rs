//! The world grid: bounds, coordinate lookup, and nearest-event search.
//!
//! The [`World`] owns a dense, gap-free buffer with exactly one [`Cell`]
//! per coordinate inside its [`Bounds`]. Coordinates may be negative;
//! storage offsets them by the minimum bound so indices start at zero:
//!
//! ```text
//! index = (x - min_x) * height + (y - min_y)
//! ```
//!
//! The buffer is laid out x-major (x outer, y inner). Iteration follows the
//! same order, and the search relies on it as the tie-break between cells
//! at equal distance.

use eventgrid_types::Coordinate;
use tracing::debug;

use crate::cell::Cell;
use crate::error::{Axis, WorldError};
use crate::event::Event;
use crate::generator::{GenerationSettings, Generator};
use crate::search::SearchResult;

/// Inclusive coordinate range of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    /// Validate and create a bounds rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if `min_x > max_x` or
    /// `min_y > max_y`.
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self, WorldError> {
        if min_x > max_x {
            return Err(WorldError::InvalidBounds {
                axis: Axis::X,
                min: min_x,
                max: max_x,
            });
        }
        if min_y > max_y {
            return Err(WorldError::InvalidBounds {
                axis: Axis::Y,
                min: min_y,
                max: max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Smallest valid x.
    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Smallest valid y.
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Largest valid x.
    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Largest valid y.
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Number of columns, counting both boundary values.
    pub fn width(&self) -> u64 {
        u64::from(self.max_x.abs_diff(self.min_x)).saturating_add(1)
    }

    /// Number of rows, counting both boundary values.
    pub fn height(&self) -> u64 {
        u64::from(self.max_y.abs_diff(self.min_y)).saturating_add(1)
    }

    /// Whether a coordinate lies inside the rectangle.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    const fn out_of_bounds(&self, x: i32, y: i32) -> WorldError {
        WorldError::OutOfBounds {
            x,
            y,
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }

    fn too_large(&self) -> WorldError {
        WorldError::GridTooLarge {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl Default for Bounds {
    /// The 21 x 21 world centred on the origin.
    fn default() -> Self {
        Self {
            min_x: -10,
            min_y: -10,
            max_x: 10,
            max_y: 10,
        }
    }
}

/// The bounded grid holding every cell.
///
/// Built once, either by a [`Generator`] or from a fixed event list with
/// [`World::from_events`], then read-only.
#[derive(Debug, Clone)]
pub struct World {
    bounds: Bounds,
    /// Cells per column, i.e. the stride between consecutive x values.
    rows: usize,
    /// Dense x-major cell buffer.
    cells: Vec<Cell>,
}

impl World {
    /// Allocate a world over the given bounds with no events.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if a minimum exceeds its
    /// maximum, or [`WorldError::GridTooLarge`] if the cell count cannot be
    /// allocated.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self, WorldError> {
        Self::with_bounds(Bounds::new(min_x, min_y, max_x, max_y)?)
    }

    /// Allocate a world over already-validated bounds with no events.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridTooLarge`] if the cell count cannot be
    /// allocated.
    pub fn with_bounds(bounds: Bounds) -> Result<Self, WorldError> {
        let columns = usize::try_from(bounds.width()).map_err(|_e| bounds.too_large())?;
        let rows = usize::try_from(bounds.height()).map_err(|_e| bounds.too_large())?;
        let count = columns.checked_mul(rows).ok_or_else(|| bounds.too_large())?;

        let mut cells = Vec::new();
        if cells.try_reserve_exact(count).is_err() {
            return Err(bounds.too_large());
        }
        for x in bounds.min_x..=bounds.max_x {
            for y in bounds.min_y..=bounds.max_y {
                cells.push(Cell::new(x, y, None));
            }
        }

        Ok(Self {
            bounds,
            rows,
            cells,
        })
    }

    /// Build and randomly populate a world with default generation settings
    /// and a fresh, unseeded random source.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridTooLarge`] if the grid cannot be allocated,
    /// or [`WorldError::IdentifiersExhausted`] if the world needs more than
    /// `u32::MAX` tickets or events.
    pub fn generate(bounds: Bounds) -> Result<Self, WorldError> {
        let mut rng = rand::rng();
        Generator::new(GenerationSettings::default())?.generate_world(bounds, &mut rng)
    }

    /// The world's coordinate range.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of columns.
    pub fn width(&self) -> u64 {
        self.bounds.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u64 {
        self.bounds.height()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over every cell in storage order (x-major).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Map a world coordinate onto its storage index.
    fn index_of(&self, x: i32, y: i32) -> Result<usize, WorldError> {
        if !self.bounds.contains(x, y) {
            return Err(self.bounds.out_of_bounds(x, y));
        }
        // Both differences are non-negative here, so abs_diff is the offset.
        let column = usize::try_from(x.abs_diff(self.bounds.min_x))
            .map_err(|_e| self.bounds.too_large())?;
        let row = usize::try_from(y.abs_diff(self.bounds.min_y))
            .map_err(|_e| self.bounds.too_large())?;
        column
            .checked_mul(self.rows)
            .and_then(|offset| offset.checked_add(row))
            .ok_or_else(|| self.bounds.too_large())
    }

    /// Return the cell at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the coordinate lies outside
    /// the world.
    pub fn locate_cell(&self, x: i32, y: i32) -> Result<&Cell, WorldError> {
        let index = self.index_of(x, y)?;
        self.cells
            .get(index)
            .ok_or_else(|| self.bounds.out_of_bounds(x, y))
    }

    /// Build a world over the given bounds with events placed at fixed
    /// coordinates. Cells not named keep no event; a coordinate named twice
    /// holds the later event.
    ///
    /// This and [`Generator::generate_world`] are the only ways to put
    /// events into a world. Once returned, a world offers no way to change
    /// its cells:
    ///
    /// ```compile_fail
    /// use eventgrid_types::{EventId, TicketId};
    /// use eventgrid_world::{Event, Ticket, World};
    ///
    /// let mut world = World::new(-1, -1, 1, 1).unwrap();
    /// let event = Event::new(EventId::new(1), vec![Ticket::new(TicketId::new(1), 2.0)]);
    /// world.place_event(0, 0, event).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::GridTooLarge`] if the grid cannot be allocated,
    /// or [`WorldError::OutOfBounds`] if an event's coordinate lies outside
    /// the bounds.
    pub fn from_events(
        bounds: Bounds,
        events: impl IntoIterator<Item = ((i32, i32), Event)>,
    ) -> Result<Self, WorldError> {
        let mut world = Self::with_bounds(bounds)?;
        for ((x, y), event) in events {
            let index = world.index_of(x, y)?;
            let cell = world
                .cells
                .get_mut(index)
                .ok_or_else(|| bounds.out_of_bounds(x, y))?;
            cell.set_event(Some(event));
        }
        Ok(world)
    }

    /// Find the events with available tickets nearest to a coordinate.
    ///
    /// Every cell is scanned. Cells whose event has at least one ticket are
    /// stably sorted by Manhattan distance to the centre, so equal distances
    /// keep storage order. At most `limit` results are returned, each with
    /// its event's cheapest ticket. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the centre lies outside the
    /// world.
    pub fn search_nearby_events(
        &self,
        x: i32,
        y: i32,
        limit: usize,
    ) -> Result<Vec<SearchResult<'_>>, WorldError> {
        let centre = self.locate_cell(x, y)?;

        let mut candidates: Vec<(u64, &Cell, &Event)> = self
            .cells
            .iter()
            .filter_map(|cell| {
                cell.available_event()
                    .map(|event| (cell.distance_to(centre), cell, event))
            })
            .collect();
        let candidate_count = candidates.len();

        // sort_by_key is stable: ties stay in storage order.
        candidates.sort_by_key(|&(distance, _, _)| distance);

        let results = candidates
            .into_iter()
            .take(limit)
            .map(|(distance, cell, event)| {
                event
                    .cheapest_ticket()
                    .map(|ticket| SearchResult::new(event, ticket, cell.coordinate(), distance))
            })
            .collect::<Result<Vec<_>, WorldError>>()?;

        debug!(
            centre = %Coordinate::new(x, y),
            candidates = candidate_count,
            returned = results.len(),
            "nearby event search complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use eventgrid_types::{EventId, TicketId};

    use super::*;
    use crate::ticket::Ticket;

    fn event(id: u32, prices: &[(u32, f64)]) -> Event {
        let tickets = prices
            .iter()
            .map(|&(ticket_id, price)| Ticket::new(TicketId::new(ticket_id), price))
            .collect();
        Event::new(EventId::new(id), tickets)
    }

    #[test]
    fn construct_rejects_inverted_bounds() {
        assert_eq!(
            World::new(1, 0, 0, 0).err(),
            Some(WorldError::InvalidBounds {
                axis: Axis::X,
                min: 1,
                max: 0
            })
        );
        assert_eq!(
            World::new(0, 5, 0, -5).err(),
            Some(WorldError::InvalidBounds {
                axis: Axis::Y,
                min: 5,
                max: -5
            })
        );
    }

    #[test]
    fn dimensions_include_both_boundaries() {
        let world = World::new(-2, -1, 2, 1).unwrap();
        assert_eq!(world.width(), 5);
        assert_eq!(world.height(), 3);
        assert_eq!(world.cell_count(), 15);
    }

    #[test]
    fn single_cell_world() {
        let world = World::new(7, 7, 7, 7).unwrap();
        assert_eq!(world.cell_count(), 1);
        assert_eq!(world.locate_cell(7, 7).unwrap().coordinate(), Coordinate::new(7, 7));
    }

    #[test]
    fn every_coordinate_maps_to_its_own_cell() {
        let world = World::new(-3, -2, 4, 5).unwrap();
        for x in -3..=4 {
            for y in -2..=5 {
                let cell = world.locate_cell(x, y).unwrap();
                assert_eq!((cell.x(), cell.y()), (x, y));
            }
        }
    }

    #[test]
    fn storage_is_x_major() {
        let world = World::new(0, 0, 1, 2).unwrap();
        let order: Vec<(i32, i32)> = world.cells().map(|c| (c.x(), c.y())).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn locate_rejects_coordinates_just_outside() {
        let world = World::new(-1, -1, 1, 1).unwrap();
        for (x, y) in [(-2, 0), (2, 0), (0, -2), (0, 2), (i32::MIN, i32::MAX)] {
            let err = world.locate_cell(x, y).unwrap_err();
            assert!(err.is_range_error());
            assert!(matches!(err, WorldError::OutOfBounds { .. }));
        }
    }

    #[test]
    fn extreme_bounds_report_too_large_instead_of_overflowing() {
        let result = World::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert!(matches!(result, Err(WorldError::GridTooLarge { .. })));
    }

    #[test]
    fn from_events_places_each_event() {
        let bounds = Bounds::new(0, 0, 1, 1).unwrap();
        let world = World::from_events(
            bounds,
            [((1, 0), event(1, &[])), ((0, 1), event(2, &[])), ((1, 0), event(3, &[]))],
        )
        .unwrap();
        assert_eq!(world.bounds(), bounds);
        assert_eq!(world.cell_count(), 4);
        assert_eq!(world.locate_cell(1, 0).unwrap().event().map(Event::id), Some(EventId::new(3)));
        assert_eq!(world.locate_cell(0, 1).unwrap().event().map(Event::id), Some(EventId::new(2)));
        assert!(world.locate_cell(0, 0).unwrap().event().is_none());
    }

    #[test]
    fn from_events_rejects_coordinates_outside_bounds() {
        let err = World::from_events(Bounds::new(0, 0, 1, 1).unwrap(), [((5, 0), event(1, &[]))])
            .unwrap_err();
        assert!(matches!(err, WorldError::OutOfBounds { x: 5, y: 0, .. }));
    }

    #[test]
    fn search_skips_empty_events_and_ranks_by_distance() {
        let world = World::from_events(
            Bounds::new(-2, -2, 2, 2).unwrap(),
            [
                ((2, 2), event(1, &[(1, 9.0)])),
                ((0, 1), event(2, &[(2, 30.0), (3, 4.0)])),
                ((0, 0), event(3, &[])),
            ],
        )
        .unwrap();

        let results = world.search_nearby_events(0, 0, 5).unwrap();
        let ids: Vec<EventId> = results.iter().map(|r| r.event().id()).collect();
        assert_eq!(ids, vec![EventId::new(2), EventId::new(1)]);
        assert_eq!(results[0].distance(), 1);
        assert_eq!(results[0].cheapest_ticket().id(), TicketId::new(3));
        assert_eq!(results[1].distance(), 4);
    }

    #[test]
    fn search_ties_keep_storage_order() {
        // All four neighbours are at distance 1 from the origin.
        let world = World::from_events(
            Bounds::new(-1, -1, 1, 1).unwrap(),
            [
                ((0, 1), event(1, &[(1, 1.0)])),
                ((1, 0), event(2, &[(2, 1.0)])),
                ((-1, 0), event(3, &[(3, 1.0)])),
                ((0, -1), event(4, &[(4, 1.0)])),
            ],
        )
        .unwrap();

        let results = world.search_nearby_events(0, 0, 4).unwrap();
        let coords: Vec<Coordinate> = results.iter().map(SearchResult::coordinate).collect();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(-1, 0),
                Coordinate::new(0, -1),
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
            ]
        );
    }

    #[test]
    fn search_respects_limit() {
        let events = (0..=3_u32).map(|n| {
            let x = i32::try_from(n).unwrap();
            ((x, 0), event(n + 1, &[(n + 1, 2.0)]))
        });
        let world = World::from_events(Bounds::new(0, 0, 3, 0).unwrap(), events).unwrap();
        assert_eq!(world.search_nearby_events(0, 0, 2).unwrap().len(), 2);
        assert!(world.search_nearby_events(0, 0, 0).unwrap().is_empty());
        assert_eq!(world.search_nearby_events(0, 0, 100).unwrap().len(), 4);
    }

    #[test]
    fn search_outside_world_is_range_error() {
        let world = World::new(-10, -10, 10, 10).unwrap();
        let err = world.search_nearby_events(100, 0, 5).unwrap_err();
        assert!(err.is_range_error());
    }
}
