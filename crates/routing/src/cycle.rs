use model::poi::{Catalog, PointOfInterest};

/// Pointer over the fixed tour catalog. The tour is a cycle, not a
/// terminating sequence: advancing past the last station wraps to the
/// first.
#[derive(Debug, Clone)]
pub struct TourCycle {
    catalog: Catalog,
    active_index: usize,
}

impl TourCycle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            active_index: 0,
        }
    }

    /// The station the tour currently points at. No side effects.
    pub fn current(&self) -> &PointOfInterest {
        // active_index is kept in [0, len) at all times
        &self.catalog.points()[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the pair (current, next) and commits the pointer to next.
    /// The caller is expected to fetch a route between the two.
    pub fn advance(&mut self) -> (PointOfInterest, PointOfInterest) {
        let next_index = (self.active_index + 1) % self.catalog.len();
        let current = self.catalog.points()[self.active_index].clone();
        let next = self.catalog.points()[next_index].clone();
        self.active_index = next_index;
        (current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64) -> PointOfInterest {
        PointOfInterest {
            id,
            name: format!("station {id}"),
            description: String::new(),
            latitude: -21.5 - id as f64 * 0.01,
            longitude: -45.4,
            image: None,
        }
    }

    fn cycle_of(n: i64) -> TourCycle {
        let catalog =
            Catalog::new((0..n).map(station).collect()).unwrap();
        TourCycle::new(catalog)
    }

    #[test]
    fn advancing_catalog_length_times_closes_the_cycle() {
        for n in 1..=8 {
            let mut cycle = cycle_of(n);
            for _ in 0..n {
                cycle.advance();
            }
            assert_eq!(cycle.active_index(), 0, "length {n}");
        }
    }

    #[test]
    fn advance_returns_current_and_next_in_order() {
        let mut cycle = cycle_of(3);
        let (current, next) = cycle.advance();
        assert_eq!(current.id, 0);
        assert_eq!(next.id, 1);
        assert_eq!(cycle.active_index(), 1);
    }

    #[test]
    fn last_station_wraps_to_first() {
        let mut cycle = cycle_of(3);
        cycle.advance();
        cycle.advance();
        let (current, next) = cycle.advance();
        assert_eq!(current.id, 2);
        assert_eq!(next.id, 0);
        assert_eq!(cycle.active_index(), 0);
    }

    #[test]
    fn index_stays_in_range() {
        let mut cycle = cycle_of(5);
        for _ in 0..23 {
            cycle.advance();
            assert!(cycle.active_index() < cycle.len());
        }
    }

    #[test]
    fn single_station_tour_returns_the_same_station_twice() {
        let mut cycle = cycle_of(1);
        let (current, next) = cycle.advance();
        assert_eq!(current.id, next.id);
        assert_eq!(cycle.active_index(), 0);
    }

    #[test]
    fn current_has_no_side_effects() {
        let cycle = cycle_of(4);
        assert_eq!(cycle.current().id, 0);
        assert_eq!(cycle.current().id, 0);
        assert_eq!(cycle.active_index(), 0);
    }
}
