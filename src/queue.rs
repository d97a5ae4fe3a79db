use std::collections::BTreeMap;

use crate::request::Request;

/// Ordered set of stops, at most one per destination. A second request for a
/// destination already queued coalesces into the existing entry.
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    stops: BTreeMap<usize, Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        RequestQueue { stops: BTreeMap::new() }
    }

    pub fn insert(&mut self, request: Request) {
        self.stops.entry(request.floor).or_insert(request);
    }

    /// Removes and returns the stop closest to the bottom of the shaft.
    pub fn pop_lowest(&mut self) -> Option<Request> {
        let floor = *self.stops.keys().next()?;
        self.stops.remove(&floor)
    }

    /// Removes and returns the stop closest to the top of the shaft.
    pub fn pop_highest(&mut self) -> Option<Request> {
        let floor = *self.stops.keys().next_back()?;
        self.stops.remove(&floor)
    }

    pub fn remove(&mut self, floor: usize) -> Option<Request> {
        self.stops.remove(&floor)
    }

    pub fn contains(&self, floor: usize) -> bool {
        self.stops.contains_key(&floor)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn pops_lowest_and_highest() {
        let mut queue = RequestQueue::new();
        queue.insert(Request::cab(3));
        queue.insert(Request::cab(1));
        queue.insert(Request::cab(5));

        assert_eq!(queue.pop_lowest().unwrap().floor, 1);
        assert_eq!(queue.pop_highest().unwrap().floor, 5);
        assert_eq!(queue.pop_lowest().unwrap().floor, 3);
        assert!(queue.pop_lowest().is_none());
    }

    #[test]
    fn duplicate_destination_coalesces() {
        let mut queue = RequestQueue::new();
        queue.insert(Request::hall(2, Direction::Up));
        queue.insert(Request::cab(2));

        assert_eq!(queue.len(), 1);
        // the first entry wins
        assert_eq!(queue.pop_lowest().unwrap(), Request::hall(2, Direction::Up));
    }

    #[test]
    fn remove_by_floor() {
        let mut queue = RequestQueue::new();
        queue.insert(Request::cab(2));
        queue.insert(Request::cab(4));

        assert_eq!(queue.remove(4).unwrap().floor, 4);
        assert!(queue.remove(4).is_none());
        assert!(queue.contains(2));
    }
}
