/// ----- REQUESTS MODULE -----
/// Owns the car and the three ordered stop queues, and decides which queue
/// an accepted request joins. The service loop drains the current queue one
/// floor at a time and asks this module for the next stop; when the current
/// queue runs dry the opposite pending queue takes over and the sweep
/// direction flips (SCAN).

use crate::direction::Direction;
use crate::queue::RequestQueue;
use crate::request::Request;

#[derive(Debug, Clone, Copy)]
pub struct Car {
    pub location: usize,
    pub direction: Direction,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub struct ActiveRequest {
    pub request: Request,
    /// Direction announced on arrival, committed at promotion.
    pub direction: Direction,
    /// Set once the stop has been announced and only the dwell remains.
    pub arrived: bool,
}

/// Queue roles. Reversal swaps the current slot with a pending slot by
/// index, so no two names ever refer to the same queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Current = 0,
    PendingUp = 1,
    PendingDown = 2,
}

fn pending_for(direction: Direction) -> Role {
    match direction {
        Direction::Up => Role::PendingUp,
        Direction::Down => Role::PendingDown,
    }
}

/// What `register` did with a request, so the caller knows whether to wake
/// the service loop or raise the abort signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// The car was idle; service starts now.
    Started,
    Queued,
    /// Queued, and the active request must be aborted and requeued first.
    Preempted,
}

#[derive(Debug)]
pub struct Requests {
    pub car: Car,
    pub active: Option<ActiveRequest>,
    queues: [RequestQueue; 3],
}

impl Requests {
    pub fn new(initial_position: usize) -> Self {
        Requests {
            car: Car {
                location: initial_position,
                direction: Direction::Up,
                busy: false,
            },
            active: None,
            queues: [RequestQueue::new(), RequestQueue::new(), RequestQueue::new()],
        }
    }

    fn queue_mut(&mut self, role: Role) -> &mut RequestQueue {
        &mut self.queues[role as usize]
    }

    fn queue(&self, role: Role) -> &RequestQueue {
        &self.queues[role as usize]
    }

    /// True while the destination can still be reached without reversing.
    fn still_ahead(&self, floor: usize) -> bool {
        match self.car.direction {
            Direction::Up => floor >= self.car.location,
            Direction::Down => floor <= self.car.location,
        }
    }

    /// Assigns the request to the correct queue.
    pub fn register(&mut self, request: Request) -> Routed {
        if !self.car.busy {
            // idle car, apply the new job right away
            self.car.busy = true;
            self.car.direction = match Direction::towards(self.car.location, request.floor) {
                Some(direction) => direction,
                // summoned to the floor it is resting at
                None => request.travel_direction().unwrap_or(Direction::Down),
            };
            self.queue_mut(Role::Current).insert(request);
            return Routed::Started;
        }

        match request.travel_direction() {
            // hall call
            Some(requested) => {
                if requested == self.car.direction && self.still_ahead(request.floor) {
                    self.queue_mut(Role::Current).insert(request);
                } else {
                    // already passed, or opposite to the sweep: served on the
                    // sweep matching its own direction
                    self.queue_mut(pending_for(requested)).insert(request);
                }
                Routed::Queued
            }
            // cab call
            None => {
                if !self.still_ahead(request.floor) {
                    self.queue_mut(pending_for(self.car.direction.opposite()))
                        .insert(request);
                    return Routed::Queued;
                }
                // accepting a stop ahead while committed to a hall call that
                // wants to travel the other way would reverse mid-service
                let conflict = matches!(&self.active, Some(active)
                    if !active.arrived
                        && active.request.call.is_hall()
                        && active.request.travel_direction() != Some(self.car.direction));
                self.queue_mut(Role::Current).insert(request);
                if conflict {
                    Routed::Preempted
                } else {
                    Routed::Queued
                }
            }
        }
    }

    /// Next stop of the sweep. When the current queue is empty the opposite
    /// pending queue is preferred (and the direction flips) before the
    /// same-direction pending queue; `None` means every queue is drained.
    pub fn next_stop(&mut self) -> Option<Request> {
        if self.queue(Role::Current).is_empty() {
            let opposite = pending_for(self.car.direction.opposite());
            let onward = pending_for(self.car.direction);
            if !self.queue(opposite).is_empty() {
                self.queues.swap(Role::Current as usize, opposite as usize);
                self.car.direction = self.car.direction.opposite();
            } else if !self.queue(onward).is_empty() {
                self.queues.swap(Role::Current as usize, onward as usize);
            } else {
                return None;
            }
        }
        match self.car.direction {
            Direction::Up => self.queue_mut(Role::Current).pop_lowest(),
            Direction::Down => self.queue_mut(Role::Current).pop_highest(),
        }
    }

    /// Marks the request as in service and commits its announcement
    /// direction: the sweep direction, unless the car already sits at the
    /// destination and the request brought its own.
    pub fn promote(&mut self, request: Request) -> Direction {
        let direction = if request.floor == self.car.location {
            request.travel_direction().unwrap_or(self.car.direction)
        } else {
            self.car.direction
        };
        self.active = Some(ActiveRequest { request, direction, arrived: false });
        direction
    }

    pub fn mark_arrived(&mut self) {
        if let Some(active) = &mut self.active {
            active.arrived = true;
        }
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Returns the interrupted active request to the pending queue matching
    /// its own travel direction, so it is revisited once the current sweep
    /// is exhausted.
    pub fn requeue_aborted(&mut self) {
        if let Some(active) = self.active.take() {
            let direction = active
                .request
                .travel_direction()
                .or_else(|| Direction::towards(self.car.location, active.request.floor))
                .unwrap_or(self.car.direction);
            self.queue_mut(pending_for(direction)).insert(active.request);
        }
    }

    /// Takes a queued current-sweep stop at exactly this floor, if any.
    pub fn take_stop_at(&mut self, floor: usize) -> Option<Request> {
        self.queue_mut(Role::Current).remove(floor)
    }
}
