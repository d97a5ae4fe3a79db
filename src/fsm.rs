/// ----- SERVICE LOOP MODULE -----
/// The state machine driving the simulated car. One thread per controller:
/// it sleeps on the wake channel while idle, then drains the queues stop by
/// stop, suspending on the wait point for each travel step and each dwell.
/// An interrupted travel wait aborts the stop in service and returns it to a
/// pending queue; the car only ever rests at fully reached floors.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use crate::direction::Direction;
use crate::notifications::Notifier;
use crate::request::Request;
use crate::requests::Requests;
use crate::waiting::{WaitOutcome, WaitPoint};

/// The two suspension points of the loop and their durations.
pub struct Waits {
    pub point: WaitPoint,
    pub travel: Duration,
    pub floor: Duration,
    pub door: Option<Duration>,
}

impl Waits {
    fn travel(&self) -> WaitOutcome {
        self.point.wait(self.travel)
    }

    fn dwell(&self) -> WaitOutcome {
        match self.door {
            Some(door) => match self.point.wait(door) {
                WaitOutcome::Interrupted => WaitOutcome::Interrupted,
                WaitOutcome::Elapsed => self.point.wait(self.floor.saturating_sub(door)),
            },
            None => self.point.wait(self.floor),
        }
    }
}

pub fn run(
    state: Arc<Mutex<Requests>>,
    wake_rx: Receiver<()>,
    waits: Waits,
    notifier: Notifier,
) {
    // each wake is one idle-to-busy transition; the channel closing means
    // the controller is gone
    while wake_rx.recv().is_ok() {
        loop {
            // a signal raised for the previous request must not cut a wait
            // of the next one
            waits.point.clear();
            let next = {
                let mut requests = state.lock();
                match requests.next_stop() {
                    Some(stop) => {
                        let direction = requests.promote(stop.clone());
                        Some((stop, direction))
                    }
                    None => {
                        requests.car.busy = false;
                        None
                    }
                }
            };
            let Some((stop, direction)) = next else { break };
            handle_request(&state, &waits, &notifier, stop, direction);
        }
    }
}

/// Moves the car towards the stop one floor per travel interval, then
/// announces the arrival and dwells. Bails out if the suspended wait is cut
/// short, returning the stop to a pending queue.
fn handle_request(
    state: &Arc<Mutex<Requests>>,
    waits: &Waits,
    notifier: &Notifier,
    stop: Request,
    direction: Direction,
) {
    loop {
        let step = {
            let requests = state.lock();
            Direction::towards(requests.car.location, stop.floor)
        };
        let Some(step) = step else { break };
        if waits.travel() == WaitOutcome::Interrupted {
            state.lock().requeue_aborted();
            return;
        }
        if move_car(state, waits, notifier, step) == WaitOutcome::Interrupted {
            state.lock().requeue_aborted();
            return;
        }
    }

    // the stop is served before the dwell starts, so a conflicting call
    // arriving during the dwell cannot send it back to a queue
    state.lock().mark_arrived();
    notifier.arrival(stop.floor, direction);
    waits.dwell();
    state.lock().clear_active();
}

/// One floor of travel. Reports the new position, and serves any
/// current-sweep stop sitting exactly at the floor just reached before the
/// journey continues.
fn move_car(
    state: &Arc<Mutex<Requests>>,
    waits: &Waits,
    notifier: &Notifier,
    step: Direction,
) -> WaitOutcome {
    let (location, en_route, direction) = {
        let mut requests = state.lock();
        let location = (requests.car.location as isize + step.step()) as usize;
        requests.car.location = location;
        (location, requests.take_stop_at(location), requests.car.direction)
    };
    notifier.position(location);

    if en_route.is_some() {
        notifier.arrival(location, direction);
        // the outer stop is still in service; a cut here aborts it
        return waits.dwell();
    }
    WaitOutcome::Elapsed
}
