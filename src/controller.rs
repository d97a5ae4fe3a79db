use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;

use crate::config::{ConfigError, ControllerConfig};
use crate::direction::Direction;
use crate::fsm::{self, Waits};
use crate::notifications::{ButtonEvent, Notifier};
use crate::request::Request;
use crate::requests::{Requests, Routed};
use crate::waiting::{abort_channel, AbortHandle};

/// A floor label the configured building does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown floor label '{label}'")]
pub struct InvalidFloorError {
    pub label: String,
}

/// One simulated elevator. Accepts floor and car calls, decides the service
/// order, and reports button lights and car position on the supplied
/// channels. Each instance owns its car, queues and service-loop thread, so
/// several cars are simply several controllers.
pub struct ElevatorControl {
    floors: Vec<String>,
    state: Arc<Mutex<Requests>>,
    wake_tx: Sender<()>,
    abort: AbortHandle,
    notifier: Notifier,
}

impl ElevatorControl {
    pub fn new(
        config: ControllerConfig,
        button_events: Sender<ButtonEvent>,
        position_events: Option<Sender<usize>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = Arc::new(Mutex::new(Requests::new(config.initial_position)));
        let (wake_tx, wake_rx) = unbounded();
        let (abort, wait_point) = abort_channel();
        let notifier = Notifier::new(button_events, position_events);
        let waits = Waits {
            point: wait_point,
            travel: config.travel_interval,
            floor: config.floor_interval,
            door: config.door_interval,
        };

        {
            let state = state.clone();
            let notifier = notifier.clone();
            thread::spawn(move || fsm::run(state, wake_rx, waits, notifier));
        }

        Ok(ElevatorControl {
            floors: config.floors,
            state,
            wake_tx,
            abort,
            notifier,
        })
    }

    /// Requests the elevator to a floor or in a direction: a floor call when
    /// `current_floor` is given and `destination` is `"up"` or `"down"`,
    /// otherwise a car call to the floor labelled `destination`. Registration
    /// and the initial button light happen before this returns; the movement
    /// runs on the controller's own timers.
    pub fn request_elevator(
        &self,
        destination: &str,
        current_floor: Option<&str>,
    ) -> Result<(), InvalidFloorError> {
        let request = match (destination, current_floor) {
            ("up", Some(floor)) => Request::hall(self.floor_index(floor)?, Direction::Up),
            ("down", Some(floor)) => Request::hall(self.floor_index(floor)?, Direction::Down),
            (label, _) => Request::cab(self.floor_index(label)?),
        };

        let routed = self.state.lock().register(request.clone());
        self.notifier.request_received(&request);
        match routed {
            Routed::Started => {
                let _ = self.wake_tx.send(());
            }
            Routed::Preempted => self.abort.raise(),
            Routed::Queued => {}
        }
        Ok(())
    }

    pub fn floors(&self) -> &[String] {
        &self.floors
    }

    /// Index of the floor the car last fully reached.
    pub fn location(&self) -> usize {
        self.state.lock().car.location
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().car.busy
    }

    fn floor_index(&self, label: &str) -> Result<usize, InvalidFloorError> {
        self.floors
            .iter()
            .position(|floor| floor == label)
            .ok_or_else(|| InvalidFloorError { label: label.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (ElevatorControl, crossbeam_channel::Receiver<ButtonEvent>) {
        let floors = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
        let (button_tx, button_rx) = unbounded();
        let controller =
            ElevatorControl::new(ControllerConfig::new(floors), button_tx, None).unwrap();
        (controller, button_rx)
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let (controller, _events) = controller();
        let err = controller.request_elevator("7", None).unwrap_err();
        assert_eq!(err.label, "7");

        let err = controller.request_elevator("up", Some("L")).unwrap_err();
        assert_eq!(err.label, "L");

        // "up" with no floor given is a car call to a label named "up"
        let err = controller.request_elevator("up", None).unwrap_err();
        assert_eq!(err.label, "up");
    }

    #[test]
    fn rejected_requests_emit_no_events() {
        let (controller, events) = controller();
        controller.request_elevator("7", None).unwrap_err();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn configuration_is_validated_before_spawning() {
        let (button_tx, _button_rx) = unbounded();
        let result = ElevatorControl::new(ControllerConfig::new(Vec::new()), button_tx, None);
        assert!(matches!(result, Err(ConfigError::NoFloors)));
    }
}
