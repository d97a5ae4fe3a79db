/// ----- NOTIFICATIONS MODULE -----
/// Translates request and arrival facts into the button-light and position
/// events observers consume. Pure translation: nothing here touches the car
/// or the queues.

use crossbeam_channel::Sender;

use crate::call::Call;
use crate::direction::Direction;
use crate::request::Request;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Car,
    Floor,
}

/// A button light turning on or off.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ButtonEvent {
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    pub location: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Direction>,
    pub active: bool,
}

impl ButtonEvent {
    /// Light for an accepted request: the car button for a cab call, the
    /// floor's direction button for a hall call.
    pub fn request_light(request: &Request) -> ButtonEvent {
        match request.call {
            Call::Cab => ButtonEvent {
                kind: ButtonKind::Car,
                location: request.floor,
                button: None,
                active: true,
            },
            Call::HallUp | Call::HallDown => ButtonEvent {
                kind: ButtonKind::Floor,
                location: request.floor,
                button: request.call.travel_direction(),
                active: true,
            },
        }
    }

    /// Lights extinguished on arrival: the car button and the floor's button
    /// for the direction the stop was served in.
    pub fn arrival_lights(floor: usize, direction: Direction) -> [ButtonEvent; 2] {
        [
            ButtonEvent {
                kind: ButtonKind::Car,
                location: floor,
                button: None,
                active: false,
            },
            ButtonEvent {
                kind: ButtonKind::Floor,
                location: floor,
                button: Some(direction),
                active: false,
            },
        ]
    }
}

/// Delivery side of the bridge: caller-supplied channels, position updates
/// optional. Send failures mean the observer went away, which the controller
/// ignores.
#[derive(Debug, Clone)]
pub(crate) struct Notifier {
    buttons: Sender<ButtonEvent>,
    position: Option<Sender<usize>>,
}

impl Notifier {
    pub fn new(buttons: Sender<ButtonEvent>, position: Option<Sender<usize>>) -> Self {
        Notifier { buttons, position }
    }

    pub fn request_received(&self, request: &Request) {
        let _ = self.buttons.send(ButtonEvent::request_light(request));
    }

    pub fn arrival(&self, floor: usize, direction: Direction) {
        for event in ButtonEvent::arrival_lights(floor, direction) {
            let _ = self.buttons.send(event);
        }
    }

    pub fn position(&self, floor: usize) {
        if let Some(position) = &self.position {
            let _ = position.send(floor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hall_call_lights_the_floor_button() {
        let event = ButtonEvent::request_light(&Request::hall(1, Direction::Up));
        assert_eq!(
            event,
            ButtonEvent {
                kind: ButtonKind::Floor,
                location: 1,
                button: Some(Direction::Up),
                active: true,
            }
        );
    }

    #[test]
    fn cab_call_lights_the_car_button() {
        let event = ButtonEvent::request_light(&Request::cab(4));
        assert_eq!(
            event,
            ButtonEvent {
                kind: ButtonKind::Car,
                location: 4,
                button: None,
                active: true,
            }
        );
    }

    #[test]
    fn arrival_extinguishes_car_and_floor_buttons() {
        let [car, floor] = ButtonEvent::arrival_lights(2, Direction::Down);
        assert!(!car.active);
        assert_eq!(car.kind, ButtonKind::Car);
        assert!(!floor.active);
        assert_eq!(floor.button, Some(Direction::Down));
    }

    #[test]
    fn button_event_serializes_like_the_wire_shape() {
        let event = ButtonEvent::request_light(&Request::hall(1, Direction::Up));
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"floor","location":1,"button":"up","active":true}"#
        );
        let event = ButtonEvent::request_light(&Request::cab(4));
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"car","location":4,"active":true}"#
        );
    }
}
