use crate::call::Call;
use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub floor: usize,
    pub call: Call,
}

impl Request {
    pub fn cab(floor: usize) -> Self {
        Request { floor, call: Call::Cab }
    }

    pub fn hall(floor: usize, direction: Direction) -> Self {
        Request { floor, call: Call::from_direction(direction) }
    }

    pub fn travel_direction(&self) -> Option<Direction> {
        self.call.travel_direction()
    }
}
