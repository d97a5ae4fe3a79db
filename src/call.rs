use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    HallUp,
    HallDown,
    Cab,
}

impl Call {
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Call::HallUp,
            Direction::Down => Call::HallDown,
        }
    }

    /// The direction a hall call wants to travel. Cab calls carry none.
    pub fn travel_direction(self) -> Option<Direction> {
        match self {
            Call::HallUp => Some(Direction::Up),
            Call::HallDown => Some(Direction::Down),
            Call::Cab => None,
        }
    }

    pub fn is_hall(self) -> bool {
        !matches!(self, Call::Cab)
    }

    pub fn iter() -> impl Iterator<Item = Call> {
        [Call::HallUp, Call::HallDown, Call::Cab].iter().copied()
    }
}
