//! Abstract remote input, produced by the dispatcher from raw key codes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One remote button press. Carries nothing beyond which button it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
}

impl NavigationEvent {
    pub fn direction(self) -> Option<Direction> {
        match self {
            NavigationEvent::Up => Some(Direction::Up),
            NavigationEvent::Down => Some(Direction::Down),
            NavigationEvent::Left => Some(Direction::Left),
            NavigationEvent::Right => Some(Direction::Right),
            NavigationEvent::Select | NavigationEvent::Back => None,
        }
    }
}

impl From<Direction> for NavigationEvent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => NavigationEvent::Up,
            Direction::Down => NavigationEvent::Down,
            Direction::Left => NavigationEvent::Left,
            Direction::Right => NavigationEvent::Right,
        }
    }
}
