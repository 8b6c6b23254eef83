#![forbid(unsafe_code)]

//! Compass swipe directions.

use std::fmt;

use bitflags::bitflags;

use crate::geometry::Vector;

/// A physical drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order ties between equal drag percentages are
    /// resolved: the first listed wins.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// The unit vector pointing along this direction.
    #[inline]
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Left => Vector::new(-1.0, 0.0),
            Direction::Right => Vector::new(1.0, 0.0),
            Direction::Up => Vector::new(0.0, -1.0),
            Direction::Down => Vector::new(0.0, 1.0),
        }
    }

    /// Whether this is a horizontal direction.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    const fn bit(self) -> DirectionSet {
        match self {
            Direction::Left => DirectionSet::LEFT,
            Direction::Right => DirectionSet::RIGHT,
            Direction::Up => DirectionSet::UP,
            Direction::Down => DirectionSet::DOWN,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// The set of directions a card responds to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirectionSet: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

impl DirectionSet {
    /// Whether `direction` is in the set.
    #[inline]
    pub fn allows(self, direction: Direction) -> bool {
        self.contains(direction.bit())
    }

    /// The allowed directions in tie-break order.
    pub fn iter_ordered(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.allows(*d))
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        DirectionSet::all()
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> Self {
        direction.bit()
    }
}

/// A small per-direction table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionMap<T> {
    values: [T; 4],
}

impl<T: Copy> DirectionMap<T> {
    /// A map holding `value` for every direction.
    pub fn splat(value: T) -> Self {
        Self { values: [value; 4] }
    }

    /// The value for `direction`.
    #[inline]
    pub fn get(&self, direction: Direction) -> T {
        self.values[Self::slot(direction)]
    }

    /// Replace the value for `direction`.
    pub fn set(&mut self, direction: Direction, value: T) {
        self.values[Self::slot(direction)] = value;
    }

    /// Builder-style override for one direction.
    #[must_use]
    pub fn with(mut self, direction: Direction, value: T) -> Self {
        self.set(direction, value);
        self
    }

    const fn slot(direction: Direction) -> usize {
        match direction {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}
