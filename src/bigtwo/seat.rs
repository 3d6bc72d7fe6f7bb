//! Table position.

use std::{convert::TryFrom, fmt::Display};

use serde::{Deserialize, Serialize};

/// Table position, represented as cardinal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    North,
    East,
    South,
    West,
}
impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        })
    }
}

impl TryFrom<char> for Seat {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'N' | 'n' => Seat::North,
            'E' | 'e' => Seat::East,
            'S' | 's' => Seat::South,
            'W' | 'w' => Seat::West,
            _ => return Err(()),
        })
    }
}

impl TryFrom<usize> for Seat {
    type Error = ();

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Seat::all_seats().get(index).copied().ok_or(())
    }
}

impl Seat {
    /// All possible table positions, in clockwise order.
    pub fn all_seats() -> &'static [Seat; 4] {
        static SEATS: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];
        &SEATS
    }

    /// Position of this seat in clockwise order, starting from North.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns an abbreviated name for the table position.
    pub fn to_abbr(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    /// The next table position, in clockwise order.
    pub fn next(self) -> Seat {
        Seat::all_seats()[(self.index() + 1) % 4]
    }

    /// The other three table positions, in clockwise order.
    pub fn others(self) -> [Seat; 3] {
        let a = self.next();
        let b = a.next();
        [a, b, b.next()]
    }
}
