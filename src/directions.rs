use bitflags::bitflags;

/// One of the four grid-aligned steps away from a cell.
///
/// The discriminants are the bit values used in a cell's open-direction mask, so a direction
/// converts losslessly into a single-bit `Directions` set.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Down = 2,
    Left = 4,
    Right = 8,
}

bitflags! {
    /// A set of directions, e.g. the passages open from a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        const UP = Direction::Up as u8;
        const DOWN = Direction::Down as u8;
        const LEFT = Direction::Left as u8;
        const RIGHT = Direction::Right as u8;
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction whose bit value is `1 << exponent`, for exponents 0 to 3.
    #[inline]
    pub fn from_exponent(exponent: u32) -> Option<Direction> {
        match exponent {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    #[inline]
    pub fn bit(self) -> Directions {
        Directions::from_bits_retain(self as u8)
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Directions {
        direction.bit()
    }
}

impl Directions {
    #[inline]
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.bit())
    }

    /// The individual directions in the set, in `Up, Down, Left, Right` order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        IntoIterator::into_iter(Direction::ALL).filter(move |dir| self.has(*dir))
    }
}
