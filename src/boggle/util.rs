use std::fmt;

/// Offsets of the 3x3 neighbourhood in row-major order, centre excluded
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves the position by the given offset. Returns None if the result
    /// falls outside of a `size` x `size` grid
    pub fn offset(&self, (d_row, d_col): (isize, isize), size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        if row < size && col < size {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Returns all the in-bounds positions touching this one, diagonals included
    pub fn adjacent(self, size: usize) -> impl Iterator<Item = Position> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&d| self.offset(d, size))
    }

    /// Checks whether the two positions touch (8-connected)
    pub fn is_adjacent(&self, other: Position) -> bool {
        *self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterates every position of a `size` x `size` grid in row-major order
pub fn positions(size: usize) -> impl Iterator<Item = Position> {
    (0..size).flat_map(move |row| (0..size).map(move |col| Position { row, col }))
}
