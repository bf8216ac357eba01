use super::side::Side;

/// Contents of a single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Empty,
    Human,
    Computer,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Side::Human),
            Cell::Computer => Some(Side::Computer),
        }
    }

    pub fn is_side(&self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// Two-bit code used when packing a board into a memo key.
    pub fn code(&self) -> u128 {
        match self {
            Cell::Empty => 0,
            Cell::Human => 1,
            Cell::Computer => 2,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Computer => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | '_' => Some(Cell::Empty),
            'X' | 'x' | 'H' | 'h' => Some(Cell::Human),
            'O' | 'o' | 'C' | 'c' => Some(Cell::Computer),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Cell::Human,
            Side::Computer => Cell::Computer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for cell in [Cell::Empty, Cell::Human, Cell::Computer] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('?'), None);
    }

    #[test]
    fn test_side_mapping() {
        assert_eq!(Cell::from(Side::Human).side(), Some(Side::Human));
        assert_eq!(Cell::from(Side::Computer).side(), Some(Side::Computer));
        assert_eq!(Cell::Empty.side(), None);
        assert!(Cell::Computer.is_side(Side::Computer));
        assert!(!Cell::Empty.is_side(Side::Human));
    }
}
