/// Single coordinate axis used for board width and height.
pub type Coord = u8;

/// Count type used for cell counts and hot targets.
pub type CellCount = u16;

/// Row-major index of a cell on the board.
pub type CellId = u16;

/// Two-dimensional board size `(columns, rows)`.
pub type Coord2 = (Coord, Coord);

/// Points awarded by a single tap.
pub type Points = u8;

/// Accumulated round score and best score.
pub type Score = u32;

/// Whole seconds left on the round clock.
pub type Seconds = u8;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Array shape for a `(columns, rows)` size, laid out row-major.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}
