use std::fmt;

/// Unique identifier for any unit tracked in the state.
///
/// Units refer to each other by id (`target_enemy`), never by ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// Reserved identifier for the player.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this id represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in (row, col) tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by the given deltas.
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// `|Δrow| + |Δcol|`
    #[inline]
    pub fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// `max(|Δrow|, |Δcol|)`
    #[inline]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Squared Euclidean distance. Compared against `range * range` so range
    /// checks stay in integer arithmetic.
    #[inline]
    pub fn distance_squared(self, other: Self) -> u64 {
        let dr = u64::from(self.row.abs_diff(other.row));
        let dc = u64::from(self.col.abs_diff(other.col));
        dr * dr + dc * dc
    }

    /// Per-axis sign of `other - self`, each component in `{-1, 0, 1}`.
    #[inline]
    pub fn step_towards(self, other: Self) -> (i32, i32) {
        (
            (other.row - self.row).signum(),
            (other.col - self.col).signum(),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal step offsets as `(d_row, d_col)`: north, south, west, east.
pub const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
