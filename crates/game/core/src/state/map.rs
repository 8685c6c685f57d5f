use strum::{Display, EnumIter};

use super::{Position, StateError};

/// Terrain or pickup occupying a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Land,
    Medkit,
    Ammo,
    Wall,
    Tree,
    /// Impassable edge terrain that does not block sight.
    Boundary,
}

impl TileKind {
    /// Land and pickups can be entered.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Land | Self::Medkit | Self::Ammo)
    }

    /// Walls and trees block line of sight and projectiles.
    pub const fn blocks_sight(self) -> bool {
        matches!(self, Self::Wall | Self::Tree)
    }

    pub const fn resource(self) -> Option<ResourceKind> {
        match self {
            Self::Medkit => Some(ResourceKind::Medkit),
            Self::Ammo => Some(ResourceKind::Ammo),
            _ => None,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::Land => '.',
            Self::Medkit => 'M',
            Self::Ammo => 'A',
            Self::Wall => '#',
            Self::Tree => 'T',
            Self::Boundary => '~',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Land),
            'M' => Some(Self::Medkit),
            'A' => Some(Self::Ammo),
            '#' => Some(Self::Wall),
            'T' => Some(Self::Tree),
            '~' => Some(Self::Boundary),
            _ => None,
        }
    }
}

/// Consumable pickups that can be sought by the AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Medkit,
    Ammo,
}

impl ResourceKind {
    pub const fn tile(self) -> TileKind {
        match self {
            Self::Medkit => TileKind::Medkit,
            Self::Ammo => TileKind::Ammo,
        }
    }
}

/// Row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    rows: u32,
    cols: u32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Creates a map filled with a single tile kind.
    pub fn filled(rows: u32, cols: u32, tile: TileKind) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![tile; rows as usize * cols as usize],
        }
    }

    /// Parses a map from glyph rows (see [`TileKind::from_glyph`]).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, StateError> {
        let Some(first) = rows.first() else {
            return Err(StateError::EmptyMap);
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(StateError::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != cols {
                return Err(StateError::RaggedMap {
                    row,
                    expected: cols,
                    found: width,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile = TileKind::from_glyph(glyph)
                    .ok_or(StateError::UnknownGlyph { glyph, row, col })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            rows: rows.len() as u32,
            cols: cols as u32,
            tiles,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < self.rows as i32
            && position.col < self.cols as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.cols as usize + position.col as usize)
    }

    pub fn get(&self, position: Position) -> Option<TileKind> {
        self.index(position).map(|index| self.tiles[index])
    }

    /// Replaces the tile at `position`. Returns false when out of bounds.
    pub fn set(&mut self, position: Position, tile: TileKind) -> bool {
        match self.index(position) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Renders the map back into glyph rows.
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.cols.max(1) as usize)
            .map(|row| row.iter().map(|tile| tile.glyph()).collect())
            .collect()
    }
}

/// Inclusive rectangle bounding the currently playable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeZone {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl SafeZone {
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Zone covering the whole map.
    pub fn covering(map: &TileMap) -> Self {
        Self::new(0, 0, map.rows() as i32 - 1, map.cols() as i32 - 1)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= self.top
            && position.row <= self.bottom
            && position.col >= self.left
            && position.col <= self.right
    }

    /// Integer midpoint of the zone.
    pub fn center(&self) -> Position {
        Position::new(
            self.top + (self.bottom - self.top) / 2,
            self.left + (self.right - self.left) / 2,
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.top > self.bottom || self.left > self.right
    }

    pub fn fits_within(&self, map: &TileMap) -> bool {
        map.contains(Position::new(self.top, self.left))
            && map.contains(Position::new(self.bottom, self.right))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn glyphs_round_trip_for_every_tile() {
        for tile in TileKind::iter() {
            assert_eq!(TileKind::from_glyph(tile.glyph()), Some(tile));
        }
    }

    #[test]
    fn parses_glyph_rows() {
        let map = TileMap::from_rows(&["#.M", "TA~"]).unwrap();
        assert_eq!((map.rows(), map.cols()), (2, 3));
        assert_eq!(map.get(Position::new(0, 2)), Some(TileKind::Medkit));
        assert_eq!(map.get(Position::new(1, 0)), Some(TileKind::Tree));
        assert_eq!(map.get(Position::new(2, 0)), None);
        assert_eq!(map.to_rows(), vec!["#.M".to_string(), "TA~".to_string()]);
    }

    #[test]
    fn rejects_ragged_and_unknown_rows() {
        assert_eq!(
            TileMap::from_rows(&["...", ".."]),
            Err(StateError::RaggedMap {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            TileMap::from_rows(&[".x"]),
            Err(StateError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                col: 1
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(TileMap::from_rows(&empty), Err(StateError::EmptyMap));
    }

    #[test]
    fn safe_zone_center_and_containment() {
        let zone = SafeZone::new(1, 2, 5, 8);
        assert_eq!(zone.center(), Position::new(3, 5));
        assert!(zone.contains(Position::new(5, 8)));
        assert!(!zone.contains(Position::new(0, 4)));
        assert!(!zone.is_degenerate());
        assert!(SafeZone::new(3, 0, 2, 1).is_degenerate());
    }

    #[test]
    fn tile_traits() {
        assert!(TileKind::Ammo.is_walkable());
        assert!(!TileKind::Boundary.is_walkable());
        assert!(!TileKind::Boundary.blocks_sight());
        assert!(TileKind::Tree.blocks_sight());
        assert_eq!(TileKind::Medkit.resource(), Some(ResourceKind::Medkit));
        assert_eq!(ResourceKind::Ammo.tile(), TileKind::Ammo);
    }
}
