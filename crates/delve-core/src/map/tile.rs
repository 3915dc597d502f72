//! Tile kinds and their static display/movement properties.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::data::colors::Rgb;

/// Display attributes for one tile variant: glyph plus foreground and
/// background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Terrain kind. Every grid cell holds exactly one of these; all
/// per-kind properties are static.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Wall = 0,
    Floor = 1,
    StairsDown = 2,
}

impl TileKind {
    /// Can an entity stand on this tile?
    pub const fn is_walkable(&self) -> bool {
        matches!(self, TileKind::Floor | TileKind::StairsDown)
    }

    /// Does sight pass through this tile?
    pub const fn is_transparent(&self) -> bool {
        matches!(self, TileKind::Floor | TileKind::StairsDown)
    }

    /// Display attributes when the tile is in the field of view.
    pub const fn light(&self) -> Graphic {
        match self {
            TileKind::Wall => Graphic {
                glyph: ' ',
                fg: Rgb(255, 255, 255),
                bg: Rgb(130, 110, 50),
            },
            TileKind::Floor => Graphic {
                glyph: ' ',
                fg: Rgb(255, 255, 255),
                bg: Rgb(200, 180, 50),
            },
            TileKind::StairsDown => Graphic {
                glyph: '>',
                fg: Rgb(255, 255, 255),
                bg: Rgb(200, 180, 50),
            },
        }
    }

    /// Display attributes when the tile is explored but out of view.
    pub const fn dark(&self) -> Graphic {
        match self {
            TileKind::Wall => Graphic {
                glyph: ' ',
                fg: Rgb(255, 255, 255),
                bg: Rgb(0, 0, 100),
            },
            TileKind::Floor => Graphic {
                glyph: ' ',
                fg: Rgb(255, 255, 255),
                bg: Rgb(50, 50, 150),
            },
            TileKind::StairsDown => Graphic {
                glyph: '>',
                fg: Rgb(0, 0, 100),
                bg: Rgb(50, 50, 150),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_properties() {
        assert!(!TileKind::Wall.is_walkable());
        assert!(!TileKind::Wall.is_transparent());
    }

    #[test]
    fn test_floor_properties() {
        assert!(TileKind::Floor.is_walkable());
        assert!(TileKind::Floor.is_transparent());
        assert!(TileKind::StairsDown.is_walkable());
    }

    #[test]
    fn test_light_and_dark_variants_differ() {
        assert_ne!(TileKind::Floor.light(), TileKind::Floor.dark());
    }
}
