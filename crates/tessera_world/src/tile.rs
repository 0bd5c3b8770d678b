//! Tile value types.
//!
//! A tile is packed into 4 bytes so a 1600x800 world stays under 5 MiB.
//!
//! Layout:
//! - Byte 0: Foreground material (`TileType`)
//! - Byte 1: Background wall (`WallType`)
//! - Byte 2: Liquid (high nibble kind, low nibble amount)
//! - Byte 3: Frame variant (derived by the frame processor)

use bytemuck::{Pod, Zeroable};

/// Foreground material of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TileType {
    /// Empty space.
    #[default]
    Air = 0,
    /// Base soil. Grass variants grow on it.
    Dirt = 1,
    /// Surface grass.
    Grass = 2,
    /// Deep rock.
    Stone = 3,
    /// Desert band material.
    Sand = 4,
    /// Tundra band material.
    Snow = 5,
    /// Jungle surface grass.
    JungleGrass = 6,
    /// Water body.
    Water = 7,
    /// Lava body.
    Lava = 8,
    /// Copper ore.
    CopperOre = 9,
    /// Iron ore.
    IronOre = 10,
    /// Gold ore.
    GoldOre = 11,
    /// Silver ore.
    SilverOre = 12,
    /// Coal.
    Coal = 13,
    /// Diamond.
    Diamond = 14,
    /// Marble deposits inside stone.
    Marble = 15,
    /// Portal slab and capstone material.
    Obsidian = 16,
    /// Filler between portal pillars.
    PortalVeil = 17,
    /// Single marker tile at a portal's centre.
    PortalCore = 18,
}

impl TileType {
    /// Number of tile types.
    pub const COUNT: usize = 19;

    /// Converts from u8. Unknown values map to `Air`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Dirt,
            2 => Self::Grass,
            3 => Self::Stone,
            4 => Self::Sand,
            5 => Self::Snow,
            6 => Self::JungleGrass,
            7 => Self::Water,
            8 => Self::Lava,
            9 => Self::CopperOre,
            10 => Self::IronOre,
            11 => Self::GoldOre,
            12 => Self::SilverOre,
            13 => Self::Coal,
            14 => Self::Diamond,
            15 => Self::Marble,
            16 => Self::Obsidian,
            17 => Self::PortalVeil,
            18 => Self::PortalCore,
            _ => Self::Air,
        }
    }

    /// Returns true for empty space.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Returns true for water and lava.
    #[inline]
    #[must_use]
    pub const fn is_liquid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }

    /// Returns true for anything a player can stand on.
    #[inline]
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !self.is_air() && !self.is_liquid()
    }

    /// Returns true for ore tiles.
    #[inline]
    #[must_use]
    pub const fn is_ore(self) -> bool {
        matches!(
            self,
            Self::CopperOre
                | Self::IronOre
                | Self::GoldOre
                | Self::SilverOre
                | Self::Coal
                | Self::Diamond
        )
    }

    /// Returns true for the grass family (grass and jungle grass).
    #[inline]
    #[must_use]
    pub const fn is_grass(self) -> bool {
        matches!(self, Self::Grass | Self::JungleGrass)
    }
}

/// Background wall behind a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WallType {
    /// No wall.
    #[default]
    None = 0,
    /// Soil wall.
    Dirt = 1,
    /// Sandstone wall.
    Sand = 2,
    /// Ice wall.
    Snow = 3,
    /// Rock wall.
    Stone = 4,
}

impl WallType {
    /// Converts from u8. Unknown values map to `None`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Dirt,
            2 => Self::Sand,
            3 => Self::Snow,
            4 => Self::Stone,
            _ => Self::None,
        }
    }
}

/// Kind of liquid held by a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LiquidKind {
    /// Dry tile.
    #[default]
    None = 0,
    /// Water.
    Water = 1,
    /// Lava.
    Lava = 2,
}

/// Packed liquid byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Liquid(u8);

impl Liquid {
    /// No liquid.
    pub const NONE: Self = Self(0);

    /// Maximum amount a tile can hold.
    pub const MAX_AMOUNT: u8 = 15;

    /// Creates a liquid value. Amounts above 15 are clamped.
    #[inline]
    #[must_use]
    pub const fn new(kind: LiquidKind, amount: u8) -> Self {
        let amount = if amount > Self::MAX_AMOUNT { Self::MAX_AMOUNT } else { amount };
        Self(((kind as u8) << 4) | amount)
    }

    /// A full tile of `kind`.
    #[inline]
    #[must_use]
    pub const fn full(kind: LiquidKind) -> Self {
        Self::new(kind, Self::MAX_AMOUNT)
    }

    /// Reconstructs from the packed byte.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the packed byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns the liquid kind.
    #[must_use]
    pub const fn kind(self) -> LiquidKind {
        match self.0 >> 4 {
            1 => LiquidKind::Water,
            2 => LiquidKind::Lava,
            _ => LiquidKind::None,
        }
    }

    /// Returns the amount (0-15).
    #[inline]
    #[must_use]
    pub const fn amount(self) -> u8 {
        self.0 & 0x0F
    }
}

/// A single tile, packed into 4 bytes.
///
/// Fields are private; mutation goes through the `with_*` builders so a
/// partial update can never silently drop the other fields:
///
/// ```rust
/// use tessera_world::{Tile, TileType, WallType};
///
/// let tile = Tile::new(TileType::Stone).with_wall(WallType::Stone);
/// let mined = tile.with_kind(TileType::Air);
/// assert_eq!(mined.wall(), WallType::Stone);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: u8,
    wall: u8,
    liquid: u8,
    frame: u8,
}

impl Tile {
    /// Air tile - completely empty.
    pub const AIR: Self = Self { kind: 0, wall: 0, liquid: 0, frame: 0 };

    /// Creates a tile of the given material with no wall, liquid or frame.
    #[inline]
    #[must_use]
    pub const fn new(kind: TileType) -> Self {
        Self { kind: kind as u8, wall: 0, liquid: 0, frame: 0 }
    }

    /// Returns the material.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> TileType {
        TileType::from_u8(self.kind)
    }

    /// Returns the background wall.
    #[inline]
    #[must_use]
    pub const fn wall(self) -> WallType {
        WallType::from_u8(self.wall)
    }

    /// Returns the liquid state.
    #[inline]
    #[must_use]
    pub const fn liquid(self) -> Liquid {
        Liquid::from_raw(self.liquid)
    }

    /// Returns the frame variant.
    #[inline]
    #[must_use]
    pub const fn frame(self) -> u8 {
        self.frame
    }

    /// Returns true if the material is air.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.kind == 0
    }

    /// Copy with a different material. Wall, liquid and frame are kept.
    #[inline]
    #[must_use]
    pub const fn with_kind(self, kind: TileType) -> Self {
        Self { kind: kind as u8, ..self }
    }

    /// Copy with a different wall.
    #[inline]
    #[must_use]
    pub const fn with_wall(self, wall: WallType) -> Self {
        Self { wall: wall as u8, ..self }
    }

    /// Copy with a different liquid.
    #[inline]
    #[must_use]
    pub const fn with_liquid(self, liquid: Liquid) -> Self {
        Self { liquid: liquid.raw(), ..self }
    }

    /// Copy with a different frame variant.
    #[inline]
    #[must_use]
    pub const fn with_frame(self, frame: u8) -> Self {
        Self { frame, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_size() {
        assert_eq!(std::mem::size_of::<Tile>(), 4, "Tile must stay packed into 4 bytes");
    }

    #[test]
    fn test_tile_type_roundtrip() {
        for raw in 0..TileType::COUNT as u8 {
            assert_eq!(TileType::from_u8(raw) as u8, raw);
        }
        assert_eq!(TileType::from_u8(200), TileType::Air);
    }

    #[test]
    fn test_builders_keep_other_fields() {
        let tile = Tile::new(TileType::Sand)
            .with_wall(WallType::Sand)
            .with_liquid(Liquid::new(LiquidKind::Water, 7))
            .with_frame(23);

        let changed = tile.with_kind(TileType::Stone);
        assert_eq!(changed.kind(), TileType::Stone);
        assert_eq!(changed.wall(), WallType::Sand);
        assert_eq!(changed.liquid().amount(), 7);
        assert_eq!(changed.frame(), 23);
    }

    #[test]
    fn test_liquid_packing() {
        let lava = Liquid::new(LiquidKind::Lava, 9);
        assert_eq!(lava.raw(), 0x29);
        assert_eq!(lava.kind(), LiquidKind::Lava);
        assert_eq!(lava.amount(), 9);

        let clamped = Liquid::new(LiquidKind::Water, 200);
        assert_eq!(clamped.amount(), Liquid::MAX_AMOUNT);
    }

    #[test]
    fn test_predicates() {
        assert!(TileType::Water.is_liquid());
        assert!(!TileType::Water.is_solid());
        assert!(TileType::Stone.is_solid());
        assert!(TileType::Diamond.is_ore());
        assert!(!TileType::Marble.is_ore());
        assert!(TileType::JungleGrass.is_grass());
        assert!(Tile::AIR.is_air());
    }
}
