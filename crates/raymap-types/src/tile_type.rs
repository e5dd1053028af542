use bitflags::bitflags;
use serde::Serialize;
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

bitflags! {
    /// Bit fields packed into a [`TileType`] wire value.
    ///
    /// The top bit selects the layer, the next two bits the category within
    /// that layer and the low five bits the variant within the category.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct TileBits: u8 {
        const OBJECT   = 0x80;
        const CATEGORY = 0x60;
        const VARIANT  = 0x1F;
    }
}

/// Category selected by the two bits below the layer bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TileCategory {
    // Background categories
    Meta,
    Floor,
    Wall,
    Door,
    // Object categories
    Item,
    Enemy,
    Bullet,
    Scenery,
}

/// Map cell types, as stored in map files and spawn arguments.
///
/// The discriminant is the wire value; see [`TileBits`] for its layout.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    Display,
    FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0x00,
    /// Editor-only eraser, never written to a map file.
    Delete = 0x01,

    BgFloor = 0x21,
    BgFloorWater = 0x22,
    BgFloorLava = 0x23,
    BgCeiling = 0x24,
    #[strum(serialize = "BG_WALL_1")]
    BgWall1 = 0x41,
    #[strum(serialize = "BG_WALL_2")]
    BgWall2 = 0x42,
    #[strum(serialize = "BG_WALL_3")]
    BgWall3 = 0x43,
    #[strum(serialize = "BG_WALL_4")]
    BgWall4 = 0x44,
    #[strum(serialize = "BG_WALL_5")]
    BgWall5 = 0x45,
    BgDoor = 0x61,
    BgDoorCharge = 0x62,
    BgDoorMissile = 0x63,
    BgDoorIce = 0x64,
    BgDoorXray = 0x65,
    BgDoorScript = 0x66,
    BgDoorKeyA = 0x67,
    BgDoorKeyB = 0x68,
    BgDoorKeyC = 0x69,

    // Power-ups
    ObjItemBeam = 0x81,
    ObjItemChargeBeam = 0x82,
    ObjItemMissile = 0x83,
    ObjItemIce = 0x84,
    ObjItemXray = 0x85,
    ObjItemSuitWater = 0x86,
    ObjItemSuitLava = 0x87,
    ObjItemEnergyTank = 0x88,
    // Permanent non-power items
    ObjItemKeyA = 0x89,
    ObjItemKeyB = 0x8A,
    ObjItemKeyC = 0x8B,
    ObjItemArtifact = 0x8C,
    // Transient items
    ObjItemPickupEnergy = 0x8D,
    ObjItemPickupMissile = 0x8E,

    ObjEnemyStartPoint = 0xA1,
    ObjEnemyNormal = 0xA2,
    ObjEnemyStrong = 0xA3,
    ObjEnemyArmored = 0xA4,
    ObjEnemyFlaming = 0xA5,
    ObjEnemyHidden = 0xA6,
    ObjEnemyBoss = 0xA7,

    // Bullet variants continue the item numbering
    ObjBulletNormal = 0xCF,
    ObjBulletCharge = 0xD0,
    ObjBulletIce = 0xD1,
    ObjBulletMissile = 0xD2,
    ObjBulletXray = 0xD3,

    ObjSceneryTerminal = 0xE1,
    ObjSceneryPortal = 0xE2,
}

impl TileType {
    pub const fn bits(self) -> TileBits {
        TileBits::from_bits_retain(self as u8)
    }

    pub const fn is_object(self) -> bool {
        self.bits().contains(TileBits::OBJECT)
    }

    pub const fn is_background(self) -> bool {
        !self.is_object()
    }

    /// Low five bits: the variant number within the category.
    pub const fn variant(self) -> u8 {
        self.bits().intersection(TileBits::VARIANT).bits()
    }

    pub const fn category(self) -> TileCategory {
        let category = self.bits().intersection(TileBits::CATEGORY).bits() >> 5;
        match (self.is_object(), category) {
            (false, 0) => TileCategory::Meta,
            (false, 1) => TileCategory::Floor,
            (false, 2) => TileCategory::Wall,
            (false, _) => TileCategory::Door,
            (true, 0) => TileCategory::Item,
            (true, 1) => TileCategory::Enemy,
            (true, 2) => TileCategory::Bullet,
            (true, _) => TileCategory::Scenery,
        }
    }

    /// Symbolic name used in script text, e.g. `OBJ_ENEMY_NORMAL`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up a tile type by its exact symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}
