//! Operator keywords and their argument schemas.
//!
//! Keywords are the enum names (matched case-insensitively) and the wire byte
//! is the discriminant. Condition and action bytes share one numbering so a
//! byte never names both an IF and a THEN operator.

use serde::Serialize;
use strum::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Shape of a single positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
    /// `AND` / `OR`
    AndOr,
    /// `[id, ...]`
    IdList,
    /// `[{x.y}, ...]`
    CellList,
    /// `[{TYPE-id-x.y}, ...]`
    SpawnList,
    /// `IN_ORDER` / `ANY_ORDER`
    Order,
    /// `ONCE` / `ALWAYS`
    Repeat,
    /// Milliseconds, 4 bytes on the wire
    Millis,
    /// Target map, 1 byte on the wire
    MapIndex,
    /// `{x.y}`
    Cell,
    /// Unquoted text running to the end of the argument list
    Text,
}

const ID_TRIGGER: &[FieldKind] = &[
    FieldKind::AndOr,
    FieldKind::IdList,
    FieldKind::Order,
    FieldKind::Repeat,
];
const CELL_TRIGGER: &[FieldKind] = &[
    FieldKind::AndOr,
    FieldKind::CellList,
    FieldKind::Order,
    FieldKind::Repeat,
];

/// IF operators.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ConditionOp {
    ShootObjs = 0,
    Kill = 1,
    Get = 2,
    Touch = 3,
    ShootWalls = 4,
    Enter = 5,
    TimeElapsed = 6,
}

impl ConditionOp {
    pub const fn schema(self) -> &'static [FieldKind] {
        match self {
            Self::ShootObjs | Self::Kill | Self::Get | Self::Touch => ID_TRIGGER,
            Self::ShootWalls | Self::Enter => CELL_TRIGGER,
            Self::TimeElapsed => &[FieldKind::Millis],
        }
    }

    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

/// THEN operators.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ActionOp {
    Open = 7,
    Close = 8,
    Spawn = 9,
    Despawn = 10,
    Dialog = 11,
    Warp = 12,
    Win = 13,
}

impl ActionOp {
    pub const fn schema(self) -> &'static [FieldKind] {
        match self {
            Self::Open | Self::Close => &[FieldKind::CellList],
            Self::Spawn => &[FieldKind::SpawnList],
            Self::Despawn => &[FieldKind::IdList],
            Self::Dialog => &[FieldKind::Text],
            Self::Warp => &[FieldKind::MapIndex, FieldKind::Cell],
            Self::Win => &[],
        }
    }

    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn counts() {
        assert_eq!(ConditionOp::COUNT, 7);
        assert_eq!(ActionOp::COUNT, 7);
    }

    #[test]
    fn wire_bytes_follow_table_order() {
        for (i, op) in ConditionOp::iter().enumerate() {
            assert_eq!(op as usize, i);
        }
        for (i, op) in ActionOp::iter().enumerate() {
            assert_eq!(op as usize, ConditionOp::COUNT + i);
        }
    }

    #[test]
    fn keywords_are_disjoint() {
        let mut seen = HashSet::new();
        for kw in ConditionOp::iter()
            .map(ConditionOp::keyword)
            .chain(ActionOp::iter().map(ActionOp::keyword))
        {
            assert!(seen.insert(kw), "duplicate keyword {kw}");
        }
        assert_eq!(seen.len(), ConditionOp::COUNT + ActionOp::COUNT);
    }

    #[test]
    fn keywords_case_insensitive() {
        assert_eq!("time_elapsed".parse::<ConditionOp>().ok(), Some(ConditionOp::TimeElapsed));
        assert_eq!("Shoot_Walls".parse::<ConditionOp>().ok(), Some(ConditionOp::ShootWalls));
        assert_eq!("despawn".parse::<ActionOp>().ok(), Some(ActionOp::Despawn));
        assert!("BOGUS_OP".parse::<ConditionOp>().is_err());
        assert!("OPEN".parse::<ConditionOp>().is_err());
    }

    #[test]
    fn keyword_spelling() {
        assert_eq!(ConditionOp::ShootObjs.keyword(), "SHOOT_OBJS");
        assert_eq!(ConditionOp::TimeElapsed.keyword(), "TIME_ELAPSED");
        assert_eq!(ActionOp::Despawn.keyword(), "DESPAWN");
    }

    #[test]
    fn schemas() {
        assert_eq!(ConditionOp::Get.schema().len(), 4);
        assert_eq!(ConditionOp::Enter.schema()[1], FieldKind::CellList);
        assert_eq!(ActionOp::Warp.schema(), &[FieldKind::MapIndex, FieldKind::Cell]);
        assert!(ActionOp::Win.schema().is_empty());
        // Text may only close an argument list.
        for op in ActionOp::iter() {
            let schema = op.schema();
            if let Some(pos) = schema.iter().position(|k| *k == FieldKind::Text) {
                assert_eq!(pos, schema.len() - 1, "{op}");
            }
        }
    }

    #[test]
    fn field_kind_names() {
        assert_eq!(FieldKind::IdList.to_string(), "id-list");
        assert_eq!(FieldKind::MapIndex.to_string(), "map-index");
    }
}
