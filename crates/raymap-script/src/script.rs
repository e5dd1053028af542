//! Typed script records.
//!
//! Every operator maps to one enum variant carrying exactly its fields. The
//! text and binary forms both go through the positional [`FieldValue`] list
//! described by the operator's schema, so a record only has to know how to
//! turn itself into that list and back.

use std::fmt;

use raymap_types::{ActionOp, AndOr, Cell, ConditionOp, FieldKind, Order, Repeat, Spawn};
use serde::Serialize;

use crate::error::SchemaViolation;

/// Longest dialog text a 2-byte length prefix can describe.
pub const MAX_TEXT_LEN: usize = u16::MAX as usize;
/// Longest list a 1-byte count can describe.
pub const MAX_LIST_LEN: usize = u8::MAX as usize;

/// One positional argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldValue {
    AndOr(AndOr),
    Ids(Vec<u8>),
    Cells(Vec<Cell>),
    Spawns(Vec<Spawn>),
    Order(Order),
    Repeat(Repeat),
    Millis(u32),
    MapIndex(u8),
    Cell(Cell),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::AndOr(_) => FieldKind::AndOr,
            Self::Ids(_) => FieldKind::IdList,
            Self::Cells(_) => FieldKind::CellList,
            Self::Spawns(_) => FieldKind::SpawnList,
            Self::Order(_) => FieldKind::Order,
            Self::Repeat(_) => FieldKind::Repeat,
            Self::Millis(_) => FieldKind::Millis,
            Self::MapIndex(_) => FieldKind::MapIndex,
            Self::Cell(_) => FieldKind::Cell,
            Self::Text(_) => FieldKind::Text,
        }
    }

    pub fn validate(&self) -> Result<(), SchemaViolation> {
        match self {
            Self::Ids(ids) => check_list(self.kind(), ids.len()),
            Self::Cells(cells) => check_list(self.kind(), cells.len()),
            Self::Spawns(spawns) => {
                check_list(self.kind(), spawns.len())?;
                match spawns.iter().find(|s| !s.kind.is_object()) {
                    Some(s) => Err(SchemaViolation::NotAnObject(s.kind)),
                    None => Ok(()),
                }
            }
            Self::Text(text) => check_text(text),
            _ => Ok(()),
        }
    }
}

fn check_list(field: FieldKind, len: usize) -> Result<(), SchemaViolation> {
    if len == 0 {
        Err(SchemaViolation::EmptyList { field })
    } else if len > MAX_LIST_LEN {
        Err(SchemaViolation::ListTooLong { field, len })
    } else {
        Ok(())
    }
}

fn check_text(text: &str) -> Result<(), SchemaViolation> {
    let reason = if text.is_empty() {
        "is empty"
    } else if text.len() > MAX_TEXT_LEN {
        "is longer than 65535 bytes"
    } else if !text.is_ascii() || text.contains(['\n', '\r']) {
        "must be single-byte text on one line"
    } else if text.trim() != text {
        "has leading or trailing whitespace"
    } else {
        return Ok(());
    };
    Err(SchemaViolation::InvalidText { reason })
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AndOr(v) => write!(f, "{v}"),
            Self::Order(v) => write!(f, "{v}"),
            Self::Repeat(v) => write!(f, "{v}"),
            Self::Ids(ids) => write_list(f, ids),
            Self::Cells(cells) => write_list(f, cells),
            Self::Spawns(spawns) => write_list(f, spawns),
            Self::Millis(ms) => write!(f, "{ms}"),
            Self::MapIndex(map) => write!(f, "{map}"),
            Self::Cell(cell) => write!(f, "{cell}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

/// Arguments shared by the list-watching conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger<T> {
    pub and_or: AndOr,
    pub items: Vec<T>,
    pub order: Order,
    pub repeat: Repeat,
}

impl<T: Clone> Trigger<T> {
    fn fields(&self, list: fn(Vec<T>) -> FieldValue) -> Vec<FieldValue> {
        vec![
            FieldValue::AndOr(self.and_or),
            list(self.items.clone()),
            FieldValue::Order(self.order),
            FieldValue::Repeat(self.repeat),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Condition {
    /// Objects were shot
    ShootObjs(Trigger<u8>),
    /// Enemies were killed
    Kill(Trigger<u8>),
    /// Items were picked up
    Get(Trigger<u8>),
    /// Objects were touched
    Touch(Trigger<u8>),
    /// Walls were shot
    ShootWalls(Trigger<Cell>),
    /// Cells were entered
    Enter(Trigger<Cell>),
    TimeElapsed { ms: u32 },
}

impl Condition {
    pub fn op(&self) -> ConditionOp {
        match self {
            Self::ShootObjs(_) => ConditionOp::ShootObjs,
            Self::Kill(_) => ConditionOp::Kill,
            Self::Get(_) => ConditionOp::Get,
            Self::Touch(_) => ConditionOp::Touch,
            Self::ShootWalls(_) => ConditionOp::ShootWalls,
            Self::Enter(_) => ConditionOp::Enter,
            Self::TimeElapsed { .. } => ConditionOp::TimeElapsed,
        }
    }

    /// Positional fields, in the order given by `self.op().schema()`.
    pub fn fields(&self) -> Vec<FieldValue> {
        match self {
            Self::ShootObjs(t) | Self::Kill(t) | Self::Get(t) | Self::Touch(t) => {
                t.fields(FieldValue::Ids)
            }
            Self::ShootWalls(t) | Self::Enter(t) => t.fields(FieldValue::Cells),
            Self::TimeElapsed { ms } => vec![FieldValue::Millis(*ms)],
        }
    }

    pub fn from_fields(op: ConditionOp, fields: Vec<FieldValue>) -> Result<Self, SchemaViolation> {
        let mut f = Fields::new(fields);
        let condition = match op {
            ConditionOp::ShootObjs => f.trigger(Fields::ids).map(Self::ShootObjs),
            ConditionOp::Kill => f.trigger(Fields::ids).map(Self::Kill),
            ConditionOp::Get => f.trigger(Fields::ids).map(Self::Get),
            ConditionOp::Touch => f.trigger(Fields::ids).map(Self::Touch),
            ConditionOp::ShootWalls => f.trigger(Fields::cells).map(Self::ShootWalls),
            ConditionOp::Enter => f.trigger(Fields::cells).map(Self::Enter),
            ConditionOp::TimeElapsed => f.millis().map(|ms| Self::TimeElapsed { ms }),
        };
        f.finish(condition, op.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Open doors
    Open(Vec<Cell>),
    /// Close doors
    Close(Vec<Cell>),
    Spawn(Vec<Spawn>),
    Despawn(Vec<u8>),
    /// Show a dialog box
    Dialog(String),
    /// Move the player to a cell on another map
    Warp { map: u8, cell: Cell },
    Win,
}

impl Action {
    pub fn op(&self) -> ActionOp {
        match self {
            Self::Open(_) => ActionOp::Open,
            Self::Close(_) => ActionOp::Close,
            Self::Spawn(_) => ActionOp::Spawn,
            Self::Despawn(_) => ActionOp::Despawn,
            Self::Dialog(_) => ActionOp::Dialog,
            Self::Warp { .. } => ActionOp::Warp,
            Self::Win => ActionOp::Win,
        }
    }

    pub fn fields(&self) -> Vec<FieldValue> {
        match self {
            Self::Open(cells) | Self::Close(cells) => vec![FieldValue::Cells(cells.clone())],
            Self::Spawn(spawns) => vec![FieldValue::Spawns(spawns.clone())],
            Self::Despawn(ids) => vec![FieldValue::Ids(ids.clone())],
            Self::Dialog(text) => vec![FieldValue::Text(text.clone())],
            Self::Warp { map, cell } => vec![FieldValue::MapIndex(*map), FieldValue::Cell(*cell)],
            Self::Win => Vec::new(),
        }
    }

    pub fn from_fields(op: ActionOp, fields: Vec<FieldValue>) -> Result<Self, SchemaViolation> {
        let mut f = Fields::new(fields);
        let action = match op {
            ActionOp::Open => f.cells().map(Self::Open),
            ActionOp::Close => f.cells().map(Self::Close),
            ActionOp::Spawn => f.spawns().map(Self::Spawn),
            ActionOp::Despawn => f.ids().map(Self::Despawn),
            ActionOp::Dialog => f.text().map(Self::Dialog),
            ActionOp::Warp => f
                .map_index()
                .and_then(|map| Some(Self::Warp { map, cell: f.cell()? })),
            ActionOp::Win => Some(Self::Win),
        };
        f.finish(action, op.keyword())
    }

    pub fn spawns(&self) -> &[Spawn] {
        match self {
            Self::Spawn(spawns) => spawns,
            _ => &[],
        }
    }
}

/// A complete trigger: when `condition` holds, perform `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    pub condition: Condition,
    pub action: Action,
}

impl Script {
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        self.condition
            .fields()
            .iter()
            .chain(self.action.fields().iter())
            .try_for_each(FieldValue::validate)
    }

    /// Object ids this script brings into the world.
    pub fn spawn_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.action.spawns().iter().map(|s| s.id)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {}(", self.condition.op())?;
        write_fields(f, &self.condition.fields())?;
        write!(f, ") THEN {}(", self.action.op())?;
        write_fields(f, &self.action.fields())?;
        f.write_str(")")
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[FieldValue]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

/// Consumes positional values while building a typed record.
struct Fields(std::vec::IntoIter<FieldValue>);

impl Fields {
    fn new(fields: Vec<FieldValue>) -> Self {
        Self(fields.into_iter())
    }

    fn and_or(&mut self) -> Option<AndOr> {
        match self.0.next()? {
            FieldValue::AndOr(v) => Some(v),
            _ => None,
        }
    }

    fn order(&mut self) -> Option<Order> {
        match self.0.next()? {
            FieldValue::Order(v) => Some(v),
            _ => None,
        }
    }

    fn repeat(&mut self) -> Option<Repeat> {
        match self.0.next()? {
            FieldValue::Repeat(v) => Some(v),
            _ => None,
        }
    }

    fn ids(&mut self) -> Option<Vec<u8>> {
        match self.0.next()? {
            FieldValue::Ids(v) => Some(v),
            _ => None,
        }
    }

    fn cells(&mut self) -> Option<Vec<Cell>> {
        match self.0.next()? {
            FieldValue::Cells(v) => Some(v),
            _ => None,
        }
    }

    fn spawns(&mut self) -> Option<Vec<Spawn>> {
        match self.0.next()? {
            FieldValue::Spawns(v) => Some(v),
            _ => None,
        }
    }

    fn millis(&mut self) -> Option<u32> {
        match self.0.next()? {
            FieldValue::Millis(v) => Some(v),
            _ => None,
        }
    }

    fn map_index(&mut self) -> Option<u8> {
        match self.0.next()? {
            FieldValue::MapIndex(v) => Some(v),
            _ => None,
        }
    }

    fn cell(&mut self) -> Option<Cell> {
        match self.0.next()? {
            FieldValue::Cell(v) => Some(v),
            _ => None,
        }
    }

    fn text(&mut self) -> Option<String> {
        match self.0.next()? {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    fn trigger<T>(&mut self, items: fn(&mut Self) -> Option<Vec<T>>) -> Option<Trigger<T>> {
        Some(Trigger {
            and_or: self.and_or()?,
            items: items(self)?,
            order: self.order()?,
            repeat: self.repeat()?,
        })
    }

    /// Every value must have been consumed by the record.
    fn finish<R>(mut self, record: Option<R>, op: &'static str) -> Result<R, SchemaViolation> {
        match record {
            Some(record) if self.0.next().is_none() => Ok(record),
            _ => Err(SchemaViolation::Mismatch { op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raymap_types::TileType;

    fn get_script() -> Script {
        Script {
            condition: Condition::Get(Trigger {
                and_or: AndOr::And,
                items: vec![1, 2],
                order: Order::InOrder,
                repeat: Repeat::Once,
            }),
            action: Action::Dialog("Hello there".into()),
        }
    }

    #[test]
    fn render_canonical() {
        assert_eq!(
            get_script().to_string(),
            "IF GET(AND; [1, 2]; IN_ORDER; ONCE) THEN DIALOG(Hello there)"
        );
        let script = Script {
            condition: Condition::TimeElapsed { ms: 5000 },
            action: Action::Win,
        };
        assert_eq!(script.to_string(), "IF TIME_ELAPSED(5000) THEN WIN()");
    }

    #[test]
    fn render_cells_and_spawns() {
        let script = Script {
            condition: Condition::Enter(Trigger {
                and_or: AndOr::Or,
                items: vec![Cell::new(1, 2), Cell::new(3, 4)],
                order: Order::AnyOrder,
                repeat: Repeat::Always,
            }),
            action: Action::Spawn(vec![Spawn {
                kind: TileType::ObjEnemyNormal,
                id: 9,
                cell: Cell::new(5, 6),
            }]),
        };
        assert_eq!(
            script.to_string(),
            "IF ENTER(OR; [{1.2}, {3.4}]; ANY_ORDER; ALWAYS) THEN SPAWN([{OBJ_ENEMY_NORMAL-9-5.6}])"
        );
    }

    #[test]
    fn fields_follow_schema() {
        let script = get_script();
        let kinds: Vec<FieldKind> = script.condition.fields().iter().map(FieldValue::kind).collect();
        assert_eq!(kinds, script.condition.op().schema());
        let kinds: Vec<FieldKind> = script.action.fields().iter().map(FieldValue::kind).collect();
        assert_eq!(kinds, script.action.op().schema());
    }

    #[test]
    fn from_fields_rebuilds_record() {
        let script = get_script();
        let condition =
            Condition::from_fields(script.condition.op(), script.condition.fields()).unwrap();
        let action = Action::from_fields(script.action.op(), script.action.fields()).unwrap();
        assert_eq!(Script { condition, action }, script);
    }

    #[test]
    fn from_fields_rejects_wrong_shape() {
        let err = Condition::from_fields(ConditionOp::TimeElapsed, vec![FieldValue::MapIndex(1)]);
        assert_eq!(err, Err(SchemaViolation::Mismatch { op: "TIME_ELAPSED" }));
        let err = Action::from_fields(
            ActionOp::Win,
            vec![FieldValue::Text("extra".into())],
        );
        assert_eq!(err, Err(SchemaViolation::Mismatch { op: "WIN" }));
        let err = Action::from_fields(ActionOp::Warp, vec![FieldValue::MapIndex(1)]);
        assert_eq!(err, Err(SchemaViolation::Mismatch { op: "WARP" }));
    }

    #[test]
    fn validate_rules() {
        assert!(get_script().validate().is_ok());

        let mut script = get_script();
        script.action = Action::Despawn(Vec::new());
        assert_eq!(
            script.validate(),
            Err(SchemaViolation::EmptyList { field: FieldKind::IdList })
        );

        script.action = Action::Open(vec![Cell::default(); 256]);
        assert_eq!(
            script.validate(),
            Err(SchemaViolation::ListTooLong { field: FieldKind::CellList, len: 256 })
        );

        script.action = Action::Spawn(vec![Spawn {
            kind: TileType::BgWall1,
            id: 0,
            cell: Cell::default(),
        }]);
        assert_eq!(
            script.validate(),
            Err(SchemaViolation::NotAnObject(TileType::BgWall1))
        );

        for bad in ["", " padded", "two\nlines", "a\rb", "caf\u{e9}"] {
            script.action = Action::Dialog(bad.into());
            assert!(
                matches!(script.validate(), Err(SchemaViolation::InvalidText { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn spawn_ids() {
        let mut script = get_script();
        assert_eq!(script.spawn_ids().count(), 0);
        script.action = Action::Spawn(vec![
            Spawn { kind: TileType::ObjItemKeyA, id: 4, cell: Cell::new(1, 1) },
            Spawn { kind: TileType::ObjEnemyBoss, id: 200, cell: Cell::new(2, 2) },
        ]);
        assert_eq!(script.spawn_ids().collect::<Vec<_>>(), vec![4, 200]);
    }
}
