//! Binary script payloads.
//!
//! Layout, all integers big-endian:
//! - condition operator byte, then its fields in schema order
//! - action operator byte, then its fields in schema order
//!
//! Field encodings:
//! - keywords (`AND`/`OR`, order, repeat): ordinal byte
//! - id list: count `u8`, then one byte per id
//! - cell list: count `u8`, then `x y` per cell
//! - spawn list: count `u8`, then `type id x y` per spawn
//! - millis: `u32`
//! - map index: `u8`
//! - cell: `x y`
//! - text: length `u16`, then ASCII bytes

use raymap_types::{
    ActionOp, AndOr, Cell, ConditionOp, FieldKind, Order, Repeat, Spawn, TileType,
};

use crate::error::{FormatError, SchemaViolation};
use crate::script::{Action, Condition, FieldValue, Script};

/// Cursor over big-endian binary data.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if self.remaining() < n {
            return Err(FormatError::UnexpectedEof { offset: self.pos });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes(bytes.try_into().expect("2 bytes")))
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().expect("4 bytes")))
    }

    /// Everything not yet read.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos.min(self.data.len())..];
        self.pos = self.data.len();
        rest
    }

    fn read_cell(&mut self) -> Result<Cell, FormatError> {
        Ok(Cell::new(self.read_u8()?, self.read_u8()?))
    }

    fn read_tile_type(&mut self) -> Result<TileType, FormatError> {
        let offset = self.pos;
        let value = self.read_u8()?;
        TileType::from_repr(value).ok_or(FormatError::UnknownTileType { value, offset })
    }

    fn read_keyword<K>(
        &mut self,
        field: FieldKind,
        from_repr: fn(u8) -> Option<K>,
    ) -> Result<K, FormatError> {
        let offset = self.pos;
        let value = self.read_u8()?;
        from_repr(value).ok_or(FormatError::UnknownKeyword {
            field,
            value,
            offset,
        })
    }

    fn read_list<T>(
        &mut self,
        element: fn(&mut Self) -> Result<T, FormatError>,
    ) -> Result<Vec<T>, FormatError> {
        let count = self.read_u8()?;
        (0..count).map(|_| element(self)).collect()
    }

    fn read_spawn(&mut self) -> Result<Spawn, FormatError> {
        Ok(Spawn {
            kind: self.read_tile_type()?,
            id: self.read_u8()?,
            cell: self.read_cell()?,
        })
    }

    fn read_text(&mut self) -> Result<String, FormatError> {
        let len = self.read_u16()? as usize;
        let offset = self.pos;
        let bytes = self.read_bytes(len)?;
        if !bytes.is_ascii() {
            return Err(FormatError::InvalidText { offset });
        }
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }

    fn read_field(&mut self, kind: FieldKind) -> Result<FieldValue, FormatError> {
        Ok(match kind {
            FieldKind::AndOr => FieldValue::AndOr(self.read_keyword(kind, AndOr::from_repr)?),
            FieldKind::Order => FieldValue::Order(self.read_keyword(kind, Order::from_repr)?),
            FieldKind::Repeat => FieldValue::Repeat(self.read_keyword(kind, Repeat::from_repr)?),
            FieldKind::IdList => FieldValue::Ids(self.read_list(Self::read_u8)?),
            FieldKind::CellList => FieldValue::Cells(self.read_list(Self::read_cell)?),
            FieldKind::SpawnList => FieldValue::Spawns(self.read_list(Self::read_spawn)?),
            FieldKind::Millis => FieldValue::Millis(self.read_u32()?),
            FieldKind::MapIndex => FieldValue::MapIndex(self.read_u8()?),
            FieldKind::Cell => FieldValue::Cell(self.read_cell()?),
            FieldKind::Text => FieldValue::Text(self.read_text()?),
        })
    }

    fn read_fields(&mut self, schema: &[FieldKind]) -> Result<Vec<FieldValue>, FormatError> {
        schema.iter().map(|&kind| self.read_field(kind)).collect()
    }
}

fn write_count(out: &mut Vec<u8>, field: FieldKind, len: usize) -> Result<(), SchemaViolation> {
    let count = u8::try_from(len).map_err(|_| SchemaViolation::ListTooLong { field, len })?;
    out.push(count);
    Ok(())
}

fn write_cell(out: &mut Vec<u8>, cell: Cell) {
    out.extend_from_slice(&[cell.x, cell.y]);
}

fn write_field(out: &mut Vec<u8>, field: &FieldValue) -> Result<(), SchemaViolation> {
    let kind = field.kind();
    match field {
        FieldValue::AndOr(v) => out.push(*v as u8),
        FieldValue::Order(v) => out.push(*v as u8),
        FieldValue::Repeat(v) => out.push(*v as u8),
        FieldValue::Ids(ids) => {
            write_count(out, kind, ids.len())?;
            out.extend_from_slice(ids);
        }
        FieldValue::Cells(cells) => {
            write_count(out, kind, cells.len())?;
            for &cell in cells {
                write_cell(out, cell);
            }
        }
        FieldValue::Spawns(spawns) => {
            write_count(out, kind, spawns.len())?;
            for spawn in spawns {
                out.extend_from_slice(&[spawn.kind as u8, spawn.id]);
                write_cell(out, spawn.cell);
            }
        }
        FieldValue::Millis(ms) => out.extend_from_slice(&ms.to_be_bytes()),
        FieldValue::MapIndex(map) => out.push(*map),
        FieldValue::Cell(cell) => write_cell(out, *cell),
        FieldValue::Text(text) => {
            let len = u16::try_from(text.len()).map_err(|_| SchemaViolation::InvalidText {
                reason: "is longer than 65535 bytes",
            })?;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(text.as_bytes());
        }
    }
    Ok(())
}

impl Script {
    /// Encode to a binary payload. Invalid scripts are refused rather than
    /// written in a form that would not decode back.
    pub fn encode(&self) -> Result<Vec<u8>, SchemaViolation> {
        self.validate()?;
        let mut out = Vec::new();
        out.push(self.condition.op() as u8);
        for field in &self.condition.fields() {
            write_field(&mut out, field)?;
        }
        out.push(self.action.op() as u8);
        for field in &self.action.fields() {
            write_field(&mut out, field)?;
        }
        Ok(out)
    }

    /// Decode a complete binary payload; every byte must be consumed.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let mut r = ByteReader::new(data);

        let offset = r.position();
        let value = r.read_u8()?;
        let op = ConditionOp::from_repr(value)
            .ok_or(FormatError::UnknownOperator { value, offset })?;
        let condition = Condition::from_fields(op, r.read_fields(op.schema())?)?;

        let offset = r.position();
        let value = r.read_u8()?;
        let op = ActionOp::from_repr(value).ok_or(FormatError::UnknownOperator { value, offset })?;
        let action = Action::from_fields(op, r.read_fields(op.schema())?)?;

        if !r.is_empty() {
            return Err(FormatError::TrailingBytes {
                count: r.remaining(),
            });
        }

        let script = Script { condition, action };
        script.validate()?;
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Trigger;

    #[test]
    fn time_elapsed_win_bytes() {
        let script: Script = "IF TIME_ELAPSED(5000) THEN WIN()".parse().unwrap();
        let bytes = script.encode().unwrap();
        assert_eq!(bytes, [0x06, 0x00, 0x00, 0x13, 0x88, 0x0D]);
        assert_eq!(Script::decode(&bytes), Ok(script));
    }

    #[test]
    fn get_dialog_bytes() {
        let script: Script = "IF GET(AND; [1, 2]; IN_ORDER; ONCE) THEN DIALOG(Hi)"
            .parse()
            .unwrap();
        let bytes = script.encode().unwrap();
        assert_eq!(
            bytes,
            [0x02, 0x00, 0x02, 0x01, 0x02, 0x00, 0x00, 0x0B, 0x00, 0x02, b'H', b'i']
        );
    }

    #[test]
    fn cells_spawns_and_warp_bytes() {
        let script = Script {
            condition: Condition::Enter(Trigger {
                and_or: AndOr::Or,
                items: vec![Cell::new(3, 4)],
                order: Order::AnyOrder,
                repeat: Repeat::Always,
            }),
            action: Action::Spawn(vec![Spawn {
                kind: TileType::ObjEnemyNormal,
                id: 9,
                cell: Cell::new(5, 6),
            }]),
        };
        let bytes = script.encode().unwrap();
        assert_eq!(
            bytes,
            [0x05, 0x01, 0x01, 0x03, 0x04, 0x01, 0x01, 0x09, 0x01, 0xA2, 0x09, 0x05, 0x06]
        );
        assert_eq!(Script::decode(&bytes), Ok(script));

        let warp: Script = "IF TIME_ELAPSED(1) THEN WARP(2; {7.8})".parse().unwrap();
        let bytes = warp.encode().unwrap();
        assert_eq!(&bytes[5..], [0x0C, 0x02, 0x07, 0x08]);
    }

    #[test]
    fn encode_refuses_invalid() {
        let script = Script {
            condition: Condition::TimeElapsed { ms: 1 },
            action: Action::Despawn(Vec::new()),
        };
        assert_eq!(
            script.encode(),
            Err(SchemaViolation::EmptyList {
                field: FieldKind::IdList
            })
        );
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            Script::decode(&[]),
            Err(FormatError::UnexpectedEof { offset: 0 })
        );
        assert_eq!(
            Script::decode(&[0x06, 0x00, 0x00]),
            Err(FormatError::UnexpectedEof { offset: 1 })
        );
        assert_eq!(
            Script::decode(&[0x07, 0x0D]),
            Err(FormatError::UnknownOperator {
                value: 0x07,
                offset: 0
            })
        );
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x06]),
            Err(FormatError::UnknownOperator {
                value: 0x06,
                offset: 5
            })
        );
        assert_eq!(
            Script::decode(&[0x02, 0x02, 0x01, 0x01, 0x00, 0x00, 0x0D]),
            Err(FormatError::UnknownKeyword {
                field: FieldKind::AndOr,
                value: 2,
                offset: 1
            })
        );
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x0D, 0xFF]),
            Err(FormatError::TrailingBytes { count: 1 })
        );
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x09, 0x01, 0xFE, 0x01, 0x01, 0x01]),
            Err(FormatError::UnknownTileType {
                value: 0xFE,
                offset: 7
            })
        );
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x0B, 0x00, 0x01, 0xE9]),
            Err(FormatError::InvalidText { offset: 8 })
        );
    }

    #[test]
    fn dialog_with_tab_decodes() {
        let bytes = [0x06, 0, 0, 0, 1, 0x0B, 0x00, 0x03, b'a', b'\t', b'b'];
        let script = Script::decode(&bytes).expect("decode");
        assert_eq!(script.action, Action::Dialog("a\tb".into()));
        assert_eq!(script.encode().unwrap(), bytes);
    }

    #[test]
    fn decode_validates() {
        // Empty id list.
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x0A, 0x00]),
            Err(FormatError::Invalid(SchemaViolation::EmptyList {
                field: FieldKind::IdList
            }))
        );
        // Background tile spawned.
        assert_eq!(
            Script::decode(&[0x06, 0, 0, 0, 1, 0x09, 0x01, 0x41, 0x01, 0x01, 0x01]),
            Err(FormatError::Invalid(SchemaViolation::NotAnObject(
                TileType::BgWall1
            )))
        );
    }

    #[test]
    fn reader_cursor() {
        let mut r = ByteReader::new(&[0x01, 0x00, 0x02, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE]);
        assert_eq!(r.read_u8(), Ok(1));
        assert_eq!(r.read_u16(), Ok(2));
        assert_eq!(r.position(), 3);
        assert_eq!(r.read_u32(), Ok(0xAABB_CCDD));
        assert_eq!(r.remaining(), 1);
        assert_eq!(r.read_u16(), Err(FormatError::UnexpectedEof { offset: 7 }));
        assert_eq!(r.rest(), [0xEE]);
        assert!(r.is_empty());
    }
}
