//! Parsers for individual argument tokens.
//!
//! Argument lists are two-level: the outer `(...)` is split on `;` into
//! fields, and each field then has its own syntax (`[a, b]` lists, `{x.y}`
//! cells, `{TYPE-id-x.y}` spawns, keywords, integers, free text). Every
//! parser here returns `None` rather than an error so that the compiler can
//! decide how a bad or missing token is reported.

use std::str::FromStr;

use raymap_types::Cell;
use winnow::ascii::{digit1, space0};
use winnow::combinator::{delimited, separated, separated_pair};
use winnow::prelude::*;
use winnow::token::take_while;

/// A spawn token whose type name has not been resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSpawn<'i> {
    pub name: &'i str,
    pub id: u8,
    pub cell: Cell,
}

// Leading zeros are allowed, so `07` and `{10.05}` parse.
fn byte(input: &mut &str) -> ModalResult<u8> {
    delimited(space0, digit1.parse_to(), space0).parse_next(input)
}

fn millis(input: &mut &str) -> ModalResult<u32> {
    delimited(space0, digit1.parse_to(), space0).parse_next(input)
}

fn cell(input: &mut &str) -> ModalResult<Cell> {
    let (x, y) = delimited(
        (space0, '{'),
        separated_pair(byte, '.', byte),
        ('}', space0),
    )
    .parse_next(input)?;
    Ok(Cell::new(x, y))
}

fn type_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn raw_spawn<'i>(input: &mut &'i str) -> ModalResult<RawSpawn<'i>> {
    let (name, _, _, id, _, x, _, y) = delimited(
        (space0, '{', space0),
        (type_name, space0, '-', byte, '-', byte, '.', byte),
        ('}', space0),
    )
    .parse_next(input)?;
    Ok(RawSpawn {
        name,
        id,
        cell: Cell::new(x, y),
    })
}

fn list<'i, O>(
    input: &mut &'i str,
    element: fn(&mut &'i str) -> ModalResult<O>,
) -> ModalResult<Vec<O>> {
    delimited(
        (space0, '['),
        separated(0.., element, ','),
        (space0, ']', space0),
    )
    .parse_next(input)
}

fn id_list(input: &mut &str) -> ModalResult<Vec<u8>> {
    list(input, byte)
}

fn cell_list(input: &mut &str) -> ModalResult<Vec<Cell>> {
    list(input, cell)
}

fn spawn_list<'i>(input: &mut &'i str) -> ModalResult<Vec<RawSpawn<'i>>> {
    list(input, raw_spawn)
}

/// Decimal `0..=255`, surrounding whitespace allowed.
pub fn parse_u8(token: &str) -> Option<u8> {
    byte.parse(token).ok()
}

/// Decimal `0..=u32::MAX`, surrounding whitespace allowed.
pub fn parse_u32(token: &str) -> Option<u32> {
    millis.parse(token).ok()
}

/// `{x.y}`
pub fn parse_cell(token: &str) -> Option<Cell> {
    cell.parse(token).ok()
}

/// `[id, ...]`; an empty list parses.
pub fn parse_id_list(token: &str) -> Option<Vec<u8>> {
    id_list.parse(token).ok()
}

/// `[{x.y}, ...]`; an empty list parses.
pub fn parse_cell_list(token: &str) -> Option<Vec<Cell>> {
    cell_list.parse(token).ok()
}

/// `[{TYPE-id-x.y}, ...]`; type names are left for the caller to resolve.
pub fn parse_spawn_list(token: &str) -> Option<Vec<RawSpawn<'_>>> {
    spawn_list.parse(token).ok()
}

/// Exact, case-sensitive keyword such as `AND` or `IN_ORDER`.
pub fn parse_keyword<K: FromStr>(token: &str) -> Option<K> {
    token.trim().parse().ok()
}

/// Trimmed free text; `None` when nothing but whitespace remains.
pub fn parse_text(token: &str) -> Option<&str> {
    let text = token.trim();
    (!text.is_empty()).then_some(text)
}

/// Strip the outer parentheses of an argument list and split it into at most
/// `fields` `;`-separated tokens. The last token keeps any further `;`, which
/// lets a trailing text field contain them.
///
/// An empty argument list yields no tokens; `None` means the parentheses are
/// missing.
pub fn split_args(args: &str, fields: usize) -> Option<Vec<&str>> {
    let inner = args.trim().strip_prefix('(')?.strip_suffix(')')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    Some(inner.splitn(fields.max(1), ';').map(str::trim).collect())
}
