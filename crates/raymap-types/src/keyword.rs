//! Enumerated script arguments. Each is written as its exact upper-case
//! keyword in script text and as its ordinal byte in binary scripts.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Whether every listed item (`AND`) or any one of them (`OR`) must trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, IntoStaticStr, Display, FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AndOr {
    And = 0,
    Or = 1,
}

/// Whether listed items must happen in the listed order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, IntoStaticStr, Display, FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Order {
    InOrder = 0,
    AnyOrder = 1,
}

/// Whether a script fires once or resets after firing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, IntoStaticStr, Display, FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Repeat {
    Once = 0,
    Always = 1,
}
