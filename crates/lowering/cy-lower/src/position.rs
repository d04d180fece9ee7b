//! Canonical positions from foreign `line`/`col` fields
//!
//! The front end reports 0-based columns, canonical columns are 1-based.
//! Definitions report the position of their keyword, so the bound name is
//! placed a fixed number of columns further right.

use cy_json::TaggedObject;
use cy_span::Position;

/// `def name`
pub(crate) const DEF_NAME_OFFSET: u32 = 4;
/// `class Name`
pub(crate) const PY_CLASS_NAME_OFFSET: u32 = 7;
/// `cdef class Name`, reported at `class`
pub(crate) const CDEF_CLASS_NAME_OFFSET: u32 = 6;
/// `struct Name`, `union Name`
pub(crate) const STRUCT_NAME_OFFSET: u32 = 6;
/// `enum Name`
pub(crate) const ENUM_NAME_OFFSET: u32 = 7;

/// Canonical position of a foreign node
///
/// `line` is copied and `col` is incremented by one. A missing or
/// non-numeric field leaves that half of the position unknown.
pub fn position_of(object: &TaggedObject) -> Position {
    let field = |name: &str| {
        object
            .field_int(name)
            .and_then(|value| u32::try_from(value).ok())
    };
    Position {
        line: field("line").unwrap_or(0),
        column: field("col").map_or(0, |col| col.saturating_add(1)),
    }
}

/// Position of a definition's name given the definition's own position
pub(crate) fn name_position(definition: Position, offset: u32) -> Position {
    if definition.column == 0 {
        return definition;
    }
    definition.shifted(offset)
}
