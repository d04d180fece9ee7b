//! Tagged JSON trees emitted by the Cython front end
//!
//! Every node of the foreign tree is a JSON object whose `"__node__"` field
//! names its kind. [`read`] parses the document into a [`TaggedValue`] tree,
//! lifting that field out of the object so constructors only see payload
//! fields.

pub mod error;
mod value;

pub use error::ReadError;
pub use value::{TaggedObject, TaggedValue};

use serde::Deserialize;
use serde_json::Deserializer as JsonDeserializer;
use serde_stacker::Deserializer as StackedDeserializer;

/// Name of the discriminator field in the foreign tree
pub const DISCRIMINATOR: &str = "__node__";

/// Parse a JSON document into a tagged value tree
///
/// # Errors
///
/// Returns [`ReadError::Malformed`] when `text` is not valid JSON.
///
/// Nesting depth is unbounded: long operator chains nest one object per
/// operand, and the stack is grown on demand while reading them.
pub fn read(text: &str) -> Result<TaggedValue, ReadError> {
    let mut deserializer = JsonDeserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = TaggedValue::deserialize(StackedDeserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}
