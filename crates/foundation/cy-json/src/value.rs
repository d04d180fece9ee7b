//! The tagged value tree

use crate::DISCRIMINATOR;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Number;
use std::fmt;

/// A JSON value from the foreign tree
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<TaggedValue>),
    /// JSON object, with its discriminator lifted out
    Object(TaggedObject),
}

/// A JSON object with an optional discriminator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggedObject {
    tag: Option<String>,
    fields: IndexMap<String, TaggedValue>,
}

impl TaggedValue {
    /// Whether this value spells "no node"
    ///
    /// The front end writes absent children either as `null` or as the
    /// string `"None"`.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(text) => text == "None",
            _ => false,
        }
    }

    /// The object payload, if this is an object
    pub fn as_object(&self) -> Option<&TaggedObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The elements, if this is an array
    pub fn as_array(&self) -> Option<&[TaggedValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The text, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Integer value of a number or of a string holding a decimal integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            Self::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Short name of the JSON type, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Render as indented JSON, discriminator first
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|err| format!("<unprintable: {err}>"))
    }
}

impl TaggedObject {
    /// Creates an object with the given discriminator and no fields
    pub fn new(tag: Option<String>) -> Self {
        Self {
            tag,
            fields: IndexMap::new(),
        }
    }

    /// Adds or replaces a field, keeping the original insertion slot
    pub fn insert(&mut self, name: impl Into<String>, value: TaggedValue) {
        self.fields.insert(name.into(), value);
    }

    /// The discriminator naming this node's kind
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether the discriminator equals `tag`
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    /// Raw field lookup
    pub fn get(&self, name: &str) -> Option<&TaggedValue> {
        self.fields.get(name)
    }

    /// A field that is present and does not spell absence
    pub fn present(&self, name: &str) -> Option<&TaggedValue> {
        self.get(name).filter(|value| !value.is_absent())
    }

    /// A field holding a nested object
    pub fn field_object(&self, name: &str) -> Option<&TaggedObject> {
        self.get(name).and_then(TaggedValue::as_object)
    }

    /// A field holding a string
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TaggedValue::as_str)
    }

    /// A field holding an integer, either as a number or as decimal text
    pub fn field_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(TaggedValue::as_int)
    }

    /// A field holding the front end's textual `True`
    pub fn field_flag(&self, name: &str) -> bool {
        self.field_str(name) == Some("True")
    }

    /// Fields in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &TaggedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<TaggedObject> for TaggedValue {
    fn from(object: TaggedObject) -> Self {
        Self::Object(object)
    }
}

impl<'de> Deserialize<'de> for TaggedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TaggedValueVisitor)
    }
}

struct TaggedValueVisitor;

impl<'de> Visitor<'de> for TaggedValueVisitor {
    type Value = TaggedValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<TaggedValue, E> {
        Ok(TaggedValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<TaggedValue, E> {
        Ok(TaggedValue::Number(value.into()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<TaggedValue, E> {
        Ok(TaggedValue::Number(value.into()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<TaggedValue, E> {
        Ok(Number::from_f64(value).map_or(TaggedValue::Null, TaggedValue::Number))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TaggedValue, E> {
        Ok(TaggedValue::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<TaggedValue, E> {
        Ok(TaggedValue::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<TaggedValue, E> {
        Ok(TaggedValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<TaggedValue, E> {
        Ok(TaggedValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<TaggedValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<TaggedValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(TaggedValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<TaggedValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = TaggedObject::default();
        while let Some(name) = map.next_key::<String>()? {
            let value: TaggedValue = map.next_value()?;
            match value {
                TaggedValue::String(tag) if name == DISCRIMINATOR => object.tag = Some(tag),
                other => object.insert(name, other),
            }
        }
        Ok(TaggedValue::Object(object))
    }
}

impl Serialize for TaggedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(number) => number.serialize(serializer),
            Self::String(text) => serializer.serialize_str(text),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(object) => object.serialize(serializer),
        }
    }
}

impl Serialize for TaggedObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra = usize::from(self.tag.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        if let Some(tag) = &self.tag {
            map.serialize_entry(DISCRIMINATOR, tag)?;
        }
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
