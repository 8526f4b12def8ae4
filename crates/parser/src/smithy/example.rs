//! Example request synthesis
//!
//! Produces a human-editable placeholder value for a shape. Leaf values are
//! named after the member they fill, so a `TableName` string member becomes
//! `"TableName"` and a `Body` blob becomes `"BodyData"`.
//!
//! Recursive shapes are cut at the first repeat: a shape that is already
//! being synthesized further up the stack is omitted from structures, and
//! produces an empty list, map or union.

use super::resolver::ShapeResolver;
use super::types::{traits, ListShape, MapShape, Shape, StructureShape};
use api_catalog_common::{CatalogError, Result};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

/// Placeholder used for every numeric shape
const EXAMPLE_NUMBER: i64 = 123;

/// Placeholder used for every timestamp shape
const EXAMPLE_TIMESTAMP: &str = "2000-01-01T00:00:00Z";

/// Synthesizes example values for shapes of one document
#[derive(Debug)]
pub struct ExampleSynthesizer<'a> {
    resolver: ShapeResolver<'a>,

    /// Shapes on the active synthesis path
    active: HashSet<String>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(resolver: ShapeResolver<'a>) -> Self {
        Self {
            resolver,
            active: HashSet::new(),
        }
    }

    /// Synthesize an example for the shape `shape_id`, naming leaves after `name`
    pub fn synthesize(&mut self, shape_id: &str, name: &str) -> Result<Value> {
        let shape = self.resolver.resolve_value(shape_id)?;
        self.synthesize_shape(shape_id, shape, name)
    }

    /// Whether `shape_id` is currently being synthesized
    pub fn is_active(&self, shape_id: &str) -> bool {
        self.active.contains(shape_id)
    }

    fn enter(&mut self, shape_id: &str) -> RecursionGuard<'_, 'a> {
        let inserted = self.active.insert(shape_id.to_string());
        RecursionGuard {
            synthesizer: self,
            shape_id: inserted.then(|| shape_id.to_string()),
        }
    }

    fn synthesize_shape(&mut self, shape_id: &str, shape: &'a Shape, name: &str) -> Result<Value> {
        let mut guard = self.enter(shape_id);
        guard.synthesize_value(shape_id, shape, name)
    }

    fn synthesize_value(&mut self, shape_id: &str, shape: &'a Shape, name: &str) -> Result<Value> {
        let value = match shape {
            Shape::Structure(structure) => self.synthesize_structure(structure)?,
            Shape::Union(union) => self.synthesize_union(union, name)?,
            Shape::List(list) | Shape::Set(list) => self.synthesize_list(list, name)?,
            Shape::Map(map) => self.synthesize_map(map, name)?,
            Shape::Enum(enum_shape) => enum_shape
                .members
                .first()
                .and_then(|(_, member_ref)| member_ref.traits.get(traits::ENUM_VALUE))
                .cloned()
                .unwrap_or_else(|| Value::String(name.to_string())),
            Shape::IntEnum(enum_shape) => enum_shape
                .members
                .first()
                .and_then(|(_, member_ref)| member_ref.traits.get(traits::ENUM_VALUE))
                .cloned()
                .unwrap_or_else(|| json!(EXAMPLE_NUMBER)),
            Shape::String(_) | Shape::Document(_) => Value::String(name.to_string()),
            Shape::Boolean(_) => Value::Bool(true),
            Shape::Byte(_)
            | Shape::Short(_)
            | Shape::Integer(_)
            | Shape::Long(_)
            | Shape::Float(_)
            | Shape::Double(_)
            | Shape::BigInteger(_)
            | Shape::BigDecimal(_) => json!(EXAMPLE_NUMBER),
            Shape::Timestamp(_) => Value::String(EXAMPLE_TIMESTAMP.to_string()),
            Shape::Blob(_) => Value::String(format!("{}Data", name)),
            Shape::Unit(_) => Value::Object(Map::new()),
            Shape::Service(_) | Shape::Resource(_) | Shape::Operation(_) => {
                return Err(CatalogError::InternalInvariant(format!(
                    "cannot synthesize an example for {} shape {}",
                    shape.kind(),
                    shape_id
                )));
            }
        };
        Ok(value)
    }

    fn synthesize_structure(&mut self, structure: &'a StructureShape) -> Result<Value> {
        let mut object = Map::new();
        for (member, member_ref) in &structure.members {
            let target = self.resolver.resolve_value(&member_ref.target)?;
            if self.is_active(&member_ref.target) {
                continue;
            }
            let value = self.synthesize_shape(&member_ref.target, target, member)?;
            object.insert(member.clone(), value);
        }
        Ok(Value::Object(object))
    }

    /// A union stands in for its first declared variant, unwrapped
    fn synthesize_union(&mut self, union: &'a StructureShape, name: &str) -> Result<Value> {
        let Some((_, member_ref)) = union.members.first() else {
            return Ok(Value::Object(Map::new()));
        };
        let target = self.resolver.resolve_value(&member_ref.target)?;
        if self.is_active(&member_ref.target) {
            return Ok(Value::Object(Map::new()));
        }
        self.synthesize_shape(&member_ref.target, target, name)
    }

    fn synthesize_list(&mut self, list: &'a ListShape, name: &str) -> Result<Value> {
        let element = self.resolver.resolve_value(&list.member.target)?;
        if self.is_active(&list.member.target) {
            return Ok(Value::Array(Vec::new()));
        }
        let value = self.synthesize_shape(&list.member.target, element, name)?;
        Ok(Value::Array(vec![value]))
    }

    fn synthesize_map(&mut self, map: &'a MapShape, name: &str) -> Result<Value> {
        let key_shape = self.resolver.resolve_value(&map.key.target)?;
        let value_shape = self.resolver.resolve_value(&map.value.target)?;
        if self.is_active(&map.value.target) {
            return Ok(Value::Object(Map::new()));
        }

        let key = self.synthesize_shape(&map.key.target, key_shape, &format!("{}Key", name))?;
        let value =
            self.synthesize_shape(&map.value.target, value_shape, &format!("{}Value", name))?;

        let mut object = Map::new();
        object.insert(object_key(key), value);
        Ok(Value::Object(object))
    }
}

/// Render a synthesized map key as a JSON object key
///
/// String keys are used verbatim; anything else falls back to its compact
/// JSON text so the result stays deterministic.
fn object_key(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Keeps a shape on the active path for as long as it is alive
struct RecursionGuard<'g, 'a> {
    synthesizer: &'g mut ExampleSynthesizer<'a>,

    /// Set only when this guard added the id
    shape_id: Option<String>,
}

impl<'a> Deref for RecursionGuard<'_, 'a> {
    type Target = ExampleSynthesizer<'a>;

    fn deref(&self) -> &Self::Target {
        self.synthesizer
    }
}

impl DerefMut for RecursionGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.synthesizer
    }
}

impl Drop for RecursionGuard<'_, '_> {
    fn drop(&mut self) {
        if let Some(shape_id) = self.shape_id.take() {
            self.synthesizer.active.remove(&shape_id);
        }
    }
}
