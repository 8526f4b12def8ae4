//! Shape reference resolution
//!
//! Shape ids resolve against the owning document, except for the Smithy
//! prelude primitives (`smithy.api#String`, `smithy.api#Unit`, ...) which are
//! never present in a document and are served from a fixed table.

use super::types::{
    OperationShape, ResourceShape, SchemaDocument, Shape, ShapeKind, SimpleShape, Traits,
};
use api_catalog_common::{CatalogError, Result};

const PRELUDE_NAMESPACE: &str = "smithy.api";

const PRIMITIVE: SimpleShape = SimpleShape {
    traits: Traits::new(),
};

static STRING: Shape = Shape::String(PRIMITIVE);
static BOOLEAN: Shape = Shape::Boolean(PRIMITIVE);
static BYTE: Shape = Shape::Byte(PRIMITIVE);
static SHORT: Shape = Shape::Short(PRIMITIVE);
static INTEGER: Shape = Shape::Integer(PRIMITIVE);
static LONG: Shape = Shape::Long(PRIMITIVE);
static FLOAT: Shape = Shape::Float(PRIMITIVE);
static DOUBLE: Shape = Shape::Double(PRIMITIVE);
static BIG_INTEGER: Shape = Shape::BigInteger(PRIMITIVE);
static BIG_DECIMAL: Shape = Shape::BigDecimal(PRIMITIVE);
static TIMESTAMP: Shape = Shape::Timestamp(PRIMITIVE);
static BLOB: Shape = Shape::Blob(PRIMITIVE);
static DOCUMENT: Shape = Shape::Document(PRIMITIVE);
static UNIT: Shape = Shape::Unit(PRIMITIVE);

/// Id of the prelude unit shape, used when an operation declares no input
pub const UNIT_SHAPE_ID: &str = "smithy.api#Unit";

/// Look up a prelude primitive by shape id, ignoring case
pub fn builtin_shape(shape_id: &str) -> Option<&'static Shape> {
    let (namespace, name) = shape_id.split_once('#')?;
    if !namespace.eq_ignore_ascii_case(PRELUDE_NAMESPACE) {
        return None;
    }

    let shape = match name.to_ascii_lowercase().as_str() {
        "string" => &STRING,
        "boolean" | "primitiveboolean" => &BOOLEAN,
        "byte" | "primitivebyte" => &BYTE,
        "short" | "primitiveshort" => &SHORT,
        "integer" | "primitiveinteger" => &INTEGER,
        "long" | "primitivelong" => &LONG,
        "float" | "primitivefloat" => &FLOAT,
        "double" | "primitivedouble" => &DOUBLE,
        "biginteger" => &BIG_INTEGER,
        "bigdecimal" => &BIG_DECIMAL,
        "timestamp" => &TIMESTAMP,
        "blob" => &BLOB,
        "document" => &DOCUMENT,
        "unit" => &UNIT,
        _ => return None,
    };
    Some(shape)
}

/// Resolves shape ids against a single schema document
#[derive(Debug, Clone, Copy)]
pub struct ShapeResolver<'a> {
    document: &'a SchemaDocument,
}

impl<'a> ShapeResolver<'a> {
    pub fn new(document: &'a SchemaDocument) -> Self {
        Self { document }
    }

    /// Resolve a shape id, preferring the prelude table over the document
    pub fn resolve(&self, shape_id: &str) -> Result<&'a Shape> {
        builtin_shape(shape_id)
            .or_else(|| self.document.shapes.get(shape_id))
            .ok_or_else(|| CatalogError::ShapeNotFound {
                id: shape_id.to_string(),
            })
    }

    /// Resolve a shape id and require a shape that can be used as a value
    pub fn resolve_value(&self, shape_id: &str) -> Result<&'a Shape> {
        let shape = self.resolve(shape_id)?;
        assert_is_value_shape(shape_id, shape)
    }

    /// Resolve a shape id that must name an operation
    pub fn resolve_operation(&self, shape_id: &str) -> Result<&'a OperationShape> {
        match self.resolve(shape_id)? {
            Shape::Operation(operation) => Ok(operation),
            other => Err(mismatch(ShapeKind::Operation, shape_id, other)),
        }
    }

    /// Resolve a shape id that must name a resource
    pub fn resolve_resource(&self, shape_id: &str) -> Result<&'a ResourceShape> {
        match self.resolve(shape_id)? {
            Shape::Resource(resource) => Ok(resource),
            other => Err(mismatch(ShapeKind::Resource, shape_id, other)),
        }
    }
}

/// Require `shape` to carry the `expected` tag
pub fn assert_kind<'s>(
    expected: ShapeKind,
    shape_id: &str,
    shape: &'s Shape,
) -> Result<&'s Shape> {
    if shape.kind() == expected {
        Ok(shape)
    } else {
        Err(mismatch(expected, shape_id, shape))
    }
}

fn mismatch(expected: ShapeKind, shape_id: &str, shape: &Shape) -> CatalogError {
    CatalogError::TypeMismatch {
        id: shape_id.to_string(),
        expected: expected.to_string(),
        actual: shape.kind().to_string(),
    }
}

/// Require `shape` to be usable as a member, list element or map entry
pub fn assert_is_value_shape<'s>(shape_id: &str, shape: &'s Shape) -> Result<&'s Shape> {
    let kind = shape.kind();
    if kind.is_value() {
        Ok(shape)
    } else {
        Err(CatalogError::NotAValue {
            id: shape_id.to_string(),
            kind: kind.to_string(),
        })
    }
}
