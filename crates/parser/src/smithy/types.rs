//! Smithy JSON AST type definitions
//!
//! These types represent the structure of Smithy JSON files. Member
//! collections use ordered maps: the first declared member of a union or
//! enum is significant during example synthesis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Trait annotations keyed by trait shape id
pub type Traits = BTreeMap<String, serde_json::Value>;

/// Root Smithy model document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Smithy version (e.g., "2.0")
    #[serde(default)]
    pub smithy: Option<String>,

    /// Shape definitions keyed by absolute shape id
    #[serde(default)]
    pub shapes: IndexMap<String, Shape>,

    /// Metadata about the model
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// A Smithy shape, discriminated by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Service(ServiceShape),
    Resource(ResourceShape),
    Operation(OperationShape),
    Structure(StructureShape),
    List(ListShape),
    /// Smithy 1.0 set, treated as a list
    Set(ListShape),
    Map(MapShape),
    Union(StructureShape),
    Enum(EnumShape),
    IntEnum(EnumShape),
    String(SimpleShape),
    Boolean(SimpleShape),
    Byte(SimpleShape),
    Short(SimpleShape),
    Integer(SimpleShape),
    Long(SimpleShape),
    Float(SimpleShape),
    Double(SimpleShape),
    BigInteger(SimpleShape),
    BigDecimal(SimpleShape),
    Timestamp(SimpleShape),
    Blob(SimpleShape),
    Document(SimpleShape),
    /// Only produced by the prelude; documents target `smithy.api#Unit`
    Unit(SimpleShape),
}

/// Reference to another shape, optionally annotated with traits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRef {
    /// Target shape ID (e.g., "com.amazonaws.s3#Bucket")
    pub target: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: Traits,
}

/// A shape with no members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleShape {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: Traits,
}

/// Service definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceShape {
    /// API version
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub operations: Vec<ShapeRef>,

    #[serde(default)]
    pub resources: Vec<ShapeRef>,

    #[serde(default)]
    pub errors: Vec<ShapeRef>,

    #[serde(default)]
    pub traits: Traits,
}

/// Resource definition (e.g., DynamoDB Table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceShape {
    #[serde(default)]
    pub identifiers: IndexMap<String, ShapeRef>,

    #[serde(default)]
    pub create: Option<ShapeRef>,

    #[serde(default)]
    pub put: Option<ShapeRef>,

    #[serde(default)]
    pub read: Option<ShapeRef>,

    #[serde(default)]
    pub update: Option<ShapeRef>,

    #[serde(default)]
    pub delete: Option<ShapeRef>,

    #[serde(default)]
    pub list: Option<ShapeRef>,

    /// Instance operations
    #[serde(default)]
    pub operations: Vec<ShapeRef>,

    #[serde(default)]
    pub collection_operations: Vec<ShapeRef>,

    #[serde(default)]
    pub resources: Vec<ShapeRef>,

    #[serde(default)]
    pub traits: Traits,
}

/// Operation definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationShape {
    /// Input shape; absent means `smithy.api#Unit`
    #[serde(default)]
    pub input: Option<ShapeRef>,

    #[serde(default)]
    pub output: Option<ShapeRef>,

    #[serde(default)]
    pub errors: Vec<ShapeRef>,

    #[serde(default)]
    pub traits: Traits,
}

/// Structure or union definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureShape {
    /// Members in declaration order
    #[serde(default)]
    pub members: IndexMap<String, ShapeRef>,

    #[serde(default)]
    pub traits: Traits,
}

/// List (or set) definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListShape {
    pub member: ShapeRef,

    #[serde(default)]
    pub traits: Traits,
}

/// Map definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapShape {
    pub key: ShapeRef,
    pub value: ShapeRef,

    #[serde(default)]
    pub traits: Traits,
}

/// Enum or intEnum definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumShape {
    /// Variants in declaration order, each carrying its `enumValue` trait
    #[serde(default)]
    pub members: IndexMap<String, ShapeRef>,

    #[serde(default)]
    pub traits: Traits,
}

/// The tag of a shape, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Service,
    Resource,
    Operation,
    Structure,
    List,
    Set,
    Map,
    Union,
    Enum,
    IntEnum,
    String,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Timestamp,
    Blob,
    Document,
    Unit,
}

impl ShapeKind {
    /// The `type` tag used in the JSON AST
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Service => "service",
            ShapeKind::Resource => "resource",
            ShapeKind::Operation => "operation",
            ShapeKind::Structure => "structure",
            ShapeKind::List => "list",
            ShapeKind::Set => "set",
            ShapeKind::Map => "map",
            ShapeKind::Union => "union",
            ShapeKind::Enum => "enum",
            ShapeKind::IntEnum => "intEnum",
            ShapeKind::String => "string",
            ShapeKind::Boolean => "boolean",
            ShapeKind::Byte => "byte",
            ShapeKind::Short => "short",
            ShapeKind::Integer => "integer",
            ShapeKind::Long => "long",
            ShapeKind::Float => "float",
            ShapeKind::Double => "double",
            ShapeKind::BigInteger => "bigInteger",
            ShapeKind::BigDecimal => "bigDecimal",
            ShapeKind::Timestamp => "timestamp",
            ShapeKind::Blob => "blob",
            ShapeKind::Document => "document",
            ShapeKind::Unit => "unit",
        }
    }

    /// Whether shapes of this kind may appear as members, list elements or
    /// map keys and values
    pub fn is_value(&self) -> bool {
        !matches!(
            self,
            ShapeKind::Service | ShapeKind::Resource | ShapeKind::Operation
        )
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Service(_) => ShapeKind::Service,
            Shape::Resource(_) => ShapeKind::Resource,
            Shape::Operation(_) => ShapeKind::Operation,
            Shape::Structure(_) => ShapeKind::Structure,
            Shape::List(_) => ShapeKind::List,
            Shape::Set(_) => ShapeKind::Set,
            Shape::Map(_) => ShapeKind::Map,
            Shape::Union(_) => ShapeKind::Union,
            Shape::Enum(_) => ShapeKind::Enum,
            Shape::IntEnum(_) => ShapeKind::IntEnum,
            Shape::String(_) => ShapeKind::String,
            Shape::Boolean(_) => ShapeKind::Boolean,
            Shape::Byte(_) => ShapeKind::Byte,
            Shape::Short(_) => ShapeKind::Short,
            Shape::Integer(_) => ShapeKind::Integer,
            Shape::Long(_) => ShapeKind::Long,
            Shape::Float(_) => ShapeKind::Float,
            Shape::Double(_) => ShapeKind::Double,
            Shape::BigInteger(_) => ShapeKind::BigInteger,
            Shape::BigDecimal(_) => ShapeKind::BigDecimal,
            Shape::Timestamp(_) => ShapeKind::Timestamp,
            Shape::Blob(_) => ShapeKind::Blob,
            Shape::Document(_) => ShapeKind::Document,
            Shape::Unit(_) => ShapeKind::Unit,
        }
    }
}

impl ShapeRef {
    /// Local name of the referenced shape
    pub fn local_name(&self) -> &str {
        local_name(&self.target)
    }
}

/// Extract the local name from an absolute shape id
/// e.g., "com.amazonaws.dynamodb#PutItem" -> "PutItem"
pub fn local_name(shape_id: &str) -> &str {
    shape_id
        .rsplit_once('#')
        .map_or(shape_id, |(_, name)| name)
}

/// Common Smithy trait names
pub mod traits {
    pub const DOCUMENTATION: &str = "smithy.api#documentation";
    pub const TITLE: &str = "smithy.api#title";
    pub const ENUM_VALUE: &str = "smithy.api#enumValue";
    pub const AWS_DOCUMENTATION: &str = "aws.api#documentation";
    pub const AWS_SERVICE: &str = "aws.api#service";

    /// Field of the `aws.api#service` trait holding the SDK client id
    pub const SDK_ID: &str = "sdkId";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("com.amazonaws.dynamodb#PutItem"), "PutItem");
        assert_eq!(local_name("NoNamespace"), "NoNamespace");
    }

    #[test]
    fn test_deserialize_tagged_shapes() {
        let json = r#"{
            "type": "structure",
            "members": {
                "Zeta": { "target": "smithy.api#String" },
                "Alpha": { "target": "smithy.api#Integer" }
            }
        }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Structure);

        let Shape::Structure(structure) = shape else {
            panic!("expected structure");
        };
        let names: Vec<_> = structure.members.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_deserialize_camel_case_tags() {
        let shape: Shape = serde_json::from_str(r#"{ "type": "intEnum" }"#).unwrap();
        assert_eq!(shape.kind(), ShapeKind::IntEnum);

        let shape: Shape = serde_json::from_str(r#"{ "type": "bigDecimal" }"#).unwrap();
        assert_eq!(shape.kind().to_string(), "bigDecimal");
    }

    #[test]
    fn test_resource_collection_operations() {
        let json = r#"{
            "type": "resource",
            "read": { "target": "com.example#GetThing" },
            "collectionOperations": [ { "target": "com.example#BatchGetThings" } ]
        }"#;
        let Shape::Resource(resource) = serde_json::from_str(json).unwrap() else {
            panic!("expected resource");
        };
        assert_eq!(resource.read.unwrap().local_name(), "GetThing");
        assert_eq!(resource.collection_operations.len(), 1);
    }

    #[test]
    fn test_value_kinds() {
        assert!(ShapeKind::Structure.is_value());
        assert!(ShapeKind::Unit.is_value());
        assert!(!ShapeKind::Operation.is_value());
        assert!(!ShapeKind::Service.is_value());
    }
}
