//! Smithy specification parser and compiler
//!
//! Parses Smithy JSON AST documents and compiles them into catalog services.
//!
//! Smithy specs are available at: https://github.com/aws/api-models-aws
//!
//! ## Format
//! Smithy JSON AST contains:
//! - Service definitions with resources and operations
//! - Shape definitions (structures, lists, maps, unions, enums, primitives)
//! - Traits (metadata like documentation, titles, SDK ids)
//!
//! ## Usage
//! ```rust,ignore
//! use api_catalog_parser::smithy::SmithyParser;
//!
//! let parser = SmithyParser::from_file("models/dynamodb.json")?;
//! let services = parser.parse()?;
//! ```

mod compiler;
mod example;
mod parser;
mod resolver;
mod types;

pub use compiler::compile_document;
pub use example::ExampleSynthesizer;
pub use parser::{short_name_of, SmithyParser};
pub use resolver::{
    assert_is_value_shape, assert_kind, builtin_shape, ShapeResolver, UNIT_SHAPE_ID,
};
pub use types::*;
