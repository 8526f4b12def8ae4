//! Compiled catalog entities
//!
//! The catalog is the only artifact handed to the UI layer. Field names are
//! serialized in camelCase and must stay stable: tree rendering, routing by
//! operation id and request-template population all read them verbatim.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Root of the compiled output: every service across all schema documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<Service>,
}

/// A service shape, identified in the tree by its short name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Node id (equal to the short name)
    pub node_id: String,

    /// Human title, falling back to the shape's local name
    pub name: String,

    /// Base name of the source document (e.g., "dynamodb")
    pub short_name: String,

    /// SDK client identifier from the `aws.api#service` trait
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    pub resources: Vec<Resource>,
    pub operations: Vec<Operation>,
}

/// A resource shape nested under a service or another resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// `{parentNodeId}.{name}`
    pub node_id: String,

    /// Local name of the resource shape
    pub name: String,

    pub resources: Vec<Resource>,
    pub operations: Vec<Operation>,
}

/// An invocable operation with its example request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Local name of the operation shape (e.g., "PutItem")
    pub name: String,

    /// `{serviceShortName}.{name}`
    pub operation_id: String,

    /// SDK method name: `name` with its first letter lower-cased
    pub method_name: String,

    /// Documentation trait of the operation shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Synthesized placeholder request body
    pub request_template: serde_json::Value,
}

/// A service or resource found by node id
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogNode<'a> {
    Service(&'a Service),
    Resource(&'a Resource),
}

impl<'a> CatalogNode<'a> {
    pub fn node_id(&self) -> &'a str {
        match self {
            CatalogNode::Service(s) => &s.node_id,
            CatalogNode::Resource(r) => &r.node_id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            CatalogNode::Service(s) => &s.name,
            CatalogNode::Resource(r) => &r.name,
        }
    }

    pub fn resources(&self) -> &'a [Resource] {
        match self {
            CatalogNode::Service(s) => &s.resources,
            CatalogNode::Resource(r) => &r.resources,
        }
    }

    pub fn operations(&self) -> &'a [Operation] {
        match self {
            CatalogNode::Service(s) => &s.operations,
            CatalogNode::Resource(r) => &r.operations,
        }
    }
}

impl Catalog {
    /// Find an operation anywhere in the catalog by its operation id
    pub fn find_operation(&self, operation_id: &str) -> Option<&Operation> {
        self.services
            .iter()
            .filter(|s| {
                operation_id
                    .strip_prefix(s.short_name.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
            .find_map(|s| find_operation_in(CatalogNode::Service(s), operation_id))
    }

    /// Find a service or resource by node id
    pub fn find_node(&self, node_id: &str) -> Option<CatalogNode<'_>> {
        self.services
            .iter()
            .find_map(|s| find_node_in(CatalogNode::Service(s), node_id))
    }

    /// Total number of operations, including those under nested resources
    pub fn operation_count(&self) -> usize {
        self.services
            .iter()
            .map(|s| count_operations(CatalogNode::Service(s)))
            .sum()
    }

    /// Total number of resources at any depth
    pub fn resource_count(&self) -> usize {
        self.services
            .iter()
            .map(|s| count_resources(CatalogNode::Service(s)))
            .sum()
    }

    /// Serialize the catalog as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

fn find_operation_in<'a>(node: CatalogNode<'a>, operation_id: &str) -> Option<&'a Operation> {
    node.operations()
        .iter()
        .find(|o| o.operation_id == operation_id)
        .or_else(|| {
            node.resources()
                .iter()
                .find_map(|r| find_operation_in(CatalogNode::Resource(r), operation_id))
        })
}

fn find_node_in<'a>(node: CatalogNode<'a>, node_id: &str) -> Option<CatalogNode<'a>> {
    if node.node_id() == node_id {
        return Some(node);
    }

    // Only descend into subtrees whose id is a dotted prefix of the target
    let is_ancestor = node_id
        .strip_prefix(node.node_id())
        .is_some_and(|rest| rest.starts_with('.'));
    if !is_ancestor {
        return None;
    }

    node.resources()
        .iter()
        .find_map(|r| find_node_in(CatalogNode::Resource(r), node_id))
}

fn count_operations(node: CatalogNode<'_>) -> usize {
    node.operations().len()
        + node
            .resources()
            .iter()
            .map(|r| count_operations(CatalogNode::Resource(r)))
            .sum::<usize>()
}

fn count_resources(node: CatalogNode<'_>) -> usize {
    node.resources()
        .iter()
        .map(|r| 1 + count_resources(CatalogNode::Resource(r)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn operation(service: &str, name: &str) -> Operation {
        Operation {
            name: name.to_string(),
            operation_id: format!("{}.{}", service, name),
            method_name: format!("{}{}", name[..1].to_lowercase(), &name[1..]),
            description: None,
            request_template: json!({}),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog {
            services: vec![Service {
                node_id: "demo".to_string(),
                name: "Demo".to_string(),
                short_name: "demo".to_string(),
                class_name: Some("Demo".to_string()),
                resources: vec![Resource {
                    node_id: "demo.Table".to_string(),
                    name: "Table".to_string(),
                    resources: vec![Resource {
                        node_id: "demo.Table.Index".to_string(),
                        name: "Index".to_string(),
                        resources: vec![],
                        operations: vec![operation("demo", "DescribeIndex")],
                    }],
                    operations: vec![operation("demo", "CreateTable")],
                }],
                operations: vec![operation("demo", "Ping")],
            }],
        }
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let catalog = sample_catalog();
        let value = serde_json::to_value(&catalog).unwrap();

        let service = &value["services"][0];
        assert_eq!(service["nodeId"], "demo");
        assert_eq!(service["shortName"], "demo");
        assert_eq!(service["className"], "Demo");

        let ping = &service["operations"][0];
        assert_eq!(
            ping,
            &json!({
                "name": "Ping",
                "operationId": "demo.Ping",
                "methodName": "ping",
                "requestTemplate": {}
            })
        );
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut catalog = sample_catalog();
        catalog.services[0].class_name = None;
        let json = catalog.to_json(false).unwrap();
        assert!(!json.contains("className"));
        assert!(!json.contains("description"));
    }

    #[test]
    fn test_find_operation_in_nested_resource() {
        let catalog = sample_catalog();
        let op = catalog.find_operation("demo.DescribeIndex").unwrap();
        assert_eq!(op.method_name, "describeIndex");
        assert!(catalog.find_operation("other.DescribeIndex").is_none());
        assert!(catalog.find_operation("demo.Missing").is_none());
    }

    #[test]
    fn test_find_node() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.find_node("demo"),
            Some(CatalogNode::Service(_))
        ));

        let index = catalog.find_node("demo.Table.Index").unwrap();
        assert_eq!(index.name(), "Index");
        assert_eq!(index.operations().len(), 1);

        assert!(catalog.find_node("demo.Missing").is_none());
        assert!(catalog.find_node("demox").is_none());
    }

    #[test]
    fn test_counts() {
        let catalog = sample_catalog();
        assert_eq!(catalog.operation_count(), 3);
        assert_eq!(catalog.resource_count(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = sample_catalog();
        let json = catalog.to_json(true).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
