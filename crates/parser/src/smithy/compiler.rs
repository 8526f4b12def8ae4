//! Compiles a Smithy model into catalog services

use super::example::ExampleSynthesizer;
use super::resolver::{ShapeResolver, UNIT_SHAPE_ID};
use super::types::{local_name, traits, SchemaDocument, ServiceShape, Shape, ShapeRef};
use api_catalog_common::{sort_by_name, CatalogError, Operation, Resource, Result, Service};

/// Compile every service shape of one document
///
/// `short_name` is the document's file stem; it becomes the service node id
/// and the prefix of every operation id.
pub fn compile_document(short_name: &str, document: &SchemaDocument) -> Result<Vec<Service>> {
    let compiler = DocumentCompiler {
        resolver: ShapeResolver::new(document),
        short_name,
    };

    document
        .shapes
        .iter()
        .filter_map(|(id, shape)| match shape {
            Shape::Service(service) => Some((id, service)),
            _ => None,
        })
        .map(|(id, service)| compiler.extract_service(id, service))
        .collect()
}

struct DocumentCompiler<'a> {
    resolver: ShapeResolver<'a>,
    short_name: &'a str,
}

impl<'a> DocumentCompiler<'a> {
    fn extract_service(&self, shape_id: &str, service: &'a ServiceShape) -> Result<Service> {
        let name = service
            .traits
            .get(traits::TITLE)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| local_name(shape_id))
            .to_string();

        let class_name = service
            .traits
            .get(traits::AWS_SERVICE)
            .and_then(|v| v.get(traits::SDK_ID))
            .and_then(|v| v.as_str())
            .map(String::from);

        let (resources, operations) = self.extract_children(
            &service.resources,
            service.operations.iter(),
            self.short_name,
        )?;

        Ok(Service {
            node_id: self.short_name.to_string(),
            name,
            short_name: self.short_name.to_string(),
            class_name,
            resources,
            operations,
        })
    }

    /// Extract the child resources and operations of a service or resource
    fn extract_children<'r>(
        &self,
        resource_refs: &'a [ShapeRef],
        operation_refs: impl Iterator<Item = &'r ShapeRef>,
        parent_node_id: &str,
    ) -> Result<(Vec<Resource>, Vec<Operation>)> {
        let mut resources = resource_refs
            .iter()
            .map(|r| self.extract_resource(r, parent_node_id))
            .collect::<Result<Vec<_>>>()?;

        let mut operations = operation_refs
            .map(|r| self.extract_operation(r))
            .collect::<Result<Vec<_>>>()?;

        sort_by_name(&mut resources, |r| r.name.as_str());
        sort_by_name(&mut operations, |o| o.name.as_str());

        Ok((resources, operations))
    }

    fn extract_resource(&self, shape_ref: &ShapeRef, parent_node_id: &str) -> Result<Resource> {
        let resource = self.resolver.resolve_resource(&shape_ref.target)?;
        let name = shape_ref.local_name().to_string();
        let node_id = format!("{}.{}", parent_node_id, name);

        // Lifecycle slots join the declared operations before sorting
        let lifecycle = [
            &resource.create,
            &resource.put,
            &resource.read,
            &resource.update,
            &resource.list,
        ];
        let operation_refs = resource
            .operations
            .iter()
            .chain(resource.collection_operations.iter())
            .chain(lifecycle.into_iter().flatten());

        let (resources, operations) =
            self.extract_children(&resource.resources, operation_refs, &node_id)?;

        Ok(Resource {
            node_id,
            name,
            resources,
            operations,
        })
    }

    fn extract_operation(&self, shape_ref: &ShapeRef) -> Result<Operation> {
        let operation = self.resolver.resolve_operation(&shape_ref.target)?;
        let name = shape_ref.local_name().to_string();

        let input_id = operation
            .input
            .as_ref()
            .map_or(UNIT_SHAPE_ID, |input| input.target.as_str());
        let input = self.resolver.resolve(input_id)?;
        if !matches!(input, Shape::Structure(_) | Shape::Unit(_)) {
            return Err(CatalogError::UnsupportedInputShape {
                operation: shape_ref.target.clone(),
                id: input_id.to_string(),
                kind: input.kind().to_string(),
            });
        }

        let request_template = ExampleSynthesizer::new(self.resolver).synthesize(input_id, &name)?;

        Ok(Operation {
            operation_id: format!("{}.{}", self.short_name, name),
            method_name: method_name(&name),
            description: [traits::DOCUMENTATION, traits::AWS_DOCUMENTATION]
                .iter()
                .find_map(|key| operation.traits.get(*key).and_then(|v| v.as_str()))
                .map(String::from),
            request_template,
            name,
        })
    }
}

/// Lower-case the first character of an operation name
/// e.g., "PutItem" -> "putItem"
fn method_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
