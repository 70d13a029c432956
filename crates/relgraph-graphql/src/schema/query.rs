//! Root query assembly.
//!
//! For every entity `X` the root query gets an item field `X(id: Int!): X`
//! and a collection field `Xs: [X]`.

use relgraph_model::EntityDescriptor;
use tracing::{debug, warn};

use super::definition::{
    ArgumentDefinition, FieldDefinition, FieldResolver, ObjectTypeDefinition, OutputType,
};
use super::type_builder::TypeBuilder;
use crate::error::GraphQLError;

/// Name of the root query type.
pub const QUERY_TYPE_NAME: &str = "Query";

/// Builds the root query type, ensuring every entity's full definition.
///
/// Entities sharing a short name produce the same root field names; the
/// later entity's fields replace the earlier ones.
///
/// # Errors
///
/// Propagates type builder errors.
pub fn build_root_query(
    builder: &mut TypeBuilder<'_>,
    entities: &[EntityDescriptor],
) -> Result<ObjectTypeDefinition, GraphQLError> {
    let mut query =
        ObjectTypeDefinition::new(QUERY_TYPE_NAME).with_description("The root query type.");

    for entity in entities {
        let type_name = builder.ensure_full(entity)?.name.clone();
        let short = entity.short_name();

        let item = FieldDefinition::new(
            short,
            OutputType::Object(type_name.clone()),
            FieldResolver::FindById {
                entity: entity.name.clone(),
            },
        )
        .with_argument(ArgumentDefinition::id(&entity.name));

        let collection = FieldDefinition::new(
            collection_field_name(short),
            OutputType::ObjectList(type_name),
            FieldResolver::FindAll {
                entity: entity.name.clone(),
            },
        );

        for field in [item, collection] {
            let name = field.name.clone();
            if query.set_field(field).is_some() {
                warn!(
                    entity = %entity.name,
                    field = %name,
                    "Root field replaced by entity with the same short name"
                );
            }
        }
    }

    debug!(field_count = query.len(), "Built root query type");
    Ok(query)
}

/// Name of the collection field for an entity short name.
#[must_use]
pub fn collection_field_name(short_name: &str) -> String {
    format!("{short_name}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::accessors::AccessorTable;
    use crate::schema::walker::MetadataWalker;
    use relgraph_model::{ModelCatalog, NavigationDescriptor, ValueType};

    #[test]
    fn test_root_fields() {
        let catalog = ModelCatalog::default()
            .with_entity(
                EntityDescriptor::new("API.Entity.User")
                    .with_property("Id", ValueType::Int)
                    .with_property("Username", ValueType::String),
            )
            .with_entity(
                EntityDescriptor::new("API.Entity.Review")
                    .with_property("Id", ValueType::Int)
                    .with_navigation(NavigationDescriptor::to_one("Author", "API.Entity.User")),
            );
        let walker = MetadataWalker::new(&catalog).unwrap();
        let accessors = AccessorTable::build(&walker).unwrap();
        let mut builder = TypeBuilder::new(&walker, &accessors);

        let query = build_root_query(&mut builder, walker.entity_types()).unwrap();

        let rendered: Vec<String> = query.fields().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "User(id: Int!): User",
                "Users: [User]",
                "Review(id: Int!): Review",
                "Reviews: [Review]",
            ]
        );
        assert_eq!(query.description.as_deref(), Some("The root query type."));
        assert_eq!(
            query.field("Review").unwrap().arguments[0].description.as_deref(),
            Some("Auto generated for: API.Entity.Review")
        );
        assert_eq!(builder.registry().len(), 2);
    }

    #[test]
    fn test_collection_field_name() {
        assert_eq!(collection_field_name("Review"), "Reviews");
        assert_eq!(collection_field_name("Category"), "Categorys");
    }
}
