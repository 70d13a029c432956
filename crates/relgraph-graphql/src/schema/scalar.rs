//! Mapping from relational value types to GraphQL scalars.
//!
//! The mapping is fixed:
//!
//! | value type | GraphQL |
//! |------------|---------|
//! | `string`   | `String!` |
//! | `int`      | `Int!`    |
//! | `int?`     | `Int`     |
//!
//! Every other value type is rejected while the schema is built.

use std::fmt;

use async_graphql::dynamic::TypeRef;
use relgraph_model::ValueType;

/// GraphQL scalars produced by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
}

impl ScalarType {
    /// Returns the GraphQL type name.
    #[must_use]
    pub fn graphql_name(self) -> &'static str {
        match self {
            Self::String => TypeRef::STRING,
            Self::Int => TypeRef::INT,
        }
    }
}

/// A GraphQL scalar together with its nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarMapping {
    pub scalar: ScalarType,
    pub nullable: bool,
}

impl ScalarMapping {
    /// Looks up the mapping for a value type.
    ///
    /// Returns `None` for value types outside the fixed table.
    #[must_use]
    pub fn for_value_type(value_type: &ValueType) -> Option<Self> {
        let (scalar, nullable) = match value_type {
            ValueType::String => (ScalarType::String, false),
            ValueType::Int => (ScalarType::Int, false),
            ValueType::NullableInt => (ScalarType::Int, true),
            _ => return None,
        };
        Some(Self { scalar, nullable })
    }

    #[must_use]
    pub fn to_type_ref(self) -> TypeRef {
        if self.nullable {
            TypeRef::named(self.scalar.graphql_name())
        } else {
            TypeRef::named_nn(self.scalar.graphql_name())
        }
    }
}

impl fmt::Display for ScalarMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scalar.graphql_name())?;
        if !self.nullable {
            f.write_str("!")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_mapping() {
        let cases = [
            (ValueType::String, "String!"),
            (ValueType::Int, "Int!"),
            (ValueType::NullableInt, "Int"),
        ];
        for (value_type, expected) in cases {
            let mapping = ScalarMapping::for_value_type(&value_type).unwrap();
            assert_eq!(mapping.to_string(), expected);
            assert_eq!(mapping.to_type_ref().to_string(), expected);
        }
    }

    #[test]
    fn test_unsupported_types() {
        for value_type in [
            ValueType::Bool,
            ValueType::Long,
            ValueType::Decimal,
            ValueType::DateTime,
            ValueType::Guid,
            ValueType::Other("blob".into()),
        ] {
            assert!(
                ScalarMapping::for_value_type(&value_type).is_none(),
                "{value_type} should not map"
            );
        }
    }
}
