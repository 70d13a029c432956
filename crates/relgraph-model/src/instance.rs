//! Runtime entity values.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::descriptor::short_name;
use crate::error::ModelError;

/// A value read off an entity instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Int(i64),
    String(String),
    /// A loaded to-one navigation.
    Entity(Box<EntityInstance>),
    /// A loaded to-many navigation.
    Entities(Vec<EntityInstance>),
}

impl PropertyValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::Entity(_) => "entity",
            Self::Entities(_) => "entity list",
        }
    }

    /// Converts a scalar JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` for booleans, floats, arrays and
    /// objects, which have no scalar representation here.
    pub fn from_json(value: &JsonValue) -> Result<Self, ModelError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::String(s) => Ok(Self::String(s.clone())),
            JsonValue::Number(n) => n.as_i64().map(Self::Int).ok_or_else(|| {
                ModelError::invalid_model(format!("number {n} is not an integer"))
            }),
            other => Err(ModelError::invalid_model(format!(
                "unsupported scalar value: {other}"
            ))),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<EntityInstance> for PropertyValue {
    fn from(value: EntityInstance) -> Self {
        Self::Entity(Box::new(value))
    }
}

impl From<Vec<EntityInstance>> for PropertyValue {
    fn from(value: Vec<EntityInstance>) -> Self {
        Self::Entities(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One row of an entity type, with any navigations that were loaded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInstance {
    entity: String,
    values: IndexMap<String, PropertyValue>,
}

impl EntityInstance {
    /// Creates an empty instance. Fully qualified names are shortened.
    #[must_use]
    pub fn new(entity: impl AsRef<str>) -> Self {
        Self {
            entity: short_name(entity.as_ref()).to_string(),
            values: IndexMap::new(),
        }
    }

    /// Builds an instance from a JSON object of scalar values.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidModel` if the value is not an object or a
    /// property holds a non-scalar value.
    pub fn from_json(entity: impl AsRef<str>, value: &JsonValue) -> Result<Self, ModelError> {
        let JsonValue::Object(map) = value else {
            return Err(ModelError::invalid_model(format!(
                "{} row must be a JSON object",
                entity.as_ref()
            )));
        };

        let mut instance = Self::new(entity);
        for (name, value) in map {
            instance.set(name.clone(), PropertyValue::from_json(value)?);
        }
        Ok(instance)
    }

    /// Sets a property and returns the instance.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a property, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Short name of the entity type.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Reads an integer property, typically a key.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropertyValue::as_int)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
