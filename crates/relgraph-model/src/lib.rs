//! # relgraph-model
//!
//! Relational model abstraction for relgraph.
//!
//! This crate defines what the GraphQL layer needs from a relational data
//! store, without implementing a store itself:
//!
//! - [`EntityDescriptor`] and friends describe entity types, their scalar
//!   properties and their navigations (relations)
//! - [`MetadataProvider`] enumerates the entity types of a model
//! - [`RuntimeAccessor`] fetches entities by id, whole collections, and reads
//!   properties off loaded instances
//! - [`ModelCatalog`] is a metadata provider loaded from a model file
//!
//! ## Example
//!
//! ```ignore
//! use relgraph_model::{EntityDescriptor, ModelCatalog, NavigationDescriptor, ValueType};
//!
//! let catalog = ModelCatalog::default()
//!     .with_entity(
//!         EntityDescriptor::new("API.Entity.User")
//!             .with_property("Id", ValueType::Int)
//!             .with_property("Username", ValueType::String),
//!     )
//!     .with_entity(
//!         EntityDescriptor::new("API.Entity.Review")
//!             .with_property("Id", ValueType::Int)
//!             .with_navigation(NavigationDescriptor::to_one("Author", "API.Entity.User")),
//!     );
//! ```

mod catalog;
mod descriptor;
mod error;
mod instance;
mod traits;

pub use catalog::ModelCatalog;
pub use descriptor::{
    Cardinality, DEFAULT_KEY, EntityDescriptor, NavigationDescriptor, ScalarPropertyDescriptor,
    ValueType, short_name,
};
pub use error::ModelError;
pub use instance::{EntityInstance, PropertyValue};
pub use traits::{MetadataProvider, RuntimeAccessor};

/// Type alias for a model result.
pub type ModelResult<T> = Result<T, ModelError>;

/// Type alias for a shared metadata provider.
pub type DynMetadataProvider = std::sync::Arc<dyn MetadataProvider>;

/// Type alias for a shared runtime accessor.
pub type DynAccessor = std::sync::Arc<dyn RuntimeAccessor>;
