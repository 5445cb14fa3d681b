//! Runtime field introspection for multi-field assertions
//!
//! Rust has no runtime reflection, so every type taking part in an assertion
//! registers an accessor table, normally through the [`introspect!`] and
//! [`symbolic!`] macros. On top of those tables this crate provides:
//!
//! - [`FieldCatalog`]: the ordered field list of a type, inherited fields included
//! - [`CatalogCache`]: catalogs built once per type name
//! - [`FieldPath`] / [`PathResolver`]: `field` and `field.subfield` resolution
//!
//! # Example
//!
//! ```ignore
//! use ma_core::{introspect, CatalogCache, PathResolver};
//!
//! #[derive(Debug)]
//! struct Dog { name: String, age: i32 }
//!
//! introspect! { Dog as "kennel::Dog" { name, age } }
//!
//! let cache = CatalogCache::new();
//! let resolver = PathResolver::new(&cache);
//! let dog = Dog { name: "youpi".into(), age: 5 };
//! assert_eq!(resolver.resolve_str("age", &dog)?, 5.into());
//! ```

mod catalog;
mod descriptor;
mod error;
mod macros;
mod path;
mod value;

pub use catalog::{Accessor, CatalogCache, FieldCatalog, FieldDescriptor};
pub use descriptor::{
    EqFn, FieldDef, Introspect, Modifiers, Mutability, ParentDef, ReadFn, Scope, TypeDescriptor,
    UpcastFn, Visibility,
};
pub use error::{ResolveError, ResolveResult};
pub use path::{FieldPath, PathResolver, PATH_SEPARATOR};
pub use value::{AsFieldValue, FieldValue, Symbol, Symbolic};
