//! Field catalogs: the ordered, inherited field list of a type
//!
//! A catalog lists a type's own fields in declaration order, followed by the
//! fields of its parent, recursively up to the root. Private static immutable
//! entries are constants and never appear in a catalog.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::descriptor::{Introspect, Modifiers, TypeDescriptor};
use crate::error::{ResolveError, ResolveResult};
use crate::value::FieldValue;

/// Reads a field's value off an instance of the catalog's type
pub type Accessor = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<FieldValue<'a>> + Send + Sync>;

fn accessor<F>(read: F) -> Accessor
where
    F: for<'a> Fn(&'a dyn Any) -> Option<FieldValue<'a>> + Send + Sync + 'static,
{
    Arc::new(read)
}

/// One readable field of a type, possibly inherited
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    modifiers: Modifiers,
    /// Type that declared the field (differs from the catalog type when inherited)
    declared_in: &'static str,
    accessor: Accessor,
}

impl FieldDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn declared_in(&self) -> &'static str {
        self.declared_in
    }

    /// Read this field's value on `source`
    pub fn read<'a>(&self, source: &'a dyn Introspect) -> ResolveResult<FieldValue<'a>> {
        (self.accessor)(source.as_any()).ok_or_else(|| ResolveError::Inaccessible {
            field: self.name.to_string(),
            type_name: source.descriptor().name.to_string(),
        })
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers)
            .field("declared_in", &self.declared_in)
            .finish_non_exhaustive()
    }
}

/// Ordered fields of a type, own fields first then inherited ones
#[derive(Debug)]
pub struct FieldCatalog {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    /// Build the catalog for a type by walking its parent chain
    pub fn build(descriptor: &'static TypeDescriptor) -> Self {
        Self {
            type_name: descriptor.name,
            fields: collect_fields(descriptor),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Find a field by name; the first match wins when a parent field is shadowed
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn collect_fields(descriptor: &'static TypeDescriptor) -> Vec<FieldDescriptor> {
    let mut fields: Vec<FieldDescriptor> = descriptor
        .fields
        .iter()
        .filter(|def| !def.modifiers.is_constant())
        .map(|def| FieldDescriptor {
            name: def.name,
            modifiers: def.modifiers,
            declared_in: descriptor.name,
            accessor: accessor(def.read),
        })
        .collect();

    if let (Some(parent), Some(parent_descriptor)) =
        (descriptor.parent, descriptor.parent_descriptor())
    {
        let upcast = parent.upcast;
        for inherited in collect_fields(parent_descriptor) {
            let inner = inherited.accessor;
            fields.push(FieldDescriptor {
                accessor: accessor(move |source| upcast(source).and_then(|base| inner(base))),
                ..inherited
            });
        }
    }

    fields
}

/// Cache of catalogs keyed by fully-qualified type name
///
/// Catalogs are built on first use and never change afterwards, so the cache
/// can be shared between builders through an `Arc`.
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalogs: DashMap<&'static str, Arc<FieldCatalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the catalog for a type, building it on first use
    pub fn catalog_for(&self, descriptor: &'static TypeDescriptor) -> Arc<FieldCatalog> {
        if let Some(catalog) = self.catalogs.get(descriptor.name) {
            trace!(type_name = descriptor.name, "Field catalog cache hit");
            return Arc::clone(&catalog);
        }

        let entry = self
            .catalogs
            .entry(descriptor.name)
            .or_insert_with(|| {
                let catalog = FieldCatalog::build(descriptor);
                debug!(
                    type_name = descriptor.name,
                    field_count = catalog.len(),
                    "Built field catalog"
                );
                Arc::new(catalog)
            });
        Arc::clone(&entry)
    }

    /// Catalog of the runtime type of `object`
    pub fn catalog_of(&self, object: &dyn Introspect) -> Arc<FieldCatalog> {
        self.catalog_for(object.descriptor())
    }

    /// Number of cached catalogs
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
