//! Dot-qualified field paths and their resolution against objects

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::catalog::CatalogCache;
use crate::descriptor::Introspect;
use crate::error::{ResolveError, ResolveResult};
use crate::value::FieldValue;

/// Separator between a field and its sub-field
pub const PATH_SEPARATOR: char = '.';

/// A field name, or a `field.subfield` pair one level down
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Field(String),
    SubField { field: String, sub_field: String },
}

impl FieldPath {
    /// Parse a path, allowing at most one separator and no empty segment
    pub fn parse(input: &str) -> ResolveResult<Self> {
        let malformed = || ResolveError::MalformedPath {
            path: input.to_string(),
        };

        let mut segments = input.split(PATH_SEPARATOR);
        let field = segments.next().unwrap_or_default();
        match (segments.next(), segments.next()) {
            (None, _) => Ok(FieldPath::Field(field.to_string())),
            (Some(sub_field), None) if !field.is_empty() && !sub_field.is_empty() => {
                Ok(FieldPath::SubField {
                    field: field.to_string(),
                    sub_field: sub_field.to_string(),
                })
            }
            _ => Err(malformed()),
        }
    }

    /// The top-level field name
    pub fn field(&self) -> &str {
        match self {
            FieldPath::Field(field) | FieldPath::SubField { field, .. } => field,
        }
    }

    pub fn sub_field(&self) -> Option<&str> {
        match self {
            FieldPath::Field(_) => None,
            FieldPath::SubField { sub_field, .. } => Some(sub_field),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldPath::SubField { .. })
    }
}

impl FromStr for FieldPath {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(field) => write!(f, "{}", field),
            FieldPath::SubField { field, sub_field } => {
                write!(f, "{}{}{}", field, PATH_SEPARATOR, sub_field)
            }
        }
    }
}

/// Resolves field paths using the catalogs of a [`CatalogCache`]
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'c> {
    cache: &'c CatalogCache,
}

impl<'c> PathResolver<'c> {
    pub fn new(cache: &'c CatalogCache) -> Self {
        Self { cache }
    }

    /// Resolve a path against `source`, the value may be [`FieldValue::Null`]
    pub fn resolve<'a>(
        &self,
        path: &FieldPath,
        source: &'a dyn Introspect,
    ) -> ResolveResult<FieldValue<'a>> {
        trace!(path = %path, type_name = source.descriptor().name, "Resolving path");
        match path {
            FieldPath::Field(field) => self.resolve_field(field, source),
            FieldPath::SubField { field, sub_field } => {
                let intermediate = self.resolve_field(field, source)?;
                self.resolve_sub_field(field, sub_field, intermediate)
            }
        }
    }

    /// Parse then resolve a dot-delimited path
    pub fn resolve_str<'a>(
        &self,
        path: &str,
        source: &'a dyn Introspect,
    ) -> ResolveResult<FieldValue<'a>> {
        self.resolve(&FieldPath::parse(path)?, source)
    }

    /// Read a top-level field on `source`
    pub fn resolve_field<'a>(
        &self,
        field: &str,
        source: &'a dyn Introspect,
    ) -> ResolveResult<FieldValue<'a>> {
        let catalog = self.cache.catalog_of(source);
        let descriptor = catalog
            .get(field)
            .ok_or_else(|| ResolveError::UnknownField {
                field: field.to_string(),
                type_name: catalog.type_name().to_string(),
            })?;
        descriptor.read(source)
    }

    /// Read `sub_field` on the value held by `field`
    ///
    /// Non-object values have no fields, so any sub-field of them is unknown.
    pub fn resolve_sub_field<'a>(
        &self,
        field: &str,
        sub_field: &str,
        intermediate: FieldValue<'a>,
    ) -> ResolveResult<FieldValue<'a>> {
        let unknown = || ResolveError::UnknownSubField {
            sub_field: sub_field.to_string(),
            field: field.to_string(),
        };

        match intermediate {
            FieldValue::Null => Err(ResolveError::NullIntermediate {
                field: field.to_string(),
                sub_field: sub_field.to_string(),
            }),
            FieldValue::Object(object) => {
                let catalog = self.cache.catalog_of(object);
                let descriptor = catalog.get(sub_field).ok_or_else(unknown)?;
                descriptor.read(object)
            }
            other => {
                trace!(field, sub_field, kind = other.kind_name(), "Value has no sub-fields");
                Err(unknown())
            }
        }
    }
}
