//! Type descriptors: the accessor tables registered for introspectable types

use std::any::Any;
use std::fmt;

use crate::value::FieldValue;

/// Reads one field off an instance, `None` if the instance is of another type
pub type ReadFn = for<'a> fn(&'a dyn Any) -> Option<FieldValue<'a>>;

/// Borrows the embedded parent value out of an instance
pub type UpcastFn = for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>;

/// Object equality registered by a type, used when two objects are distinct instances
pub type EqFn = fn(&dyn Any, &dyn Any) -> bool;

/// An object whose fields can be enumerated and read at runtime
///
/// Implementations are normally generated by the [`introspect!`](crate::introspect)
/// macro. `Debug` provides the default string form used in reports.
pub trait Introspect: Any + fmt::Debug {
    /// Descriptor of this value's runtime type
    fn descriptor(&self) -> &'static TypeDescriptor;

    fn as_any(&self) -> &dyn Any;

    /// Descriptor of the implementing type
    fn type_descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;
}

/// Field visibility as declared on the type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Whether an entry belongs to instances or to the type itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Instance,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Mutable,
    Immutable,
}

/// Declaration modifiers of a registered field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub scope: Scope,
    pub mutability: Mutability,
}

impl Modifiers {
    /// Instance field with the given visibility
    pub const fn field(visibility: Visibility) -> Self {
        Self {
            visibility,
            scope: Scope::Instance,
            mutability: Mutability::Mutable,
        }
    }

    /// Static immutable entry (an associated constant)
    pub const fn constant(visibility: Visibility) -> Self {
        Self {
            visibility,
            scope: Scope::Static,
            mutability: Mutability::Immutable,
        }
    }

    /// Private, static and immutable at once: a compile-time constant that
    /// does not belong in a field catalog
    pub fn is_constant(&self) -> bool {
        self.visibility == Visibility::Private
            && self.scope == Scope::Static
            && self.mutability == Mutability::Immutable
    }
}

/// One registered field of a type
#[derive(Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub modifiers: Modifiers,
    pub read: ReadFn,
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

/// Link to the type a descriptor inherits fields from
#[derive(Clone, Copy)]
pub struct ParentDef {
    pub descriptor: fn() -> &'static TypeDescriptor,
    pub upcast: UpcastFn,
}

impl fmt::Debug for ParentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentDef")
            .field("descriptor", &(self.descriptor)().name)
            .finish_non_exhaustive()
    }
}

/// Accessor table of one type
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Fully-qualified type name, the catalog cache key
    pub name: &'static str,
    /// Own fields in declaration order
    pub fields: &'static [FieldDef],
    pub parent: Option<ParentDef>,
    pub eq: Option<EqFn>,
}

impl TypeDescriptor {
    /// Descriptor of the parent type, if any
    pub fn parent_descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.parent.map(|parent| (parent.descriptor)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_exclusion_needs_all_three_modifiers() {
        assert!(Modifiers::constant(Visibility::Private).is_constant());
        assert!(!Modifiers::constant(Visibility::Public).is_constant());
        assert!(!Modifiers::field(Visibility::Private).is_constant());

        let static_mutable = Modifiers {
            visibility: Visibility::Private,
            scope: Scope::Static,
            mutability: Mutability::Mutable,
        };
        assert!(!static_mutable.is_constant());

        let private_immutable_field = Modifiers {
            visibility: Visibility::Private,
            scope: Scope::Instance,
            mutability: Mutability::Immutable,
        };
        assert!(!private_immutable_field.is_constant());
    }
}
