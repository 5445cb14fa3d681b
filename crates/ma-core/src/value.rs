//! Dynamic field values read off introspected objects

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::descriptor::Introspect;

/// Symbolic value of an enum-like type, displayed by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Fully-qualified name of the enum-like type
    pub type_name: &'static str,
    /// Symbolic name of the variant (e.g. "BIG")
    pub name: &'static str,
}

/// An enum-like type whose values display by their symbolic name
///
/// Usually implemented through the [`symbolic!`](crate::symbolic) macro.
pub trait Symbolic {
    /// Fully-qualified name of the type
    const TYPE_NAME: &'static str;

    fn symbol_name(&self) -> &'static str;

    fn symbol(&self) -> Symbol {
        Symbol {
            type_name: Self::TYPE_NAME,
            name: self.symbol_name(),
        }
    }
}

/// A value read from a field, or a literal to compare a field against
///
/// `Null` stands for an absent value (`None`). Nested objects are borrowed
/// from their owner so that sub-fields can be resolved on them.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Cow<'a, str>),
    Symbol(Symbol),
    Object(&'a dyn Introspect),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get the nested object, if this value is one
    pub fn as_object(&self) -> Option<&'a dyn Introspect> {
        match self {
            FieldValue::Object(object) => Some(*object),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Char(_) => "char",
            FieldValue::Int(_) => "int",
            FieldValue::UInt(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::Symbol(_) => "symbol",
            FieldValue::Object(_) => "object",
        }
    }
}

impl PartialEq for FieldValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Int(a), UInt(b)) | (UInt(b), Int(a)) => u64::try_from(*a).is_ok_and(|a| a == *b),
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            (FieldValue::Symbol(a), FieldValue::Symbol(b)) => a == b,
            (Object(a), Object(b)) => objects_equal(*a, *b),
            _ => false,
        }
    }
}

/// Same instance, or equal according to the type's registered `eq`
fn objects_equal(a: &dyn Introspect, b: &dyn Introspect) -> bool {
    let (a_any, b_any) = (a.as_any(), b.as_any());
    if Any::type_id(a_any) != Any::type_id(b_any) {
        return false;
    }
    let same_instance = std::ptr::eq(
        a_any as *const dyn Any as *const (),
        b_any as *const dyn Any as *const (),
    );
    if same_instance {
        return true;
    }
    a.descriptor().eq.is_some_and(|eq| eq(a_any, b_any))
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Char(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::UInt(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Str(v) => write!(f, "{}", v),
            FieldValue::Symbol(symbol) => write!(f, "{}", symbol.name),
            FieldValue::Object(object) => write!(f, "{:?}", object),
        }
    }
}

/// Conversion of a field's Rust type into a [`FieldValue`]
///
/// Implemented for primitives, strings, `Option`, smart pointers, and by the
/// `introspect!` / `symbolic!` macros for registered types.
pub trait AsFieldValue {
    fn field_value(&self) -> FieldValue<'_>;
}

macro_rules! impl_as_field_value {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl AsFieldValue for $t {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(*self as $target)
                }
            }

            impl<'a> From<$t> for FieldValue<'a> {
                fn from(value: $t) -> Self {
                    FieldValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_as_field_value!(Int as i64: i8, i16, i32, i64, isize);
impl_as_field_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_as_field_value!(Float as f64: f32, f64);

impl AsFieldValue for bool {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for char {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Char(*self)
    }
}

impl AsFieldValue for str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self))
    }
}

impl AsFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(Cow::Borrowed(self.as_str()))
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(inner) => inner.field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Rc<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Arc<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<'a> From<bool> for FieldValue<'a> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<'a> From<char> for FieldValue<'a> {
    fn from(value: char) -> Self {
        FieldValue::Char(value)
    }
}

impl<'a> From<String> for FieldValue<'a> {
    fn from(value: String) -> Self {
        FieldValue::Str(Cow::Owned(value))
    }
}

impl<'a> From<Symbol> for FieldValue<'a> {
    fn from(symbol: Symbol) -> Self {
        FieldValue::Symbol(symbol)
    }
}

impl<'a, T: AsFieldValue + ?Sized> From<&'a T> for FieldValue<'a> {
    fn from(value: &'a T) -> Self {
        value.field_value()
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
