//! Registration macros generating accessor tables

/// Register a struct as introspectable
///
/// Each entry of the body is a field name, optionally `pub`, or an associated
/// constant prefixed with `const`. Private constants are excluded from the
/// type's catalog, public ones are listed like fields.
///
/// ```ignore
/// introspect! {
///     Dog as "fixtures::Dog" {
///         name,
///         pub age,
///         toy,
///         const MAX_AGE,
///     }
/// }
///
/// // Fields of the embedded `animal: Animal` value are inherited, and
/// // distinct instances compare with `PartialEq`.
/// introspect! {
///     Cat as "fixtures::Cat" extends animal: Animal, eq {
///         name,
///     }
/// }
/// ```
#[macro_export]
macro_rules! introspect {
    (@fields $ty:ty; [$($acc:expr,)*];) => {
        &[$($acc,)*]
    };
    (@fields $ty:ty; [$($acc:expr,)*]; pub const $f:ident $(, $($rest:tt)*)?) => {
        $crate::introspect!(@fields $ty; [$($acc,)* $crate::introspect!(@const $ty, $f, Public),]; $($($rest)*)?)
    };
    (@fields $ty:ty; [$($acc:expr,)*]; const $f:ident $(, $($rest:tt)*)?) => {
        $crate::introspect!(@fields $ty; [$($acc,)* $crate::introspect!(@const $ty, $f, Private),]; $($($rest)*)?)
    };
    (@fields $ty:ty; [$($acc:expr,)*]; pub $f:ident $(, $($rest:tt)*)?) => {
        $crate::introspect!(@fields $ty; [$($acc,)* $crate::introspect!(@field $ty, $f, Public),]; $($($rest)*)?)
    };
    (@fields $ty:ty; [$($acc:expr,)*]; $f:ident $(, $($rest:tt)*)?) => {
        $crate::introspect!(@fields $ty; [$($acc,)* $crate::introspect!(@field $ty, $f, Private),]; $($($rest)*)?)
    };
    (@field $ty:ty, $f:ident, $vis:ident) => {
        $crate::FieldDef {
            name: ::core::stringify!($f),
            modifiers: $crate::Modifiers::field($crate::Visibility::$vis),
            read: |source| {
                source
                    .downcast_ref::<$ty>()
                    .map(|this| $crate::AsFieldValue::field_value(&this.$f))
            },
        }
    };
    (@const $ty:ty, $f:ident, $vis:ident) => {
        $crate::FieldDef {
            name: ::core::stringify!($f),
            modifiers: $crate::Modifiers::constant($crate::Visibility::$vis),
            read: |source| {
                source
                    .downcast_ref::<$ty>()
                    .map(|_| $crate::FieldValue::from(<$ty>::$f))
            },
        }
    };
    (@parent $ty:ty, $via:ident, $parent:ty) => {
        ::core::option::Option::Some($crate::ParentDef {
            descriptor: <$parent as $crate::Introspect>::type_descriptor,
            upcast: |source| {
                source
                    .downcast_ref::<$ty>()
                    .map(|this| &this.$via as &dyn ::core::any::Any)
            },
        })
    };
    (@eq $ty:ty) => {
        ::core::option::Option::Some(|a, b| {
            match (a.downcast_ref::<$ty>(), b.downcast_ref::<$ty>()) {
                (::core::option::Option::Some(a), ::core::option::Option::Some(b)) => a == b,
                _ => false,
            }
        })
    };
    (@impl $ty:ty, $name:literal, $parent:expr, $eq:expr, [$($body:tt)*]) => {
        impl $crate::Introspect for $ty {
            fn descriptor(&self) -> &'static $crate::TypeDescriptor {
                <Self as $crate::Introspect>::type_descriptor()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn type_descriptor() -> &'static $crate::TypeDescriptor {
                static DESCRIPTOR: $crate::TypeDescriptor = $crate::TypeDescriptor {
                    name: $name,
                    fields: $crate::introspect!(@fields $ty; []; $($body)*),
                    parent: $parent,
                    eq: $eq,
                };
                &DESCRIPTOR
            }
        }

        impl $crate::AsFieldValue for $ty {
            fn field_value(&self) -> $crate::FieldValue<'_> {
                $crate::FieldValue::Object(self)
            }
        }
    };
    ($ty:ty as $name:literal extends $via:ident : $parent:ty, eq { $($body:tt)* }) => {
        $crate::introspect!(
            @impl $ty,
            $name,
            $crate::introspect!(@parent $ty, $via, $parent),
            $crate::introspect!(@eq $ty),
            [$($body)*]
        );
    };
    ($ty:ty as $name:literal extends $via:ident : $parent:ty { $($body:tt)* }) => {
        $crate::introspect!(
            @impl $ty,
            $name,
            $crate::introspect!(@parent $ty, $via, $parent),
            ::core::option::Option::None,
            [$($body)*]
        );
    };
    ($ty:ty as $name:literal, eq { $($body:tt)* }) => {
        $crate::introspect!(
            @impl $ty,
            $name,
            ::core::option::Option::None,
            $crate::introspect!(@eq $ty),
            [$($body)*]
        );
    };
    ($ty:ty as $name:literal { $($body:tt)* }) => {
        $crate::introspect!(
            @impl $ty,
            $name,
            ::core::option::Option::None,
            ::core::option::Option::None,
            [$($body)*]
        );
    };
}

/// Register an enum-like type whose values display by symbolic name
///
/// ```ignore
/// symbolic! {
///     HumanType as "fixtures::HumanType" {
///         Tall => "TALL",
///         Big => "BIG",
///     }
/// }
/// ```
#[macro_export]
macro_rules! symbolic {
    ($ty:ty as $name:literal { $($variant:ident => $symbol:literal),+ $(,)? }) => {
        impl $crate::Symbolic for $ty {
            const TYPE_NAME: &'static str = $name;

            fn symbol_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }
        }

        impl $crate::AsFieldValue for $ty {
            fn field_value(&self) -> $crate::FieldValue<'_> {
                $crate::FieldValue::Symbol($crate::Symbolic::symbol(self))
            }
        }

        impl<'a> ::core::convert::From<$ty> for $crate::FieldValue<'a> {
            fn from(value: $ty) -> Self {
                $crate::FieldValue::Symbol($crate::Symbolic::symbol(&value))
            }
        }
    };
}
