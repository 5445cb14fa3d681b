//! Multi-field assertions
//!
//! [`MultiAssert`] compares many fields of two objects of the same type, or
//! fields of one object against literal values, and reports every failing
//! check before failing once. Types opt in through the
//! [`introspect!`](ma_core::introspect) macro.
//!
//! ```ignore
//! use ma_engine::{introspect, MultiAssert};
//!
//! #[derive(Debug)]
//! struct Dog { name: String, age: i32, toy: Option<String> }
//!
//! introspect! { Dog as "kennel::Dog" { name, age, toy } }
//!
//! let rex = Dog { name: "rex".into(), age: 5, toy: None };
//! let max = Dog { name: "max".into(), age: 5, toy: None };
//!
//! MultiAssert::new(&rex, Some(&max))
//!     .assert_equal(["age"])?
//!     .assert_not_equal(["name"])?
//!     .assert_null(["toy"])?
//!     .run()?;
//! ```

mod asserter;
mod builder;
mod config;
mod error;
mod executor;
mod kind;
mod report;
mod spec;

pub use asserter::{Asserter, ComparisonFailure, ComparisonResult, StandardAsserter};
pub use builder::MultiAssert;
pub use config::{AssertConfig, VERBOSE_ENV};
pub use error::{AssertError, AssertResult, ErrorCategory};
pub use kind::{AssertionKind, MessageTemplates};
pub use report::{BufferReporter, Outcome, Reporter, RunReport, StdoutReporter};
pub use spec::{AssertionSpec, KindDeclarations};

pub use ma_core::{
    introspect, symbolic, AsFieldValue, CatalogCache, FieldValue, Introspect, ResolveError,
    Symbol, Symbolic, TypeDescriptor,
};
