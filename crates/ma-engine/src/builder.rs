//! The declarative assertion builder

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use ma_core::{CatalogCache, FieldValue, Introspect};
use tracing::debug;

use crate::asserter::{Asserter, StandardAsserter};
use crate::config::AssertConfig;
use crate::error::{AssertError, AssertResult};
use crate::executor::Executor;
use crate::kind::AssertionKind;
use crate::report::{self, Outcome, Outcomes, Reporter, RunReport, StdoutReporter};
use crate::spec::AssertionSpec;

/// Checks many fields of an object against a reference object, or against
/// literal values, in one run
///
/// Every declared check is evaluated; failures are collected instead of
/// stopping at the first one, and the run fails once at the end with the
/// number of failed checks.
///
/// ```ignore
/// MultiAssert::new(&actual, Some(&expected))
///     .assert_not_equal(["address", "age", "friend.age"])?
///     .assert_equal(["dog.name", "human_type"])?
///     .assert_null(["name"])?
///     .declare_value("dog.age", 5, true)?
///     .run()?;
/// ```
pub struct MultiAssert<'a> {
    actual: &'a dyn Introspect,
    expected: Option<&'a dyn Introspect>,
    config: AssertConfig,
    spec: AssertionSpec<'a>,
    cache: Arc<CatalogCache>,
    asserter: Box<dyn Asserter + 'a>,
    reporter: Box<dyn Reporter + 'a>,
    outcomes: Outcomes,
}

impl fmt::Debug for MultiAssert<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiAssert")
            .field("type_name", &self.actual.descriptor().name)
            .field("has_expected", &self.expected.is_some())
            .field("config", &self.config)
            .field("spec", &self.spec)
            .field("outcomes", &self.outcomes)
            .finish_non_exhaustive()
    }
}

impl<'a> MultiAssert<'a> {
    /// Create a builder for two values of the same type
    ///
    /// Without an expected value only literal checks can be declared.
    pub fn new<T: Introspect>(actual: &'a T, expected: Option<&'a T>) -> Self {
        Self::with_parts(actual, expected.map(|expected| expected as &dyn Introspect))
    }

    /// Create a builder from type-erased values
    ///
    /// Fails if `actual` is missing or if `expected` is of another runtime type.
    pub fn from_dyn(
        actual: Option<&'a dyn Introspect>,
        expected: Option<&'a dyn Introspect>,
    ) -> AssertResult<Self> {
        let actual = actual.ok_or(AssertError::MissingActual)?;
        if let Some(expected) = expected {
            if Any::type_id(actual.as_any()) != Any::type_id(expected.as_any()) {
                return Err(AssertError::TypeMismatch {
                    actual: actual.descriptor().name.to_string(),
                    expected: expected.descriptor().name.to_string(),
                });
            }
        }
        Ok(Self::with_parts(actual, expected))
    }

    fn with_parts(actual: &'a dyn Introspect, expected: Option<&'a dyn Introspect>) -> Self {
        Self {
            actual,
            expected,
            config: AssertConfig::default(),
            spec: AssertionSpec::new(),
            cache: Arc::new(CatalogCache::new()),
            asserter: Box::new(StandardAsserter),
            reporter: Box::new(StdoutReporter),
            outcomes: Outcomes::default(),
        }
    }

    pub fn with_config(mut self, config: AssertConfig) -> Self {
        self.config = config;
        self
    }

    /// Report successful checks and run summaries as well as failures
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn with_asserter(mut self, asserter: impl Asserter + 'a) -> Self {
        self.asserter = Box::new(asserter);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'a) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Share a catalog cache with other builders
    pub fn with_cache(mut self, cache: Arc<CatalogCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Declare field-to-field checks of one kind
    ///
    /// Names are `field` or `field.subfield`. Requires an expected value.
    pub fn declare<I, S>(&mut self, kind: AssertionKind, names: I) -> AssertResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.expected.is_none() {
            return Err(AssertError::MissingExpected);
        }
        self.spec.add_fields(kind, names)?;
        Ok(self)
    }

    /// Fields that must be equal in actual and expected
    pub fn assert_equal<I, S>(&mut self, names: I) -> AssertResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(AssertionKind::Equals, names)
    }

    /// Fields that must differ between actual and expected
    pub fn assert_not_equal<I, S>(&mut self, names: I) -> AssertResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(AssertionKind::NotEquals, names)
    }

    /// Fields that must be null in actual
    pub fn assert_null<I, S>(&mut self, names: I) -> AssertResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(AssertionKind::IsNull, names)
    }

    /// Fields that must not be null in actual
    pub fn assert_not_null<I, S>(&mut self, names: I) -> AssertResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(AssertionKind::IsNotNull, names)
    }

    /// Check the value at `path` against a literal, for equality when
    /// `want_equals` is true and for difference otherwise
    pub fn declare_value(
        &mut self,
        path: &str,
        literal: impl Into<FieldValue<'a>>,
        want_equals: bool,
    ) -> AssertResult<&mut Self> {
        self.spec.add_value(path, literal.into(), want_equals)?;
        Ok(self)
    }

    pub fn assert_value_equals(
        &mut self,
        path: &str,
        literal: impl Into<FieldValue<'a>>,
    ) -> AssertResult<&mut Self> {
        self.declare_value(path, literal, true)
    }

    pub fn assert_value_not_equals(
        &mut self,
        path: &str,
        literal: impl Into<FieldValue<'a>>,
    ) -> AssertResult<&mut Self> {
        self.declare_value(path, literal, false)
    }

    /// Evaluate every declared check
    ///
    /// Returns the report when all checks pass. Otherwise every failure is
    /// reported and [`AssertError::Aggregate`] is returned. Declaration and
    /// resolution errors end the run early and discard its outcomes.
    pub fn run(&mut self) -> AssertResult<RunReport> {
        let started = Instant::now();
        let type_name = self.actual.descriptor().name;
        debug!(
            type_name,
            checks = self.spec.check_count(),
            "Running assertions"
        );
        if self.config.verbose {
            self.reporter.report(&report::start_line(type_name));
        }

        self.outcomes.clear();
        let mut executor = Executor {
            actual: self.actual,
            expected: self.expected,
            spec: &self.spec,
            cache: &self.cache,
            asserter: &*self.asserter,
            reporter: &mut *self.reporter,
            verbose: self.config.verbose,
        };
        if let Err(err) = executor.execute(&mut self.outcomes) {
            debug!(type_name, error = %err, "Assertion run aborted");
            self.outcomes.clear();
            return Err(err);
        }

        report::finish(
            type_name,
            &self.outcomes,
            started.elapsed(),
            self.config.verbose,
            &mut *self.reporter,
        )
    }

    pub fn spec(&self) -> &AssertionSpec<'a> {
        &self.spec
    }

    pub fn config(&self) -> &AssertConfig {
        &self.config
    }

    /// Successful checks of the last run
    pub fn successes(&self) -> &[Outcome] {
        self.outcomes.successes()
    }

    /// Failed checks of the last run
    pub fn failures(&self) -> &[Outcome] {
        self.outcomes.failures()
    }
}
