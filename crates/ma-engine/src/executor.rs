//! Evaluation of a declared spec against an actual/expected pair

use ma_core::{
    CatalogCache, FieldCatalog, FieldDescriptor, FieldPath, FieldValue, Introspect, PathResolver,
    ResolveError,
};
use tracing::{debug, trace};

use crate::asserter::Asserter;
use crate::error::{AssertError, AssertResult};
use crate::kind::AssertionKind;
use crate::report::{Outcome, Outcomes, Reporter};
use crate::spec::AssertionSpec;

/// Runs every check of a spec, recording one outcome per check
///
/// A comparison that does not hold becomes a failure outcome and the run
/// goes on. Resolution errors end the run.
pub struct Executor<'r, 'a> {
    pub(crate) actual: &'a dyn Introspect,
    pub(crate) expected: Option<&'a dyn Introspect>,
    pub(crate) spec: &'r AssertionSpec<'a>,
    pub(crate) cache: &'r CatalogCache,
    pub(crate) asserter: &'r (dyn Asserter + 'a),
    pub(crate) reporter: &'r mut (dyn Reporter + 'a),
    pub(crate) verbose: bool,
}

impl<'r, 'a> Executor<'r, 'a> {
    /// Validate the spec, then evaluate field checks in catalog order
    /// followed by literal checks
    pub fn execute(&mut self, outcomes: &mut Outcomes) -> AssertResult<()> {
        let spec = self.spec;
        let catalog = self.cache.catalog_of(self.actual);
        self.validate(&catalog)?;

        for field in catalog.fields() {
            self.check_field(field, outcomes)?;
        }

        for want_equals in [true, false] {
            let kind = if want_equals {
                AssertionKind::Equals
            } else {
                AssertionKind::NotEquals
            };
            for (path, literal) in spec.values(want_equals) {
                self.check_value(path, literal, kind, outcomes)?;
            }
        }

        debug!(
            checks = outcomes.len(),
            successes = outcomes.successes().len(),
            failures = outcomes.failures().len(),
            "Evaluated all checks"
        );
        Ok(())
    }

    /// Every top-level name of the spec must be a field of the actual type
    fn validate(&self, catalog: &FieldCatalog) -> AssertResult<()> {
        for name in self.spec.top_level_names()? {
            if !catalog.contains(&name) {
                return Err(ResolveError::UnknownField {
                    field: name,
                    type_name: catalog.type_name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_field(
        &mut self,
        field: &FieldDescriptor,
        outcomes: &mut Outcomes,
    ) -> AssertResult<()> {
        let name = field.name();
        let spec = self.spec;

        for kind in AssertionKind::SUB_FIELD_ORDER {
            let Some(sub_fields) = spec.declarations(kind).sub_fields_of(name) else {
                continue;
            };
            for sub_field in sub_fields {
                let expected = self.expected()?;
                let resolver = PathResolver::new(self.cache);
                let actual_value =
                    resolver.resolve_sub_field(name, sub_field, field.read(self.actual)?)?;
                let expected_value =
                    resolver.resolve_sub_field(name, sub_field, field.read(expected)?)?;
                let path = FieldPath::SubField {
                    field: name.to_string(),
                    sub_field: sub_field.clone(),
                };
                self.record(
                    &path.to_string(),
                    kind,
                    &actual_value,
                    &expected_value,
                    outcomes,
                );
            }
        }

        for kind in AssertionKind::FIELD_ORDER {
            if !spec.declarations(kind).contains_field(name) {
                continue;
            }
            let expected = self.expected()?;
            let actual_value = field.read(self.actual)?;
            let expected_value = field.read(expected)?;
            self.record(name, kind, &actual_value, &expected_value, outcomes);
        }

        Ok(())
    }

    fn check_value(
        &mut self,
        path: &str,
        literal: &FieldValue<'a>,
        kind: AssertionKind,
        outcomes: &mut Outcomes,
    ) -> AssertResult<()> {
        let resolver = PathResolver::new(self.cache);
        let actual_value = resolver.resolve_str(path, self.actual)?;
        self.record(path, kind, &actual_value, literal, outcomes);
        Ok(())
    }

    /// Field-to-field checks are only declarable with an expected object
    fn expected(&self) -> AssertResult<&'a dyn Introspect> {
        self.expected.ok_or(AssertError::MissingExpected)
    }

    fn record(
        &mut self,
        path: &str,
        kind: AssertionKind,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
        outcomes: &mut Outcomes,
    ) {
        let outcome = match kind.check(self.asserter, actual, expected) {
            Ok(()) => {
                let message = kind.success_message(path, actual, expected);
                if self.verbose {
                    self.reporter.report(&message);
                }
                trace!(path, %kind, "Check passed");
                Outcome {
                    path: path.to_string(),
                    kind,
                    passed: true,
                    message,
                }
            }
            Err(failure) => {
                trace!(path, %kind, %failure, "Check failed");
                Outcome {
                    path: path.to_string(),
                    kind,
                    passed: false,
                    message: kind.failure_message(path, actual, expected),
                }
            }
        };
        outcomes.record(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asserter::{ComparisonFailure, ComparisonResult, StandardAsserter};
    use crate::report::BufferReporter;

    #[derive(Debug)]
    struct Leash {
        length: u32,
    }

    ma_core::introspect! { Leash as "executor::Leash" { length } }

    #[derive(Debug)]
    struct Walker {
        name: String,
        leash: Option<Leash>,
    }

    ma_core::introspect! { Walker as "executor::Walker" { name, leash } }

    /// Rejects every comparison
    struct Grumpy;

    impl Asserter for Grumpy {
        fn assert_equal(&self, _: &FieldValue<'_>, _: &FieldValue<'_>) -> ComparisonResult {
            Err(ComparisonFailure::new("no"))
        }

        fn assert_not_equal(&self, _: &FieldValue<'_>, _: &FieldValue<'_>) -> ComparisonResult {
            Err(ComparisonFailure::new("no"))
        }

        fn assert_null(&self, _: &FieldValue<'_>) -> ComparisonResult {
            Err(ComparisonFailure::new("no"))
        }

        fn assert_not_null(&self, _: &FieldValue<'_>) -> ComparisonResult {
            Err(ComparisonFailure::new("no"))
        }
    }

    fn walker(name: &str, length: u32) -> Walker {
        Walker {
            name: name.to_string(),
            leash: Some(Leash { length }),
        }
    }

    fn run(
        actual: &Walker,
        expected: &Walker,
        spec: &AssertionSpec<'_>,
        asserter: &dyn Asserter,
    ) -> (AssertResult<()>, Outcomes, Vec<String>) {
        let cache = CatalogCache::new();
        let buffer = BufferReporter::new();
        let mut reporter = buffer.clone();
        let mut outcomes = Outcomes::default();
        let result = Executor {
            actual,
            expected: Some(expected),
            spec,
            cache: &cache,
            asserter,
            reporter: &mut reporter,
            verbose: true,
        }
        .execute(&mut outcomes);
        (result, outcomes, buffer.lines())
    }

    #[test]
    fn test_sub_fields_before_plain_fields_then_literals() {
        let rex = walker("rex", 2);
        let max = walker("max", 2);
        let mut spec = AssertionSpec::new();
        spec.add_value("name", "rex".into(), true).unwrap();
        spec.add_fields(AssertionKind::NotEquals, ["leash", "name"])
            .unwrap();
        spec.add_fields(AssertionKind::Equals, ["leash.length"])
            .unwrap();

        let (result, outcomes, lines) = run(&rex, &max, &spec, &StandardAsserter);

        result.unwrap();
        let paths: Vec<_> = outcomes.successes().iter().map(|o| o.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "leash.length", "leash", "name"]);
        assert_eq!(lines.len(), 4);
        assert!(outcomes.failures().is_empty());
    }

    #[test]
    fn test_comparison_failures_do_not_stop_the_run() {
        let rex = walker("rex", 2);
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::Equals, ["name", "leash", "leash.length"])
            .unwrap();

        let (result, outcomes, lines) = run(&rex, &rex, &spec, &Grumpy);

        result.unwrap();
        assert_eq!(outcomes.failures().len(), 3);
        assert!(outcomes.successes().is_empty());
        // Failures are reported when the run finishes
        assert!(lines.is_empty());
    }

    #[test]
    fn test_validation_precedes_every_check() {
        let rex = walker("rex", 2);
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::Equals, ["name"]).unwrap();
        spec.add_value("collar.color", "red".into(), false).unwrap();

        let (result, outcomes, _) = run(&rex, &rex, &spec, &StandardAsserter);

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The field 'collar' does not exist in the type 'executor::Walker'. Check your String parameters."
        );
        assert_eq!(outcomes.len(), 0);
    }

    #[test]
    fn test_sub_field_of_primitive_is_unknown() {
        let rex = walker("rex", 2);
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::Equals, ["name.length"]).unwrap();

        let (result, _, _) = run(&rex, &rex, &spec, &StandardAsserter);

        assert!(matches!(
            result,
            Err(AssertError::Resolve(ResolveError::UnknownSubField { .. }))
        ));
    }
}
