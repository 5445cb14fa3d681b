//! Primitive assertions the engine builds its checks on

use ma_core::FieldValue;
use thiserror::Error;

/// A primitive comparison did not hold
///
/// This is the only condition the executor recovers from; it is kept apart
/// from [`AssertError`](crate::AssertError) so that a mismatch can never be
/// mistaken for a declaration or resolution error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ComparisonFailure {
    message: String,
}

impl ComparisonFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of one primitive comparison
pub type ComparisonResult = Result<(), ComparisonFailure>;

/// Primitive equality and nullity assertions
pub trait Asserter {
    fn assert_equal(&self, actual: &FieldValue<'_>, expected: &FieldValue<'_>) -> ComparisonResult;

    fn assert_not_equal(
        &self,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
    ) -> ComparisonResult;

    fn assert_null(&self, actual: &FieldValue<'_>) -> ComparisonResult;

    fn assert_not_null(&self, actual: &FieldValue<'_>) -> ComparisonResult;
}

/// Asserter using [`FieldValue`] equality
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAsserter;

impl Asserter for StandardAsserter {
    fn assert_equal(&self, actual: &FieldValue<'_>, expected: &FieldValue<'_>) -> ComparisonResult {
        if actual == expected {
            Ok(())
        } else {
            Err(ComparisonFailure::new(format!(
                "expected:<{}> but was:<{}>",
                expected, actual
            )))
        }
    }

    fn assert_not_equal(
        &self,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
    ) -> ComparisonResult {
        if actual != expected {
            Ok(())
        } else {
            Err(ComparisonFailure::new(format!(
                "Values should be different. Actual: {}",
                actual
            )))
        }
    }

    fn assert_null(&self, actual: &FieldValue<'_>) -> ComparisonResult {
        if actual.is_null() {
            Ok(())
        } else {
            Err(ComparisonFailure::new(format!(
                "expected null, but was:<{}>",
                actual
            )))
        }
    }

    fn assert_not_null(&self, actual: &FieldValue<'_>) -> ComparisonResult {
        if actual.is_null() {
            Err(ComparisonFailure::new("expected a non-null value"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        let asserter = StandardAsserter;
        assert!(asserter
            .assert_equal(&FieldValue::from(5), &FieldValue::from(5))
            .is_ok());
        let failure = asserter
            .assert_equal(&FieldValue::from(25), &FieldValue::from(26))
            .unwrap_err();
        assert_eq!(failure.message(), "expected:<26> but was:<25>");
    }

    #[test]
    fn test_not_equal() {
        let asserter = StandardAsserter;
        assert!(asserter
            .assert_not_equal(&FieldValue::from("a"), &FieldValue::from("b"))
            .is_ok());
        assert!(asserter
            .assert_not_equal(&FieldValue::Null, &FieldValue::Null)
            .is_err());
    }

    #[test]
    fn test_nullity() {
        let asserter = StandardAsserter;
        assert!(asserter.assert_null(&FieldValue::Null).is_ok());
        assert!(asserter.assert_null(&FieldValue::from(0)).is_err());
        assert!(asserter.assert_not_null(&FieldValue::from("")).is_ok());
        assert_eq!(
            asserter.assert_not_null(&FieldValue::Null).unwrap_err().to_string(),
            "expected a non-null value"
        );
    }
}
