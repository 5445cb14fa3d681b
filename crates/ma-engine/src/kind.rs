//! The four comparison kinds and their report messages

use std::fmt::{self, Write};

use ma_core::FieldValue;
use serde::Serialize;

use crate::asserter::{Asserter, ComparisonResult};

/// Success and failure templates of a kind, each taking (path, actual, expected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplates {
    pub success: &'static str,
    pub failure: &'static str,
}

/// A comparison primitive a field can be checked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    Equals,
    NotEquals,
    IsNull,
    IsNotNull,
}

impl AssertionKind {
    /// Order in which sub-field checks of one field are evaluated
    pub const SUB_FIELD_ORDER: [AssertionKind; 4] = [
        AssertionKind::Equals,
        AssertionKind::NotEquals,
        AssertionKind::IsNull,
        AssertionKind::IsNotNull,
    ];

    /// Order in which plain checks of one field are evaluated
    pub const FIELD_ORDER: [AssertionKind; 4] = [
        AssertionKind::IsNull,
        AssertionKind::IsNotNull,
        AssertionKind::NotEquals,
        AssertionKind::Equals,
    ];

    pub const fn templates(self) -> MessageTemplates {
        match self {
            AssertionKind::Equals => MessageTemplates {
                success: "OK : '%s' fields are equal. Actual : '%s' / Expected : '%s'",
                failure: "KO : the fields named '%s' are not equal but they should be.\n\tActual : '%s' / Expected : '%s'",
            },
            AssertionKind::NotEquals => MessageTemplates {
                success: "OK : '%s' fields are not equal. Actual : '%s' / Expected : '%s'",
                failure: "KO : the fields named '%s' are equal but they should not be.\n\tActual : '%s' / Expected : '%s'",
            },
            AssertionKind::IsNull => MessageTemplates {
                success: "OK : '%s' field is null. Actual : '%s' / Expected : '%s'",
                failure: "KO : the field named '%s' is not null but it should be.\n\tActual : '%s' / Expected : '%s'",
            },
            AssertionKind::IsNotNull => MessageTemplates {
                success: "OK : '%s' field is not null. Actual : '%s' / Expected : '%s'",
                failure: "KO : the field named '%s' is null but it should not be.\n\tActual : '%s' / Expected : '%s'",
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssertionKind::Equals => "equals",
            AssertionKind::NotEquals => "not_equals",
            AssertionKind::IsNull => "is_null",
            AssertionKind::IsNotNull => "is_not_null",
        }
    }

    /// Run the comparison through the primitive asserter
    ///
    /// Nullity kinds only look at `actual`; `expected` is still reported.
    pub fn check(
        self,
        asserter: &dyn Asserter,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
    ) -> ComparisonResult {
        match self {
            AssertionKind::Equals => asserter.assert_equal(actual, expected),
            AssertionKind::NotEquals => asserter.assert_not_equal(actual, expected),
            AssertionKind::IsNull => asserter.assert_null(actual),
            AssertionKind::IsNotNull => asserter.assert_not_null(actual),
        }
    }

    pub fn success_message(
        self,
        path: &str,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
    ) -> String {
        fill(self.templates().success, &[&path, actual, expected])
    }

    pub fn failure_message(
        self,
        path: &str,
        actual: &FieldValue<'_>,
        expected: &FieldValue<'_>,
    ) -> String {
        fill(self.templates().failure, &[&path, actual, expected])
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitute each `%s` of a template with the next argument
fn fill(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut args = args.iter();
    let mut pieces = template.split("%s");
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for piece in pieces {
        if let Some(arg) = args.next() {
            let _ = write!(out, "{}", arg);
        }
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asserter::StandardAsserter;

    #[test]
    fn test_equals_messages() {
        let actual = FieldValue::from("bobby");
        let expected = FieldValue::from("bob");
        assert_eq!(
            AssertionKind::Equals.success_message("surname", &actual, &actual),
            "OK : 'surname' fields are equal. Actual : 'bobby' / Expected : 'bobby'"
        );
        assert_eq!(
            AssertionKind::Equals.failure_message("surname", &actual, &expected),
            "KO : the fields named 'surname' are not equal but they should be.\n\tActual : 'bobby' / Expected : 'bob'"
        );
    }

    #[test]
    fn test_nullity_messages_report_expected() {
        let message = AssertionKind::IsNull.failure_message(
            "dog.toy",
            &FieldValue::from("ball"),
            &FieldValue::Null,
        );
        assert_eq!(
            message,
            "KO : the field named 'dog.toy' is not null but it should be.\n\tActual : 'ball' / Expected : 'null'"
        );
        let message = AssertionKind::IsNotNull.success_message(
            "age",
            &FieldValue::from(5),
            &FieldValue::from(6),
        );
        assert_eq!(message, "OK : 'age' field is not null. Actual : '5' / Expected : '6'");
    }

    #[test]
    fn test_check_ignores_expected_for_nullity() {
        let asserter = StandardAsserter;
        let present = FieldValue::from(1);
        assert!(AssertionKind::IsNotNull
            .check(&asserter, &present, &FieldValue::Null)
            .is_ok());
        assert!(AssertionKind::IsNull
            .check(&asserter, &FieldValue::Null, &present)
            .is_ok());
        assert!(AssertionKind::NotEquals
            .check(&asserter, &present, &present)
            .is_err());
    }

    #[test]
    fn test_every_template_takes_three_arguments() {
        for kind in AssertionKind::SUB_FIELD_ORDER {
            let templates = kind.templates();
            assert_eq!(templates.success.matches("%s").count(), 3);
            assert_eq!(templates.failure.matches("%s").count(), 3);
        }
    }
}
