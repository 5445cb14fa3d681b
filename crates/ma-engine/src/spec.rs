//! Declared checks, accumulated before a run
//!
//! Every declaration merges into the existing state: names are kept in
//! insertion order and duplicates collapse, so a (path, kind) pair is checked
//! once however many times it was declared.

use indexmap::{IndexMap, IndexSet};
use ma_core::{FieldPath, FieldValue, ResolveResult};

use crate::error::{AssertError, AssertResult};
use crate::kind::AssertionKind;

/// Checks of one kind: plain fields and sub-fields grouped by their field
#[derive(Debug, Clone, Default)]
pub struct KindDeclarations {
    fields: IndexSet<String>,
    sub_fields: IndexMap<String, IndexSet<String>>,
}

impl KindDeclarations {
    pub fn fields(&self) -> &IndexSet<String> {
        &self.fields
    }

    pub fn sub_fields(&self) -> &IndexMap<String, IndexSet<String>> {
        &self.sub_fields
    }

    /// Sub-fields declared under `field`
    pub fn sub_fields_of(&self, field: &str) -> Option<&IndexSet<String>> {
        self.sub_fields.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    fn len(&self) -> usize {
        self.fields.len() + self.sub_fields.values().map(IndexSet::len).sum::<usize>()
    }

    fn insert(&mut self, path: FieldPath) {
        match path {
            FieldPath::Field(field) => {
                self.fields.insert(field);
            }
            FieldPath::SubField { field, sub_field } => {
                self.sub_fields.entry(field).or_default().insert(sub_field);
            }
        }
    }
}

/// All checks declared on one builder
#[derive(Debug, Clone, Default)]
pub struct AssertionSpec<'a> {
    equals: KindDeclarations,
    not_equals: KindDeclarations,
    is_null: KindDeclarations,
    is_not_null: KindDeclarations,
    equal_values: IndexMap<String, FieldValue<'a>>,
    not_equal_values: IndexMap<String, FieldValue<'a>>,
}

impl<'a> AssertionSpec<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declarations(&self, kind: AssertionKind) -> &KindDeclarations {
        match kind {
            AssertionKind::Equals => &self.equals,
            AssertionKind::NotEquals => &self.not_equals,
            AssertionKind::IsNull => &self.is_null,
            AssertionKind::IsNotNull => &self.is_not_null,
        }
    }

    fn declarations_mut(&mut self, kind: AssertionKind) -> &mut KindDeclarations {
        match kind {
            AssertionKind::Equals => &mut self.equals,
            AssertionKind::NotEquals => &mut self.not_equals,
            AssertionKind::IsNull => &mut self.is_null,
            AssertionKind::IsNotNull => &mut self.is_not_null,
        }
    }

    /// Add field-to-field checks of one kind
    ///
    /// Names containing a dot are sub-field checks. All names are parsed
    /// before any is recorded, so a malformed name leaves the spec untouched.
    pub fn add_fields<I, S>(&mut self, kind: AssertionKind, names: I) -> ResolveResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = names
            .into_iter()
            .map(|name| FieldPath::parse(name.as_ref()))
            .collect::<ResolveResult<Vec<_>>>()?;

        let declarations = self.declarations_mut(kind);
        for path in paths {
            declarations.insert(path);
        }
        Ok(())
    }

    /// Add a check of the value at `path` against a literal
    ///
    /// The path is only parsed when the spec is validated. Declaring the same
    /// path twice replaces the literal but keeps the first declaration's position.
    pub fn add_value(
        &mut self,
        path: &str,
        literal: FieldValue<'a>,
        want_equals: bool,
    ) -> AssertResult<()> {
        if path.is_empty() {
            return Err(AssertError::EmptyFieldName);
        }
        let values = if want_equals {
            &mut self.equal_values
        } else {
            &mut self.not_equal_values
        };
        values.insert(path.to_string(), literal);
        Ok(())
    }

    /// Literal checks, in declaration order
    pub fn values(&self, want_equals: bool) -> &IndexMap<String, FieldValue<'a>> {
        if want_equals {
            &self.equal_values
        } else {
            &self.not_equal_values
        }
    }

    /// Whether any field-to-field check was declared
    pub fn has_field_checks(&self) -> bool {
        AssertionKind::SUB_FIELD_ORDER
            .iter()
            .any(|kind| self.declarations(*kind).len() > 0)
    }

    /// Number of distinct declared checks, one outcome each when run
    pub fn check_count(&self) -> usize {
        AssertionKind::SUB_FIELD_ORDER
            .iter()
            .map(|kind| self.declarations(*kind).len())
            .sum::<usize>()
            + self.equal_values.len()
            + self.not_equal_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.check_count() == 0
    }

    /// Top-level field names referenced anywhere in the spec
    ///
    /// Plain fields come first, then the fields owning sub-field checks, then
    /// literal paths, which are parsed here.
    pub fn top_level_names(&self) -> ResolveResult<Vec<String>> {
        const KINDS: [AssertionKind; 4] = [
            AssertionKind::NotEquals,
            AssertionKind::Equals,
            AssertionKind::IsNotNull,
            AssertionKind::IsNull,
        ];

        let mut names: Vec<String> = KINDS
            .iter()
            .flat_map(|kind| self.declarations(*kind).fields.iter().cloned())
            .collect();
        names.extend(
            KINDS
                .iter()
                .flat_map(|kind| self.declarations(*kind).sub_fields.keys().cloned()),
        );
        for path in self.equal_values.keys().chain(self.not_equal_values.keys()) {
            names.push(FieldPath::parse(path)?.field().to_string());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ma_core::ResolveError;

    #[test]
    fn test_names_split_on_dot() {
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::Equals, ["surname", "dog.name", "dog.age"])
            .unwrap();

        let equals = spec.declarations(AssertionKind::Equals);
        assert!(equals.contains_field("surname"));
        assert!(!equals.contains_field("dog"));
        let dog: Vec<_> = equals.sub_fields_of("dog").unwrap().iter().collect();
        assert_eq!(dog, vec!["name", "age"]);
        assert_eq!(spec.check_count(), 3);
    }

    #[test]
    fn test_declarations_merge_and_deduplicate() {
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::IsNull, ["name", "dog.toy"]).unwrap();
        spec.add_fields(AssertionKind::IsNull, ["name", "address", "dog.toy"])
            .unwrap();

        let null = spec.declarations(AssertionKind::IsNull);
        assert_eq!(null.fields().len(), 2);
        assert_eq!(null.sub_fields_of("dog").unwrap().len(), 1);
        assert_eq!(spec.check_count(), 3);
        assert!(spec.has_field_checks());
    }

    #[test]
    fn test_malformed_name_leaves_spec_untouched() {
        let mut spec = AssertionSpec::new();
        let err = spec
            .add_fields(AssertionKind::NotEquals, ["name", "a.b.c"])
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::MalformedPath {
                path: "a.b.c".to_string()
            }
        );
        assert!(spec.is_empty());
    }

    #[test]
    fn test_values() {
        let mut spec = AssertionSpec::new();
        spec.add_value("age", FieldValue::from(26), true).unwrap();
        spec.add_value("dog.name", FieldValue::from("popo"), false)
            .unwrap();
        spec.add_value("age", FieldValue::from(27), true).unwrap();

        assert_eq!(spec.values(true).len(), 1);
        assert_eq!(spec.values(true)["age"], FieldValue::from(27));
        assert_eq!(spec.values(false).len(), 1);
        assert!(!spec.has_field_checks());
        assert_eq!(spec.check_count(), 2);
    }

    #[test]
    fn test_empty_value_path() {
        let mut spec = AssertionSpec::new();
        let err = spec.add_value("", FieldValue::Null, true).unwrap_err();
        assert!(matches!(err, AssertError::EmptyFieldName));
    }

    #[test]
    fn test_top_level_names() {
        let mut spec = AssertionSpec::new();
        spec.add_fields(AssertionKind::Equals, ["surname", "dog.name"])
            .unwrap();
        spec.add_fields(AssertionKind::NotEquals, ["age", "friend.age"])
            .unwrap();
        spec.add_value("wannabe", FieldValue::Null, false).unwrap();
        spec.add_value("dog.age", FieldValue::from(5), true).unwrap();

        assert_eq!(
            spec.top_level_names().unwrap(),
            vec!["age", "surname", "friend", "dog", "dog", "wannabe"]
        );
    }

    #[test]
    fn test_top_level_names_rejects_malformed_value_path() {
        let mut spec = AssertionSpec::new();
        spec.add_value("a.b.c", FieldValue::from(1), true).unwrap();
        assert!(matches!(
            spec.top_level_names(),
            Err(ResolveError::MalformedPath { .. })
        ));
    }
}
