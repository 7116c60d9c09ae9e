//! Editable state of one data-entry step.

use std::collections::BTreeMap;

use crate::domain::{Field, PartialRecord, Record, StepId};
use crate::schema::StepSchema;
use crate::validation::{validate_step, CriteriaMode, FieldError, ValidationErrors};

/// Local state of a step screen: its own copy of the field values plus the
/// errors of the last submission attempt.
///
/// The form never touches the record it was seeded from. A successful
/// [`StepForm::submit`] hands a [`PartialRecord`] back to the caller, which
/// passes it on to the controller.
#[derive(Debug, Clone)]
pub struct StepForm {
    schema: StepSchema,
    values: BTreeMap<Field, String>,
    errors: ValidationErrors,
    mode: CriteriaMode,
    attempted: bool,
}

impl StepForm {
    /// Seeds every field the schema owns from `record`.
    pub fn new(schema: StepSchema, record: &Record, mode: CriteriaMode) -> Self {
        let values = record.slice(schema.step());
        Self {
            schema,
            values,
            errors: ValidationErrors::default(),
            mode,
            attempted: false,
        }
    }

    pub fn step(&self) -> StepId {
        self.schema.step()
    }

    pub fn schema(&self) -> &StepSchema {
        &self.schema
    }

    pub fn fields(&self) -> Vec<Field> {
        self.schema.fields().collect()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Updates a field owned by this step. Returns `false` for any other field.
    ///
    /// Once a submission has failed, each edit re-checks that field so stale
    /// messages disappear as soon as the value is fixed.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> bool {
        let Some(slot) = self.values.get_mut(&field) else {
            return false;
        };
        *slot = value.into();

        if self.attempted {
            if let Some(rule) = self.schema.rule(field) {
                let found = rule.evaluate(&self.values[&field], self.mode);
                self.errors.set(field, found);
            }
        }
        true
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn errors_for(&self, field: Field) -> &[FieldError] {
        self.errors.for_field(field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validates every field. On failure the errors are kept on the form, the
    /// entered values stay as they are, and nothing is returned.
    pub fn submit(&mut self) -> Option<PartialRecord> {
        self.attempted = true;
        match validate_step(&self.schema, &self.values, self.mode) {
            Ok(partial) => {
                self.errors.clear();
                Some(partial)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WizardSchema;
    use crate::validation::FieldErrorKind;

    fn personal_form() -> StepForm {
        let schema = WizardSchema::standard().unwrap();
        let step = schema.step(StepId::Personal).unwrap().clone();
        StepForm::new(step, &Record::new(), CriteriaMode::All)
    }

    #[test]
    fn foreign_fields_are_rejected() {
        let mut form = personal_form();
        assert!(!form.set_value(Field::City, "Springfield"));
        assert!(form.set_value(Field::FirstName, "Ann"));
        assert_eq!(form.value(Field::FirstName), "Ann");
    }

    #[test]
    fn failed_submit_keeps_values_and_reports_each_field() {
        let mut form = personal_form();
        form.set_value(Field::FirstName, "Ann");
        form.set_value(Field::Email, "bob@example");

        assert!(form.submit().is_none());
        assert_eq!(form.value(Field::FirstName), "Ann");
        assert!(form.errors_for(Field::FirstName).is_empty());
        assert_eq!(
            form.errors().kinds(Field::LastName),
            vec![FieldErrorKind::MissingField]
        );
        assert_eq!(
            form.errors().kinds(Field::Email),
            vec![FieldErrorKind::FormatMismatch]
        );
    }

    #[test]
    fn edits_after_a_failed_submit_revalidate_the_field() {
        let mut form = personal_form();
        assert!(form.submit().is_none());
        assert!(form.has_errors());

        form.set_value(Field::Email, "not-an-email");
        assert_eq!(
            form.errors().kinds(Field::Email),
            vec![FieldErrorKind::FormatMismatch]
        );

        form.set_value(Field::Email, "a@b.co");
        assert!(form.errors_for(Field::Email).is_empty());
        assert!(!form.errors_for(Field::FirstName).is_empty());
    }

    #[test]
    fn edits_before_any_submit_do_not_validate() {
        let mut form = personal_form();
        form.set_value(Field::Email, "nope");
        assert!(!form.has_errors());
    }

    #[test]
    fn successful_submit_returns_exactly_the_step_fields() {
        let mut form = personal_form();
        form.set_value(Field::FirstName, " Ann ");
        form.set_value(Field::LastName, "Lee");
        form.set_value(Field::Email, "a@b.co");

        let partial = form.submit().expect("valid submission");
        assert_eq!(partial.step(), StepId::Personal);
        assert_eq!(partial.len(), 3);
        assert_eq!(partial.get(Field::FirstName), Some(" Ann "));
        assert_eq!(partial.get(Field::City), None);
        assert!(!form.has_errors());
    }
}
