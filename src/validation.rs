//! Declarative field rules and the generic function that evaluates them.
//!
//! A rule never raises: evaluating one yields a list of [`FieldError`]s that
//! the form keeps next to the offending field. Nothing in this module logs.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{Field, PartialRecord};
use crate::errors::WizardError;
use crate::schema::StepSchema;

/// How many errors a single field may report per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaMode {
    /// Every rule of a field is evaluated; a blank value with a pattern can
    /// report both a missing value and a format mismatch.
    All,
    /// Evaluation of a field stops at its first failing rule.
    FirstError,
}

impl Default for CriteriaMode {
    fn default() -> Self {
        CriteriaMode::All
    }
}

impl fmt::Display for CriteriaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CriteriaMode::All => "all",
            CriteriaMode::FirstError => "first_error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorKind {
    MissingField,
    FormatMismatch,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldErrorKind::MissingField => "missing field",
            FieldErrorKind::FormatMismatch => "format mismatch",
        };
        f.write_str(label)
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Full-string pattern check with its user-facing message.
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    regex: Regex,
    message: String,
}

impl PatternRule {
    pub fn new(
        field: Field,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, WizardError> {
        let source = source.into();
        let regex =
            Regex::new(&source).map_err(|err| WizardError::Pattern { field, source: err })?;
        Ok(Self {
            source,
            regex,
            message: message.into(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Validation contract of one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: Field,
    required: Option<String>,
    pattern: Option<PatternRule>,
}

impl FieldRule {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            required: None,
            pattern: None,
        }
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn with_pattern(
        mut self,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, WizardError> {
        self.pattern = Some(PatternRule::new(self.field, source, message)?);
        Ok(self)
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn pattern(&self) -> Option<&PatternRule> {
        self.pattern.as_ref()
    }

    /// Checks `value` against this rule.
    ///
    /// The required check looks at the trimmed value; the pattern check runs
    /// on the raw value and only when it is non-empty.
    pub fn evaluate(&self, value: &str, mode: CriteriaMode) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(message) = &self.required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(
                    self.field,
                    FieldErrorKind::MissingField,
                    message.as_str(),
                ));
            }
        }

        if mode == CriteriaMode::FirstError && !errors.is_empty() {
            return errors;
        }

        if let Some(pattern) = &self.pattern {
            if !value.is_empty() && !pattern.is_match(value) {
                errors.push(FieldError::new(
                    self.field,
                    FieldErrorKind::FormatMismatch,
                    pattern.message(),
                ));
            }
        }

        errors
    }

    /// Human-readable summary of the rule, shown by `:help`.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.is_required() {
            lines.push(format!("{} is required.", self.field.label()));
        } else {
            lines.push(format!("{} is optional.", self.field.label()));
        }
        if let Some(pattern) = &self.pattern {
            lines.push(format!("Must match {}", pattern.source()));
        }
        lines
    }
}

/// Errors collected by one submission attempt, grouped per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields carrying at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn for_field(&self, field: Field) -> &[FieldError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kinds(&self, field: Field) -> Vec<FieldErrorKind> {
        self.for_field(field).iter().map(|err| err.kind).collect()
    }

    /// Fields with errors, in schema order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn first_field(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> + '_ {
        self.errors.values().flatten()
    }

    /// Replaces the errors of one field; an empty list clears it.
    pub(crate) fn set(&mut self, field: Field, errors: Vec<FieldError>) {
        if errors.is_empty() {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, errors);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|err| format!("{}: {}", err.field, err.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Evaluates every rule of `schema` against `values`.
///
/// All fields are checked before reporting. On success the partial record
/// carries exactly the schema's fields with their values untouched.
pub fn validate_step(
    schema: &StepSchema,
    values: &BTreeMap<Field, String>,
    mode: CriteriaMode,
) -> Result<PartialRecord, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for rule in schema.rules() {
        errors.set(rule.field, rule.evaluate(value_of(values, rule.field), mode));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let owned = schema
        .rules()
        .iter()
        .map(|rule| (rule.field, value_of(values, rule.field).to_string()))
        .collect();
    Ok(PartialRecord::new(schema.step(), owned))
}

fn value_of(values: &BTreeMap<Field, String>, field: Field) -> &str {
    values.get(&field).map(String::as_str).unwrap_or("")
}
