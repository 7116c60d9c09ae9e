//! Rule tables for the three data-entry steps.

use crate::domain::{Field, StepId};
use crate::errors::WizardError;
use crate::validation::FieldRule;

struct RuleSpec {
    field: Field,
    required: &'static str,
    pattern: Option<(&'static str, &'static str)>,
}

const fn required(field: Field, message: &'static str) -> RuleSpec {
    RuleSpec {
        field,
        required: message,
        pattern: None,
    }
}

const fn patterned(
    field: Field,
    message: &'static str,
    pattern: &'static str,
    mismatch: &'static str,
) -> RuleSpec {
    RuleSpec {
        field,
        required: message,
        pattern: Some((pattern, mismatch)),
    }
}

// Digit classes are spelled `[0-9]` so they stay ASCII-only; `\d` in `regex`
// would also accept other Unicode decimal digits.
//
// Whitespace as ECMAScript `\s` defines it. `regex`'s `\s` is Unicode
// White_Space, which adds U+0085 and leaves out U+FEFF.
macro_rules! js_space {
    () => {
        r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}"
    };
}

const EMAIL_PATTERN: &str = concat!(
    r"^[^@",
    js_space!(),
    r"]+@[^@",
    js_space!(),
    r"]+\.[^@",
    js_space!(),
    r"]+$"
);

const PERSONAL: &[RuleSpec] = &[
    required(Field::FirstName, "First Name is required"),
    required(Field::LastName, "Last Name is required"),
    patterned(
        Field::Email,
        "Email is required",
        EMAIL_PATTERN,
        "Invalid email format",
    ),
];

const ADDRESS: &[RuleSpec] = &[
    required(Field::Street, "Street is required"),
    required(Field::City, "City is required"),
    required(Field::ZipCode, "Zip Code is required"),
];

const PAYMENT: &[RuleSpec] = &[
    patterned(
        Field::CardNumber,
        "Card Number is required",
        r"^[0-9]{16}$",
        "Card Number must be 16 digits",
    ),
    patterned(
        Field::ExpiryDate,
        "Expiry Date is required",
        r"^(0[1-9]|1[0-2])/[0-9]{2}$",
        "Invalid expiry date format",
    ),
    patterned(
        Field::Cvv,
        "CVV is required",
        r"^[0-9]{3,4}$",
        "CVV must be 3 or 4 digits",
    ),
];

/// Compiled rules of one data-entry step, in prompt order.
#[derive(Debug, Clone)]
pub struct StepSchema {
    step: StepId,
    rules: Vec<FieldRule>,
}

impl StepSchema {
    pub fn new(step: StepId, rules: Vec<FieldRule>) -> Self {
        Self { step, rules }
    }

    fn compile(step: StepId, specs: &[RuleSpec]) -> Result<Self, WizardError> {
        let rules = specs
            .iter()
            .map(|spec| {
                let rule = FieldRule::new(spec.field).required(spec.required);
                match spec.pattern {
                    Some((pattern, message)) => rule.with_pattern(pattern, message),
                    None => Ok(rule),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(step, rules))
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|rule| rule.field)
    }
}

/// Schemas for Personal, Address, and Payment. Review has none.
#[derive(Debug, Clone)]
pub struct WizardSchema {
    steps: Vec<StepSchema>,
}

impl WizardSchema {
    /// Compiles the built-in rule tables.
    pub fn standard() -> Result<Self, WizardError> {
        Ok(Self {
            steps: vec![
                StepSchema::compile(StepId::Personal, PERSONAL)?,
                StepSchema::compile(StepId::Address, ADDRESS)?,
                StepSchema::compile(StepId::Payment, PAYMENT)?,
            ],
        })
    }

    pub fn step(&self, step: StepId) -> Option<&StepSchema> {
        self.steps.iter().find(|schema| schema.step == step)
    }

    pub fn steps(&self) -> &[StepSchema] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_schema_covers_every_field_once() {
        let schema = WizardSchema::standard().unwrap();
        let fields: Vec<Field> = schema.steps().iter().flat_map(|s| s.fields()).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn step_schemas_match_field_ownership() {
        let schema = WizardSchema::standard().unwrap();
        for step in schema.steps() {
            let fields: Vec<Field> = step.fields().collect();
            assert_eq!(fields, step.step().fields().to_vec());
        }
        assert!(schema.step(StepId::Review).is_none());
    }

    #[test]
    fn every_rule_is_required() {
        let schema = WizardSchema::standard().unwrap();
        assert!(schema
            .steps()
            .iter()
            .flat_map(|step| step.rules())
            .all(FieldRule::is_required));
    }

    #[test]
    fn patterns_only_on_email_and_payment_fields() {
        let schema = WizardSchema::standard().unwrap();
        let patterned: Vec<Field> = schema
            .steps()
            .iter()
            .flat_map(|step| step.rules())
            .filter(|rule| rule.pattern().is_some())
            .map(|rule| rule.field)
            .collect();
        assert_eq!(
            patterned,
            vec![Field::Email, Field::CardNumber, Field::ExpiryDate, Field::Cvv]
        );
    }
}
