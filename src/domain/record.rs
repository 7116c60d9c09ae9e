//! Accumulated wizard data.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::field::Field;
use crate::domain::step::StepId;

/// Field values collected across every step.
///
/// Always holds all nine fields; a fresh record has every value set to `""`.
/// Only the wizard controller can write to it, through [`Record::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<Field, String>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            values: Field::ALL
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Copy of the values owned by `step`, used to seed its form.
    pub fn slice(&self, step: StepId) -> BTreeMap<Field, String> {
        step.fields()
            .iter()
            .map(|field| (*field, self.get(*field).to_string()))
            .collect()
    }

    /// True once every field holds a non-blank value.
    pub fn is_complete(&self) -> bool {
        self.values.values().all(|value| !value.trim().is_empty())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Shallow merge: keys present in `partial` overwrite, all others stay.
    pub(crate) fn merge(&mut self, partial: &PartialRecord) {
        for (field, value) in partial.iter() {
            self.values.insert(field, value.to_string());
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys missing from the input stay blank, so a parsed record still holds
/// all nine fields.
impl From<BTreeMap<Field, String>> for Record {
    fn from(values: BTreeMap<Field, String>) -> Self {
        let mut record = Self::new();
        record.values.extend(values);
        record
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<Field, String>::deserialize(deserializer).map(Record::from)
    }
}

/// The values of exactly one step's fields, as entered.
///
/// Only produced by a successful step validation, so every partial record the
/// controller receives has already passed its step's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRecord {
    step: StepId,
    values: BTreeMap<Field, String>,
}

impl PartialRecord {
    pub(crate) fn new(step: StepId, values: BTreeMap<Field, String>) -> Self {
        Self { step, values }
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(step: StepId, entries: &[(Field, &str)]) -> PartialRecord {
        PartialRecord::new(
            step,
            entries
                .iter()
                .map(|(field, value)| (*field, value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn new_record_holds_every_field_blank() {
        let record = Record::new();
        assert_eq!(record.iter().count(), 9);
        assert!(record.iter().all(|(_, value)| value.is_empty()));
        assert!(!record.is_complete());
    }

    #[test]
    fn merge_overwrites_only_partial_keys() {
        let mut record = Record::new();
        record.merge(&partial(
            StepId::Personal,
            &[
                (Field::FirstName, "Ann"),
                (Field::LastName, "Lee"),
                (Field::Email, "a@b.co"),
            ],
        ));
        record.merge(&partial(StepId::Address, &[(Field::City, "Springfield")]));

        assert_eq!(record.get(Field::FirstName), "Ann");
        assert_eq!(record.get(Field::City), "Springfield");
        assert_eq!(record.get(Field::Street), "");

        record.merge(&partial(StepId::Personal, &[(Field::FirstName, "Bo")]));
        assert_eq!(record.get(Field::FirstName), "Bo");
        assert_eq!(record.get(Field::LastName), "Lee");
    }

    #[test]
    fn slice_returns_the_step_fields_only() {
        let record = Record::new();
        let slice = record.slice(StepId::Payment);
        let keys: Vec<Field> = slice.keys().copied().collect();
        assert_eq!(keys, vec![Field::CardNumber, Field::ExpiryDate, Field::Cvv]);
        assert!(record.slice(StepId::Review).is_empty());
    }

    #[test]
    fn parsed_records_always_hold_every_field() {
        let empty: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.iter().count(), 9);
        assert_eq!(empty, Record::new());

        let partial: Record =
            serde_json::from_str(r#"{"firstName":"Ann","cvv":"123"}"#).unwrap();
        assert_eq!(partial.iter().count(), 9);
        assert_eq!(partial.get(Field::FirstName), "Ann");
        assert_eq!(partial.get(Field::Cvv), "123");
        assert_eq!(partial.get(Field::City), "");
        assert!(partial.to_json(false).unwrap().contains("\"city\":\"\""));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"nickname":"Al"}"#).is_err());
    }

    #[test]
    fn json_uses_camel_case_keys_in_schema_order() {
        let json = Record::new().to_json(false).unwrap();
        assert!(json.starts_with("{\"firstName\":\"\",\"lastName\":\"\""));
        assert!(json.ends_with("\"cvv\":\"\"}"));
    }
}
