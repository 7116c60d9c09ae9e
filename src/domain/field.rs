//! The fixed set of fields collected by the wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::domain::step::StepId;

/// One entry of the accumulated record.
///
/// Variants are declared in schema order; the derived `Ord` is what keeps
/// record iteration and JSON output in the order the steps ask for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Street,
    City,
    ZipCode,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Street,
        Field::City,
        Field::ZipCode,
        Field::CardNumber,
        Field::ExpiryDate,
        Field::Cvv,
    ];

    /// Record key, matching the serialized name.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Street => "street",
            Field::City => "city",
            Field::ZipCode => "zipCode",
            Field::CardNumber => "cardNumber",
            Field::ExpiryDate => "expiryDate",
            Field::Cvv => "cvv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Street => "Street",
            Field::City => "City",
            Field::ZipCode => "Zip Code",
            Field::CardNumber => "Card Number",
            Field::ExpiryDate => "Expiry Date",
            Field::Cvv => "CVV",
        }
    }

    /// Data-entry step that owns this field.
    pub fn step(self) -> StepId {
        match self {
            Field::FirstName | Field::LastName | Field::Email => StepId::Personal,
            Field::Street | Field::City | Field::ZipCode => StepId::Address,
            Field::CardNumber | Field::ExpiryDate | Field::Cvv => StepId::Payment,
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.key() == key.trim())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Displayable for Field {
    fn display_label(&self) -> String {
        self.label().to_string()
    }
}
