//! Wizard positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::domain::field::Field;

/// The four screens of the wizard, in navigation order.
///
/// Holding the position as a `StepId` rather than a bare integer keeps it
/// inside `[0, 3]` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Personal,
    Address,
    Payment,
    Review,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        StepId::Personal,
        StepId::Address,
        StepId::Payment,
        StepId::Review,
    ];

    pub fn index(self) -> usize {
        match self {
            StepId::Personal => 0,
            StepId::Address => 1,
            StepId::Payment => 2,
            StepId::Review => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<StepId> {
        StepId::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<StepId> {
        StepId::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<StepId> {
        self.index().checked_sub(1).and_then(StepId::from_index)
    }

    pub fn is_review(self) -> bool {
        matches!(self, StepId::Review)
    }

    pub fn title(self) -> &'static str {
        match self {
            StepId::Personal => "Personal Details",
            StepId::Address => "Address",
            StepId::Payment => "Payment Details",
            StepId::Review => "Review your details",
        }
    }

    /// Fields owned by this step. Review owns none.
    pub fn fields(self) -> &'static [Field] {
        match self {
            StepId::Personal => &[Field::FirstName, Field::LastName, Field::Email],
            StepId::Address => &[Field::Street, Field::City, Field::ZipCode],
            StepId::Payment => &[Field::CardNumber, Field::ExpiryDate, Field::Cvv],
            StepId::Review => &[],
        }
    }
}

impl Default for StepId {
    fn default() -> Self {
        StepId::Personal
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepId::Personal => "personal",
            StepId::Address => "address",
            StepId::Payment => "payment",
            StepId::Review => "review",
        };
        f.write_str(label)
    }
}

impl Displayable for StepId {
    fn display_label(&self) -> String {
        format!(
            "Step {} of {} – {}",
            self.index() + 1,
            StepId::ALL.len(),
            self.title()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_stop_at_the_ends() {
        assert_eq!(StepId::Personal.previous(), None);
        assert_eq!(StepId::Personal.next(), Some(StepId::Address));
        assert_eq!(StepId::Payment.next(), Some(StepId::Review));
        assert_eq!(StepId::Review.next(), None);
        assert_eq!(StepId::Review.previous(), Some(StepId::Payment));
    }

    #[test]
    fn index_matches_position() {
        for (position, step) in StepId::ALL.iter().enumerate() {
            assert_eq!(step.index(), position);
            assert_eq!(StepId::from_index(position), Some(*step));
        }
        assert_eq!(StepId::from_index(4), None);
    }

    #[test]
    fn display_label_counts_from_one() {
        assert_eq!(StepId::Address.display_label(), "Step 2 of 4 – Address");
    }
}
