//! The step-wizard state machine.
//!
//! `Wizard` is the single owner of the position and the accumulated
//! [`Record`]. Step screens receive a snapshot through [`Wizard::open_step`]
//! and report back through [`Wizard::merge_and_advance`]; nothing else writes
//! to the record.

use tracing::{debug, info, warn};

use crate::config::WizardConfig;
use crate::domain::{PartialRecord, Record, StepId};
use crate::errors::WizardError;
use crate::form::StepForm;
use crate::schema::WizardSchema;
use crate::submit::{SubmitSink, Submission};
use crate::validation::CriteriaMode;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: StepId, to: StepId },
    Stayed(StepId),
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }

    pub fn step(&self) -> StepId {
        match self {
            Transition::Moved { to, .. } => *to,
            Transition::Stayed(step) => *step,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    schema: WizardSchema,
    record: Record,
    position: StepId,
    mode: CriteriaMode,
}

impl Wizard {
    /// Wizard over the built-in schema with default settings.
    pub fn new() -> Result<Self, WizardError> {
        Ok(Self::with_schema(
            WizardSchema::standard()?,
            CriteriaMode::default(),
        ))
    }

    pub fn from_config(config: &WizardConfig) -> Result<Self, WizardError> {
        Ok(Self::with_schema(
            WizardSchema::standard()?,
            config.criteria_mode,
        ))
    }

    pub fn with_schema(schema: WizardSchema, mode: CriteriaMode) -> Self {
        Self {
            schema,
            record: Record::new(),
            position: StepId::Personal,
            mode,
        }
    }

    pub fn current_step(&self) -> StepId {
        self.position
    }

    /// Position as an index in `[0, 3]`.
    pub fn position(&self) -> usize {
        self.position.index()
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn criteria_mode(&self) -> CriteriaMode {
        self.mode
    }

    /// Form for the current step, seeded from the record. `None` on Review.
    pub fn open_step(&self) -> Option<StepForm> {
        self.schema
            .step(self.position)
            .map(|schema| StepForm::new(schema.clone(), &self.record, self.mode))
    }

    /// Moves one step forward; a no-op on Review.
    pub fn advance(&mut self) -> Transition {
        match self.position.next() {
            Some(next) => self.move_to(next),
            None => Transition::Stayed(self.position),
        }
    }

    /// Moves one step back without touching the record; a no-op on Personal.
    pub fn retreat(&mut self) -> Transition {
        match self.position.previous() {
            Some(previous) => self.move_to(previous),
            None => Transition::Stayed(self.position),
        }
    }

    /// Merges a validated partial record and advances.
    ///
    /// No validation happens here: a [`PartialRecord`] can only come out of a
    /// successful form submission. A partial from a step other than the
    /// current one is stale and leaves the wizard untouched.
    pub fn merge_and_advance(&mut self, partial: PartialRecord) -> Transition {
        if partial.step() != self.position {
            warn!(
                submitted = %partial.step(),
                current = %self.position,
                "Ignoring partial record from a step that is not active"
            );
            return Transition::Stayed(self.position);
        }
        self.record.merge(&partial);
        debug!(step = %partial.step(), fields = partial.len(), "Merged step values");
        self.advance()
    }

    /// Sends the record to `sink`. Only allowed on Review; the record and the
    /// position are left as they are, so it may be called again.
    pub fn submit<S>(&self, sink: &mut S) -> Result<Submission, WizardError>
    where
        S: SubmitSink + ?Sized,
    {
        if !self.position.is_review() {
            warn!(current = %self.position, "Submit requested before review");
            return Err(WizardError::SubmitUnavailable(self.position));
        }
        let submission = Submission::new(self.record.clone());
        sink.submit(&submission)?;
        info!(id = %submission.id, "Record submitted");
        Ok(submission)
    }

    fn move_to(&mut self, next: StepId) -> Transition {
        let from = self.position;
        self.position = next;
        debug!(from = %from, to = %next, "Wizard moved");
        Transition::Moved { from, to: next }
    }
}
