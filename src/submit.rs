//! Destinations for a completed record.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Record;
use crate::errors::WizardError;

/// One final submission of the record.
///
/// Every call to [`crate::wizard::Wizard::submit`] produces a new envelope;
/// repeated submits carry the same record under different ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub record: Record,
}

impl Submission {
    pub fn new(record: Record) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            record,
        }
    }
}

/// Receives completed records.
pub trait SubmitSink {
    fn submit(&mut self, submission: &Submission) -> Result<(), WizardError>;
}

/// Writes each submission as a JSON document followed by a newline.
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmitSink for JsonSink<W> {
    fn submit(&mut self, submission: &Submission) -> Result<(), WizardError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(submission)?
        } else {
            serde_json::to_string(submission)?
        };
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps submissions in memory; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Vec<Submission>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }
}

impl SubmitSink for MemorySink {
    fn submit(&mut self, submission: &Submission) -> Result<(), WizardError> {
        self.submissions.push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_sink_writes_one_document_per_submission() {
        let mut sink = JsonSink::new(Vec::new(), false);
        let submission = Submission::new(Record::new());
        sink.submit(&submission).unwrap();
        sink.submit(&submission).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: Submission = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, submission);
        assert!(lines[0].contains("\"submittedAt\""));
    }

    #[test]
    fn each_submission_gets_its_own_id() {
        let first = Submission::new(Record::new());
        let second = Submission::new(Record::new());
        assert_ne!(first.id, second.id);
        assert_eq!(first.record, second.record);
    }

    #[test]
    fn parsed_submission_fills_missing_record_fields() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "submittedAt": "2026-01-02T03:04:05Z",
            "record": { "email": "a@b.co" }
        }"#;
        let parsed: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.record.iter().count(), 9);
        assert_eq!(parsed.record.get(crate::domain::Field::Email), "a@b.co");
        assert_eq!(parsed.record.get(crate::domain::Field::Cvv), "");
    }
}
