#![doc(test(attr(deny(warnings))))]

//! Wizard Core drives a fixed, linear multi-step form: personal details,
//! address, and payment screens with per-field validation, followed by a
//! review screen that submits the accumulated record.
//!
//! The [`wizard::Wizard`] controller owns all state. Screens get a
//! [`form::StepForm`] seeded from the record and hand back a validated
//! [`domain::PartialRecord`]; the controller merges it and moves on.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod schema;
pub mod submit;
pub mod utils;
pub mod validation;
pub mod wizard;

pub use domain::{Field, PartialRecord, Record, StepId};
pub use errors::WizardError;
pub use form::StepForm;
pub use wizard::{Transition, Wizard};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wizard Core tracing initialized.");
    });
}
