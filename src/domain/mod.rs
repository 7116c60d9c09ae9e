pub mod common;
pub mod field;
pub mod record;
pub mod step;

pub use common::Displayable;
pub use field::Field;
pub use record::{PartialRecord, Record};
pub use step::StepId;
