pub mod auth;
pub mod record;
pub use record::{Field, FieldKind, Record};

pub mod toner;
pub mod unit;
pub mod returned;
pub mod movement;
pub mod warranty;
pub mod bpmn;
pub mod instruction;
pub mod tco;
