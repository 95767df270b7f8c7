//! Canonical CRM schema: target fields and per-object requirements.
//!
//! The catalog is static configuration, not derived from a live CRM.
//! Field names follow the Salesforce Lead/Contact API conventions.

mod fields;
mod object;

pub use fields::CrmField;
pub use object::{ObjectSchema, ObjectType};
