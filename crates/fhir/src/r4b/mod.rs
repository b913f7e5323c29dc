//! FHIR R4B (4.3.0) types.
//!
//! Primitive types shadow their Rust counterparts inside this module:
//! [`String`] here is the FHIR `string` element, not `std::string::String`.

mod datatypes;
mod medication_knowledge;
mod primitives;
mod resource;

pub use datatypes::*;
pub use medication_knowledge::*;
pub use primitives::*;
pub use resource::*;
