//! # MedicationKnowledge serialization
//!
//! Format entry points for the `medknow-fhir` model.
//!
//! - **JSON**: thin wrappers around `serde_json`. The `FhirSerde` derives on
//!   the model produce FHIR JSON directly.
//! - **XML** (feature `xml`, on by default): FHIR XML written from, and read
//!   back into, the same FHIR JSON shape using `quick-xml`.
//!
//! ## Example
//!
//! ```
//! use medknow_fhir::r4b::{CodeableConcept, MedicationKnowledge};
//! use medknow_serde::{from_json_str, from_xml_str, to_json_string, to_xml_string};
//!
//! let med = MedicationKnowledge {
//!     code: Some(CodeableConcept::text("Acetaminophen 500 mg tablet")),
//!     ..Default::default()
//! };
//!
//! let json = to_json_string(&med)?;
//! assert_eq!(from_json_str::<MedicationKnowledge>(&json)?, med);
//!
//! let xml = to_xml_string(&med)?;
//! assert!(xml.contains(r#"<text value="Acetaminophen 500 mg tablet"/>"#));
//! assert_eq!(from_xml_str::<MedicationKnowledge>(&xml)?, med);
//! # Ok::<(), medknow_serde::SerdeError>(())
//! ```

pub mod error;
pub mod json;

#[cfg(feature = "xml")]
pub mod xml;

pub use error::{Result, SerdeError};

pub use json::{
    from_json_reader, from_json_slice, from_json_str, from_json_value, to_json_string,
    to_json_string_pretty, to_json_value, to_json_vec, to_json_writer,
};

#[cfg(feature = "xml")]
pub use xml::{from_xml_reader, from_xml_slice, from_xml_str, to_xml_string, to_xml_vec};
