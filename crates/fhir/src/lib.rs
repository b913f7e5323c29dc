//! FHIR R4B data binding for the MedicationKnowledge resource.
//!
//! Every type in [`r4b`] is a plain struct (or a choice enum) with public
//! fields, plus four generated capabilities:
//!
//! * FHIR JSON through `serde::Serialize` / `serde::Deserialize`;
//! * reflection through [`medknow_fhirpath_support::Reflect`];
//! * memory accounting through [`MemSize`];
//! * `Display` as pretty-printed FHIR JSON.
//!
//! XML goes through the `medknow-serde` crate, which works on the JSON shape.
//!
//! ```
//! use medknow_fhir::r4b::{Code, MedicationKnowledge};
//!
//! let json = r#"{"resourceType":"MedicationKnowledge","status":"active"}"#;
//! let resource: MedicationKnowledge = serde_json::from_str(json).unwrap();
//! assert_eq!(resource.status, Some(Code::new("active")));
//! ```

extern crate self as medknow_fhir;

mod decimal;
mod mem;

#[cfg(feature = "R4B")]
pub mod r4b;

pub use decimal::PreciseDecimal;
pub use mem::MemSize;

pub use medknow_fhir_macro::{FhirDisplay, FhirPath, FhirSerde, MemSize};
pub use medknow_fhirpath_support as fhirpath;
pub use medknow_serde_support as serde_support;
