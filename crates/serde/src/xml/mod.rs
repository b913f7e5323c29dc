//! FHIR XML support.
//!
//! Both directions go through the FHIR JSON shape of a value. The writer
//! serializes to a `serde_json::Value` and walks it; the reader folds
//! quick-xml events into a `serde_json::Value` and hands it to the model's
//! `Deserialize` impl, so validation and choice handling stay in one place.
//!
//! ## FHIR JSON ↔ XML Mapping
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"status": "active"}` | `<status value="active"/>` |
//! | `{"status": "active", "_status": {"id": "s1"}}` | `<status id="s1" value="active"/>` |
//! | `{"synonym": ["A", "B"]}` | `<synonym value="A"/><synonym value="B"/>` |
//! | `{"synonym": ["A", null], "_synonym": [null, {"id": "s2"}]}` | `<synonym value="A"/><synonym id="s2"/>` |
//! | `{"itemCodeableConcept": {"text": "x"}}` | `<itemCodeableConcept><text value="x"/></itemCodeableConcept>` |
//! | `{"extension": [{"url": "u", "valueString": "v"}]}` | `<extension url="u"><valueString value="v"/></extension>` |
//! | `{"contained": [{"resourceType": "MedicationKnowledge"}]}` | `<contained><MedicationKnowledge/></contained>` |
//!
//! Only three attributes exist: `value`, `id` (element ids; the resource id
//! is an `<id>` element) and `url` (extensions). The FHIR namespace is
//! declared on the root; narrative `div` markup is copied as written.

pub mod de;
pub mod ser;
mod utils;

pub use de::{from_xml_reader, from_xml_slice, from_xml_str};
pub use ser::{
    to_xml_string, to_xml_string_pretty, to_xml_vec, to_xml_writer, to_xml_writer_pretty,
};
pub use de::MAX_DEPTH;
pub use utils::FHIR_NAMESPACE;
