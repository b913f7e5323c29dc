//! Command implementations.

use crate::Format;
use crate::input::load;
use anyhow::{Context, bail};
use medknow_fhir::MemSize;
use medknow_fhir::fhirpath::{Reflect, TypeInfo, select};
use medknow_fhir::r4b::{self, Resource};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Converts the input to `to`, writing to `output` when given.
pub fn convert(
    input: &Path,
    to: Format,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<String> {
    let (resource, from) = load(input)?;
    info!(%from, %to, resource_type = resource.resource_type(), "converting");

    let rendered = match (to, pretty) {
        (Format::Json, false) => medknow_serde::to_json_string(&resource)?,
        (Format::Json, true) => medknow_serde::to_json_string_pretty(&resource)?,
        (Format::Xml, false) => medknow_serde::to_xml_string(&resource)?,
        (Format::Xml, true) => medknow_serde::xml::to_xml_string_pretty(&resource)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
            Ok(String::new())
        }
        None => Ok(rendered),
    }
}

/// Summarizes a resource.
pub fn inspect(input: &Path) -> anyhow::Result<String> {
    let (resource, format) = load(input)?;
    let mut out = String::new();
    writeln!(out, "resourceType: {}", resource.resource_type())?;
    writeln!(out, "format: {}", format)?;
    if let Some(id) = resource.id() {
        writeln!(out, "id: {}", id)?;
    }
    let Resource::MedicationKnowledge(med) = &resource;
    if let Some(status) = med.status.as_ref().and_then(|s| s.value.as_deref()) {
        writeln!(out, "status: {}", status)?;
    }
    writeln!(out, "memory: {} bytes", resource.mem_size())?;

    writeln!(out, "elements:")?;
    if let Some(class) = resource.type_info().as_class() {
        for element in &class.elements {
            let count = resource.children(Some(&element.name)).len();
            if count > 0 {
                writeln!(out, "  {}: {}", element.name, count)?;
            }
        }
    }
    Ok(out)
}

/// Lists the nodes a member path selects, one per line.
pub fn children(input: &Path, path: &str) -> anyhow::Result<String> {
    let (resource, _) = load(input)?;
    let nodes = select(&resource, path);
    info!(path, count = nodes.len(), "selected nodes");

    let mut out = String::new();
    for node in nodes {
        let type_info = node.type_info();
        match node.system_value() {
            Some(value) => writeln!(out, "{} = {}", type_info.qualified_name(), value)?,
            None => writeln!(out, "{}", type_info.qualified_name())?,
        }
    }
    Ok(out)
}

/// Prints the class layout of a model type.
pub fn type_info(type_name: &str) -> anyhow::Result<String> {
    let Some(info) = known_types()
        .into_iter()
        .find(|info| info.name() == type_name)
    else {
        bail!("unknown type `{type_name}`");
    };

    let mut out = String::new();
    match &info {
        TypeInfo::Class(class) => {
            writeln!(out, "{}.{} : {}", class.namespace, class.name, class.base_type)?;
            for element in &class.elements {
                writeln!(out, "  {}: {}", element.name, element.full_type())?;
            }
        }
        TypeInfo::Simple(_) => writeln!(out, "{}", info.qualified_name())?,
    }
    Ok(out)
}

macro_rules! type_infos {
    ($($ty:ty),* $(,)?) => {
        vec![$(<$ty>::default().type_info()),*]
    };
}

/// Type information for every model type.
fn known_types() -> Vec<TypeInfo> {
    type_infos![
        r4b::MedicationKnowledge,
        r4b::MedicationKnowledgeRelatedMedicationKnowledge,
        r4b::MedicationKnowledgeMonograph,
        r4b::MedicationKnowledgeIngredient,
        r4b::MedicationKnowledgeCost,
        r4b::MedicationKnowledgeMonitoringProgram,
        r4b::MedicationKnowledgeAdministrationGuidelines,
        r4b::MedicationKnowledgeAdministrationGuidelinesDosage,
        r4b::MedicationKnowledgeAdministrationGuidelinesPatientCharacteristics,
        r4b::MedicationKnowledgeMedicineClassification,
        r4b::MedicationKnowledgePackaging,
        r4b::MedicationKnowledgeDrugCharacteristic,
        r4b::MedicationKnowledgeRegulatory,
        r4b::MedicationKnowledgeRegulatorySubstitution,
        r4b::MedicationKnowledgeRegulatorySchedule,
        r4b::MedicationKnowledgeRegulatoryMaxDispense,
        r4b::MedicationKnowledgeKinetics,
        r4b::Extension,
        r4b::Meta,
        r4b::Narrative,
        r4b::Coding,
        r4b::CodeableConcept,
        r4b::Period,
        r4b::Identifier,
        r4b::Reference,
        r4b::Quantity,
        r4b::Duration,
        r4b::Money,
        r4b::Range,
        r4b::Ratio,
        r4b::Timing,
        r4b::TimingRepeat,
        r4b::Dosage,
        r4b::DosageDoseAndRate,
        r4b::Boolean,
        r4b::Integer,
        r4b::UnsignedInt,
        r4b::PositiveInt,
        r4b::Decimal,
        r4b::String,
        r4b::Code,
        r4b::Markdown,
        r4b::Id,
        r4b::Uri,
        r4b::Url,
        r4b::Canonical,
        r4b::Base64Binary,
        r4b::Date,
        r4b::DateTime,
        r4b::Instant,
        r4b::Time,
        r4b::Xhtml,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_unique() {
        let mut names: Vec<_> = known_types()
            .iter()
            .map(|info| info.name().to_string())
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_type_info_lists_elements() {
        let out = type_info("MedicationKnowledge").unwrap();
        assert!(out.starts_with("FHIR.MedicationKnowledge : DomainResource\n"));
        assert!(out.contains("  synonym: List<FHIR.string>\n"));
        assert!(out.contains("  ingredient: List<FHIR.MedicationKnowledgeIngredient>\n"));
    }

    #[test]
    fn test_type_info_shows_choice_alternatives() {
        let out = type_info("MedicationKnowledgeIngredient").unwrap();
        assert!(out.contains("  item: Choice<FHIR.CodeableConcept, FHIR.Reference>\n"));
    }

    #[test]
    fn test_type_info_for_primitive() {
        let out = type_info("positiveInt").unwrap();
        assert!(out.starts_with("FHIR.positiveInt : Element\n"));
        assert!(out.contains("  value: System.Integer\n"));
    }

    #[test]
    fn test_unknown_type() {
        assert!(type_info("Patient").is_err());
    }
}
