//! The MedicationKnowledge resource and its backbone elements.

use super::*;
use crate::{FhirDisplay, FhirPath, FhirSerde, MemSize};

/// Information about a medication that is used to support knowledge.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_serde(resource_type = "MedicationKnowledge")]
pub struct MedicationKnowledge {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub contained: Option<Vec<Resource>>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub code: Option<CodeableConcept>,
    pub status: Option<Code>,
    pub manufacturer: Option<Reference>,
    pub dose_form: Option<CodeableConcept>,
    pub amount: Option<Quantity>,
    pub synonym: Option<Vec<String>>,
    pub related_medication_knowledge: Option<Vec<MedicationKnowledgeRelatedMedicationKnowledge>>,
    pub associated_medication: Option<Vec<Reference>>,
    pub product_type: Option<Vec<CodeableConcept>>,
    pub monograph: Option<Vec<MedicationKnowledgeMonograph>>,
    pub ingredient: Option<Vec<MedicationKnowledgeIngredient>>,
    pub preparation_instruction: Option<Markdown>,
    pub intended_route: Option<Vec<CodeableConcept>>,
    pub cost: Option<Vec<MedicationKnowledgeCost>>,
    pub monitoring_program: Option<Vec<MedicationKnowledgeMonitoringProgram>>,
    pub administration_guidelines: Option<Vec<MedicationKnowledgeAdministrationGuidelines>>,
    pub medicine_classification: Option<Vec<MedicationKnowledgeMedicineClassification>>,
    pub packaging: Option<MedicationKnowledgePackaging>,
    pub drug_characteristic: Option<Vec<MedicationKnowledgeDrugCharacteristic>>,
    pub contraindication: Option<Vec<Reference>>,
    pub regulatory: Option<Vec<MedicationKnowledgeRegulatory>>,
    pub kinetics: Option<Vec<MedicationKnowledgeKinetics>>,
}

/// Associated or related medication information.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeRelatedMedicationKnowledge {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: CodeableConcept,
    pub reference: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeMonograph {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: Option<CodeableConcept>,
    pub source: Option<Reference>,
}

/// Active or inactive ingredient.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeIngredient {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub item: MedicationKnowledgeIngredientItem,
    pub is_active: Option<Boolean>,
    pub strength: Option<Ratio>,
}

/// `MedicationKnowledge.ingredient.item[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum MedicationKnowledgeIngredientItem {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

impl Default for MedicationKnowledgeIngredientItem {
    fn default() -> Self {
        Self::CodeableConcept(CodeableConcept::default())
    }
}

/// The pricing of the medication.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeCost {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: CodeableConcept,
    pub source: Option<String>,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeMonitoringProgram {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: Option<CodeableConcept>,
    pub name: Option<String>,
}

/// Guidelines for administration of the medication.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeAdministrationGuidelines {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub dosage: Option<Vec<MedicationKnowledgeAdministrationGuidelinesDosage>>,
    pub indication: Option<MedicationKnowledgeAdministrationGuidelinesIndication>,
    pub patient_characteristics:
        Option<Vec<MedicationKnowledgeAdministrationGuidelinesPatientCharacteristics>>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeAdministrationGuidelinesDosage {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: CodeableConcept,
    pub dosage: Vec<Dosage>,
}

/// `MedicationKnowledge.administrationGuidelines.indication[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum MedicationKnowledgeAdministrationGuidelinesIndication {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeAdministrationGuidelinesPatientCharacteristics {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub characteristic: MedicationKnowledgeAdministrationGuidelinesPatientCharacteristicsCharacteristic,
    pub value: Option<Vec<String>>,
}

/// `MedicationKnowledge.administrationGuidelines.patientCharacteristics.characteristic[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum MedicationKnowledgeAdministrationGuidelinesPatientCharacteristicsCharacteristic {
    CodeableConcept(CodeableConcept),
    Quantity(Quantity),
}

impl Default for MedicationKnowledgeAdministrationGuidelinesPatientCharacteristicsCharacteristic {
    fn default() -> Self {
        Self::CodeableConcept(CodeableConcept::default())
    }
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeMedicineClassification {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: CodeableConcept,
    pub classification: Option<Vec<CodeableConcept>>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgePackaging {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: Option<CodeableConcept>,
    pub quantity: Option<Quantity>,
}

/// Specifies descriptive properties of the medicine, such as color or shape.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeDrugCharacteristic {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: Option<CodeableConcept>,
    pub value: Option<MedicationKnowledgeDrugCharacteristicValue>,
}

/// `MedicationKnowledge.drugCharacteristic.value[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum MedicationKnowledgeDrugCharacteristicValue {
    CodeableConcept(CodeableConcept),
    String(String),
    Quantity(Quantity),
    Base64Binary(Base64Binary),
}

/// Regulatory information about a medication.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeRegulatory {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub regulatory_authority: Reference,
    pub substitution: Option<Vec<MedicationKnowledgeRegulatorySubstitution>>,
    pub schedule: Option<Vec<MedicationKnowledgeRegulatorySchedule>>,
    pub max_dispense: Option<MedicationKnowledgeRegulatoryMaxDispense>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeRegulatorySubstitution {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub r#type: CodeableConcept,
    pub allowed: Boolean,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeRegulatorySchedule {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub schedule: CodeableConcept,
}

/// The maximum number of units of the medication that can be dispensed in a
/// period.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeRegulatoryMaxDispense {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub quantity: Quantity,
    pub period: Option<Duration>,
}

/// The time course of drug absorption, distribution, metabolism and excretion.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct MedicationKnowledgeKinetics {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub area_under_curve: Option<Vec<Quantity>>,
    pub lethal_dose50: Option<Vec<Quantity>>,
    pub half_life_period: Option<Duration>,
}
