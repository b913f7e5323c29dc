//! General-purpose datatypes referenced by MedicationKnowledge.

use super::*;
use crate::{FhirDisplay, FhirPath, FhirSerde, MemSize};

/// Additional content defined by implementations.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Extension {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub url: std::string::String,
    pub value: Option<ExtensionValue>,
}

/// `Extension.value[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum ExtensionValue {
    Base64Binary(Base64Binary),
    Boolean(Boolean),
    Canonical(Canonical),
    Code(Code),
    Date(Date),
    DateTime(DateTime),
    Decimal(Decimal),
    Id(Id),
    Instant(Instant),
    Integer(Integer),
    Markdown(Markdown),
    PositiveInt(PositiveInt),
    String(String),
    Time(Time),
    UnsignedInt(UnsignedInt),
    Uri(Uri),
    Url(Url),
    CodeableConcept(CodeableConcept),
    Coding(Coding),
    Duration(Duration),
    Identifier(Identifier),
    Money(Money),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    Ratio(Ratio),
    Reference(Reference),
    Timing(Box<Timing>),
    Dosage(Box<Dosage>),
    Meta(Meta),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Meta {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub version_id: Option<Id>,
    pub last_updated: Option<Instant>,
    pub source: Option<Uri>,
    pub profile: Option<Vec<Canonical>>,
    pub security: Option<Vec<Coding>>,
    pub tag: Option<Vec<Coding>>,
}

/// Human-readable summary of a resource.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Narrative {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub status: Code,
    pub div: Xhtml,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Coding {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub system: Option<Uri>,
    pub version: Option<String>,
    pub code: Option<Code>,
    pub display: Option<String>,
    pub user_selected: Option<Boolean>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct CodeableConcept {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub coding: Option<Vec<Coding>>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Period {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Identifier {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub r#use: Option<Code>,
    pub r#type: Option<CodeableConcept>,
    pub system: Option<Uri>,
    pub value: Option<String>,
    pub period: Option<Period>,
    // Boxed: Reference holds an Identifier.
    pub assigner: Option<Box<Reference>>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Reference {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub reference: Option<String>,
    pub r#type: Option<Uri>,
    pub identifier: Option<Identifier>,
    pub display: Option<String>,
}

/// Also used wherever FHIR profiles it as `SimpleQuantity`.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Quantity {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub value: Option<Decimal>,
    pub comparator: Option<Code>,
    pub unit: Option<String>,
    pub system: Option<Uri>,
    pub code: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Duration {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub value: Option<Decimal>,
    pub comparator: Option<Code>,
    pub unit: Option<String>,
    pub system: Option<Uri>,
    pub code: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Money {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub value: Option<Decimal>,
    pub currency: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Range {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub low: Option<Quantity>,
    pub high: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct Ratio {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub numerator: Option<Quantity>,
    pub denominator: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct Timing {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub event: Option<Vec<DateTime>>,
    pub repeat: Option<TimingRepeat>,
    pub code: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct TimingRepeat {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub bounds: Option<TimingRepeatBounds>,
    pub count: Option<PositiveInt>,
    pub count_max: Option<PositiveInt>,
    pub duration: Option<Decimal>,
    pub duration_max: Option<Decimal>,
    pub duration_unit: Option<Code>,
    pub frequency: Option<PositiveInt>,
    pub frequency_max: Option<PositiveInt>,
    pub period: Option<Decimal>,
    pub period_max: Option<Decimal>,
    pub period_unit: Option<Code>,
    pub day_of_week: Option<Vec<Code>>,
    pub time_of_day: Option<Vec<Time>>,
    pub when: Option<Vec<Code>>,
    pub offset: Option<UnsignedInt>,
}

/// `Timing.repeat.bounds[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum TimingRepeatBounds {
    Duration(Duration),
    Range(Range),
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
#[fhir_path(base = "BackboneElement")]
pub struct Dosage {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub modifier_extension: Option<Vec<Extension>>,
    pub sequence: Option<Integer>,
    pub text: Option<String>,
    pub additional_instruction: Option<Vec<CodeableConcept>>,
    pub patient_instruction: Option<String>,
    pub timing: Option<Timing>,
    pub as_needed: Option<DosageAsNeeded>,
    pub site: Option<CodeableConcept>,
    pub route: Option<CodeableConcept>,
    pub method: Option<CodeableConcept>,
    pub dose_and_rate: Option<Vec<DosageDoseAndRate>>,
    pub max_dose_per_period: Option<Ratio>,
    pub max_dose_per_administration: Option<Quantity>,
    pub max_dose_per_lifetime: Option<Quantity>,
}

/// `Dosage.asNeeded[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum DosageAsNeeded {
    Boolean(Boolean),
    CodeableConcept(CodeableConcept),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub struct DosageDoseAndRate {
    pub id: Option<std::string::String>,
    pub extension: Option<Vec<Extension>>,
    pub r#type: Option<CodeableConcept>,
    pub dose: Option<DosageDoseAndRateDose>,
    pub rate: Option<DosageDoseAndRateRate>,
}

/// `Dosage.doseAndRate.dose[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum DosageDoseAndRateDose {
    Range(Range),
    Quantity(Quantity),
}

/// `Dosage.doseAndRate.rate[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize, FhirDisplay)]
pub enum DosageDoseAndRateRate {
    Ratio(Ratio),
    Range(Range),
    Quantity(Quantity),
}

impl Extension {
    pub fn new(url: impl Into<std::string::String>, value: ExtensionValue) -> Self {
        Self {
            url: url.into(),
            value: Some(value),
            ..Default::default()
        }
    }
}

impl CodeableConcept {
    /// A concept with a single coding.
    pub fn coded(system: &str, code: &str, display: Option<&str>) -> Self {
        Self {
            coding: Some(vec![Coding {
                system: Some(Uri::new(system)),
                code: Some(Code::new(code)),
                display: display.map(String::new),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    /// A concept carrying only text.
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(String::new(text)),
            ..Default::default()
        }
    }
}

impl Reference {
    pub fn to(reference: &str) -> Self {
        Self {
            reference: Some(String::new(reference)),
            ..Default::default()
        }
    }
}
