use crate::MemSize;
use medknow_serde_support::PrimitiveValue;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A FHIR decimal that remembers how it was written.
///
/// FHIR requires decimals to round-trip with their original precision, so
/// `1.50` must not come back as `1.5`. The parsed [`Decimal`] is kept next
/// to the source text; it is `None` when the text is a valid JSON number
/// outside the range `rust_decimal` can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreciseDecimal {
    value: Option<Decimal>,
    original: String,
}

impl PreciseDecimal {
    pub fn parse(text: &str) -> Result<Self, String> {
        serde_json::Number::from_str(text)
            .map_err(|_| format!("`{}` is not a valid decimal", text))?;
        let value = Decimal::from_str_exact(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok();
        Ok(Self {
            value,
            original: text.to_string(),
        })
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn original(&self) -> &str {
        &self.original
    }
}

impl Default for PreciseDecimal {
    fn default() -> Self {
        Decimal::ZERO.into()
    }
}

impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            value: Some(value),
            original: value.to_string(),
        }
    }
}

impl FromStr for PreciseDecimal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PreciseDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for PreciseDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_json::Number::from_str(&self.original)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl PrimitiveValue for PreciseDecimal {
    fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(number) => Self::parse(&number.to_string()),
            other => Err(format!("expected a decimal, found {}", other)),
        }
    }

    fn from_lexical(text: &str) -> Result<Self, String> {
        Self::parse(text)
    }
}

impl MemSize for PreciseDecimal {
    fn heap_size(&self) -> usize {
        self.original.capacity()
    }
}
