use rust_decimal::Decimal;
use std::fmt;

/// A FHIRPath system value carried by a primitive element.
///
/// Date and time values keep their partial-precision lexical form; the
/// evaluator decides how to compare them.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemValue {
    Boolean(bool),
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Date(String),
    DateTime(String),
    Time(String),
}

impl SystemValue {
    /// Name of the `System` type the value belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            SystemValue::Boolean(_) => "Boolean",
            SystemValue::String(_) => "String",
            SystemValue::Integer(_) => "Integer",
            SystemValue::Decimal(_) => "Decimal",
            SystemValue::Date(_) => "Date",
            SystemValue::DateTime(_) => "DateTime",
            SystemValue::Time(_) => "Time",
        }
    }
}

impl fmt::Display for SystemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemValue::Boolean(b) => write!(f, "{}", b),
            SystemValue::String(s) => write!(f, "'{}'", s),
            SystemValue::Integer(i) => write!(f, "{}", i),
            SystemValue::Decimal(d) => write!(f, "{}", d),
            SystemValue::Date(d) => write!(f, "@{}", d),
            SystemValue::DateTime(d) => write!(f, "@{}", d),
            SystemValue::Time(t) => write!(f, "@T{}", t),
        }
    }
}
