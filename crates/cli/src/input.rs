//! Reading resources from files or stdin.

use crate::Format;
use anyhow::{Context, bail};
use medknow_fhir::r4b::Resource;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads the whole input; `-` means stdin.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Detects the format from the first significant character.
pub fn detect_format(text: &str) -> anyhow::Result<Format> {
    match text.trim_start_matches('\u{feff}').trim_start().chars().next() {
        Some('<') => Ok(Format::Xml),
        Some('{') => Ok(Format::Json),
        Some(other) => bail!("cannot tell the input format from its first character `{other}`"),
        None => bail!("input is empty"),
    }
}

/// Parses a resource from JSON or XML text.
pub fn parse_resource(text: &str) -> anyhow::Result<(Resource, Format)> {
    let format = detect_format(text)?;
    debug!(%format, bytes = text.len(), "parsing resource");
    let resource = match format {
        Format::Json => medknow_serde::from_json_str(text),
        Format::Xml => medknow_serde::from_xml_str(text),
    }
    .with_context(|| format!("failed to parse {format} input"))?;
    Ok((resource, format))
}

/// Reads and parses the resource at `path`.
pub fn load(path: &Path) -> anyhow::Result<(Resource, Format)> {
    let text = read_input(path)?;
    parse_resource(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("  {\"a\": 1}").unwrap(), Format::Json);
        assert_eq!(detect_format("\u{feff}<?xml version=\"1.0\"?>").unwrap(), Format::Xml);
        assert!(detect_format("resourceType: x").is_err());
        assert!(detect_format("   \n").is_err());
    }

    #[test]
    fn test_parse_errors_name_the_format() {
        let err = parse_resource(r#"{"resourceType": "Patient"}"#).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON input"));

        let err = parse_resource("<MedicationKnowledge><oops/></MedicationKnowledge>").unwrap_err();
        assert!(err.to_string().contains("failed to parse XML input"));
    }
}
