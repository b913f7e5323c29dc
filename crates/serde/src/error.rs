/// Error types for FHIR serialization and deserialization.
#[derive(Debug)]
pub enum SerdeError {
    /// JSON serialization or deserialization error, including model
    /// validation failures reported while decoding.
    Json(serde_json::Error),

    /// XML reading or writing error
    #[cfg(feature = "xml")]
    Xml(quick_xml::Error),

    /// Malformed XML attribute
    #[cfg(feature = "xml")]
    XmlAttribute(quick_xml::events::attributes::AttrError),

    /// IO error during serialization/deserialization
    Io(std::io::Error),

    /// Input or output that is not valid UTF-8
    Utf8(std::str::Utf8Error),

    /// Custom error message
    Custom(String),
}

impl std::fmt::Display for SerdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerdeError::Json(e) => write!(f, "JSON error: {}", e),
            #[cfg(feature = "xml")]
            SerdeError::Xml(e) => write!(f, "XML error: {}", e),
            #[cfg(feature = "xml")]
            SerdeError::XmlAttribute(e) => write!(f, "XML attribute error: {}", e),
            SerdeError::Io(e) => write!(f, "IO error: {}", e),
            SerdeError::Utf8(e) => write!(f, "invalid UTF-8: {}", e),
            SerdeError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SerdeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerdeError::Json(e) => Some(e),
            #[cfg(feature = "xml")]
            SerdeError::Xml(e) => Some(e),
            #[cfg(feature = "xml")]
            SerdeError::XmlAttribute(e) => Some(e),
            SerdeError::Io(e) => Some(e),
            SerdeError::Utf8(e) => Some(e),
            SerdeError::Custom(_) => None,
        }
    }
}

impl From<serde_json::Error> for SerdeError {
    fn from(err: serde_json::Error) -> Self {
        SerdeError::Json(err)
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for SerdeError {
    fn from(err: quick_xml::Error) -> Self {
        SerdeError::Xml(err)
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::events::attributes::AttrError> for SerdeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        SerdeError::XmlAttribute(err)
    }
}

impl From<std::io::Error> for SerdeError {
    fn from(err: std::io::Error) -> Self {
        SerdeError::Io(err)
    }
}

impl From<std::str::Utf8Error> for SerdeError {
    fn from(err: std::str::Utf8Error) -> Self {
        SerdeError::Utf8(err)
    }
}

impl From<std::string::FromUtf8Error> for SerdeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SerdeError::Utf8(err.utf8_error())
    }
}

impl From<String> for SerdeError {
    fn from(msg: String) -> Self {
        SerdeError::Custom(msg)
    }
}

impl From<&str> for SerdeError {
    fn from(msg: &str) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

impl serde::ser::Error for SerdeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

impl serde::de::Error for SerdeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

/// Result type alias for FHIR serialization operations
pub type Result<T> = std::result::Result<T, SerdeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_prefixes_the_layer() {
        let err: SerdeError = "no resourceType".into();
        assert_eq!(err.to_string(), "no resourceType");

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SerdeError::from(json);
        assert!(err.to_string().starts_with("JSON error:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_utf8_errors_convert() {
        let bytes = vec![0xff, 0xfe];
        let err = SerdeError::from(String::from_utf8(bytes).unwrap_err());
        assert!(matches!(err, SerdeError::Utf8(_)));
        assert!(err.to_string().starts_with("invalid UTF-8"));
    }
}
