//! Error types for toolwire
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while building tool definitions
#[derive(Debug, Error)]
pub enum ToolwireError {
    /// Type cannot be mapped to a wire type
    #[error("Tool definition error: unsupported parameter type: {0}")]
    UnsupportedParameterType(String),

    /// Signature is malformed (missing description, bad name, ...)
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// A tool with the same fully qualified name is already registered
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// Tool not found in the catalog
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Type expression could not be parsed
    #[error("Type parse error at offset {offset}: {message}")]
    TypeParse { offset: usize, message: String },

    /// Catalog file error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolwireError {
    /// Build a parse error at the given byte offset
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::TypeParse {
            offset,
            message: message.into(),
        }
    }

    /// Check if this is the unsupported-type classification failure
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedParameterType(_))
    }
}

/// Result type alias for toolwire operations
pub type Result<T> = std::result::Result<T, ToolwireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_parameter_type_error() {
        let err = ToolwireError::UnsupportedParameterType("None".to_string());
        assert_eq!(err.to_string(), "Tool definition error: unsupported parameter type: None");
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_invalid_signature_error() {
        let err = ToolwireError::InvalidSignature("parameter 'owner' has no description".to_string());
        assert_eq!(err.to_string(), "Invalid signature: parameter 'owner' has no description");
        assert!(!err.is_unsupported_type());
    }

    #[test]
    fn test_duplicate_tool_error() {
        let err = ToolwireError::DuplicateTool("Github.ListIssues".to_string());
        assert_eq!(err.to_string(), "Duplicate tool: Github.ListIssues");
    }

    #[test]
    fn test_tool_not_found_error() {
        let err = ToolwireError::ToolNotFound("Missing.Tool".to_string());
        assert_eq!(err.to_string(), "Tool not found: Missing.Tool");
    }

    #[test]
    fn test_type_parse_error() {
        let err = ToolwireError::parse(7, "unknown type 'strng'");
        assert_eq!(err.to_string(), "Type parse error at offset 7: unknown type 'strng'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolwireError = io_err.into();
        assert!(matches!(err, ToolwireError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ToolwireError = json_err.into();
        assert!(matches!(err, ToolwireError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ToolwireError::Catalog("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
