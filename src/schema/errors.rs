//! Schema error types
//!
//! Error codes:
//! - ARBOR_UNKNOWN_PATH (REJECT)
//! - ARBOR_TYPE_MISMATCH (REJECT)
//! - ARBOR_MISSING_FIELD (REJECT)
//! - ARBOR_UNEXPECTED_FIELD (REJECT)
//! - ARBOR_CROSS_FIELD_CONSTRAINT (REJECT)
//! - ARBOR_SHAPE_IMMUTABLE (REJECT)
//! - ARBOR_MALFORMED_SHAPE (FATAL)

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller's value rejected
    Reject,
    /// Registry cannot be built, startup must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Path does not match any registered template
    UnknownPath,
    /// Field present but wrong primitive type
    TypeMismatch,
    /// Required field absent
    MissingField,
    /// Undeclared field present (strict mode)
    UnexpectedField,
    /// Declared cross-field predicate violated
    CrossFieldConstraint,
    /// Attempt to re-register a template
    ShapeImmutable,
    /// Shape file unreadable or structurally invalid (FATAL)
    MalformedShape,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownPath => "ARBOR_UNKNOWN_PATH",
            SchemaErrorCode::TypeMismatch => "ARBOR_TYPE_MISMATCH",
            SchemaErrorCode::MissingField => "ARBOR_MISSING_FIELD",
            SchemaErrorCode::UnexpectedField => "ARBOR_UNEXPECTED_FIELD",
            SchemaErrorCode::CrossFieldConstraint => "ARBOR_CROSS_FIELD_CONSTRAINT",
            SchemaErrorCode::ShapeImmutable => "ARBOR_SHAPE_IMMUTABLE",
            SchemaErrorCode::MalformedShape => "ARBOR_MALFORMED_SHAPE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedShape => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    /// Dotted field location (e.g. "history.m1.2026-01-01T00:00:00.mmr")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn unexpected_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "no undeclared fields".into(),
            actual: "extra field present".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Shape name if applicable
    shape: Option<String>,
    /// Validation details if applicable
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create an unknown path error
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::UnknownPath,
            message: format!("No shape registered for path '{}'", path.into()),
            shape: None,
            details: None,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(shape: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::TypeMismatch,
            message: format!("Type mismatch: {}", details),
            shape: Some(shape.into()),
            details: Some(details),
        }
    }

    /// Create a missing field error
    pub fn missing_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        let details = ValidationDetails::missing_field(field);
        Self {
            code: SchemaErrorCode::MissingField,
            message: format!("Missing field: {}", details),
            shape: Some(shape.into()),
            details: Some(details),
        }
    }

    /// Create an unexpected field error
    pub fn unexpected_field(shape: impl Into<String>, field: impl Into<String>) -> Self {
        let details = ValidationDetails::unexpected_field(field);
        Self {
            code: SchemaErrorCode::UnexpectedField,
            message: format!("Unexpected field: {}", details),
            shape: Some(shape.into()),
            details: Some(details),
        }
    }

    /// Create a cross-field constraint error
    pub fn constraint_failed(
        shape: impl Into<String>,
        check: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let check = check.into();
        Self {
            code: SchemaErrorCode::CrossFieldConstraint,
            message: format!("Constraint '{}' failed: {}", check, reason.into()),
            shape: Some(shape.into()),
            details: None,
        }
    }

    /// Create a shape immutable error
    pub fn shape_immutable(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            code: SchemaErrorCode::ShapeImmutable,
            message: format!("A shape is already registered for '{}'", template),
            shape: None,
            details: None,
        }
    }

    /// Create an error for a malformed shape file (FATAL)
    pub fn malformed_shape(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedShape,
            message: format!("Malformed shape '{}': {}", source.into(), reason.into()),
            shape: None,
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the shape name if applicable
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::UnknownPath.code(), "ARBOR_UNKNOWN_PATH");
        assert_eq!(SchemaErrorCode::TypeMismatch.code(), "ARBOR_TYPE_MISMATCH");
        assert_eq!(SchemaErrorCode::MissingField.code(), "ARBOR_MISSING_FIELD");
        assert_eq!(SchemaErrorCode::UnexpectedField.code(), "ARBOR_UNEXPECTED_FIELD");
        assert_eq!(
            SchemaErrorCode::CrossFieldConstraint.code(),
            "ARBOR_CROSS_FIELD_CONSTRAINT"
        );
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::TypeMismatch.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::MalformedShape.severity(), Severity::Fatal);
        assert!(SchemaError::malformed_shape("x.json", "bad").is_fatal());
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("mmr", "int", "string");
        let display = format!("{}", details);
        assert!(display.contains("mmr"));
        assert!(display.contains("int"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let err = SchemaError::missing_field("GameStats", "ranking");
        assert!(err.message().contains("ranking"));
        assert_eq!(err.code(), SchemaErrorCode::MissingField);
    }
}
