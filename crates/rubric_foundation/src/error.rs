//! Error types for the Rubric system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Rubric operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown directive type error.
    #[must_use]
    pub fn unknown_directive(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDirective(name.into()))
    }

    /// Creates an unknown attribute error.
    #[must_use]
    pub fn unknown_attribute(directive: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAttribute {
            directive: directive.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates a missing required attribute error.
    #[must_use]
    pub fn missing_attribute(directive: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingAttribute {
            directive: directive.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates a type mismatch error for an attribute value.
    #[must_use]
    pub fn type_mismatch(attribute: impl Into<String>, expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            attribute: attribute.into(),
            expected,
            actual,
        })
    }

    /// Returns true if this error describes invalid declarative metadata
    /// that the user must fix, rather than an internal failure.
    #[must_use]
    pub fn is_configuration_fault(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::Internal(_) | ErrorKind::IoError(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Directive type is not registered.
    #[error("unknown directive type: {0}")]
    UnknownDirective(String),

    /// Attribute is not declared on the directive type.
    #[error("directive {directive} has no attribute named {attribute}")]
    UnknownAttribute {
        /// The directive type that was queried.
        directive: String,
        /// The attribute name that was not found.
        attribute: String,
    },

    /// A required attribute (one without a default) was not supplied.
    #[error("directive {directive} requires a value for attribute {attribute}")]
    MissingAttribute {
        /// The directive type being instantiated.
        directive: String,
        /// The attribute lacking a value.
        attribute: String,
    },

    /// Attribute value does not match the declared type.
    #[error("type mismatch for attribute {attribute}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The attribute being assigned.
        attribute: String,
        /// The declared type.
        expected: Type,
        /// The type of the supplied value.
        actual: Type,
    },

    /// A non-repeatable directive type appears more than once in one list.
    #[error("directive {0} is not repeatable but is declared more than once")]
    NotRepeatable(String),

    /// Two directive types were registered under the same name.
    #[error("directive type {0} is registered more than once")]
    DuplicateDirective(String),

    /// One field is declared twice with different directive lists.
    #[error("field {0} is declared more than once with different directives")]
    DuplicateField(String),

    /// Composite directive types nest each other in a cycle.
    #[error("composite directives form a cycle: {}", .0.join(" -> "))]
    CompositeCycle(Vec<String>),

    /// An override rule targets an attribute the addressed child does not declare.
    #[error(
        "composite {composite} overrides attribute {attribute} of {target}[{index}] via its own attribute {rule}, but {target} declares no attribute {attribute}"
    )]
    OverrideTargetMissing {
        /// The composite directive type declaring the rule.
        composite: String,
        /// The composite's own attribute that carries the rule.
        rule: String,
        /// The rule's target directive type.
        target: String,
        /// Declaration index of the addressed child.
        index: usize,
        /// The attribute that does not exist on the target.
        attribute: String,
    },

    /// An override rule's source type is not accepted by the target attribute.
    #[error(
        "composite {composite} overrides {target}.{attribute} ({expected}) with its attribute {rule} ({actual})"
    )]
    OverrideTypeMismatch {
        /// The composite directive type declaring the rule.
        composite: String,
        /// The composite's own attribute that carries the rule.
        rule: String,
        /// The rule's target directive type.
        target: String,
        /// The target attribute.
        attribute: String,
        /// Declared type of the target attribute.
        expected: Type,
        /// Declared type of the composite's attribute.
        actual: Type,
    },

    /// An override rule addresses an occurrence no child has.
    ///
    /// Only raised when strict occurrence checking is enabled.
    #[error("composite {composite} rule {rule} addresses {target}[{index}], which is not declared")]
    OverrideOccurrenceMissing {
        /// The composite directive type declaring the rule.
        composite: String,
        /// The composite's own attribute that carries the rule.
        rule: String,
        /// The rule's target directive type.
        target: String,
        /// The occurrence index that matched nothing.
        index: usize,
    },

    /// Schema document could not be parsed or is malformed.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Qualified name of the field whose directives were being processed.
    pub field: Option<String>,
    /// Source document the definition came from.
    pub source: Option<String>,
    /// Chain of directive types being expanded, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declaring field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the source document.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(field) = &self.field {
            parts.push(format!("field {field}"));
        }
        if let Some(source) = &self.source {
            parts.push(format!("in {source}"));
        }
        if !self.stack.is_empty() {
            parts.push(format!("expanding {}", self.stack.join(" > ")));
        }
        write!(f, "{}", parts.join(", "))
    }
}
