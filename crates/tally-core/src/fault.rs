use serde_json::Value;

/// A failure raised by a collaborator during request handling.
///
/// Faults form a unidirectional, acyclic chain from the outermost wrapper
/// down to the root cause. The chain is built by the collaborator that
/// raised the fault; this type only carries it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
    #[source]
    cause: Option<Box<Fault>>,
}

/// Closed set of fault kinds the request pipeline can raise.
#[derive(Debug, Clone)]
pub enum FaultKind {
    /// The storage engine rejected a write because of a schema constraint
    /// (unique key, foreign key)
    PersistenceConstraint,

    /// Explicit request binding collected one or more field errors
    Bind(Vec<FieldError>),

    /// The validation engine reported one or more violated constraints
    ConstraintViolation(Vec<ConstraintViolation>),

    /// A transaction commit failed
    TransactionBoundary,

    /// Any failure outside the recognized taxonomy
    Other,
}

impl Fault {
    /// Create a fault with no cause
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach an inner fault, making `self` the outer link of the chain
    #[must_use]
    pub fn caused_by(mut self, cause: Self) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Kind tag used for translation dispatch
    #[must_use]
    pub const fn kind(&self) -> &FaultKind {
        &self.kind
    }

    /// Human-readable message carried by this link of the chain
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The directly wrapped inner fault, if any
    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        self.cause.as_deref()
    }

    /// The deepest fault in the chain, or `self` when nothing is wrapped
    #[must_use]
    pub fn most_specific_cause(&self) -> &Self {
        let mut current = self;
        while let Some(inner) = current.cause() {
            current = inner;
        }
        current
    }

    /// Descend exactly `depth` links into the cause chain
    ///
    /// Returns `None` when the chain is shorter than `depth`. A depth of
    /// zero returns `self`.
    #[must_use]
    pub fn unwrap_cause(&self, depth: usize) -> Option<&Self> {
        let mut current = self;
        for _ in 0..depth {
            current = current.cause()?;
        }
        Some(current)
    }
}

/// One violated constraint as reported by the validation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// Simple name of the entity that owns the invalid property
    pub root_entity: String,
    /// Dot-delimited traversal path to the invalid property, never empty
    pub property_path: String,
    /// Message attached to the violated constraint
    pub message: String,
    /// The value that failed validation
    pub invalid_value: Value,
}

impl ConstraintViolation {
    pub fn new(
        root_entity: impl Into<String>,
        property_path: impl Into<String>,
        message: impl Into<String>,
        invalid_value: Value,
    ) -> Self {
        Self {
            root_entity: root_entity.into(),
            property_path: property_path.into(),
            message: message.into(),
            invalid_value,
        }
    }
}

/// One field error collected by explicit request binding.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Declared name of the bound field, never empty
    pub field: String,
    /// The value the client sent for the field
    pub rejected_value: Value,
    /// Why binding rejected the value
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rejected_value: Value, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rejected_value,
            message: message.into(),
        }
    }
}
